// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::geometry::Geometry;
use crate::math::EPSILON;
use crate::{Extent, Position};

/// `start, start + step, ...` up to but excluding `stop`.
fn frange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil();
    if !(step > 0.0) || !(n > 0.0) {
        return Vec::new();
    }
    (0..n as usize).map(|i| start + i as f64 * step).collect()
}

/// A meridian at `x` from `y0` to `y1`, with a vertex every `dy` degrees.
fn meridian(x: f64, y0: f64, y1: f64, dy: f64) -> Vec<Position> {
    let mut ys = frange(y0, y1 - EPSILON, dy);
    ys.push(y1);
    ys.into_iter().map(|y| vec![x, y]).collect()
}

/// A parallel at `y` from `x0` to `x1`, with a vertex every `dx` degrees.
fn parallel(y: f64, x0: f64, x1: f64, dx: f64) -> Vec<Position> {
    let mut xs = frange(x0, x1 - EPSILON, dx);
    xs.push(x1);
    xs.into_iter().map(|x| vec![x, y]).collect()
}

fn ordered(extent: Extent) -> Extent {
    let [[x0, y0], [x1, y1]] = extent;
    [[x0.min(x1), y0.min(y1)], [x0.max(x1), y0.max(y1)]]
}

/// Generator of meridians and parallels.
///
/// Major lines cover the major extent every major step; minor lines cover
/// the minor extent every minor step, skipping those that fall on a major
/// line. The default has lines every 10° between ±80° latitude and
/// meridians every 90° up to the poles.
///
/// ```
/// use geostream::{Geometry, Graticule};
///
/// let outline = Graticule::new().set_extent([[-10.0, -10.0], [10.0, 10.0]]).outline();
/// assert!(matches!(outline, Geometry::Polygon(_)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Graticule {
    extent_major: Extent,
    extent_minor: Extent,
    step_major: [f64; 2],
    step_minor: [f64; 2],
    /// Spacing in degrees of the vertices along parallels.
    precision: f64,
}

impl Default for Graticule {
    fn default() -> Self {
        Graticule {
            extent_major: [[-180.0, -90.0 + EPSILON], [180.0, 90.0 - EPSILON]],
            extent_minor: [[-180.0, -80.0 - EPSILON], [180.0, 80.0 + EPSILON]],
            step_major: [90.0, 360.0],
            step_minor: [10.0, 10.0],
            precision: 2.5,
        }
    }
}

impl Graticule {
    pub fn new() -> Self {
        Graticule::default()
    }

    /// One `LineString` per meridian or parallel.
    pub fn lines(&self) -> Vec<Geometry> {
        self.coordinates()
            .into_iter()
            .map(Geometry::LineString)
            .collect()
    }

    /// Every meridian and parallel as a single `MultiLineString`.
    pub fn multi_line_string(&self) -> Geometry {
        Geometry::MultiLineString(self.coordinates())
    }

    /// The polygon bounded by the major extent.
    pub fn outline(&self) -> Geometry {
        let [[x0, y0], [x1, y1]] = self.extent_major;
        let mut ring = meridian(x0, y0, y1, 90.0);
        ring.extend(parallel(y1, x0, x1, self.precision).into_iter().skip(1));
        let mut east = meridian(x1, y0, y1, 90.0);
        east.pop();
        ring.extend(east.into_iter().rev());
        let mut south = parallel(y0, x0, x1, self.precision);
        south.pop();
        ring.extend(south.into_iter().rev());
        Geometry::Polygon(vec![ring])
    }

    fn coordinates(&self) -> Vec<Vec<Position>> {
        let [[big_x0, big_y0], [big_x1, big_y1]] = self.extent_major;
        let [[x0, y0], [x1, y1]] = self.extent_minor;
        let [big_dx, big_dy] = self.step_major;
        let [dx, dy] = self.step_minor;
        let precision = self.precision;

        let mut lines = Vec::new();
        for x in frange((big_x0 / big_dx).ceil() * big_dx, big_x1, big_dx) {
            lines.push(meridian(x, big_y0, big_y1, 90.0));
        }
        for y in frange((big_y0 / big_dy).ceil() * big_dy, big_y1, big_dy) {
            lines.push(parallel(y, big_x0, big_x1, precision));
        }
        for x in frange((x0 / dx).ceil() * dx, x1, dx) {
            if (x % big_dx).abs() > EPSILON {
                lines.push(meridian(x, y0, y1, 90.0));
            }
        }
        for y in frange((y0 / dy).ceil() * dy, y1, dy) {
            if (y % big_dy).abs() > EPSILON {
                lines.push(parallel(y, x0, x1, precision));
            }
        }
        lines
    }

    /// The minor extent.
    pub fn extent(&self) -> Extent {
        self.extent_minor
    }

    /// Sets both extents. Reversed corners are swapped.
    pub fn set_extent(&mut self, extent: Extent) -> &mut Self {
        self.set_extent_major(extent).set_extent_minor(extent)
    }

    pub fn extent_major(&self) -> Extent {
        self.extent_major
    }

    pub fn set_extent_major(&mut self, extent: Extent) -> &mut Self {
        self.extent_major = ordered(extent);
        self
    }

    pub fn extent_minor(&self) -> Extent {
        self.extent_minor
    }

    pub fn set_extent_minor(&mut self, extent: Extent) -> &mut Self {
        self.extent_minor = ordered(extent);
        self
    }

    /// The minor step.
    pub fn step(&self) -> [f64; 2] {
        self.step_minor
    }

    /// Sets both steps, `[longitude, latitude]` in degrees.
    pub fn set_step(&mut self, step: [f64; 2]) -> &mut Self {
        self.set_step_major(step).set_step_minor(step)
    }

    pub fn step_major(&self) -> [f64; 2] {
        self.step_major
    }

    pub fn set_step_major(&mut self, step: [f64; 2]) -> &mut Self {
        self.step_major = step;
        self
    }

    pub fn step_minor(&self) -> [f64; 2] {
        self.step_minor
    }

    pub fn set_step_minor(&mut self, step: [f64; 2]) -> &mut Self {
        self.step_minor = step;
        self
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn set_precision(&mut self, precision: f64) -> &mut Self {
        self.precision = precision;
        self
    }
}

/// The default graticule as a `MultiLineString`.
pub fn graticule_10() -> Geometry {
    Graticule::new().multi_line_string()
}
