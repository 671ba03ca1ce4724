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

use std::cell::RefCell;
use std::rc::Rc;

use crate::clip::StreamTransform;
use crate::error::Error;
use crate::projection::{GeoProjection, Projection};
use crate::stream::Stream;

const NAME: &str = "albers usa";

/// Inset clip extents are shrunk by this many pixels so that the insets
/// never share an edge.
const EPSILON: f64 = 1e-6;

/// A composite of three conic equal-area projections: the lower 48 states,
/// with Alaska and Hawaii drawn as insets below them.
#[derive(Clone, Debug)]
pub struct AlbersUsa {
    lower48: Projection,
    alaska: Projection,
    hawaii: Projection,
}

impl Default for AlbersUsa {
    fn default() -> Self {
        AlbersUsa::new()
    }
}

impl AlbersUsa {
    pub fn new() -> Self {
        let lower48 = Projection::albers();
        let mut alaska = Projection::conic_equal_area();
        alaska
            .set_conic_parallels([55.0, 65.0])
            .set_rotate([154.0, 0.0, 0.0])
            .set_center([-2.0, 58.5]);
        let mut hawaii = Projection::conic_equal_area();
        hawaii
            .set_conic_parallels([8.0, 18.0])
            .set_rotate([157.0, 0.0, 0.0])
            .set_center([-3.0, 19.9]);
        let mut projection = AlbersUsa {
            lower48,
            alaska,
            hawaii,
        };
        projection.set_scale(1070.0);
        projection
    }

    pub fn project(&self, point: [f64; 2]) -> Option<[f64; 2]> {
        self.lower48
            .project(point)
            .or_else(|| self.alaska.project(point))
            .or_else(|| self.hawaii.project(point))
    }

    /// Inverts with whichever projection owns the planar region the point
    /// falls in.
    pub fn invert(&self, point: [f64; 2]) -> Result<[f64; 2], Error> {
        let k = self.lower48.scale();
        let [tx, ty] = self.lower48.translate();
        let x = (point[0] - tx) / k;
        let y = (point[1] - ty) / k;
        let projection = if (0.120..0.234).contains(&y) && (-0.425..-0.214).contains(&x) {
            &self.alaska
        } else if (0.166..0.234).contains(&y) && (-0.214..-0.115).contains(&x) {
            &self.hawaii
        } else {
            &self.lower48
        };
        projection.invert(point)
    }

    /// Every event reaches all three projections; their clip extents keep
    /// each region inside its own box.
    pub fn stream<'a>(&self, sink: &'a mut dyn Stream) -> Box<dyn Stream + 'a> {
        let shared = SharedStream(Rc::new(RefCell::new(sink)));
        Box::new(Multiplex {
            streams: [
                self.lower48.stream_into(Box::new(shared.clone())),
                self.alaska.stream_into(Box::new(shared.clone())),
                self.hawaii.stream_into(Box::new(shared)),
            ],
        })
    }

    pub fn scale(&self) -> f64 {
        self.lower48.scale()
    }

    pub fn set_scale(&mut self, scale: f64) -> &mut Self {
        self.lower48.set_scale(scale);
        self.alaska.set_scale(scale * 0.35);
        self.hawaii.set_scale(scale);
        let translate = self.lower48.translate();
        self.set_translate(translate)
    }

    pub fn translate(&self) -> [f64; 2] {
        self.lower48.translate()
    }

    /// Move the lower 48 to `translate` and lay out the insets around it.
    pub fn set_translate(&mut self, translate: [f64; 2]) -> &mut Self {
        let k = self.lower48.scale();
        let [x, y] = translate;
        self.lower48.set_translate(translate).set_clip_extent(Some([
            [x - 0.455 * k, y - 0.238 * k],
            [x + 0.455 * k, y + 0.238 * k],
        ]));
        self.alaska
            .set_translate([x - 0.307 * k, y + 0.201 * k])
            .set_clip_extent(Some([
                [x - 0.425 * k + EPSILON, y + 0.120 * k + EPSILON],
                [x - 0.214 * k - EPSILON, y + 0.234 * k - EPSILON],
            ]));
        self.hawaii
            .set_translate([x - 0.205 * k, y + 0.212 * k])
            .set_clip_extent(Some([
                [x - 0.214 * k + EPSILON, y + 0.166 * k + EPSILON],
                [x - 0.115 * k - EPSILON, y + 0.234 * k - EPSILON],
            ]));
        self
    }

    pub fn precision(&self) -> f64 {
        self.lower48.precision()
    }

    /// Applies to all three projections.
    pub fn set_precision(&mut self, precision: f64) -> Result<&mut Self, Error> {
        self.lower48.set_precision(precision)?;
        self.alaska.set_precision(precision)?;
        self.hawaii.set_precision(precision)?;
        Ok(self)
    }

    /// Not supported: each region has its own fixed center.
    pub fn set_center(&mut self, _center: [f64; 2]) -> Result<&mut Self, Error> {
        Err(Error::unsupported(NAME, "center"))
    }

    /// Not supported: each region has its own fixed rotation.
    pub fn set_rotate(&mut self, _angles: [f64; 3]) -> Result<&mut Self, Error> {
        Err(Error::unsupported(NAME, "rotate"))
    }

    pub fn set_clip_angle(&mut self, _angle: Option<f64>) -> Result<&mut Self, Error> {
        Err(Error::unsupported(NAME, "clip_angle"))
    }

    pub fn set_preclip(&mut self, _preclip: Rc<dyn StreamTransform>) -> Result<&mut Self, Error> {
        Err(Error::unsupported(NAME, "preclip"))
    }
}

impl GeoProjection for AlbersUsa {
    fn project(&self, point: [f64; 2]) -> Option<[f64; 2]> {
        AlbersUsa::project(self, point)
    }

    fn invert(&self, point: [f64; 2]) -> Result<[f64; 2], Error> {
        AlbersUsa::invert(self, point)
    }

    fn stream<'a>(&self, sink: &'a mut dyn Stream) -> Box<dyn Stream + 'a> {
        AlbersUsa::stream(self, sink)
    }
}

/// One sink shared by several stream chains.
#[derive(Clone)]
struct SharedStream<'a>(Rc<RefCell<&'a mut dyn Stream>>);

impl<'a> Stream for SharedStream<'a> {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        self.0.borrow_mut().point(x, y, m);
    }
    fn line_start(&mut self) {
        self.0.borrow_mut().line_start();
    }
    fn line_end(&mut self) {
        self.0.borrow_mut().line_end();
    }
    fn polygon_start(&mut self) {
        self.0.borrow_mut().polygon_start();
    }
    fn polygon_end(&mut self) {
        self.0.borrow_mut().polygon_end();
    }
    fn sphere(&mut self) {
        self.0.borrow_mut().sphere();
    }
}

/// Forwards every event to each of its streams in turn.
struct Multiplex<'a> {
    streams: [Box<dyn Stream + 'a>; 3],
}

impl<'a> Stream for Multiplex<'a> {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        for stream in self.streams.iter_mut() {
            stream.point(x, y, m);
        }
    }
    fn line_start(&mut self) {
        for stream in self.streams.iter_mut() {
            stream.line_start();
        }
    }
    fn line_end(&mut self) {
        for stream in self.streams.iter_mut() {
            stream.line_end();
        }
    }
    fn polygon_start(&mut self) {
        for stream in self.streams.iter_mut() {
            stream.polygon_start();
        }
    }
    fn polygon_end(&mut self) {
        for stream in self.streams.iter_mut() {
            stream.polygon_end();
        }
    }
    fn sphere(&mut self) {
        for stream in self.streams.iter_mut() {
            stream.sphere();
        }
    }
}
