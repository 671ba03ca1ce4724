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

use crate::math::asin;

fn haversin(x: f64) -> f64 {
    let s = (x / 2.0).sin();
    s * s
}

/// Points along the great arc between two `[longitude, latitude]` points
/// in degrees.
///
/// `at(0.0)` is the start, `at(1.0)` the end; values outside `[0, 1]`
/// continue along the same great circle. Antipodal endpoints pick an
/// arbitrary great circle.
///
/// ```
/// use geostream::GeoInterpolate;
///
/// let arc = GeoInterpolate::new([0.0, 0.0], [90.0, 0.0]);
/// let [lon, lat] = arc.at(0.5);
/// assert!((lon - 45.0).abs() < 1e-9 && lat.abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoInterpolate {
    start: [f64; 2],
    sy0: f64,
    sy1: f64,
    kx0: f64,
    ky0: f64,
    kx1: f64,
    ky1: f64,
    d: f64,
    k: f64,
}

impl GeoInterpolate {
    pub fn new(a: [f64; 2], b: [f64; 2]) -> Self {
        let (x0, y0) = (a[0].to_radians(), a[1].to_radians());
        let (x1, y1) = (b[0].to_radians(), b[1].to_radians());
        let (sy0, cy0) = y0.sin_cos();
        let (sy1, cy1) = y1.sin_cos();
        let d = 2.0 * asin((haversin(y1 - y0) + cy0 * cy1 * haversin(x1 - x0)).sqrt());
        GeoInterpolate {
            start: a,
            sy0,
            sy1,
            kx0: cy0 * x0.cos(),
            ky0: cy0 * x0.sin(),
            kx1: cy1 * x1.cos(),
            ky1: cy1 * x1.sin(),
            d,
            k: d.sin(),
        }
    }

    /// Angular distance between the endpoints, in radians.
    pub fn distance(&self) -> f64 {
        self.d
    }

    pub fn at(&self, t: f64) -> [f64; 2] {
        if self.d == 0.0 {
            return self.start;
        }
        let t = t * self.d;
        let b = t.sin() / self.k;
        let a = (self.d - t).sin() / self.k;
        let x = a * self.kx0 + b * self.kx1;
        let y = a * self.ky0 + b * self.ky1;
        let z = a * self.sy0 + b * self.sy1;
        [
            y.atan2(x).to_degrees(),
            z.atan2((x * x + y * y).sqrt()).to_degrees(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::distance;
    use approx::assert_abs_diff_eq;

    #[test]
    fn endpoints_and_midpoint() {
        let arc = GeoInterpolate::new([10.0, 20.0], [-40.0, 50.0]);
        let start = arc.at(0.0);
        let end = arc.at(1.0);
        assert_abs_diff_eq!(start[0], 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(start[1], 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end[0], -40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end[1], 50.0, epsilon = 1e-9);

        let middle = arc.at(0.5);
        assert_abs_diff_eq!(
            distance([10.0, 20.0], middle),
            distance(middle, [-40.0, 50.0]),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(arc.distance(), distance([10.0, 20.0], [-40.0, 50.0]), epsilon = 1e-12);
    }

    #[test]
    fn coincident_points_stay_put() {
        let arc = GeoInterpolate::new([140.0, -10.0], [140.0, -10.0]);
        assert_eq!(arc.distance(), 0.0);
        assert_eq!(arc.at(0.7), [140.0, -10.0]);
    }
}
