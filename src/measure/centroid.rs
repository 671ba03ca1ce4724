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

use crate::math::{asin, cartesian, cartesian_dot, cartesian_cross, Adder, Vec3, EPSILON, EPSILON2};
use crate::stream::Stream;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Point,
    LineStart,
    Line,
    RingStart,
    Ring,
}

/// Spherical centroid of everything it receives.
///
/// Polygons are weighted by area, lines by length and points by count;
/// the highest dimension present wins. Weighted sums are kept as Cartesian
/// vectors so the result does not depend on where the antimeridian is.
#[derive(Clone, Debug)]
pub struct CentroidStream {
    mode: Mode,
    in_polygon: bool,
    /// Points: running mean of the unit vectors.
    w0: f64,
    mean0: Vec3,
    /// Lines: length-weighted midpoints.
    w1: f64,
    sum1: Vec3,
    /// Polygons: area-weighted, summed exactly.
    sum2: [Adder; 3],
    /// Previous vertex.
    p0: Vec3,
    /// First point of the current ring, in degrees.
    first: [f64; 2],
}

impl Default for CentroidStream {
    fn default() -> Self {
        CentroidStream {
            mode: Mode::Point,
            in_polygon: false,
            w0: 0.0,
            mean0: [0.0; 3],
            w1: 0.0,
            sum1: [0.0; 3],
            sum2: Default::default(),
            p0: [0.0; 3],
            first: [0.0; 2],
        }
    }
}

fn unit(lambda: f64, phi: f64) -> Vec3 {
    cartesian(lambda.to_radians(), phi.to_radians())
}

fn hypot3(v: Vec3) -> f64 {
    cartesian_dot(v, v).sqrt()
}

impl CentroidStream {
    pub fn new() -> Self {
        CentroidStream::default()
    }

    /// `[longitude, latitude]` in degrees, or NaN when the weights cancel
    /// (nothing received, or e.g. two antipodal points). The accumulator is
    /// reset.
    pub fn result(&mut self) -> [f64; 2] {
        let mut v = [self.sum2[0].value(), self.sum2[1].value(), self.sum2[2].value()];
        let mut m = hypot3(v);
        if m < EPSILON2 {
            v = if self.w1 < EPSILON { self.mean0 } else { self.sum1 };
            m = hypot3(v);
        }
        *self = CentroidStream::default();
        if m < EPSILON2 {
            return [f64::NAN, f64::NAN];
        }
        [v[1].atan2(v[0]).to_degrees(), asin(v[2] / m).to_degrees()]
    }

    fn add_point(&mut self, p: Vec3) {
        self.w0 += 1.0;
        for i in 0..3 {
            self.mean0[i] += (p[i] - self.mean0[i]) / self.w0;
        }
    }

    fn add_arc(&mut self, p: Vec3, w: f64) {
        self.w1 += w;
        for i in 0..3 {
            self.sum1[i] += w * (self.p0[i] + p[i]);
        }
    }

    fn line_point(&mut self, p: Vec3) {
        let cross = cartesian_cross(self.p0, p);
        let w = hypot3(cross).atan2(cartesian_dot(self.p0, p));
        self.add_arc(p, w);
        self.p0 = p;
        self.add_point(p);
    }

    fn ring_point(&mut self, p: Vec3) {
        let cross = cartesian_cross(self.p0, p);
        let m = hypot3(cross);
        let w = asin(m);
        let v = if m != 0.0 { -w / m } else { 0.0 };
        for i in 0..3 {
            self.sum2[i].add(v * cross[i]);
        }
        self.add_arc(p, w);
        self.p0 = p;
        self.add_point(p);
    }
}

impl Stream for CentroidStream {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        let p = unit(x, y);
        match self.mode {
            Mode::Point => self.add_point(p),
            Mode::LineStart => {
                self.p0 = p;
                self.add_point(p);
                self.mode = Mode::Line;
            }
            Mode::Line => self.line_point(p),
            Mode::RingStart => {
                self.first = [x, y];
                self.p0 = p;
                self.add_point(p);
                self.mode = Mode::Ring;
            }
            Mode::Ring => self.ring_point(p),
        }
    }

    fn line_start(&mut self) {
        self.mode = if self.in_polygon {
            Mode::RingStart
        } else {
            Mode::LineStart
        };
    }

    fn line_end(&mut self) {
        if self.mode == Mode::Ring {
            let [x, y] = self.first;
            self.ring_point(unit(x, y));
        }
        self.mode = Mode::Point;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::circle::GeoCircle;
    use crate::geometry::{GeoObject, Geometry};
    use crate::measure::centroid;
    use approx::assert_abs_diff_eq;

    fn parse(json: &str) -> GeoObject {
        json.parse().unwrap()
    }

    fn assert_centroid(object: &GeoObject, expected: [f64; 2]) {
        let c = centroid(object);
        assert_abs_diff_eq!(c[0], expected[0], epsilon = 1e-6);
        assert_abs_diff_eq!(c[1], expected[1], epsilon = 1e-6);
    }

    #[test]
    fn points_average_on_the_sphere() {
        assert_centroid(&parse(r#"{"type":"Point","coordinates":[0,0]}"#), [0.0, 0.0]);
        assert_centroid(
            &parse(r#"{"type":"MultiPoint","coordinates":[[0,0],[1,2]]}"#),
            [0.499847, 1.000038],
        );
        assert_centroid(
            &parse(r#"{"type":"MultiPoint","coordinates":[[179,0],[-179,0]]}"#),
            [180.0, 0.0],
        );
    }

    #[test]
    fn antipodes_have_no_centroid() {
        let c = centroid(&parse(r#"{"type":"MultiPoint","coordinates":[[0,0],[180,0]]}"#));
        assert!(c[0].is_nan() && c[1].is_nan());
    }

    #[test]
    fn lines_weigh_by_length() {
        assert_centroid(
            &parse(r#"{"type":"LineString","coordinates":[[0,0],[1,0]]}"#),
            [0.5, 0.0],
        );
        assert_centroid(
            &parse(r#"{"type":"LineString","coordinates":[[0,0],[0,90]]}"#),
            [0.0, 45.0],
        );
        assert_centroid(
            &parse(r#"{"type":"LineString","coordinates":[[0,0],[0,45],[0,90]]}"#),
            [0.0, 45.0],
        );
        assert_centroid(
            &parse(r#"{"type":"MultiLineString","coordinates":[[[0,0],[0,2]]]}"#),
            [0.0, 1.0],
        );
        // a zero-length line counts as its points
        assert_centroid(
            &parse(
                r#"{"type":"GeometryCollection","geometries":[
                    {"type":"Point","coordinates":[0,0]},
                    {"type":"LineString","coordinates":[[1,2],[1,2]]}
                ]}"#,
            ),
            [0.666534, 1.333408],
        );
    }

    #[test]
    fn polygons_weigh_by_area() {
        assert_centroid(
            &parse(r#"{"type":"Polygon","coordinates":[[[0,-90],[0,0],[0,90],[1,0],[0,-90]]]}"#),
            [0.5, 0.0],
        );
        assert_centroid(
            &parse(r#"{"type":"Polygon","coordinates":[[[0,-10],[0,10],[10,10],[10,-10],[0,-10]]]}"#),
            [5.0, 0.0],
        );
        for radius in [5.0, 135.0] {
            let circle = GeoCircle::new().center([30.0, 45.0]).radius(radius);
            assert_centroid(&circle.circle().into(), [30.0, 45.0]);
        }
    }

    #[test]
    fn polygons_win_over_points() {
        let object = GeoObject::Geometry(Geometry::GeometryCollection(vec![
            Geometry::Point(vec![90.0, 0.0]),
            Geometry::Polygon(vec![vec![
                vec![0.0, -90.0],
                vec![0.0, 0.0],
                vec![0.0, 90.0],
                vec![1.0, 0.0],
                vec![0.0, -90.0],
            ]]),
        ]));
        assert_centroid(&object, [0.5, 0.0]);
    }
}
