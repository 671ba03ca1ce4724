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

use crate::stream::Stream;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Point,
    LineStart,
    Line,
    RingStart,
    Ring,
}

/// Planar centroid of everything it receives.
///
/// Polygons are weighted by area, lines by length and points by count. The
/// highest dimension with a non-zero weight wins, so a degenerate polygon
/// falls back to the centroid of its perimeter.
#[derive(Clone, Debug)]
pub struct PathCentroid {
    mode: Mode,
    in_polygon: bool,
    /// Weighted sums `[x, y, weight]` for points, lines and polygons.
    sums: [[f64; 3]; 3],
    first: [f64; 2],
    p0: [f64; 2],
}

impl Default for PathCentroid {
    fn default() -> Self {
        PathCentroid {
            mode: Mode::Point,
            in_polygon: false,
            sums: [[0.0; 3]; 3],
            first: [f64::NAN; 2],
            p0: [f64::NAN; 2],
        }
    }
}

impl PathCentroid {
    pub fn new() -> Self {
        PathCentroid::default()
    }

    /// `[x, y]`, or NaN when nothing was received. The accumulator is reset.
    pub fn result(&mut self) -> [f64; 2] {
        let centroid = self
            .sums
            .iter()
            .rev()
            .find(|[_, _, z]| *z != 0.0 && !z.is_nan())
            .map_or([f64::NAN, f64::NAN], |[x, y, z]| [x / z, y / z]);
        *self = PathCentroid::default();
        centroid
    }

    fn add_point(&mut self, x: f64, y: f64) {
        let sum = &mut self.sums[0];
        sum[0] += x;
        sum[1] += y;
        sum[2] += 1.0;
    }

    fn line_point(&mut self, x: f64, y: f64) {
        let [x0, y0] = self.p0;
        let z = (x - x0).hypot(y - y0);
        let sum = &mut self.sums[1];
        sum[0] += z * (x0 + x) * 0.5;
        sum[1] += z * (y0 + y) * 0.5;
        sum[2] += z;
        self.p0 = [x, y];
        self.add_point(x, y);
    }

    fn ring_point(&mut self, x: f64, y: f64) {
        let [x0, y0] = self.p0;
        let z = y0 * x - x0 * y;
        let sum = &mut self.sums[2];
        sum[0] += z * (x0 + x);
        sum[1] += z * (y0 + y);
        sum[2] += z * 3.0;
        self.line_point(x, y);
    }
}

impl Stream for PathCentroid {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        match self.mode {
            Mode::Point => self.add_point(x, y),
            Mode::LineStart => {
                self.p0 = [x, y];
                self.add_point(x, y);
                self.mode = Mode::Line;
            }
            Mode::Line => self.line_point(x, y),
            Mode::RingStart => {
                self.first = [x, y];
                self.p0 = [x, y];
                self.add_point(x, y);
                self.mode = Mode::Ring;
            }
            Mode::Ring => self.ring_point(x, y),
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
            self.ring_point(x, y);
        }
        self.mode = Mode::Point;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
        self.mode = Mode::Point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(centroid: &mut PathCentroid, points: &[[f64; 2]]) {
        centroid.line_start();
        for p in points {
            centroid.point(p[0], p[1], None);
        }
        centroid.line_end();
    }

    #[test]
    fn empty_is_nan() {
        let [x, y] = PathCentroid::new().result();
        assert!(x.is_nan() && y.is_nan());
    }

    #[test]
    fn points_average() {
        let mut centroid = PathCentroid::new();
        centroid.point(0.0, 0.0, None);
        centroid.point(4.0, 2.0, None);
        assert_eq!(centroid.result(), [2.0, 1.0]);
    }

    #[test]
    fn lines_beat_points() {
        let mut centroid = PathCentroid::new();
        centroid.point(100.0, 100.0, None);
        line(&mut centroid, &[[0.0, 0.0], [2.0, 0.0], [2.0, 6.0]]);
        // segment midpoints (1, 0) and (2, 3) weighted 2 and 6
        assert_eq!(centroid.result(), [14.0 / 8.0, 18.0 / 8.0]);
    }

    #[test]
    fn zero_length_lines_count_as_points() {
        let mut centroid = PathCentroid::new();
        line(&mut centroid, &[[1.0, 1.0], [1.0, 1.0]]);
        centroid.point(4.0, 1.0, None);
        assert_eq!(centroid.result(), [2.0, 1.0]);
    }

    #[test]
    fn polygons_beat_lines() {
        let mut centroid = PathCentroid::new();
        line(&mut centroid, &[[50.0, 50.0], [60.0, 50.0]]);
        centroid.polygon_start();
        line(&mut centroid, &[[0.0, 0.0], [0.0, 2.0], [4.0, 2.0], [4.0, 0.0]]);
        centroid.polygon_end();
        assert_eq!(centroid.result(), [2.0, 1.0]);
    }
}
