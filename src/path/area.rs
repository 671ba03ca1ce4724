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

use crate::math::Adder;
use crate::stream::Stream;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pen {
    /// Points and lines outside polygons are ignored.
    Idle,
    RingStart,
    Ring,
}

/// Planar area of every polygon it receives.
///
/// Each polygon counts as the absolute value of its signed ring sum, so
/// holes wound against their exterior are subtracted.
#[derive(Clone, Debug)]
pub struct PathArea {
    sum: Adder,
    ring_sum: Adder,
    pen: Pen,
    in_polygon: bool,
    first: [f64; 2],
    p0: [f64; 2],
}

impl Default for PathArea {
    fn default() -> Self {
        PathArea {
            sum: Adder::new(),
            ring_sum: Adder::new(),
            pen: Pen::Idle,
            in_polygon: false,
            first: [0.0; 2],
            p0: [0.0; 2],
        }
    }
}

impl PathArea {
    pub fn new() -> Self {
        PathArea::default()
    }

    /// Total area so far; the accumulator is reset.
    pub fn result(&mut self) -> f64 {
        let area = self.sum.value() * 0.5;
        *self = PathArea::default();
        area
    }

    fn ring_point(&mut self, x: f64, y: f64) {
        let [x0, y0] = self.p0;
        self.ring_sum.add(y0 * x - x0 * y);
        self.p0 = [x, y];
    }
}

impl Stream for PathArea {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        match self.pen {
            Pen::Idle => {}
            Pen::RingStart => {
                self.first = [x, y];
                self.p0 = [x, y];
                self.pen = Pen::Ring;
            }
            Pen::Ring => self.ring_point(x, y),
        }
    }

    fn line_start(&mut self) {
        if self.in_polygon {
            self.pen = Pen::RingStart;
        }
    }

    fn line_end(&mut self) {
        if self.pen == Pen::Ring {
            let [x, y] = self.first;
            self.ring_point(x, y);
        }
        self.pen = Pen::Idle;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
        self.pen = Pen::Idle;
        self.sum.add(self.ring_sum.value().abs());
        self.ring_sum = Adder::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(area: &mut PathArea, points: &[[f64; 2]]) {
        area.line_start();
        for p in points {
            area.point(p[0], p[1], None);
        }
        area.line_end();
    }

    #[test]
    fn polygons_ignore_winding() {
        let mut area = PathArea::new();
        area.polygon_start();
        ring(&mut area, &[[0.0, 0.0], [0.0, 2.0], [3.0, 2.0], [3.0, 0.0]]);
        area.polygon_end();
        area.polygon_start();
        ring(&mut area, &[[0.0, 0.0], [3.0, 0.0], [3.0, 2.0], [0.0, 2.0]]);
        area.polygon_end();
        assert_eq!(area.result(), 12.0);
    }

    #[test]
    fn holes_subtract() {
        let mut area = PathArea::new();
        area.polygon_start();
        ring(&mut area, &[[-1.0, -1.0], [-1.0, 2.0], [2.0, 2.0], [2.0, -1.0]]);
        ring(&mut area, &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        area.polygon_end();
        assert_eq!(area.result(), 8.0);
    }

    #[test]
    fn lines_and_points_have_no_area() {
        let mut area = PathArea::new();
        area.point(1.0, 2.0, None);
        ring(&mut area, &[[0.0, 0.0], [0.0, 2.0], [3.0, 2.0]]);
        assert_eq!(area.result(), 0.0);
    }
}
