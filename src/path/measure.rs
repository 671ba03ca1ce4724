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
    Idle,
    LineStart,
    Line,
}

/// Planar length of every line and ring it receives.
///
/// Rings are closed back to their first point; bare points add nothing.
#[derive(Clone, Debug)]
pub struct PathMeasure {
    sum: Adder,
    pen: Pen,
    in_polygon: bool,
    first: [f64; 2],
    p0: [f64; 2],
}

impl Default for PathMeasure {
    fn default() -> Self {
        PathMeasure {
            sum: Adder::new(),
            pen: Pen::Idle,
            in_polygon: false,
            first: [0.0; 2],
            p0: [0.0; 2],
        }
    }
}

impl PathMeasure {
    pub fn new() -> Self {
        PathMeasure::default()
    }

    /// Total length so far; the accumulator is reset.
    pub fn result(&mut self) -> f64 {
        let length = self.sum.value();
        *self = PathMeasure::default();
        length
    }

    fn line_point(&mut self, x: f64, y: f64) {
        let [x0, y0] = self.p0;
        self.sum.add((x - x0).hypot(y - y0));
        self.p0 = [x, y];
    }
}

impl Stream for PathMeasure {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        match self.pen {
            Pen::Idle => {}
            Pen::LineStart => {
                self.first = [x, y];
                self.p0 = [x, y];
                self.pen = Pen::Line;
            }
            Pen::Line => self.line_point(x, y),
        }
    }

    fn line_start(&mut self) {
        self.pen = Pen::LineStart;
    }

    fn line_end(&mut self) {
        if self.in_polygon && self.pen == Pen::Line {
            let [x, y] = self.first;
            self.line_point(x, y);
        }
        self.pen = Pen::Idle;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
    }
}
