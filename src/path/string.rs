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

use crate::error::Error;
use crate::stream::Stream;

/// Where the next point goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pen {
    /// Outside any line: points are drawn as circles.
    Point,
    /// First point of a line.
    LineStart,
    Line,
}

/// Builds SVG path data from planar stream events.
///
/// Lines become `M`/`L` runs, polygon rings are closed with `Z`, and bare
/// points become small circles. Numbers are rounded to `digits` decimals.
#[derive(Clone, Debug)]
pub struct PathString {
    path: String,
    pen: Pen,
    in_polygon: bool,
    radius: f64,
    digits: Option<f64>,
    circle: Option<String>,
}

impl Default for PathString {
    fn default() -> Self {
        PathString {
            path: String::new(),
            pen: Pen::Point,
            in_polygon: false,
            radius: 4.5,
            digits: Some(3.0),
            circle: None,
        }
    }
}

impl PathString {
    pub fn new() -> Self {
        PathString::default()
    }

    pub fn digits(&self) -> Option<f64> {
        self.digits
    }

    /// Decimal places kept in the output; `None` disables rounding, as does
    /// anything above 15.
    pub fn set_digits(&mut self, digits: Option<f64>) -> Result<&mut Self, Error> {
        if let Some(d) = digits {
            if !d.is_finite() || d < 0.0 {
                return Err(Error::InvalidDigits(d));
            }
        }
        self.digits = digits.map(f64::floor);
        self.circle = None;
        Ok(self)
    }

    pub fn point_radius(&self) -> f64 {
        self.radius
    }

    pub fn set_point_radius(&mut self, radius: f64) -> &mut Self {
        self.radius = radius;
        self.circle = None;
        self
    }

    /// The path built so far, or `None` if it is empty. The builder is
    /// cleared either way.
    pub fn result(&mut self) -> Option<String> {
        let path = std::mem::take(&mut self.path);
        if path.is_empty() {
            None
        } else {
            Some(path)
        }
    }

    fn number(&self, v: f64) -> String {
        let v = match self.digits {
            Some(d) if d <= 15.0 => {
                let k = 10f64.powi(d as i32);
                (v * k + 0.5).floor() / k
            }
            _ => v,
        };
        // no "-0" in the output
        if v == 0.0 {
            "0".to_owned()
        } else {
            v.to_string()
        }
    }

    fn move_or_line(&mut self, command: char, x: f64, y: f64) {
        let x = self.number(x);
        let y = self.number(y);
        self.path.push(command);
        self.path.push_str(&x);
        self.path.push(',');
        self.path.push_str(&y);
    }

    fn circle(&mut self) -> String {
        if let Some(ref circle) = self.circle {
            return circle.clone();
        }
        let r = self.number(self.radius);
        let circle = format!(
            "m0,{r}a{r},{r} 0 1,1 0,{}a{r},{r} 0 1,1 0,{}z",
            self.number(-2.0 * self.radius),
            self.number(2.0 * self.radius),
            r = r
        );
        self.circle = Some(circle.clone());
        circle
    }
}

impl Stream for PathString {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        match self.pen {
            Pen::LineStart => {
                self.move_or_line('M', x, y);
                self.pen = Pen::Line;
            }
            Pen::Line => self.move_or_line('L', x, y),
            Pen::Point => {
                self.move_or_line('M', x, y);
                let circle = self.circle();
                self.path.push_str(&circle);
            }
        }
    }

    fn line_start(&mut self) {
        self.pen = Pen::LineStart;
    }

    fn line_end(&mut self) {
        if self.in_polygon {
            self.path.push('Z');
        }
        self.pen = Pen::Point;
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
    use super::*;

    #[test]
    fn line_is_move_then_lines() {
        let mut path = PathString::new();
        path.line_start();
        path.point(0.0, 0.0, None);
        path.point(10.0, 5.5, None);
        path.point(20.0, 0.0, None);
        path.line_end();
        assert_eq!(path.result().unwrap(), "M0,0L10,5.5L20,0");
    }

    #[test]
    fn polygon_rings_are_closed() {
        let mut path = PathString::new();
        path.polygon_start();
        path.line_start();
        path.point(0.0, 0.0, None);
        path.point(1.0, 0.0, None);
        path.point(1.0, 1.0, None);
        path.line_end();
        path.polygon_end();
        assert_eq!(path.result().unwrap(), "M0,0L1,0L1,1Z");
    }

    #[test]
    fn points_are_circles() {
        let mut path = PathString::new();
        path.point(10.0, 20.0, None);
        assert_eq!(
            path.result().unwrap(),
            "M10,20m0,4.5a4.5,4.5 0 1,1 0,-9a4.5,4.5 0 1,1 0,9z"
        );
        path.set_point_radius(1.0);
        path.point(0.0, 0.0, None);
        assert_eq!(path.result().unwrap(), "M0,0m0,1a1,1 0 1,1 0,-2a1,1 0 1,1 0,2z");
    }

    #[test]
    fn numbers_are_rounded() {
        let mut path = PathString::new();
        path.line_start();
        path.point(1.23456, -0.0001, None);
        path.point(2.0006, 3.0, None);
        path.line_end();
        assert_eq!(path.result().unwrap(), "M1.235,0L2.001,3");

        path.set_digits(Some(0.0)).unwrap();
        path.line_start();
        path.point(1.5, -1.5, None);
        path.line_end();
        assert_eq!(path.result().unwrap(), "M2,-1");

        path.set_digits(None).unwrap();
        path.line_start();
        path.point(0.125, 0.0, None);
        path.line_end();
        assert_eq!(path.result().unwrap(), "M0.125,0");
    }

    #[test]
    fn invalid_digits_are_rejected() {
        let mut path = PathString::new();
        assert_eq!(
            path.set_digits(Some(-1.0)).map(|_| ()),
            Err(Error::InvalidDigits(-1.0))
        );
        assert!(path.set_digits(Some(f64::INFINITY)).is_err());
        assert_eq!(path.digits(), Some(3.0));
    }

    #[test]
    fn empty_result_is_none_and_result_resets() {
        let mut path = PathString::new();
        assert_eq!(path.result(), None);
        path.point(0.0, 0.0, None);
        assert!(path.result().is_some());
        assert_eq!(path.result(), None);
    }
}
