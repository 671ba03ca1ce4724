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
use crate::Extent;

/// Planar bounding box of every point it receives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathBounds {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Default for PathBounds {
    fn default() -> Self {
        PathBounds {
            x0: f64::INFINITY,
            y0: f64::INFINITY,
            x1: f64::NEG_INFINITY,
            y1: f64::NEG_INFINITY,
        }
    }
}

impl PathBounds {
    pub fn new() -> Self {
        PathBounds::default()
    }

    /// The box `[[x0, y0], [x1, y1]]` so far, resetting the accumulator.
    /// Infinite (with `x0 > x1`) when no point was received.
    pub fn result(&mut self) -> Extent {
        let bounds = [[self.x0, self.y0], [self.x1, self.y1]];
        *self = PathBounds::default();
        bounds
    }
}

impl Stream for PathBounds {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x);
        self.y1 = self.y1.max(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_every_point() {
        let mut bounds = PathBounds::new();
        bounds.line_start();
        bounds.point(1.0, 5.0, None);
        bounds.point(-2.0, 3.0, Some(9.0));
        bounds.line_end();
        bounds.point(4.0, -1.0, None);
        assert_eq!(bounds.result(), [[-2.0, -1.0], [4.0, 5.0]]);
    }

    #[test]
    fn result_resets() {
        let mut bounds = PathBounds::new();
        bounds.point(1.0, 1.0, None);
        bounds.result();
        assert_eq!(bounds, PathBounds::default());
        let [[x0, _], [x1, _]] = bounds.result();
        assert!(x0 > x1);
    }
}
