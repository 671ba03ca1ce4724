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

use crate::Extent;

/// Clip the segment `a`–`b` to a rectangle (Liang–Barsky).
///
/// Returns the visible part, or `None` when the segment misses the
/// rectangle entirely.
pub fn clip_line(a: [f64; 2], b: [f64; 2], extent: &Extent) -> Option<([f64; 2], [f64; 2])> {
    let [[x0, y0], [x1, y1]] = *extent;
    let [ax, ay] = a;
    let [bx, by] = b;
    let dx = bx - ax;
    let dy = by - ay;
    let mut t0 = 0.0;
    let mut t1 = 1.0;

    // Each boundary as (distance from a, direction, entering when positive).
    for (r, d, lower) in [(x0 - ax, dx, true), (x1 - ax, dx, false), (y0 - ay, dy, true), (y1 - ay, dy, false)] {
        if d == 0.0 {
            if (lower && r > 0.0) || (!lower && r < 0.0) {
                return None;
            }
            continue;
        }
        let r = r / d;
        if lower == (d < 0.0) {
            // leaving through this boundary
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        } else {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        }
    }

    let a = if t0 > 0.0 {
        [ax + t0 * dx, ay + t0 * dy]
    } else {
        a
    };
    let b = if t1 < 1.0 {
        [ax + t1 * dx, ay + t1 * dy]
    } else {
        b
    };
    Some((a, b))
}
