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

/// Great-arc length of every line it receives, in radians.
///
/// Rings are not closed: the arc from the last point back to the first is
/// not counted, because streamed rings omit their closing coordinate.
/// Bare points contribute nothing.
#[derive(Clone, Debug, Default)]
pub struct LengthStream {
    sum: Adder,
    in_line: bool,
    /// Previous point as (λ, sin φ, cos φ), radians.
    previous: Option<(f64, f64, f64)>,
}

impl LengthStream {
    pub fn new() -> Self {
        LengthStream::default()
    }

    /// Total length so far; the accumulator is reset.
    pub fn result(&mut self) -> f64 {
        let length = self.sum.value();
        *self = LengthStream::default();
        length
    }
}

impl Stream for LengthStream {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        if !self.in_line {
            return;
        }
        let lambda = x.to_radians();
        let (sin_phi, cos_phi) = y.to_radians().sin_cos();
        if let Some((lambda0, sin_phi0, cos_phi0)) = self.previous {
            self.sum
                .add(arc(lambda0, sin_phi0, cos_phi0, lambda, sin_phi, cos_phi));
        }
        self.previous = Some((lambda, sin_phi, cos_phi));
    }

    fn line_start(&mut self) {
        self.in_line = true;
        self.previous = None;
    }

    fn line_end(&mut self) {
        self.in_line = false;
        self.previous = None;
    }
}

/// Angle between two points, stable for tiny and near-antipodal arcs.
fn arc(lambda0: f64, sin_phi0: f64, cos_phi0: f64, lambda: f64, sin_phi: f64, cos_phi: f64) -> f64 {
    let delta = (lambda - lambda0).abs();
    let (sin_delta, cos_delta) = delta.sin_cos();
    let x = cos_phi * sin_delta;
    let y = cos_phi0 * sin_phi - sin_phi0 * cos_phi * cos_delta;
    let z = sin_phi0 * sin_phi + cos_phi0 * cos_phi * cos_delta;
    (x * x + y * y).sqrt().atan2(z)
}

/// Great-arc distance in radians between two `[longitude, latitude]`
/// points given in degrees.
///
/// ```
/// use geostream::distance;
///
/// let d = distance([0.0, 0.0], [90.0, 0.0]);
/// assert!((d - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let (sin_phi0, cos_phi0) = a[1].to_radians().sin_cos();
    let (sin_phi, cos_phi) = b[1].to_radians().sin_cos();
    arc(
        a[0].to_radians(),
        sin_phi0,
        cos_phi0,
        b[0].to_radians(),
        sin_phi,
        cos_phi,
    )
}
