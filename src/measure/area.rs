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

use crate::math::{Adder, QUARTER_PI, TAU};
use crate::stream::Stream;

/// Spherical area of every polygon it receives, in steradians.
///
/// Points and lines contribute nothing. Each polygon adds the area it
/// encloses on its left, so a ring wound the "wrong" way counts as the
/// complement of the small one.
#[derive(Clone, Debug, Default)]
pub struct AreaStream {
    sum: Adder,
    ring_sum: Adder,
    in_polygon: bool,
    in_ring: bool,
    /// First point of the current ring, in degrees.
    first: Option<[f64; 2]>,
    lambda0: f64,
    cos_phi0: f64,
    sin_phi0: f64,
}

impl AreaStream {
    pub fn new() -> Self {
        AreaStream::default()
    }

    /// Total area so far; the accumulator is reset.
    pub fn result(&mut self) -> f64 {
        let area = self.sum.value() * 2.0;
        *self = AreaStream::default();
        area
    }

    /// Signed sum of the last polygon's rings, before the complement is
    /// taken. Negative when the polygon winds around more than a hemisphere.
    pub(crate) fn ring_sum(&self) -> f64 {
        self.ring_sum.value()
    }

    fn ring_point(&mut self, lambda: f64, phi: f64) {
        let lambda = lambda.to_radians();
        // half-angle from the south pole
        let phi = phi.to_radians() / 2.0 + QUARTER_PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        if self.first.is_some() {
            let d_lambda = lambda - self.lambda0;
            let sd_lambda = if d_lambda >= 0.0 { 1.0 } else { -1.0 };
            let ad_lambda = sd_lambda * d_lambda;
            let k = self.sin_phi0 * sin_phi;
            let u = self.cos_phi0 * cos_phi + k * ad_lambda.cos();
            let v = k * sd_lambda * ad_lambda.sin();
            self.ring_sum.add(v.atan2(u));
        }
        self.lambda0 = lambda;
        self.cos_phi0 = cos_phi;
        self.sin_phi0 = sin_phi;
    }
}

impl Stream for AreaStream {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        if !self.in_ring {
            return;
        }
        self.ring_point(x, y);
        if self.first.is_none() {
            self.first = Some([x, y]);
        }
    }

    fn line_start(&mut self) {
        if self.in_polygon {
            self.in_ring = true;
            self.first = None;
        }
    }

    fn line_end(&mut self) {
        if self.in_ring {
            if let Some([x, y]) = self.first {
                self.ring_point(x, y);
            }
            self.in_ring = false;
        }
    }

    fn polygon_start(&mut self) {
        self.ring_sum = Adder::new();
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        let ring = self.ring_sum.value();
        self.sum.add(if ring < 0.0 { TAU + ring } else { ring });
        self.in_polygon = false;
        self.in_ring = false;
    }

    fn sphere(&mut self) {
        self.sum.add(TAU);
    }
}
