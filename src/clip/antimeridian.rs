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

use crate::clip::{Clip, ClipBoundary, ClipLine, StreamTransform};
use crate::math::{EPSILON, HALF_PI, PI};
use crate::stream::Stream;

/// Cuts lines and polygons along the antimeridian (λ = ±π), so that
/// nothing wraps across the seam of a cylindrical projection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClipAntimeridian;

impl StreamTransform for ClipAntimeridian {
    fn transform<'a>(&self, sink: Box<dyn Stream + 'a>) -> Box<dyn Stream + 'a> {
        Box::new(Clip::new(*self, sink))
    }
}

impl ClipBoundary for ClipAntimeridian {
    type Line = AntimeridianLine;

    fn visible(&self, _lambda: f64, _phi: f64) -> bool {
        true
    }

    fn line(&self) -> AntimeridianLine {
        AntimeridianLine {
            lambda0: f64::NAN,
            phi0: f64::NAN,
            sign0: f64::NAN,
            clean: 1,
        }
    }

    fn interpolate(
        &self,
        from: Option<[f64; 2]>,
        to: Option<[f64; 2]>,
        direction: f64,
        sink: &mut dyn Stream,
    ) {
        match (from, to) {
            (Some(from), Some(to)) => {
                if (from[0] - to[0]).abs() > EPSILON {
                    let lambda = if from[0] < to[0] { PI } else { -PI };
                    let phi = direction * lambda / 2.0;
                    sink.point(-lambda, phi, None);
                    sink.point(0.0, phi, None);
                    sink.point(lambda, phi, None);
                } else {
                    sink.point(to[0], to[1], None);
                }
            }
            _ => {
                let phi = direction * HALF_PI;
                sink.point(-PI, phi, None);
                sink.point(0.0, phi, None);
                sink.point(PI, phi, None);
                sink.point(PI, 0.0, None);
                sink.point(PI, -phi, None);
                sink.point(0.0, -phi, None);
                sink.point(-PI, -phi, None);
                sink.point(-PI, 0.0, None);
                sink.point(-PI, phi, None);
            }
        }
    }

    fn start(&self) -> [f64; 2] {
        [-PI, -HALF_PI]
    }
}

pub struct AntimeridianLine {
    lambda0: f64,
    phi0: f64,
    sign0: f64,
    clean: u8,
}

/// Latitude at which the great arc between two points meets the
/// antimeridian.
fn intersect(lambda0: f64, phi0: f64, lambda1: f64, phi1: f64) -> f64 {
    let sin_lambda0_lambda1 = (lambda0 - lambda1).sin();
    if sin_lambda0_lambda1.abs() > EPSILON {
        let cos_phi0 = phi0.cos();
        let cos_phi1 = phi1.cos();
        ((phi0.sin() * cos_phi1 * lambda1.sin() - phi1.sin() * cos_phi0 * lambda0.sin())
            / (cos_phi0 * cos_phi1 * sin_lambda0_lambda1))
            .atan()
    } else {
        (phi0 + phi1) / 2.0
    }
}

impl ClipLine for AntimeridianLine {
    fn line_start(&mut self, sink: &mut dyn Stream) {
        sink.line_start();
        self.clean = 1;
    }

    fn point(&mut self, lambda: f64, phi: f64, sink: &mut dyn Stream) {
        let mut lambda1 = lambda;
        let phi1 = phi;
        let sign1 = if lambda1 > 0.0 { PI } else { -PI };
        let delta = (lambda1 - self.lambda0).abs();

        if (delta - PI).abs() < EPSILON {
            // crosses a pole
            self.phi0 = if (self.phi0 + phi1) / 2.0 > 0.0 {
                HALF_PI
            } else {
                -HALF_PI
            };
            sink.point(self.lambda0, self.phi0, None);
            sink.point(self.sign0, self.phi0, None);
            sink.line_end();
            sink.line_start();
            sink.point(sign1, self.phi0, None);
            sink.point(lambda1, self.phi0, None);
            self.clean = 0;
        } else if self.sign0 != sign1 && delta >= PI {
            // crosses the antimeridian
            if (self.lambda0 - self.sign0).abs() < EPSILON {
                self.lambda0 -= self.sign0 * EPSILON;
            }
            if (lambda1 - sign1).abs() < EPSILON {
                lambda1 -= sign1 * EPSILON;
            }
            self.phi0 = intersect(self.lambda0, self.phi0, lambda1, phi1);
            sink.point(self.sign0, self.phi0, None);
            sink.line_end();
            sink.line_start();
            sink.point(sign1, self.phi0, None);
            self.clean = 0;
        }
        self.lambda0 = lambda1;
        self.phi0 = phi1;
        sink.point(self.lambda0, self.phi0, None);
        self.sign0 = sign1;
    }

    fn line_end(&mut self, sink: &mut dyn Stream) {
        sink.line_end();
        self.lambda0 = f64::NAN;
        self.phi0 = f64::NAN;
    }

    fn clean(&self) -> u8 {
        2 - self.clean
    }
}
