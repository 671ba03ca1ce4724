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

use crate::math::{asin, round_half_up, PI, TAU};

/// Wrap a longitude into (-π, π].
fn normalize_lambda(lambda: f64) -> f64 {
    if lambda.abs() > PI {
        lambda + round_half_up(-lambda / TAU) * TAU
    } else {
        lambda
    }
}

/// Rotation about the polar axis followed by the φ and γ rotations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhiGamma {
    cos_delta_phi: f64,
    sin_delta_phi: f64,
    cos_delta_gamma: f64,
    sin_delta_gamma: f64,
}

impl PhiGamma {
    fn new(delta_phi: f64, delta_gamma: f64) -> Self {
        PhiGamma {
            cos_delta_phi: delta_phi.cos(),
            sin_delta_phi: delta_phi.sin(),
            cos_delta_gamma: delta_gamma.cos(),
            sin_delta_gamma: delta_gamma.sin(),
        }
    }

    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_phi + x * self.sin_delta_phi;
        [
            (y * self.cos_delta_gamma - k * self.sin_delta_gamma)
                .atan2(x * self.cos_delta_phi - z * self.sin_delta_phi),
            asin(k * self.cos_delta_gamma + y * self.sin_delta_gamma),
        ]
    }

    fn invert(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_gamma - y * self.sin_delta_gamma;
        [
            (y * self.cos_delta_gamma + z * self.sin_delta_gamma)
                .atan2(x * self.cos_delta_phi + k * self.sin_delta_phi),
            asin(k * self.cos_delta_phi - x * self.sin_delta_phi),
        ]
    }
}

/// Spherical rotation in radians, specialised to the cheapest form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotateRadians {
    Identity,
    Lambda(f64),
    PhiGamma(PhiGamma),
    Composed(f64, PhiGamma),
}

impl RotateRadians {
    pub fn new(delta_lambda: f64, delta_phi: f64, delta_gamma: f64) -> Self {
        let delta_lambda = delta_lambda % TAU;
        if delta_lambda != 0.0 {
            if delta_phi != 0.0 || delta_gamma != 0.0 {
                RotateRadians::Composed(delta_lambda, PhiGamma::new(delta_phi, delta_gamma))
            } else {
                RotateRadians::Lambda(delta_lambda)
            }
        } else if delta_phi != 0.0 || delta_gamma != 0.0 {
            RotateRadians::PhiGamma(PhiGamma::new(delta_phi, delta_gamma))
        } else {
            RotateRadians::Identity
        }
    }

    pub fn apply(&self, lambda: f64, phi: f64) -> [f64; 2] {
        match *self {
            RotateRadians::Identity => [normalize_lambda(lambda), phi],
            RotateRadians::Lambda(dl) => [normalize_lambda(lambda + dl), phi],
            RotateRadians::PhiGamma(ref pg) => pg.forward(lambda, phi),
            RotateRadians::Composed(dl, ref pg) => pg.forward(normalize_lambda(lambda + dl), phi),
        }
    }

    pub fn invert(&self, lambda: f64, phi: f64) -> [f64; 2] {
        match *self {
            RotateRadians::Identity => [normalize_lambda(lambda), phi],
            RotateRadians::Lambda(dl) => [normalize_lambda(lambda - dl), phi],
            RotateRadians::PhiGamma(ref pg) => pg.invert(lambda, phi),
            RotateRadians::Composed(dl, ref pg) => {
                let [lambda, phi] = pg.invert(lambda, phi);
                [normalize_lambda(lambda - dl), phi]
            }
        }
    }
}

/// Rotation by `[λ, φ, γ]` in degrees, applied to degree coordinates.
///
/// ```
/// use geostream::Rotation;
///
/// let r = Rotation::new([90.0, 0.0, 0.0]);
/// let [lambda, phi] = r.apply([150.0, 0.0]);
/// assert!((lambda + 120.0).abs() < 1e-9 && phi.abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    rotate: RotateRadians,
}

impl Rotation {
    pub fn new(angles: [f64; 3]) -> Self {
        Rotation {
            rotate: RotateRadians::new(
                angles[0].to_radians(),
                angles[1].to_radians(),
                angles[2].to_radians(),
            ),
        }
    }

    pub fn apply(&self, point: [f64; 2]) -> [f64; 2] {
        let [lambda, phi] = self
            .rotate
            .apply(point[0].to_radians(), point[1].to_radians());
        [lambda.to_degrees(), phi.to_degrees()]
    }

    pub fn invert(&self, point: [f64; 2]) -> [f64; 2] {
        let [lambda, phi] = self
            .rotate
            .invert(point[0].to_radians(), point[1].to_radians());
        [lambda.to_degrees(), phi.to_degrees()]
    }
}
