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

use std::rc::Rc;

use crate::math::{acos, asin, EPSILON};
use crate::projection::{Projection, ProjectionKind, RawProjection};

/// Azimuthal raw projections. Each maps the angular distance `c` from the
/// center to a planar radius; the direction is preserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Azimuthal {
    Orthographic,
    Stereographic,
    Gnomonic,
    EqualArea,
    Equidistant,
}

impl Azimuthal {
    /// Radial scale factor for `cxcy = cos c`.
    fn scale(&self, cxcy: f64) -> f64 {
        match self {
            Azimuthal::Orthographic => 1.0,
            Azimuthal::Stereographic => 1.0 / (1.0 + cxcy),
            Azimuthal::Gnomonic => 1.0 / cxcy,
            Azimuthal::EqualArea => (2.0 / (1.0 + cxcy)).sqrt(),
            Azimuthal::Equidistant => {
                let c = acos(cxcy);
                if c == 0.0 {
                    c
                } else {
                    c / c.sin()
                }
            }
        }
    }

    /// Angular distance for planar radius `z`.
    fn angle(&self, z: f64) -> f64 {
        match self {
            Azimuthal::Orthographic => asin(z),
            Azimuthal::Stereographic => 2.0 * z.atan(),
            Azimuthal::Gnomonic => z.atan(),
            Azimuthal::EqualArea => 2.0 * asin(z / 2.0),
            Azimuthal::Equidistant => z,
        }
    }
}

impl RawProjection for Azimuthal {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let cx = lambda.cos();
        let cy = phi.cos();
        let k = self.scale(cx * cy);
        if k == f64::INFINITY {
            return [2.0, 0.0];
        }
        [k * cy * lambda.sin(), k * phi.sin()]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        let z = (x * x + y * y).sqrt();
        let c = self.angle(z);
        let (sc, cc) = c.sin_cos();
        let phi = if z == 0.0 { 0.0 } else { asin(y * sc / z) };
        Some([(x * sc).atan2(z * cc), phi])
    }
}

impl Projection {
    fn azimuthal(name: &'static str, raw: Azimuthal, scale: f64, clip_angle: f64) -> Self {
        let mut projection = Projection::with_kind(name, ProjectionKind::Standard, Rc::new(raw));
        projection
            .set_scale(scale)
            .set_clip_angle(Some(clip_angle));
        projection
    }

    /// The visible hemisphere, as seen from infinitely far away.
    pub fn orthographic() -> Self {
        Projection::azimuthal(
            "orthographic",
            Azimuthal::Orthographic,
            249.5,
            90.0 + EPSILON,
        )
    }

    pub fn stereographic() -> Self {
        Projection::azimuthal("stereographic", Azimuthal::Stereographic, 250.0, 142.0)
    }

    pub fn gnomonic() -> Self {
        Projection::azimuthal("gnomonic", Azimuthal::Gnomonic, 144.049, 60.0)
    }

    pub fn azimuthal_equal_area() -> Self {
        Projection::azimuthal(
            "azimuthal equal-area",
            Azimuthal::EqualArea,
            124.75,
            180.0 - 1e-3,
        )
    }

    pub fn azimuthal_equidistant() -> Self {
        Projection::azimuthal(
            "azimuthal equidistant",
            Azimuthal::Equidistant,
            79.4188,
            180.0 - 1e-3,
        )
    }
}
