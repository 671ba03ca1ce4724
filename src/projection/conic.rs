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

//! Conic raw projections, parameterised by two standard parallels.

use std::rc::Rc;

use crate::error::Error;
use crate::math::{asin, sign, EPSILON, HALF_PI, PI};
use crate::projection::cylindrical::{CylindricalEqualArea, Equirectangular, Mercator};
use crate::projection::{Projection, ProjectionKind, RawProjection};

/// The three conic families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConicFamily {
    Conformal,
    EqualArea,
    Equidistant,
}

impl ConicFamily {
    /// The raw projection for standard parallels `phi0` and `phi1`
    /// (radians). When the cone degenerates into a cylinder the matching
    /// cylindrical projection is returned instead.
    pub fn raw(&self, phi0: f64, phi1: f64) -> Rc<dyn RawProjection> {
        match self {
            ConicFamily::Conformal => match ConicConformal::new(phi0, phi1) {
                Some(raw) => Rc::new(raw),
                None => Rc::new(Mercator),
            },
            ConicFamily::EqualArea => match ConicEqualArea::new(phi0, phi1) {
                Some(raw) => Rc::new(raw),
                None => Rc::new(CylindricalEqualArea::new(phi0)),
            },
            ConicFamily::Equidistant => match ConicEquidistant::new(phi0, phi1) {
                Some(raw) => Rc::new(raw),
                None => Rc::new(Equirectangular),
            },
        }
    }
}

/// Angle around the apex for a planar point, relative to the apex offset
/// `dy`, unwrapped for cones opening the other way.
fn apex_angle(x: f64, dy: f64, n: f64) -> f64 {
    let mut l = x.atan2(dy.abs()) * sign(dy);
    if dy * n < 0.0 {
        l -= PI * sign(x) * sign(dy);
    }
    l / n
}

fn tany(y: f64) -> f64 {
    ((HALF_PI + y) / 2.0).tan()
}

/// Lambert conformal conic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConicConformal {
    n: f64,
    f: f64,
}

impl ConicConformal {
    /// `None` when the parallels give a flat cone (n = 0).
    pub fn new(phi0: f64, phi1: f64) -> Option<Self> {
        let cy0 = phi0.cos();
        let n = if phi0 == phi1 {
            phi0.sin()
        } else {
            (cy0 / phi1.cos()).ln() / (tany(phi1) / tany(phi0)).ln()
        };
        if n == 0.0 || n.is_nan() {
            return None;
        }
        let f = cy0 * tany(phi0).powf(n) / n;
        Some(ConicConformal { n, f })
    }
}

impl RawProjection for ConicConformal {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        // the pole on the apex side maps to the apex, the other to infinity
        let phi = if self.f > 0.0 {
            phi.max(-HALF_PI + EPSILON)
        } else {
            phi.min(HALF_PI - EPSILON)
        };
        let r = self.f / tany(phi).powf(self.n);
        let (s, c) = (self.n * lambda).sin_cos();
        [r * s, self.f - r * c]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        let fy = self.f - y;
        let r = sign(self.n) * (x * x + fy * fy).sqrt();
        Some([
            apex_angle(x, fy, self.n),
            2.0 * (self.f / r).powf(1.0 / self.n).atan() - HALF_PI,
        ])
    }
}

/// Albers conic equal-area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
}

impl ConicEqualArea {
    /// `None` when the parallels are symmetric about the equator.
    pub fn new(phi0: f64, phi1: f64) -> Option<Self> {
        let sy0 = phi0.sin();
        let n = (sy0 + phi1.sin()) / 2.0;
        if n.abs() < EPSILON {
            return None;
        }
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        Some(ConicEqualArea {
            n,
            c,
            r0: c.sqrt() / n,
        })
    }
}

impl RawProjection for ConicEqualArea {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let r = (self.c - 2.0 * self.n * phi.sin()).sqrt() / self.n;
        let (s, c) = (lambda * self.n).sin_cos();
        [r * s, self.r0 - r * c]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        let r0y = self.r0 - y;
        let n = self.n;
        Some([
            apex_angle(x, r0y, n),
            asin((self.c - (x * x + r0y * r0y) * n * n) / (2.0 * n)),
        ])
    }
}

/// Equidistant conic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConicEquidistant {
    n: f64,
    g: f64,
}

impl ConicEquidistant {
    /// `None` when the parallels give a flat cone.
    pub fn new(phi0: f64, phi1: f64) -> Option<Self> {
        let cy0 = phi0.cos();
        let n = if phi0 == phi1 {
            phi0.sin()
        } else {
            (cy0 - phi1.cos()) / (phi1 - phi0)
        };
        if n.abs() < EPSILON {
            return None;
        }
        Some(ConicEquidistant {
            n,
            g: cy0 / n + phi0,
        })
    }
}

impl RawProjection for ConicEquidistant {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let gy = self.g - phi;
        let (s, c) = (self.n * lambda).sin_cos();
        [gy * s, self.g - gy * c]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        let gy = self.g - y;
        Some([
            apex_angle(x, gy, self.n),
            self.g - sign(self.n) * (x * x + gy * gy).sqrt(),
        ])
    }
}

impl Projection {
    /// A conic projection with the default parallels, 0° and 60°.
    pub fn conic(family: ConicFamily) -> Self {
        let parallels = [0.0, PI / 3.0];
        let name = match family {
            ConicFamily::Conformal => "conic conformal",
            ConicFamily::EqualArea => "conic equal-area",
            ConicFamily::Equidistant => "conic equidistant",
        };
        Projection::with_kind(
            name,
            ProjectionKind::Conic { family, parallels },
            family.raw(parallels[0], parallels[1]),
        )
    }

    pub fn conic_conformal() -> Self {
        let mut projection = Projection::conic(ConicFamily::Conformal);
        projection.set_conic_parallels([30.0, 30.0]).set_scale(109.5);
        projection
    }

    pub fn conic_equal_area() -> Self {
        let mut projection = Projection::conic(ConicFamily::EqualArea);
        projection.set_scale(155.424).set_center([0.0, 33.6442]);
        projection
    }

    pub fn conic_equidistant() -> Self {
        let mut projection = Projection::conic(ConicFamily::Equidistant);
        projection.set_scale(131.154).set_center([0.0, 13.9389]);
        projection
    }

    /// The conic equal-area projection centred on the lower 48 United
    /// States.
    pub fn albers() -> Self {
        let mut projection = Projection::conic_equal_area();
        projection
            .set_conic_parallels([29.5, 45.5])
            .set_scale(1070.0)
            .set_translate([480.0, 250.0])
            .set_rotate([96.0, 0.0, 0.0])
            .set_center([-0.6, 38.7]);
        projection.name = "albers";
        projection
    }

    /// Standard parallels in degrees, for conic projections.
    pub fn parallels(&self) -> Option<[f64; 2]> {
        match self.kind {
            ProjectionKind::Conic { parallels, .. } => {
                Some([parallels[0].to_degrees(), parallels[1].to_degrees()])
            }
            _ => None,
        }
    }

    /// Set the standard parallels (degrees) of a conic projection.
    pub fn set_parallels(&mut self, parallels: [f64; 2]) -> Result<&mut Self, Error> {
        match self.kind {
            ProjectionKind::Conic { .. } => Ok(self.set_conic_parallels(parallels)),
            _ => Err(Error::unsupported(self.name, "parallels")),
        }
    }

    pub(crate) fn set_conic_parallels(&mut self, parallels: [f64; 2]) -> &mut Self {
        if let ProjectionKind::Conic { family, .. } = self.kind {
            let parallels = [parallels[0].to_radians(), parallels[1].to_radians()];
            self.kind = ProjectionKind::Conic { family, parallels };
            self.set_raw(family.raw(parallels[0], parallels[1]));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const PARALLELS: [[f64; 2]; 4] = [[30.0, 30.0], [20.0, 50.0], [-40.0, -10.0], [10.0, 80.0]];

    fn round_trip(raw: &dyn RawProjection) {
        for (lambda, phi) in [(0.0, 0.0), (0.5, 0.7), (-1.2, -0.4), (2.0, 1.0)] {
            let [x, y] = raw.forward(lambda, phi);
            let [l, p] = raw.invert(x, y).unwrap();
            assert_abs_diff_eq!(l, lambda, epsilon = 1e-9);
            assert_abs_diff_eq!(p, phi, epsilon = 1e-9);
        }
    }

    #[test]
    fn conics_invert_for_several_parallels() {
        for [a, b] in PARALLELS {
            let (a, b) = (a.to_radians(), b.to_radians());
            for family in [
                ConicFamily::Conformal,
                ConicFamily::EqualArea,
                ConicFamily::Equidistant,
            ] {
                round_trip(family.raw(a, b).as_ref());
            }
        }
    }

    #[test]
    fn flat_cones_fall_back_to_cylinders() {
        assert!(ConicConformal::new(0.0, 0.0).is_none());
        assert!(ConicEqualArea::new(-0.5, 0.5).is_none());
        assert!(ConicEquidistant::new(0.0, 0.0).is_none());
        // the fallback still projects
        let raw = ConicFamily::EqualArea.raw(-0.5, 0.5);
        round_trip(raw.as_ref());
    }

    #[test]
    fn parallels_are_only_for_conics() {
        let mut projection = Projection::conic_equal_area();
        projection.set_parallels([10.0, 20.0]).unwrap();
        let [a, b] = projection.parallels().unwrap();
        assert_abs_diff_eq!(a, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b, 20.0, epsilon = 1e-9);

        let mut projection = Projection::mercator();
        assert_eq!(projection.parallels(), None);
        assert_eq!(
            projection.set_parallels([10.0, 20.0]).map(|_| ()),
            Err(Error::unsupported("mercator", "parallels"))
        );
    }

    #[test]
    fn albers_centers_the_united_states() {
        let projection = Projection::albers();
        let [x, y] = projection.project([-96.6, 38.7]).unwrap();
        assert_abs_diff_eq!(x, 480.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y, 250.0, epsilon = 1e-6);
        let [l, p] = projection.invert([480.0, 250.0]).unwrap();
        assert_abs_diff_eq!(l, -96.6, epsilon = 1e-6);
        assert_abs_diff_eq!(p, 38.7, epsilon = 1e-6);
    }
}
