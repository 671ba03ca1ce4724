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

//! Cylindrical and pseudo-cylindrical raw projections.

use std::rc::Rc;

use crate::math::{asin, EPSILON, EPSILON2, HALF_PI, TAU};
use crate::projection::{Projection, ProjectionKind, RawProjection};

/// Plate carrée.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Equirectangular;

impl RawProjection for Equirectangular {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        [lambda, phi]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        Some([x, y])
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mercator;

impl RawProjection for Mercator {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        [lambda, ((HALF_PI + phi) / 2.0).tan().ln()]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        Some([x, 2.0 * y.exp().atan() - HALF_PI])
    }
}

/// Mercator on its side: the tangent meridian runs along the x axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransverseMercator;

impl RawProjection for TransverseMercator {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        [((HALF_PI + phi) / 2.0).tan().ln(), -lambda]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        Some([-y, 2.0 * x.exp().atan() - HALF_PI])
    }
}

/// Lambert cylindrical equal-area, true to scale at ±`phi0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylindricalEqualArea {
    cos_phi0: f64,
}

impl CylindricalEqualArea {
    pub fn new(phi0: f64) -> Self {
        CylindricalEqualArea {
            cos_phi0: phi0.cos(),
        }
    }
}

impl RawProjection for CylindricalEqualArea {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        [lambda * self.cos_phi0, phi.sin() / self.cos_phi0]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        Some([x / self.cos_phi0, asin(y * self.cos_phi0)])
    }
}

const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;
const M: f64 = 0.866_025_403_784_438_6;

/// Šavrič, Patterson and Jenny's Equal Earth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EqualEarth;

impl RawProjection for EqualEarth {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let l = asin(M * phi.sin());
        let l2 = l * l;
        let l6 = l2 * l2 * l2;
        [
            lambda * l.cos() / (M * (A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2))),
            l * (A1 + A2 * l2 + l6 * (A3 + A4 * l2)),
        ]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        let mut l = y;
        let mut l2 = l * l;
        let mut l6 = l2 * l2 * l2;
        // Newton's method on the latitude polynomial
        for _ in 0..12 {
            let fy = l * (A1 + A2 * l2 + l6 * (A3 + A4 * l2)) - y;
            let fpy = A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2);
            let delta = fy / fpy;
            l -= delta;
            l2 = l * l;
            l6 = l2 * l2 * l2;
            if delta.abs() < EPSILON2 {
                break;
            }
        }
        Some([
            M * x * (A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2)) / l.cos(),
            asin(l.sin() / M),
        ])
    }
}

/// Natural Earth I, a polynomial pseudo-cylindrical projection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NaturalEarth1;

impl RawProjection for NaturalEarth1 {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let phi2 = phi * phi;
        let phi4 = phi2 * phi2;
        [
            lambda
                * (0.8707 - 0.131979 * phi2
                    + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4))),
            phi * (1.007226
                + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4))),
        ]
    }

    fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        let mut phi = y;
        for _ in 0..25 {
            let phi2 = phi * phi;
            let phi4 = phi2 * phi2;
            let delta = (phi
                * (1.007226
                    + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)))
                - y)
                / (1.007226
                    + phi2
                        * (0.015085 * 3.0
                            + phi4
                                * (-0.044475 * 7.0 + 0.028874 * 9.0 * phi2
                                    - 0.005916 * 11.0 * phi4)));
            phi -= delta;
            if delta.abs() <= EPSILON {
                break;
            }
        }
        let phi2 = phi * phi;
        Some([
            x / (0.8707
                + phi2
                    * (-0.131979
                        + phi2 * (-0.013791 + phi2 * phi2 * phi2 * (0.003971 - 0.001529 * phi2)))),
            phi,
        ])
    }
}

impl Projection {
    /// Plate carrée, scale 152.63.
    pub fn equirectangular() -> Self {
        let mut projection =
            Projection::with_kind("equirectangular", ProjectionKind::Standard, Rc::new(Equirectangular));
        projection.set_scale(152.63);
        projection
    }

    /// Web Mercator style: the clip extent follows the scale so the square
    /// world map is never drawn past ±π·scale.
    pub fn mercator() -> Self {
        let mut projection = Projection::with_kind(
            "mercator",
            ProjectionKind::Mercator { extent: None },
            Rc::new(Mercator),
        );
        projection.set_scale(961.0 / TAU);
        projection
    }

    /// Transverse Mercator. Center and rotation are expressed as for a
    /// regular Mercator; the extra quarter turn is applied internally.
    pub fn transverse_mercator() -> Self {
        let mut projection = Projection::with_kind(
            "transverse mercator",
            ProjectionKind::TransverseMercator { extent: None },
            Rc::new(TransverseMercator),
        );
        projection.set_rotate([0.0, 0.0, 0.0]).set_scale(159.155);
        projection
    }

    pub fn equal_earth() -> Self {
        let mut projection =
            Projection::with_kind("equal earth", ProjectionKind::Standard, Rc::new(EqualEarth));
        projection.set_scale(177.158);
        projection
    }

    pub fn natural_earth1() -> Self {
        let mut projection = Projection::with_kind(
            "natural earth",
            ProjectionKind::Standard,
            Rc::new(NaturalEarth1),
        );
        projection.set_scale(175.295);
        projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn round_trip(raw: &dyn RawProjection, lambda: f64, phi: f64) {
        let [x, y] = raw.forward(lambda, phi);
        let [l, p] = raw.invert(x, y).unwrap();
        assert_abs_diff_eq!(l, lambda, epsilon = 1e-6);
        assert_abs_diff_eq!(p, phi, epsilon = 1e-6);
    }

    #[test]
    fn raw_projections_invert() {
        for (lambda, phi) in [(0.0, 0.0), (1.0, 0.5), (-2.5, -1.2), (3.0, 1.4)] {
            round_trip(&Equirectangular, lambda, phi);
            round_trip(&Mercator, lambda, phi);
            round_trip(&TransverseMercator, lambda, phi);
            round_trip(&CylindricalEqualArea::new(0.5), lambda, phi);
            round_trip(&EqualEarth, lambda, phi);
            round_trip(&NaturalEarth1, lambda, phi);
        }
    }

    #[test]
    fn mercator_equator_is_flat() {
        assert_abs_diff_eq!(Mercator.forward(1.0, 0.0)[1], 0.0, epsilon = 1e-12);
        assert!(Mercator.forward(0.0, 1.0)[1] > 1.0);
    }

    #[test]
    fn mercator_clip_extent_tracks_scale() {
        let mut projection = Projection::mercator();
        projection.set_scale(100.0).set_translate([0.0, 0.0]);
        assert_eq!(projection.clip_extent(), None);
        // beyond ±π·scale in y is clipped
        assert!(projection.project([0.0, 80.0]).is_some());
        assert!(projection.project([0.0, 89.0]).is_none());
    }

    #[test]
    fn mercator_user_extent_limits_x_only() {
        let mut projection = Projection::mercator();
        projection
            .set_scale(100.0)
            .set_translate([0.0, 0.0])
            .set_clip_extent(Some([[-1000.0, -50.0], [1000.0, 50.0]]));
        assert_eq!(
            projection.clip_extent(),
            Some([[-1000.0, -50.0], [1000.0, 50.0]])
        );
        assert!(projection.project([0.0, 10.0]).is_some());
        assert!(projection.project([0.0, 40.0]).is_none());
        assert!(projection.project([179.0, 0.0]).is_some());
    }

    #[test]
    fn transverse_mercator_hides_its_quarter_turn() {
        let mut projection = Projection::transverse_mercator();
        for (angle, expected) in projection.rotate().iter().zip([0.0, 0.0, 0.0]) {
            assert_abs_diff_eq!(*angle, expected, epsilon = 1e-9);
        }
        projection.set_center([0.0, 20.0]);
        assert_abs_diff_eq!(projection.center()[0], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(projection.center()[1], 20.0, epsilon = 1e-9);
        let p = projection.project([0.0, 20.0]).unwrap();
        assert_abs_diff_eq!(p[0], 480.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[1], 250.0, epsilon = 1e-6);
    }
}
