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

use crate::math::{
    asin, cartesian, cartesian_cross, cartesian_normalize, sign, Adder, EPSILON, EPSILON2,
    HALF_PI, PI, QUARTER_PI, TAU,
};

fn longitude(lambda: f64) -> f64 {
    if lambda.abs() <= PI {
        lambda
    } else {
        sign(lambda) * ((lambda.abs() + PI) % TAU - PI)
    }
}

/// Whether a spherical polygon (rings in radians, not closed) contains a
/// point.
///
/// Combines the signed area of the rings with the parity of crossings of
/// the meridian through the point. A point lying exactly on a crossing arc
/// counts as inside unless the arc is polar.
pub fn polygon_contains(polygon: &[Vec<[f64; 2]>], point: [f64; 2]) -> bool {
    let lambda = longitude(point[0]);
    let mut phi = point[1];
    let sin_phi = phi.sin();
    let normal = [lambda.sin(), -lambda.cos(), 0.0];
    let mut angle = 0.0;
    let mut winding: i32 = 0;
    let mut sum = Adder::new();

    if sin_phi == 1.0 {
        phi = HALF_PI + EPSILON;
    } else if sin_phi == -1.0 {
        phi = -HALF_PI - EPSILON;
    }

    for ring in polygon {
        let point0 = match ring.last() {
            Some(p) => *p,
            None => continue,
        };
        let mut point0 = point0;
        let mut lambda0 = longitude(point0[0]);
        let phi0 = point0[1] / 2.0 + QUARTER_PI;
        let mut sin_phi0 = phi0.sin();
        let mut cos_phi0 = phi0.cos();

        for &point1 in ring {
            let lambda1 = longitude(point1[0]);
            let phi1 = point1[1] / 2.0 + QUARTER_PI;
            let sin_phi1 = phi1.sin();
            let cos_phi1 = phi1.cos();
            let delta = lambda1 - lambda0;
            let sign_delta = if delta >= 0.0 { 1.0 } else { -1.0 };
            let abs_delta = sign_delta * delta;
            let antimeridian = abs_delta > PI;
            let k = sin_phi0 * sin_phi1;

            sum.add(
                (k * sign_delta * abs_delta.sin())
                    .atan2(cos_phi0 * cos_phi1 + k * abs_delta.cos()),
            );
            angle += if antimeridian {
                delta + sign_delta * TAU
            } else {
                delta
            };

            if antimeridian ^ (lambda0 >= lambda) ^ (lambda1 >= lambda) {
                let arc = cartesian_normalize(cartesian_cross(
                    cartesian(point0[0], point0[1]),
                    cartesian(point1[0], point1[1]),
                ));
                let intersection = cartesian_normalize(cartesian_cross(normal, arc));
                let forward = antimeridian ^ (delta >= 0.0);
                let phi_arc = if forward { -1.0 } else { 1.0 } * asin(intersection[2]);
                if phi > phi_arc || (phi == phi_arc && (arc[0] != 0.0 || arc[1] != 0.0)) {
                    winding += if forward { 1 } else { -1 };
                }
            }

            lambda0 = lambda1;
            sin_phi0 = sin_phi1;
            cos_phi0 = cos_phi1;
            point0 = point1;
        }
    }

    (angle < -EPSILON || (angle < EPSILON && sum.value() < -EPSILON2)) ^ (winding & 1 != 0)
}
