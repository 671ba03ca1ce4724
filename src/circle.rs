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

use crate::math::{acos, cartesian, cartesian_normalize, spherical, EPSILON, TAU};
use crate::rotation::RotateRadians;
use crate::stream::Stream;
use crate::Geometry;

/// Emit points along a small circle of `radius` around the origin, every
/// `delta` radians, in `direction` (+1 or -1).
///
/// Without `from` / `to` the whole circle is emitted; otherwise only the arc
/// between the angles of the two boundary points.
pub fn circle_stream<S: Stream + ?Sized>(
    stream: &mut S,
    radius: f64,
    delta: f64,
    direction: f64,
    from: Option<[f64; 2]>,
    to: Option<[f64; 2]>,
) {
    if delta == 0.0 {
        return;
    }
    let cos_radius = radius.cos();
    let sin_radius = radius.sin();
    let step = direction * delta;
    let (t0, t1) = match (from, to) {
        (Some(from), Some(to)) => {
            let mut t0 = circle_radius(cos_radius, from);
            let t1 = circle_radius(cos_radius, to);
            if if direction > 0.0 { t0 < t1 } else { t0 > t1 } {
                t0 += direction * TAU;
            }
            (t0, t1)
        }
        _ => (radius + direction * TAU, radius - step / 2.0),
    };
    let mut t = t0;
    while if direction > 0.0 { t > t1 } else { t < t1 } {
        let [lambda, phi] = spherical([cos_radius, -sin_radius * t.cos(), -sin_radius * t.sin()]);
        stream.point(lambda, phi, None);
        t -= step;
    }
}

/// Angle of a point on the circle, measured the way `circle_stream` walks.
fn circle_radius(cos_radius: f64, point: [f64; 2]) -> f64 {
    let mut p = cartesian(point[0], point[1]);
    p[0] -= cos_radius;
    let p = cartesian_normalize(p);
    let radius = acos(-p[1]);
    ((if -p[2] < 0.0 { -radius } else { radius }) + TAU - EPSILON) % TAU
}

/// Generator of small-circle polygons.
///
/// ```
/// use geostream::{GeoCircle, Geometry};
///
/// let circle = GeoCircle::new().center([10.0, 20.0]).radius(5.0).circle();
/// assert!(matches!(circle, Geometry::Polygon(_)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeoCircle {
    center: [f64; 2],
    radius: f64,
    precision: f64,
}

impl Default for GeoCircle {
    fn default() -> Self {
        GeoCircle {
            center: [0.0, 0.0],
            radius: 90.0,
            precision: 2.0,
        }
    }
}

struct RingCollector {
    rotate: RotateRadians,
    ring: Vec<Vec<f64>>,
}

impl Stream for RingCollector {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        let [lambda, phi] = self.rotate.invert(x, y);
        self.ring.push(vec![lambda.to_degrees(), phi.to_degrees()]);
    }
}

impl GeoCircle {
    pub fn new() -> Self {
        GeoCircle::default()
    }

    /// Center in degrees.
    pub fn center(mut self, center: [f64; 2]) -> Self {
        self.center = center;
        self
    }

    /// Radius in degrees.
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Angular step between successive points, in degrees.
    pub fn precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    pub fn circle(&self) -> Geometry {
        let mut collector = RingCollector {
            rotate: RotateRadians::new(
                -self.center[0].to_radians(),
                -self.center[1].to_radians(),
                0.0,
            ),
            ring: Vec::new(),
        };
        circle_stream(
            &mut collector,
            self.radius.to_radians(),
            self.precision.to_radians(),
            1.0,
            None,
            None,
        );
        Geometry::Polygon(vec![collector.ring])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::cartesian_dot;
    use approx::assert_abs_diff_eq;

    fn ring(geometry: Geometry) -> Vec<Vec<f64>> {
        match geometry {
            Geometry::Polygon(mut rings) => rings.remove(0),
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn default_circle_is_a_hemisphere() {
        let ring = ring(GeoCircle::new().circle());
        // 360 / 2 steps, plus the coordinate closing the ring
        assert_eq!(ring.len(), 181);
        for p in &ring {
            let angle = (p[0].to_radians().cos() * p[1].to_radians().cos()).acos();
            assert_abs_diff_eq!(angle.to_degrees(), 90.0, epsilon = 1e-6);
        }
        // both ends sit on the pole, where longitude is arbitrary
        let first = &ring[0];
        let last = &ring[ring.len() - 1];
        let a = cartesian(first[0].to_radians(), first[1].to_radians());
        let b = cartesian(last[0].to_radians(), last[1].to_radians());
        assert_abs_diff_eq!(cartesian_dot(a, b), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn circle_points_keep_their_distance_from_the_center() {
        let center = [-30.0, 45.0];
        let ring = ring(GeoCircle::new().center(center).radius(10.0).precision(5.0).circle());
        assert_eq!(ring.len(), 73);
        let c = cartesian(center[0].to_radians(), center[1].to_radians());
        for p in &ring {
            let q = cartesian(p[0].to_radians(), p[1].to_radians());
            let d = (c[0] * q[0] + c[1] * q[1] + c[2] * q[2]).acos();
            assert_abs_diff_eq!(d.to_degrees(), 10.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn zero_precision_emits_nothing() {
        let ring = ring(GeoCircle::new().precision(0.0).circle());
        assert!(ring.is_empty());
    }
}
