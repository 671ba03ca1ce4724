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

use crate::circle::circle_stream;
use crate::clip::{Clip, ClipBoundary, ClipLine, StreamTransform};
use crate::math::{
    cartesian, cartesian_add, cartesian_cross, cartesian_dot, cartesian_scale, point_equal,
    spherical, Vec3, EPSILON, PI,
};
use crate::stream::Stream;

/// Clips to a small circle of the given angular radius around the origin
/// of the rotated sphere (the projection's center).
#[derive(Clone, Debug, PartialEq)]
pub struct ClipCircle {
    radius: f64,
    cr: f64,
    delta: f64,
    small_radius: bool,
    not_hemisphere: bool,
}

enum Crossing {
    /// the great circle through both points is the clip plane's normal
    Degenerate,
    Miss,
    Hit { a: Vec3, u: Vec3, w: f64, uu: f64, t: f64 },
}

impl ClipCircle {
    /// Radius in degrees.
    pub fn new(angle: f64) -> Self {
        ClipCircle::from_radians(angle.to_radians())
    }

    pub fn from_radians(radius: f64) -> Self {
        let cr = radius.cos();
        ClipCircle {
            radius,
            cr,
            delta: 2f64.to_radians(),
            small_radius: cr > 0.0,
            not_hemisphere: cr.abs() > EPSILON,
        }
    }

    /// Radius in degrees.
    pub fn angle(&self) -> f64 {
        self.radius.to_degrees()
    }

    /// Outcode of a point relative to the circle's bounding box, used to
    /// skip arcs that cannot dip inside.
    fn code(&self, lambda: f64, phi: f64) -> u8 {
        let r = if self.small_radius {
            self.radius
        } else {
            PI - self.radius
        };
        let mut code = 0;
        if lambda < -r {
            code |= 1;
        } else if lambda > r {
            code |= 2;
        }
        if phi < -r {
            code |= 4;
        } else if phi > r {
            code |= 8;
        }
        code
    }

    /// Intersect the great arc through `a` and `b` with the clip plane.
    fn crossing(&self, a: [f64; 2], b: [f64; 2]) -> Crossing {
        let pa = cartesian(a[0], a[1]);
        let pb = cartesian(b[0], b[1]);
        let n1 = [1.0, 0.0, 0.0];
        let n2 = cartesian_cross(pa, pb);
        let n2n2 = cartesian_dot(n2, n2);
        let n1n2 = n2[0];
        let determinant = n2n2 - n1n2 * n1n2;

        if determinant == 0.0 {
            return Crossing::Degenerate;
        }

        let c1 = self.cr * n2n2 / determinant;
        let c2 = -self.cr * n1n2 / determinant;
        let u = cartesian_cross(n1, n2);
        let a3 = cartesian_add(cartesian_scale(n1, c1), cartesian_scale(n2, c2));
        let w = cartesian_dot(a3, u);
        let uu = cartesian_dot(u, u);
        let t2 = w * w - uu * (cartesian_dot(a3, a3) - 1.0);

        if t2 < 0.0 {
            return Crossing::Miss;
        }
        Crossing::Hit {
            a: a3,
            u,
            w,
            uu,
            t: t2.sqrt(),
        }
    }

    fn intersect(&self, a: [f64; 2], b: [f64; 2]) -> Option<[f64; 2]> {
        match self.crossing(a, b) {
            Crossing::Degenerate => Some(a),
            Crossing::Miss => None,
            Crossing::Hit { a: a3, u, w, uu, t } => {
                Some(spherical(cartesian_add(cartesian_scale(u, (-w - t) / uu), a3)))
            }
        }
    }

    /// Both intersections, when the arc between `a` and `b` crosses the
    /// circle twice.
    fn intersect_pair(&self, a: [f64; 2], b: [f64; 2]) -> Option<([f64; 2], [f64; 2])> {
        let (a3, u, w, uu, t) = match self.crossing(a, b) {
            Crossing::Hit { a, u, w, uu, t } => (a, u, w, uu, t),
            _ => return None,
        };
        let q = spherical(cartesian_add(cartesian_scale(u, (-w - t) / uu), a3));

        let (mut lambda0, mut lambda1) = (a[0], b[0]);
        let (mut phi0, mut phi1) = (a[1], b[1]);
        if lambda1 < lambda0 {
            std::mem::swap(&mut lambda0, &mut lambda1);
        }
        let delta = lambda1 - lambda0;
        let polar = (delta - PI).abs() < EPSILON;
        let meridian = polar || delta < EPSILON;
        if !polar && phi1 < phi0 {
            std::mem::swap(&mut phi0, &mut phi1);
        }

        let on_arc = if meridian {
            if polar {
                let bound = if (q[0] - lambda0).abs() < EPSILON {
                    phi0
                } else {
                    phi1
                };
                (phi0 + phi1 > 0.0) ^ (q[1] < bound)
            } else {
                phi0 <= q[1] && q[1] <= phi1
            }
        } else {
            (delta > PI) ^ (lambda0 <= q[0] && q[0] <= lambda1)
        };

        if on_arc {
            let q1 = spherical(cartesian_add(cartesian_scale(u, (-w + t) / uu), a3));
            Some((q, q1))
        } else {
            None
        }
    }
}

impl StreamTransform for ClipCircle {
    fn transform<'a>(&self, sink: Box<dyn Stream + 'a>) -> Box<dyn Stream + 'a> {
        Box::new(Clip::new(self.clone(), sink))
    }

    fn accepts(&self, lambda: f64, phi: f64) -> bool {
        self.visible(lambda, phi)
    }
}

impl ClipBoundary for ClipCircle {
    type Line = CircleLine;

    fn visible(&self, lambda: f64, phi: f64) -> bool {
        lambda.cos() * phi.cos() > self.cr
    }

    fn line(&self) -> CircleLine {
        CircleLine {
            circle: self.clone(),
            point0: None,
            c0: 0,
            v0: false,
            v00: false,
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
        circle_stream(sink, self.radius, self.delta, direction, from, to);
    }

    fn start(&self) -> [f64; 2] {
        if self.small_radius {
            [0.0, -self.radius]
        } else {
            [-PI, self.radius - PI]
        }
    }
}

pub struct CircleLine {
    circle: ClipCircle,
    point0: Option<[f64; 2]>,
    c0: u8,
    v0: bool,
    v00: bool,
    clean: u8,
}

impl ClipLine for CircleLine {
    fn line_start(&mut self, _sink: &mut dyn Stream) {
        self.v00 = false;
        self.v0 = false;
        self.clean = 1;
    }

    fn point(&mut self, lambda: f64, phi: f64, sink: &mut dyn Stream) {
        let circle = &self.circle;
        let point1 = [lambda, phi];
        let mut tag1 = None;
        let v = circle.visible(lambda, phi);
        let c = if circle.small_radius {
            if v {
                0
            } else {
                circle.code(lambda, phi)
            }
        } else if v {
            circle.code(lambda + if lambda < 0.0 { PI } else { -PI }, phi)
        } else {
            0
        };

        if self.point0.is_none() {
            self.v00 = v;
            self.v0 = v;
            if v {
                sink.line_start();
            }
        }

        let mut point0 = self.point0;
        if let (true, Some(p0)) = (v != self.v0, point0) {
            let point2 = circle.intersect(p0, point1);
            if point2.map_or(true, |p2| point_equal(p0, p2) || point_equal(point1, p2)) {
                tag1 = Some(1.0);
            }
            self.clean = 0;
            let point2 = if v {
                // entering
                sink.line_start();
                let p2 = circle.intersect(point1, p0).unwrap_or(point1);
                sink.point(p2[0], p2[1], None);
                p2
            } else {
                // exiting
                let p2 = circle.intersect(p0, point1).unwrap_or(p0);
                sink.point(p2[0], p2[1], Some(2.0));
                sink.line_end();
                p2
            };
            point0 = Some(point2);
        } else if let (true, Some(p0)) = (circle.not_hemisphere && (circle.small_radius ^ v), point0)
        {
            // both ends outside (or inside, for a large circle) but the arc
            // may still cross the circle twice
            if c & self.c0 == 0 {
                if let Some((t0, t1)) = circle.intersect_pair(point1, p0) {
                    self.clean = 0;
                    if circle.small_radius {
                        sink.line_start();
                        sink.point(t0[0], t0[1], None);
                        sink.point(t1[0], t1[1], None);
                        sink.line_end();
                    } else {
                        sink.point(t1[0], t1[1], None);
                        sink.line_end();
                        sink.line_start();
                        sink.point(t0[0], t0[1], Some(3.0));
                    }
                }
            }
        }

        if v && point0.map_or(true, |p0| !point_equal(p0, point1)) {
            sink.point(point1[0], point1[1], tag1);
        }
        self.point0 = Some(point1);
        self.v0 = v;
        self.c0 = c;
    }

    fn line_end(&mut self, sink: &mut dyn Stream) {
        if self.v0 {
            sink.line_end();
        }
        self.point0 = None;
    }

    fn clean(&self) -> u8 {
        self.clean | (((self.v00 && self.v0) as u8) << 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::tests::Lines;
    use approx::assert_abs_diff_eq;

    fn clip_line(radius: f64, points: &[[f64; 2]]) -> Lines {
        let mut lines = Lines::default();
        {
            let mut clip = Clip::new(ClipCircle::new(radius), &mut lines);
            clip.line_start();
            for p in points {
                clip.point(p[0].to_radians(), p[1].to_radians(), None);
            }
            clip.line_end();
        }
        lines
    }

    #[test]
    fn visibility_is_angular_distance_from_origin() {
        let clip = ClipCircle::new(30.0);
        assert!(clip.visible(0.0, 0.0));
        assert!(clip.visible(29f64.to_radians(), 0.0));
        assert!(!clip.visible(31f64.to_radians(), 0.0));
        assert!(!clip.visible(0.0, -31f64.to_radians()));
    }

    #[test]
    fn line_leaving_the_circle_ends_on_it() {
        let lines = clip_line(30.0, &[[0.0, 0.0], [60.0, 0.0]]).degrees();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 2);
        assert_abs_diff_eq!(lines[0][1][0], 30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lines[0][1][1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn line_entering_the_circle_starts_on_it() {
        let lines = clip_line(30.0, &[[-60.0, 0.0], [0.0, 0.0]]).degrees();
        assert_eq!(lines.len(), 1);
        assert_abs_diff_eq!(lines[0][0][0], -30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lines[0][1][0], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn arc_passing_through_the_circle_is_kept() {
        let lines = clip_line(30.0, &[[-60.0, 0.0], [60.0, 0.0]]).degrees();
        assert_eq!(lines.len(), 1);
        assert_abs_diff_eq!(lines[0][0][0], -30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lines[0][1][0], 30.0, epsilon = 1e-6);
    }

    #[test]
    fn line_outside_is_dropped() {
        let lines = clip_line(30.0, &[[60.0, 0.0], [60.0, 20.0]]);
        assert!(lines.lines.is_empty());
    }

    #[test]
    fn hemisphere_boundary_is_hidden() {
        let clip = ClipCircle::new(90.0);
        for _ in 0..2 {
            for (degrees, visible) in [(89.9999_f64, true), (90.0, false), (90.0001, false)] {
                let d = degrees.to_radians();
                assert_eq!(clip.accepts(d, 0.0), visible, "{} east", degrees);
                assert_eq!(clip.accepts(0.0, -d), visible, "{} south", degrees);
            }
        }
    }

    #[test]
    fn sphere_becomes_the_circle() {
        let mut lines = Lines::default();
        Clip::new(ClipCircle::new(30.0), &mut lines).sphere();
        assert_eq!(lines.polygons, 1);
        assert_eq!(lines.lines.len(), 1);
        for p in &lines.lines[0] {
            let d = (p[0].cos() * p[1].cos()).acos().to_degrees();
            assert_abs_diff_eq!(d, 30.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn polygon_containing_the_circle_becomes_the_circle() {
        // a large ring around the origin, wound clockwise
        let mut lines = Lines::default();
        {
            let mut clip = Clip::new(ClipCircle::new(10.0), &mut lines);
            clip.polygon_start();
            clip.line_start();
            for p in [[-40.0_f64, -40.0], [-40.0, 40.0], [40.0, 40.0], [40.0, -40.0]] {
                clip.point(p[0].to_radians(), p[1].to_radians(), None);
            }
            clip.line_end();
            clip.polygon_end();
        }
        assert_eq!(lines.polygons, 1);
        assert_eq!(lines.lines.len(), 1);
        assert_eq!(lines.lines[0].len(), 181);
    }
}
