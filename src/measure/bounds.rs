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

use crate::math::{cartesian, cartesian_cross, cartesian_normalize, spherical, Adder, Vec3, EPSILON};
use crate::measure::AreaStream;
use crate::stream::Stream;
use crate::Extent;

/// Eastward angle from `lambda0` to `lambda1`, in `[0, 360)`.
fn angle(lambda0: f64, lambda1: f64) -> f64 {
    let d = lambda1 - lambda0;
    if d < 0.0 {
        d + 360.0
    } else {
        d
    }
}

/// Whether `x` lies in the longitude range, which may wrap the antimeridian.
fn range_contains(range: [f64; 2], x: f64) -> bool {
    if range[0] <= range[1] {
        range[0] <= x && x <= range[1]
    } else {
        x < range[0] || range[1] < x
    }
}

/// Spherical bounding box of everything it receives, in degrees.
///
/// Lines bulge towards the poles between their vertices, so the box covers
/// the great arcs, not just the points. Longitudes are gathered as ranges
/// and merged at the end; the box then spans the complement of the largest
/// gap, which may cross the antimeridian (`x0 > x1`).
#[derive(Clone, Debug)]
pub struct BoundsStream {
    lambda0: f64,
    phi0: f64,
    lambda1: f64,
    phi1: f64,
    /// Longitude of the previous line point.
    lambda2: f64,
    /// First point of the current ring.
    first: Option<[f64; 2]>,
    p0: Option<Vec3>,
    delta_sum: Adder,
    ranges: Vec<[f64; 2]>,
    /// Index in `ranges` of the range being grown.
    range: Option<usize>,
    in_line: bool,
    in_polygon: bool,
    area: AreaStream,
}

impl Default for BoundsStream {
    fn default() -> Self {
        BoundsStream {
            lambda0: f64::INFINITY,
            phi0: f64::INFINITY,
            lambda1: f64::NEG_INFINITY,
            phi1: f64::NEG_INFINITY,
            lambda2: 0.0,
            first: None,
            p0: None,
            delta_sum: Adder::new(),
            ranges: Vec::new(),
            range: None,
            in_line: false,
            in_polygon: false,
            area: AreaStream::new(),
        }
    }
}

impl BoundsStream {
    pub fn new() -> Self {
        BoundsStream::default()
    }

    /// The box `[[west, south], [east, north]]`, or all NaN when nothing was
    /// received. The accumulator is reset.
    pub fn result(&mut self) -> Extent {
        let mut ranges = std::mem::take(&mut self.ranges);
        if !ranges.is_empty() {
            ranges.sort_by(|a, b| a[0].total_cmp(&b[0]));
            let mut merged: Vec<[f64; 2]> = Vec::with_capacity(ranges.len());
            for b in ranges {
                match merged.last_mut() {
                    Some(a) if range_contains(*a, b[0]) || range_contains(*a, b[1]) => {
                        if angle(a[0], b[1]) > angle(a[0], a[1]) {
                            a[1] = b[1];
                        }
                        if angle(b[0], a[1]) > angle(a[0], a[1]) {
                            a[0] = b[0];
                        }
                    }
                    _ => merged.push(b),
                }
            }

            // the box spans the complement of the widest gap
            let mut delta_max = f64::NEG_INFINITY;
            let mut a = merged[merged.len() - 1];
            for &b in &merged {
                let delta = angle(a[1], b[0]);
                if delta > delta_max {
                    delta_max = delta;
                    self.lambda0 = b[0];
                    self.lambda1 = a[1];
                }
                a = b;
            }
        }

        let bounds = if self.lambda0.is_infinite() || self.phi0.is_infinite() {
            [[f64::NAN, f64::NAN], [f64::NAN, f64::NAN]]
        } else {
            [[self.lambda0, self.phi0], [self.lambda1, self.phi1]]
        };
        *self = BoundsStream::default();
        bounds
    }

    fn update_range(&mut self) {
        if let Some(i) = self.range {
            self.ranges[i] = [self.lambda0, self.lambda1];
        }
    }

    fn push_range(&mut self, lambda: f64) {
        self.lambda0 = lambda;
        self.lambda1 = lambda;
        self.ranges.push([lambda, lambda]);
        self.range = Some(self.ranges.len() - 1);
    }

    fn extend_phi(&mut self, phi: f64) {
        if phi < self.phi0 {
            self.phi0 = phi;
        }
        if phi > self.phi1 {
            self.phi1 = phi;
        }
    }

    fn bounds_point(&mut self, lambda: f64, phi: f64) {
        self.push_range(lambda);
        self.extend_phi(phi);
    }

    fn line_point(&mut self, lambda: f64, phi: f64) {
        let p = cartesian(lambda.to_radians(), phi.to_radians());
        if let Some(p0) = self.p0 {
            let normal = cartesian_cross(p0, p);
            let equatorial = [normal[1], -normal[0], 0.0];
            let inflection = spherical(cartesian_normalize(cartesian_cross(equatorial, normal)));
            let delta = lambda - self.lambda2;
            let sign = if delta > 0.0 { 1.0 } else { -1.0 };
            let mut lambda_i = inflection[0].to_degrees() * sign;
            let antimeridian = delta.abs() > 180.0;
            let between =
                |l: f64, l2: f64, li: f64| sign * l2 < li && li < sign * l;

            if antimeridian ^ between(lambda, self.lambda2, lambda_i) {
                // the arc passes its northernmost point
                let phi_i = inflection[1].to_degrees();
                if phi_i > self.phi1 {
                    self.phi1 = phi_i;
                }
            } else {
                lambda_i = (lambda_i + 360.0) % 360.0 - 180.0;
                if antimeridian ^ between(lambda, self.lambda2, lambda_i) {
                    let phi_i = -inflection[1].to_degrees();
                    if phi_i < self.phi0 {
                        self.phi0 = phi_i;
                    }
                } else {
                    self.extend_phi(phi);
                }
            }

            let span = angle(self.lambda0, self.lambda1);
            if antimeridian {
                if lambda < self.lambda2 {
                    if angle(self.lambda0, lambda) > span {
                        self.lambda1 = lambda;
                    }
                } else if angle(lambda, self.lambda1) > span {
                    self.lambda0 = lambda;
                }
            } else if self.lambda1 >= self.lambda0 {
                if lambda < self.lambda0 {
                    self.lambda0 = lambda;
                }
                if lambda > self.lambda1 {
                    self.lambda1 = lambda;
                }
            } else if lambda > self.lambda2 {
                if angle(self.lambda0, lambda) > span {
                    self.lambda1 = lambda;
                }
            } else if angle(lambda, self.lambda1) > span {
                self.lambda0 = lambda;
            }
        } else {
            self.push_range(lambda);
        }
        self.extend_phi(phi);
        self.p0 = Some(p);
        self.lambda2 = lambda;
    }

    fn ring_point(&mut self, lambda: f64, phi: f64) {
        if self.p0.is_some() {
            let delta = lambda - self.lambda2;
            self.delta_sum.add(if delta.abs() > 180.0 {
                delta + if delta > 0.0 { 360.0 } else { -360.0 }
            } else {
                delta
            });
        } else {
            self.first = Some([lambda, phi]);
        }
        self.area.point(lambda, phi, None);
        self.line_point(lambda, phi);
    }
}

impl Stream for BoundsStream {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        if self.in_polygon {
            self.ring_point(x, y);
        } else if self.in_line {
            self.line_point(x, y);
        } else {
            self.bounds_point(x, y);
        }
    }

    fn line_start(&mut self) {
        if self.in_polygon {
            self.area.line_start();
        } else {
            self.in_line = true;
        }
    }

    fn line_end(&mut self) {
        if self.in_polygon {
            if let Some([lambda, phi]) = self.first.take() {
                self.ring_point(lambda, phi);
            }
            self.area.line_end();
            if self.delta_sum.value().abs() > EPSILON {
                self.lambda0 = -180.0;
                self.lambda1 = 180.0;
            }
        } else {
            self.in_line = false;
        }
        self.update_range();
        self.p0 = None;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
        self.delta_sum = Adder::new();
        self.area.polygon_start();
    }

    fn polygon_end(&mut self) {
        self.area.polygon_end();
        self.in_polygon = false;
        let delta_sum = self.delta_sum.value();
        if self.area.ring_sum() < 0.0 {
            self.lambda0 = -180.0;
            self.lambda1 = 180.0;
            self.phi0 = -90.0;
            self.phi1 = 90.0;
        } else if delta_sum > EPSILON {
            self.phi1 = 90.0;
        } else if delta_sum < -EPSILON {
            self.phi0 = -90.0;
        }
        self.update_range();
    }

    fn sphere(&mut self) {
        self.lambda0 = -180.0;
        self.lambda1 = 180.0;
        self.phi0 = -90.0;
        self.phi1 = 90.0;
    }
}
