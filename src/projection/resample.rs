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

use crate::math::{asin, cartesian, Vec3, EPSILON};
use crate::projection::ProjectTransform;
use crate::stream::Stream;

const MAX_DEPTH: u8 = 16;

/// cos(30°): arcs longer than this are always split.
const COS_MIN_DISTANCE: f64 = 0.866_025_403_784_438_6;

/// A projected vertex with the spherical data needed to split the arc
/// that ends at it.
#[derive(Clone, Copy, Debug)]
struct Vertex {
    x: f64,
    y: f64,
    lambda: f64,
    p: Vec3,
}

/// Projects spherical points and adds intermediate points along each arc
/// until the planar polyline is within `√delta2` of the projected
/// great circle.
///
/// Points of lines and rings lose their `m`; bare points keep it.
pub(crate) struct Resample<S> {
    project: Rc<ProjectTransform>,
    delta2: f64,
    sink: S,
    in_line: bool,
    in_polygon: bool,
    first: Option<Vertex>,
    previous: Option<Vertex>,
}

impl<S: Stream> Resample<S> {
    pub(crate) fn new(project: Rc<ProjectTransform>, delta2: f64, sink: S) -> Self {
        Resample {
            project,
            delta2,
            sink,
            in_line: false,
            in_polygon: false,
            first: None,
            previous: None,
        }
    }

    fn vertex(&self, lambda: f64, phi: f64) -> Vertex {
        let [x, y] = self.project.forward(lambda, phi);
        Vertex {
            x,
            y,
            lambda,
            p: cartesian(lambda, phi),
        }
    }

    fn line_point(&mut self, lambda: f64, phi: f64) {
        let vertex = self.vertex(lambda, phi);
        if let Some(previous) = self.previous {
            resample_line_to(
                &self.project,
                self.delta2,
                previous,
                vertex,
                MAX_DEPTH,
                &mut self.sink,
            );
        }
        self.sink.point(vertex.x, vertex.y, None);
        if self.in_polygon && self.first.is_none() {
            self.first = Some(vertex);
        }
        self.previous = Some(vertex);
    }
}

fn resample_line_to<S: Stream>(
    project: &ProjectTransform,
    delta2: f64,
    v0: Vertex,
    v1: Vertex,
    depth: u8,
    sink: &mut S,
) {
    let dx = v1.x - v0.x;
    let dy = v1.y - v0.y;
    let d2 = dx * dx + dy * dy;
    if !(d2 > 4.0 * delta2 && depth > 0) {
        return;
    }
    let depth = depth - 1;

    let [a0, b0, c0] = v0.p;
    let [a1, b1, c1] = v1.p;
    let (a, b, c) = (a0 + a1, b0 + b1, c0 + c1);
    let m = (a * a + b * b + c * c).sqrt();
    let c = c / m;
    let phi2 = asin(c);
    // near a pole or along a meridian atan2 is unstable
    let lambda2 = if ((c.abs() - 1.0).abs() < EPSILON) || (v0.lambda - v1.lambda).abs() < EPSILON {
        (v0.lambda + v1.lambda) / 2.0
    } else {
        b.atan2(a)
    };
    let [x2, y2] = project.forward(lambda2, phi2);
    let dx2 = x2 - v0.x;
    let dy2 = y2 - v0.y;
    let dz = dy * dx2 - dx * dy2;

    if dz * dz / d2 > delta2
        || ((dx * dx2 + dy * dy2) / d2 - 0.5).abs() > 0.3
        || a0 * a1 + b0 * b1 + c0 * c1 < COS_MIN_DISTANCE
    {
        let middle = Vertex {
            x: x2,
            y: y2,
            lambda: lambda2,
            p: [a / m, b / m, c],
        };
        resample_line_to(project, delta2, v0, middle, depth, sink);
        sink.point(x2, y2, None);
        resample_line_to(project, delta2, middle, v1, depth, sink);
    }
}

impl<S: Stream> Stream for Resample<S> {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        if self.in_line {
            self.line_point(x, y);
        } else {
            let [x, y] = self.project.forward(x, y);
            self.sink.point(x, y, m);
        }
    }

    fn line_start(&mut self) {
        self.in_line = true;
        self.first = None;
        self.previous = None;
        self.sink.line_start();
    }

    fn line_end(&mut self) {
        // close the ring with a resampled edge back to its first point
        if self.in_polygon {
            if let (Some(previous), Some(first)) = (self.previous, self.first) {
                resample_line_to(
                    &self.project,
                    self.delta2,
                    previous,
                    first,
                    MAX_DEPTH,
                    &mut self.sink,
                );
            }
        }
        self.in_line = false;
        self.sink.line_end();
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
        self.sink.polygon_start();
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
        self.sink.polygon_end();
    }

    fn sphere(&mut self) {
        self.sink.sphere();
    }
}

/// Projects every point as is.
pub(crate) struct ResampleNone<S> {
    project: Rc<ProjectTransform>,
    sink: S,
}

impl<S: Stream> ResampleNone<S> {
    pub(crate) fn new(project: Rc<ProjectTransform>, sink: S) -> Self {
        ResampleNone { project, sink }
    }
}

impl<S: Stream> Stream for ResampleNone<S> {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        let [x, y] = self.project.forward(x, y);
        self.sink.point(x, y, m);
    }
    fn line_start(&mut self) {
        self.sink.line_start();
    }
    fn line_end(&mut self) {
        self.sink.line_end();
    }
    fn polygon_start(&mut self) {
        self.sink.polygon_start();
    }
    fn polygon_end(&mut self) {
        self.sink.polygon_end();
    }
    fn sphere(&mut self) {
        self.sink.sphere();
    }
}
