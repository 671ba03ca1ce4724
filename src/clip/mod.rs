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

//! Clipping stages.
//!
//! Spherical clips (antimeridian cut, small-circle horizon) share the
//! [`Clip`] stream, parameterised by a [`ClipBoundary`]. The planar
//! rectangle clip is its own stream but reuses the fragment buffer and the
//! ring rejoin.

use std::mem;

use log::trace;

use crate::math::{EPSILON, HALF_PI};
use crate::polygon_contains::polygon_contains;
use crate::stream::Stream;

mod antimeridian;
mod buffer;
mod circle;
mod line;
mod rectangle;
mod rejoin;

pub use self::antimeridian::ClipAntimeridian;
pub use self::buffer::{ClipBuffer, Segment};
pub use self::circle::ClipCircle;
pub use self::rectangle::{ClipRectangle, RectangleClip};

/// A stage factory: wraps the downstream sink in a new stream.
///
/// Projections hold their pre-clip and post-clip as `StreamTransform`s, so
/// any of the clips below, or a user-supplied stage, can be plugged in.
pub trait StreamTransform {
    fn transform<'a>(&self, sink: Box<dyn Stream + 'a>) -> Box<dyn Stream + 'a>;

    /// Whether a lone point at these coordinates passes the stage.
    fn accepts(&self, _x: f64, _y: f64) -> bool {
        true
    }
}

/// The identity stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoClip;

impl StreamTransform for NoClip {
    fn transform<'a>(&self, sink: Box<dyn Stream + 'a>) -> Box<dyn Stream + 'a> {
        sink
    }
}

/// Per-line state machine of a spherical clip boundary.
pub trait ClipLine {
    fn line_start(&mut self, sink: &mut dyn Stream);
    fn point(&mut self, lambda: f64, phi: f64, sink: &mut dyn Stream);
    fn line_end(&mut self, sink: &mut dyn Stream);
    /// Bit 1: the line was never cut. Bit 2: the first and last fragments
    /// should be joined.
    fn clean(&self) -> u8;
}

/// A closed spherical boundary.
pub trait ClipBoundary {
    type Line: ClipLine;

    fn visible(&self, lambda: f64, phi: f64) -> bool;
    fn line(&self) -> Self::Line;
    /// Walk the boundary from `from` to `to` in `direction`; the whole
    /// boundary when either end is missing.
    fn interpolate(
        &self,
        from: Option<[f64; 2]>,
        to: Option<[f64; 2]>,
        direction: f64,
        sink: &mut dyn Stream,
    );
    /// A point that is inside the clip region exactly when it is inside
    /// every polygon that contains the whole region.
    fn start(&self) -> [f64; 2];
}

/// Order of intersection points along a spherical boundary.
pub(crate) fn compare_intersection(a: [f64; 2], b: [f64; 2]) -> f64 {
    fn key(p: [f64; 2]) -> f64 {
        if p[0] < 0.0 {
            p[1] - HALF_PI - EPSILON
        } else {
            HALF_PI - p[1]
        }
    }
    key(a) - key(b)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Point,
    Line,
    Ring,
}

/// Spherical clip stream.
pub struct Clip<B: ClipBoundary, S> {
    boundary: B,
    sink: S,
    line: B::Line,
    ring_line: B::Line,
    ring_sink: ClipBuffer,
    mode: Mode,
    in_polygon: bool,
    polygon_started: bool,
    polygon: Vec<Vec<[f64; 2]>>,
    ring: Vec<[f64; 2]>,
    segments: Vec<Segment>,
}

impl<B: ClipBoundary, S: Stream> Clip<B, S> {
    pub fn new(boundary: B, sink: S) -> Self {
        let line = boundary.line();
        let ring_line = boundary.line();
        Clip {
            boundary,
            sink,
            line,
            ring_line,
            ring_sink: ClipBuffer::new(),
            mode: Mode::Point,
            in_polygon: false,
            polygon_started: false,
            polygon: Vec::new(),
            ring: Vec::new(),
            segments: Vec::new(),
        }
    }

    fn start_polygon(&mut self) {
        if !self.polygon_started {
            self.sink.polygon_start();
            self.polygon_started = true;
        }
    }

    fn ring_end(&mut self) {
        if let Some(&first) = self.ring.first() {
            self.ring_line.point(first[0], first[1], &mut self.ring_sink);
        }
        self.ring_line.line_end(&mut self.ring_sink);

        let clean = self.ring_line.clean();
        let mut ring_segments = self.ring_sink.take();
        let ring = mem::take(&mut self.ring);
        if ring.is_empty() {
            return;
        }
        self.polygon.push(ring);

        if ring_segments.is_empty() {
            return;
        }

        // No intersections: emit the ring as is.
        if clean & 1 != 0 {
            let segment = &ring_segments[0];
            if segment.len() > 1 {
                let m = segment.len() - 1;
                self.start_polygon();
                self.sink.line_start();
                for p in &segment[..m] {
                    self.sink.point(p[0], p[1], None);
                }
                self.sink.line_end();
            }
            return;
        }

        // Rejoin the first and last fragments when the ring started inside.
        if ring_segments.len() > 1 && clean & 2 != 0 {
            let first = ring_segments.remove(0);
            if let Some(last) = ring_segments.last_mut() {
                last.extend(first);
            }
        }

        self.segments
            .extend(ring_segments.into_iter().filter(|s| s.len() > 1));
    }
}

impl<B: ClipBoundary, S: Stream> Stream for Clip<B, S> {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        match self.mode {
            Mode::Point => {
                if self.boundary.visible(x, y) {
                    self.sink.point(x, y, m);
                }
            }
            Mode::Line => self.line.point(x, y, &mut self.sink),
            Mode::Ring => {
                self.ring.push([x, y]);
                self.ring_line.point(x, y, &mut self.ring_sink);
            }
        }
    }

    fn line_start(&mut self) {
        if self.in_polygon {
            self.mode = Mode::Ring;
            self.ring.clear();
            self.ring_line.line_start(&mut self.ring_sink);
        } else {
            self.mode = Mode::Line;
            self.line.line_start(&mut self.sink);
        }
    }

    fn line_end(&mut self) {
        match self.mode {
            Mode::Ring => self.ring_end(),
            Mode::Line => self.line.line_end(&mut self.sink),
            Mode::Point => {}
        }
        self.mode = Mode::Point;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
        self.polygon.clear();
        self.segments.clear();
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
        self.mode = Mode::Point;

        let segments = mem::take(&mut self.segments);
        let polygon = mem::take(&mut self.polygon);
        let start_inside = polygon_contains(&polygon, self.boundary.start());

        if !segments.is_empty() {
            trace!("clipped polygon into {} fragments", segments.len());
            self.start_polygon();
            let boundary = &self.boundary;
            rejoin::rejoin(
                segments,
                compare_intersection,
                start_inside,
                |from, to, direction, stream| {
                    boundary.interpolate(Some(from), Some(to), direction, stream)
                },
                &mut self.sink,
            );
        } else if start_inside {
            self.start_polygon();
            self.sink.line_start();
            self.boundary.interpolate(None, None, 1.0, &mut self.sink);
            self.sink.line_end();
        }

        if self.polygon_started {
            self.sink.polygon_end();
            self.polygon_started = false;
        }
    }

    fn sphere(&mut self) {
        self.sink.polygon_start();
        self.sink.line_start();
        self.boundary.interpolate(None, None, 1.0, &mut self.sink);
        self.sink.line_end();
        self.sink.polygon_end();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::stream::Stream;

    /// Sink collecting lines and polygon rings as point lists.
    #[derive(Default, Debug)]
    pub(crate) struct Lines {
        pub lines: Vec<Vec<[f64; 2]>>,
        pub polygons: usize,
        pub points: Vec<[f64; 2]>,
        in_line: bool,
    }

    impl Lines {
        pub fn degrees(&self) -> Vec<Vec<[f64; 2]>> {
            self.lines
                .iter()
                .map(|l| l.iter().map(|p| [p[0].to_degrees(), p[1].to_degrees()]).collect())
                .collect()
        }
    }

    impl Stream for Lines {
        fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
            if self.in_line {
                if let Some(line) = self.lines.last_mut() {
                    line.push([x, y]);
                }
            } else {
                self.points.push([x, y]);
            }
        }
        fn line_start(&mut self) {
            self.in_line = true;
            self.lines.push(Vec::new());
        }
        fn line_end(&mut self) {
            self.in_line = false;
        }
        fn polygon_start(&mut self) {
            self.polygons += 1;
        }
    }
}
