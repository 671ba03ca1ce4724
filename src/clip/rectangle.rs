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

use log::trace;

use crate::clip::buffer::{ClipBuffer, Segment};
use crate::clip::line::clip_line;
use crate::clip::rejoin::rejoin;
use crate::clip::StreamTransform;
use crate::stream::Stream;
use crate::Extent;

/// Planar coordinates are clamped to this before clipping, so that points
/// projected to near infinity still give a finite intersection.
const CLIP_MAX: f64 = 1e9;
const CLIP_MIN: f64 = -CLIP_MAX;

const EPSILON: f64 = 1e-6;

/// Clips planar geometry to an axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRectangle {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl ClipRectangle {
    pub fn new(extent: Extent) -> Self {
        let [[x0, y0], [x1, y1]] = extent;
        ClipRectangle { x0, y0, x1, y1 }
    }

    pub fn extent(&self) -> Extent {
        [[self.x0, self.y0], [self.x1, self.y1]]
    }

    /// Edges count as inside.
    pub fn visible(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && self.y1 >= y
    }

    /// Corner index of the edge a boundary point lies on, numbered
    /// clockwise from (x0, y0); which end of the edge depends on the
    /// walking direction.
    fn corner(&self, p: [f64; 2], direction: f64) -> i32 {
        let forward = direction > 0.0;
        if (p[0] - self.x0).abs() < EPSILON {
            if forward {
                0
            } else {
                3
            }
        } else if (p[0] - self.x1).abs() < EPSILON {
            if forward {
                2
            } else {
                1
            }
        } else if (p[1] - self.y0).abs() < EPSILON {
            if forward {
                1
            } else {
                0
            }
        } else if forward {
            3
        } else {
            2
        }
    }

    /// Order of two boundary points along the rectangle.
    fn compare_point(&self, a: [f64; 2], b: [f64; 2]) -> f64 {
        let ca = self.corner(a, 1.0);
        let cb = self.corner(b, 1.0);
        if ca != cb {
            return (ca - cb) as f64;
        }
        match ca {
            0 => b[1] - a[1],
            1 => a[0] - b[0],
            2 => a[1] - b[1],
            _ => b[0] - a[0],
        }
    }

    fn interpolate(
        &self,
        from: Option<[f64; 2]>,
        to: Option<[f64; 2]>,
        direction: f64,
        stream: &mut dyn Stream,
    ) {
        let (mut a, a1) = match (from, to) {
            (Some(from), Some(to)) => {
                let a = self.corner(from, direction);
                let a1 = self.corner(to, direction);
                if a == a1 && (self.compare_point(from, to) < 0.0) == (direction > 0.0) {
                    stream.point(to[0], to[1], None);
                    return;
                }
                (a, a1)
            }
            _ => (0, 0),
        };
        let step = if direction > 0.0 { 1 } else { 3 };
        loop {
            let x = if a == 0 || a == 3 { self.x0 } else { self.x1 };
            let y = if a > 1 { self.y1 } else { self.y0 };
            stream.point(x, y, None);
            a = (a + step) % 4;
            if a == a1 {
                break;
            }
        }
    }
}

impl StreamTransform for ClipRectangle {
    fn transform<'a>(&self, sink: Box<dyn Stream + 'a>) -> Box<dyn Stream + 'a> {
        Box::new(RectangleClip::new(*self, sink))
    }

    fn accepts(&self, x: f64, y: f64) -> bool {
        self.visible(x, y)
    }
}

fn clamp(p: [f64; 2]) -> [f64; 2] {
    [p[0].clamp(CLIP_MIN, CLIP_MAX), p[1].clamp(CLIP_MIN, CLIP_MAX)]
}

/// Rectangle clip stream.
///
/// Inside a polygon, lines are written to a fragment buffer; at
/// `polygon_end` the fragments are stitched along the rectangle, or the
/// whole rectangle is emitted when the polygon covers it.
pub struct RectangleClip<S> {
    clip: ClipRectangle,
    sink: S,
    buffer: ClipBuffer,
    in_line: bool,
    /// set between polygon_start and polygon_end
    polygon: Option<Vec<Vec<[f64; 2]>>>,
    segments: Option<Vec<Segment>>,
    /// first point of the current line and its visibility
    first: Option<([f64; 2], bool)>,
    previous: [f64; 2],
    previous_visible: bool,
    clean: bool,
}

impl<S: Stream> RectangleClip<S> {
    pub fn new(clip: ClipRectangle, sink: S) -> Self {
        RectangleClip {
            clip,
            sink,
            buffer: ClipBuffer::new(),
            in_line: false,
            polygon: None,
            segments: None,
            first: None,
            previous: [f64::NAN, f64::NAN],
            previous_visible: false,
            clean: true,
        }
    }

    fn active(&mut self) -> &mut dyn Stream {
        if self.polygon.is_some() {
            &mut self.buffer
        } else {
            &mut self.sink
        }
    }

    /// Winding number of the recorded rings around the rectangle's
    /// bottom-left corner. A ring vertex exactly on the ray counts as
    /// below it.
    fn polygon_inside(&self) -> i32 {
        let Some(polygon) = self.polygon.as_ref() else {
            return 0;
        };
        let ClipRectangle { x0, y1, .. } = self.clip;
        let mut winding = 0;
        for ring in polygon {
            for pair in ring.windows(2) {
                let [a0, a1] = pair[0];
                let [b0, b1] = pair[1];
                if a1 <= y1 {
                    if b1 > y1 && (b0 - a0) * (y1 - a1) > (b1 - a1) * (x0 - a0) {
                        winding += 1;
                    }
                } else if b1 <= y1 && (b0 - a0) * (y1 - a1) < (b1 - a1) * (x0 - a0) {
                    winding -= 1;
                }
            }
        }
        winding
    }

    fn line_point(&mut self, x: f64, y: f64, m: Option<f64>) {
        let v = self.clip.visible(x, y);
        if let Some(ring) = self.polygon.as_mut().and_then(|p| p.last_mut()) {
            ring.push([x, y]);
        }
        // tags are meaningless to the rejoin here
        let m = if self.polygon.is_some() { None } else { m };

        let mut current = [x, y];
        if self.first.is_none() {
            self.first = Some(([x, y], v));
            if v {
                let stream = self.active();
                stream.line_start();
                stream.point(x, y, m);
            }
        } else if v && self.previous_visible {
            self.active().point(x, y, m);
        } else {
            let a = clamp(self.previous);
            current = clamp(current);
            let previous_visible = self.previous_visible;
            let extent = self.clip.extent();
            match clip_line(a, current, &extent) {
                Some((a, b)) => {
                    let stream = self.active();
                    if !previous_visible {
                        stream.line_start();
                        stream.point(a[0], a[1], None);
                    }
                    stream.point(b[0], b[1], if v { m } else { None });
                    if !v {
                        stream.line_end();
                    }
                    self.clean = false;
                }
                None if v => {
                    let stream = self.active();
                    stream.line_start();
                    stream.point(x, y, m);
                    self.clean = false;
                }
                None => {}
            }
        }
        self.previous = current;
        self.previous_visible = v;
    }
}

impl<S: Stream> Stream for RectangleClip<S> {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        if self.in_line {
            self.line_point(x, y, m);
        } else if self.clip.visible(x, y) {
            self.active().point(x, y, m);
        }
    }

    fn line_start(&mut self) {
        self.in_line = true;
        if let Some(polygon) = self.polygon.as_mut() {
            polygon.push(Vec::new());
        }
        self.first = None;
        self.previous = [f64::NAN, f64::NAN];
        self.previous_visible = false;
    }

    fn line_end(&mut self) {
        if self.segments.is_some() {
            if let Some((first, first_visible)) = self.first {
                // close the ring
                self.line_point(first[0], first[1], None);
                if first_visible && self.previous_visible {
                    self.buffer.rejoin();
                }
            }
            let fragments = self.buffer.take();
            if let Some(segments) = self.segments.as_mut() {
                segments.extend(fragments);
            }
        }
        self.in_line = false;
        if self.previous_visible {
            self.active().line_end();
        }
    }

    fn polygon_start(&mut self) {
        self.polygon = Some(Vec::new());
        self.segments = Some(Vec::new());
        self.clean = true;
    }

    fn polygon_end(&mut self) {
        let start_inside = self.polygon_inside() != 0;
        let clean_inside = self.clean && start_inside;
        let segments = self.segments.take().unwrap_or_default();
        self.polygon = None;

        if clean_inside || !segments.is_empty() {
            trace!(
                "rectangle clip: {} fragments, covers extent: {}",
                segments.len(),
                clean_inside
            );
            self.sink.polygon_start();
            if clean_inside {
                self.sink.line_start();
                self.clip.interpolate(None, None, 1.0, &mut self.sink);
                self.sink.line_end();
            }
            if !segments.is_empty() {
                let clip = self.clip;
                rejoin(
                    segments,
                    |a, b| clip.compare_point(a, b),
                    start_inside,
                    |from, to, direction, stream| {
                        clip.interpolate(Some(from), Some(to), direction, stream)
                    },
                    &mut self.sink,
                );
            }
            self.sink.polygon_end();
        }
    }

    fn sphere(&mut self) {
        self.sink.sphere();
    }
}
