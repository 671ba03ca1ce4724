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

use std::cmp::Ordering;

use log::trace;

use crate::clip::buffer::Segment;
use crate::math::{point_equal, EPSILON};
use crate::stream::Stream;

/// One endpoint of a fragment, present twice: once in subject order
/// (`segment` set) and once in boundary order.
#[derive(Debug)]
struct Intersection {
    x: [f64; 2],
    segment: Option<usize>,
    /// twin in the other list
    other: usize,
    entry: bool,
    visited: bool,
    next: usize,
    previous: usize,
}

fn link(nodes: &mut [Intersection], list: &[usize]) {
    let n = list.len();
    for (i, &id) in list.iter().enumerate() {
        nodes[id].next = list[(i + 1) % n];
        nodes[id].previous = list[(i + n - 1) % n];
    }
}

/// Stitch clipped fragments into closed rings.
///
/// Fragments whose endpoints coincide are emitted as rings directly. The
/// others are joined by walking alternately along the fragments and along
/// the clip boundary (`interpolate`), in the order given by `compare`.
pub(crate) fn rejoin<C, I>(
    segments: Vec<Segment>,
    compare: C,
    start_inside: bool,
    interpolate: I,
    stream: &mut dyn Stream,
) where
    C: Fn([f64; 2], [f64; 2]) -> f64,
    I: Fn([f64; 2], [f64; 2], f64, &mut dyn Stream),
{
    let mut nodes: Vec<Intersection> = Vec::new();
    let mut subject: Vec<usize> = Vec::new();
    let mut clip: Vec<usize> = Vec::new();
    let mut segments = segments;

    for (index, segment) in segments.iter_mut().enumerate() {
        if segment.len() < 2 {
            continue;
        }
        let n = segment.len() - 1;
        let p0 = segment[0];
        let mut p1 = segment[n];

        if point_equal([p0[0], p0[1]], [p1[0], p1[1]]) {
            if p0[2] == 0.0 && p1[2] == 0.0 {
                stream.line_start();
                for p in &segment[..n] {
                    stream.point(p[0], p[1], None);
                }
                stream.line_end();
                continue;
            }
            // degenerate: nudge the end so the two endpoints sort apart
            p1[0] += 2.0 * EPSILON;
            segment[n][0] = p1[0];
        }

        for (point, entry) in [(p0, true), (p1, false)] {
            let s = nodes.len();
            nodes.push(Intersection {
                x: [point[0], point[1]],
                segment: Some(index),
                other: s + 1,
                entry,
                visited: false,
                next: s,
                previous: s,
            });
            nodes.push(Intersection {
                x: [point[0], point[1]],
                segment: None,
                other: s,
                entry: !entry,
                visited: false,
                next: s + 1,
                previous: s + 1,
            });
            subject.push(s);
            clip.push(s + 1);
        }
    }

    if subject.is_empty() {
        return;
    }
    trace!(
        "rejoining {} fragments, start inside: {}",
        subject.len() / 2,
        start_inside
    );

    clip.sort_by(|&a, &b| {
        let d = compare(nodes[a].x, nodes[b].x);
        if d < 0.0 {
            Ordering::Less
        } else if d > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });
    link(&mut nodes, &subject);
    link(&mut nodes, &clip);

    let mut inside = start_inside;
    for &id in &clip {
        inside = !inside;
        nodes[id].entry = inside;
    }

    let start = subject[0];
    loop {
        // first unvisited intersection
        let mut current = start;
        while nodes[current].visited {
            current = nodes[current].next;
            if current == start {
                return;
            }
        }
        let mut points = nodes[current].segment;
        let mut is_subject = true;
        stream.line_start();
        loop {
            let other = nodes[current].other;
            nodes[current].visited = true;
            nodes[other].visited = true;
            if nodes[current].entry {
                if is_subject {
                    if let Some(s) = points {
                        for p in &segments[s] {
                            stream.point(p[0], p[1], None);
                        }
                    }
                } else {
                    let next = nodes[current].next;
                    interpolate(nodes[current].x, nodes[next].x, 1.0, &mut *stream);
                }
                current = nodes[current].next;
            } else {
                if is_subject {
                    let previous = nodes[current].previous;
                    points = nodes[previous].segment;
                    if let Some(s) = points {
                        for p in segments[s].iter().rev() {
                            stream.point(p[0], p[1], None);
                        }
                    }
                } else {
                    let previous = nodes[current].previous;
                    interpolate(nodes[current].x, nodes[previous].x, -1.0, &mut *stream);
                }
                current = nodes[current].previous;
            }
            current = nodes[current].other;
            points = nodes[current].segment;
            is_subject = !is_subject;
            if nodes[current].visited {
                break;
            }
        }
        stream.line_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::tests::Recorder;

    fn no_interpolation(_: [f64; 2], _: [f64; 2], _: f64, _: &mut dyn Stream) {}

    #[test]
    fn closed_fragment_is_emitted_as_is() {
        let mut rec = Recorder::default();
        let segment = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
        rejoin(
            vec![segment],
            |a, b| a[0] - b[0],
            false,
            no_interpolation,
            &mut rec,
        );
        assert_eq!(
            rec.events,
            vec!["line_start", "point 0 0", "point 1 0", "point 1 1", "line_end"]
        );
    }

    #[test]
    fn fragments_are_joined_along_the_boundary() {
        // Two arcs cut by a boundary along y = 0, ordered by x.
        let mut rec = Recorder::default();
        let a = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [2.0, 0.0, 0.0]];
        let b = vec![[3.0, 0.0, 0.0], [4.0, 1.0, 0.0], [5.0, 0.0, 0.0]];
        rejoin(
            vec![a, b],
            |a, b| a[0] - b[0],
            true,
            |from, to, _direction, stream| {
                stream.point((from[0] + to[0]) / 2.0, -1.0, None);
            },
            &mut rec,
        );
        assert_eq!(
            rec.events,
            vec![
                "line_start",
                "point 0 0",
                "point 1 1",
                "point 2 0",
                "point 2.5 -1",
                "point 3 0",
                "point 4 1",
                "point 5 0",
                "point 2.5 -1",
                "line_end"
            ]
        );
    }

    #[test]
    fn empty_input_emits_nothing() {
        let mut rec = Recorder::default();
        rejoin(vec![vec![[1.0, 1.0, 0.0]]], |a, b| a[0] - b[0], true, no_interpolation, &mut rec);
        assert!(rec.events.is_empty());
    }
}
