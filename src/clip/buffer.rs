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

use std::mem;

use crate::stream::Stream;

/// A clipped fragment: points with their boundary tag in the third slot.
pub type Segment = Vec<[f64; 3]>;

/// Stream sink collecting the fragments of one clipped ring.
#[derive(Debug, Default)]
pub struct ClipBuffer {
    lines: Vec<Segment>,
}

impl ClipBuffer {
    pub fn new() -> Self {
        ClipBuffer::default()
    }

    /// Join the last fragment with the first when the ring started inside,
    /// so the fragment crossing the ring's start point is not split.
    pub fn rejoin(&mut self) {
        if self.lines.len() > 1 {
            if let Some(mut last) = self.lines.pop() {
                let first = self.lines.remove(0);
                last.extend(first);
                self.lines.push(last);
            }
        }
    }

    pub fn take(&mut self) -> Vec<Segment> {
        mem::take(&mut self.lines)
    }
}

impl Stream for ClipBuffer {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        if let Some(line) = self.lines.last_mut() {
            line.push([x, y, m.unwrap_or(0.0)]);
        }
    }

    fn line_start(&mut self) {
        self.lines.push(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejoin_moves_first_fragment_after_last() {
        let mut buffer = ClipBuffer::new();
        buffer.line_start();
        buffer.point(1.0, 1.0, None);
        buffer.line_start();
        buffer.point(2.0, 2.0, Some(2.0));
        buffer.line_start();
        buffer.point(3.0, 3.0, None);
        buffer.rejoin();
        assert_eq!(
            buffer.take(),
            vec![
                vec![[2.0, 2.0, 2.0]],
                vec![[3.0, 3.0, 0.0], [1.0, 1.0, 0.0]]
            ]
        );
        assert!(buffer.take().is_empty());
    }
}
