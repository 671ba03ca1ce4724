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

use crate::geometry::{GeoObject, Geometry};
use crate::Position;

/// Receiver of geometry events.
///
/// A line is `line_start`, any number of `point`s, `line_end`. A polygon is
/// `polygon_start`, one line per ring (without the closing coordinate),
/// `polygon_end`. `m` carries a third coordinate when the input has one;
/// inside the clip stages it carries the boundary tag of a point.
pub trait Stream {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>);
    fn line_start(&mut self) {}
    fn line_end(&mut self) {}
    fn polygon_start(&mut self) {}
    fn polygon_end(&mut self) {}
    fn sphere(&mut self) {}
}

impl<S: Stream + ?Sized> Stream for &mut S {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        (**self).point(x, y, m)
    }
    fn line_start(&mut self) {
        (**self).line_start()
    }
    fn line_end(&mut self) {
        (**self).line_end()
    }
    fn polygon_start(&mut self) {
        (**self).polygon_start()
    }
    fn polygon_end(&mut self) {
        (**self).polygon_end()
    }
    fn sphere(&mut self) {
        (**self).sphere()
    }
}

impl<S: Stream + ?Sized> Stream for Box<S> {
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        (**self).point(x, y, m)
    }
    fn line_start(&mut self) {
        (**self).line_start()
    }
    fn line_end(&mut self) {
        (**self).line_end()
    }
    fn polygon_start(&mut self) {
        (**self).polygon_start()
    }
    fn polygon_end(&mut self) {
        (**self).polygon_end()
    }
    fn sphere(&mut self) {
        (**self).sphere()
    }
}

/// Stream stage applying a point transform and forwarding everything else.
pub struct PointMap<F, S> {
    map: F,
    sink: S,
}

impl<F, S> PointMap<F, S>
where
    F: FnMut(f64, f64) -> [f64; 2],
    S: Stream,
{
    pub fn new(map: F, sink: S) -> Self {
        PointMap { map, sink }
    }
}

impl<F, S> Stream for PointMap<F, S>
where
    F: FnMut(f64, f64) -> [f64; 2],
    S: Stream,
{
    fn point(&mut self, x: f64, y: f64, m: Option<f64>) {
        let [x, y] = (self.map)(x, y);
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

/// Stream a geometry, feature or feature collection.
///
/// Features without geometry and unknown geometry types produce no events.
pub fn stream_object<S: Stream + ?Sized>(object: &GeoObject, stream: &mut S) {
    match object {
        GeoObject::Geometry(geometry) => stream_geometry(geometry, stream),
        GeoObject::Feature(feature) => {
            if let Some(ref geometry) = feature.geometry {
                stream_geometry(geometry, stream);
            }
        }
        GeoObject::FeatureCollection(features) => {
            for geometry in features.iter().filter_map(|f| f.geometry.as_ref()) {
                stream_geometry(geometry, stream);
            }
        }
    }
}

/// Stream a single geometry.
pub fn stream_geometry<S: Stream + ?Sized>(geometry: &Geometry, stream: &mut S) {
    match geometry {
        Geometry::Point(p) => stream_point(p, stream),
        Geometry::MultiPoint(points) => {
            for p in points {
                stream_point(p, stream);
            }
        }
        Geometry::LineString(line) => stream_line(line, stream, false),
        Geometry::MultiLineString(lines) => {
            for line in lines {
                stream_line(line, stream, false);
            }
        }
        Geometry::Polygon(rings) => stream_polygon(rings, stream),
        Geometry::MultiPolygon(polygons) => {
            for rings in polygons {
                stream_polygon(rings, stream);
            }
        }
        Geometry::GeometryCollection(geometries) => {
            for g in geometries {
                stream_geometry(g, stream);
            }
        }
        Geometry::Sphere => stream.sphere(),
        Geometry::Unknown => {}
    }
}

fn stream_point<S: Stream + ?Sized>(p: &Position, stream: &mut S) {
    let x = p.first().copied().unwrap_or(f64::NAN);
    let y = p.get(1).copied().unwrap_or(f64::NAN);
    stream.point(x, y, p.get(2).copied());
}

fn stream_line<S: Stream + ?Sized>(coordinates: &[Position], stream: &mut S, closed: bool) {
    // a ring repeats its first coordinate at the end, which is not streamed
    let n = if closed {
        coordinates.len().saturating_sub(1)
    } else {
        coordinates.len()
    };
    stream.line_start();
    for p in &coordinates[..n] {
        stream_point(p, stream);
    }
    stream.line_end();
}

fn stream_polygon<S: Stream + ?Sized>(rings: &[Vec<Position>], stream: &mut S) {
    stream.polygon_start();
    for ring in rings {
        stream_line(ring, stream, true);
    }
    stream.polygon_end();
}
