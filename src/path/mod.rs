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

//! Planar sinks: SVG path data and planar measures.

mod area;
mod bounds;
mod centroid;
mod measure;
mod string;

pub use self::area::PathArea;
pub use self::bounds::PathBounds;
pub use self::centroid::PathCentroid;
pub use self::measure::PathMeasure;
pub use self::string::PathString;

use crate::geometry::GeoObject;
use crate::projection::GeoProjection;
use crate::stream::stream_object;
use crate::Extent;

/// A projection paired with a [`PathString`].
///
/// ```
/// use geostream::{GeoObject, GeoPath, Projection};
///
/// let object: GeoObject = r#"{"type":"Point","coordinates":[0,0]}"#.parse().unwrap();
/// let mut path = GeoPath::new(Projection::equirectangular());
/// assert_eq!(
///     path.path(&object).unwrap(),
///     "M480,250m0,4.5a4.5,4.5 0 1,1 0,-9a4.5,4.5 0 1,1 0,9z"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct GeoPath<P> {
    projection: P,
    context: PathString,
}

impl<P: GeoProjection> GeoPath<P> {
    pub fn new(projection: P) -> Self {
        GeoPath {
            projection,
            context: PathString::new(),
        }
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut P {
        &mut self.projection
    }

    /// The path builder, for digits and point radius.
    pub fn context_mut(&mut self) -> &mut PathString {
        &mut self.context
    }

    /// SVG path data for `object`, or `None` if nothing is visible.
    pub fn path(&mut self, object: &GeoObject) -> Option<String> {
        stream_object(object, &mut self.projection.stream(&mut self.context));
        self.context.result()
    }

    /// Planar bounding box of the projected `object`.
    pub fn bounds(&self, object: &GeoObject) -> Extent {
        let mut bounds = PathBounds::new();
        stream_object(object, &mut self.projection.stream(&mut bounds));
        bounds.result()
    }

    /// Planar area of the projected polygons in `object`.
    pub fn area(&self, object: &GeoObject) -> f64 {
        let mut area = PathArea::new();
        stream_object(object, &mut self.projection.stream(&mut area));
        area.result()
    }

    /// Planar length of the projected lines and rings in `object`.
    pub fn measure(&self, object: &GeoObject) -> f64 {
        let mut measure = PathMeasure::new();
        stream_object(object, &mut self.projection.stream(&mut measure));
        measure.result()
    }

    /// Planar centroid of the projected `object`, NaN if nothing is visible.
    pub fn centroid(&self, object: &GeoObject) -> [f64; 2] {
        let mut centroid = PathCentroid::new();
        stream_object(object, &mut self.projection.stream(&mut centroid));
        centroid.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::projection::IdentityProjection;

    #[test]
    fn identity_path_and_bounds() {
        let object: GeoObject = r#"{"type":"Polygon","coordinates":[[[0,0],[10,0],[10,10],[0,0]]]}"#
            .parse()
            .unwrap();
        let mut path = GeoPath::new(IdentityProjection::new());
        assert_eq!(path.path(&object).unwrap(), "M0,0L10,0L10,10Z");
        assert_eq!(path.bounds(&object), [[0.0, 0.0], [10.0, 10.0]]);
    }

    #[test]
    fn identity_measures() {
        let path = GeoPath::new(IdentityProjection::new());
        let line: GeoObject = r#"{"type":"LineString","coordinates":[[0,0],[0,1],[1,1],[1,0]]}"#
            .parse()
            .unwrap();
        assert_eq!(path.measure(&line), 3.0);
        assert_eq!(path.area(&line), 0.0);

        let holed: GeoObject = r#"{"type":"Polygon","coordinates":[
            [[-1,-1],[-1,2],[2,2],[2,-1],[-1,-1]],
            [[0,0],[1,0],[1,1],[0,1],[0,0]]
        ]}"#
        .parse()
        .unwrap();
        assert_eq!(path.measure(&holed), 16.0);
        assert_eq!(path.area(&holed), 8.0);

        let points: GeoObject = r#"{"type":"MultiPoint","coordinates":[[0,0],[0,1],[1,1],[1,0]]}"#
            .parse()
            .unwrap();
        assert_eq!(path.measure(&points), 0.0);
        assert_eq!(path.centroid(&points), [0.5, 0.5]);
    }

    #[test]
    fn nothing_visible_is_none() {
        let mut path = GeoPath::new(IdentityProjection::new());
        assert_eq!(path.path(&GeoObject::Geometry(Geometry::Unknown)), None);
        path.projection_mut()
            .set_clip_extent(Some([[100.0, 100.0], [200.0, 200.0]]));
        let object: GeoObject = r#"{"type":"Point","coordinates":[0,0]}"#.parse().unwrap();
        assert_eq!(path.path(&object), None);
    }
}
