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

//! Spherical projections and geometry streams.
//!
//! Geometry is pushed point by point through a chain of stream stages:
//! degrees to radians, spherical rotation, a spherical pre-clip
//! (antimeridian cut or small-circle horizon), adaptive resampling into the
//! plane, a rectangular post-clip, and finally a sink such as
//! [`PathString`].
//!
//! ```
//! use geostream::{stream_object, GeoObject, PathString, Projection};
//!
//! let object: GeoObject = r#"{"type":"LineString","coordinates":[[0,0],[10,10]]}"#
//!     .parse()
//!     .unwrap();
//! let projection = Projection::equirectangular();
//! let mut path = PathString::new();
//! stream_object(&object, &mut projection.stream(&mut path));
//! assert!(path.result().is_some());
//! ```

/// Position (longitude, latitude and an optional third value)
pub type Position = Vec<f64>;

/// A planar rectangle given as `[[x0, y0], [x1, y1]]`.
pub type Extent = [[f64; 2]; 2];

mod json {
    pub use serde::{Deserialize, Deserializer, Serialize, Serializer};
    pub use serde_json::{Map, Value as JsonValue};
    pub type JsonObject = Map<String, JsonValue>;
}

mod circle;
pub mod clip;
mod error;
mod from_geojson;
mod geometry;
mod graticule;
mod interpolate;
mod math;
pub mod measure;
pub mod path;
mod polygon_contains;
pub mod projection;
mod rotation;
mod stream;
mod util;

pub use crate::circle::{circle_stream, GeoCircle};
pub use crate::clip::{ClipAntimeridian, ClipCircle, ClipRectangle, StreamTransform};
pub use crate::error::Error;
pub use crate::geometry::{Feature, GeoObject, Geometry};
pub use crate::graticule::{graticule_10, Graticule};
pub use crate::interpolate::GeoInterpolate;
pub use crate::measure::{
    area, bounds, centroid, contains, distance, length, AreaStream, BoundsStream, CentroidStream,
    LengthStream,
};
pub use crate::path::{GeoPath, PathArea, PathBounds, PathCentroid, PathMeasure, PathString};
pub use crate::polygon_contains::polygon_contains;
pub use crate::projection::{
    AlbersUsa, Azimuthal, ConicConformal, ConicEqualArea, ConicEquidistant, ConicFamily,
    CylindricalEqualArea, EqualEarth, Equirectangular, GeoProjection, IdentityProjection,
    Mercator, NaturalEarth1, Projection, RawProjection, TransverseMercator,
};
pub use crate::rotation::{RotateRadians, Rotation};
pub use crate::stream::{stream_geometry, stream_object, PointMap, Stream};
