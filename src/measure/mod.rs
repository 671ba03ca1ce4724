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

//! Spherical measures of geometry given in degrees.

mod area;
mod bounds;
mod centroid;
mod contains;
mod length;

pub use self::area::AreaStream;
pub use self::bounds::BoundsStream;
pub use self::centroid::CentroidStream;
pub use self::contains::contains;
pub use self::length::{distance, LengthStream};

use crate::geometry::GeoObject;
use crate::stream::stream_object;
use crate::Extent;

/// Spherical area of `object` in steradians.
pub fn area(object: &GeoObject) -> f64 {
    let mut area = AreaStream::new();
    stream_object(object, &mut area);
    area.result()
}

/// Spherical bounding box `[[west, south], [east, north]]` in degrees.
///
/// `west > east` when the box crosses the antimeridian.
pub fn bounds(object: &GeoObject) -> Extent {
    let mut bounds = BoundsStream::new();
    stream_object(object, &mut bounds);
    bounds.result()
}

/// Spherical centroid `[longitude, latitude]` in degrees.
pub fn centroid(object: &GeoObject) -> [f64; 2] {
    let mut centroid = CentroidStream::new();
    stream_object(object, &mut centroid);
    centroid.result()
}

/// Great-arc length of the lines and rings in `object`, in radians.
pub fn length(object: &GeoObject) -> f64 {
    let mut length = LengthStream::new();
    stream_object(object, &mut length);
    length.result()
}
