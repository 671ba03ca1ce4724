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

//! Readers for the members of GeoJSON-like objects.

use crate::json::{JsonObject, JsonValue};
use crate::{Error, Feature, Geometry};

pub fn expect_type(object: &mut JsonObject) -> Result<String, Error> {
    match expect_property(object, "type")? {
        JsonValue::String(s) => Ok(s),
        _ => Err(Error::ExpectedStringValue),
    }
}

fn expect_property(object: &mut JsonObject, name: &'static str) -> Result<JsonValue, Error> {
    object
        .remove(name)
        .ok_or_else(|| Error::ExpectedProperty(name.to_string()))
}

/// Nested coordinate arrays of any depth, down to single numbers.
pub trait Coordinates: Sized {
    fn from_json(json: &JsonValue) -> Result<Self, Error>;
}

impl Coordinates for f64 {
    fn from_json(json: &JsonValue) -> Result<Self, Error> {
        json.as_f64().ok_or(Error::ExpectedF64Value)
    }
}

impl<T: Coordinates> Coordinates for Vec<T> {
    fn from_json(json: &JsonValue) -> Result<Self, Error> {
        json.as_array()
            .ok_or(Error::ExpectedArrayValue)?
            .iter()
            .map(T::from_json)
            .collect()
    }
}

/// Read the "coordinates" member at the depth the caller asks for: a
/// `Position` for a Point, `Vec<Vec<Position>>` for a Polygon, and so on.
pub fn coordinates<T: Coordinates>(object: &mut JsonObject) -> Result<T, Error> {
    T::from_json(&expect_property(object, "coordinates")?)
}

/// The members of a GeometryCollection.
pub fn geometries(object: &mut JsonObject) -> Result<Vec<Geometry>, Error> {
    owned_array(expect_property(object, "geometries")?)?
        .into_iter()
        .map(Geometry::from_json_value)
        .collect()
}

/// The members of a FeatureCollection.
pub fn features(object: &mut JsonObject) -> Result<Vec<Feature>, Error> {
    owned_array(expect_property(object, "features")?)?
        .into_iter()
        .map(|json| match json {
            JsonValue::Object(o) => Feature::from_json_object(o),
            _ => Err(Error::ExpectedObjectValue),
        })
        .collect()
}

pub fn id(object: &mut JsonObject) -> Option<JsonValue> {
    object.remove("id")
}

/// A missing or `null` "properties" member is `None`; anything but an
/// object is an error.
pub fn properties(object: &mut JsonObject) -> Result<Option<JsonObject>, Error> {
    match object.remove("properties") {
        Some(JsonValue::Object(properties)) => Ok(Some(properties)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(Error::PropertiesExpectedObjectOrNull),
    }
}

fn owned_array(value: JsonValue) -> Result<Vec<JsonValue>, Error> {
    match value {
        JsonValue::Array(v) => Ok(v),
        _ => Err(Error::ExpectedArrayValue),
    }
}
