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

use std::fmt;
use std::str::FromStr;

use crate::json::{Deserialize, Deserializer, JsonObject, JsonValue, Serialize, Serializer};
use crate::{util, Error, Position};

/// Geometry in spherical coordinates (degrees).
///
/// `Sphere` stands for the whole globe. `Unknown` is what an unrecognised
/// `type` (or a JSON `null` geometry) parses to; streaming it is a no-op.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    /// Rings are closed: the last position repeats the first.
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
    GeometryCollection(Vec<Geometry>),
    Sphere,
    Unknown,
}

/// A geometry with its properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Option<JsonObject>,
    pub id: Option<JsonValue>,
}

impl Feature {
    pub fn new(geometry: Option<Geometry>) -> Self {
        Feature {
            geometry,
            properties: None,
            id: None,
        }
    }
}

/// Anything that can be streamed.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoObject {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(Vec<Feature>),
}

impl From<Geometry> for GeoObject {
    fn from(geometry: Geometry) -> Self {
        GeoObject::Geometry(geometry)
    }
}

impl From<Feature> for GeoObject {
    fn from(feature: Feature) -> Self {
        GeoObject::Feature(feature)
    }
}

#[derive(PartialEq, Clone, Copy)]
enum Type {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Sphere,
    Feature,
    FeatureCollection,
}

impl Type {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "Point" => Some(Type::Point),
            "MultiPoint" => Some(Type::MultiPoint),
            "LineString" => Some(Type::LineString),
            "MultiLineString" => Some(Type::MultiLineString),
            "Polygon" => Some(Type::Polygon),
            "MultiPolygon" => Some(Type::MultiPolygon),
            "GeometryCollection" => Some(Type::GeometryCollection),
            "Sphere" => Some(Type::Sphere),
            "Feature" => Some(Type::Feature),
            "FeatureCollection" => Some(Type::FeatureCollection),
            _ => None,
        }
    }
}

impl Geometry {
    fn type_name(&self) -> Option<&'static str> {
        Some(match *self {
            Geometry::Point(..) => "Point",
            Geometry::MultiPoint(..) => "MultiPoint",
            Geometry::LineString(..) => "LineString",
            Geometry::MultiLineString(..) => "MultiLineString",
            Geometry::Polygon(..) => "Polygon",
            Geometry::MultiPolygon(..) => "MultiPolygon",
            Geometry::GeometryCollection(..) => "GeometryCollection",
            Geometry::Sphere => "Sphere",
            Geometry::Unknown => return None,
        })
    }

    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        let type_ = match Type::from_str(&util::expect_type(&mut object)?) {
            Some(t) => t,
            None => return Ok(Geometry::Unknown),
        };
        Ok(match type_ {
            Type::Point => Geometry::Point(util::coordinates(&mut object)?),
            Type::MultiPoint => Geometry::MultiPoint(util::coordinates(&mut object)?),
            Type::LineString => Geometry::LineString(util::coordinates(&mut object)?),
            Type::MultiLineString => {
                Geometry::MultiLineString(util::coordinates(&mut object)?)
            }
            Type::Polygon => Geometry::Polygon(util::coordinates(&mut object)?),
            Type::MultiPolygon => Geometry::MultiPolygon(util::coordinates(&mut object)?),
            Type::GeometryCollection => {
                Geometry::GeometryCollection(util::geometries(&mut object)?)
            }
            Type::Sphere => Geometry::Sphere,
            // a feature where a geometry is expected is not a geometry
            Type::Feature | Type::FeatureCollection => Geometry::Unknown,
        })
    }

    /// `null` and non-object values are unknown geometry.
    pub fn from_json_value(value: JsonValue) -> Result<Self, Error> {
        match value {
            JsonValue::Object(object) => Geometry::from_json_object(object),
            _ => Ok(Geometry::Unknown),
        }
    }

    pub fn to_json_value(&self) -> JsonValue {
        let ty = match self.type_name() {
            Some(ty) => ty,
            None => return JsonValue::Null,
        };
        let mut map = JsonObject::new();
        map.insert(String::from("type"), JsonValue::from(ty));
        let coordinates = match *self {
            Geometry::Point(ref p) => positions_to_json(p),
            Geometry::MultiPoint(ref p) | Geometry::LineString(ref p) => positions_to_json(p),
            Geometry::MultiLineString(ref p) | Geometry::Polygon(ref p) => positions_to_json(p),
            Geometry::MultiPolygon(ref p) => positions_to_json(p),
            Geometry::GeometryCollection(ref geometries) => {
                let geometries = geometries.iter().map(Geometry::to_json_value).collect();
                map.insert(String::from("geometries"), JsonValue::Array(geometries));
                return JsonValue::Object(map);
            }
            Geometry::Sphere | Geometry::Unknown => return JsonValue::Object(map),
        };
        map.insert(String::from("coordinates"), coordinates);
        JsonValue::Object(map)
    }
}

fn positions_to_json<T: Serialize>(coordinates: &T) -> JsonValue {
    // vectors of finite and non-finite f64 always serialize to a value
    serde_json::to_value(coordinates).unwrap_or(JsonValue::Null)
}

impl Feature {
    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        let geometry = match object.remove("geometry") {
            Some(JsonValue::Null) | None => None,
            Some(value) => Some(Geometry::from_json_value(value)?),
        };
        Ok(Feature {
            geometry,
            properties: util::properties(&mut object)?,
            id: util::id(&mut object),
        })
    }

    pub fn to_json_value(&self) -> JsonValue {
        let mut map = JsonObject::new();
        map.insert(String::from("type"), JsonValue::from("Feature"));
        map.insert(
            String::from("geometry"),
            self.geometry
                .as_ref()
                .map_or(JsonValue::Null, Geometry::to_json_value),
        );
        map.insert(
            String::from("properties"),
            self.properties
                .clone()
                .map_or(JsonValue::Null, JsonValue::Object),
        );
        if let Some(ref id) = self.id {
            map.insert(String::from("id"), id.clone());
        }
        JsonValue::Object(map)
    }
}

impl GeoObject {
    pub fn from_json_object(mut object: JsonObject) -> Result<Self, Error> {
        let type_ = match object.get("type") {
            Some(JsonValue::String(t)) => Type::from_str(t),
            _ => return Err(Error::ExpectedProperty("type".to_owned())),
        };
        match type_ {
            Some(Type::Feature) => Feature::from_json_object(object).map(GeoObject::Feature),
            Some(Type::FeatureCollection) => Ok(GeoObject::FeatureCollection(
                util::features(&mut object)?,
            )),
            _ => Geometry::from_json_object(object).map(GeoObject::Geometry),
        }
    }

    pub fn to_json_value(&self) -> JsonValue {
        match *self {
            GeoObject::Geometry(ref g) => g.to_json_value(),
            GeoObject::Feature(ref f) => f.to_json_value(),
            GeoObject::FeatureCollection(ref features) => {
                let mut map = JsonObject::new();
                map.insert(String::from("type"), JsonValue::from("FeatureCollection"));
                map.insert(
                    String::from("features"),
                    JsonValue::Array(features.iter().map(Feature::to_json_value).collect()),
                );
                JsonValue::Object(map)
            }
        }
    }
}

impl Serialize for Geometry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D>(deserializer: D) -> Result<Geometry, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let val = JsonValue::deserialize(deserializer)?;

        Geometry::from_json_value(val).map_err(|e| D::Error::custom(e.to_string()))
    }
}

impl Serialize for GeoObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GeoObject {
    fn deserialize<D>(deserializer: D) -> Result<GeoObject, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as SerdeError;

        let val = JsonObject::deserialize(deserializer)?;

        GeoObject::from_json_object(val).map_err(|e| D::Error::custom(e.to_string()))
    }
}

impl FromStr for GeoObject {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let object = get_object(s)?;

        GeoObject::from_json_object(object)
    }
}

impl FromStr for Geometry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let object = get_object(s)?;

        Geometry::from_json_object(object)
    }
}

fn get_object(s: &str) -> Result<JsonObject, Error> {
    serde_json::from_str(s)
        .ok()
        .and_then(json_value_into_json_object)
        .ok_or(Error::MalformedJson)
}

fn json_value_into_json_object(json_value: JsonValue) -> Option<JsonObject> {
    if let JsonValue::Object(geo) = json_value {
        Some(geo)
    } else {
        None
    }
}

impl fmt::Display for GeoObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        serde_json::to_string(self)
            .map_err(|_| fmt::Error)
            .and_then(|s| f.write_str(&s))
    }
}

#[cfg(test)]
mod tests {
    use crate::json::JsonObject;
    use crate::{Error, Feature, GeoObject, Geometry};

    fn encode(object: &GeoObject) -> String {
        serde_json::to_string(&object).unwrap()
    }

    fn decode(json_string: &str) -> GeoObject {
        json_string.parse().unwrap()
    }

    #[test]
    fn decode_invalid_linestring() {
        let json_str = "{\"arcs\":[0],\"type\":\"LineString\"}";

        // Decode should fail due to the absence of the 'coordinates' member:
        let result = json_str.parse::<GeoObject>();
        assert_eq!(
            result,
            Err(Error::ExpectedProperty(String::from("coordinates")))
        );
    }

    #[test]
    fn decode_non_numeric_coordinates() {
        let result = "{\"coordinates\":[\"a\",1],\"type\":\"Point\"}".parse::<GeoObject>();
        assert_eq!(result, Err(Error::ExpectedF64Value));
    }

    #[test]
    fn decode_malformed_json() {
        assert_eq!("[1, 2".parse::<GeoObject>(), Err(Error::MalformedJson));
        assert_eq!("[1, 2]".parse::<GeoObject>(), Err(Error::MalformedJson));
    }

    #[test]
    fn unknown_type_is_not_an_error() {
        let decoded = decode("{\"type\":\"Curve\",\"coordinates\":[[0,0]]}");
        assert_eq!(decoded, GeoObject::Geometry(Geometry::Unknown));
    }

    #[test]
    fn encode_decode_point() {
        let json_str = "{\"coordinates\":[1.1,2.1],\"type\":\"Point\"}";
        let object = GeoObject::Geometry(Geometry::Point(vec![1.1, 2.1]));

        assert_eq!(encode(&object), json_str);
        assert_eq!(decode(json_str), object);
    }

    #[test]
    fn encode_decode_sphere() {
        let json_str = "{\"type\":\"Sphere\"}";
        let object = GeoObject::Geometry(Geometry::Sphere);

        assert_eq!(encode(&object), json_str);
        assert_eq!(decode(json_str), object);
    }

    #[test]
    fn decode_feature_with_properties() {
        let json_str = "{\"type\":\"Feature\",\"id\":7,\"properties\":{\"prop0\":0},\
                        \"geometry\":{\"type\":\"Polygon\",\"coordinates\":[[[0,0],[1,0],[1,1],[0,0]]]}}";
        let mut properties = JsonObject::new();
        properties.insert(String::from("prop0"), serde_json::to_value(0).unwrap());
        let expected = GeoObject::Feature(Feature {
            geometry: Some(Geometry::Polygon(vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 0.0],
            ]])),
            properties: Some(properties),
            id: Some(serde_json::to_value(7).unwrap()),
        });
        assert_eq!(decode(json_str), expected);
    }

    #[test]
    fn decode_feature_collection_with_null_geometry() {
        let json_str = "{\"type\":\"FeatureCollection\",\"features\":[\
                        {\"type\":\"Feature\",\"geometry\":null,\"properties\":null},\
                        {\"type\":\"Feature\",\"geometry\":{\"type\":\"Sphere\"},\"properties\":null}]}";
        let expected = GeoObject::FeatureCollection(vec![
            Feature::new(None),
            Feature::new(Some(Geometry::Sphere)),
        ]);
        let decoded = decode(json_str);
        assert_eq!(decoded, expected);

        // Round trip through the encoder
        assert_eq!(decode(&encode(&decoded)), expected);
    }

    #[test]
    fn decode_geometry_collection_with_null_member() {
        let json_str = "{\"type\":\"GeometryCollection\",\"geometries\":[\
                        null,{\"type\":\"Point\",\"coordinates\":[100.0,0.0]}]}";
        let expected = GeoObject::Geometry(Geometry::GeometryCollection(vec![
            Geometry::Unknown,
            Geometry::Point(vec![100.0, 0.0]),
        ]));
        assert_eq!(decode(json_str), expected);
    }

    #[test]
    fn properties_must_be_object_or_null() {
        let json_str = "{\"type\":\"Feature\",\"geometry\":null,\"properties\":3}";
        assert_eq!(
            json_str.parse::<GeoObject>(),
            Err(Error::PropertiesExpectedObjectOrNull)
        );
    }
}
