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

//! Conversions from the `geojson` crate types, so that parsed GeoJSON can
//! be streamed without a round trip through text.

use geojson::feature::Id;
use geojson::{
    Feature as GeoJsonFeature, FeatureCollection, GeoJson, Geometry as GeoJsonGeometry,
    Value as GeoJsonGeomValue,
};

use crate::json::JsonValue;
use crate::{Feature, GeoObject, Geometry};

impl<'a> From<&'a GeoJsonGeomValue> for Geometry {
    fn from(value: &'a GeoJsonGeomValue) -> Self {
        match *value {
            GeoJsonGeomValue::Point(ref p) => Geometry::Point(p.clone()),
            GeoJsonGeomValue::MultiPoint(ref p) => Geometry::MultiPoint(p.clone()),
            GeoJsonGeomValue::LineString(ref p) => Geometry::LineString(p.clone()),
            GeoJsonGeomValue::MultiLineString(ref p) => Geometry::MultiLineString(p.clone()),
            GeoJsonGeomValue::Polygon(ref p) => Geometry::Polygon(p.clone()),
            GeoJsonGeomValue::MultiPolygon(ref p) => Geometry::MultiPolygon(p.clone()),
            GeoJsonGeomValue::GeometryCollection(ref geometries) => {
                Geometry::GeometryCollection(geometries.iter().map(Geometry::from).collect())
            }
        }
    }
}

impl<'a> From<&'a GeoJsonGeometry> for Geometry {
    fn from(geometry: &'a GeoJsonGeometry) -> Self {
        Geometry::from(&geometry.value)
    }
}

fn id_to_json(id: &Id) -> JsonValue {
    match *id {
        Id::String(ref s) => JsonValue::String(s.clone()),
        Id::Number(ref n) => JsonValue::Number(n.clone()),
    }
}

impl<'a> From<&'a GeoJsonFeature> for Feature {
    fn from(feature: &'a GeoJsonFeature) -> Self {
        Feature {
            geometry: feature.geometry.as_ref().map(Geometry::from),
            properties: feature.properties.clone(),
            id: feature.id.as_ref().map(id_to_json),
        }
    }
}

impl<'a> From<&'a FeatureCollection> for GeoObject {
    fn from(collection: &'a FeatureCollection) -> Self {
        GeoObject::FeatureCollection(collection.features.iter().map(Feature::from).collect())
    }
}

impl<'a> From<&'a GeoJson> for GeoObject {
    fn from(geojson: &'a GeoJson) -> Self {
        match *geojson {
            GeoJson::Geometry(ref g) => GeoObject::Geometry(Geometry::from(g)),
            GeoJson::Feature(ref f) => GeoObject::Feature(Feature::from(f)),
            GeoJson::FeatureCollection(ref fc) => GeoObject::from(fc),
        }
    }
}

#[cfg(test)]
mod tests {
    use geojson::GeoJson;

    use crate::{Feature, GeoObject, Geometry};

    #[test]
    fn geojson_feature_collection() {
        let geojson_str = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "a", "properties": null,
                 "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [10.0, 5.0]]}},
                {"type": "Feature", "properties": null, "geometry": null}
            ]
        }"#;
        let geojson: GeoJson = geojson_str.parse().unwrap();
        let object = GeoObject::from(&geojson);

        let mut first = Feature::new(Some(Geometry::LineString(vec![
            vec![0.0, 0.0],
            vec![10.0, 5.0],
        ])));
        first.id = Some(serde_json::Value::String("a".into()));
        assert_eq!(
            object,
            GeoObject::FeatureCollection(vec![first, Feature::new(None)])
        );
    }

    #[test]
    fn geojson_geometry_collection() {
        let geojson: GeoJson = r#"{"type": "GeometryCollection", "geometries": [
                {"type": "Point", "coordinates": [1.0, 2.0]},
                {"type": "MultiPolygon", "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]]}
            ]}"#
        .parse()
        .unwrap();
        let object = GeoObject::from(&geojson);
        assert_eq!(
            object,
            GeoObject::Geometry(Geometry::GeometryCollection(vec![
                Geometry::Point(vec![1.0, 2.0]),
                Geometry::MultiPolygon(vec![vec![vec![
                    vec![0.0, 0.0],
                    vec![1.0, 0.0],
                    vec![1.0, 1.0],
                    vec![0.0, 0.0]
                ]]]),
            ]))
        );
    }
}
