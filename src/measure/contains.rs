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
use crate::math::EPSILON2;
use crate::measure::distance;
use crate::polygon_contains::polygon_contains;
use crate::Position;

/// Whether `object` contains the `[longitude, latitude]` point (degrees).
///
/// Points and lines contain a point only if it lies on them (within a
/// tiny tolerance along lines). Polygons use spherical containment, so a
/// ring's winding decides which side is inside. The sphere contains
/// everything; unknown geometry contains nothing.
pub fn contains(object: &GeoObject, point: [f64; 2]) -> bool {
    match object {
        GeoObject::Geometry(geometry) => contains_geometry(geometry, point),
        GeoObject::Feature(feature) => feature
            .geometry
            .as_ref()
            .map_or(false, |g| contains_geometry(g, point)),
        GeoObject::FeatureCollection(features) => features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .any(|g| contains_geometry(g, point)),
    }
}

fn contains_geometry(geometry: &Geometry, point: [f64; 2]) -> bool {
    match geometry {
        Geometry::Sphere => true,
        Geometry::Point(p) => contains_point(p, point),
        Geometry::MultiPoint(points) => points.iter().any(|p| contains_point(p, point)),
        Geometry::LineString(line) => contains_line(line, point),
        Geometry::MultiLineString(lines) => lines.iter().any(|l| contains_line(l, point)),
        Geometry::Polygon(rings) => contains_polygon(rings, point),
        Geometry::MultiPolygon(polygons) => polygons.iter().any(|r| contains_polygon(r, point)),
        Geometry::GeometryCollection(geometries) => {
            geometries.iter().any(|g| contains_geometry(g, point))
        }
        Geometry::Unknown => false,
    }
}

fn xy(p: &Position) -> [f64; 2] {
    [
        p.first().copied().unwrap_or(f64::NAN),
        p.get(1).copied().unwrap_or(f64::NAN),
    ]
}

fn contains_point(coordinates: &Position, point: [f64; 2]) -> bool {
    distance(xy(coordinates), point) == 0.0
}

fn contains_line(coordinates: &[Position], point: [f64; 2]) -> bool {
    let mut ao = f64::NAN;
    for (i, p) in coordinates.iter().enumerate() {
        let bo = distance(xy(p), point);
        if bo == 0.0 {
            return true;
        }
        if i > 0 {
            let ab = distance(xy(p), xy(&coordinates[i - 1]));
            // the point is on the segment when going through it adds
            // (almost) nothing to the segment length
            if ab > 0.0
                && ao <= ab
                && bo <= ab
                && (ao + bo - ab) * (1.0 - ((ao - bo) / ab).powi(2)) < EPSILON2 * ab
            {
                return true;
            }
        }
        ao = bo;
    }
    false
}

fn contains_polygon(rings: &[Vec<Position>], point: [f64; 2]) -> bool {
    let rings: Vec<Vec<[f64; 2]>> = rings
        .iter()
        .map(|ring| {
            let n = ring.len().saturating_sub(1);
            ring[..n].iter().map(|p| radians(xy(p))).collect()
        })
        .collect();
    polygon_contains(&rings, radians(point))
}

fn radians(p: [f64; 2]) -> [f64; 2] {
    [p[0].to_radians(), p[1].to_radians()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circle::GeoCircle;
    use crate::interpolate::GeoInterpolate;

    fn parse(json: &str) -> GeoObject {
        json.parse().unwrap()
    }

    fn ring(circle: GeoCircle) -> Vec<Position> {
        match circle.circle() {
            Geometry::Polygon(mut rings) => rings.remove(0),
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn sphere_contains_everything() {
        assert!(contains(&parse(r#"{"type":"Sphere"}"#), [0.0, 0.0]));
    }

    #[test]
    fn points_contain_only_themselves() {
        let point = parse(r#"{"type":"Point","coordinates":[1,2]}"#);
        assert!(contains(&point, [1.0, 2.0]));
        assert!(!contains(&point, [1.0, 3.0]));
        let multi = parse(r#"{"type":"MultiPoint","coordinates":[[0,0],[1,2]]}"#);
        assert!(contains(&multi, [0.0, 0.0]));
        assert!(contains(&multi, [1.0, 2.0]));
        assert!(!contains(&multi, [1.0, 3.0]));
    }

    #[test]
    fn lines_contain_points_along_their_arcs() {
        let line = parse(r#"{"type":"LineString","coordinates":[[0,0],[1,2]]}"#);
        let along = GeoInterpolate::new([0.0, 0.0], [1.0, 2.0]);
        assert!(contains(&line, [0.0, 0.0]));
        assert!(contains(&line, [1.0, 2.0]));
        assert!(contains(&line, along.at(0.3)));
        assert!(!contains(&line, along.at(1.3)));
        assert!(!contains(&line, along.at(-0.3)));
    }

    #[test]
    fn line_tolerance_is_tiny() {
        let line = parse(r#"{"type":"LineString","coordinates":[[0,0],[0,10],[10,10],[10,0]]}"#);
        for p in [[0.0, 5.0], [1e-6, 5.0], [0.0, 1e-6], [1e-6, 1e-6]] {
            assert!(contains(&line, p), "{:?}", p);
        }
        for p in [[1e-5, 5.0], [1e-5, 1e-6]] {
            assert!(!contains(&line, p), "{:?}", p);
        }
    }

    #[test]
    fn polygons_with_holes() {
        let outer = ring(GeoCircle::new().radius(60.0));
        let inner = ring(GeoCircle::new().radius(3.0));
        let disc = GeoObject::Geometry(Geometry::Polygon(vec![outer.clone()]));
        assert!(contains(&disc, [1.0, 1.0]));
        assert!(!contains(&disc, [-180.0, 0.0]));

        let annulus = GeoObject::Geometry(Geometry::Polygon(vec![outer, inner]));
        assert!(!contains(&annulus, [1.0, 1.0]));
        assert!(contains(&annulus, [5.0, 0.0]));
        assert!(!contains(&annulus, [65.0, 0.0]));
    }

    #[test]
    fn multi_polygons() {
        let a = vec![ring(GeoCircle::new().radius(6.0))];
        let b = vec![ring(GeoCircle::new().radius(6.0).center([90.0, 0.0]))];
        let polygons = GeoObject::Geometry(Geometry::MultiPolygon(vec![a, b]));
        assert!(contains(&polygons, [1.0, 0.0]));
        assert!(contains(&polygons, [90.0, 1.0]));
        assert!(!contains(&polygons, [90.0, 45.0]));
    }

    #[test]
    fn collections_and_features() {
        let collection = parse(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":null,
                 "geometry":{"type":"LineString","coordinates":[[0,0],[45,0]]}},
                {"type":"Feature","properties":null,
                 "geometry":{"type":"GeometryCollection","geometries":[
                    {"type":"LineString","coordinates":[[-45,0],[0,0]]}
                 ]}}
            ]}"#,
        );
        assert!(contains(&collection, [45.0, 0.0]));
        assert!(contains(&collection, [-45.0, 0.0]));
        assert!(!contains(&collection, [12.0, 25.0]));

        let empty = parse(r#"{"type":"Feature","geometry":null,"properties":null}"#);
        assert!(!contains(&empty, [0.0, 0.0]));
    }
}
