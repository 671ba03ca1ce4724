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

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use geostream::{
    stream_object, AlbersUsa, Error, GeoObject, GeoPath, Geometry, IdentityProjection,
    PathString, Projection, Stream,
};

/// Collects the planar lines a projection emits.
#[derive(Default)]
struct Lines {
    lines: Vec<Vec<[f64; 2]>>,
    in_line: bool,
}

impl Stream for Lines {
    fn point(&mut self, x: f64, y: f64, _m: Option<f64>) {
        if self.in_line {
            if let Some(line) = self.lines.last_mut() {
                line.push([x, y]);
            }
        }
    }
    fn line_start(&mut self) {
        self.in_line = true;
        self.lines.push(Vec::new());
    }
    fn line_end(&mut self) {
        self.in_line = false;
    }
}

fn parse(json: &str) -> GeoObject {
    json.parse().unwrap()
}

fn sphere() -> GeoObject {
    GeoObject::Geometry(Geometry::Sphere)
}

#[test]
fn sphere_outline_in_equirectangular() {
    let mut projection = Projection::equirectangular();
    projection.set_scale(900.0 / PI).set_precision(0.0).unwrap();
    let mut path = PathString::new();
    stream_object(&sphere(), &mut projection.stream(&mut path));
    assert_eq!(
        path.result().unwrap(),
        "M-420,-200L480,-200L1380,-200L1380,250L1380,700L480,700L-420,700L-420,250L-420,-200Z"
    );
}

fn sphere_path(projection: &Projection) -> String {
    let mut path = PathString::new();
    path.set_digits(Some(6.0)).unwrap();
    stream_object(&sphere(), &mut projection.stream(&mut path));
    path.result().unwrap()
}

#[test]
fn mercator_sphere_outline_has_no_nan() {
    let mut projection = Projection::mercator();
    projection
        .set_translate([0.0, 0.0])
        .set_scale(1.0)
        .set_clip_extent(None)
        .set_precision(0.0)
        .unwrap();
    assert_eq!(
        sphere_path(&projection),
        "M3.141593,-3.141593L3.141593,0L3.141593,3.141593L3.141593,3.141593\
         L-3.141593,3.141593L-3.141593,3.141593L-3.141593,0L-3.141593,-3.141593\
         L-3.141593,-3.141593L3.141593,-3.141593Z"
    );
    assert_eq!(projection.clip_extent(), None);

    projection.set_clip_extent(Some([[-10.0, -10.0], [10.0, 10.0]]));
    assert_eq!(
        sphere_path(&projection),
        "M3.141593,-10L3.141593,0L3.141593,10L3.141593,10L-3.141593,10L-3.141593,10\
         L-3.141593,0L-3.141593,-10L-3.141593,-10L3.141593,-10Z"
    );
    assert_eq!(
        projection.clip_extent(),
        Some([[-10.0, -10.0], [10.0, 10.0]])
    );
}

#[test]
fn transverse_mercator_sphere_outline_has_no_nan() {
    let mut projection = Projection::transverse_mercator();
    projection
        .set_translate([0.0, 0.0])
        .set_scale(1.0)
        .set_clip_extent(None)
        .set_precision(0.0)
        .unwrap();
    assert_eq!(
        sphere_path(&projection),
        "M3.141593,3.141593L0,3.141593L-3.141593,3.141593L-3.141593,-3.141593\
         L-3.141593,-3.141593L0,-3.141593L3.141593,-3.141593L3.141593,3.141593Z"
    );

    projection.set_clip_extent(Some([[-10.0, -10.0], [10.0, 10.0]]));
    assert_eq!(
        sphere_path(&projection),
        "M10,3.141593L0,3.141593L-10,3.141593L-10,-3.141593L-10,-3.141593\
         L0,-3.141593L10,-3.141593L10,3.141593Z"
    );
}

#[test]
fn lines_are_cut_at_the_antimeridian() {
    let mut projection = Projection::equirectangular();
    projection
        .set_scale(1.0)
        .set_translate([0.0, 0.0])
        .set_precision(0.0)
        .unwrap();
    let object = parse(r#"{"type":"LineString","coordinates":[[170,0],[-170,20]]}"#);
    let mut lines = Lines::default();
    stream_object(&object, &mut projection.stream(&mut lines));
    assert_eq!(lines.lines.len(), 2);

    // latitude where the great circle meets the antimeridian
    let (l0, p0) = (170f64.to_radians(), 0f64.to_radians());
    let (l1, p1) = (-170f64.to_radians(), 20f64.to_radians());
    let phi = ((p0.sin() * p1.cos() * l1.sin() - p1.sin() * p0.cos() * l0.sin())
        / (p0.cos() * p1.cos() * (l0 - l1).sin()))
    .atan();

    let first = &lines.lines[0];
    let second = &lines.lines[1];
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_abs_diff_eq!(first[1][0], PI, epsilon = 1e-9);
    assert_abs_diff_eq!(first[1][1], -phi, epsilon = 1e-6);
    assert_abs_diff_eq!(second[0][0], -PI, epsilon = 1e-9);
    assert_abs_diff_eq!(second[0][1], -phi, epsilon = 1e-6);
}

#[test]
fn invertible_projections_round_trip() {
    let projections = vec![
        Projection::equirectangular(),
        Projection::mercator(),
        Projection::transverse_mercator(),
        Projection::orthographic(),
        Projection::stereographic(),
        Projection::gnomonic(),
        Projection::azimuthal_equal_area(),
        Projection::azimuthal_equidistant(),
        Projection::conic_conformal(),
        Projection::conic_equal_area(),
        Projection::conic_equidistant(),
        Projection::albers(),
        Projection::equal_earth(),
        Projection::natural_earth1(),
    ];
    for projection in projections {
        for point in [[0.0, 0.0], [30.0, 20.0], [-20.0, -15.0], [10.0, 45.0]] {
            let p = projection
                .project(point)
                .unwrap_or_else(|| panic!("{} dropped {:?}", projection.name(), point));
            let [lon, lat] = projection.invert(p).unwrap();
            assert_abs_diff_eq!(lon, point[0], epsilon = 1e-6);
            assert_abs_diff_eq!(lat, point[1], epsilon = 1e-6);
        }
    }
}

#[test]
fn clip_angle_cuts_lines_on_the_small_circle() {
    let mut projection = Projection::azimuthal_equidistant();
    projection
        .set_scale(1.0)
        .set_translate([0.0, 0.0])
        .set_clip_angle(Some(30.0))
        .set_precision(0.0)
        .unwrap();
    let object = parse(r#"{"type":"LineString","coordinates":[[0,0],[60,0]]}"#);
    let mut lines = Lines::default();
    stream_object(&object, &mut projection.stream(&mut lines));
    assert_eq!(lines.lines.len(), 1);
    let end = *lines.lines[0].last().unwrap();
    // equidistant: planar radius is the angular distance from the center
    assert_abs_diff_eq!(end[0], 30f64.to_radians(), epsilon = 1e-6);
    assert_abs_diff_eq!(end[1], 0.0, epsilon = 1e-6);
}

#[test]
fn finer_precision_never_emits_fewer_points() {
    let object = parse(r#"{"type":"LineString","coordinates":[[-60,10],[60,50]]}"#);
    let mut counts = Vec::new();
    for precision in [10.0, 1.0, 0.1] {
        let mut projection = Projection::orthographic();
        projection.set_precision(precision).unwrap();
        let mut lines = Lines::default();
        stream_object(&object, &mut projection.stream(&mut lines));
        counts.push(lines.lines.iter().map(Vec::len).sum::<usize>());
    }
    assert!(counts[0] <= counts[1]);
    assert!(counts[1] <= counts[2]);
    assert!(counts[2] > 2);
}

#[test]
fn sphere_fits_the_extent() {
    let mut projection = Projection::equirectangular();
    projection.fit_extent([[50.0, 50.0], [950.0, 950.0]], &sphere());
    assert_abs_diff_eq!(projection.scale(), 450.0 / PI, epsilon = 1e-6);
    assert_abs_diff_eq!(projection.translate()[0], 500.0, epsilon = 1e-6);
    assert_abs_diff_eq!(projection.translate()[1], 500.0, epsilon = 1e-6);
}

#[test]
fn rectangle_clip_follows_ring_parity() {
    let extent = [[0.0, 0.0], [10.0, 10.0]];
    let mut path = GeoPath::new(IdentityProjection::new());
    path.projection_mut().set_clip_extent(Some(extent));

    let covering = parse(
        r#"{"type":"Polygon","coordinates":[[[-5,-5],[15,-5],[15,15],[-5,15],[-5,-5]]]}"#,
    );
    assert_eq!(path.bounds(&covering), extent);
    assert!(path.path(&covering).is_some());

    // the hole covers the extent
    let with_hole = parse(
        r#"{"type":"Polygon","coordinates":[
            [[-5,-5],[15,-5],[15,15],[-5,15],[-5,-5]],
            [[-2,-2],[-2,12],[12,12],[12,-2],[-2,-2]]
        ]}"#,
    );
    assert_eq!(path.path(&with_hole), None);
}

#[test]
fn unknown_and_null_geometry_draw_nothing() {
    let object = parse(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":null,"properties":{}},
            {"type":"Feature","geometry":{"type":"Curve","coordinates":[]},"properties":null}
        ]}"#,
    );
    let mut path = GeoPath::new(Projection::equirectangular());
    assert_eq!(path.path(&object), None);
}

#[test]
fn fixed_settings_report_unsupported() {
    let mut albers_usa = AlbersUsa::new();
    assert_eq!(
        albers_usa.set_rotate([10.0, 0.0, 0.0]).map(|_| ()),
        Err(Error::Unsupported {
            projection: "albers usa".to_owned(),
            operation: "rotate".to_owned(),
        })
    );
    let mut identity = IdentityProjection::new();
    assert_eq!(
        identity.set_clip_angle(Some(90.0)).map(|_| ()),
        Err(Error::Unsupported {
            projection: "identity".to_owned(),
            operation: "clip_angle".to_owned(),
        })
    );
}

#[test]
fn albers_usa_draws_all_three_regions() {
    let object = parse(
        r#"{"type":"MultiPoint","coordinates":[[-98,38],[-149.9,61.2],[-157.86,21.3]]}"#,
    );
    let mut path = GeoPath::new(AlbersUsa::new());
    let svg = path.path(&object).unwrap();
    assert_eq!(svg.matches('M').count(), 3);
}

fn equirectangular_path() -> GeoPath<Projection> {
    let mut projection = Projection::equirectangular();
    projection.set_scale(900.0 / PI).set_precision(0.0).unwrap();
    GeoPath::new(projection)
}

fn assert_centroid(path: &GeoPath<Projection>, json: &str, expected: [f64; 2]) {
    let [x, y] = path.centroid(&parse(json));
    assert_abs_diff_eq!(x, expected[0], epsilon = 1e-6);
    assert_abs_diff_eq!(y, expected[1], epsilon = 1e-6);
}

#[test]
fn projected_centroid_of_points_and_lines() {
    let path = equirectangular_path();
    assert_centroid(&path, r#"{"type":"Point","coordinates":[0,0]}"#, [480.0, 250.0]);
    assert_centroid(
        &path,
        r#"{"type":"MultiPoint","coordinates":[[-122,37],[-74,40]]}"#,
        [-10.0, 57.5],
    );
    assert_centroid(
        &path,
        r#"{"type":"LineString","coordinates":[[0,0],[100,0],[101,0]]}"#,
        [732.5, 250.0],
    );
    assert_centroid(
        &path,
        r#"{"type":"LineString","coordinates":[[-122,37],[-74,40],[-74,40]]}"#,
        [-10.0, 57.5],
    );
    assert_centroid(
        &path,
        r#"{"type":"LineString","coordinates":[[-122,37],[-74,40],[-100,0]]}"#,
        [17.389135, 103.563545],
    );
    assert_centroid(
        &path,
        r#"{"type":"MultiLineString","coordinates":[[[100,0],[0,0]],[[-10,0],[0,0]]]}"#,
        [705.0, 250.0],
    );
    for json in [
        r#"{"type":"MultiPoint","coordinates":[]}"#,
        r#"{"type":"LineString","coordinates":[]}"#,
        r#"{"type":"MultiPolygon","coordinates":[]}"#,
    ] {
        let [x, y] = path.centroid(&parse(json));
        assert!(x.is_nan() && y.is_nan(), "{}", json);
    }
}

#[test]
fn projected_centroid_of_polygons() {
    let path = equirectangular_path();
    assert_centroid(
        &path,
        r#"{"type":"Polygon","coordinates":[[[100,0],[100,1],[101,1],[101,0],[100,0]]]}"#,
        [982.5, 247.5],
    );
    // no area: the perimeter decides
    assert_centroid(
        &path,
        r#"{"type":"Polygon","coordinates":[[[1,0],[2,0],[3,0],[1,0]]]}"#,
        [490.0, 250.0],
    );
    assert_centroid(
        &path,
        r#"{"type":"Polygon","coordinates":[
            [[-2,-2],[-2,2],[2,2],[2,-2],[-2,-2]],
            [[0,-1],[1,-1],[1,1],[0,1],[0,-1]]
        ]}"#,
        [479.642857, 250.0],
    );
    assert_centroid(
        &path,
        r#"{"type":"MultiPolygon","coordinates":[
            [[[100,0],[100,1],[101,1],[101,0],[100,0]]],
            [[[0,0],[1,0],[1,-1],[0,-1],[0,0]]]
        ]}"#,
        [732.5, 250.0],
    );
    assert_centroid(
        &path,
        r#"{"type":"GeometryCollection","geometries":[
            {"type":"Polygon","coordinates":[[[-180,0],[-180,1],[-179,1],[-179,0],[-180,0]]]},
            {"type":"LineString","coordinates":[[179,0],[180,0]]},
            {"type":"Point","coordinates":[0,0]}
        ]}"#,
        [-417.5, 247.5],
    );
    assert_centroid(&path, r#"{"type":"Sphere"}"#, [480.0, 250.0]);
}

#[test]
fn projected_area_and_length() {
    let path = equirectangular_path();
    let square = parse(r#"{"type":"Polygon","coordinates":[[[100,0],[100,1],[101,1],[101,0],[100,0]]]}"#);
    assert_abs_diff_eq!(path.area(&square), 25.0, epsilon = 1e-6);
    assert_abs_diff_eq!(path.measure(&square), 20.0, epsilon = 1e-6);
    assert_abs_diff_eq!(path.area(&sphere()), 1800.0 * 900.0, epsilon = 1e-6);
    assert_abs_diff_eq!(path.measure(&sphere()), 2.0 * (1800.0 + 900.0), epsilon = 1e-6);
    let line = parse(r#"{"type":"LineString","coordinates":[[0,0],[10,0]]}"#);
    assert_eq!(path.area(&line), 0.0);
    assert_abs_diff_eq!(path.measure(&line), 50.0, epsilon = 1e-6);
}
