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
use std::rc::Rc;

use crate::clip::{ClipRectangle, NoClip, StreamTransform};
use crate::error::Error;
use crate::projection::GeoProjection;
use crate::stream::{PointMap, Stream};
use crate::Extent;

const NAME: &str = "identity";

/// A planar projection for geometry that is already projected: scale,
/// translate, reflect and rotate in the plane, with an optional clip
/// extent. Coordinates are not converted from degrees.
#[derive(Clone)]
pub struct IdentityProjection {
    k: f64,
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
    alpha: f64,
    clip_extent: Option<Extent>,
    postclip: Rc<dyn StreamTransform>,
}

/// The point transform, copied into each stream.
#[derive(Clone, Copy, Debug)]
struct Planar {
    kx: f64,
    ky: f64,
    tx: f64,
    ty: f64,
    sin_alpha: f64,
    cos_alpha: f64,
}

impl Planar {
    fn forward(&self, x: f64, y: f64) -> [f64; 2] {
        let (mut x, mut y) = (x * self.kx, y * self.ky);
        let (sa, ca) = (self.sin_alpha, self.cos_alpha);
        if sa != 0.0 {
            let t = y * ca - x * sa;
            x = x * ca + y * sa;
            y = t;
        }
        [x + self.tx, y + self.ty]
    }

    fn invert(&self, x: f64, y: f64) -> [f64; 2] {
        let (mut x, mut y) = (x - self.tx, y - self.ty);
        let (sa, ca) = (self.sin_alpha, self.cos_alpha);
        if sa != 0.0 {
            let t = y * ca + x * sa;
            x = x * ca - y * sa;
            y = t;
        }
        [x / self.kx, y / self.ky]
    }
}

impl fmt::Debug for IdentityProjection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("IdentityProjection")
            .field("scale", &self.k)
            .field("translate", &[self.tx, self.ty])
            .field("angle", &self.angle())
            .field("reflect_x", &self.reflect_x())
            .field("reflect_y", &self.reflect_y())
            .field("clip_extent", &self.clip_extent)
            .finish()
    }
}

impl Default for IdentityProjection {
    fn default() -> Self {
        IdentityProjection {
            k: 1.0,
            tx: 0.0,
            ty: 0.0,
            sx: 1.0,
            sy: 1.0,
            alpha: 0.0,
            clip_extent: None,
            postclip: Rc::new(NoClip),
        }
    }
}

impl IdentityProjection {
    pub fn new() -> Self {
        IdentityProjection::default()
    }

    fn planar(&self) -> Planar {
        let (sin_alpha, cos_alpha) = if self.alpha == 0.0 {
            (0.0, 1.0)
        } else {
            self.alpha.sin_cos()
        };
        Planar {
            kx: self.k * self.sx,
            ky: self.k * self.sy,
            tx: self.tx,
            ty: self.ty,
            sin_alpha,
            cos_alpha,
        }
    }

    pub fn project(&self, point: [f64; 2]) -> Option<[f64; 2]> {
        let [x, y] = self.planar().forward(point[0], point[1]);
        if self.postclip.accepts(x, y) {
            Some([x, y])
        } else {
            None
        }
    }

    /// Always succeeds: the planar transform is invertible.
    pub fn invert(&self, point: [f64; 2]) -> Result<[f64; 2], Error> {
        Ok(self.planar().invert(point[0], point[1]))
    }

    pub fn stream<'a>(&self, sink: &'a mut dyn Stream) -> Box<dyn Stream + 'a> {
        let sink = self.postclip.transform(Box::new(sink));
        let planar = self.planar();
        Box::new(PointMap::new(move |x, y| planar.forward(x, y), sink))
    }

    pub fn scale(&self) -> f64 {
        self.k
    }

    pub fn set_scale(&mut self, scale: f64) -> &mut Self {
        self.k = scale;
        self
    }

    pub fn translate(&self) -> [f64; 2] {
        [self.tx, self.ty]
    }

    pub fn set_translate(&mut self, translate: [f64; 2]) -> &mut Self {
        self.tx = translate[0];
        self.ty = translate[1];
        self
    }

    /// Rotation of the plane, in degrees.
    pub fn angle(&self) -> f64 {
        self.alpha.to_degrees()
    }

    pub fn set_angle(&mut self, angle: f64) -> &mut Self {
        self.alpha = (angle % 360.0).to_radians();
        self
    }

    pub fn reflect_x(&self) -> bool {
        self.sx < 0.0
    }

    pub fn set_reflect_x(&mut self, reflect: bool) -> &mut Self {
        self.sx = if reflect { -1.0 } else { 1.0 };
        self
    }

    pub fn reflect_y(&self) -> bool {
        self.sy < 0.0
    }

    pub fn set_reflect_y(&mut self, reflect: bool) -> &mut Self {
        self.sy = if reflect { -1.0 } else { 1.0 };
        self
    }

    pub fn clip_extent(&self) -> Option<Extent> {
        self.clip_extent
    }

    pub fn set_clip_extent(&mut self, extent: Option<Extent>) -> &mut Self {
        self.clip_extent = extent;
        self.postclip = match extent {
            Some(extent) => Rc::new(ClipRectangle::new(extent)),
            None => Rc::new(NoClip),
        };
        self
    }

    pub fn postclip(&self) -> Rc<dyn StreamTransform> {
        self.postclip.clone()
    }

    /// Replace the planar clip stage. This clears the clip extent.
    pub fn set_postclip(&mut self, postclip: Rc<dyn StreamTransform>) -> &mut Self {
        self.clip_extent = None;
        self.postclip = postclip;
        self
    }

    /// Not supported: there is no sphere to recenter.
    pub fn set_center(&mut self, _center: [f64; 2]) -> Result<&mut Self, Error> {
        Err(Error::unsupported(NAME, "center"))
    }

    /// Not supported: there is no sphere to rotate.
    pub fn set_rotate(&mut self, _angles: [f64; 3]) -> Result<&mut Self, Error> {
        Err(Error::unsupported(NAME, "rotate"))
    }

    /// Not supported: straight lines stay straight, nothing to resample.
    pub fn set_precision(&mut self, _precision: f64) -> Result<&mut Self, Error> {
        Err(Error::unsupported(NAME, "precision"))
    }

    /// Not supported: there is no spherical clip stage.
    pub fn set_clip_angle(&mut self, _angle: Option<f64>) -> Result<&mut Self, Error> {
        Err(Error::unsupported(NAME, "clip_angle"))
    }

    /// Not supported: there is no spherical clip stage.
    pub fn set_preclip(&mut self, _preclip: Rc<dyn StreamTransform>) -> Result<&mut Self, Error> {
        Err(Error::unsupported(NAME, "preclip"))
    }
}

impl GeoProjection for IdentityProjection {
    fn project(&self, point: [f64; 2]) -> Option<[f64; 2]> {
        IdentityProjection::project(self, point)
    }

    fn invert(&self, point: [f64; 2]) -> Result<[f64; 2], Error> {
        IdentityProjection::invert(self, point)
    }

    fn stream<'a>(&self, sink: &'a mut dyn Stream) -> Box<dyn Stream + 'a> {
        IdentityProjection::stream(self, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipAntimeridian;
    use crate::stream::tests::Recorder;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_is_the_identity() {
        let projection = IdentityProjection::new();
        assert_eq!(projection.project([3.0, -4.0]), Some([3.0, -4.0]));
        assert_eq!(projection.invert([3.0, -4.0]), Ok([3.0, -4.0]));
    }

    #[test]
    fn transform_round_trips() {
        let mut projection = IdentityProjection::new();
        projection
            .set_scale(2.0)
            .set_translate([10.0, 20.0])
            .set_reflect_y(true)
            .set_angle(30.0);
        let p = projection.project([3.0, 4.0]).unwrap();
        let [x, y] = projection.invert(p).unwrap();
        assert_abs_diff_eq!(x, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn reflect_y_flips_the_axis() {
        let mut projection = IdentityProjection::new();
        projection.set_reflect_y(true);
        assert_eq!(projection.project([1.0, 2.0]), Some([1.0, -2.0]));
    }

    #[test]
    fn spherical_setters_are_unsupported() {
        let mut projection = IdentityProjection::new();
        assert_eq!(
            projection.set_center([0.0, 0.0]).map(|_| ()),
            Err(Error::unsupported("identity", "center"))
        );
        assert!(projection.set_rotate([0.0, 0.0, 0.0]).is_err());
        assert!(projection.set_precision(1.0).is_err());
        assert!(projection.set_clip_angle(Some(10.0)).is_err());
        assert!(projection.set_preclip(Rc::new(ClipAntimeridian)).is_err());
    }

    #[test]
    fn stream_scales_and_clips() {
        let mut projection = IdentityProjection::new();
        projection
            .set_scale(10.0)
            .set_clip_extent(Some([[0.0, 0.0], [50.0, 50.0]]));
        let mut rec = Recorder::default();
        {
            let mut stream = projection.stream(&mut rec);
            stream.point(1.0, 2.0, None);
            stream.point(6.0, 2.0, None);
        }
        assert_eq!(rec.events, vec!["point 10 20"]);
        assert_eq!(projection.project([6.0, 2.0]), None);
    }
}
