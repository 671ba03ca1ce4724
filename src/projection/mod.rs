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

//! Configurable projections.
//!
//! A [`Projection`] wraps a [`RawProjection`] (a pure function of radians)
//! with rotation, clipping, resampling and the planar
//! scale/translate/reflect/angle transform. Its stream chain is compiled
//! lazily and reused until a setter changes the configuration.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::clip::{ClipAntimeridian, ClipCircle, ClipRectangle, NoClip, StreamTransform};
use crate::error::Error;
use crate::math::PI;
use crate::rotation::RotateRadians;
use crate::stream::{PointMap, Stream};
use crate::Extent;

mod albers_usa;
mod azimuthal;
mod conic;
pub(crate) mod cylindrical;
mod fit;
mod identity;
mod resample;

pub use self::albers_usa::AlbersUsa;
pub use self::azimuthal::Azimuthal;
pub use self::conic::{ConicConformal, ConicEqualArea, ConicEquidistant, ConicFamily};
pub use self::cylindrical::{
    CylindricalEqualArea, EqualEarth, Equirectangular, Mercator, NaturalEarth1,
    TransverseMercator,
};
pub use self::identity::IdentityProjection;

use self::resample::{Resample, ResampleNone};

/// A pure mapping from (λ, φ) in radians to unscaled planar coordinates.
pub trait RawProjection {
    fn forward(&self, lambda: f64, phi: f64) -> [f64; 2];

    /// The inverse mapping. Projections without one keep the default, which
    /// always answers `None`; invertibility is probed once when a
    /// [`Projection`] is built around the raw projection.
    fn invert(&self, _x: f64, _y: f64) -> Option<[f64; 2]> {
        None
    }
}

/// Operations shared by every projection type.
pub trait GeoProjection {
    /// Project a `[longitude, latitude]` point in degrees; `None` when the
    /// point is clipped away.
    fn project(&self, point: [f64; 2]) -> Option<[f64; 2]>;

    /// The inverse of [`project`](GeoProjection::project), in degrees.
    fn invert(&self, point: [f64; 2]) -> Result<[f64; 2], Error>;

    /// Wrap `sink` in the projection's stream chain. The chain expects
    /// degrees and emits planar coordinates.
    fn stream<'a>(&self, sink: &'a mut dyn Stream) -> Box<dyn Stream + 'a>;
}

/// The planar affine part of a projection: scale, reflection, rotation by
/// `alpha` and translation, with the y axis pointing down.
///
/// Without a rotation the cross terms are skipped entirely, so an infinite
/// raw coordinate (Mercator at a pole) stays infinite instead of turning
/// into `0 * inf = NaN` on the other axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScaleTranslateRotate {
    rotated: bool,
    a: f64,
    b: f64,
    ai: f64,
    bi: f64,
    ci: f64,
    fi: f64,
    dx: f64,
    dy: f64,
    sx: f64,
    sy: f64,
}

impl ScaleTranslateRotate {
    pub(crate) fn new(k: f64, dx: f64, dy: f64, sx: f64, sy: f64, alpha: f64) -> Self {
        let (sin_alpha, cos_alpha) = alpha.sin_cos();
        ScaleTranslateRotate {
            rotated: alpha != 0.0,
            a: cos_alpha * k,
            b: sin_alpha * k,
            ai: cos_alpha / k,
            bi: sin_alpha / k,
            ci: (sin_alpha * dy - cos_alpha * dx) / k,
            fi: (sin_alpha * dx + cos_alpha * dy) / k,
            dx,
            dy,
            sx,
            sy,
        }
    }

    pub(crate) fn forward(&self, x: f64, y: f64) -> [f64; 2] {
        let x = x * self.sx;
        let y = y * self.sy;
        if !self.rotated {
            return [self.a * x + self.dx, self.dy - self.a * y];
        }
        [
            self.a * x - self.b * y + self.dx,
            self.dy - self.b * x - self.a * y,
        ]
    }

    pub(crate) fn invert(&self, x: f64, y: f64) -> [f64; 2] {
        if !self.rotated {
            return [
                self.sx * (self.ai * x + self.ci),
                self.sy * (self.fi - self.ai * y),
            ];
        }
        [
            self.sx * (self.ai * x - self.bi * y + self.ci),
            self.sy * (self.fi - self.bi * x - self.ai * y),
        ]
    }
}

/// Raw projection followed by the planar transform.
pub(crate) struct ProjectTransform {
    raw: Rc<dyn RawProjection>,
    transform: ScaleTranslateRotate,
}

impl ProjectTransform {
    pub(crate) fn new(raw: Rc<dyn RawProjection>, transform: ScaleTranslateRotate) -> Self {
        ProjectTransform { raw, transform }
    }

    pub(crate) fn forward(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let [x, y] = self.raw.forward(lambda, phi);
        self.transform.forward(x, y)
    }

    pub(crate) fn invert(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        let [x, y] = self.transform.invert(x, y);
        self.raw.invert(x, y)
    }
}

/// The compiled stage descriptions a stream chain is built from.
struct Pipeline {
    rotate: RotateRadians,
    project: Rc<ProjectTransform>,
    delta2: f64,
    preclip: Rc<dyn StreamTransform>,
    postclip: Rc<dyn StreamTransform>,
}

impl Pipeline {
    fn stream<'a>(&self, sink: Box<dyn Stream + 'a>) -> Box<dyn Stream + 'a> {
        let sink = self.postclip.transform(sink);
        let sink: Box<dyn Stream + 'a> = if self.delta2 > 0.0 {
            Box::new(Resample::new(self.project.clone(), self.delta2, sink))
        } else {
            Box::new(ResampleNone::new(self.project.clone(), sink))
        };
        let sink = self.preclip.transform(sink);
        let rotate = self.rotate;
        Box::new(PointMap::new(
            move |x: f64, y: f64| rotate.apply(x.to_radians(), y.to_radians()),
            sink,
        ))
    }
}

/// Projection families whose setters carry extra behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ProjectionKind {
    Standard,
    /// Clip extent follows the scale unless the user sets one, in which case
    /// only x is limited by the projection.
    Mercator { extent: Option<Extent> },
    /// As Mercator, with the axes swapped: y is limited.
    TransverseMercator { extent: Option<Extent> },
    Conic {
        family: ConicFamily,
        parallels: [f64; 2],
    },
}

/// A raw projection with rotation, clipping, resampling and planar
/// transform.
///
/// Setters return the projection so they can be chained; each one drops
/// the compiled stream chain.
///
/// ```
/// use geostream::Projection;
///
/// let mut projection = Projection::orthographic();
/// projection.set_rotate([-10.0, -50.0, 0.0]).set_translate([0.0, 0.0]);
/// assert!(projection.project([10.0, 50.0]).is_some());
/// assert!(projection.project([-170.0, -50.0]).is_none());
/// ```
#[derive(Clone)]
pub struct Projection {
    name: &'static str,
    kind: ProjectionKind,
    raw: Rc<dyn RawProjection>,
    invertible: bool,

    k: f64,
    x: f64,
    y: f64,
    lambda: f64,
    phi: f64,
    delta_lambda: f64,
    delta_phi: f64,
    delta_gamma: f64,
    alpha: f64,
    sx: f64,
    sy: f64,

    theta: Option<f64>,
    preclip: Rc<dyn StreamTransform>,
    clip_extent: Option<Extent>,
    postclip: Rc<dyn StreamTransform>,
    delta2: f64,

    rotate: RotateRadians,
    project: Rc<ProjectTransform>,
    pipeline: RefCell<Option<Rc<Pipeline>>>,
}

impl fmt::Debug for Projection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Projection")
            .field("name", &self.name)
            .field("scale", &self.k)
            .field("translate", &[self.x, self.y])
            .field("center", &self.center())
            .field("rotate", &self.rotate())
            .field("angle", &self.angle())
            .field("precision", &self.precision())
            .field("clip_angle", &self.clip_angle())
            .field("clip_extent", &self.clip_extent())
            .finish()
    }
}

impl Default for Projection {
    /// Plate carrée at scale 150, translated to [480, 250].
    fn default() -> Self {
        Projection::new(Rc::new(Equirectangular))
    }
}

impl Projection {
    /// A projection around any raw projection, with scale 150, translate
    /// [480, 250], antimeridian cutting and precision √0.5.
    pub fn new(raw: Rc<dyn RawProjection>) -> Self {
        Projection::with_kind("custom", ProjectionKind::Standard, raw)
    }

    pub(crate) fn with_kind(
        name: &'static str,
        kind: ProjectionKind,
        raw: Rc<dyn RawProjection>,
    ) -> Self {
        let invertible = raw.invert(0.0, 0.0).is_some();
        let transform = ScaleTranslateRotate::new(150.0, 480.0, 250.0, 1.0, 1.0, 0.0);
        let mut projection = Projection {
            name,
            kind,
            project: Rc::new(ProjectTransform::new(raw.clone(), transform)),
            raw,
            invertible,
            k: 150.0,
            x: 480.0,
            y: 250.0,
            lambda: 0.0,
            phi: 0.0,
            delta_lambda: 0.0,
            delta_phi: 0.0,
            delta_gamma: 0.0,
            alpha: 0.0,
            sx: 1.0,
            sy: 1.0,
            theta: None,
            preclip: Rc::new(ClipAntimeridian),
            clip_extent: None,
            postclip: Rc::new(NoClip),
            delta2: 0.5,
            rotate: RotateRadians::Identity,
            pipeline: RefCell::new(None),
        };
        projection.recenter();
        projection
    }

    /// Name of the projection family, as used in log and error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn set_raw(&mut self, raw: Rc<dyn RawProjection>) -> &mut Self {
        self.invertible = raw.invert(0.0, 0.0).is_some();
        self.raw = raw;
        self.recenter()
    }

    /// Solve the translation so the center lands on the translate point,
    /// then rebuild the point transforms.
    fn recenter(&mut self) -> &mut Self {
        let [cx, cy] = self.raw.forward(self.lambda, self.phi);
        let [cx, cy] = ScaleTranslateRotate::new(self.k, 0.0, 0.0, self.sx, self.sy, self.alpha)
            .forward(cx, cy);
        let transform = ScaleTranslateRotate::new(
            self.k,
            self.x - cx,
            self.y - cy,
            self.sx,
            self.sy,
            self.alpha,
        );
        self.rotate = RotateRadians::new(self.delta_lambda, self.delta_phi, self.delta_gamma);
        self.project = Rc::new(ProjectTransform::new(self.raw.clone(), transform));
        self.reset()
    }

    fn reset(&mut self) -> &mut Self {
        *self.pipeline.get_mut() = None;
        self
    }

    /// Recompute the automatic clip extent of the Mercator family.
    fn reclip(&mut self) -> &mut Self {
        let (user, transverse) = match self.kind {
            ProjectionKind::Mercator { extent } => (extent, false),
            ProjectionKind::TransverseMercator { extent } => (extent, true),
            _ => return self,
        };
        let k = PI * self.k;
        // the rotated origin always projects to the raw origin
        let [tx, ty] = self.project.forward(0.0, 0.0);
        let extent = match user {
            None => [[tx - k, ty - k], [tx + k, ty + k]],
            Some([[x0, y0], [x1, y1]]) if !transverse => {
                [[(tx - k).max(x0), y0], [(tx + k).min(x1), y1]]
            }
            Some([[x0, y0], [x1, y1]]) => [[x0, (ty - k).max(y0)], [x1, (ty + k).min(y1)]],
        };
        self.apply_clip_extent(Some(extent))
    }

    fn apply_clip_extent(&mut self, extent: Option<Extent>) -> &mut Self {
        self.clip_extent = extent;
        self.postclip = match extent {
            Some(extent) => Rc::new(ClipRectangle::new(extent)),
            None => Rc::new(NoClip),
        };
        self.reset()
    }

    fn pipeline(&self) -> Rc<Pipeline> {
        if let Some(pipeline) = self.pipeline.borrow().as_ref() {
            return pipeline.clone();
        }
        debug!(
            "compiling {} stream chain: scale {}, translate [{}, {}], precision {}",
            self.name,
            self.k,
            self.x,
            self.y,
            self.delta2.sqrt()
        );
        let pipeline = Rc::new(Pipeline {
            rotate: self.rotate,
            project: self.project.clone(),
            delta2: self.delta2,
            preclip: self.preclip.clone(),
            postclip: self.postclip.clone(),
        });
        *self.pipeline.borrow_mut() = Some(pipeline.clone());
        pipeline
    }

    /// See [`GeoProjection::project`].
    pub fn project(&self, point: [f64; 2]) -> Option<[f64; 2]> {
        let [lambda, phi] = self
            .rotate
            .apply(point[0].to_radians(), point[1].to_radians());
        if !self.preclip.accepts(lambda, phi) {
            return None;
        }
        let [x, y] = self.project.forward(lambda, phi);
        if x.is_finite() && y.is_finite() && self.postclip.accepts(x, y) {
            Some([x, y])
        } else {
            None
        }
    }

    /// See [`GeoProjection::invert`].
    pub fn invert(&self, point: [f64; 2]) -> Result<[f64; 2], Error> {
        if !self.invertible {
            return Err(Error::InvertUnsupported);
        }
        let [lambda, phi] = self
            .project
            .invert(point[0], point[1])
            .ok_or(Error::InvertOutOfDomain(point))?;
        let [lambda, phi] = self.rotate.invert(lambda, phi);
        Ok([lambda.to_degrees(), phi.to_degrees()])
    }

    /// See [`GeoProjection::stream`].
    pub fn stream<'a>(&self, sink: &'a mut dyn Stream) -> Box<dyn Stream + 'a> {
        self.stream_into(Box::new(sink))
    }

    pub(crate) fn stream_into<'a>(&self, sink: Box<dyn Stream + 'a>) -> Box<dyn Stream + 'a> {
        self.pipeline().stream(sink)
    }

    pub fn scale(&self) -> f64 {
        self.k
    }

    pub fn set_scale(&mut self, scale: f64) -> &mut Self {
        self.k = scale;
        self.recenter();
        self.reclip()
    }

    pub fn translate(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn set_translate(&mut self, translate: [f64; 2]) -> &mut Self {
        self.x = translate[0];
        self.y = translate[1];
        self.recenter();
        self.reclip()
    }

    /// The point, in degrees, that projects to the translate point.
    pub fn center(&self) -> [f64; 2] {
        let center = [self.lambda.to_degrees(), self.phi.to_degrees()];
        match self.kind {
            ProjectionKind::TransverseMercator { .. } => [center[1], -center[0]],
            _ => center,
        }
    }

    pub fn set_center(&mut self, center: [f64; 2]) -> &mut Self {
        let center = match self.kind {
            ProjectionKind::TransverseMercator { .. } => [-center[1], center[0]],
            _ => center,
        };
        self.lambda = (center[0] % 360.0).to_radians();
        self.phi = (center[1] % 360.0).to_radians();
        self.recenter();
        self.reclip()
    }

    /// Rotation angles `[λ, φ, γ]` in degrees.
    pub fn rotate(&self) -> [f64; 3] {
        let gamma = self.delta_gamma.to_degrees();
        [
            self.delta_lambda.to_degrees(),
            self.delta_phi.to_degrees(),
            match self.kind {
                ProjectionKind::TransverseMercator { .. } => gamma - 90.0,
                _ => gamma,
            },
        ]
    }

    pub fn set_rotate(&mut self, angles: [f64; 3]) -> &mut Self {
        let gamma = match self.kind {
            ProjectionKind::TransverseMercator { .. } => angles[2] + 90.0,
            _ => angles[2],
        };
        self.delta_lambda = (angles[0] % 360.0).to_radians();
        self.delta_phi = (angles[1] % 360.0).to_radians();
        self.delta_gamma = (gamma % 360.0).to_radians();
        self.recenter();
        self.reclip()
    }

    /// Rotation of the plane, in degrees.
    pub fn angle(&self) -> f64 {
        self.alpha.to_degrees()
    }

    pub fn set_angle(&mut self, angle: f64) -> &mut Self {
        self.alpha = (angle % 360.0).to_radians();
        self.recenter()
    }

    pub fn reflect_x(&self) -> bool {
        self.sx < 0.0
    }

    pub fn set_reflect_x(&mut self, reflect: bool) -> &mut Self {
        self.sx = if reflect { -1.0 } else { 1.0 };
        self.recenter()
    }

    pub fn reflect_y(&self) -> bool {
        self.sy < 0.0
    }

    pub fn set_reflect_y(&mut self, reflect: bool) -> &mut Self {
        self.sy = if reflect { -1.0 } else { 1.0 };
        self.recenter()
    }

    /// Resampling tolerance in pixels.
    pub fn precision(&self) -> f64 {
        self.delta2.sqrt()
    }

    /// Set the resampling tolerance; zero disables resampling.
    pub fn set_precision(&mut self, precision: f64) -> Result<&mut Self, Error> {
        if !precision.is_finite() || precision < 0.0 {
            return Err(Error::InvalidPrecision(precision));
        }
        self.delta2 = precision * precision;
        Ok(self.reset())
    }

    /// Radius in degrees of the small-circle pre-clip, if any.
    pub fn clip_angle(&self) -> Option<f64> {
        self.theta.map(f64::to_degrees)
    }

    /// Clip to a small circle around the center; `None` (or zero) restores
    /// antimeridian cutting.
    pub fn set_clip_angle(&mut self, angle: Option<f64>) -> &mut Self {
        match angle {
            Some(angle) if angle != 0.0 => {
                let clip = ClipCircle::new(angle);
                self.theta = Some(angle.to_radians());
                self.preclip = Rc::new(clip);
            }
            _ => {
                self.theta = None;
                self.preclip = Rc::new(ClipAntimeridian);
            }
        }
        self.reset()
    }

    pub fn clip_extent(&self) -> Option<Extent> {
        match self.kind {
            ProjectionKind::Mercator { extent } | ProjectionKind::TransverseMercator { extent } => {
                extent
            }
            _ => self.clip_extent,
        }
    }

    /// Clip the projected output to a viewport rectangle.
    pub fn set_clip_extent(&mut self, extent: Option<Extent>) -> &mut Self {
        match &mut self.kind {
            ProjectionKind::Mercator { extent: user }
            | ProjectionKind::TransverseMercator { extent: user } => {
                *user = extent;
                self.reclip()
            }
            _ => self.apply_clip_extent(extent),
        }
    }

    pub fn preclip(&self) -> Rc<dyn StreamTransform> {
        self.preclip.clone()
    }

    /// Replace the spherical clip stage. This clears the clip angle.
    pub fn set_preclip(&mut self, preclip: Rc<dyn StreamTransform>) -> &mut Self {
        self.theta = None;
        self.preclip = preclip;
        self.reset()
    }

    pub fn postclip(&self) -> Rc<dyn StreamTransform> {
        self.postclip.clone()
    }

    /// Replace the planar clip stage. This clears the clip extent.
    pub fn set_postclip(&mut self, postclip: Rc<dyn StreamTransform>) -> &mut Self {
        self.clip_extent = None;
        self.postclip = postclip;
        self.reset()
    }
}

impl GeoProjection for Projection {
    fn project(&self, point: [f64; 2]) -> Option<[f64; 2]> {
        Projection::project(self, point)
    }

    fn invert(&self, point: [f64; 2]) -> Result<[f64; 2], Error> {
        Projection::invert(self, point)
    }

    fn stream<'a>(&self, sink: &'a mut dyn Stream) -> Box<dyn Stream + 'a> {
        Projection::stream(self, sink)
    }
}
