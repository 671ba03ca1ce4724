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

//! Choosing scale and translate so an object fills a viewport.

use log::debug;

use crate::geometry::GeoObject;
use crate::path::PathBounds;
use crate::projection::{AlbersUsa, GeoProjection, IdentityProjection, Projection};
use crate::stream::stream_object;
use crate::Extent;

/// The settings a fit pass needs to reach on each projection type.
trait Fit: GeoProjection {
    fn fit_clip_extent(&self) -> Option<Extent>;
    fn set_fit_clip_extent(&mut self, extent: Option<Extent>);
    fn set_fit_transform(&mut self, scale: f64, translate: [f64; 2]);
}

impl Fit for Projection {
    fn fit_clip_extent(&self) -> Option<Extent> {
        self.clip_extent()
    }

    fn set_fit_clip_extent(&mut self, extent: Option<Extent>) {
        self.set_clip_extent(extent);
    }

    fn set_fit_transform(&mut self, scale: f64, translate: [f64; 2]) {
        self.set_scale(scale).set_translate(translate);
    }
}

impl Fit for IdentityProjection {
    fn fit_clip_extent(&self) -> Option<Extent> {
        self.clip_extent()
    }

    fn set_fit_clip_extent(&mut self, extent: Option<Extent>) {
        self.set_clip_extent(extent);
    }

    fn set_fit_transform(&mut self, scale: f64, translate: [f64; 2]) {
        self.set_scale(scale).set_translate(translate);
    }
}

impl Fit for AlbersUsa {
    // the insets' extents are laid out by set_translate
    fn fit_clip_extent(&self) -> Option<Extent> {
        None
    }

    fn set_fit_clip_extent(&mut self, _extent: Option<Extent>) {}

    fn set_fit_transform(&mut self, scale: f64, translate: [f64; 2]) {
        self.set_scale(scale).set_translate(translate);
    }
}

/// Project `object` at scale 150 around the origin, then hand its planar
/// bounds to `place`, which returns the final scale factor relative to 150
/// and the translate.
fn fit<P, F>(projection: &mut P, object: &GeoObject, place: F)
where
    P: Fit,
    F: FnOnce(Extent) -> (f64, [f64; 2]),
{
    let clip = projection.fit_clip_extent();
    projection.set_fit_transform(150.0, [0.0, 0.0]);
    if clip.is_some() {
        projection.set_fit_clip_extent(None);
    }

    let mut bounds = PathBounds::new();
    stream_object(object, &mut projection.stream(&mut bounds));
    let extent = bounds.result();

    if extent.iter().flatten().all(|v| v.is_finite()) {
        let (k, translate) = place(extent);
        let scale = 150.0 * k;
        debug!(
            "fitted bounds {:?}: scale {}, translate {:?}",
            extent, scale, translate
        );
        projection.set_fit_transform(scale, translate);
    } else {
        debug!("nothing to fit: the object has no projected points");
    }

    if clip.is_some() {
        projection.set_fit_clip_extent(clip);
    }
}

fn fit_extent<P: Fit>(projection: &mut P, extent: Extent, object: &GeoObject) {
    let [[x0, y0], [x1, y1]] = extent;
    fit(projection, object, |[[bx0, by0], [bx1, by1]]| {
        let w = x1 - x0;
        let h = y1 - y0;
        let k = (w / (bx1 - bx0)).min(h / (by1 - by0));
        let x = x0 + (w - k * (bx1 + bx0)) / 2.0;
        let y = y0 + (h - k * (by1 + by0)) / 2.0;
        (k, [x, y])
    })
}

fn fit_width<P: Fit>(projection: &mut P, width: f64, object: &GeoObject) {
    fit(projection, object, |[[bx0, by0], [bx1, _]]| {
        let k = width / (bx1 - bx0);
        let x = (width - k * (bx1 + bx0)) / 2.0;
        (k, [x, -k * by0])
    })
}

fn fit_height<P: Fit>(projection: &mut P, height: f64, object: &GeoObject) {
    fit(projection, object, |[[bx0, by0], [_, by1]]| {
        let k = height / (by1 - by0);
        let y = (height - k * (by1 + by0)) / 2.0;
        (k, [-k * bx0, y])
    })
}

macro_rules! impl_fit_methods {
    ($($projection:ty),*) => {$(
        impl $projection {
            /// Set scale and translate so `object` fills `extent`, keeping
            /// its aspect ratio. Any clip extent is ignored while measuring
            /// and kept afterwards.
            pub fn fit_extent(&mut self, extent: Extent, object: &GeoObject) -> &mut Self {
                fit_extent(self, extent, object);
                self
            }

            /// As [`fit_extent`](Self::fit_extent) with the top-left corner
            /// at the origin.
            pub fn fit_size(&mut self, size: [f64; 2], object: &GeoObject) -> &mut Self {
                fit_extent(self, [[0.0, 0.0], size], object);
                self
            }

            /// Fit the width only; the top edge lands on y = 0.
            pub fn fit_width(&mut self, width: f64, object: &GeoObject) -> &mut Self {
                fit_width(self, width, object);
                self
            }

            /// Fit the height only; the left edge lands on x = 0.
            pub fn fit_height(&mut self, height: f64, object: &GeoObject) -> &mut Self {
                fit_height(self, height, object);
                self
            }
        }
    )*};
}

impl_fit_methods!(Projection, IdentityProjection, AlbersUsa);
