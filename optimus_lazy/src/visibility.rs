// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport band evaluation.
//!
//! ## Band
//!
//! The band is the vertical document range `[scroll_y - margin, scroll_y + height + margin]`.
//! An image is in range when its bottom edge lies strictly below the band's top and its
//! top edge lies strictly above the band's bottom. Touching an edge is not enough.
//!
//! The initial pass uses a generous margin so images just off screen are ready before
//! the first scroll. Scroll passes use a tighter one to avoid loading too eagerly on
//! every scroll tick.
//!
//! ```
//! use kurbo::Rect;
//! use optimus_lazy::Viewport;
//! use optimus_lazy::visibility::{Band, Pass};
//!
//! let band = Band::around(Viewport::new(1000.0, 800.0), Pass::Initial.margin());
//! assert_eq!((band.top, band.bottom), (700.0, 2100.0));
//! assert!(band.admits(Rect::new(0.0, 1250.0, 10.0, 1300.0)));
//! assert!(!band.admits(Rect::new(0.0, 2200.0, 10.0, 2300.0)));
//! ```

use alloc::vec::Vec;

use kurbo::{Rect, Vec2};
use tracing::trace;

use crate::host::{Host, Viewport};
use crate::load::load_image;

/// Margin of the initial pass.
pub const INITIAL_MARGIN: f64 = 300.0;

/// Margin of scroll-triggered passes.
pub const SCROLL_MARGIN: f64 = 100.0;

/// Which trigger is evaluating the viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pass {
    /// Construction or [`execute`](crate::controller::LazyLoad::execute).
    Initial,
    /// A scroll notification.
    Scroll,
}

impl Pass {
    /// Margin applied around the viewport for this pass.
    pub const fn margin(self) -> f64 {
        match self {
            Self::Initial => INITIAL_MARGIN,
            Self::Scroll => SCROLL_MARGIN,
        }
    }
}

/// A vertical range in document coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Band {
    /// Upper edge (smaller y).
    pub top: f64,
    /// Lower edge (larger y).
    pub bottom: f64,
}

impl Band {
    /// The viewport expanded by `margin` above and below.
    pub fn around(viewport: Viewport, margin: f64) -> Self {
        Self {
            top: viewport.scroll_y - margin,
            bottom: viewport.scroll_y + viewport.height + margin,
        }
    }

    /// Returns true when a document-space rectangle overlaps the open band.
    pub fn admits(&self, rect: Rect) -> bool {
        self.top < rect.max_y() && rect.min_y() < self.bottom
    }
}

/// Convert a viewport-relative rectangle into document space.
pub fn document_rect(rect: Rect, viewport: Viewport) -> Rect {
    rect + Vec2::new(0.0, viewport.scroll_y)
}

/// The subset of `images` inside the band for `pass`, in input order.
pub fn in_range<H: Host>(host: &H, images: &[H::Element], pass: Pass) -> Vec<H::Element> {
    let viewport = host.viewport();
    let band = Band::around(viewport, pass.margin());
    images
        .iter()
        .filter(|image| band.admits(document_rect(host.bounding_rect(image), viewport)))
        .cloned()
        .collect()
}

/// Load every image of `images` inside the band for `pass`.
///
/// Images outside the band are left for a later pass. Returns how many images were
/// newly loaded; already loaded images in range are skipped by the load action.
pub fn evaluate_and_load<H: Host>(host: &mut H, images: &[H::Element], pass: Pass) -> usize {
    let candidates = in_range(host, images, pass);
    let loaded = candidates
        .iter()
        .filter(|image| load_image(host, image))
        .count();
    trace!(
        ?pass,
        candidates = images.len(),
        in_range = candidates.len(),
        loaded,
        "viewport pass"
    );
    loaded
}
