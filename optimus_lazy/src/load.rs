// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The load action shared by every trigger.
//!
//! Loading an image copies `data-optimus-lazy-src` into `src` and sets
//! `data-optimus-loaded="true"`. Once marked, an image is never written again, so the
//! initial pass, scroll passes, carousel ticks and navigation can race freely: whichever
//! runs first wins and the rest are no-ops.

use tracing::debug;

use crate::attributes::{LAZY_SRC, LOADED, LOADED_TRUE, SRC};
use crate::host::Host;

/// Returns true when the image carries the loaded marker.
pub fn is_loaded<H: Host>(host: &H, image: &H::Element) -> bool {
    host.attribute(image, LOADED).as_deref() == Some(LOADED_TRUE)
}

/// Apply the deferred source of `image` and mark it loaded.
///
/// Returns false, without writing anything, when the image was already loaded.
///
/// An image without `data-optimus-lazy-src` keeps its `src` but is still marked, so
/// carousel timers see it as done.
pub fn load_image<H: Host>(host: &mut H, image: &H::Element) -> bool {
    if is_loaded(host, image) {
        return false;
    }
    match host.attribute(image, LAZY_SRC) {
        Some(src) => host.set_attribute(image, SRC, &src),
        None => debug!(?image, "image has no {LAZY_SRC}; marking it loaded without a source"),
    }
    host.set_attribute(image, LOADED, LOADED_TRUE);
    true
}
