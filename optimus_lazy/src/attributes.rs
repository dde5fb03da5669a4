// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute names making up the page contract.

/// Deferred source URL, copied into [`SRC`] once the image is loaded.
pub const LAZY_SRC: &str = "data-optimus-lazy-src";

/// Set to [`LOADED_TRUE`] once the deferred source has been applied.
pub const LOADED: &str = "data-optimus-loaded";

/// Value of [`LOADED`] on a loaded image.
pub const LOADED_TRUE: &str = "true";

/// Milliseconds between carousel auto-advances, on the carousel container.
pub const INTERVAL: &str = "data-optimus-interval";

/// Navigation direction of a toggle button: `next`, `previous`, or an index.
pub const IMG_INDEX: &str = "data-optimus-img-index";

/// The real image source.
pub const SRC: &str = "src";
