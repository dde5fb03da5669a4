// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class names used to discover images, carousels and toggle buttons.
//!
//! [`PartialOptions`] mirrors the configuration object a page passes in, keyed
//! `className`, `carouselClassName` and `carouselToggleImageBtn`. It is merged over the
//! defaults: supplied keys win, missing keys keep the default.
//!
//! ```
//! use optimus_lazy::{Options, PartialOptions};
//!
//! let options = Options::from(PartialOptions {
//!     class_name: Some("lazy".into()),
//!     ..Default::default()
//! });
//! assert_eq!(options.class_name, "lazy");
//! assert_eq!(options.carousel_class_name, "optimusIMG-carousel");
//! ```

use alloc::string::String;

use tracing::warn;

use crate::selector::Selector;

/// Default image marker class.
pub const DEFAULT_CLASS_NAME: &str = "optimusIMG";

/// Default carousel marker class.
pub const DEFAULT_CAROUSEL_CLASS_NAME: &str = "optimusIMG-carousel";

/// Default toggle button marker class.
pub const DEFAULT_CAROUSEL_TOGGLE_CLASS_NAME: &str = "optimusIMG-carousel--toggle-btn";

/// Complete configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Class marking lazily loaded `<img>` elements.
    pub class_name: String,
    /// Class marking carousel containers.
    pub carousel_class_name: String,
    /// Class marking toggle buttons inside a carousel.
    pub carousel_toggle_class_name: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.into(),
            carousel_class_name: DEFAULT_CAROUSEL_CLASS_NAME.into(),
            carousel_toggle_class_name: DEFAULT_CAROUSEL_TOGGLE_CLASS_NAME.into(),
        }
    }
}

impl Options {
    /// Apply `overrides` on top of `self`.
    ///
    /// Blank class names would match nothing useful, so they are ignored with a warning.
    pub fn merged(mut self, overrides: PartialOptions) -> Self {
        let PartialOptions {
            class_name,
            carousel_class_name,
            carousel_toggle_image_btn,
        } = overrides;
        merge_key(&mut self.class_name, class_name, "className");
        merge_key(&mut self.carousel_class_name, carousel_class_name, "carouselClassName");
        merge_key(
            &mut self.carousel_toggle_class_name,
            carousel_toggle_image_btn,
            "carouselToggleImageBtn",
        );
        self
    }

    /// Replace the image marker class.
    pub fn with_class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = class.into();
        self
    }

    /// Replace the carousel marker class.
    pub fn with_carousel_class_name(mut self, class: impl Into<String>) -> Self {
        self.carousel_class_name = class.into();
        self
    }

    /// Replace the toggle button marker class.
    pub fn with_carousel_toggle_class_name(mut self, class: impl Into<String>) -> Self {
        self.carousel_toggle_class_name = class.into();
        self
    }

    /// `img.<class_name>`
    pub fn image_selector(&self) -> Selector<'_> {
        Selector::tag("img").with_class(&self.class_name)
    }

    /// `.<carousel_class_name>`
    pub fn carousel_selector(&self) -> Selector<'_> {
        Selector::class(&self.carousel_class_name)
    }

    /// `.<carousel_toggle_class_name>`
    pub fn toggle_selector(&self) -> Selector<'_> {
        Selector::class(&self.carousel_toggle_class_name)
    }
}

fn merge_key(slot: &mut String, value: Option<String>, key: &'static str) {
    match value {
        Some(value) if value.trim().is_empty() => {
            warn!(key, default = %slot, "ignoring blank class name");
        }
        Some(value) => *slot = value,
        None => {}
    }
}

/// Caller-supplied overrides; `None` keeps the default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct PartialOptions {
    /// Overrides [`Options::class_name`].
    pub class_name: Option<String>,
    /// Overrides [`Options::carousel_class_name`].
    pub carousel_class_name: Option<String>,
    /// Overrides [`Options::carousel_toggle_class_name`].
    pub carousel_toggle_image_btn: Option<String>,
}

impl From<PartialOptions> for Options {
    fn from(overrides: PartialOptions) -> Self {
        Self::default().merged(overrides)
    }
}
