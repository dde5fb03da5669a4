// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation intent on carousel toggle buttons.
//!
//! A toggle button names its target with `data-optimus-img-index`:
//!
//! - `next`: the image after the first rendered one. Nothing happens on the last
//!   image; forward navigation does not wrap.
//! - `previous`: the image before the first rendered one, wrapping from the first
//!   image to the last.
//! - an index: that image, whatever is currently shown.
//!
//! The target is loaded on hover, mousedown or touchstart, ahead of the click that
//! actually rotates the carousel. Timers are not consulted; the load action is
//! idempotent, so a tick and an intent targeting the same image compose.

use alloc::string::String;
use core::str::FromStr;

use tracing::{debug, warn};

use crate::attributes::IMG_INDEX;
use crate::carousel::images_of;
use crate::host::Host;
use crate::load::load_image;
use crate::selector::Selector;

/// Where a toggle button navigates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// The image after the one shown.
    Next,
    /// The image before the one shown.
    Previous,
    /// A fixed position.
    Index(usize),
}

/// A toggle button whose `data-optimus-img-index` cannot be used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectionError {
    /// The attribute is absent.
    #[error("toggle button is missing data-optimus-img-index property")]
    Missing,
    /// The attribute is neither `next`, `previous` nor an index.
    #[error("unrecognized data-optimus-img-index `{0}`")]
    Unrecognized(String),
}

impl FromStr for Direction {
    type Err = DirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "next" => Ok(Self::Next),
            "previous" => Ok(Self::Previous),
            other => other
                .parse()
                .map(Self::Index)
                .map_err(|_| DirectionError::Unrecognized(s.into())),
        }
    }
}

impl Direction {
    /// Position to load among `len` images, given the first rendered position.
    ///
    /// `Next` and `Previous` need a rendered image to navigate from.
    pub fn resolve(self, shown: Option<usize>, len: usize) -> Option<usize> {
        match self {
            Self::Next => {
                let shown = shown?;
                (shown + 1 < len).then_some(shown + 1)
            }
            Self::Previous => match shown? {
                0 => len.checked_sub(1),
                i => Some(i - 1),
            },
            Self::Index(i) => (i < len).then_some(i),
        }
    }
}

/// Read a button's direction.
pub fn direction_of<H: Host>(
    host: &H,
    button: &H::Element,
) -> Result<Direction, DirectionError> {
    host.attribute(button, IMG_INDEX)
        .ok_or(DirectionError::Missing)?
        .parse()
}

/// Returns true when the image is laid out: it has an offset parent or a non-zero height.
///
/// Fixed-position slides have no offset parent, so the height check covers them.
pub fn is_rendered<H: Host>(host: &H, image: &H::Element) -> bool {
    host.has_offset_parent(image) || host.bounding_rect(image).height() > 0.0
}

/// Load the image `button` points at inside its enclosing carousel.
///
/// Returns the targeted image, or `None` when there is nothing to load.
pub fn navigate<H: Host>(
    host: &mut H,
    carousel_selector: &Selector<'_>,
    button: &H::Element,
) -> Option<H::Element> {
    let direction = match direction_of(host, button) {
        Ok(direction) => direction,
        Err(err) => {
            warn!(?button, "{err}");
            return None;
        }
    };
    let Some(carousel) = host.closest(button, carousel_selector) else {
        debug!(?button, %carousel_selector, "toggle button is outside any carousel");
        return None;
    };
    let images = images_of(host, &carousel);
    let shown = match direction {
        Direction::Index(_) => None,
        Direction::Next | Direction::Previous => {
            images.iter().position(|image| is_rendered(host, image))
        }
    };
    let Some(target) = direction.resolve(shown, images.len()) else {
        debug!(?button, ?direction, ?shown, images = images.len(), "no image to load");
        return None;
    };
    let image = images[target].clone();
    load_image(host, &image);
    Some(image)
}
