// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the page model: element identifiers, flags, and element descriptions.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

/// Identifier for an element in the page.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` for that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct id.
///
/// Use [`Page::is_alive`](crate::Page::is_alive) to check liveness. Stale ids never alias
/// a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling rendering.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element takes part in layout (not `display: none`).
        const DISPLAYED = 0b0000_0001;
        /// Element is `position: fixed`; it renders but has no offset parent.
        const FIXED     = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::DISPLAYED
    }
}

/// Description of an element to insert.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementSpec {
    /// Tag name, for example `img`.
    pub tag: String,
    /// Class list.
    pub classes: Vec<String>,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Border box in document coordinates.
    pub bounds: Rect,
    /// Rendering flags.
    pub flags: ElementFlags,
}

impl ElementSpec {
    /// An element with the given tag and default flags.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// `<img>` with a deferred source.
    pub fn lazy_img(src: impl Into<String>) -> Self {
        Self::new("img").attr(optimus_lazy::attributes::LAZY_SRC, src)
    }

    /// Add a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set the document-space border box.
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the rendering flags.
    pub fn flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the element `display: none`.
    pub fn hidden(mut self) -> Self {
        self.flags.remove(ElementFlags::DISPLAYED);
        self
    }
}
