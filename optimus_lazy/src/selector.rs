// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The handful of CSS selectors the controller issues.
//!
//! A [`Selector`] is an optional tag, an optional class and an optional "not yet
//! loaded" predicate. Its [`Display`](core::fmt::Display) output is the exact CSS text,
//! so a browser host can pass it straight to `querySelectorAll`:
//!
//! ```
//! use optimus_lazy::Selector;
//!
//! let s = Selector::tag("img").with_class("optimusIMG").unloaded();
//! assert_eq!(s.to_string(), r#"img.optimusIMG:not([data-optimus-loaded="true"])"#);
//! ```
//!
//! In-memory hosts use [`Selector::matches`] instead.

use core::fmt;

use crate::attributes::{LOADED, LOADED_TRUE};

/// A compound selector: `tag.class:not([data-optimus-loaded="true"])`, each part optional.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector<'a> {
    tag: Option<&'a str>,
    class: Option<&'a str>,
    unloaded_only: bool,
}

impl<'a> Selector<'a> {
    /// Match every element.
    pub const fn any() -> Self {
        Self {
            tag: None,
            class: None,
            unloaded_only: false,
        }
    }

    /// Match elements with the given tag name.
    pub const fn tag(tag: &'a str) -> Self {
        Self {
            tag: Some(tag),
            class: None,
            unloaded_only: false,
        }
    }

    /// Match elements carrying the given class.
    pub const fn class(class: &'a str) -> Self {
        Self {
            tag: None,
            class: Some(class),
            unloaded_only: false,
        }
    }

    /// Additionally require a class.
    pub const fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Additionally require that the element is not marked loaded.
    pub const fn unloaded(mut self) -> Self {
        self.unloaded_only = true;
        self
    }

    /// Required tag name, if any.
    pub const fn tag_name(&self) -> Option<&'a str> {
        self.tag
    }

    /// Required class, if any.
    pub const fn class_name(&self) -> Option<&'a str> {
        self.class
    }

    /// Whether loaded elements are excluded.
    pub const fn is_unloaded_only(&self) -> bool {
        self.unloaded_only
    }

    /// Test an element described by its tag, a class membership check and its
    /// `data-optimus-loaded` value.
    ///
    /// Tag names compare ASCII case-insensitively, as in HTML documents.
    pub fn matches(
        &self,
        tag: &str,
        has_class: impl Fn(&str) -> bool,
        loaded: Option<&str>,
    ) -> bool {
        if let Some(want) = self.tag {
            if !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(class) = self.class {
            if !has_class(class) {
                return false;
            }
        }
        !(self.unloaded_only && loaded == Some(LOADED_TRUE))
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag.is_none() && self.class.is_none() && !self.unloaded_only {
            return f.write_str("*");
        }
        if let Some(tag) = self.tag {
            f.write_str(tag)?;
        }
        if let Some(class) = self.class {
            write!(f, ".{class}")?;
        }
        if self.unloaded_only {
            write!(f, r#":not([{LOADED}="{LOADED_TRUE}"])"#)?;
        }
        Ok(())
    }
}
