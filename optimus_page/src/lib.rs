// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optimus Page: an in-memory page for driving `optimus_lazy` without a browser.
//!
//! - A generational element tree with tags, classes, attributes and document-space boxes.
//! - Display flags feeding `getBoundingClientRect`-style geometry and offset parents.
//! - A listener registry that deduplicates like the DOM.
//! - A manual clock for interval timers that records every firing.
//!
//! [`Page`] implements [`optimus_lazy::Host`], so it can stand in for a document in tests,
//! benchmarks and tooling.
//!
//! ## Not a layout engine
//!
//! Boxes are whatever the caller says they are. Nothing is measured or arranged.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Rect;
//! use optimus_lazy::{LazyLoad, Options, Viewport};
//! use optimus_page::{ElementSpec, Page};
//!
//! let mut page = Page::new(Viewport::new(0.0, 800.0));
//! let body = page.insert(None, ElementSpec::new("body"));
//! let near = page.insert(
//!     Some(body),
//!     ElementSpec::lazy_img("near.jpg")
//!         .class("optimusIMG")
//!         .bounds(Rect::new(0.0, 900.0, 100.0, 1000.0)),
//! );
//! let far = page.insert(
//!     Some(body),
//!     ElementSpec::lazy_img("far.jpg")
//!         .class("optimusIMG")
//!         .bounds(Rect::new(0.0, 3000.0, 100.0, 3100.0)),
//! );
//!
//! let mut lazy = LazyLoad::new(&mut page, Options::default());
//! assert_eq!(page.attribute(near, "src"), Some("near.jpg"));
//! assert_eq!(page.attribute(far, "src"), None);
//!
//! page.scroll(&mut lazy, 2500.0);
//! assert_eq!(page.attribute(far, "src"), Some("far.jpg"));
//!
//! // No carousels, so the clock has nothing to deliver.
//! assert_eq!(page.advance(&mut lazy, Duration::from_secs(10)), 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod host;
mod listeners;
mod page;
mod scheduler;
mod types;

#[cfg(test)]
mod scenarios;

pub use listeners::{Listeners, Registration};
pub use page::Page;
pub use scheduler::{Firing, Scheduler, TimerId};
pub use types::{ElementFlags, ElementId, ElementSpec};
