// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optimus Lazy: deferred image loading for viewports and carousels.
//!
//! ## Overview
//!
//! Pages mark `<img>` elements with a class and move their real source into
//! `data-optimus-lazy-src`. This crate decides *when* each image gets its `src`:
//!
//! - Images inside (or within a margin of) the visible vertical band are loaded on
//!   construction and whenever the page scrolls.
//! - Carousels with a `data-optimus-interval` load their first image immediately
//!   and then promote one image per tick, shortly before the carousel rotates.
//! - Toggle buttons inside a carousel load the next, previous or an explicit
//!   image as soon as the user hovers, presses or touches them.
//!
//! It does not fetch, decode or lay out anything. Once `src` is set the host's own
//! loading machinery takes over.
//!
//! ## Host
//!
//! All document access goes through the [`Host`](crate::host::Host) trait: selector
//! queries, attribute reads and writes, bounding rectangles, scroll position,
//! interval timers and listener registration. A browser binding implements it over
//! the DOM. The companion `optimus_page` crate implements it over an in-memory page
//! for tests and tooling.
//!
//! The host delivers events back to the controller:
//! - [`LazyLoad::handle_event`](crate::controller::LazyLoad::handle_event) for scroll and
//!   intent events on listeners the controller registered.
//! - [`LazyLoad::on_tick`](crate::controller::LazyLoad::on_tick) for interval ticks.
//!
//! ## Attribute contract
//!
//! | Attribute | Element | Meaning |
//! |---|---|---|
//! | `data-optimus-lazy-src` | image | source applied once loaded |
//! | `data-optimus-loaded` | image | `"true"` once loaded |
//! | `data-optimus-interval` | carousel | milliseconds between auto-advances |
//! | `data-optimus-img-index` | toggle button | `next`, `previous`, or an index |
//!
//! See [`attributes`] for the constants.
//!
//! ## Re-initialization
//!
//! Single page applications re-run the controller on every route change.
//! [`LazyLoad::replace`](crate::controller::LazyLoad::replace) tears down the previous
//! instance's listeners and timers before the successor attaches its own, so at most one
//! scroll listener and one intent listener per button and event kind are ever live.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod attributes;
pub mod carousel;
pub mod controller;
pub mod host;
pub mod load;
pub mod navigation;
pub mod options;
pub mod selector;
pub mod visibility;

pub use controller::LazyLoad;
pub use host::{Event, EventKind, Host, ListenerId, ListenerOptions, Role, Target, Viewport};
pub use options::{Options, PartialOptions};
pub use selector::Selector;
