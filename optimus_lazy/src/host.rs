// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities: document queries, geometry, timers, and listeners.
//!
//! ## Overview
//!
//! The controller never touches a document directly. It asks a [`Host`] for the
//! elements matching a [`Selector`], reads and writes attributes, measures boxes and
//! schedules interval timers. Listener registration is by value: a [`ListenerId`] is a
//! plain identifier owned by the controller, so detaching always uses the identical
//! value that was used to attach.
//!
//! Hosts must deduplicate registrations the way the DOM does: adding the same
//! `(target, kind, listener)` twice keeps a single registration.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;

use kurbo::Rect;

use crate::selector::Selector;

/// Vertical scroll state of the page.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Distance scrolled from the top of the document.
    pub scroll_y: f64,
    /// Height of the visible area.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport scrolled to `scroll_y` with the given visible height.
    pub const fn new(scroll_y: f64, height: f64) -> Self {
        Self { scroll_y, height }
    }
}

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target<E> {
    /// The document itself (scroll notifications).
    Document,
    /// A single element.
    Element(E),
}

/// Event kinds the controller listens for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Document scrolled.
    Scroll,
    /// Pointer moved onto an element.
    MouseOver,
    /// Pointer button pressed on an element.
    MouseDown,
    /// Touch began on an element.
    TouchStart,
}

impl EventKind {
    /// Kinds that signal navigation intent on a toggle button, in registration order.
    pub const INTENT: [Self; 3] = [Self::MouseOver, Self::MouseDown, Self::TouchStart];

    /// DOM event type name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::MouseOver => "mouseover",
            Self::MouseDown => "mousedown",
            Self::TouchStart => "touchstart",
        }
    }

    /// Returns true for the navigation intent kinds.
    pub const fn is_intent(self) -> bool {
        !matches!(self, Self::Scroll)
    }
}

/// Registration options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// The listener never cancels the event, so the host need not wait for it.
    pub passive: bool,
}

impl ListenerOptions {
    /// Passive registration.
    pub const PASSIVE: Self = Self { passive: true };
}

/// Identity of one controller instance.
///
/// Every [`LazyLoad`](crate::controller::LazyLoad) draws a fresh id, so listeners left
/// behind by an earlier instance can be told apart from the current ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, unique within the process.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// What a listener does when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Re-evaluate unloaded images against the viewport.
    Scroll,
    /// Load the image a toggle button points at.
    Navigate,
}

/// Stable listener identity: the owning instance plus the listener's role.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId {
    /// Instance that registered the listener.
    pub instance: InstanceId,
    /// Behavior of the listener.
    pub role: Role,
}

/// An event delivered to a registered listener.
#[derive(Clone, Debug, PartialEq)]
pub struct Event<E> {
    /// Event kind.
    pub kind: EventKind,
    /// Target the listener is attached to (not a nested element the event started on).
    pub current_target: Target<E>,
}

/// Document capabilities the controller needs.
pub trait Host {
    /// Handle to an element.
    type Element: Clone + PartialEq + Debug;
    /// Handle to an interval timer.
    type Timer: Copy + Eq + Debug;

    /// All elements matching `selector`, in document order.
    ///
    /// With `scope`, only descendants of that element are considered (the scope itself
    /// never matches).
    fn query_all(
        &self,
        scope: Option<&Self::Element>,
        selector: &Selector<'_>,
    ) -> Vec<Self::Element>;

    /// The nearest inclusive ancestor of `element` matching `selector`.
    fn closest(&self, element: &Self::Element, selector: &Selector<'_>) -> Option<Self::Element>;

    /// Attribute value, or `None` when absent.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Set an attribute value.
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Border box relative to the viewport. Elements that are not rendered report an
    /// empty rectangle at the origin.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Returns true when the element participates in layout with a positioned ancestor.
    fn has_offset_parent(&self, element: &Self::Element) -> bool;

    /// Current scroll position and visible height.
    fn viewport(&self) -> Viewport;

    /// Start a recurring timer.
    fn set_interval(&mut self, period: Duration) -> Self::Timer;

    /// Cancel a recurring timer. Unknown timers are ignored.
    fn clear_interval(&mut self, timer: Self::Timer);

    /// Register `listener` for `kind` events on `target`.
    fn add_listener(
        &mut self,
        target: Target<Self::Element>,
        kind: EventKind,
        listener: ListenerId,
        options: ListenerOptions,
    );

    /// Remove a registration. Unknown registrations are ignored.
    fn remove_listener(
        &mut self,
        target: Target<Self::Element>,
        kind: EventKind,
        listener: ListenerId,
    );
}
