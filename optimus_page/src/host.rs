// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`] implementation and event delivery.
//!
//! ## Delivery
//!
//! [`Page::emit`] dispatches an event the way the DOM bubbles it: the listeners of the
//! target run first, then those of each ancestor, each seeing its own element as the
//! current target. [`Page::scroll`] moves the viewport and emits a scroll on the document.
//! [`Page::advance`] moves the clock and delivers due timer ticks.
//!
//! All three take the controller explicitly; the page never stores it.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Rect;
use optimus_lazy::{
    Event, EventKind, Host, LazyLoad, ListenerId, ListenerOptions, Selector, Target, Viewport,
};
use tracing::trace;

use crate::listeners::Listeners;
use crate::page::Page;
use crate::scheduler::{Scheduler, TimerId};
use crate::types::ElementId;

impl Host for Page {
    type Element = ElementId;
    type Timer = TimerId;

    fn query_all(&self, scope: Option<&ElementId>, selector: &Selector<'_>) -> Vec<ElementId> {
        Self::query_all(self, scope.copied(), selector)
    }

    fn closest(&self, element: &ElementId, selector: &Selector<'_>) -> Option<ElementId> {
        Self::closest(self, *element, selector)
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        Self::attribute(self, *element, name).map(String::from)
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) {
        Self::set_attribute(self, *element, name, value);
    }

    fn bounding_rect(&self, element: &ElementId) -> Rect {
        Self::bounding_rect(self, *element)
    }

    fn has_offset_parent(&self, element: &ElementId) -> bool {
        Self::has_offset_parent(self, *element)
    }

    fn viewport(&self) -> Viewport {
        Self::viewport(self)
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.scheduler.set_interval(period)
    }

    fn clear_interval(&mut self, timer: TimerId) {
        self.scheduler.clear_interval(timer);
    }

    fn add_listener(
        &mut self,
        target: Target<ElementId>,
        kind: EventKind,
        listener: ListenerId,
        options: ListenerOptions,
    ) {
        self.listeners.add(target, kind, listener, options);
    }

    fn remove_listener(&mut self, target: Target<ElementId>, kind: EventKind, listener: ListenerId) {
        self.listeners.remove(&target, kind, listener);
    }
}

impl Page {
    /// Registered listeners.
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Interval timers and their firing history.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Dispatch `kind` at `target`, bubbling through the ancestors of an element target.
    ///
    /// Returns how many deliveries `lazy` handled.
    pub fn emit(
        &mut self,
        lazy: &mut LazyLoad<Self>,
        target: Target<ElementId>,
        kind: EventKind,
    ) -> usize {
        let path: Vec<Target<ElementId>> = match target {
            Target::Document => Vec::from([Target::Document]),
            Target::Element(id) => self.ancestry(id).into_iter().map(Target::Element).collect(),
        };
        let mut handled = 0;
        for current_target in path {
            let listeners = self.listeners.for_event(&current_target, kind);
            let event = Event {
                kind,
                current_target,
            };
            for listener in listeners {
                if lazy.handle_event(self, listener, &event) {
                    handled += 1;
                }
            }
        }
        trace!(?target, kind = kind.name(), handled, "event emitted");
        handled
    }

    /// Scroll to `scroll_y` and notify the document's scroll listeners.
    pub fn scroll(&mut self, lazy: &mut LazyLoad<Self>, scroll_y: f64) -> usize {
        self.set_scroll(scroll_y);
        self.emit(lazy, Target::Document, EventKind::Scroll)
    }

    /// Advance the clock by `by`, delivering every tick that falls due on the way.
    ///
    /// Returns the number of ticks delivered.
    pub fn advance(&mut self, lazy: &mut LazyLoad<Self>, by: Duration) -> usize {
        let deadline = self.scheduler.now() + by;
        let mut ticks = 0;
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            lazy.on_tick(self, timer);
            ticks += 1;
        }
        self.scheduler.settle(deadline);
        ticks
    }
}
