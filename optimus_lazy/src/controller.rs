// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The lazy load controller.
//!
//! ## Lifecycle
//!
//! 1) [`LazyLoad::new`] merges the options and runs [`LazyLoad::execute`]:
//!    - cancel every carousel timer of this instance,
//!    - load images in or near the viewport and (re)attach the passive scroll listener,
//!    - (re)attach intent listeners on toggle buttons and start carousel timers.
//! 2) The host forwards events to [`LazyLoad::handle_event`] and timer ticks to
//!    [`LazyLoad::on_tick`].
//! 3) On re-initialization (for example a client-side route change), call
//!    [`LazyLoad::replace`] so the previous instance detaches before its successor
//!    attaches. [`LazyLoad::dispose`] tears an instance down for good.
//!
//! ## Minimal example
//!
//! ```no_run
//! use optimus_lazy::{Event, EventKind, Host, LazyLoad, Options, Target};
//!
//! fn run<H: Host>(host: &mut H) {
//!     let mut lazy = LazyLoad::new(host, Options::default());
//!
//!     // Later, from the host's scroll notification:
//!     let event = Event { kind: EventKind::Scroll, current_target: Target::Document };
//!     lazy.handle_event(host, lazy.scroll_listener(), &event);
//!
//!     // After navigation, swap in a fresh controller.
//!     let lazy = lazy.replace(host, Options::default());
//!     lazy.dispose(host);
//! }
//! ```

use alloc::vec::Vec;
use core::fmt;

use tracing::{debug, trace};

use crate::carousel::Carousels;
use crate::host::{Event, EventKind, Host, InstanceId, ListenerId, ListenerOptions, Role, Target};
use crate::navigation::navigate;
use crate::options::Options;
use crate::visibility::{Pass, evaluate_and_load};

/// Defers `src` assignment on marked images until they are needed.
pub struct LazyLoad<H: Host> {
    instance: InstanceId,
    options: Options,
    carousels: Carousels<H>,
    /// Toggle buttons currently carrying this instance's intent listener.
    toggles: Vec<H::Element>,
    scroll_attached: bool,
}

impl<H: Host> fmt::Debug for LazyLoad<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyLoad")
            .field("instance", &self.instance)
            .field("options", &self.options)
            .field("carousels", &self.carousels)
            .field("toggles", &self.toggles.len())
            .field("scroll_attached", &self.scroll_attached)
            .finish()
    }
}

impl<H: Host> LazyLoad<H> {
    /// Configure a controller and run the first pass.
    pub fn new(host: &mut H, options: impl Into<Options>) -> Self {
        let mut this = Self {
            instance: InstanceId::next(),
            options: options.into(),
            carousels: Carousels::new(),
            toggles: Vec::new(),
            scroll_attached: false,
        };
        debug!(instance = this.instance.get(), options = ?this.options, "lazy load constructed");
        this.execute(host);
        this
    }

    /// Tear this instance down, then construct its successor.
    ///
    /// However often this runs, the page ends up with one scroll listener and one
    /// intent listener per toggle button and event kind.
    pub fn replace(self, host: &mut H, options: impl Into<Options>) -> Self {
        self.dispose(host);
        Self::new(host, options)
    }

    /// Detach every listener and cancel every timer of this instance.
    pub fn dispose(mut self, host: &mut H) {
        self.carousels.reset(host);
        self.detach_scroll(host);
        self.detach_toggles(host);
        debug!(instance = self.instance.get(), "lazy load disposed");
    }

    /// Full (re)initialization against the current document.
    ///
    /// Already loaded images stay untouched. No matching elements is not an error.
    pub fn execute(&mut self, host: &mut H) {
        self.carousels.reset(host);
        self.image_pass(host);
        self.carousel_pass(host);
    }

    /// Deliver an event for a listener this controller may have registered.
    ///
    /// Returns false when the listener belongs to another instance or does not handle
    /// this kind of event.
    pub fn handle_event(
        &mut self,
        host: &mut H,
        listener: ListenerId,
        event: &Event<H::Element>,
    ) -> bool {
        if listener.instance != self.instance {
            trace!(?listener, "ignoring event for a stale listener");
            return false;
        }
        match (listener.role, &event.current_target) {
            (Role::Scroll, _) if event.kind == EventKind::Scroll => {
                self.load_scrolled_into_view(host);
                true
            }
            (Role::Navigate, Target::Element(button)) if event.kind.is_intent() => {
                navigate(host, &self.options.carousel_selector(), button);
                true
            }
            _ => false,
        }
    }

    /// Deliver a timer tick. Returns false when the timer is not one of ours.
    pub fn on_tick(&mut self, host: &mut H, timer: H::Timer) -> bool {
        self.carousels.tick(host, timer)
    }

    /// Re-evaluate images not yet loaded against the tight scroll band.
    ///
    /// Returns how many images were loaded.
    pub fn load_scrolled_into_view(&mut self, host: &mut H) -> usize {
        let images = host.query_all(None, &self.options.image_selector().unloaded());
        if images.is_empty() {
            return 0;
        }
        evaluate_and_load(host, &images, Pass::Scroll)
    }

    /// Options in effect.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Identity of this instance.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// The listener registered for `role`.
    pub fn listener(&self, role: Role) -> ListenerId {
        ListenerId {
            instance: self.instance,
            role,
        }
    }

    /// The document scroll listener.
    pub fn scroll_listener(&self) -> ListenerId {
        self.listener(Role::Scroll)
    }

    /// The toggle button intent listener.
    pub fn navigate_listener(&self) -> ListenerId {
        self.listener(Role::Navigate)
    }

    /// Keys of carousels whose timer is still running.
    pub fn active_carousels(&self) -> impl Iterator<Item = usize> + '_ {
        self.carousels.active_keys()
    }

    /// Live carousel timers.
    pub fn carousel_timers(&self) -> &Carousels<H> {
        &self.carousels
    }

    fn image_pass(&mut self, host: &mut H) {
        let images = host.query_all(None, &self.options.image_selector());
        let loaded = evaluate_and_load(host, &images, Pass::Initial);
        debug!(images = images.len(), loaded, "initial viewport pass");

        self.detach_scroll(host);
        host.add_listener(
            Target::Document,
            EventKind::Scroll,
            self.scroll_listener(),
            ListenerOptions::PASSIVE,
        );
        self.scroll_attached = true;
    }

    fn carousel_pass(&mut self, host: &mut H) {
        self.detach_toggles(host);
        let listener = self.navigate_listener();
        let carousels = host.query_all(None, &self.options.carousel_selector());
        for (key, carousel) in carousels.into_iter().enumerate() {
            for button in host.query_all(Some(&carousel), &self.options.toggle_selector()) {
                for kind in EventKind::INTENT {
                    host.add_listener(
                        Target::Element(button.clone()),
                        kind,
                        listener,
                        ListenerOptions::default(),
                    );
                }
                self.toggles.push(button);
            }
            self.carousels.start(host, key, carousel);
        }
        debug!(
            toggles = self.toggles.len(),
            timers = self.carousels.len(),
            "carousel pass"
        );
    }

    fn detach_scroll(&mut self, host: &mut H) {
        if self.scroll_attached {
            host.remove_listener(Target::Document, EventKind::Scroll, self.scroll_listener());
            self.scroll_attached = false;
        }
    }

    fn detach_toggles(&mut self, host: &mut H) {
        let listener = self.navigate_listener();
        for button in self.toggles.drain(..) {
            for kind in EventKind::INTENT {
                host.remove_listener(Target::Element(button.clone()), kind, listener);
            }
        }
    }
}
