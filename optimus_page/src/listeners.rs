// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry with DOM-style deduplication.

use alloc::vec::Vec;

use optimus_lazy::{EventKind, ListenerId, ListenerOptions, Target};

use crate::types::ElementId;

/// One registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Where the listener is attached.
    pub target: Target<ElementId>,
    /// Event kind.
    pub kind: EventKind,
    /// Listener identity.
    pub listener: ListenerId,
    /// Options given on attach.
    pub options: ListenerOptions,
}

/// All registrations of a page, in attach order.
#[derive(Clone, Debug, Default)]
pub struct Listeners {
    entries: Vec<Registration>,
}

impl Listeners {
    /// Register a listener. A duplicate `(target, kind, listener)` is ignored.
    pub fn add(
        &mut self,
        target: Target<ElementId>,
        kind: EventKind,
        listener: ListenerId,
        options: ListenerOptions,
    ) {
        if self.position(&target, kind, listener).is_some() {
            return;
        }
        self.entries.push(Registration {
            target,
            kind,
            listener,
            options,
        });
    }

    /// Remove a registration; unknown registrations are ignored.
    pub fn remove(&mut self, target: &Target<ElementId>, kind: EventKind, listener: ListenerId) {
        if let Some(pos) = self.position(target, kind, listener) {
            self.entries.remove(pos);
        }
    }

    /// Drop every registration on `element`.
    pub(crate) fn forget_element(&mut self, element: ElementId) {
        self.entries.retain(|r| r.target != Target::Element(element));
    }

    /// Listeners for `kind` on `target`, in attach order.
    pub fn for_event(&self, target: &Target<ElementId>, kind: EventKind) -> Vec<ListenerId> {
        self.entries
            .iter()
            .filter(|r| &r.target == target && r.kind == kind)
            .map(|r| r.listener)
            .collect()
    }

    /// Number of registrations for `kind` on `target`.
    pub fn count(&self, target: &Target<ElementId>, kind: EventKind) -> usize {
        self.entries
            .iter()
            .filter(|r| &r.target == target && r.kind == kind)
            .count()
    }

    /// All registrations.
    pub fn registrations(&self) -> &[Registration] {
        &self.entries
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(
        &self,
        target: &Target<ElementId>,
        kind: EventKind,
        listener: ListenerId,
    ) -> Option<usize> {
        self.entries
            .iter()
            .position(|r| &r.target == target && r.kind == kind && r.listener == listener)
    }
}
