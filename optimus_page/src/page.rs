// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page implementation: structure, attributes, geometry, queries.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Vec2};
use optimus_lazy::attributes::LOADED;
use optimus_lazy::{Selector, Viewport};

use crate::listeners::Listeners;
use crate::scheduler::Scheduler;
use crate::types::{ElementFlags, ElementId, ElementSpec};

impl Default for Page {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

/// An in-memory document.
#[derive(Clone)]
pub struct Page {
    elements: Vec<Option<Element>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<ElementId>,
    viewport: Viewport,
    writes: usize,
    pub(crate) listeners: Listeners,
    pub(crate) scheduler: Scheduler,
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Page")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("viewport", &self.viewport)
            .field("attribute_writes", &self.writes)
            .field("listeners", &self.listeners.len())
            .field("timers", &self.scheduler.active())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    bounds: Rect,
    flags: ElementFlags,
}

impl Element {
    fn new(generation: u32, spec: ElementSpec) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            tag: spec.tag,
            classes: spec.classes,
            attributes: spec.attributes.into_iter().collect(),
            bounds: spec.bounds,
            flags: spec.flags,
        }
    }

    fn matches(&self, selector: &Selector<'_>) -> bool {
        selector.matches(
            &self.tag,
            |class| self.classes.iter().any(|c| c == class),
            self.attributes.get(LOADED).map(String::as_str),
        )
    }
}

impl Page {
    /// Create an empty page showing `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            viewport,
            writes: 0,
            listeners: Listeners::default(),
            scheduler: Scheduler::default(),
        }
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, spec: ElementSpec) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(Element::new(generation, spec));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(Element::new(generation, spec)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        match parent {
            Some(p) if self.is_alive(p) => {
                self.element_mut(p).children.push(id);
                self.element_mut(id).parent = Some(p);
            }
            _ => self.roots.push(id),
        }
        id
    }

    /// Remove an element and its subtree, along with their listeners.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        let parent = self.element(id).parent;
        match parent {
            Some(parent) => self.element_mut(parent).children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        self.remove_subtree(id);
    }

    fn remove_subtree(&mut self, id: ElementId) {
        let children = core::mem::take(&mut self.element_mut(id).children);
        for child in children {
            self.remove_subtree(child);
        }
        self.listeners.forget_element(id);
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.elements
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Parent of a live element.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element_opt(id)?.parent
    }

    /// Children of a live element, in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element_opt(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// Attribute value of a live element.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element_opt(id)?.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute. Every call on a live element counts as a write.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(e) = self.element_opt_mut(id) {
            e.attributes.insert(name.into(), value.into());
            self.writes += 1;
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if let Some(e) = self.element_opt_mut(id) {
            e.attributes.remove(name);
        }
    }

    /// Number of attribute writes since the page was created.
    pub fn attribute_writes(&self) -> usize {
        self.writes
    }

    /// Update the document-space border box.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(e) = self.element_opt_mut(id) {
            e.bounds = bounds;
        }
    }

    /// Update rendering flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(e) = self.element_opt_mut(id) {
            e.flags = flags;
        }
    }

    /// Toggle `display: none` on an element.
    pub fn set_displayed(&mut self, id: ElementId, displayed: bool) {
        if let Some(e) = self.element_opt_mut(id) {
            e.flags.set(ElementFlags::DISPLAYED, displayed);
        }
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Move the viewport without notifying anyone.
    pub fn set_scroll(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
    }

    /// Returns true when the element and all of its ancestors are displayed.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(e) = self.element_opt(current) else {
                return false;
            };
            if !e.flags.contains(ElementFlags::DISPLAYED) {
                return false;
            }
            cursor = e.parent;
        }
        true
    }

    /// Border box relative to the viewport; empty at the origin when not rendered.
    pub fn bounding_rect(&self, id: ElementId) -> Rect {
        match self.element_opt(id) {
            Some(e) if self.is_rendered(id) => e.bounds - Vec2::new(0.0, self.viewport.scroll_y),
            _ => Rect::ZERO,
        }
    }

    /// Returns true for rendered, non-fixed elements below a root.
    pub fn has_offset_parent(&self, id: ElementId) -> bool {
        self.element_opt(id).is_some_and(|e| {
            e.parent.is_some() && !e.flags.contains(ElementFlags::FIXED) && self.is_rendered(id)
        })
    }

    /// Elements matching `selector` in document order; with `scope`, only its descendants.
    pub fn query_all(&self, scope: Option<ElementId>, selector: &Selector<'_>) -> Vec<ElementId> {
        let mut out = Vec::new();
        match scope {
            Some(root) => {
                for &child in self.children(root) {
                    self.collect(child, selector, &mut out);
                }
            }
            None => {
                for &root in &self.roots {
                    self.collect(root, selector, &mut out);
                }
            }
        }
        out
    }

    /// Nearest inclusive ancestor matching `selector`.
    pub fn closest(&self, id: ElementId, selector: &Selector<'_>) -> Option<ElementId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let e = self.element_opt(current)?;
            if e.matches(selector) {
                return Some(current);
            }
            cursor = e.parent;
        }
        None
    }

    /// Path from `id` up to its root (inclusive on both ends).
    pub fn ancestry(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(e) = self.element_opt(current) else {
                break;
            };
            out.push(current);
            cursor = e.parent;
        }
        out
    }

    // --- internals ---

    fn collect(&self, id: ElementId, selector: &Selector<'_>, out: &mut Vec<ElementId>) {
        let e = self.element(id);
        if e.matches(selector) {
            out.push(id);
        }
        for &child in &e.children {
            self.collect(child, selector, out);
        }
    }

    /// Access an element; panics if `id` is stale.
    pub(crate) fn element(&self, id: ElementId) -> &Element {
        self.elements[id.idx()].as_ref().expect("dangling ElementId")
    }

    /// Access an element mutably; panics if `id` is stale.
    pub(crate) fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn element_opt(&self, id: ElementId) -> Option<&Element> {
        let e = self.elements.get(id.idx())?.as_ref()?;
        (e.generation == id.1).then_some(e)
    }

    fn element_opt_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let e = self.elements.get_mut(id.idx())?.as_mut()?;
        if e.generation != id.1 {
            return None;
        }
        Some(e)
    }
}
