// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the controller against the in-memory page.

use alloc::format;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Rect;
use optimus_lazy::attributes::{IMG_INDEX, INTERVAL, LOADED, SRC};
use optimus_lazy::load::load_image;
use optimus_lazy::{EventKind, LazyLoad, Options, PartialOptions, Target, Viewport};

use crate::{ElementId, ElementSpec, Page};

const IMG: &str = "optimusIMG";
const CAROUSEL: &str = "optimusIMG-carousel";
const TOGGLE: &str = "optimusIMG-carousel--toggle-btn";

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn page_at(scroll_y: f64) -> (Page, ElementId) {
    let mut page = Page::new(Viewport::new(scroll_y, 800.0));
    let body = page.insert(
        None,
        ElementSpec::new("body").bounds(Rect::new(0.0, 0.0, 1200.0, 10_000.0)),
    );
    (page, body)
}

fn lazy_img(page: &mut Page, parent: ElementId, y0: f64, y1: f64) -> ElementId {
    page.insert(
        Some(parent),
        ElementSpec::lazy_img(format!("img-{y0}.jpg"))
            .class(IMG)
            .bounds(Rect::new(0.0, y0, 400.0, y1)),
    )
}

fn is_loaded(page: &Page, image: ElementId) -> bool {
    page.attribute(image, LOADED) == Some("true")
}

fn loaded(page: &Page, images: &[ElementId]) -> Vec<bool> {
    images.iter().map(|&i| is_loaded(page, i)).collect()
}

struct Carousel {
    root: ElementId,
    images: Vec<ElementId>,
    next: ElementId,
    previous: ElementId,
    second: ElementId,
    unlabeled: ElementId,
}

/// A carousel at the top of the page with `count` slides, only `shown` displayed.
fn carousel(page: &mut Page, parent: ElementId, interval: Option<&str>, count: usize, shown: usize) -> Carousel {
    let mut spec = ElementSpec::new("div")
        .class(CAROUSEL)
        .bounds(Rect::new(0.0, 0.0, 600.0, 400.0));
    if let Some(interval) = interval {
        spec = spec.attr(INTERVAL, interval);
    }
    let root = page.insert(Some(parent), spec);
    let images = (0..count)
        .map(|i| {
            let spec = ElementSpec::lazy_img(format!("slide-{i}.jpg"))
                .bounds(Rect::new(0.0, 0.0, 600.0, 400.0));
            let spec = if i == shown { spec } else { spec.hidden() };
            page.insert(Some(root), spec)
        })
        .collect();
    let button = |page: &mut Page, index: Option<&str>| {
        let mut spec = ElementSpec::new("button").class(TOGGLE);
        if let Some(index) = index {
            spec = spec.attr(IMG_INDEX, index);
        }
        page.insert(Some(root), spec)
    };
    let next = button(page, Some("next"));
    let previous = button(page, Some("previous"));
    let second = button(page, Some("1"));
    let unlabeled = button(page, None);
    Carousel {
        root,
        images,
        next,
        previous,
        second,
        unlabeled,
    }
}

fn show_only(page: &mut Page, c: &Carousel, shown: usize) {
    for (i, &image) in c.images.iter().enumerate() {
        page.set_displayed(image, i == shown);
    }
}

// --- viewport ---

#[test]
fn initial_pass_loads_band_around_viewport() {
    let (mut page, body) = page_at(1000.0);
    let inside = lazy_img(&mut page, body, 1250.0, 1300.0);
    let below = lazy_img(&mut page, body, 2200.0, 2300.0);
    let above = lazy_img(&mut page, body, 600.0, 700.0);
    let margin_top = lazy_img(&mut page, body, 650.0, 701.0);

    let _lazy = LazyLoad::new(&mut page, Options::default());

    assert!(is_loaded(&page, inside));
    assert_eq!(page.attribute(inside, SRC), Some("img-1250.jpg"));
    assert!(!is_loaded(&page, below), "band ends at 2100");
    assert!(!is_loaded(&page, above), "touching the band edge is not enough");
    assert!(is_loaded(&page, margin_top));
    assert_eq!(page.attribute(below, SRC), None);
}

#[test]
fn scroll_uses_tight_margin() {
    let (mut page, body) = page_at(0.0);
    let first = lazy_img(&mut page, body, 1050.0, 1100.0);
    let second = lazy_img(&mut page, body, 1150.0, 1200.0);
    let third = lazy_img(&mut page, body, 1350.0, 1400.0);

    let mut lazy = LazyLoad::new(&mut page, Options::default());
    assert_eq!(loaded(&page, &[first, second, third]), [true, false, false]);

    // Band [200, 1200]: the second image is in, the third is still 150 away.
    assert_eq!(page.scroll(&mut lazy, 300.0), 1);
    assert_eq!(loaded(&page, &[first, second, third]), [true, true, false]);

    page.scroll(&mut lazy, 500.0);
    assert_eq!(loaded(&page, &[first, second, third]), [true, true, true]);
}

#[test]
fn scroll_after_everything_loaded_writes_nothing() {
    let (mut page, body) = page_at(0.0);
    lazy_img(&mut page, body, 100.0, 200.0);
    lazy_img(&mut page, body, 300.0, 400.0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());

    let writes = page.attribute_writes();
    assert_eq!(page.scroll(&mut lazy, 50.0), 1, "listener still runs");
    assert_eq!(lazy.load_scrolled_into_view(&mut page), 0);
    assert_eq!(page.attribute_writes(), writes);
}

#[test]
fn hidden_images_report_zero_box_at_viewport_origin() {
    let (mut page, body) = page_at(5000.0);
    let hidden = page.insert(
        Some(body),
        ElementSpec::lazy_img("hidden.jpg")
            .class(IMG)
            .bounds(Rect::new(0.0, 100.0, 10.0, 200.0))
            .hidden(),
    );
    let _lazy = LazyLoad::new(&mut page, Options::default());
    // A display:none box sits at the scroll offset, inside the band, as in browsers.
    assert!(is_loaded(&page, hidden));
}

#[test]
fn load_is_idempotent() {
    let (mut page, body) = page_at(0.0);
    let img = lazy_img(&mut page, body, 5000.0, 5100.0);

    assert!(load_image(&mut page, &img));
    let writes = page.attribute_writes();
    let src = page.attribute(img, SRC).map(alloc::string::String::from);

    for _ in 0..3 {
        assert!(!load_image(&mut page, &img));
    }
    assert_eq!(page.attribute_writes(), writes);
    assert_eq!(page.attribute(img, SRC).map(alloc::string::String::from), src);
    assert!(is_loaded(&page, img));
}

#[test]
fn missing_lazy_src_still_marks_loaded() {
    let (mut page, body) = page_at(0.0);
    let img = page.insert(
        Some(body),
        ElementSpec::new("img")
            .class(IMG)
            .bounds(Rect::new(0.0, 0.0, 10.0, 10.0)),
    );
    let _lazy = LazyLoad::new(&mut page, Options::default());
    assert!(is_loaded(&page, img));
    assert_eq!(page.attribute(img, SRC), None);
}

#[test]
fn execute_does_not_retouch_loaded_images() {
    let (mut page, body) = page_at(0.0);
    lazy_img(&mut page, body, 0.0, 100.0);
    lazy_img(&mut page, body, 200.0, 300.0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());

    let writes = page.attribute_writes();
    lazy.execute(&mut page);
    lazy.execute(&mut page);
    assert_eq!(page.attribute_writes(), writes);
}

#[test]
fn empty_page_is_a_no_op() {
    let (mut page, _body) = page_at(0.0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());
    assert_eq!(page.attribute_writes(), 0);
    assert_eq!(page.listeners().count(&Target::Document, EventKind::Scroll), 1);
    assert_eq!(lazy.active_carousels().count(), 0);
    assert_eq!(page.scroll(&mut lazy, 400.0), 1);
    assert_eq!(page.attribute_writes(), 0);
}

#[test]
fn custom_class_names() {
    let (mut page, body) = page_at(0.0);
    let default_marked = lazy_img(&mut page, body, 0.0, 100.0);
    let custom = page.insert(
        Some(body),
        ElementSpec::lazy_img("custom.jpg")
            .class("pic")
            .bounds(Rect::new(0.0, 0.0, 10.0, 10.0)),
    );
    let options = PartialOptions {
        class_name: Some("pic".into()),
        ..Default::default()
    };
    let lazy = LazyLoad::new(&mut page, options);
    assert_eq!(lazy.options().carousel_class_name, CAROUSEL);
    assert!(is_loaded(&page, custom));
    assert!(!is_loaded(&page, default_marked));
}

// --- listeners and re-initialization ---

#[test]
fn scroll_listener_is_passive() {
    let (mut page, _body) = page_at(0.0);
    let lazy = LazyLoad::new(&mut page, Options::default());
    let reg = &page.listeners().registrations()[0];
    assert_eq!(reg.target, Target::Document);
    assert_eq!(reg.kind, EventKind::Scroll);
    assert_eq!(reg.listener, lazy.scroll_listener());
    assert!(reg.options.passive);
}

#[test]
fn replace_leaves_one_listener_per_target_and_kind() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("5000"), 3, 0);

    let mut lazy = LazyLoad::new(&mut page, Options::default());
    for _ in 0..3 {
        lazy = lazy.replace(&mut page, Options::default());
    }

    let listeners = page.listeners();
    assert_eq!(listeners.count(&Target::Document, EventKind::Scroll), 1);
    for button in [c.next, c.previous, c.second, c.unlabeled] {
        for kind in EventKind::INTENT {
            let ids = listeners.for_event(&Target::Element(button), kind);
            assert_eq!(ids, [lazy.navigate_listener()], "{}", kind.name());
        }
    }
    assert_eq!(page.scheduler().active(), 1, "old timers were cancelled");
    assert_eq!(lazy.active_carousels().collect::<Vec<_>>(), [0]);
}

#[test]
fn repeated_execute_keeps_single_registrations() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("5000"), 3, 0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());
    lazy.execute(&mut page);
    lazy.execute(&mut page);

    assert_eq!(page.listeners().count(&Target::Document, EventKind::Scroll), 1);
    assert_eq!(
        page.listeners().count(&Target::Element(c.next), EventKind::MouseDown),
        1
    );
    assert_eq!(page.listeners().len(), 1 + 4 * 3);
}

#[test]
fn events_for_stale_instances_are_ignored() {
    let (mut page, body) = page_at(0.0);
    let far = lazy_img(&mut page, body, 2000.0, 2100.0);

    // Two instances without replace: both scroll listeners stay registered.
    let _old = LazyLoad::new(&mut page, Options::default());
    let mut current = LazyLoad::new(&mut page, Options::default());
    assert_eq!(page.listeners().count(&Target::Document, EventKind::Scroll), 2);

    assert_eq!(page.scroll(&mut current, 1500.0), 1, "only the current instance handles");
    assert!(is_loaded(&page, far));
}

#[test]
fn dispose_detaches_everything() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("3000"), 3, 0);
    let lazy = LazyLoad::new(&mut page, Options::default());
    assert!(!page.listeners().is_empty());

    lazy.dispose(&mut page);
    assert!(page.listeners().is_empty());
    assert_eq!(page.scheduler().active(), 0);

    let mut successor = LazyLoad::new(&mut page, Options::default());
    assert_eq!(page.advance(&mut successor, ms(2000)), 1);
    assert!(is_loaded(&page, c.images[1]));
}

// --- carousel timers ---

#[test]
fn timer_promotes_images_then_stops() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("5000"), 3, 0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());

    assert_eq!(loaded(&page, &c.images), [true, false, false]);
    let timer = lazy.carousel_timers().intervals()[0].timer;
    assert_eq!(lazy.carousel_timers().intervals()[0].key, 0);

    assert_eq!(page.advance(&mut lazy, ms(3999)), 0);
    assert_eq!(page.advance(&mut lazy, ms(1)), 1);
    assert_eq!(loaded(&page, &c.images), [true, true, false]);

    page.advance(&mut lazy, ms(4000));
    assert_eq!(loaded(&page, &c.images), [true, true, true]);
    assert!(page.scheduler().is_active(timer));

    // Nothing left: this tick cancels the timer.
    page.advance(&mut lazy, ms(4000));
    assert!(!page.scheduler().is_active(timer));
    assert_eq!(lazy.active_carousels().count(), 0);

    assert_eq!(page.advance(&mut lazy, ms(60_000)), 0);
    assert_eq!(page.scheduler().fire_count(timer), 3);
}

#[test]
fn tick_skips_images_loaded_by_navigation() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("2000"), 4, 0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());

    page.emit(&mut lazy, Target::Element(c.next), EventKind::MouseOver);
    assert_eq!(loaded(&page, &c.images), [true, true, false, false]);

    page.advance(&mut lazy, ms(1000));
    assert_eq!(loaded(&page, &c.images), [true, true, true, false]);
}

#[test]
fn execute_resets_running_timers() {
    let (mut page, body) = page_at(0.0);
    let _c = carousel(&mut page, body, Some("5000"), 3, 0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());
    let before = lazy.carousel_timers().intervals()[0].timer;

    page.advance(&mut lazy, ms(2000));
    lazy.execute(&mut page);
    assert!(!page.scheduler().is_active(before));
    let after = lazy.carousel_timers().intervals()[0].timer;
    assert_ne!(before, after);

    page.advance(&mut lazy, ms(10_000));
    assert_eq!(page.scheduler().fire_count(before), 0);
    assert!(page.scheduler().fire_count(after) >= 1);
    assert!(
        page.scheduler()
            .fired()
            .iter()
            .all(|f| f.timer == after),
        "the pre-reset timer never fires again"
    );
}

#[test]
fn carousels_are_keyed_by_discovery_order() {
    let (mut page, body) = page_at(0.0);
    carousel(&mut page, body, Some("5000"), 2, 0);
    carousel(&mut page, body, None, 2, 0);
    carousel(&mut page, body, Some("3000"), 2, 0);
    let lazy = LazyLoad::new(&mut page, Options::default());
    assert_eq!(lazy.active_carousels().collect::<Vec<_>>(), [0, 2]);
}

#[test]
fn missing_interval_loads_everything() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, None, 3, 0);
    let lazy = LazyLoad::new(&mut page, Options::default());
    assert_eq!(loaded(&page, &c.images), [true, true, true]);
    assert_eq!(lazy.active_carousels().count(), 0);
    assert_eq!(page.scheduler().active(), 0);
}

#[test]
fn malformed_interval_behaves_like_missing() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("fast"), 3, 0);
    let lazy = LazyLoad::new(&mut page, Options::default());
    assert_eq!(loaded(&page, &c.images), [true, true, true]);
    assert_eq!(lazy.active_carousels().count(), 0);
}

#[test]
fn single_image_carousel_needs_no_timer() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("5000"), 1, 0);
    let lazy = LazyLoad::new(&mut page, Options::default());
    assert!(is_loaded(&page, c.images[0]));
    assert_eq!(lazy.active_carousels().count(), 0);
    assert_eq!(page.scheduler().active(), 0);
}

#[test]
fn short_interval_ticks_every_millisecond() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("800"), 3, 0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());
    assert_eq!(page.advance(&mut lazy, ms(3)), 3);
    assert_eq!(loaded(&page, &c.images), [true, true, true]);
    assert_eq!(page.scheduler().active(), 0);
}

// --- navigation ---

#[test]
fn previous_wraps_from_first_image() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("60000"), 3, 0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());

    page.emit(&mut lazy, Target::Element(c.previous), EventKind::MouseDown);
    assert_eq!(loaded(&page, &c.images), [true, false, true]);
}

#[test]
fn next_does_not_wrap_from_last_image() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("60000"), 3, 0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());
    show_only(&mut page, &c, 2);

    let writes = page.attribute_writes();
    page.emit(&mut lazy, Target::Element(c.next), EventKind::TouchStart);
    assert_eq!(page.attribute_writes(), writes);
    assert_eq!(loaded(&page, &c.images), [true, false, false]);

    page.emit(&mut lazy, Target::Element(c.previous), EventKind::TouchStart);
    assert_eq!(loaded(&page, &c.images), [true, true, false]);
}

#[test]
fn explicit_index_ignores_visibility() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("60000"), 3, 0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());
    for &image in &c.images {
        page.set_displayed(image, false);
    }
    page.emit(&mut lazy, Target::Element(c.second), EventKind::MouseOver);
    assert_eq!(loaded(&page, &c.images), [true, true, false]);
}

#[test]
fn unlabeled_button_does_nothing() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("60000"), 3, 1);
    let mut lazy = LazyLoad::new(&mut page, Options::default());

    let writes = page.attribute_writes();
    assert_eq!(
        page.emit(&mut lazy, Target::Element(c.unlabeled), EventKind::MouseDown),
        1
    );
    assert_eq!(page.attribute_writes(), writes);
}

#[test]
fn intent_bubbles_from_nested_content() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("60000"), 3, 0);
    let icon = page.insert(Some(c.next), ElementSpec::new("span"));
    let mut lazy = LazyLoad::new(&mut page, Options::default());

    assert_eq!(page.emit(&mut lazy, Target::Element(icon), EventKind::MouseOver), 1);
    assert_eq!(loaded(&page, &c.images), [true, true, false]);
}

#[test]
fn fixed_slide_counts_as_shown_by_height() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, Some("60000"), 3, 1);
    page.set_flags(
        c.images[1],
        crate::ElementFlags::DISPLAYED | crate::ElementFlags::FIXED,
    );
    let mut lazy = LazyLoad::new(&mut page, Options::default());
    assert!(!page.has_offset_parent(c.images[1]));

    page.emit(&mut lazy, Target::Element(c.next), EventKind::MouseOver);
    assert_eq!(loaded(&page, &c.images), [true, false, true]);
}

#[test]
fn removed_carousel_stops_navigation_and_listeners() {
    let (mut page, body) = page_at(0.0);
    let c = carousel(&mut page, body, None, 2, 0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());
    page.remove(c.root);
    assert_eq!(page.listeners().len(), 1, "only the scroll listener remains");

    lazy.execute(&mut page);
    assert_eq!(page.listeners().len(), 1);
}
