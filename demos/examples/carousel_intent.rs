// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toggle buttons load the slide they point at on hover, press or touch.
//!
//! Options come from a JSON configuration object, as a page would pass them.
//!
//! Run:
//! - `cargo run -p optimus_demos --example carousel_intent`

use kurbo::Rect;
use optimus_lazy::attributes::{IMG_INDEX, LOADED};
use optimus_lazy::{EventKind, LazyLoad, PartialOptions, Target, Viewport};
use optimus_page::{ElementId, ElementSpec, Page};
use tracing_subscriber::EnvFilter;

fn state(page: &Page, slides: &[ElementId]) -> String {
    slides
        .iter()
        .map(|&s| if page.attribute(s, LOADED).is_some() { '#' } else { '.' })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let options: PartialOptions = serde_json::from_str(
        r#"{ "carouselClassName": "gallery", "carouselToggleImageBtn": "gallery-btn" }"#,
    )
    .expect("valid options");

    let mut page = Page::new(Viewport::new(0.0, 800.0));
    let body = page.insert(None, ElementSpec::new("body"));
    // A ten minute rotation: the buttons get there long before the timer.
    let gallery = page.insert(
        Some(body),
        ElementSpec::new("div")
            .class("gallery")
            .attr("data-optimus-interval", "600000")
            .bounds(Rect::new(0.0, 0.0, 800.0, 450.0)),
    );
    let slides: Vec<ElementId> = (0..5)
        .map(|i| {
            let spec = ElementSpec::lazy_img(format!("gallery-{i}.jpg"))
                .bounds(Rect::new(0.0, 0.0, 800.0, 450.0));
            page.insert(Some(gallery), if i == 0 { spec } else { spec.hidden() })
        })
        .collect();
    let button = |page: &mut Page, index: &str| {
        page.insert(
            Some(gallery),
            ElementSpec::new("button").class("gallery-btn").attr(IMG_INDEX, index),
        )
    };
    let previous = button(&mut page, "previous");
    let next = button(&mut page, "next");
    let fourth = button(&mut page, "3");
    let arrow = page.insert(Some(next), ElementSpec::new("span"));

    let mut lazy = LazyLoad::new(&mut page, options);
    println!("== Constructed ==\n  [{}]", state(&page, &slides));

    page.emit(&mut lazy, Target::Element(previous), EventKind::MouseOver);
    println!("== Hover previous (wraps) ==\n  [{}]", state(&page, &slides));

    page.emit(&mut lazy, Target::Element(arrow), EventKind::TouchStart);
    println!("== Touch the arrow inside next ==\n  [{}]", state(&page, &slides));

    page.emit(&mut lazy, Target::Element(fourth), EventKind::MouseDown);
    println!("== Press slide 4 ==\n  [{}]", state(&page, &slides));

    assert_eq!(state(&page, &slides), "##.##");
}
