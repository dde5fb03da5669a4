// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A long column of lazy images revealed by scrolling.
//!
//! The first pass loads a generous band around the viewport; every scroll afterwards
//! loads only what comes within 100px of it.
//!
//! Run:
//! - `RUST_LOG=optimus_lazy=trace cargo run -p optimus_demos --example scroll_column`

use kurbo::Rect;
use optimus_lazy::attributes::LOADED;
use optimus_lazy::{LazyLoad, Options, Viewport};
use optimus_page::{ElementId, ElementSpec, Page};
use tracing_subscriber::EnvFilter;

fn loaded(page: &Page, images: &[ElementId]) -> Vec<usize> {
    images
        .iter()
        .enumerate()
        .filter(|(_, id)| page.attribute(**id, LOADED).is_some())
        .map(|(i, _)| i)
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let mut page = Page::new(Viewport::new(0.0, 800.0));
    let body = page.insert(None, ElementSpec::new("body"));
    let images: Vec<ElementId> = (0..12)
        .map(|i| {
            let y0 = f64::from(i) * 500.0;
            page.insert(
                Some(body),
                ElementSpec::lazy_img(format!("photo-{i}.jpg"))
                    .class("optimusIMG")
                    .bounds(Rect::new(0.0, y0, 640.0, y0 + 400.0)),
            )
        })
        .collect();

    let mut lazy = LazyLoad::new(&mut page, Options::default());
    println!("== Initial pass ==\n  loaded {:?}", loaded(&page, &images));
    assert_eq!(loaded(&page, &images), vec![0, 1, 2]);

    for y in [400.0, 1200.0, 2600.0] {
        page.scroll(&mut lazy, y);
        println!("== Scrolled to {y} ==\n  loaded {:?}", loaded(&page, &images));
    }
    assert_eq!(loaded(&page, &images), vec![0, 1, 2, 3, 4, 5, 6]);

    let writes = page.attribute_writes();
    page.scroll(&mut lazy, 2600.0);
    assert_eq!(page.attribute_writes(), writes, "loaded images are never touched again");
    println!("== Repeat scroll ==\n  {writes} attribute writes, unchanged");
}
