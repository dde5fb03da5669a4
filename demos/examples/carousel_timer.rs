// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel auto-advance ahead of the rotation.
//!
//! A carousel rotating every 3 seconds gets a timer every 2 seconds, so each slide is
//! requested a second before it is shown. Once every slide is loaded the timer stops.
//!
//! Run:
//! - `RUST_LOG=optimus_lazy=debug cargo run -p optimus_demos --example carousel_timer`

use core::time::Duration;

use kurbo::Rect;
use optimus_lazy::attributes::{INTERVAL, LOADED};
use optimus_lazy::{LazyLoad, Options, Viewport};
use optimus_page::{ElementSpec, Page};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let mut page = Page::new(Viewport::new(0.0, 800.0));
    let body = page.insert(None, ElementSpec::new("body"));
    let carousel = page.insert(
        Some(body),
        ElementSpec::new("div")
            .class("optimusIMG-carousel")
            .attr(INTERVAL, "3000")
            .bounds(Rect::new(0.0, 0.0, 800.0, 450.0)),
    );
    let slides: Vec<_> = (0..4)
        .map(|i| {
            let spec = ElementSpec::lazy_img(format!("slide-{i}.jpg"))
                .bounds(Rect::new(0.0, 0.0, 800.0, 450.0));
            page.insert(Some(carousel), if i == 0 { spec } else { spec.hidden() })
        })
        .collect();

    let mut lazy = LazyLoad::new(&mut page, Options::default());
    let timer = lazy.carousel_timers().intervals()[0].timer;

    for second in 1..=10 {
        let ticks = page.advance(&mut lazy, Duration::from_secs(1));
        let state: String = slides
            .iter()
            .map(|&s| if page.attribute(s, LOADED).is_some() { '#' } else { '.' })
            .collect();
        println!("t={second:>2}s ticks={ticks} slides=[{state}]");
    }

    assert!(slides.iter().all(|&s| page.attribute(s, LOADED).is_some()));
    assert!(!page.scheduler().is_active(timer));
    assert_eq!(lazy.active_carousels().count(), 0);
    println!(
        "== Timer fired {} times, then stopped ==",
        page.scheduler().fire_count(timer)
    );
}
