// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use optimus_lazy::attributes::LOADED;
use optimus_lazy::visibility::{Pass, in_range};
use optimus_lazy::{LazyLoad, Options, Selector, Viewport};
use optimus_page::{ElementSpec, Page};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A single column of `count` marked images, 240px tall with 40px gaps.
fn column_page(count: usize) -> Page {
    let mut page = Page::new(Viewport::new(0.0, 900.0));
    let body = page.insert(None, ElementSpec::new("body"));
    for i in 0..count {
        let y0 = i as f64 * 280.0;
        page.insert(
            Some(body),
            ElementSpec::lazy_img(format!("column-{i}.jpg"))
                .class("optimusIMG")
                .bounds(Rect::new(0.0, y0, 320.0, y0 + 240.0)),
        );
    }
    page
}

/// Marked images scattered over a long page, with unmarked filler in between.
fn scattered_page(count: usize, height: f64) -> Page {
    let mut page = Page::new(Viewport::new(0.0, 900.0));
    let body = page.insert(None, ElementSpec::new("body"));
    let mut rng = Rng::new(0x0971_7005_1A2E_B00C);
    for i in 0..count {
        let y0 = rng.next_f64() * height;
        let section = page.insert(Some(body), ElementSpec::new("section"));
        page.insert(Some(section), ElementSpec::new("p"));
        page.insert(
            Some(section),
            ElementSpec::lazy_img(format!("scattered-{i}.jpg"))
                .class("optimusIMG")
                .bounds(Rect::new(0.0, y0, 200.0, y0 + 150.0)),
        );
    }
    page
}

fn bench_band(c: &mut Criterion) {
    let mut group = c.benchmark_group("band");
    for &n in &[256usize, 1024, 4096] {
        let mut page = column_page(n);
        page.set_scroll(n as f64 * 140.0);
        let images = page.query_all(None, &Selector::tag("img").with_class("optimusIMG"));
        group.throughput(Throughput::Elements(n as u64));
        for pass in [Pass::Initial, Pass::Scroll] {
            group.bench_function(format!("{pass:?}_n{n}").to_lowercase(), |b| {
                b.iter(|| black_box(in_range(&page, black_box(&images), pass).len()));
            });
        }
    }
    group.finish();
}

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");
    for &n in &[256usize, 1024, 4096] {
        let page = scattered_page(n, n as f64 * 200.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("scattered_n{n}"), |b| {
            b.iter_batched(
                || page.clone(),
                |mut page| {
                    let lazy = LazyLoad::new(&mut page, Options::default());
                    black_box(lazy.instance());
                    page.attribute_writes()
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_scroll_through(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_through");
    for &n in &[256usize, 1024] {
        let page = column_page(n);
        let bottom = n as f64 * 280.0;
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("column_n{n}"), |b| {
            b.iter_batched(
                || {
                    let mut page = page.clone();
                    let lazy = LazyLoad::new(&mut page, Options::default());
                    (page, lazy)
                },
                |(mut page, mut lazy)| {
                    let mut y = 0.0;
                    while y < bottom {
                        y += 450.0;
                        page.scroll(&mut lazy, y);
                    }
                    page.attribute_writes()
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_settled_scroll(c: &mut Criterion) {
    // Everything loaded: each scroll only runs the unloaded query.
    let mut page = column_page(1024);
    page.set_scroll(1024.0 * 280.0);
    let mut lazy = LazyLoad::new(&mut page, Options::default());
    let images = page.query_all(None, &Selector::tag("img"));
    for image in &images {
        page.set_attribute(*image, LOADED, "true");
    }
    c.bench_function("settled_scroll_n1024", |b| {
        b.iter(|| black_box(lazy.load_scrolled_into_view(&mut page)));
    });
}

criterion_group!(
    benches,
    bench_band,
    bench_construct,
    bench_scroll_through,
    bench_settled_scroll
);
criterion_main!(benches);
