// Copyright 2025 the Optimus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel timers.
//!
//! ## States
//!
//! A carousel with a usable `data-optimus-interval` loads its first image right away
//! (it is shown by default) and then runs a recurring timer:
//!
//! - `Running`: each tick loads the first image, in document order, not yet marked loaded.
//! - `Stopped`: a tick that finds nothing left to load cancels the timer and forgets it.
//!
//! The timer fires [`LEAD_TIME`] earlier than the carousel's own rotation, so the next
//! image is already on its way when it comes into view.
//!
//! A carousel without the attribute, or with a value that is not a whole number of
//! milliseconds, is logged and has all of its images loaded at once.
//!
//! [`Carousels`] is the set of live timers, keyed by each carousel's position among the
//! carousels discovered in one pass. [`Carousels::reset`] cancels all of them; it runs at
//! the start of every pass, before any new timer starts.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::num::ParseIntError;
use core::time::Duration;

use tracing::{debug, trace, warn};

use crate::attributes::INTERVAL;
use crate::host::Host;
use crate::load::{is_loaded, load_image};
use crate::selector::Selector;

/// How much earlier than the carousel's rotation each tick fires.
pub const LEAD_TIME: Duration = Duration::from_millis(1000);

/// Shortest tick period, for intervals at or below [`LEAD_TIME`].
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A `data-optimus-interval` value that cannot drive a timer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    /// The attribute is present but blank.
    #[error("data-optimus-interval is empty")]
    Empty,
    /// The attribute is not a whole number of milliseconds.
    #[error("data-optimus-interval `{value}` is not a whole number of milliseconds")]
    NotANumber {
        /// The raw attribute value.
        value: String,
        /// Why parsing failed.
        #[source]
        source: ParseIntError,
    },
}

/// Parse a `data-optimus-interval` value (milliseconds, surrounding whitespace allowed).
pub fn parse_interval(raw: &str) -> Result<Duration, IntervalError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IntervalError::Empty);
    }
    trimmed
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|source| IntervalError::NotANumber {
            value: raw.into(),
            source,
        })
}

/// Tick period for a carousel rotating every `interval`.
pub fn tick_period(interval: Duration) -> Duration {
    interval.saturating_sub(LEAD_TIME).max(MIN_PERIOD)
}

/// One live auto-advance timer.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselInterval<E, T> {
    /// Position of the carousel among those discovered in the pass that started it.
    pub key: usize,
    /// The carousel container.
    pub carousel: E,
    /// The host timer.
    pub timer: T,
}

/// Every `<img>` inside `carousel`, whatever its class.
pub fn images_of<H: Host>(host: &H, carousel: &H::Element) -> Vec<H::Element> {
    host.query_all(Some(carousel), &Selector::tag("img"))
}

/// Load the first image of `carousel` not yet marked loaded.
///
/// Returns the image, or `None` when every image is already loaded.
pub fn advance<H: Host>(host: &mut H, carousel: &H::Element) -> Option<H::Element> {
    let next = host
        .query_all(Some(carousel), &Selector::tag("img").unloaded())
        .into_iter()
        .next()?;
    load_image(host, &next);
    Some(next)
}

/// The live carousel timers of one controller.
pub struct Carousels<H: Host> {
    intervals: Vec<CarouselInterval<H::Element, H::Timer>>,
}

impl<H: Host> fmt::Debug for Carousels<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousels")
            .field("intervals", &self.intervals)
            .finish()
    }
}

impl<H: Host> Default for Carousels<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> Carousels<H> {
    /// No live timers.
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Live timers, in start order.
    pub fn intervals(&self) -> &[CarouselInterval<H::Element, H::Timer>] {
        &self.intervals
    }

    /// Keys of carousels with a live timer.
    pub fn active_keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.intervals.iter().map(|i| i.key)
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns true when no timer is live.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Cancel and forget every timer.
    pub fn reset(&mut self, host: &mut H) {
        for interval in self.intervals.drain(..) {
            host.clear_interval(interval.timer);
            trace!(key = interval.key, timer = ?interval.timer, "carousel timer reset");
        }
    }

    /// Start loading the carousel found at position `key`.
    ///
    /// With a usable interval the first image is loaded and a timer started, unless
    /// nothing is left to load. Otherwise the carousel is logged and loaded eagerly.
    pub fn start(&mut self, host: &mut H, key: usize, carousel: H::Element) {
        let images = images_of(host, &carousel);
        let interval = match host.attribute(&carousel, INTERVAL).as_deref().map(parse_interval) {
            Some(Ok(interval)) => interval,
            Some(Err(err)) => {
                warn!(
                    ?carousel,
                    %err,
                    "carousel has an unusable {INTERVAL} property; loading all images"
                );
                load_all(host, &images);
                return;
            }
            None => {
                warn!(?carousel, "carousel is missing {INTERVAL} property");
                load_all(host, &images);
                return;
            }
        };

        if let Some(first) = images.first() {
            load_image(host, first);
        }
        if images.iter().skip(1).all(|image| is_loaded(host, image)) {
            debug!(key, "carousel fully loaded; no timer needed");
            return;
        }

        let period = tick_period(interval);
        let timer = host.set_interval(period);
        debug!(key, ?timer, ?period, "carousel timer started");
        self.intervals.push(CarouselInterval {
            key,
            carousel,
            timer,
        });
    }

    /// Handle a tick of `timer`.
    ///
    /// Returns false when the timer does not belong to this set.
    pub fn tick(&mut self, host: &mut H, timer: H::Timer) -> bool {
        let Some(pos) = self.intervals.iter().position(|i| i.timer == timer) else {
            return false;
        };
        let carousel = self.intervals[pos].carousel.clone();
        match advance(host, &carousel) {
            Some(image) => {
                trace!(key = self.intervals[pos].key, ?image, "carousel tick loaded image");
            }
            None => {
                let done = self.intervals.remove(pos);
                host.clear_interval(done.timer);
                debug!(key = done.key, "carousel fully loaded; timer stopped");
            }
        }
        true
    }
}

fn load_all<H: Host>(host: &mut H, images: &[H::Element]) {
    for image in images {
        load_image(host, image);
    }
}
