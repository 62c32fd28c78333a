// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapframe Timing: host-agnostic timing primitives.
//!
//! This crate does not own a clock. Hosts feed it monotonically increasing
//! timestamps in milliseconds (typically from their frame clock) and it answers
//! questions such as "has the debounce window elapsed?" or "how far along is
//! this animation?".
//!
//! - [`Debouncer`]: a cancellable, last-call-wins scheduled value. Scheduling a
//!   new value replaces any pending one and restarts the window.
//! - [`Tween`]: progress of a bounded-duration animation, shaped by an
//!   [`Easing`] curve.
//!
//! ## Minimal example
//!
//! ```rust
//! use mapframe_timing::{Debouncer, Easing, Tween};
//!
//! let mut resize = Debouncer::new(100);
//! resize.schedule((800, 600), 0);
//! resize.schedule((1024, 768), 40);
//! // The first value was replaced; nothing fires inside the window.
//! assert_eq!(resize.poll(120), None);
//! assert_eq!(resize.poll(140), Some((1024, 768)));
//!
//! let tween = Tween::new(1_000, 200, Easing::Linear);
//! assert_eq!(tween.progress(1_100), 0.5);
//! assert!(tween.is_finished(1_200));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod debounce;
mod tween;

pub use debounce::Debouncer;
pub use tween::{Easing, Tween};
