// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapframe Selection: which shapes are selected, and the rules for changing it.
//!
//! This crate holds the _bookkeeping_ side of shape selection on a map. It does
//! not know where shapes are or how the view moves; callers map user input
//! into calls and act on the returned outcomes (persist, repaint marks,
//! reframe the view).
//!
//! - [`Selection`] is a small generic container: a set of keys with no
//!   duplicates, a **primary** key (the most recently selected one), and a
//!   **revision** counter that bumps whenever the contents change.
//! - [`SelectionMachine`] applies a [`SelectionPolicy`] (single or multi
//!   select), an optional cap, and a lock that ignores toggles while a reframe
//!   is running.
//! - [`codec`] converts a selection to and from the comma-separated text form
//!   used in share links.
//!
//! ## Minimal example
//!
//! ```rust
//! use mapframe_selection::{SelectionMachine, SelectionPolicy, ToggleOutcome};
//!
//! let mut machine = SelectionMachine::new(SelectionPolicy::Multi, Some(2));
//! assert_eq!(machine.toggle("click-a"), ToggleOutcome::Selected);
//! assert_eq!(machine.toggle("click-b"), ToggleOutcome::Selected);
//!
//! // A third shape would exceed the cap.
//! assert_eq!(machine.toggle("click-c"), ToggleOutcome::Rejected { cap: 2 });
//! assert_eq!(machine.len(), 2);
//!
//! // Deselecting never asks for a reframe.
//! let outcome = machine.toggle("click-a");
//! assert!(outcome.is_committed());
//! assert!(!outcome.wants_reframe());
//! ```
//!
//! ## Share-link form
//!
//! ```rust
//! use mapframe_selection::codec;
//!
//! assert_eq!(codec::encode(["a", "b"]).as_deref(), Some("a,b"));
//! assert_eq!(codec::decode("a,,b"), ["a", "b"]);
//! // An empty selection has no text form; remove the key instead.
//! assert_eq!(codec::encode(Vec::<&str>::new()), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod codec;
mod machine;
mod selection;

pub use machine::{HydrateOutcome, SelectionMachine, SelectionPolicy, ToggleOutcome};
pub use selection::Selection;
