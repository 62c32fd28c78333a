// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapframe Event State: pointer gesture state for map interaction.
//!
//! A map view gets pointer down/move/up for panning and a separate click for
//! shape selection. The two overlap: a press that turns into a pan still ends
//! in a click on whatever shape is under the pointer. [`drag::DragState`]
//! separates them with a slop radius and remembers when a click should be
//! swallowed because it ended a pan.
//!
//! The crate does not know about shapes, transforms or any event system; it
//! consumes raw viewport positions and answers questions about the gesture.
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
