// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapframe: a viewport and selection controller for interactive vector maps.
//!
//! A large content layer (a map image) is shown through a smaller viewport.
//! Users pan and zoom it, and click regions of interest to select them. The
//! selection is mirrored into a share-link channel (usually the page URL) so a
//! link reproduces it, and selecting shapes animates the view to frame them.
//!
//! [`MapController`] ties together:
//! - a clamped pan/zoom engine ([`mapframe_view::ViewportEngine`]),
//! - a selection machine with single/multi policies, a cap and a reframe lock
//!   ([`mapframe_selection::SelectionMachine`]),
//! - a [`persistence::SelectionStore`] over a host-provided
//!   [`persistence::SelectionChannel`],
//! - a [`manifest::ShapeManifest`] of selectable shapes and their bounds.
//!
//! Hosts feed input through [`input::InputAdapter`] (or call the controller
//! directly), call [`MapController::tick`] from their frame clock, and render
//! the [`MapEvent`]s drained from [`MapController::take_events`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Rect, Size};
//! use mapframe::manifest::{MapContent, ShapeElement, ShapeId, ShapeManifest};
//! use mapframe::persistence::MemoryLocation;
//! use mapframe::{MapConfig, MapController};
//!
//! let manifest = ShapeManifest::from_elements(
//!     [
//!         ShapeElement::new("click-hall", Rect::new(100.0, 100.0, 300.0, 200.0), Affine::IDENTITY),
//!         ShapeElement::new("legend", Rect::new(0.0, 0.0, 50.0, 50.0), Affine::IDENTITY),
//!     ],
//!     "click",
//! );
//! let content = MapContent::new(Size::new(2000.0, 1000.0), manifest);
//!
//! let mut map = MapController::mount(
//!     MapConfig::default(),
//!     Some(content),
//!     Size::new(800.0, 600.0),
//!     MemoryLocation::default(),
//! )?;
//!
//! map.toggle(&ShapeId::new("click-hall"))?;
//! assert_eq!(map.channel().query(), "selected=click-hall");
//!
//! // The view animates to frame the shape; clicks are ignored meanwhile.
//! assert!(map.is_reframing());
//! map.tick(750);
//! assert!(!map.is_reframing());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod controller;
pub mod error;
pub mod input;
pub mod manifest;
pub mod persistence;

pub use config::MapConfig;
pub use controller::{MapController, MapEvent, Notice};
pub use error::{ConfigError, MountError, SelectError};
