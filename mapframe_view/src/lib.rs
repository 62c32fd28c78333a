// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapframe View: a clamped pan/zoom engine for a fixed-size content layer.
//!
//! This crate provides a small, headless model of a map-style view: a large
//! content layer (for example an SVG map) shown through a smaller viewport.
//! It focuses on:
//! - The content-to-viewport transform ([`ViewTransform`]): uniform scale plus
//!   translation.
//! - Extents ([`Extents`]) that keep the content covering the viewport: the
//!   scale never drops below the fit-to-viewport minimum and panning never
//!   reveals anything past the content edges.
//! - An engine ([`ViewportEngine`]) with animated zoom, reset and reframe
//!   transitions, immediate pan and wheel zoom, and debounced resize handling.
//! - A bounds-fitting calculator ([`fit::fit_bounds`]) that frames one or more
//!   content-space boxes with padding.
//! - Stateless [`geometry`] helpers (union, transformed bounds, clamping).
//!
//! It does **not** own a scene graph, a renderer, or a clock. Callers are
//! expected to:
//! - Feed frame timestamps into [`ViewportEngine::tick`].
//! - Render the transform reported by [`EngineEvent::TransformChanged`].
//! - Translate raw input into engine calls at a higher layer.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use mapframe_view::{EngineOptions, ViewportEngine};
//!
//! let mut engine = ViewportEngine::new(EngineOptions::default());
//! // 2000x1000 map shown in an 800x600 viewport.
//! engine.initialize(Size::new(2000.0, 1000.0), Size::new(800.0, 600.0));
//!
//! // Content fills the viewport at the minimum scale.
//! let fit = engine.transform();
//! assert_eq!(fit.scale, 0.6);
//!
//! // Zoom in around the viewport center over 200 ms.
//! engine.zoom_by(1.2, 200);
//! engine.tick(200);
//! assert!(engine.transform().scale > fit.scale);
//!
//! // Convert a viewport point into content space (for hit testing, etc.).
//! let content_pt = engine.view_to_content_point(Point::new(400.0, 300.0));
//! # let _ = content_pt;
//! ```
//!
//! ## Framing shapes
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use mapframe_view::fit::{FitOptions, fit_bounds};
//! use mapframe_view::{EngineOptions, TransitionKind, ViewportEngine};
//!
//! let mut engine = ViewportEngine::new(EngineOptions::default());
//! engine.initialize(Size::new(2000.0, 1000.0), Size::new(800.0, 600.0));
//!
//! let shapes = [Rect::new(100.0, 100.0, 180.0, 140.0)];
//! let target = fit_bounds(&shapes, Size::new(800.0, 600.0), &FitOptions::default()).unwrap();
//! // The engine clamps the target before animating to it.
//! engine.animate_to(target, 750, TransitionKind::Reframe);
//! ```
//!
//! ## Design notes
//!
//! - Transforms are axis-aligned with a **uniform** zoom factor.
//! - Animations interpolate scale and translation linearly under an easing
//!   curve and every frame is clamped, so no intermediate frame leaves the
//!   extents.
//! - Starting any transform change interrupts the in-flight transition and
//!   reports it as ended, so callers that hold a guard for the duration of a
//!   transition always get a release notification.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod engine;
pub mod fit;
pub mod geometry;
mod transform;

pub use engine::{
    EngineEvent, EngineOptions, TransitionKind, ViewportEngine, ViewportEngineDebugInfo,
};
pub use fit::{FitError, FitOptions, FitPadding};
pub use transform::{Extents, ViewTransform};
