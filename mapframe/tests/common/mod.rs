// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(dead_code, reason = "each test binary uses a different subset")]

use kurbo::{Affine, Rect, Size};
use mapframe::manifest::{MapContent, ShapeElement, ShapeId, ShapeManifest};
use mapframe::persistence::MemoryLocation;
use mapframe::{MapConfig, MapController, MapEvent};

pub const VIEWPORT: Size = Size::new(800.0, 600.0);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 2000x1000 map with four selectable shapes and one decoration.
pub fn content() -> MapContent {
    let manifest = ShapeManifest::from_elements(
        [
            ShapeElement::new("click-a", Rect::new(100.0, 100.0, 300.0, 200.0), Affine::IDENTITY),
            ShapeElement::new("click-b", Rect::new(1600.0, 700.0, 1800.0, 850.0), Affine::IDENTITY),
            ShapeElement::new(
                "click-center",
                Rect::new(900.0, 450.0, 1100.0, 550.0),
                Affine::IDENTITY,
            ),
            // Local box (0,0)-(50,50) placed at (500,500).
            ShapeElement::new(
                "click-c",
                Rect::new(0.0, 0.0, 50.0, 50.0),
                Affine::translate((500.0, 500.0)) * Affine::scale(2.0),
            ),
            ShapeElement::new("label", Rect::new(0.0, 0.0, 2000.0, 40.0), Affine::IDENTITY),
        ],
        "click",
    );
    MapContent::new(Size::new(2000.0, 1000.0), manifest)
}

pub fn id(s: &str) -> ShapeId {
    ShapeId::new(s)
}

pub fn mount(config: MapConfig, query: &str) -> MapController<MemoryLocation> {
    init_tracing();
    MapController::mount(config, Some(content()), VIEWPORT, MemoryLocation::new(query))
        .expect("valid mount")
}

/// Ticks in 16 ms frames until no transition is running.
pub fn settle(map: &mut MapController<MemoryLocation>, mut now: u64) -> u64 {
    while map.engine().is_animating() {
        now += 16;
        map.tick(now);
    }
    now
}

pub fn marks(events: &[MapEvent]) -> Vec<(String, bool)> {
    events
        .iter()
        .filter_map(|e| match e {
            MapEvent::ShapeMarked { id, selected } => Some((id.to_string(), *selected)),
            _ => None,
        })
        .collect()
}
