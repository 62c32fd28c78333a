// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translating raw user input into controller actions.
//!
//! The host forwards pointer, wheel, click and control events as
//! [`InputEvent`]s. [`InputAdapter::handle`] drives the controller and tells
//! the host whether the event was consumed ([`Propagation::Stop`]) or should
//! continue to other handlers.

use kurbo::Point;
use mapframe_event_state::drag::{DragEnd, DragState};

use crate::config::MapConfig;
use crate::controller::MapController;
use crate::manifest::ShapeId;
use crate::persistence::SelectionChannel;

/// A raw input event in viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown(Point),
    /// Pointer moved.
    PointerMove(Point),
    /// Primary button released.
    PointerUp(Point),
    /// The platform cancelled the pointer gesture.
    PointerCancel,
    /// Wheel turned over `at`; negative `notches` zoom in.
    Wheel {
        /// Pointer position.
        at: Point,
        /// Wheel delta in notches.
        notches: f64,
    },
    /// Click delivered after a pointer up.
    Click {
        /// Pointer position.
        at: Point,
        /// Shape under the pointer, if the host already hit-tested it.
        /// `None` asks the controller to hit-test by bounds.
        target: Option<ShapeId>,
    },
    /// Zoom-in control.
    ZoomIn,
    /// Zoom-out control.
    ZoomOut,
    /// Reset control.
    Reset,
    /// Clear-selection control.
    ClearSelection,
}

/// Whether an event should reach other handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// The event was consumed.
    Stop,
    /// The event was not for the map.
    Continue,
}

/// Pointer gesture state between events.
#[derive(Clone, Copy, Debug)]
pub struct InputAdapter {
    drag: DragState,
}

impl InputAdapter {
    /// Creates an adapter; presses that travel less than `slop` pixels are clicks.
    #[must_use]
    pub fn new(slop: f64) -> Self {
        Self {
            drag: DragState::new(slop),
        }
    }

    /// Creates an adapter using the slop of `config`.
    #[must_use]
    pub fn for_config(config: &MapConfig) -> Self {
        Self::new(config.drag_slop_px)
    }

    /// Returns `true` while a pointer drag is panning the view.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.drag.is_panning()
    }

    /// Applies `event` to `controller`.
    pub fn handle<C: SelectionChannel>(
        &mut self,
        controller: &mut MapController<C>,
        event: InputEvent,
    ) -> Propagation {
        match event {
            InputEvent::PointerDown(at) => {
                self.drag.start(at);
                Propagation::Continue
            }
            InputEvent::PointerMove(at) => match self.drag.update(at) {
                Some(delta) => {
                    controller.pan_by(delta);
                    Propagation::Stop
                }
                None => Propagation::Continue,
            },
            InputEvent::PointerUp(at) => {
                if let Some(delta) = self.drag.update(at) {
                    controller.pan_by(delta);
                }
                match self.drag.end() {
                    Some(DragEnd::Pan { total }) => {
                        tracing::trace!(?total, "pan finished");
                        Propagation::Stop
                    }
                    _ => Propagation::Continue,
                }
            }
            InputEvent::PointerCancel => {
                self.drag.cancel();
                Propagation::Continue
            }
            InputEvent::Wheel { at, notches } => {
                controller.wheel(at, notches);
                Propagation::Stop
            }
            InputEvent::Click { at, target } => {
                let after_pan = self.drag.take_click_suppression();
                let target = target.or_else(|| controller.shape_at(at).cloned());
                let Some(id) = target else {
                    return Propagation::Continue;
                };
                if after_pan {
                    tracing::trace!(%id, "click after pan ignored");
                    return Propagation::Stop;
                }
                if let Err(err) = controller.toggle(&id) {
                    tracing::debug!(%err, "click ignored");
                    return Propagation::Continue;
                }
                Propagation::Stop
            }
            InputEvent::ZoomIn => {
                controller.zoom_in();
                Propagation::Stop
            }
            InputEvent::ZoomOut => {
                controller.zoom_out();
                Propagation::Stop
            }
            InputEvent::Reset => {
                controller.reset();
                Propagation::Stop
            }
            InputEvent::ClearSelection => {
                controller.clear();
                Propagation::Stop
            }
        }
    }
}
