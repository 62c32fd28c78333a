// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-pan state: movement deltas once the pointer leaves a slop radius.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] on pointer down.
//! 2) On each move, call [`DragState::update`]. It yields `None` until the
//!    pointer has travelled farther than the slop radius, then yields the
//!    delta to pan by (the first delta covers the whole distance from the
//!    press point).
//! 3) On pointer up, [`DragState::end`] reports whether the gesture was a
//!    [`DragEnd::Tap`] or a [`DragEnd::Pan`]. A click that follows a pan
//!    should be ignored; [`DragState::take_click_suppression`] tracks that.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use mapframe_event_state::drag::{DragEnd, DragState};
//!
//! let mut drag = DragState::new(3.0);
//!
//! drag.start(Point::new(10.0, 20.0));
//! // Inside the slop radius: not a pan yet.
//! assert_eq!(drag.update(Point::new(11.0, 21.0)), None);
//! // Leaving it pans by the full distance from the press point.
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//!
//! assert_eq!(drag.end(), Some(DragEnd::Pan { total: Vec2::new(5.0, 5.0) }));
//! // The click the platform sends after this pointer up is swallowed.
//! assert!(drag.take_click_suppression());
//! assert!(!drag.take_click_suppression());
//! ```

use kurbo::{Point, Vec2};

/// How a finished gesture should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEnd {
    /// The pointer never left the slop radius.
    Tap,
    /// The pointer panned the view.
    Pan {
        /// Offset from the press point to the release point.
        total: Vec2,
    },
}

/// Tracks one pointer gesture for pan processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    slop: f64,
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    panning: bool,
    suppress_click: bool,
}

impl DragState {
    /// Creates an idle tracker with the given slop radius in viewport pixels.
    #[must_use]
    pub fn new(slop: f64) -> Self {
        Self {
            slop: if slop.is_finite() { slop.max(0.0) } else { 0.0 },
            ..Self::default()
        }
    }

    /// Start tracking a new gesture from the given position.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.panning = false;
        self.suppress_click = false;
    }

    /// Feed a pointer position; returns the delta to pan by, if panning.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let start = self.start_pos?;
        if !self.panning {
            if (pos - start).hypot2() <= self.slop * self.slop {
                return None;
            }
            self.panning = true;
        }
        let last = self.last_pos.unwrap_or(start);
        self.last_pos = Some(pos);
        Some(pos - last)
    }

    /// Finish the gesture. Returns `None` if no gesture was active.
    pub fn end(&mut self) -> Option<DragEnd> {
        let start = self.start_pos.take()?;
        let last = self.last_pos.take().unwrap_or(start);
        let panned = core::mem::take(&mut self.panning);
        if panned {
            self.suppress_click = true;
            Some(DragEnd::Pan {
                total: last - start,
            })
        } else {
            Some(DragEnd::Tap)
        }
    }

    /// Drop the gesture without reporting it (pointer cancel).
    pub fn cancel(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.panning = false;
    }

    /// Returns `true` once the active gesture has become a pan.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Consumes the "last gesture was a pan" flag.
    ///
    /// Returns `true` exactly once after a [`DragEnd::Pan`].
    pub fn take_click_suppression(&mut self) -> bool {
        core::mem::take(&mut self.suppress_click)
    }
}
