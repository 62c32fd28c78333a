// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use mapframe_timing::{Debouncer, Easing, Tween};

use crate::geometry::is_usable_size;
use crate::transform::{Extents, ViewTransform};

/// Tunables for a [`ViewportEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineOptions {
    /// Multiplier applied to the fit-to-viewport minimum scale (at least `1.0`).
    pub min_zoom_multiplier: f64,
    /// Absolute maximum scale.
    pub max_zoom: f64,
    /// Easing applied to animated transitions.
    pub easing: Easing,
    /// Debounce window for [`ViewportEngine::on_resize`].
    pub resize_debounce_ms: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            min_zoom_multiplier: 1.0,
            max_zoom: 8.0,
            easing: Easing::default(),
            resize_debounce_ms: 100,
        }
    }
}

/// What started a transition. Reported back in [`EngineEvent::TransitionEnded`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Discrete zoom: [`ViewportEngine::zoom_by`] or [`ViewportEngine::zoom_to_point`].
    Zoom,
    /// Return to the fit transform.
    Reset,
    /// Framing one or more shapes.
    Reframe,
}

/// Notifications queued by the engine; drain them with [`ViewportEngine::take_events`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineEvent {
    /// The displayed transform changed.
    TransformChanged(ViewTransform),
    /// A transition finished, either normally or because something replaced it.
    TransitionEnded {
        /// What the transition was doing.
        kind: TransitionKind,
        /// `true` if the transition was cut short.
        interrupted: bool,
    },
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    from: ViewTransform,
    to: ViewTransform,
    tween: Tween,
    kind: TransitionKind,
}

/// Clamped pan/zoom state over a fixed-size content layer.
///
/// The engine owns the content-to-viewport [`ViewTransform`] and keeps it
/// inside the [`Extents`] derived from the content and viewport sizes: the
/// content always covers the viewport. It is headless and clock-agnostic; the
/// host calls [`ViewportEngine::tick`] from its frame clock to advance
/// animations and debounced resizes, and renders whatever
/// [`EngineEvent::TransformChanged`] reports.
///
/// Until both sizes are known and non-empty the engine is *unready*: every
/// operation is a no-op and returns `false`.
#[derive(Clone, Debug)]
pub struct ViewportEngine {
    options: EngineOptions,
    content: Option<Size>,
    viewport: Option<Size>,
    extents: Option<Extents>,
    transform: ViewTransform,
    fit: ViewTransform,
    transition: Option<Transition>,
    resize: Debouncer<Size>,
    now_ms: u64,
    events: Vec<EngineEvent>,
}

impl ViewportEngine {
    /// Creates an unready engine.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            content: None,
            viewport: None,
            extents: None,
            transform: ViewTransform::IDENTITY,
            fit: ViewTransform::IDENTITY,
            transition: None,
            resize: Debouncer::new(options.resize_debounce_ms),
            now_ms: 0,
            events: Vec::new(),
        }
    }

    /// Returns the engine options.
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Computes extents for `content` inside `viewport` and snaps to the fit transform.
    ///
    /// Any in-flight transition is interrupted and any pending resize is
    /// dropped. Returns `false` (leaving the engine unready) if either size is
    /// empty or non-finite.
    pub fn initialize(&mut self, content: Size, viewport: Size) -> bool {
        self.content = Some(content);
        self.viewport = Some(viewport);
        self.resize.cancel();
        self.interrupt_transition();

        let Some(extents) = self.compute_extents(content, viewport) else {
            tracing::debug!(?content, ?viewport, "viewport engine unready: unusable geometry");
            self.extents = None;
            return false;
        };
        self.extents = Some(extents);
        self.fit = extents.fit_transform();
        tracing::debug!(
            min_scale = extents.min_scale(),
            max_scale = extents.max_scale(),
            "viewport engine initialized"
        );
        self.set_transform(self.fit);
        true
    }

    /// Swaps the content layer, re-initializing against the last known viewport.
    pub fn content_changed(&mut self, content: Size) -> bool {
        match self.viewport {
            Some(viewport) => self.initialize(content, viewport),
            None => {
                self.content = Some(content);
                false
            }
        }
    }

    /// Returns `true` once extents are available.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.extents.is_some()
    }

    /// Current extents, if initialized.
    #[must_use]
    pub fn extents(&self) -> Option<&Extents> {
        self.extents.as_ref()
    }

    /// The currently displayed transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// The terminal "reset" transform, if initialized.
    #[must_use]
    pub fn fit_transform(&self) -> Option<ViewTransform> {
        self.extents.map(|_| self.fit)
    }

    /// Where the engine is heading: the in-flight target, or the current transform.
    #[must_use]
    pub fn target_transform(&self) -> ViewTransform {
        self.transition.map_or(self.transform, |t| t.to)
    }

    /// Last timestamp seen by [`ViewportEngine::tick`] or [`ViewportEngine::on_resize`].
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Kind of the in-flight transition, if any.
    #[must_use]
    pub fn active_transition(&self) -> Option<TransitionKind> {
        self.transition.map(|t| t.kind)
    }

    /// Returns `true` while a debounced resize is waiting to be applied.
    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.resize.is_pending()
    }

    /// Drains queued notifications in the order they happened.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        core::mem::take(&mut self.events)
    }

    /// Multiplies the scale by `factor`, keeping the viewport center fixed.
    ///
    /// Successive calls compound on the in-flight target, so rapid presses of a
    /// zoom button accumulate instead of restarting from a half-finished frame.
    pub fn zoom_by(&mut self, factor: f64, duration_ms: u64) -> bool {
        let Some(extents) = self.extents else {
            tracing::debug!("zoom_by ignored: engine unready");
            return false;
        };
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let base = self.target_transform();
        let center = extents.viewport_center();
        let anchor = base.invert(center);
        let scale = extents.clamp_scale(base.scale * factor);
        let target = ViewTransform::anchored(scale, anchor, center);
        self.start_transition(target, duration_ms, TransitionKind::Zoom)
    }

    /// Zooms to `target_scale` and centers the content point currently under `view_pt`.
    pub fn zoom_to_point(&mut self, view_pt: Point, target_scale: f64, duration_ms: u64) -> bool {
        let Some(extents) = self.extents else {
            tracing::debug!("zoom_to_point ignored: engine unready");
            return false;
        };
        let anchor = self.transform.invert(view_pt);
        let scale = extents.clamp_scale(target_scale);
        let target = ViewTransform::anchored(scale, anchor, extents.viewport_center());
        self.start_transition(target, duration_ms, TransitionKind::Zoom)
    }

    /// Animates back to the fit transform.
    pub fn reset_zoom(&mut self, duration_ms: u64) -> bool {
        if self.extents.is_none() {
            tracing::debug!("reset_zoom ignored: engine unready");
            return false;
        }
        self.start_transition(self.fit, duration_ms, TransitionKind::Reset)
    }

    /// Clamps `target` to the extents and animates to it.
    pub fn animate_to(
        &mut self,
        target: ViewTransform,
        duration_ms: u64,
        kind: TransitionKind,
    ) -> bool {
        if self.extents.is_none() {
            tracing::debug!(?kind, "animate_to ignored: engine unready");
            return false;
        }
        self.start_transition(target, duration_ms, kind)
    }

    /// Zooms immediately by `factor`, keeping the content under `anchor_view` fixed.
    ///
    /// This is the wheel-zoom path. Clamping may shift the anchor when the
    /// view is pressed against a content edge.
    pub fn zoom_about(&mut self, anchor_view: Point, factor: f64) -> bool {
        let Some(extents) = self.extents else {
            return false;
        };
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let anchor = self.transform.invert(anchor_view);
        let scale = extents.clamp_scale(self.transform.scale * factor);
        self.apply_immediate(ViewTransform::anchored(scale, anchor, anchor_view))
    }

    /// Pans immediately by `delta` viewport pixels.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if self.extents.is_none() || delta == Vec2::ZERO {
            return false;
        }
        let t = self.transform;
        self.apply_immediate(ViewTransform::new(t.scale, t.translate + delta))
    }

    /// Records a viewport size change; applied by [`ViewportEngine::tick`] once
    /// the debounce window has passed without another call.
    pub fn on_resize(&mut self, viewport: Size, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        self.resize.schedule(viewport, now_ms);
    }

    /// Advances the engine to `now_ms`: applies a due resize, then steps the
    /// in-flight transition.
    pub fn tick(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        if let Some(viewport) = self.resize.poll(self.now_ms) {
            self.apply_resize(viewport);
        }

        let Some(transition) = self.transition else {
            return;
        };
        let Some(extents) = self.extents else {
            return;
        };
        if transition.tween.is_finished(self.now_ms) {
            self.transition = None;
            self.set_transform(extents.clamp(transition.to));
            self.events.push(EngineEvent::TransitionEnded {
                kind: transition.kind,
                interrupted: false,
            });
        } else {
            let t = transition.tween.eased(self.now_ms);
            let frame = extents.clamp(transition.from.lerp(transition.to, t));
            self.set_transform(frame);
        }
    }

    /// Content-space point under a viewport point.
    #[must_use]
    pub fn view_to_content_point(&self, pt: Point) -> Point {
        self.transform.invert(pt)
    }

    /// Viewport position of a content-space point.
    #[must_use]
    pub fn content_to_view_point(&self, pt: Point) -> Point {
        self.transform.apply(pt)
    }

    /// Content-space rectangle currently visible, if initialized.
    #[must_use]
    pub fn visible_content_rect(&self) -> Option<Rect> {
        let extents = self.extents?;
        let vp = extents.viewport();
        let p0 = self.transform.invert(Point::ORIGIN);
        let p1 = self.transform.invert(Point::new(vp.width, vp.height));
        Some(Rect::from_points(p0, p1))
    }

    /// Snapshot of the engine state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportEngineDebugInfo {
        ViewportEngineDebugInfo {
            content: self.content,
            viewport: self.viewport,
            transform: self.transform,
            fit_transform: self.fit_transform(),
            min_scale: self.extents.map(|e| e.min_scale()),
            max_scale: self.extents.map(|e| e.max_scale()),
            visible_content_rect: self.visible_content_rect(),
            active_transition: self.active_transition(),
            resize_deadline_ms: self.resize.deadline(),
        }
    }

    fn compute_extents(&self, content: Size, viewport: Size) -> Option<Extents> {
        Extents::new(
            content,
            viewport,
            self.options.min_zoom_multiplier,
            self.options.max_zoom,
        )
    }

    fn apply_resize(&mut self, viewport: Size) {
        let Some(content) = self.content else {
            self.viewport = Some(viewport);
            return;
        };
        if self.extents.is_none() || !is_usable_size(viewport) {
            // Either recovering from an unready state or becoming unready.
            self.initialize(content, viewport);
            return;
        }
        let Some(extents) = self.compute_extents(content, viewport) else {
            return;
        };
        self.viewport = Some(viewport);
        self.extents = Some(extents);
        self.fit = extents.fit_transform();
        if let Some(transition) = self.transition.as_mut() {
            transition.from = extents.clamp(transition.from);
            transition.to = extents.clamp(transition.to);
        }
        tracing::trace!(?viewport, min_scale = extents.min_scale(), "extents recomputed");
        let clamped = extents.clamp(self.transform);
        self.set_transform(clamped);
    }

    fn start_transition(
        &mut self,
        target: ViewTransform,
        duration_ms: u64,
        kind: TransitionKind,
    ) -> bool {
        let Some(extents) = self.extents else {
            return false;
        };
        let target = extents.clamp(target);
        self.interrupt_transition();
        if duration_ms == 0 {
            self.set_transform(target);
            self.events.push(EngineEvent::TransitionEnded {
                kind,
                interrupted: false,
            });
        } else {
            self.transition = Some(Transition {
                from: self.transform,
                to: target,
                tween: Tween::new(self.now_ms, duration_ms, self.options.easing),
                kind,
            });
        }
        true
    }

    fn apply_immediate(&mut self, target: ViewTransform) -> bool {
        let Some(extents) = self.extents else {
            return false;
        };
        self.interrupt_transition();
        self.set_transform(extents.clamp(target));
        true
    }

    fn interrupt_transition(&mut self) {
        if let Some(old) = self.transition.take() {
            self.events.push(EngineEvent::TransitionEnded {
                kind: old.kind,
                interrupted: true,
            });
        }
    }

    fn set_transform(&mut self, t: ViewTransform) {
        if self.transform != t {
            self.transform = t;
            self.events.push(EngineEvent::TransformChanged(t));
        }
    }
}

/// Debug snapshot of a [`ViewportEngine`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportEngineDebugInfo {
    /// Last known content size.
    pub content: Option<Size>,
    /// Last applied viewport size.
    pub viewport: Option<Size>,
    /// Displayed transform.
    pub transform: ViewTransform,
    /// Fit ("reset") transform.
    pub fit_transform: Option<ViewTransform>,
    /// Minimum scale of the current extents.
    pub min_scale: Option<f64>,
    /// Maximum scale of the current extents.
    pub max_scale: Option<f64>,
    /// Content-space rectangle currently visible.
    pub visible_content_rect: Option<Rect>,
    /// Kind of the in-flight transition.
    pub active_transition: Option<TransitionKind>,
    /// When the debounced resize is due, if one is waiting.
    pub resize_deadline_ms: Option<u64>,
}
