// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use mapframe_selection::{SelectionMachine, ToggleOutcome};
use mapframe_view::fit::fit_bounds;
use mapframe_view::{EngineEvent, FitOptions, TransitionKind, ViewTransform, ViewportEngine};

use crate::config::MapConfig;
use crate::error::{MountError, SelectError};
use crate::manifest::{MapContent, ShapeId, ShapeManifest};
use crate::persistence::{SelectionChannel, SelectionStore};

/// User-facing conditions that are not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A selection was refused because `cap` shapes are already selected.
    SelectionLimit {
        /// The configured maximum.
        cap: usize,
    },
}

/// Notifications for the host, drained with [`MapController::take_events`].
#[derive(Clone, Debug, PartialEq)]
pub enum MapEvent {
    /// Render the content layer with this transform.
    TransformChanged(ViewTransform),
    /// A transition finished or was cut short.
    TransitionEnded {
        /// What the transition was doing.
        kind: TransitionKind,
        /// `true` if something replaced it.
        interrupted: bool,
    },
    /// Show or hide the selected mark on a shape.
    ShapeMarked {
        /// The shape.
        id: ShapeId,
        /// Whether it is selected now.
        selected: bool,
    },
    /// Something the user should be told about.
    Notice(Notice),
}

/// Owns the viewport engine, the selection machine and the persisted channel
/// for one mounted content layer, and keeps the three consistent.
///
/// All operations are synchronous. Animations and the resize debounce advance
/// only when the host calls [`MapController::tick`] from its frame clock.
/// Each committed selection change is written to the channel exactly once.
///
/// The controller has no clock of its own: an animation starts at the time of
/// the most recent `tick`. Hosts must tick every frame, idle or not; a host
/// that stops ticking while nothing moves will see the next animation jump
/// ahead by the idle time.
#[derive(Debug)]
pub struct MapController<C> {
    config: MapConfig,
    fit_options: FitOptions,
    content: MapContent,
    engine: ViewportEngine,
    machine: SelectionMachine<ShapeId>,
    store: SelectionStore<C>,
    pending_reframe: bool,
    events: Vec<MapEvent>,
}

impl<C: SelectionChannel> MapController<C> {
    /// Validates `config`, measures `content` against `viewport`, and adopts
    /// the selection persisted in `channel`.
    ///
    /// A viewport that is not usable yet (zero or non-finite) is accepted; the
    /// controller stays inert until a resize makes it usable.
    ///
    /// # Errors
    ///
    /// [`MountError::MissingContent`] without content, or
    /// [`MountError::Config`] when `config` fails validation.
    pub fn mount(
        config: MapConfig,
        content: Option<MapContent>,
        viewport: Size,
        channel: C,
    ) -> Result<Self, MountError> {
        config.validate()?;
        let content = content.ok_or(MountError::MissingContent)?;

        let mut engine = ViewportEngine::new(config.engine_options());
        if !engine.initialize(content.size, viewport) {
            tracing::debug!(
                size = ?content.size,
                ?viewport,
                "mounted before geometry is usable"
            );
        }
        let store = SelectionStore::new(channel, config.query_key.clone());
        let machine = SelectionMachine::new(config.selection_policy, config.max_selected);

        let mut controller = Self {
            fit_options: config.fit_options(),
            config,
            content,
            engine,
            machine,
            store,
            pending_reframe: false,
            events: Vec::new(),
        };
        controller.hydrate_from_channel();
        controller.pump_engine_events();
        tracing::info!(
            shapes = controller.content.manifest.len(),
            selected = controller.machine.len(),
            "map controller mounted"
        );
        Ok(controller)
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The viewport engine, for read-only inspection.
    #[must_use]
    pub fn engine(&self) -> &ViewportEngine {
        &self.engine
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.engine.transform()
    }

    /// Shapes of the current content.
    #[must_use]
    pub fn manifest(&self) -> &ShapeManifest {
        &self.content.manifest
    }

    /// Selected shapes.
    #[must_use]
    pub fn selected(&self) -> &[ShapeId] {
        self.machine.ids()
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.machine.contains(id)
    }

    /// Revision of the selection; bumps on every change.
    #[must_use]
    pub fn selection_revision(&self) -> u64 {
        self.machine.revision()
    }

    /// Returns `true` while shape clicks are ignored because a reframe runs.
    #[must_use]
    pub fn is_reframing(&self) -> bool {
        self.machine.is_locked()
    }

    /// Returns `true` if a reframe waits for usable geometry.
    #[must_use]
    pub fn has_pending_reframe(&self) -> bool {
        self.pending_reframe
    }

    /// The persisted channel.
    #[must_use]
    pub fn channel(&self) -> &C {
        self.store.channel()
    }

    /// Mutable access to the channel. Call [`MapController::channel_changed`]
    /// after changing the selection key from outside.
    pub fn channel_mut(&mut self) -> &mut C {
        self.store.channel_mut()
    }

    /// Number of writes made to the channel since mount.
    #[must_use]
    pub fn channel_writes(&self) -> u64 {
        self.store.writes()
    }

    /// Content-space point under a viewport point.
    #[must_use]
    pub fn view_to_content_point(&self, pt: Point) -> Point {
        self.engine.view_to_content_point(pt)
    }

    /// Shape whose content-space bounds contain the viewport point `pt`.
    ///
    /// Later shapes win, matching paint order.
    #[must_use]
    pub fn shape_at(&self, pt: Point) -> Option<&ShapeId> {
        let content_pt = self.engine.view_to_content_point(pt);
        self.content
            .manifest
            .iter()
            .rev()
            .find(|entry| entry.bounds().contains(content_pt))
            .map(|entry| entry.id())
    }

    /// Drains queued notifications in the order they happened.
    pub fn take_events(&mut self) -> Vec<MapEvent> {
        core::mem::take(&mut self.events)
    }

    /// Toggles a shape according to the selection policy.
    ///
    /// While a reframe is running the toggle is ignored and reported as
    /// [`ToggleOutcome::Locked`].
    ///
    /// # Errors
    ///
    /// [`SelectError::UnknownShape`] if `id` is not in the manifest.
    pub fn toggle(&mut self, id: &ShapeId) -> Result<ToggleOutcome<ShapeId>, SelectError> {
        if !self.content.manifest.contains(id.as_str()) {
            return Err(SelectError::UnknownShape(id.clone()));
        }
        let outcome = self.machine.toggle(id.clone());
        match &outcome {
            ToggleOutcome::Selected => self.mark(id.clone(), true),
            ToggleOutcome::Replaced { deselected } => {
                for other in deselected {
                    self.mark(other.clone(), false);
                }
                self.mark(id.clone(), true);
            }
            ToggleOutcome::Deselected => self.mark(id.clone(), false),
            ToggleOutcome::Rejected { cap } => {
                tracing::debug!(%id, cap, "selection rejected: limit reached");
                self.events
                    .push(MapEvent::Notice(Notice::SelectionLimit { cap: *cap }));
            }
            ToggleOutcome::Locked => tracing::debug!(%id, "toggle ignored during reframe"),
        }
        if outcome.is_committed() {
            self.persist();
        }
        if outcome.wants_reframe() {
            self.request_reframe();
        }
        self.pump_engine_events();
        Ok(outcome)
    }

    /// Deselects everything. Returns `true` if anything was selected.
    ///
    /// Persists the empty selection and leaves the view where it is.
    pub fn clear(&mut self) -> bool {
        let previous = self.machine.ids().to_vec();
        if !self.machine.clear() {
            return false;
        }
        for id in previous {
            self.mark(id, false);
        }
        self.persist();
        true
    }

    /// Re-reads the channel after an external change (for example history
    /// navigation) and adopts its selection.
    ///
    /// Returns `true` if the selection changed.
    pub fn channel_changed(&mut self) -> bool {
        let changed = self.hydrate_from_channel();
        self.pump_engine_events();
        changed
    }

    /// Zooms in by the configured factor around the viewport center.
    pub fn zoom_in(&mut self) -> bool {
        let applied = self
            .engine
            .zoom_by(self.config.zoom_in_factor, self.config.zoom_duration_ms);
        self.pump_engine_events();
        applied
    }

    /// Zooms out by the configured factor around the viewport center.
    pub fn zoom_out(&mut self) -> bool {
        let applied = self
            .engine
            .zoom_by(self.config.zoom_out_factor, self.config.zoom_duration_ms);
        self.pump_engine_events();
        applied
    }

    /// Zooms to `scale`, centering the content under `view_pt`.
    pub fn zoom_to_point(&mut self, view_pt: Point, scale: f64) -> bool {
        let applied = self
            .engine
            .zoom_to_point(view_pt, scale, self.config.zoom_duration_ms);
        self.pump_engine_events();
        applied
    }

    /// Animates back to the whole-content view.
    pub fn reset(&mut self) -> bool {
        let applied = self.engine.reset_zoom(self.config.reset_duration_ms);
        self.pump_engine_events();
        applied
    }

    /// Wheel zoom around `view_pt`. Negative `notches` zoom in.
    pub fn wheel(&mut self, view_pt: Point, notches: f64) -> bool {
        if !notches.is_finite() || notches == 0.0 {
            return false;
        }
        let factor = self.config.wheel_zoom_step.powf(-notches);
        let applied = self.engine.zoom_about(view_pt, factor);
        self.pump_engine_events();
        applied
    }

    /// Pans by `delta` viewport pixels.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        let applied = self.engine.pan_by(delta);
        self.pump_engine_events();
        applied
    }

    /// Records a viewport size change; applied after the debounce window by
    /// a later [`MapController::tick`].
    pub fn resize(&mut self, viewport: Size, now_ms: u64) {
        self.engine.on_resize(viewport, now_ms);
    }

    /// Advances animations and the resize debounce to `now_ms`.
    ///
    /// Call once per frame; transitions started afterwards are timed from
    /// `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        self.engine.tick(now_ms);
        self.pump_engine_events();
        if self.pending_reframe && self.engine.is_initialized() {
            self.request_reframe();
            self.pump_engine_events();
        }
    }

    /// Swaps the content layer, keeping the viewport, and reconciles the
    /// persisted selection against the new shapes.
    pub fn content_changed(&mut self, content: MapContent) {
        tracing::debug!(
            size = ?content.size,
            shapes = content.manifest.len(),
            "content changed"
        );
        self.content = content;
        self.engine.content_changed(self.content.size);
        self.machine.clear();
        self.hydrate_from_channel();
        self.pump_engine_events();
    }

    fn mark(&mut self, id: ShapeId, selected: bool) {
        self.events.push(MapEvent::ShapeMarked { id, selected });
    }

    fn persist(&mut self) {
        self.store.write(self.machine.ids());
    }

    /// Adopts the persisted selection: drops ids that are not shapes, trims to
    /// what the policy admits, refreshes every mark, and reframes a non-empty
    /// change.
    fn hydrate_from_channel(&mut self) -> bool {
        let manifest = &self.content.manifest;
        let (live, dead): (Vec<_>, Vec<_>) = self
            .store
            .read()
            .into_iter()
            .partition(|id| manifest.contains(id.as_str()));
        let outcome = self.machine.hydrate(live);

        if !dead.is_empty() {
            tracing::warn!(?dead, "dropping persisted ids without geometry");
        }
        if !outcome.overflow.is_empty() {
            tracing::warn!(
                overflow = ?outcome.overflow,
                "dropping persisted ids over the selection limit"
            );
        }
        let marks: Vec<_> = self
            .content
            .manifest
            .iter()
            .map(|entry| (entry.id().clone(), self.machine.contains(entry.id())))
            .collect();
        for (id, selected) in marks {
            self.mark(id, selected);
        }
        if !dead.is_empty() || !outcome.overflow.is_empty() {
            self.persist();
        }

        let changed = outcome.changed;
        tracing::debug!(selected = self.machine.len(), changed, "selection hydrated");
        if changed && !self.machine.is_empty() {
            self.request_reframe();
        }
        changed
    }

    /// Starts a zoom-to-fit on the whole selection, or defers it until the
    /// engine has usable geometry.
    fn request_reframe(&mut self) {
        let Some(viewport) = self.engine.extents().map(|e| e.viewport()) else {
            tracing::debug!("reframe deferred: engine unready");
            self.pending_reframe = true;
            return;
        };
        self.pending_reframe = false;

        let boxes: Vec<Rect> = self
            .machine
            .ids()
            .iter()
            .filter_map(|id| self.content.manifest.content_bounds(id.as_str()))
            .collect();
        if boxes.is_empty() {
            return;
        }
        let target = match fit_bounds(&boxes, viewport, &self.fit_options) {
            Ok(target) => target,
            Err(err) => {
                tracing::debug!(%err, "reframe skipped");
                return;
            }
        };
        self.machine.lock();
        self.engine
            .animate_to(target, self.config.fit_duration_ms, TransitionKind::Reframe);
    }

    fn pump_engine_events(&mut self) {
        for event in self.engine.take_events() {
            match event {
                EngineEvent::TransformChanged(t) => {
                    self.events.push(MapEvent::TransformChanged(t));
                }
                EngineEvent::TransitionEnded { kind, interrupted } => {
                    if kind == TransitionKind::Reframe
                        && self.engine.active_transition() != Some(TransitionKind::Reframe)
                    {
                        self.machine.unlock();
                    }
                    self.events
                        .push(MapEvent::TransitionEnded { kind, interrupted });
                }
            }
        }
    }
}
