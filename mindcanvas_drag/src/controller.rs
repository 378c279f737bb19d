// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag/selection state machine.

use kurbo::{Point, Rect, Vec2};
use mindcanvas_elements::{ElementId, ElementStore, PositionUpdate};
use mindcanvas_timing::Throttle;
use mindcanvas_view2d::{ViewState, pixel_to_canvas};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::pointer::{PointerEvent, PointerTrack};

/// Tuning for [`DragController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    /// Pointer travel in client pixels before a press becomes a drag.
    pub threshold: f64,
    /// Minimum time between position writes while dragging, in ms.
    pub throttle_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: 5.0,
            throttle_ms: 16,
        }
    }
}

/// Phase of the current gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No pointer is down on an element.
    #[default]
    Idle,
    /// Pressed on an element but not yet moved past the threshold.
    Armed,
    /// Moving the selected elements.
    Dragging,
}

/// Everything a gesture reads or writes besides its own state.
#[derive(Debug)]
pub struct DragContext<'a> {
    /// The element store receiving selection changes and positions.
    pub store: &'a mut ElementStore,
    /// The current pan/zoom.
    pub view: &'a ViewState,
    /// The canvas viewport rectangle in client pixels.
    pub viewport: Rect,
}

impl<'a> DragContext<'a> {
    /// Bundles the collaborators of one pointer event.
    pub fn new(store: &'a mut ElementStore, view: &'a ViewState, viewport: Rect) -> Self {
        Self {
            store,
            view,
            viewport,
        }
    }

    fn to_canvas(&self, client: Point) -> Point {
        pixel_to_canvas(client, self.viewport, self.view)
    }
}

/// One element carried by a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    /// The element being moved.
    pub id: ElementId,
    /// Its position when the gesture started.
    pub start: Point,
    /// Pointer position minus element position, in canvas units. Kept fixed
    /// so the element does not jump under the pointer.
    pub grab_offset: Vec2,
}

/// State captured at pointer-down.
#[derive(Clone, Debug)]
pub struct DragSession {
    target: ElementId,
    track: PointerTrack,
    start_canvas: Point,
    anchors: SmallVec<[DragAnchor; 4]>,
    pending: Option<Point>,
}

impl DragSession {
    /// The element the gesture started on.
    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Pointer position at pointer-down, in client pixels.
    #[must_use]
    pub fn start_client(&self) -> Point {
        self.track.start()
    }

    /// Pointer position at pointer-down, in canvas units.
    #[must_use]
    pub fn start_canvas(&self) -> Point {
        self.start_canvas
    }

    /// The elements moved by this gesture.
    #[must_use]
    pub fn anchors(&self) -> &[DragAnchor] {
        &self.anchors
    }
}

/// Turns pointer events into selection changes and throttled position
/// updates.
///
/// One controller serves the whole canvas, so there is at most one session
/// at a time. Timers are driven by [`DragController::tick`].
#[derive(Clone, Debug)]
pub struct DragController {
    config: DragConfig,
    phase: DragPhase,
    session: Option<DragSession>,
    throttle: Throttle,
    was_drag: bool,
    scratch: Vec<PositionUpdate>,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            phase: DragPhase::Idle,
            session: None,
            throttle: Throttle::new(config.throttle_ms),
            was_drag: false,
            scratch: Vec::new(),
        }
    }

    /// Returns the tuning in use.
    #[must_use]
    pub fn config(&self) -> DragConfig {
        self.config
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns `true` while elements are being moved.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Returns `true` while the host should route all pointer events here,
    /// even those outside the pressed element.
    #[must_use]
    pub fn captures_pointer(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// Returns `true` if the last gesture moved elements and no tick has
    /// passed since.
    #[must_use]
    pub fn was_drag(&self) -> bool {
        self.was_drag
    }

    /// Returns the active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Handles a pointer press.
    ///
    /// `target` is the element under the pointer; `None` means the
    /// background, where a plain press clears the selection. On an element,
    /// the selection is resolved first (plain press selects only the target,
    /// an additive press toggles it) and then every selected, unlocked element
    /// is anchored for dragging. Returns `true` if a session started.
    pub fn pointer_down(
        &mut self,
        cx: &mut DragContext<'_>,
        target: Option<ElementId>,
        event: PointerEvent,
    ) -> bool {
        if self.session.is_some() {
            debug!("pointer down during an active gesture; restarting");
        }
        self.end_session();
        self.was_drag = false;

        let additive = event.modifiers.is_additive();
        let Some(target) = target else {
            if !additive {
                cx.store.clear_selection();
            }
            return false;
        };
        match cx.store.toggle_selection(target, additive) {
            Ok(true) => {}
            Ok(false) => {
                trace!(element = %target, "target deselected; no drag");
                return false;
            }
            Err(err) => {
                debug!(%err, "pointer down on unknown element ignored");
                return false;
            }
        }

        let pointer = cx.to_canvas(event.client);
        let anchors = cx
            .store
            .selection()
            .iter()
            .filter_map(|id| cx.store.get(*id))
            .filter(|element| !element.is_locked)
            .map(|element| DragAnchor {
                id: element.id,
                start: element.position(),
                grab_offset: pointer - element.position(),
            })
            .collect();

        self.session = Some(DragSession {
            target,
            track: PointerTrack::new(event.client),
            start_canvas: pointer,
            anchors,
            pending: None,
        });
        self.throttle.reset();
        self.phase = DragPhase::Armed;
        trace!(element = %target, "drag armed");
        true
    }

    /// Handles pointer motion. Returns `true` if positions were written.
    pub fn pointer_move(&mut self, cx: &mut DragContext<'_>, event: PointerEvent) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.track.update(event.client);
        if self.phase == DragPhase::Armed {
            if !session.track.exceeds(event.client, self.config.threshold) {
                return false;
            }
            self.phase = DragPhase::Dragging;
            debug!(
                element = %session.target,
                count = session.anchors.len(),
                "drag started"
            );
        }

        if self.throttle.try_fire(event.time_ms) {
            session.pending = None;
            self.apply(cx, event.client);
            true
        } else {
            session.pending = Some(event.client);
            false
        }
    }

    /// Handles a pointer release. Returns `true` if the gesture was a drag,
    /// in which case the following click should be suppressed.
    pub fn pointer_up(&mut self, cx: &mut DragContext<'_>, event: PointerEvent) -> bool {
        let dragged = self.phase == DragPhase::Dragging;
        if dragged {
            // The release position is authoritative over any pending move.
            self.apply(cx, event.client);
            debug!("drag finished");
        }
        self.end_session();
        self.was_drag = dragged;
        dragged
    }

    /// Consumes a click that follows a pointer release. Returns `true` if the
    /// click must be ignored because it ended a drag.
    pub fn on_click(&mut self) -> bool {
        core::mem::take(&mut self.was_drag)
    }

    /// Aborts the gesture and puts moved elements back where they started.
    ///
    /// Returns `true` if a session was active.
    pub fn cancel(&mut self, store: &mut ElementStore) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        if self.phase == DragPhase::Dragging {
            self.scratch.clear();
            self.scratch.extend(
                session
                    .anchors
                    .iter()
                    .map(|anchor| PositionUpdate::new(anchor.id, anchor.start)),
            );
            store.batch_update_positions(&self.scratch);
        }
        debug!(element = %session.target, "drag cancelled");
        self.phase = DragPhase::Idle;
        self.throttle.reset();
        self.was_drag = false;
        true
    }

    /// Drops the gesture without writing any positions.
    ///
    /// Use this when the elements under the session were replaced, as after
    /// a load or a clear. Returns `true` if a session was active.
    pub fn reset(&mut self) -> bool {
        let active = self.session.is_some();
        if active {
            debug!("drag session dropped");
        }
        self.end_session();
        self.was_drag = false;
        active
    }

    /// Advances timers: flushes a throttled trailing move once due and
    /// expires the "was a drag" flag. Returns `true` if positions were
    /// written.
    pub fn tick(&mut self, cx: &mut DragContext<'_>, now: u64) -> bool {
        if self.phase == DragPhase::Idle {
            self.was_drag = false;
            return false;
        }
        if self.phase != DragPhase::Dragging || !self.throttle.poll_trailing(now) {
            return false;
        }
        let Some(client) = self.session.as_mut().and_then(|s| s.pending.take()) else {
            return false;
        };
        self.apply(cx, client);
        true
    }

    fn apply(&mut self, cx: &mut DragContext<'_>, client: Point) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let pointer = cx.to_canvas(client);
        self.scratch.clear();
        self.scratch.extend(
            session
                .anchors
                .iter()
                .map(|anchor| PositionUpdate::new(anchor.id, pointer - anchor.grab_offset)),
        );
        cx.store.batch_update_positions(&self.scratch);
    }

    fn end_session(&mut self) {
        self.session = None;
        self.phase = DragPhase::Idle;
        self.throttle.reset();
    }
}
