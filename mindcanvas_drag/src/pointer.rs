// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input as seen by the drag controller.

use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// Modifier keys held during a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Control key.
        const CTRL  = 0b0000_0010;
        /// Alt / Option key.
        const ALT   = 0b0000_0100;
        /// Meta / Command key.
        const META  = 0b0000_1000;
    }
}

impl Modifiers {
    /// Returns `true` if a click should toggle membership instead of
    /// replacing the selection (Ctrl, or Command on macOS).
    #[must_use]
    pub fn is_additive(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

/// A pointer event in client (window) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in client pixels.
    pub client: Point,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub time_ms: u64,
}

impl PointerEvent {
    /// Creates an event with no modifiers held.
    #[must_use]
    pub const fn new(client: Point, time_ms: u64) -> Self {
        Self {
            client,
            modifiers: Modifiers::empty(),
            time_ms,
        }
    }

    /// Returns this event with `modifiers` held.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Start and last pointer positions of a gesture, in client pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerTrack {
    start: Point,
    last: Point,
}

impl PointerTrack {
    /// Starts tracking at `pos`.
    #[must_use]
    pub const fn new(pos: Point) -> Self {
        Self {
            start: pos,
            last: pos,
        }
    }

    /// Where the gesture started.
    #[must_use]
    pub const fn start(&self) -> Point {
        self.start
    }

    /// The most recent position.
    #[must_use]
    pub const fn last(&self) -> Point {
        self.last
    }

    /// Records `pos` and returns the movement since the previous position.
    pub fn update(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        delta
    }

    /// Returns the offset of `pos` from the start of the gesture.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Vec2 {
        pos - self.start
    }

    /// Returns `true` once `pos` is strictly farther than `threshold` from
    /// the start.
    #[must_use]
    pub fn exceeds(&self, pos: Point, threshold: f64) -> bool {
        self.total_offset(pos).hypot() > threshold
    }
}
