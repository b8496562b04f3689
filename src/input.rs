//! Input model: the stroke-builder state machine and the move-coalescing
//! slot.
//!
//! `StrokeBuilder` is the explicit idle → drawing → idle machine between
//! pointer-down and pointer-up. It owns the single in-progress stroke;
//! sealed strokes leave it through [`StrokeBuilder::finish`] and never
//! come back.
//!
//! `MoveSlot` bounds live rendering work to one appended point per paint
//! frame. Move events arriving faster than the host paints overwrite the
//! pending sample rather than queueing behind it, so the latest point wins
//! within a frame interval — a backpressure policy, not a correctness
//! requirement.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{Point, Stroke};

/// Builds one stroke at a time from pointer samples.
#[derive(Debug, Default)]
pub struct StrokeBuilder {
    current: Option<Stroke>,
}

impl StrokeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new in-progress stroke seeded with `at`.
    ///
    /// Any stroke already in progress is discarded; the engine guards
    /// against that path by checking [`Self::is_drawing`] first.
    pub fn begin(&mut self, at: Point, line_width: f64, line_color: &str, timestamp: i64) {
        self.current = Some(Stroke {
            points: vec![at],
            line_width,
            line_color: line_color.to_owned(),
            timestamp,
        });
    }

    /// Append a sample to the in-progress stroke, returning the previous
    /// point — the origin of the live-draw segment. Returns `None` when
    /// idle.
    pub fn append(&mut self, at: Point) -> Option<Point> {
        let stroke = self.current.as_mut()?;
        let prev = stroke.points.last().copied()?;
        stroke.points.push(at);
        Some(prev)
    }

    /// Seal and return the in-progress stroke, leaving the builder idle.
    /// A sealed stroke holds at least one point by construction.
    pub fn finish(&mut self) -> Option<Stroke> {
        self.current.take()
    }

    /// Discard any in-progress stroke.
    pub fn cancel(&mut self) {
        self.current = None;
    }

    /// `true` while a stroke is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    /// The stroke currently being drawn, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }
}

/// Single-slot register for coalescing high-frequency move input.
///
/// At most one paint callback is outstanding at a time. Offering a new
/// point while one is pending overwrites it; intermediate samples within
/// one frame interval are dropped in favor of the latest.
#[derive(Debug, Default)]
pub struct MoveSlot {
    pending: Option<Point>,
    frame_scheduled: bool,
}

impl MoveSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `at` as the latest pending sample. Returns `true` iff the
    /// caller should schedule a paint callback — none is outstanding.
    pub fn offer(&mut self, at: Point) -> bool {
        self.pending = Some(at);
        if self.frame_scheduled {
            false
        } else {
            self.frame_scheduled = true;
            true
        }
    }

    /// Drain the pending sample and clear the outstanding-callback flag.
    pub fn take(&mut self) -> Option<Point> {
        self.frame_scheduled = false;
        self.pending.take()
    }

    /// Drop the pending sample and flag. A paint callback firing after a
    /// reset observes an empty slot and has no effect — nothing dangles
    /// past stroke finalization.
    pub fn reset(&mut self) {
        self.pending = None;
        self.frame_scheduled = false;
    }

    /// `true` while a paint callback is outstanding.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.frame_scheduled
    }
}
