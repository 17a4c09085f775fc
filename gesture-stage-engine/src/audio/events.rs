use bevy::prelude::*;

use crate::engine::scene::{NoteId, TrackPadId};

/// One newly-swept note: its pitch-bearing height and its horizontal
/// position mapped to a stereo pan in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEntry {
    pub pitch_value: f32,
    pub pan: f32,
}

/// Batched sweep triggers: at least one entry, at most one batch per
/// frame.
#[derive(Event, Debug, Clone)]
pub struct SweepTriggerEvent {
    pub entries: Vec<TriggerEntry>,
}

/// Emitted every frame a note is actively dragged.
#[derive(Event, Debug, Clone, Copy)]
pub struct GrabMoveEvent {
    pub note: NoteId,
    pub position: Vec3,
}

/// One-shot hold activation of a track pad.
#[derive(Event, Debug, Clone, Copy)]
pub struct ActivateEvent {
    pub target: TrackPadId,
}

/// The external transition timeline (the page's crossfade, or the native
/// simulation of it) finished.
#[derive(Event, Debug, Clone, Copy)]
pub struct TransitionCompleteEvent;
