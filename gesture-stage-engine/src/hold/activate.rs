//! Hold-to-activate: sustained hand contact with a track pad.
//!
//! A timer exists for a (hand, pad) pair exactly while contact has been
//! continuous since it was set; any frame without contact clears the
//! pair, with no partial credit surviving the break. Crossing the
//! threshold fires once, clears every timer that hand owns, and closes
//! the transition gate until the external crossfade reports completion.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::audio::events::{ActivateEvent, TransitionCompleteEvent};
use crate::engine::camera::StageCamera;
use crate::engine::loading::StageSettings;
use crate::engine::scene::{BoundsSize, TrackPad};
use crate::interaction::ray::ray_hits_bounds;
use crate::tracking::HandSlots;

/// Cooperative lock on the single transition slot. Entered only from an
/// activation, exited only by the external transition-complete callback.
#[derive(Resource, Default, Debug, PartialEq, Eq)]
pub enum TransitionGate {
    #[default]
    Idle,
    Transitioning,
}

impl TransitionGate {
    pub fn is_busy(&self) -> bool {
        matches!(self, TransitionGate::Transitioning)
    }

    pub fn begin(&mut self) {
        *self = TransitionGate::Transitioning;
    }

    pub fn complete(&mut self) {
        *self = TransitionGate::Idle;
    }
}

/// Outcome of one (hand, pad) contact step.
#[derive(Debug, PartialEq, Eq)]
pub enum HoldStep {
    Idle,
    Running,
    Fired,
}

#[derive(Resource, Default)]
pub struct HoldTimers {
    timers: HashMap<(usize, Entity), f64>,
}

impl HoldTimers {
    /// Step one (hand, pad) pair. `busy` suppresses starting a new timer;
    /// a running timer keeps counting and reports `Fired` on crossing,
    /// leaving the conflict decision to the caller.
    pub fn update_pair(
        &mut self,
        slot: usize,
        target: Entity,
        contact: bool,
        now: f64,
        threshold: f64,
        busy: bool,
    ) -> HoldStep {
        let key = (slot, target);

        if !contact {
            self.timers.remove(&key);
            return HoldStep::Idle;
        }

        match self.timers.get(&key) {
            None => {
                if busy {
                    return HoldStep::Idle;
                }
                self.timers.insert(key, now);
                HoldStep::Running
            }
            Some(start) => {
                if now - start >= threshold {
                    self.timers.remove(&key);
                    HoldStep::Fired
                } else {
                    HoldStep::Running
                }
            }
        }
    }

    /// Drop every timer a hand owns: on firing, and on losing the hand.
    pub fn clear_hand(&mut self, slot: usize) {
        self.timers.retain(|(s, _), _| *s != slot);
    }

    pub fn is_running(&self, slot: usize, target: Entity) -> bool {
        self.timers.contains_key(&(slot, target))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

pub fn detect_holds(
    time: Res<Time>,
    settings: Res<StageSettings>,
    camera: Res<StageCamera>,
    slots: Res<HandSlots>,
    pads: Query<(Entity, &GlobalTransform, &BoundsSize, &TrackPad)>,
    mut timers: ResMut<HoldTimers>,
    mut gate: ResMut<TransitionGate>,
    mut activations: EventWriter<ActivateEvent>,
) {
    let now = time.elapsed_secs_f64();
    let threshold = settings.hold_secs;

    for (index, slot) in slots.iter().enumerate() {
        if !slot.active {
            // A lost hand is a broken contact for every pad at once.
            timers.clear_hand(index);
            continue;
        }

        let ndc = Vec2::new(slot.ray_origin_ndc.x, slot.ray_origin_ndc.y);
        let (origin, dir) = camera.stage_ray(ndc);

        for (entity, global, BoundsSize(size), pad) in pads.iter() {
            let contact = ray_hits_bounds(origin, dir, global, *size).is_some();
            let step = timers.update_pair(index, entity, contact, now, threshold, gate.is_busy());
            if step == HoldStep::Fired {
                timers.clear_hand(index);
                if gate.is_busy() {
                    // Conflicting activation while a transition is in
                    // flight: dropped, never queued.
                    debug!("hold activation dropped, transition in flight");
                } else {
                    gate.begin();
                    activations.write(ActivateEvent { target: pad.id });
                }
            }
        }
    }
}

/// The external transition timeline reports completion here.
pub fn handle_transition_complete(
    mut events: EventReader<TransitionCompleteEvent>,
    mut gate: ResMut<TransitionGate>,
) {
    for _ in events.read() {
        gate.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 0.5;

    fn pad() -> Entity {
        Entity::from_raw(42)
    }

    #[test]
    fn test_fires_exactly_once_at_threshold_crossing() {
        let mut timers = HoldTimers::default();
        let dt = 0.1;

        // D frames at dt spacing fire iff D * dt >= threshold.
        for frame in 0..5 {
            let step = timers.update_pair(0, pad(), true, frame as f64 * dt, THRESHOLD, false);
            assert_ne!(step, HoldStep::Fired, "fired early at frame {frame}");
        }
        let step = timers.update_pair(0, pad(), true, 0.5, THRESHOLD, false);
        assert_eq!(step, HoldStep::Fired);

        // The timer reset on firing: the very next frame only restarts.
        let step = timers.update_pair(0, pad(), true, 0.6, THRESHOLD, false);
        assert_eq!(step, HoldStep::Running);
    }

    #[test]
    fn test_short_contact_never_fires() {
        let mut timers = HoldTimers::default();
        let dt = 0.1;
        // 4 frames at 0.1 s spacing = 0.4 s of contact, below 0.5 s.
        for frame in 0..4 {
            let step = timers.update_pair(0, pad(), true, frame as f64 * dt, THRESHOLD, false);
            assert_ne!(step, HoldStep::Fired);
        }
    }

    #[test]
    fn test_contact_break_clears_progress() {
        let mut timers = HoldTimers::default();
        timers.update_pair(0, pad(), true, 0.0, THRESHOLD, false);
        timers.update_pair(0, pad(), true, 0.4, THRESHOLD, false);

        // One frame without contact wipes the accumulated 0.4 s.
        timers.update_pair(0, pad(), false, 0.45, THRESHOLD, false);
        assert!(!timers.is_running(0, pad()));

        // Re-contact restarts from zero: 0.46 + 0.4 < 0.46 + 0.5.
        let step = timers.update_pair(0, pad(), true, 0.46, THRESHOLD, false);
        assert_eq!(step, HoldStep::Running);
        let step = timers.update_pair(0, pad(), true, 0.86, THRESHOLD, false);
        assert_eq!(step, HoldStep::Running);
    }

    #[test]
    fn test_busy_gate_suppresses_new_timers() {
        let mut timers = HoldTimers::default();
        let step = timers.update_pair(0, pad(), true, 0.0, THRESHOLD, true);
        assert_eq!(step, HoldStep::Idle);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_firing_clears_all_timers_for_that_hand() {
        let mut timers = HoldTimers::default();
        let other = Entity::from_raw(43);
        timers.update_pair(0, pad(), true, 0.0, THRESHOLD, false);
        timers.update_pair(0, other, true, 0.3, THRESHOLD, false);

        let step = timers.update_pair(0, pad(), true, 0.6, THRESHOLD, false);
        assert_eq!(step, HoldStep::Fired);
        timers.clear_hand(0);
        assert!(!timers.is_running(0, other));
    }

    #[test]
    fn test_other_hands_keep_their_timers() {
        let mut timers = HoldTimers::default();
        timers.update_pair(0, pad(), true, 0.0, THRESHOLD, false);
        timers.update_pair(1, pad(), true, 0.0, THRESHOLD, false);
        timers.clear_hand(0);
        assert!(timers.is_running(1, pad()));
    }

    #[test]
    fn test_gate_state_machine() {
        let mut gate = TransitionGate::default();
        assert!(!gate.is_busy());
        gate.begin();
        assert!(gate.is_busy());
        gate.complete();
        assert_eq!(gate, TransitionGate::Idle);
    }
}
