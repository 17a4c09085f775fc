//! Fixed-capacity hand slot arena.
//!
//! One record per concurrent hand, allocated once at startup and reused
//! for whatever hand the detector reports at that array position each
//! frame. There is no cross-frame re-identification and no grace period:
//! a slot the detector omits this frame deactivates this frame, releasing
//! its grab and pinch state in the same step.

use bevy::prelude::*;

use constants::tracking::{INDEX_TIP, LANDMARKS_PER_HAND};

use crate::engine::camera::StageCamera;
use crate::engine::loading::StageSettings;
use crate::oracle::{CurrentDetection, HandDetection, Landmark};

/// Per-slot state. Kept as one record so active/landmarks/pinch/grab stay
/// atomic per slot rather than spread over parallel arrays.
#[derive(Debug, Clone)]
pub struct HandSlot {
    pub active: bool,
    pub landmarks: [Landmark; LANDMARKS_PER_HAND],
    /// World-space landmark positions, exponentially smoothed.
    pub smoothed_world: [Vec3; LANDMARKS_PER_HAND],
    /// Mirrored NDC ray origin derived from the raw index tip.
    pub ray_origin_ndc: Vec3,
    pub is_pinching: bool,
    /// Weak reference to the grabbed note; the note outlives the hand.
    pub grabbed: Option<Entity>,
}

impl Default for HandSlot {
    fn default() -> Self {
        Self {
            active: false,
            landmarks: [Landmark::default(); LANDMARKS_PER_HAND],
            smoothed_world: [Vec3::ZERO; LANDMARKS_PER_HAND],
            ray_origin_ndc: Vec3::ZERO,
            is_pinching: false,
            grabbed: None,
        }
    }
}

impl HandSlot {
    /// Drop all per-hand state the instant the detector stops reporting
    /// this slot. The grabbed note keeps its position; only the reference
    /// is released.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.is_pinching = false;
        self.grabbed = None;
    }
}

/// Mirror a raw landmark into NDC: the camera view is mirrored, so x
/// flips (`-2x + 1`) and y flips from image-down to NDC-up.
pub fn mirrored_ndc(landmark: &Landmark) -> Vec3 {
    Vec3::new(
        -landmark.x * 2.0 + 1.0,
        -landmark.y * 2.0 + 1.0,
        -landmark.z,
    )
}

#[derive(Resource)]
pub struct HandSlots {
    slots: Vec<HandSlot>,
}

impl HandSlots {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![HandSlot::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    pub fn get(&self, index: usize) -> Option<&HandSlot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut HandSlot> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandSlot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut HandSlot> {
        self.slots.iter_mut()
    }

    pub fn deactivate_all(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }

    /// Map one detection result onto the arena by detector array order.
    /// Hands beyond capacity are ignored; slots without a hand this frame
    /// deactivate immediately.
    pub fn apply_frame(
        &mut self,
        hands: &[HandDetection],
        smoothing: f32,
        to_world: impl Fn(&Landmark) -> Vec3,
    ) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(hand) = hands.get(index) else {
                slot.deactivate();
                continue;
            };

            let was_active = slot.active;
            slot.landmarks = hand.landmarks;
            for (i, landmark) in hand.landmarks.iter().enumerate() {
                let world = to_world(landmark);
                slot.smoothed_world[i] = if was_active {
                    slot.smoothed_world[i].lerp(world, smoothing)
                } else {
                    world
                };
            }
            // Ray origin follows the raw index tip, not the smoothed one.
            slot.ray_origin_ndc = mirrored_ndc(&hand.landmarks[INDEX_TIP]);
            slot.active = true;
        }
    }
}

/// Per-frame slot update. Runs only when the video frame advanced; a
/// repeated frame leaves every slot exactly as it was.
pub fn update_hand_slots(
    detection: Res<CurrentDetection>,
    settings: Res<StageSettings>,
    camera: Res<StageCamera>,
    mut slots: ResMut<HandSlots>,
) {
    let Some(frame) = detection.frame.as_ref() else {
        return;
    };

    let smoothing = settings.landmark_smoothing;
    slots.apply_frame(&frame.hands, smoothing, |landmark| {
        let ndc = mirrored_ndc(landmark);
        camera.ndc_to_world(Vec2::new(ndc.x, ndc.y))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::tracking::MAX_HAND_SLOTS;

    fn hand_at(x: f32, y: f32) -> HandDetection {
        HandDetection::new([Landmark::new(x, y, 0.0); LANDMARKS_PER_HAND])
    }

    fn identity_world(landmark: &Landmark) -> Vec3 {
        Vec3::new(landmark.x, landmark.y, landmark.z)
    }

    #[test]
    fn test_active_count_matches_min_of_hands_and_capacity() {
        let mut slots = HandSlots::with_capacity(MAX_HAND_SLOTS);
        for hands in 0..=6 {
            let frame: Vec<_> = (0..hands).map(|i| hand_at(i as f32 * 0.1, 0.5)).collect();
            slots.apply_frame(&frame, 0.6, identity_world);
            assert_eq!(slots.active_count(), hands.min(MAX_HAND_SLOTS));
        }
    }

    #[test]
    fn test_zero_hands_deactivates_everything_at_once() {
        let mut slots = HandSlots::with_capacity(2);
        slots.apply_frame(&[hand_at(0.2, 0.2), hand_at(0.8, 0.8)], 0.6, identity_world);
        assert_eq!(slots.active_count(), 2);

        slots.apply_frame(&[], 0.6, identity_world);
        assert_eq!(slots.active_count(), 0);
        assert!(slots.iter().all(|s| !s.is_pinching && s.grabbed.is_none()));
    }

    #[test]
    fn test_absent_slot_releases_grab_and_pinch() {
        let mut slots = HandSlots::with_capacity(2);
        slots.apply_frame(&[hand_at(0.5, 0.5)], 0.6, identity_world);

        let slot = slots.get_mut(0).unwrap();
        slot.is_pinching = true;
        slot.grabbed = Some(Entity::from_raw(7));

        slots.apply_frame(&[], 0.6, identity_world);
        let slot = slots.get(0).unwrap();
        assert!(!slot.active);
        assert!(!slot.is_pinching);
        assert!(slot.grabbed.is_none());
    }

    #[test]
    fn test_first_frame_snaps_then_smooths() {
        let mut slots = HandSlots::with_capacity(1);

        slots.apply_frame(&[hand_at(1.0, 0.0)], 0.5, identity_world);
        assert!((slots.get(0).unwrap().smoothed_world[0].x - 1.0).abs() < 1e-6);

        // Second frame lerps halfway toward the new position.
        slots.apply_frame(&[hand_at(2.0, 0.0)], 0.5, identity_world);
        assert!((slots.get(0).unwrap().smoothed_world[0].x - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_ray_origin_mirrors_raw_index_tip() {
        let mut slots = HandSlots::with_capacity(1);
        let mut landmarks = [Landmark::default(); LANDMARKS_PER_HAND];
        landmarks[INDEX_TIP] = Landmark::new(0.25, 0.75, 0.1);
        slots.apply_frame(&[HandDetection::new(landmarks)], 0.6, identity_world);

        let origin = slots.get(0).unwrap().ray_origin_ndc;
        assert!((origin.x - 0.5).abs() < 1e-6); // -2 * 0.25 + 1
        assert!((origin.y - -0.5).abs() < 1e-6); // -2 * 0.75 + 1
        assert!((origin.z - -0.1).abs() < 1e-6);
    }

    #[test]
    fn test_capacity_is_fixed() {
        let mut slots = HandSlots::with_capacity(1);
        let frame: Vec<_> = (0..4).map(|i| hand_at(i as f32 * 0.2, 0.5)).collect();
        slots.apply_frame(&frame, 0.6, identity_world);
        assert_eq!(slots.capacity(), 1);
        assert_eq!(slots.active_count(), 1);
    }
}
