//! Pinch classification.
//!
//! A single-frame threshold test on the thumb-tip/index-tip distance in
//! the detector's native unit space. There is no hysteresis band: a hand
//! holding exactly the threshold distance can flicker between frames.

use bevy::prelude::*;

use constants::tracking::{INDEX_TIP, LANDMARKS_PER_HAND, THUMB_TIP};

use crate::engine::loading::StageSettings;
use crate::oracle::Landmark;

use super::hand_slots::HandSlots;

/// Raw thumb-tip to index-tip distance for one landmark set.
pub fn pinch_distance(landmarks: &[Landmark; LANDMARKS_PER_HAND]) -> f32 {
    landmarks[THUMB_TIP].distance(&landmarks[INDEX_TIP])
}

pub fn is_pinch(landmarks: &[Landmark; LANDMARKS_PER_HAND], threshold: f32) -> bool {
    pinch_distance(landmarks) < threshold
}

/// Reclassify every active slot from its current landmark snapshot.
pub fn classify_pinch(settings: Res<StageSettings>, mut slots: ResMut<HandSlots>) {
    let threshold = settings.pinch_threshold;
    for slot in slots.iter_mut() {
        if slot.active {
            slot.is_pinching = is_pinch(&slot.landmarks, threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::tracking::PINCH_THRESHOLD;

    fn landmarks_with_pinch_gap(gap: f32) -> [Landmark; LANDMARKS_PER_HAND] {
        let mut landmarks = [Landmark::default(); LANDMARKS_PER_HAND];
        landmarks[THUMB_TIP] = Landmark::new(0.5, 0.5, 0.0);
        landmarks[INDEX_TIP] = Landmark::new(0.5 + gap, 0.5, 0.0);
        landmarks
    }

    #[test]
    fn test_close_tips_classify_as_pinch() {
        let landmarks = landmarks_with_pinch_gap(0.05);
        assert!(is_pinch(&landmarks, PINCH_THRESHOLD));
    }

    #[test]
    fn test_open_hand_is_not_a_pinch() {
        let landmarks = landmarks_with_pinch_gap(0.3);
        assert!(!is_pinch(&landmarks, PINCH_THRESHOLD));
    }

    #[test]
    fn test_exact_threshold_is_open() {
        // Strict less-than: the boundary itself does not pinch.
        let landmarks = landmarks_with_pinch_gap(PINCH_THRESHOLD);
        assert!(!is_pinch(&landmarks, PINCH_THRESHOLD));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let landmarks = landmarks_with_pinch_gap(0.08);
        let first = is_pinch(&landmarks, PINCH_THRESHOLD);
        let second = is_pinch(&landmarks, PINCH_THRESHOLD);
        assert_eq!(first, second);
    }
}
