//! Range mapping and the pitch scale shared with the page's audio layer.

use bevy::prelude::*;

use constants::stage::{NOTE_MAX_Y, NOTE_MIN_Y};

/// Note names the audio layer plays, indexed from the bottom of the
/// stage upward.
pub const NOTE_NAMES: &[&str] = &[
    "C2", "D2", "E2", "F2", "G2", "A2", "B2", "C3", "D3", "E3", "F3", "G3", "A3", "B3", "C4", "D4",
    "E4", "F4", "G4", "A4", "B4", "C5", "D5", "E5", "F5", "G5", "A5", "B5", "C6", "D6", "E6", "F6",
    "G6", "A6", "B6",
];

/// Linear remap of `value` from one range onto another. A zero-width
/// input range maps everything to `out_min` rather than producing a
/// non-finite result.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        warn!("map_range over zero-width input range [{in_min}, {in_max}]");
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / span + out_min
}

/// World x onto a stereo pan, clamped to [-1, 1].
pub fn pan_from_world_x(x: f32, half_width: f32) -> f32 {
    map_range(x, -half_width, half_width, -1.0, 1.0).clamp(-1.0, 1.0)
}

/// Index into [`NOTE_NAMES`] for a note height.
pub fn note_index(pitch_value: f32) -> usize {
    let idx = map_range(
        pitch_value,
        NOTE_MIN_Y,
        NOTE_MAX_Y,
        0.0,
        (NOTE_NAMES.len() - 1) as f32,
    )
    .floor();
    (idx.max(0.0) as usize).min(NOTE_NAMES.len() - 1)
}

pub fn note_name(pitch_value: f32) -> &'static str {
    NOTE_NAMES[note_index(pitch_value)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_basic() {
        assert!((map_range(5.0, 0.0, 10.0, 0.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((map_range(0.0, -1.0, 1.0, 0.0, 100.0) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_map_range_zero_width_input_returns_out_min() {
        let mapped = map_range(5.0, 5.0, 5.0, 0.0, 1.0);
        assert_eq!(mapped, 0.0);
        assert!(mapped.is_finite());
    }

    #[test]
    fn test_map_range_extrapolates_outside_input() {
        assert!((map_range(20.0, 0.0, 10.0, 0.0, 1.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_pan_is_clamped() {
        assert_eq!(pan_from_world_x(100.0, 5.0), 1.0);
        assert_eq!(pan_from_world_x(-100.0, 5.0), -1.0);
        assert!((pan_from_world_x(0.0, 5.0)).abs() < 1e-6);
    }

    #[test]
    fn test_pan_matches_ndc_mapping() {
        // A note at x = 2 on a stage 20/3 wide maps to pan 0.3.
        let half_width = 20.0 / 3.0;
        assert!((pan_from_world_x(2.0, half_width) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_note_index_covers_scale_ends() {
        assert_eq!(note_index(NOTE_MIN_Y), 0);
        assert_eq!(note_index(NOTE_MAX_Y), NOTE_NAMES.len() - 1);
        assert_eq!(note_name(NOTE_MIN_Y), "C2");
        assert_eq!(note_name(NOTE_MAX_Y), "B6");
    }

    #[test]
    fn test_note_index_clamps_out_of_range_heights() {
        assert_eq!(note_index(-100.0), 0);
        assert_eq!(note_index(100.0), NOTE_NAMES.len() - 1);
    }
}
