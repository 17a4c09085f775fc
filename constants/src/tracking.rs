use bevy::prelude::*;

/// Landmarks reported per detected hand (MediaPipe hand topology).
pub const LANDMARKS_PER_HAND: usize = 21;

// Anatomically fixed landmark indices within a detection.
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;

/// Fixed hand slot capacity on desktop configurations.
pub const MAX_HAND_SLOTS: usize = 4;

/// Hand slot capacity on constrained (single-hand) configurations.
pub const CONSTRAINED_HAND_SLOTS: usize = 1;

/// Thumb-tip/index-tip distance below which a hand counts as pinching,
/// measured in the detector's normalised landmark space.
pub const PINCH_THRESHOLD: f32 = 0.1;

/// Wider pinch threshold for mobile trackers with coarser precision.
pub const PINCH_THRESHOLD_MOBILE: f32 = 0.15;

/// Lerp factor applied per frame when smoothing landmark world positions.
/// Higher is more responsive, lower is smoother.
pub const LANDMARK_SMOOTHING: f32 = 0.6;

/// Radius of the sphere proxy rendered for an ordinary landmark.
pub const PROXY_RADIUS: f32 = 0.1;

/// Radius of the sphere proxy for the thumb/index/middle tips.
pub const PROXY_TIP_RADIUS: f32 = 0.15;

/// Landmark proxy colour while the hand is open.
pub const PROXY_NEUTRAL_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);

/// Landmark proxy colour applied to thumb and index tips while pinching.
pub const PROXY_PINCH_COLOR: Color = Color::srgb(0.18, 0.27, 1.0);
