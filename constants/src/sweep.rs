use bevy::prelude::*;

/// Scan line travel speed in world units per second.
pub const SWEEP_RATE: f32 = 1.75;

/// Scan line wraps back to [`SWEEP_MIN_X`] after passing this bound.
pub const SWEEP_MAX_X: f32 = 7.0;

/// Left bound the scan line restarts from (sawtooth, not bounce).
pub const SWEEP_MIN_X: f32 = -7.0;

/// Height the downward probe ray is anchored at.
pub const PROBE_HEIGHT: f32 = 10.0;

/// Probe ray direction: straight down through the note field.
pub const PROBE_DIRECTION: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// Visual dimensions of the scan line cylinder.
pub const SCAN_LINE_RADIUS: f32 = 0.05;
pub const SCAN_LINE_LENGTH: f32 = 10.0;

/// Scan line colour (translucent cyan).
pub const SCAN_LINE_COLOR: Color = Color::srgba(0.0, 1.0, 1.0, 0.8);
