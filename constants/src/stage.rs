use bevy::prelude::*;

/// Vertical extent of the orthographic stage frustum in world units.
pub const FRUSTUM_HEIGHT: f32 = 6.0;

/// Stage camera position on the Z axis, looking toward -Z.
pub const CAMERA_Z: f32 = 3.0;

/// Fallback aspect ratio until the primary window reports one.
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Fixed note layout: (world x, world y) per note. The population never
/// changes at runtime; notes are repositioned by dragging, not respawned.
pub const NOTE_LAYOUT: &[(f32, f32)] = &[
    (-5.0, 1.2),
    (-4.0, -2.1),
    (-3.0, 0.4),
    (-2.0, 2.6),
    (-1.0, -0.9),
    (0.0, 1.8),
    (1.0, -2.7),
    (2.0, 0.1),
    (3.0, 2.2),
    (4.0, -1.4),
    (5.0, 2.9),
];

/// World y range notes occupy; also the pitch-mapping input range.
pub const NOTE_MIN_Y: f32 = -3.0;
pub const NOTE_MAX_Y: f32 = 3.0;

/// Palette cycled across the note population.
pub const NOTE_PALETTE: &[Color] = &[
    Color::srgb(0.937, 0.165, 0.157), // red
    Color::srgb(1.0, 0.890, 0.0),     // yellow
    Color::srgb(0.659, 0.780, 0.980), // light blue
    Color::srgb(1.0, 0.522, 0.765),   // pink
    Color::srgb(0.176, 0.369, 0.835), // blue
    Color::srgb(0.282, 0.788, 0.690), // green
    Color::srgb(0.953, 0.612, 0.071), // orange
    Color::srgb(0.522, 0.573, 0.620), // grey
    Color::srgb(0.835, 0.502, 1.0),   // purple
];

/// Track pads sit below the note field, out of the sweep probe's path.
pub const TRACK_PAD_Y: f32 = -2.8;
pub const TRACK_PAD_SPACING: f32 = 1.4;
pub const TRACK_PAD_SIZE: Vec3 = Vec3::new(0.8, 0.3, 0.3);
pub const TRACK_PAD_COLOR: Color = Color::srgb(0.22, 0.24, 0.28);
