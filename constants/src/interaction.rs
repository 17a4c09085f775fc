/// Uniform scale applied to a note while a hand ray or the scan line
/// intersects it.
pub const HOVER_SCALE: f32 = 1.3;

/// Uniform scale of a note at rest.
pub const NORMAL_SCALE: f32 = 1.0;

/// Lerp factor per frame when moving a grabbed note toward the ray's
/// projection on the drag plane.
pub const DRAG_SMOOTHING: f32 = 0.35;

/// Z of the fixed reference plane grabbed notes are dragged along.
pub const DRAG_PLANE_Z: f32 = 0.0;
