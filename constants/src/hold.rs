/// Continuous contact duration required before a hold activates, seconds.
pub const HOLD_ACTIVATE_SECS: f64 = 0.5;

/// Length of the simulated track crossfade on native builds, seconds.
/// In the browser the page's audio layer owns this timeline and reports
/// completion over the message bridge instead.
pub const CROSSFADE_SECS: f64 = 2.0;

/// Number of track pads spawned along the bottom of the stage.
pub const TRACK_PAD_COUNT: usize = 4;
