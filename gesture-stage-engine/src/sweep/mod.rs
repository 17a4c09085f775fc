//! Sweep-trigger detection driven by the moving scan line.

pub mod scan_line;

use bevy::prelude::*;

pub use scan_line::{ScanLine, SweepState, advance_scan_line, spawn_scan_line, sweep_probe};

pub struct SweepPlugin;

impl Plugin for SweepPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SweepState>();
    }
}
