//! Hold-to-activate detection over the track pads.

pub mod activate;

use bevy::prelude::*;

pub use activate::{
    HoldStep, HoldTimers, TransitionGate, detect_holds, handle_transition_complete,
};

pub struct HoldPlugin;

impl Plugin for HoldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoldTimers>()
            .init_resource::<TransitionGate>();
    }
}
