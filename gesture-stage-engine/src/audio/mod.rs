//! Semantic event surface exposed to the audio/scene layer.

pub mod bridge;
pub mod events;
pub mod mapping;

use bevy::prelude::*;

pub use bridge::{CrossfadeSim, LogSoundTrigger, SoundSink, SoundTrigger, forward_audio_events};
pub use events::{ActivateEvent, GrabMoveEvent, SweepTriggerEvent, TransitionCompleteEvent, TriggerEntry};
pub use mapping::{map_range, note_name, pan_from_world_x};

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundSink>()
            .init_resource::<CrossfadeSim>()
            .add_event::<SweepTriggerEvent>()
            .add_event::<GrabMoveEvent>()
            .add_event::<ActivateEvent>()
            .add_event::<TransitionCompleteEvent>();
    }
}
