//! Black-box boundary to the sound layer.
//!
//! The engine never synthesises audio; it hands semantic events to a
//! [`SoundTrigger`] sink and, in the browser, mirrors them over the
//! message bridge to the page that owns the actual synths. The default
//! sink just narrates what would play.

use bevy::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use constants::hold::CROSSFADE_SECS;

use crate::rpc::web_rpc::WebRpcInterface;

use super::events::{ActivateEvent, GrabMoveEvent, SweepTriggerEvent};
#[cfg(not(target_arch = "wasm32"))]
use super::events::TransitionCompleteEvent;
use super::mapping::note_name;

/// Receiver for the three semantic event kinds the pipeline emits.
pub trait SoundTrigger: Send + Sync + 'static {
    fn sweep_trigger(&mut self, event: &SweepTriggerEvent);
    fn grab_move(&mut self, event: &GrabMoveEvent);
    fn activate(&mut self, event: &ActivateEvent);
}

#[derive(Resource)]
pub struct SoundSink(pub Box<dyn SoundTrigger>);

impl Default for SoundSink {
    fn default() -> Self {
        Self(Box::new(LogSoundTrigger))
    }
}

/// Narrating sink used when no real audio layer is attached.
pub struct LogSoundTrigger;

impl SoundTrigger for LogSoundTrigger {
    fn sweep_trigger(&mut self, event: &SweepTriggerEvent) {
        let notes: Vec<&str> = event
            .entries
            .iter()
            .map(|e| note_name(e.pitch_value))
            .collect();
        info!("sweep trigger: {:?}", notes);
    }

    fn grab_move(&mut self, event: &GrabMoveEvent) {
        debug!("note {} dragged to {:?}", event.note.0, event.position);
    }

    fn activate(&mut self, event: &ActivateEvent) {
        info!("track pad {} activated", event.target.0);
    }
}

/// Fan this frame's semantic events out to the sink and, on wasm, to the
/// page over the message bridge.
pub fn forward_audio_events(
    mut sweeps: EventReader<SweepTriggerEvent>,
    mut grabs: EventReader<GrabMoveEvent>,
    mut activations: EventReader<ActivateEvent>,
    mut sink: ResMut<SoundSink>,
    mut rpc: ResMut<WebRpcInterface>,
) {
    for event in sweeps.read() {
        sink.0.sweep_trigger(event);
        let entries: Vec<_> = event
            .entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "pitch_value": e.pitch_value,
                    "pan": e.pan,
                    "note": note_name(e.pitch_value),
                })
            })
            .collect();
        rpc.send_notification("sweep_trigger", serde_json::json!({ "entries": entries }));
    }

    for event in grabs.read() {
        sink.0.grab_move(event);
        rpc.send_notification(
            "grab_move",
            serde_json::json!({
                "note": event.note.0,
                "position": [event.position.x, event.position.y, event.position.z],
            }),
        );
    }

    for event in activations.read() {
        sink.0.activate(event);
        rpc.send_notification(
            "activate",
            serde_json::json!({ "target": event.target.0 }),
        );
    }
}

/// Native stand-in for the page's crossfade timeline: completes a fixed
/// interval after each activation so the transition gate reopens.
#[derive(Resource, Default)]
pub struct CrossfadeSim {
    ends_at: Option<f64>,
}

#[cfg(not(target_arch = "wasm32"))]
pub fn simulate_crossfade(
    time: Res<Time>,
    mut sim: ResMut<CrossfadeSim>,
    mut activations: EventReader<ActivateEvent>,
    mut complete: EventWriter<TransitionCompleteEvent>,
) {
    let now = time.elapsed_secs_f64();
    for _ in activations.read() {
        sim.ends_at.get_or_insert(now + CROSSFADE_SECS);
    }
    if let Some(ends_at) = sim.ends_at {
        if now >= ends_at {
            sim.ends_at = None;
            complete.write(TransitionCompleteEvent);
        }
    }
}
