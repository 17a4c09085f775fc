//! `postMessage` bridge between the page and the engine.
//!
//! Inbound, the page streams detector output and session control:
//! `landmark_frame` (one MediaPipe result per video frame),
//! `session_start` (the start-screen button), and `transition_complete`
//! (the audio layer finished its track crossfade). Outbound, the engine
//! mirrors its semantic events as notifications for the page's sound
//! layer. Native builds keep the queues but no-op the transport.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use constants::tracking::LANDMARKS_PER_HAND;

use crate::audio::events::TransitionCompleteEvent;
use crate::engine::core::SessionState;
use crate::oracle::{HandDetection, Landmark, LandmarkFrame, PendingFrames};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 shaped incoming message. Everything the page sends is a
/// notification; ids are accepted and ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// One-way notification to the page.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// Resource queueing outbound notifications until the transport system
/// drains them at the end of the frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    pub fn pending(&self) -> usize {
        self.outgoing_notifications.len()
    }
}

pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>();

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe queue bridging the JS event callback into the ECS.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Ownership moves to JS; the listener lives for the page lifetime.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping the thread-safe queue filled by the JS listener.
#[derive(Resource)]
pub(crate) struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[derive(Event)]
pub struct IncomingRpcMessage {
    pub content: String,
}

pub fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

pub fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut pending: ResMut<PendingFrames>,
    mut session: ResMut<SessionState>,
    mut transitions: EventWriter<TransitionCompleteEvent>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Unparseable bridge message: {parse_error}");
                continue;
            }
        };

        match request.method.as_str() {
            "landmark_frame" => {
                if let Some(frame) = parse_landmark_frame(&request.params) {
                    pending.0.push_back(frame);
                }
            }
            "session_start" => {
                if !session.started {
                    info!("Session started from page");
                    session.started = true;
                }
            }
            "transition_complete" => {
                transitions.write(TransitionCompleteEvent);
            }
            other => {
                warn!("Unknown bridge method: {other}");
            }
        }
    }
}

#[derive(Deserialize)]
struct LandmarkParam {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Deserialize)]
struct LandmarkFrameParams {
    timestamp_ms: f64,
    hands: Vec<Vec<LandmarkParam>>,
}

/// Decode one detector result. Hands with the wrong landmark count are
/// skipped rather than failing the whole frame.
pub fn parse_landmark_frame(params: &serde_json::Value) -> Option<LandmarkFrame> {
    let parsed = match serde_json::from_value::<LandmarkFrameParams>(params.clone()) {
        Ok(parsed) => parsed,
        Err(parse_error) => {
            warn!("Bad landmark_frame params: {parse_error}");
            return None;
        }
    };

    let mut hands = Vec::with_capacity(parsed.hands.len());
    for raw_hand in &parsed.hands {
        if raw_hand.len() != LANDMARKS_PER_HAND {
            warn!(
                "Dropping hand with {} landmarks, expected {}",
                raw_hand.len(),
                LANDMARKS_PER_HAND
            );
            continue;
        }
        let mut landmarks = [Landmark::default(); LANDMARKS_PER_HAND];
        for (i, raw) in raw_hand.iter().enumerate() {
            landmarks[i] = Landmark::new(raw.x, raw.y, raw.z);
        }
        hands.push(HandDetection::new(landmarks));
    }

    Some(LandmarkFrame {
        timestamp_ms: parsed.timestamp_ms,
        hands,
    })
}

/// Drain queued notifications to the parent page.
pub fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No transport off the web; the sound sink already saw the event.
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_json(hand_count: usize, landmarks_per_hand: usize) -> serde_json::Value {
        let hand: Vec<_> = (0..landmarks_per_hand)
            .map(|i| serde_json::json!({"x": i as f32 * 0.01, "y": 0.5, "z": -0.02}))
            .collect();
        serde_json::json!({
            "timestamp_ms": 1234.0,
            "hands": vec![hand; hand_count],
        })
    }

    #[test]
    fn test_parse_valid_frame() {
        let frame = parse_landmark_frame(&frame_json(2, LANDMARKS_PER_HAND)).unwrap();
        assert_eq!(frame.timestamp_ms, 1234.0);
        assert_eq!(frame.hands.len(), 2);
        assert!((frame.hands[0].landmarks[3].x - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_hand_is_dropped_not_fatal() {
        let mut params = frame_json(1, LANDMARKS_PER_HAND);
        params["hands"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!([{"x": 0.0, "y": 0.0, "z": 0.0}]));

        let frame = parse_landmark_frame(&params).unwrap();
        assert_eq!(frame.hands.len(), 1);
    }

    #[test]
    fn test_bad_params_yield_none() {
        assert!(parse_landmark_frame(&serde_json::json!({"nope": true})).is_none());
    }

    #[test]
    fn test_notifications_queue_until_drained() {
        let mut rpc = WebRpcInterface::default();
        rpc.send_notification("sweep_trigger", serde_json::json!({"entries": []}));
        rpc.send_notification("activate", serde_json::json!({"target": 1}));
        assert_eq!(rpc.pending(), 2);
    }
}
