//! Hand track manager and gesture classifier: the fixed slot arena, the
//! pinch test, and the landmark proxy spheres the renderer mirrors.

pub mod hand_slots;
pub mod pinch;
pub mod proxies;

use bevy::prelude::*;

use constants::tracking::MAX_HAND_SLOTS;

pub use hand_slots::{HandSlot, HandSlots, update_hand_slots};
pub use pinch::classify_pinch;
pub use proxies::{LandmarkProxies, init_proxy_assets, sync_landmark_proxies, update_pinch_colors};

pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HandSlots::with_capacity(MAX_HAND_SLOTS))
            .init_resource::<LandmarkProxies>()
            .add_systems(Startup, init_proxy_assets);
    }
}
