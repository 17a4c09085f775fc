//! Landmark proxy spheres.
//!
//! The renderer relies on a strict 1:1 correspondence between a slot's
//! landmarks and its proxy entities: all 21 spawn together when the slot
//! activates and despawn together the frame it goes dark. Tip landmarks
//! get the larger sphere; pinch recolours the thumb and index tips.

use bevy::prelude::*;

use constants::tracking::{
    INDEX_TIP, LANDMARKS_PER_HAND, MAX_HAND_SLOTS, MIDDLE_TIP, PROXY_NEUTRAL_COLOR,
    PROXY_PINCH_COLOR, PROXY_RADIUS, PROXY_TIP_RADIUS, THUMB_TIP,
};

use super::hand_slots::HandSlots;

#[derive(Component)]
pub struct LandmarkProxy {
    pub slot: usize,
    pub index: usize,
}

/// Shared mesh and material handles for every proxy sphere.
#[derive(Resource)]
pub struct ProxyAssets {
    sphere: Handle<Mesh>,
    sphere_tip: Handle<Mesh>,
    neutral: Handle<StandardMaterial>,
    pinch: Handle<StandardMaterial>,
}

/// Proxy entities per slot; empty while the slot is inactive.
#[derive(Resource)]
pub struct LandmarkProxies {
    per_slot: Vec<Vec<Entity>>,
}

impl Default for LandmarkProxies {
    fn default() -> Self {
        Self {
            per_slot: vec![Vec::new(); MAX_HAND_SLOTS],
        }
    }
}

pub fn init_proxy_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ProxyAssets {
        sphere: meshes.add(Sphere::new(PROXY_RADIUS)),
        sphere_tip: meshes.add(Sphere::new(PROXY_TIP_RADIUS)),
        neutral: materials.add(StandardMaterial {
            base_color: PROXY_NEUTRAL_COLOR,
            ..default()
        }),
        pinch: materials.add(StandardMaterial {
            base_color: PROXY_PINCH_COLOR,
            ..default()
        }),
    });
}

fn is_tip(index: usize) -> bool {
    index == THUMB_TIP || index == INDEX_TIP || index == MIDDLE_TIP
}

/// Spawn, move, or despawn proxy spheres to mirror slot state.
pub fn sync_landmark_proxies(
    slots: Res<HandSlots>,
    assets: Res<ProxyAssets>,
    mut proxies: ResMut<LandmarkProxies>,
    mut commands: Commands,
    mut transforms: Query<&mut Transform, With<LandmarkProxy>>,
) {
    for index in 0..proxies.per_slot.len() {
        let slot = slots.get(index);

        if !slot.map(|s| s.active).unwrap_or(false) {
            for entity in proxies.per_slot[index].drain(..) {
                commands.entity(entity).despawn();
            }
            continue;
        }

        let Some(slot) = slot else { continue };
        if proxies.per_slot[index].is_empty() {
            let spawned: Vec<Entity> = (0..LANDMARKS_PER_HAND)
                .map(|i| {
                    let mesh = if is_tip(i) {
                        assets.sphere_tip.clone()
                    } else {
                        assets.sphere.clone()
                    };
                    commands
                        .spawn((
                            Mesh3d(mesh),
                            MeshMaterial3d(assets.neutral.clone()),
                            Transform::from_translation(slot.smoothed_world[i]),
                            LandmarkProxy { slot: index, index: i },
                        ))
                        .id()
                })
                .collect();
            proxies.per_slot[index] = spawned;
        } else {
            for (i, entity) in proxies.per_slot[index].iter().enumerate() {
                if let Ok(mut transform) = transforms.get_mut(*entity) {
                    transform.translation = slot.smoothed_world[i];
                }
            }
        }
    }
}

/// Reflect pinch state on the thumb and index tip proxies.
pub fn update_pinch_colors(
    slots: Res<HandSlots>,
    assets: Res<ProxyAssets>,
    proxies: Res<LandmarkProxies>,
    mut handles: Query<&mut MeshMaterial3d<StandardMaterial>, With<LandmarkProxy>>,
) {
    for (index, entities) in proxies.per_slot.iter().enumerate() {
        if entities.is_empty() {
            continue;
        }
        let Some(slot) = slots.get(index) else {
            continue;
        };
        let target = if slot.is_pinching {
            &assets.pinch
        } else {
            &assets.neutral
        };
        for tip in [THUMB_TIP, INDEX_TIP] {
            if let Ok(mut handle) = handles.get_mut(entities[tip]) {
                if handle.0 != *target {
                    handle.0 = target.clone();
                }
            }
        }
    }
}
