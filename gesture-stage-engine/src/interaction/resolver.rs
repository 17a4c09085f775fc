//! Per-frame hover/grab/drag resolution.
//!
//! Runs after classification: casts one stage ray per active hand,
//! applies hover scaling from the combined hit list, then walks slots in
//! ascending index order to claim and drag notes. Grabs are sticky: a
//! pinching hand keeps its note until the pinch opens or the hand is
//! lost, and never re-resolves to a different note mid-pinch.

use std::cmp::Ordering;

use bevy::prelude::*;

use constants::interaction::{DRAG_PLANE_Z, DRAG_SMOOTHING, HOVER_SCALE, NORMAL_SCALE};

use crate::audio::events::GrabMoveEvent;
use crate::engine::camera::StageCamera;
use crate::engine::scene::{BoundsSize, NoteId, NoteObject, NoteOwner};
use crate::tracking::HandSlots;

use super::ray::{RayHit, ray_hits_bounds, ray_plane_z};

/// Nearest hit for `slot` that nobody owns yet. The nearest note wins or
/// nothing does: an owned note in front never forwards the claim to the
/// one behind it.
pub fn claim_target(hits: &[RayHit], slot: usize, is_owned: impl Fn(Entity) -> bool) -> Option<Entity> {
    hits.iter()
        .filter(|h| h.slot == slot)
        .min_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal))
        .filter(|h| !is_owned(h.entity))
        .map(|h| h.entity)
}

/// Exponential damping toward the drag target; never an instant snap.
pub fn damp_toward(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current.lerp(target, factor)
}

pub fn resolve_interactions(
    camera: Res<StageCamera>,
    mut slots: ResMut<HandSlots>,
    mut notes: Query<
        (
            Entity,
            &NoteId,
            &GlobalTransform,
            &mut Transform,
            &BoundsSize,
            &mut NoteOwner,
        ),
        With<NoteObject>,
    >,
    mut grab_moves: EventWriter<GrabMoveEvent>,
) {
    // Open pinch releases the grab; the note stays where it was dragged.
    for slot in slots.iter_mut() {
        if !slot.is_pinching {
            slot.grabbed = None;
        }
    }

    // Reconcile stale back-references (released or lost hands).
    for (entity, _, _, _, _, mut owner) in &mut notes {
        if let Some(index) = owner.0 {
            let still_held = slots
                .get(index)
                .map(|s| s.active && s.grabbed == Some(entity))
                .unwrap_or(false);
            if !still_held {
                owner.0 = None;
            }
        }
    }

    // Combined intersection list across every active hand.
    let mut hits: Vec<RayHit> = Vec::new();
    for (index, slot) in slots.iter().enumerate() {
        if !slot.active {
            continue;
        }
        let ndc = Vec2::new(slot.ray_origin_ndc.x, slot.ray_origin_ndc.y);
        let (origin, dir) = camera.stage_ray(ndc);
        for (entity, _, global, _, BoundsSize(size), _) in notes.iter() {
            if let Some(t) = ray_hits_bounds(origin, dir, global, *size) {
                hits.push(RayHit {
                    entity,
                    slot: index,
                    t,
                });
            }
        }
    }

    // Hover is visual only: reset everything, then scale the hit list.
    for (_, _, _, mut transform, _, _) in &mut notes {
        transform.scale = Vec3::splat(NORMAL_SCALE);
    }
    for hit in &hits {
        if let Ok((_, _, _, mut transform, _, _)) = notes.get_mut(hit.entity) {
            transform.scale = Vec3::splat(HOVER_SCALE);
        }
    }

    // Claims in ascending slot order: the lower index wins a same-frame
    // race for an unowned note.
    for index in 0..slots.capacity() {
        let Some(slot) = slots.get(index) else {
            continue;
        };
        if !slot.active || !slot.is_pinching || slot.grabbed.is_some() {
            continue;
        }
        let claimed = claim_target(&hits, index, |entity| {
            notes
                .get(entity)
                .map(|(_, _, _, _, _, owner)| owner.0.is_some())
                .unwrap_or(true)
        });
        if let Some(entity) = claimed {
            if let Some(slot) = slots.get_mut(index) {
                slot.grabbed = Some(entity);
            }
            if let Ok((_, _, _, _, _, mut owner)) = notes.get_mut(entity) {
                owner.0 = Some(index);
            }
        }
    }

    // Drag every grabbed note toward its hand ray's projection on the
    // stage plane, damped.
    for slot in slots.iter() {
        if !slot.active || !slot.is_pinching {
            continue;
        }
        let Some(entity) = slot.grabbed else {
            continue;
        };
        let ndc = Vec2::new(slot.ray_origin_ndc.x, slot.ray_origin_ndc.y);
        let (origin, dir) = camera.stage_ray(ndc);
        let Some(target) = ray_plane_z(origin, dir, DRAG_PLANE_Z) else {
            continue;
        };
        if let Ok((_, note_id, _, mut transform, _, _)) = notes.get_mut(entity) {
            transform.translation = damp_toward(transform.translation, target, DRAG_SMOOTHING);
            grab_moves.write(GrabMoveEvent {
                note: *note_id,
                position: transform.translation,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(entity: Entity, slot: usize, t: f32) -> RayHit {
        RayHit { entity, slot, t }
    }

    #[test]
    fn test_claim_picks_nearest_hit_for_slot() {
        let near = Entity::from_raw(1);
        let far = Entity::from_raw(2);
        let hits = vec![hit(far, 0, 4.0), hit(near, 0, 1.5), hit(far, 1, 0.5)];
        assert_eq!(claim_target(&hits, 0, |_| false), Some(near));
    }

    #[test]
    fn test_claim_skips_nothing_when_nearest_is_owned() {
        // An owned note in front blocks the claim entirely.
        let near = Entity::from_raw(1);
        let far = Entity::from_raw(2);
        let hits = vec![hit(near, 0, 1.0), hit(far, 0, 2.0)];
        assert_eq!(claim_target(&hits, 0, |e| e == near), None);
    }

    #[test]
    fn test_lower_slot_wins_same_frame_race() {
        // Both hands over the same unowned note: slots are walked in
        // ascending order, so slot 0 claims and slot 1 finds it owned.
        let note = Entity::from_raw(3);
        let hits = vec![hit(note, 0, 2.0), hit(note, 1, 1.0)];

        let mut owner: Option<usize> = None;
        for slot in 0..2 {
            if owner.is_none() {
                if let Some(e) = claim_target(&hits, slot, |_| owner.is_some()) {
                    assert_eq!(e, note);
                    owner = Some(slot);
                }
            }
        }
        assert_eq!(owner, Some(0));
    }

    #[test]
    fn test_no_hits_means_no_claim() {
        assert_eq!(claim_target(&[], 0, |_| false), None);
    }

    #[test]
    fn test_damped_drag_converges_without_snapping() {
        let target = Vec3::new(4.0, 0.0, 0.0);
        let mut position = Vec3::ZERO;
        position = damp_toward(position, target, 0.35);
        assert!(position.x > 0.0 && position.x < 4.0);

        for _ in 0..60 {
            position = damp_toward(position, target, 0.35);
        }
        assert!((position.x - 4.0).abs() < 1e-3);
    }
}
