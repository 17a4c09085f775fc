//! Moving scan line and its trigger detector.
//!
//! The line sweeps left to right forever and snaps back to the left bound
//! (sawtooth). Each frame a downward probe ray at the scan position is
//! tested against the note field; notes entering the probe since the
//! previous frame fire one batched trigger event. The previous set is
//! refreshed every frame whether or not anything fired, so a note that
//! stays under the probe can never re-trigger until it leaves and comes
//! back.

use std::collections::HashSet;

use bevy::prelude::*;

use constants::interaction::HOVER_SCALE;
use constants::sweep::{
    PROBE_DIRECTION, PROBE_HEIGHT, SCAN_LINE_COLOR, SCAN_LINE_LENGTH, SCAN_LINE_RADIUS,
    SWEEP_MAX_X, SWEEP_MIN_X,
};

use crate::audio::events::{SweepTriggerEvent, TriggerEntry};
use crate::audio::mapping::pan_from_world_x;
use crate::engine::camera::StageCamera;
use crate::engine::core::SessionState;
use crate::engine::loading::StageSettings;
use crate::engine::scene::{BoundsSize, NoteObject};
use crate::interaction::ray::ray_hits_bounds;

#[derive(Component)]
pub struct ScanLine;

#[derive(Resource)]
pub struct SweepState {
    pub scan_x: f32,
    previous: HashSet<Entity>,
}

impl Default for SweepState {
    fn default() -> Self {
        Self {
            scan_x: SWEEP_MIN_X,
            previous: HashSet::new(),
        }
    }
}

impl SweepState {
    /// Advance the scan position, wrapping sawtooth-style at the right
    /// bound.
    pub fn advance(&mut self, rate: f32, dt: f32) {
        self.scan_x += rate * dt;
        if self.scan_x > SWEEP_MAX_X {
            self.scan_x = SWEEP_MIN_X;
        }
    }

    /// Record this frame's intersecting set and return the notes that
    /// entered it since last frame. The stored set always becomes
    /// `current`, fired or not.
    pub fn observe(&mut self, current: HashSet<Entity>) -> Vec<Entity> {
        let entered: Vec<Entity> = current
            .iter()
            .filter(|e| !self.previous.contains(e))
            .copied()
            .collect();
        self.previous = current;
        entered
    }

    pub fn previous(&self) -> &HashSet<Entity> {
        &self.previous
    }
}

pub fn spawn_scan_line(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(SCAN_LINE_RADIUS, SCAN_LINE_LENGTH))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: SCAN_LINE_COLOR,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(SWEEP_MIN_X, 0.0, 0.0),
        ScanLine,
        Name::new("scan_line"),
    ));
}

pub fn advance_scan_line(
    time: Res<Time>,
    settings: Res<StageSettings>,
    mut sweep: ResMut<SweepState>,
    mut line: Query<&mut Transform, With<ScanLine>>,
) {
    sweep.advance(settings.sweep_rate, time.delta_secs());
    if let Ok(mut transform) = line.single_mut() {
        transform.translation.x = sweep.scan_x;
    }
}

/// Probe the note field at the scan position, scale what the probe is
/// touching, and emit at most one trigger batch for the newly entered
/// notes. Probing and visuals run even before the session starts; only
/// event emission waits for the start gate.
pub fn sweep_probe(
    session: Res<SessionState>,
    camera: Res<StageCamera>,
    mut sweep: ResMut<SweepState>,
    mut notes: Query<(Entity, &GlobalTransform, &mut Transform, &BoundsSize), With<NoteObject>>,
    mut triggers: EventWriter<SweepTriggerEvent>,
) {
    let origin = Vec3::new(sweep.scan_x, PROBE_HEIGHT, 0.0);

    let mut current = HashSet::new();
    for (entity, global, _, BoundsSize(size)) in notes.iter() {
        if ray_hits_bounds(origin, PROBE_DIRECTION, global, *size).is_some() {
            current.insert(entity);
        }
    }

    for entity in &current {
        if let Ok((_, _, mut transform, _)) = notes.get_mut(*entity) {
            transform.scale = Vec3::splat(HOVER_SCALE);
        }
    }

    let entered = sweep.observe(current);
    if entered.is_empty() || !session.started {
        return;
    }

    let half_width = camera.half_width();
    let entries: Vec<TriggerEntry> = entered
        .iter()
        .filter_map(|entity| notes.get(*entity).ok())
        .map(|(_, global, _, _)| TriggerEntry {
            pitch_value: global.translation().y,
            pan: pan_from_world_x(global.translation().x, half_width),
        })
        .collect();

    if !entries.is_empty() {
        triggers.write(SweepTriggerEvent { entries });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entities: &[Entity]) -> HashSet<Entity> {
        entities.iter().copied().collect()
    }

    #[test]
    fn test_previous_set_tracks_current_every_frame() {
        let mut sweep = SweepState::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);

        sweep.observe(set(&[a]));
        assert_eq!(sweep.previous(), &set(&[a]));

        sweep.observe(set(&[a, b]));
        assert_eq!(sweep.previous(), &set(&[a, b]));

        sweep.observe(set(&[]));
        assert!(sweep.previous().is_empty());
    }

    #[test]
    fn test_note_fires_once_until_it_exits_and_reenters() {
        let mut sweep = SweepState::default();
        let a = Entity::from_raw(1);

        assert_eq!(sweep.observe(set(&[a])), vec![a]);
        // Still under the probe: no re-trigger.
        assert!(sweep.observe(set(&[a])).is_empty());
        assert!(sweep.observe(set(&[a])).is_empty());
        // Exits, then re-enters: fires again.
        assert!(sweep.observe(set(&[])).is_empty());
        assert_eq!(sweep.observe(set(&[a])), vec![a]);
    }

    #[test]
    fn test_only_new_entries_fire_in_a_batch() {
        let mut sweep = SweepState::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);

        sweep.observe(set(&[a]));
        let entered = sweep.observe(set(&[a, b]));
        assert_eq!(entered, vec![b]);
    }

    #[test]
    fn test_sawtooth_wrap() {
        let mut sweep = SweepState::default();
        sweep.scan_x = SWEEP_MAX_X - 0.01;
        sweep.advance(1.75, 0.1);
        assert!((sweep.scan_x - SWEEP_MIN_X).abs() < 1e-6);

        // Normal advance does not wrap.
        sweep.advance(1.75, 0.1);
        assert!(sweep.scan_x > SWEEP_MIN_X);
    }
}
