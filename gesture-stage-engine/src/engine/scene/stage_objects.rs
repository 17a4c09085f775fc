//! Stage population: the fixed note field, the track pads, lighting and
//! backdrop. Created once at startup; notes are never destroyed at
//! runtime, only moved and rescaled.

use bevy::prelude::*;

use constants::hold::TRACK_PAD_COUNT;
use constants::stage::{
    NOTE_LAYOUT, NOTE_PALETTE, TRACK_PAD_COLOR, TRACK_PAD_SIZE, TRACK_PAD_SPACING, TRACK_PAD_Y,
};

/// A pitch-bearing interactive object in the note field.
#[derive(Component)]
pub struct NoteObject {
    pub rotation_speed: Vec3,
}

/// Stable identity a note keeps for its whole lifetime; what the audio
/// layer sees in grab-move notifications.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteId(pub u32);

/// Which hand slot currently owns (drags) this note, if any. A weak
/// back-reference: the slot index never keeps the note alive, and a lost
/// hand clears it without touching the note's position.
#[derive(Component, Default)]
pub struct NoteOwner(pub Option<usize>);

/// Axis-aligned local bounds used for ray intersection.
#[derive(Component, Clone, Copy)]
pub struct BoundsSize(pub Vec3);

/// Hold-to-activate target identity: one of the fixed track pads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrackPadId(pub usize);

#[derive(Component)]
pub struct TrackPad {
    pub id: TrackPadId,
}

fn note_mesh(index: usize, meshes: &mut Assets<Mesh>) -> (Handle<Mesh>, Vec3) {
    match index % 4 {
        0 => (meshes.add(Sphere::new(0.4)), Vec3::splat(0.8)),
        1 => (
            meshes.add(Cylinder::new(0.25, 1.0)),
            Vec3::new(0.5, 1.0, 0.5),
        ),
        2 => (
            meshes.add(Cuboid::new(0.5, 0.5, 0.5)),
            Vec3::new(0.5, 0.5, 0.5),
        ),
        _ => (
            meshes.add(Cone {
                radius: 0.3,
                height: 0.6,
            }),
            Vec3::new(0.6, 0.6, 0.6),
        ),
    }
}

pub fn spawn_notes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    for (index, (x, y)) in NOTE_LAYOUT.iter().enumerate() {
        let (mesh, size) = note_mesh(index, meshes);
        let color = NOTE_PALETTE[index % NOTE_PALETTE.len()];

        // Vary spin per note so the field doesn't rotate in lockstep.
        let spin = 0.1 + 0.04 * (index % 5) as f32;
        let rotation_speed = Vec3::new(spin, spin * 1.7, spin * 0.6);

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.2,
                ..default()
            })),
            Transform::from_xyz(*x, *y, 0.0),
            NoteObject { rotation_speed },
            NoteId(index as u32),
            NoteOwner::default(),
            BoundsSize(size),
            Name::new(format!("note_{index}")),
        ));
    }
}

pub fn spawn_track_pads(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let mesh = meshes.add(Cuboid::new(
        TRACK_PAD_SIZE.x,
        TRACK_PAD_SIZE.y,
        TRACK_PAD_SIZE.z,
    ));
    let material = materials.add(StandardMaterial {
        base_color: TRACK_PAD_COLOR,
        unlit: true,
        ..default()
    });

    let span = TRACK_PAD_SPACING * (TRACK_PAD_COUNT - 1) as f32;
    for index in 0..TRACK_PAD_COUNT {
        let x = -span * 0.5 + index as f32 * TRACK_PAD_SPACING;
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(x, TRACK_PAD_Y, 0.0),
            TrackPad {
                id: TrackPadId(index),
            },
            BoundsSize(TRACK_PAD_SIZE),
            Name::new(format!("track_pad_{index}")),
        ));
    }
}

pub fn spawn_backdrop(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(20.0, 20.0, 0.1))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.82, 0.83, 0.84),
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, -1.0),
        Name::new("backdrop"),
    ));
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
    commands.spawn((
        PointLight {
            intensity: 30_000.0,
            ..default()
        },
        Transform::from_xyz(2.0, 3.0, 4.0),
    ));
}

/// Idle spin on every note, grabbed or not.
pub fn rotate_notes(time: Res<Time>, mut notes: Query<(&mut Transform, &NoteObject)>) {
    let dt = time.delta_secs();
    for (mut transform, note) in &mut notes {
        transform.rotate_x(note.rotation_speed.x * dt);
        transform.rotate_y(note.rotation_speed.y * dt);
        transform.rotate_z(note.rotation_speed.z * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::stage::{NOTE_MAX_Y, NOTE_MIN_Y};

    #[test]
    fn test_note_layout_spans_expected_columns() {
        assert_eq!(NOTE_LAYOUT.len(), 11);
        for (i, (x, _)) in NOTE_LAYOUT.iter().enumerate() {
            assert!((x - (i as f32 - 5.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_note_layout_heights_stay_in_pitch_range() {
        for (_, y) in NOTE_LAYOUT {
            assert!(*y >= NOTE_MIN_Y && *y <= NOTE_MAX_Y);
        }
    }
}
