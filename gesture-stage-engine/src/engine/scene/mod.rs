pub mod stage_objects;

pub use stage_objects::{
    BoundsSize, NoteId, NoteObject, NoteOwner, TrackPad, TrackPadId, rotate_notes, spawn_backdrop,
    spawn_lighting, spawn_notes, spawn_track_pads,
};
