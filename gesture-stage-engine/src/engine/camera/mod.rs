pub mod stage_camera;

pub use stage_camera::{StageCamera, spawn_stage_camera, update_stage_aspect};
