//! Hover/pick/drag ownership resolution between hand rays and the note
//! field.

pub mod ray;
pub mod resolver;

pub use ray::{RayHit, ray_hits_bounds, ray_plane_z};
pub use resolver::resolve_interactions;
