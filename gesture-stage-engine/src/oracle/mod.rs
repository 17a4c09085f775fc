//! External hand-landmark detector boundary: frame types, pull/push
//! sources, and per-tick timestamp deduplication.

pub mod landmark;
pub mod sim;
pub mod source;

pub use landmark::{HandDetection, Landmark, LandmarkFrame};
pub use source::{CurrentDetection, LandmarkSource, OracleSource, PendingFrames, poll_oracle};
