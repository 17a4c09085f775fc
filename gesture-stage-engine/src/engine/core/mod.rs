pub mod app_setup;
pub mod app_state;
pub mod window_config;

pub use app_state::{AppState, SessionState};
