pub mod config_loader;

pub use config_loader::{
    ConfigLoader, StageConfig, StageSettings, TrackingProfile, load_config_system, start_loading,
};
