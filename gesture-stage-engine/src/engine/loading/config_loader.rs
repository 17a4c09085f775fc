//! Stage configuration loaded from JSON at startup.
//!
//! Every field has a desktop default so the engine (and its tests) run
//! without the file; a missing or unparseable config degrades to those
//! defaults with a warning instead of failing the boot.

use bevy::asset::LoadState;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use constants::hold::HOLD_ACTIVATE_SECS;
use constants::sweep::SWEEP_RATE;
use constants::tracking::{
    CONSTRAINED_HAND_SLOTS, LANDMARK_SMOOTHING, MAX_HAND_SLOTS, PINCH_THRESHOLD,
    PINCH_THRESHOLD_MOBILE,
};

use crate::engine::core::AppState;
use crate::tracking::HandSlots;

/// Tracker profile: mobile trackers get a single hand slot and a wider
/// pinch threshold to absorb their coarser landmark precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingProfile {
    #[default]
    Desktop,
    Mobile,
}

impl TrackingProfile {
    pub fn pinch_threshold(self) -> f32 {
        match self {
            Self::Desktop => PINCH_THRESHOLD,
            Self::Mobile => PINCH_THRESHOLD_MOBILE,
        }
    }

    pub fn hand_capacity(self) -> usize {
        match self {
            Self::Desktop => MAX_HAND_SLOTS,
            Self::Mobile => CONSTRAINED_HAND_SLOTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Asset, TypePath)]
pub struct StageConfig {
    #[serde(default)]
    pub profile: TrackingProfile,
    /// Explicit overrides win over the profile defaults.
    #[serde(default)]
    pub pinch_threshold: Option<f32>,
    #[serde(default)]
    pub hand_capacity: Option<usize>,
    #[serde(default = "default_landmark_smoothing")]
    pub landmark_smoothing: f32,
    #[serde(default = "default_sweep_rate")]
    pub sweep_rate: f32,
    #[serde(default = "default_hold_secs")]
    pub hold_secs: f64,
}

fn default_landmark_smoothing() -> f32 {
    LANDMARK_SMOOTHING
}

fn default_sweep_rate() -> f32 {
    SWEEP_RATE
}

fn default_hold_secs() -> f64 {
    HOLD_ACTIVATE_SECS
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            profile: TrackingProfile::Desktop,
            pinch_threshold: None,
            hand_capacity: None,
            landmark_smoothing: LANDMARK_SMOOTHING,
            sweep_rate: SWEEP_RATE,
            hold_secs: HOLD_ACTIVATE_SECS,
        }
    }
}

/// Runtime settings every pipeline stage reads.
#[derive(Resource, Debug, Clone)]
pub struct StageSettings {
    pub hand_capacity: usize,
    pub pinch_threshold: f32,
    pub landmark_smoothing: f32,
    pub sweep_rate: f32,
    pub hold_secs: f64,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self::from_config(&StageConfig::default())
    }
}

impl StageSettings {
    pub fn from_config(config: &StageConfig) -> Self {
        Self {
            hand_capacity: config
                .hand_capacity
                .unwrap_or_else(|| config.profile.hand_capacity()),
            pinch_threshold: config
                .pinch_threshold
                .unwrap_or_else(|| config.profile.pinch_threshold()),
            landmark_smoothing: config.landmark_smoothing,
            sweep_rate: config.sweep_rate,
            hold_secs: config.hold_secs,
        }
    }
}

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<StageConfig>>,
}

pub fn start_loading(mut loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load("config/stage.json"));
}

/// Poll the config handle during `AppState::Loading`; apply it (or fall
/// back to defaults on failure) and move to `Running`.
pub fn load_config_system(
    loader: Res<ConfigLoader>,
    configs: Res<Assets<StageConfig>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    if let Some(config) = configs.get(handle) {
        let settings = StageSettings::from_config(config);
        info!(
            "Stage config loaded: {:?} profile, {} hand slot(s)",
            config.profile, settings.hand_capacity
        );
        commands.insert_resource(HandSlots::with_capacity(settings.hand_capacity));
        commands.insert_resource(settings);
        next_state.set(AppState::Running);
        return;
    }

    if let Some(LoadState::Failed(_)) = asset_server.get_load_state(handle) {
        warn!("Stage config missing or unreadable, using desktop defaults");
        let settings = StageSettings::default();
        commands.insert_resource(HandSlots::with_capacity(settings.hand_capacity));
        commands.insert_resource(settings);
        next_state.set(AppState::Running);
    }
}
