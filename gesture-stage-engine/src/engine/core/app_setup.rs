// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

#[cfg(not(target_arch = "wasm32"))]
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};

// Crate engine modules
use crate::engine::camera::{StageCamera, spawn_stage_camera, update_stage_aspect};
use crate::engine::core::app_state::{AppState, SessionState};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::{ConfigLoader, StageConfig, StageSettings, load_config_system, start_loading};
use crate::engine::scene::{
    rotate_notes, spawn_backdrop, spawn_lighting, spawn_notes, spawn_track_pads,
};

// Pipeline modules, in their per-frame order
use crate::audio::AudioPlugin;
use crate::audio::bridge::forward_audio_events;
use crate::hold::HoldPlugin;
use crate::hold::activate::{detect_holds, handle_transition_complete};
use crate::interaction::resolver::resolve_interactions;
use crate::oracle::source::{CurrentDetection, PendingFrames, poll_oracle};
use crate::rpc::web_rpc::{
    WebRpcPlugin, handle_rpc_messages, process_incoming_messages, send_outgoing_messages,
};
use crate::sweep::scan_line::{advance_scan_line, spawn_scan_line, sweep_probe};
use crate::sweep::SweepPlugin;
use crate::tracking::TrackingPlugin;
use crate::tracking::hand_slots::update_hand_slots;
use crate::tracking::pinch::classify_pinch;
use crate::tracking::proxies::{sync_landmark_proxies, update_pinch_colors};

#[cfg(not(target_arch = "wasm32"))]
use crate::audio::bridge::simulate_crossfade;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::session_start_on_space;
#[cfg(not(target_arch = "wasm32"))]
use crate::oracle::sim::SimSource;
#[cfg(not(target_arch = "wasm32"))]
use crate::oracle::source::OracleSource;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers StageConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<StageConfig>::new(&["json"]))
        .add_plugins(TrackingPlugin)
        .add_plugins(SweepPlugin)
        .add_plugins(HoldPlugin)
        .add_plugins(AudioPlugin)
        .add_plugins(WebRpcPlugin);

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(FrameTimeDiagnosticsPlugin::default());

    // Initialise resources early
    app.init_resource::<StageCamera>()
        .init_resource::<StageSettings>()
        .init_resource::<ConfigLoader>()
        .init_resource::<PendingFrames>()
        .init_resource::<CurrentDetection>()
        .init_resource::<SessionState>();

    // Without a camera or bridge, natively a simulated hand drives the
    // pipeline; on the web, frames arrive over the message bridge.
    #[cfg(not(target_arch = "wasm32"))]
    app.insert_resource(OracleSource(Box::new(SimSource::new())));

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            load_config_system.run_if(in_state(AppState::Loading)),
        );

    // The per-frame pipeline. The chain is load-bearing: each stage reads
    // state the previous stage just wrote.
    app.add_systems(
        Update,
        (
            update_stage_aspect,
            rotate_notes,
            process_incoming_messages,
            handle_rpc_messages,
            poll_oracle,
            update_hand_slots,
            sync_landmark_proxies,
            classify_pinch,
            update_pinch_colors,
            resolve_interactions,
            advance_scan_line,
            sweep_probe,
            detect_holds,
            handle_transition_complete,
            forward_audio_events,
            send_outgoing_messages,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (
                session_start_on_space,
                simulate_crossfade,
                fps_text_update_system,
            )
                .run_if(in_state(AppState::Running)),
        );
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

/// Startup: the stage is fully populated before the first pipeline tick.
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_stage_camera(&mut commands);
    spawn_lighting(&mut commands);
    spawn_backdrop(&mut commands, &mut meshes, &mut materials);
    spawn_notes(&mut commands, &mut meshes, &mut materials);
    spawn_track_pads(&mut commands, &mut meshes, &mut materials);
    spawn_scan_line(&mut commands, &mut meshes, &mut materials);

    #[cfg(not(target_arch = "wasm32"))]
    spawn_fps_overlay(&mut commands);
}

#[derive(Component)]
pub struct FpsText;

#[cfg(not(target_arch = "wasm32"))]
fn spawn_fps_overlay(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

#[cfg(not(target_arch = "wasm32"))]
fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}
