use bevy::prelude::*;

/// Boot sequence: wait on the stage config, then run the pipeline.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// The audience-facing start gate. Before it opens, the pipeline tracks
/// hands and sweeps the scan line but suppresses sweep-trigger emission.
#[derive(Resource, Default)]
pub struct SessionState {
    pub started: bool,
}

/// On the web the page's start button opens the session over the bridge;
/// natively the space bar stands in for it.
#[cfg(not(target_arch = "wasm32"))]
pub fn session_start_on_space(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<SessionState>,
) {
    if keyboard.just_pressed(KeyCode::Space) && !session.started {
        info!("Session started from keyboard");
        session.started = true;
    }
}
