use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::session::CONFIG_PATH;

use super::config::PlacementConfig;
use crate::engine::core::app_state::AppState;
use crate::engine::scene::tracking::DesktopTrackingPipeline;
use crate::tools::placement::host::CompetingScaleSource;
use crate::tools::placement::session::PlacementSession;

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<PlacementConfig>>,
}

pub fn start_loading(mut loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading placement configuration from {}", CONFIG_PATH);
    loader.handle = Some(asset_server.load(CONFIG_PATH));
}

/// Resolve the configuration, falling back to defaults when it is missing or
/// invalid.
pub fn resolve_config(
    loader: &ConfigLoader,
    asset_server: &AssetServer,
    configs: &Assets<PlacementConfig>,
) -> Option<PlacementConfig> {
    let handle = loader.handle.as_ref()?;

    if let Some(config) = configs.get(handle) {
        return Some(match config.validate() {
            Ok(()) => config.clone(),
            Err(e) => {
                warn!("{e}, using default placement configuration");
                PlacementConfig::default()
            }
        });
    }

    match asset_server.get_load_state(handle) {
        Some(LoadState::Failed(e)) => {
            warn!("Failed to load {CONFIG_PATH} ({e}), using default placement configuration");
            Some(PlacementConfig::default())
        }
        _ => None,
    }
}

/// Build the placement session once the configuration is available.
pub fn build_session_when_ready(
    mut commands: Commands,
    loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<PlacementConfig>>,
    mut pipeline: Option<ResMut<DesktopTrackingPipeline>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(config) = resolve_config(&loader, &asset_server, &configs) else {
        return;
    };

    let scale_source = pipeline
        .as_deref_mut()
        .map(|p| p as &mut dyn CompetingScaleSource);

    match PlacementSession::new(config.clone(), scale_source) {
        Ok(session) => {
            info!("✓ Placement session ready");
            commands.insert_resource(session);
            commands.insert_resource(config);
            next_state.set(AppState::AwaitingProceed);
        }
        Err(e) => {
            error!("Cannot start placement session: {e}");
            exit.write(AppExit::error());
        }
    }
}
