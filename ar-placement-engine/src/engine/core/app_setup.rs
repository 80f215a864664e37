use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
// Crate engine modules
use crate::engine::camera::device_rig::{DeviceRig, device_rig_controller, spawn_ar_camera};
use crate::engine::core::app_state::{AppState, DeviceReady, PlacementPhase, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config::PlacementConfig;
use crate::engine::loading::config_loader::{ConfigLoader, build_session_when_ready, start_loading};
use crate::engine::scene::tracking::DesktopTrackingPipeline;
// Crate tools modules
use crate::tools::{
    gesture::GesturePlugin, placement::PlacementPlugin, session_reset::SessionResetPlugin,
};
// Create Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .init_state::<PlacementPhase>()
        // Registers PlacementConfig as a loadable asset type from *.placement.json files.
        .add_plugins(JsonAssetPlugin::<PlacementConfig>::new(&["placement.json"]))
        .add_plugins(PlacementPlugin)
        .add_plugins(GesturePlugin)
        .add_plugins(SessionResetPlugin)
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<ConfigLoader>()
        .init_resource::<DeviceRig>()
        .init_resource::<DesktopTrackingPipeline>()
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)))
        .add_event::<DeviceReady>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, spawn_ar_camera, start_loading))
        .add_systems(
            Update,
            build_session_when_ready.run_if(in_state(AppState::LoadingConfig)),
        )
        .add_systems(
            Update,
            transition_to_running.run_if(in_state(AppState::AwaitingProceed)),
        )
        .add_systems(Update, device_rig_controller);

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands.spawn((
        Text::new("Drag: pan   Alt+drag: pinch/rotate   Right drag: look   WASD: walk   R: reset"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
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
