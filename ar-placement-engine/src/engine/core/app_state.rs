use bevy::prelude::*;

use crate::engine::loading::config::PlacementConfig;
use crate::tools::placement::lifecycle::LifecyclePhase;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    LoadingConfig,
    /// Session built; waiting for the device collaborator to allow AR.
    AwaitingProceed,
    Running,
}

/// Mirror of the lifecycle phase so plugins can schedule on it.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum PlacementPhase {
    #[default]
    Loading,
    Scanning,
    Placed,
}

impl From<LifecyclePhase> for PlacementPhase {
    fn from(phase: LifecyclePhase) -> Self {
        match phase {
            LifecyclePhase::Loading => Self::Loading,
            LifecyclePhase::Scanning => Self::Scanning,
            LifecyclePhase::Placed => Self::Placed,
        }
    }
}

/// Verdict of the device/permission collaborator.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeviceReady {
    pub proceed: bool,
}

pub fn transition_to_running(
    config: Res<PlacementConfig>,
    mut device_events: EventReader<DeviceReady>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if config.auto_proceed {
        info!("→ Auto-proceed enabled, transitioning to Running state");
        next_state.set(AppState::Running);
        return;
    }

    for event in device_events.read() {
        if event.proceed {
            info!("→ Device ready, transitioning to Running state");
            next_state.set(AppState::Running);
            return;
        }
        // No corrective action: without AR the session simply stays idle.
        warn!("Device reported AR unavailable, placement stays idle");
    }
}
