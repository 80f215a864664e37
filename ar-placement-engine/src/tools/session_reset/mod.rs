//! Full tracking restart behind an opaque cover.
//!
//! ## Reset Flow
//!
//! ```text
//! ResetRequested / SecondaryViewEvent::Closed
//!   └─> detach gestures, dispose decorations, park target
//!       └─> cover fades in
//!           └─> pipeline.stop()  ... restart delay ...  pipeline.run(surface)
//!               └─> lifecycle rescans (settled hits required)
//!                   └─> first stable hit releases the cover
//! ```
//!
//! The pipeline is never paused for a reset: only a full stop discards its
//! accumulated scale estimate.

/// Reset step machine.
pub mod coordinator;

/// Lease-counted transition cover with a timed fade.
pub mod cover;

/// Tracking pipeline control trait.
pub mod pipeline;

use bevy::prelude::*;

use crate::tools::gesture::input::feed_touch_input;
use crate::tools::placement::PlacementSet;
use crate::tools::placement::session::PlacementSession;

/// The overlay asked for a fresh placement.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct ResetRequested;

/// A secondary view (e.g. a panorama viewer) opened or closed over the scene.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryViewEvent {
    Opened,
    Closed,
}

pub fn handle_reset_requests(
    mut requests: EventReader<ResetRequested>,
    mut session: ResMut<PlacementSession>,
) {
    for _ in requests.read() {
        if !session.request_reset() {
            debug!("Reset request ignored in phase {:?}", session.phase());
        }
    }
}

pub fn handle_secondary_view_events(
    mut views: EventReader<SecondaryViewEvent>,
    mut session: ResMut<PlacementSession>,
) {
    for event in views.read() {
        match event {
            SecondaryViewEvent::Opened => session.open_secondary_view(),
            SecondaryViewEvent::Closed => {
                if session.close_secondary_view() {
                    info!("Secondary view closed, resetting session");
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn handle_reset_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut resets: EventWriter<ResetRequested>,
    mut views: EventWriter<SecondaryViewEvent>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        resets.write(ResetRequested);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        views.write(SecondaryViewEvent::Closed);
    }
}

pub struct SessionResetPlugin;

impl Plugin for SessionResetPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ResetRequested>()
            .add_event::<SecondaryViewEvent>()
            .add_systems(
                Update,
                (handle_secondary_view_events, handle_reset_requests)
                    .chain()
                    .after(feed_touch_input)
                    .in_set(PlacementSet::Input),
            );

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(
            Update,
            handle_reset_keyboard_shortcuts.before(PlacementSet::Input),
        );
    }
}
