//! Touch gesture disambiguation for the placed object.
//!
//! One finger pans (or, under the hit-test policy, pans when it lands on the
//! object and rotates otherwise). Two fingers scale and rotate, either both
//! at once or locked to one of them per episode. Extra fingers are ignored.
//! Every episode runs from the first touch-down until the touch count returns
//! to zero, and nothing carries over between episodes.

/// Gesture engine: attach/detach contract and manipulation rules.
pub mod engine;

/// Bevy touch adapter and desktop mouse emulation.
pub mod input;

/// Per-episode session state and two-finger geometry.
pub mod session;

/// Touch snapshots and the tracker folding `TouchInput` into them.
pub mod touch;

use bevy::prelude::*;

use crate::tools::placement::PlacementSet;
use input::feed_touch_input;
use touch::TouchTracker;

pub struct GesturePlugin;

impl Plugin for GesturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TouchTracker>()
            .add_systems(Update, feed_touch_input.in_set(PlacementSet::Input));

        #[cfg(not(target_arch = "wasm32"))]
        {
            use input::{MouseTouchEmulator, emulate_touch_from_mouse};
            app.init_resource::<MouseTouchEmulator>().add_systems(
                Update,
                emulate_touch_from_mouse.before(PlacementSet::Input),
            );
        }
    }
}
