use bevy::prelude::*;

use super::session::PlacementNotice;

/// Session notice re-broadcast into the ECS for UI, decorations and RPC.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementNoticeEvent(pub PlacementNotice);

/// A decoration hotspot on the placed object was tapped.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct HotspotTapped {
    pub id: String,
}
