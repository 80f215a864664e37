use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::host::PlacementHost;
use super::pose::placement_pose;
use super::target::{PlacementTarget, VisualVariant};
use crate::engine::loading::config::PlacementConfig;
use crate::engine::scene::surface::SurfaceReference;
use crate::tools::gesture::engine::{GestureContext, GestureEngine};
use crate::tools::gesture::touch::TouchEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    Loading,
    Scanning,
    Placed,
}

impl LifecyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Scanning => "scanning",
            Self::Placed => "placed",
        }
    }
}

/// Observable lifecycle changes, drained by the session each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    PhaseChanged {
        from: LifecyclePhase,
        to: LifecyclePhase,
        rescan: bool,
    },
    /// Scanning accepted a surface hit as stable enough to place on.
    SurfaceStable,
}

/// Owns the placement target from first load until the gesture engine takes
/// over, and again from every reset until the next placement.
///
/// Loading and Scanning wait indefinitely: an asset that never streams or a
/// floor that is never seen leaves the machine parked rather than failing.
#[derive(Debug)]
pub struct PlacementLifecycle {
    config: PlacementConfig,
    surface: SurfaceReference,
    phase: LifecyclePhase,
    rescan: bool,
    settle_hits: u32,
    awaiting_restart: bool,
    secondary_view: bool,
    target: PlacementTarget,
    gesture: Option<GestureEngine>,
    attaches: u32,
    detaches: u32,
    events: Vec<LifecycleEvent>,
}

impl PlacementLifecycle {
    pub fn new(config: PlacementConfig) -> Self {
        let surface = SurfaceReference::new(&config.surface_id);
        let target = PlacementTarget::parked(config.park_scale);
        Self {
            config,
            surface,
            phase: LifecyclePhase::Loading,
            rescan: false,
            settle_hits: 0,
            awaiting_restart: false,
            secondary_view: false,
            target,
            gesture: None,
            attaches: 0,
            detaches: 0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_rescan(&self) -> bool {
        self.rescan
    }

    pub fn settle_hits(&self) -> u32 {
        self.settle_hits
    }

    pub fn target(&self) -> &PlacementTarget {
        &self.target
    }

    pub fn surface(&self) -> &SurfaceReference {
        &self.surface
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn gesture(&self) -> Option<&GestureEngine> {
        self.gesture.as_ref()
    }

    /// Gesture engines attached and not yet detached.
    pub fn live_gesture_engines(&self) -> u32 {
        self.attaches - self.detaches
    }

    pub fn gesture_attach_count(&self) -> u32 {
        self.attaches
    }

    /// A reset has parked the target and is waiting for the pipeline restart.
    pub fn is_awaiting_restart(&self) -> bool {
        self.awaiting_restart
    }

    pub fn is_secondary_view_open(&self) -> bool {
        self.secondary_view
    }

    /// Whether a reset request would be honoured right now.
    pub fn can_reset(&self) -> bool {
        self.phase != LifecyclePhase::Loading && !self.awaiting_restart
    }

    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one rendered frame.
    pub fn tick<H: PlacementHost + ?Sized>(&mut self, host: &mut H) {
        if self.awaiting_restart {
            return;
        }

        match self.phase {
            LifecyclePhase::Loading => {
                if host.is_geometry_ready() {
                    info!("Placement target geometry streamed");
                    self.enter(LifecyclePhase::Scanning);
                }
            }
            LifecyclePhase::Scanning => self.scan(host),
            LifecyclePhase::Placed => {}
        }
    }

    fn scan<H: PlacementHost + ?Sized>(&mut self, host: &mut H) {
        let viewer = host.viewer_pose();
        let hit = host
            .cast_ray(&viewer)
            .into_iter()
            .find(|hit| self.surface.matches(hit));

        let Some(hit) = hit else {
            // Settling needs consecutive hits.
            self.settle_hits = 0;
            if self.target.variant == VisualVariant::Preview {
                self.target.park(self.config.park_scale);
                self.target.variant = VisualVariant::default();
            }
            return;
        };

        self.settle_hits += 1;
        let pose = placement_pose(
            hit.point,
            viewer.position,
            self.config.forward_offset,
            self.config.vertical_offset,
        );

        let required = if self.rescan {
            self.config.rescan_settle_frames
        } else {
            1
        };
        if self.settle_hits < required {
            if self.config.rescan_preview {
                self.target.position = pose;
                self.target.scale = self.config.initial_scale;
                self.target.variant = VisualVariant::Preview;
            }
            return;
        }

        debug!(
            "Surface stable after {} hit(s), placing at {:?}",
            self.settle_hits, pose
        );
        self.events.push(LifecycleEvent::SurfaceStable);
        self.target.position = pose;
        self.target.scale = self.config.initial_scale;
        self.enter(LifecyclePhase::Placed);
    }

    fn enter(&mut self, next: LifecyclePhase) {
        let from = self.phase;
        self.phase = next;
        info!(
            "Placement phase {} -> {} (rescan: {})",
            from.as_str(),
            next.as_str(),
            self.rescan
        );

        match next {
            LifecyclePhase::Loading => self.target.park(self.config.park_scale),
            LifecyclePhase::Scanning => {
                self.target.variant = VisualVariant::default();
                self.target.park(self.config.park_scale);
                self.settle_hits = 0;
            }
            LifecyclePhase::Placed => {
                self.target.variant = VisualVariant::Final;
                if self.secondary_view {
                    // Closing the view resets, which attaches on the next placement.
                    debug!("Secondary view open, gestures stay detached");
                } else {
                    self.attach_gesture();
                }
            }
        }

        self.events.push(LifecycleEvent::PhaseChanged {
            from,
            to: next,
            rescan: self.rescan,
        });
    }

    /// Route a touch event to the gesture engine, if one is attached.
    pub fn handle_touch(&mut self, event: &TouchEvent, ctx: &GestureContext) -> bool {
        if self.phase != LifecyclePhase::Placed {
            return false;
        }
        match self.gesture.as_mut() {
            Some(engine) => engine.handle(event, &mut self.target, ctx),
            None => false,
        }
    }

    /// First half of a reset: detach gestures and park the target.
    ///
    /// The lifecycle stays frozen until `enter_rescan` is called once the
    /// tracking pipeline has restarted. Returns false if nothing was done.
    pub fn begin_reset(&mut self) -> bool {
        if !self.can_reset() {
            return false;
        }
        self.detach_gesture();
        self.target.park(self.config.park_scale);
        self.target.variant = VisualVariant::default();
        self.awaiting_restart = true;
        true
    }

    /// Second half of a reset: scan again, requiring settled hits.
    pub fn enter_rescan(&mut self) {
        self.awaiting_restart = false;
        self.rescan = true;
        self.enter(LifecyclePhase::Scanning);
    }

    /// A secondary view (e.g. a panorama) took over the screen.
    pub fn open_secondary_view(&mut self) {
        if self.secondary_view {
            return;
        }
        info!("Secondary view opened, suppressing gestures");
        self.secondary_view = true;
        self.detach_gesture();
    }

    /// Returns whether a secondary view was open.
    pub fn close_secondary_view(&mut self) -> bool {
        std::mem::replace(&mut self.secondary_view, false)
    }

    fn attach_gesture(&mut self) {
        self.detach_gesture();
        let mut engine = GestureEngine::new(self.config.gesture.clone());
        if engine.attach() {
            self.attaches += 1;
        }
        self.gesture = Some(engine);
    }

    fn detach_gesture(&mut self) {
        if let Some(mut engine) = self.gesture.take() {
            if engine.detach() {
                self.detaches += 1;
            }
        }
    }
}
