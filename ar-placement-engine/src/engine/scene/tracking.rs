use bevy::prelude::*;
use bevy::window::WindowFocused;

use crate::engine::loading::config::PlacementConfig;
use crate::engine::scene::surface::SurfaceReference;
use crate::tools::placement::host::CompetingScaleSource;
use crate::tools::session_reset::pipeline::TrackingPipeline;

/// Desktop stand-in for the device's spatial tracking subsystem.
///
/// Surfaces are only reported while the pipeline is running and not paused.
/// Its built-in scale estimation is the competing scale writer the placement
/// session switches off.
#[derive(Resource, Debug)]
pub struct DesktopTrackingPipeline {
    running: bool,
    paused: bool,
    surface: Option<SurfaceReference>,
    starts: u32,
    scale_estimation: bool,
    scale_estimate: f32,
}

impl Default for DesktopTrackingPipeline {
    fn default() -> Self {
        Self {
            running: false,
            paused: false,
            surface: None,
            starts: 0,
            scale_estimation: true,
            scale_estimate: 1.0,
        }
    }
}

impl DesktopTrackingPipeline {
    pub fn is_tracking(&self) -> bool {
        self.running && !self.paused
    }

    pub fn surface(&self) -> Option<&SurfaceReference> {
        self.surface.as_ref()
    }

    /// Number of times `run` has (re)started the pipeline.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// The pipeline's own scale for anchored content, if it still writes one.
    pub fn scale_override(&self) -> Option<f32> {
        self.scale_estimation.then_some(self.scale_estimate)
    }
}

impl TrackingPipeline for DesktopTrackingPipeline {
    fn stop(&mut self) {
        debug!("Tracking pipeline stopped");
        self.running = false;
        self.paused = false;
        // A full stop throws away the drift-prone scale estimate.
        self.scale_estimate = 1.0;
    }

    fn run(&mut self, surface: &SurfaceReference) {
        debug!("Tracking pipeline running on '{}'", surface.id());
        self.running = true;
        self.paused = false;
        self.surface = Some(surface.clone());
        self.starts += 1;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    fn resume(&mut self) {
        self.paused = false;
    }
}

impl CompetingScaleSource for DesktopTrackingPipeline {
    fn disable(&mut self) {
        info!("Disabling tracking pipeline scale estimation");
        self.scale_estimation = false;
    }
}

/// Start tracking once the session exists.
pub fn start_tracking(
    mut pipeline: ResMut<DesktopTrackingPipeline>,
    config: Res<PlacementConfig>,
) {
    if !pipeline.is_running() {
        pipeline.run(&SurfaceReference::new(&config.surface_id));
    }
}

/// Losing window focus pauses tracking the way a backgrounded app would.
pub fn pause_tracking_on_focus_loss(
    mut focus_events: EventReader<WindowFocused>,
    mut pipeline: ResMut<DesktopTrackingPipeline>,
) {
    for event in focus_events.read() {
        if event.focused {
            pipeline.resume();
        } else {
            pipeline.pause();
        }
    }
}
