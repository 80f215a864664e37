//! In-memory collaborators shared by unit tests.

use bevy::prelude::*;

use crate::engine::camera::viewer::ViewerPose;
use crate::engine::loading::config::PlacementConfig;
use crate::engine::scene::surface::{RaycastHit, SurfaceReference};
use crate::tools::placement::host::PlacementHost;
use crate::tools::session_reset::pipeline::TrackingPipeline;

pub struct FakeHost {
    pub geometry_ready: bool,
    pub hit: Option<Vec3>,
    pub surface: SurfaceReference,
    pub viewer: ViewerPose,
    pub casts: u32,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            geometry_ready: false,
            hit: None,
            surface: SurfaceReference::new(&PlacementConfig::default().surface_id),
            viewer: ViewerPose::new(Vec3::new(0.0, 1.6, 0.0), Quat::IDENTITY),
            casts: 0,
        }
    }
}

impl PlacementHost for FakeHost {
    fn is_geometry_ready(&self) -> bool {
        self.geometry_ready
    }

    fn viewer_pose(&self) -> ViewerPose {
        self.viewer
    }

    fn cast_ray(&mut self, viewer: &ViewerPose) -> Vec<RaycastHit> {
        self.casts += 1;
        self.hit
            .map(|point| RaycastHit {
                surface: self.surface.clone(),
                point,
                ray_origin: viewer.position,
                ray_direction: viewer.forward(),
            })
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineCall {
    Stop,
    Run(String),
    Pause,
    Resume,
}

#[derive(Default)]
pub struct FakePipeline {
    pub calls: Vec<PipelineCall>,
    pub running: bool,
}

impl TrackingPipeline for FakePipeline {
    fn stop(&mut self) {
        self.running = false;
        self.calls.push(PipelineCall::Stop);
    }

    fn run(&mut self, surface: &SurfaceReference) {
        self.running = true;
        self.calls.push(PipelineCall::Run(surface.id().to_string()));
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn pause(&mut self) {
        self.calls.push(PipelineCall::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(PipelineCall::Resume);
    }
}
