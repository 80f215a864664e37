use bevy::prelude::*;
use std::time::Duration;

use super::cover::{CoverLease, TransitionCover};
use super::pipeline::TrackingPipeline;
use crate::engine::scene::surface::SurfaceReference;
use crate::tools::placement::lifecycle::PlacementLifecycle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetStep {
    Idle,
    /// Target parked, waiting for the cover to reach full opacity.
    AwaitingCover,
    /// Pipeline stopped, waiting out the platform's camera release.
    RestartingPipeline(Timer),
    /// Lifecycle is rescanning; the cover drops on the first stable hit.
    AwaitingStableHit,
}

/// Drives one full tracking restart behind an opaque cover.
///
/// Frame driven: `tick` advances at most one step per call so the cover's
/// fade and the restart delay both observe real frame time.
#[derive(Debug)]
pub struct ResetCoordinator {
    step: ResetStep,
    lease: Option<CoverLease>,
    surface: SurfaceReference,
    restart_delay: Duration,
    restarts: u32,
}

impl ResetCoordinator {
    pub fn new(surface: SurfaceReference, restart_delay: Duration) -> Self {
        Self {
            step: ResetStep::Idle,
            lease: None,
            surface,
            restart_delay,
            restarts: 0,
        }
    }

    pub fn step(&self) -> &ResetStep {
        &self.step
    }

    pub fn is_active(&self) -> bool {
        self.step != ResetStep::Idle
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Start a reset. Ignored while another one is in flight or while the
    /// lifecycle has nothing to reset.
    pub fn begin(
        &mut self,
        lifecycle: &mut PlacementLifecycle,
        cover: &mut TransitionCover,
    ) -> bool {
        if self.is_active() {
            debug!("Reset already in progress ({:?}), ignoring", self.step);
            return false;
        }
        if !lifecycle.begin_reset() {
            debug!("Nothing to reset in phase {:?}", lifecycle.phase());
            return false;
        }

        info!("Session reset: target parked, raising cover");
        self.lease = Some(cover.acquire());
        self.step = ResetStep::AwaitingCover;
        true
    }

    pub fn tick(
        &mut self,
        dt: Duration,
        lifecycle: &mut PlacementLifecycle,
        cover: &TransitionCover,
        pipeline: &mut dyn TrackingPipeline,
    ) {
        match &mut self.step {
            ResetStep::Idle | ResetStep::AwaitingStableHit => {}
            ResetStep::AwaitingCover => {
                if cover.is_opaque() {
                    info!("Session reset: cover up, stopping tracking pipeline");
                    pipeline.stop();
                    self.step = ResetStep::RestartingPipeline(Timer::new(
                        self.restart_delay,
                        TimerMode::Once,
                    ));
                }
            }
            ResetStep::RestartingPipeline(timer) => {
                if timer.tick(dt).finished() {
                    info!(
                        "Session reset: restarting tracking pipeline on '{}'",
                        self.surface.id()
                    );
                    pipeline.run(&self.surface);
                    self.restarts += 1;
                    lifecycle.enter_rescan();
                    self.step = ResetStep::AwaitingStableHit;
                }
            }
        }
    }

    /// The rescan found a stable surface: reveal the scene.
    pub fn surface_stable(&mut self, cover: &mut TransitionCover) {
        if self.step != ResetStep::AwaitingStableHit {
            return;
        }
        info!("Session reset complete after surface re-detection");
        self.release(cover);
        self.step = ResetStep::Idle;
    }

    fn release(&mut self, cover: &mut TransitionCover) {
        if let Some(lease) = self.lease.take() {
            cover.release(lease);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::config::PlacementConfig;
    use crate::tools::placement::lifecycle::{LifecycleEvent, LifecyclePhase};
    use crate::tools::testing::{FakeHost, FakePipeline, PipelineCall};

    const FRAME: Duration = Duration::from_millis(16);

    struct Rig {
        lifecycle: PlacementLifecycle,
        host: FakeHost,
        cover: TransitionCover,
        pipeline: FakePipeline,
        coordinator: ResetCoordinator,
    }

    impl Rig {
        fn placed() -> Self {
            let config = PlacementConfig::default();
            let surface = SurfaceReference::new(&config.surface_id);
            let mut rig = Self {
                cover: TransitionCover::new(config.reset.cover_fade_secs),
                coordinator: ResetCoordinator::new(
                    surface,
                    Duration::from_secs_f32(config.reset.pipeline_restart_delay_secs),
                ),
                lifecycle: PlacementLifecycle::new(config),
                host: FakeHost::new(),
                pipeline: FakePipeline {
                    running: true,
                    ..default()
                },
            };
            rig.host.geometry_ready = true;
            rig.host.hit = Some(Vec3::new(0.0, 0.0, -2.0));
            rig.lifecycle.tick(&mut rig.host);
            rig.lifecycle.tick(&mut rig.host);
            assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Placed);
            rig.lifecycle.drain_events();
            rig
        }

        fn frame(&mut self) {
            self.cover.tick(FRAME.as_secs_f32());
            self.coordinator.tick(
                FRAME,
                &mut self.lifecycle,
                &self.cover,
                &mut self.pipeline,
            );
            self.lifecycle.tick(&mut self.host);
            for event in self.lifecycle.drain_events() {
                if event == LifecycleEvent::SurfaceStable {
                    self.coordinator.surface_stable(&mut self.cover);
                }
            }
        }
    }

    #[test]
    fn pipeline_stops_only_once_cover_is_opaque() {
        let mut rig = Rig::placed();
        assert!(rig.coordinator.begin(&mut rig.lifecycle, &mut rig.cover));
        rig.host.hit = None;

        while !rig.cover.is_opaque() {
            assert!(rig.pipeline.calls.is_empty());
            rig.frame();
        }
        rig.frame();
        assert_eq!(rig.pipeline.calls, vec![PipelineCall::Stop]);
        assert!(matches!(
            rig.coordinator.step(),
            ResetStep::RestartingPipeline(_)
        ));
    }

    #[test]
    fn full_restart_then_rescan_then_reveal() {
        let mut rig = Rig::placed();
        rig.coordinator.begin(&mut rig.lifecycle, &mut rig.cover);
        rig.host.hit = None;

        for _ in 0..120 {
            rig.frame();
        }
        assert_eq!(
            rig.pipeline.calls,
            vec![PipelineCall::Stop, PipelineCall::Run("ground".into())]
        );
        assert_eq!(rig.coordinator.step(), &ResetStep::AwaitingStableHit);
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Scanning);
        assert!(rig.lifecycle.is_rescan());
        // No hits yet: the cover stays up regardless of elapsed time.
        assert!(rig.cover.is_opaque());

        rig.host.hit = Some(Vec3::new(0.0, 0.0, -2.0));
        for _ in 0..rig.lifecycle.config().rescan_settle_frames {
            rig.frame();
        }
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Placed);
        assert!(!rig.coordinator.is_active());
        assert!(!rig.cover.is_requested());
        assert_eq!(rig.coordinator.restarts(), 1);
    }

    #[test]
    fn overlapping_requests_are_ignored() {
        let mut rig = Rig::placed();
        assert!(rig.coordinator.begin(&mut rig.lifecycle, &mut rig.cover));
        assert!(!rig.coordinator.begin(&mut rig.lifecycle, &mut rig.cover));

        rig.host.hit = None;
        for _ in 0..120 {
            rig.frame();
        }
        assert_eq!(rig.coordinator.restarts(), 1);
        assert_eq!(rig.pipeline.calls.len(), 2);
    }

    #[test]
    fn nothing_to_reset_while_loading() {
        let config = PlacementConfig::default();
        let mut lifecycle = PlacementLifecycle::new(config.clone());
        let mut cover = TransitionCover::new(config.reset.cover_fade_secs);
        let mut coordinator =
            ResetCoordinator::new(SurfaceReference::new("ground"), Duration::ZERO);

        assert!(!coordinator.begin(&mut lifecycle, &mut cover));
        assert!(!cover.is_requested());
    }

    #[test]
    fn reset_never_pauses_the_pipeline() {
        let mut rig = Rig::placed();
        rig.coordinator.begin(&mut rig.lifecycle, &mut rig.cover);
        for _ in 0..200 {
            rig.frame();
        }
        assert!(
            !rig.pipeline
                .calls
                .iter()
                .any(|c| matches!(c, PipelineCall::Pause | PipelineCall::Resume))
        );
    }
}
