use bevy::prelude::*;
use std::time::Duration;

use super::error::PlacementError;
use super::host::{CompetingScaleSource, PlacementHost};
use super::lifecycle::{LifecycleEvent, LifecyclePhase, PlacementLifecycle};
use super::target::PlacementTarget;
use crate::engine::loading::config::PlacementConfig;
use crate::tools::gesture::engine::GestureContext;
use crate::tools::gesture::touch::TouchEvent;
use crate::tools::session_reset::coordinator::ResetCoordinator;
use crate::tools::session_reset::cover::{CoverTransition, TransitionCover};
use crate::tools::session_reset::pipeline::TrackingPipeline;

/// Outward-facing changes for overlay UI and scene decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementNotice {
    PhaseChanged { phase: LifecyclePhase, rescan: bool },
    SurfaceStable,
    /// Decorations bound to the previous placement must go.
    DisposeDecorations,
    CoverChanged { visible: bool },
}

/// Lifecycle, reset coordinator and transition cover for one AR session.
#[derive(Resource, Debug)]
pub struct PlacementSession {
    lifecycle: PlacementLifecycle,
    coordinator: ResetCoordinator,
    cover: TransitionCover,
    notices: Vec<PlacementNotice>,
}

impl PlacementSession {
    /// Validate `config` and switch off the platform's own scale writer.
    ///
    /// The scale source must be supplied: placement cannot own the target's
    /// scale while something else keeps writing it.
    pub fn new(
        config: PlacementConfig,
        scale_source: Option<&mut dyn CompetingScaleSource>,
    ) -> Result<Self, PlacementError> {
        config.validate()?;
        let source = scale_source.ok_or(PlacementError::MissingCapability(
            "disable competing scale source",
        ))?;
        source.disable();

        let lifecycle = PlacementLifecycle::new(config);
        let coordinator = ResetCoordinator::new(
            lifecycle.surface().clone(),
            Duration::from_secs_f32(lifecycle.config().reset.pipeline_restart_delay_secs),
        );
        let cover = TransitionCover::new(lifecycle.config().reset.cover_fade_secs);

        Ok(Self {
            lifecycle,
            coordinator,
            cover,
            notices: Vec::new(),
        })
    }

    pub fn lifecycle(&self) -> &PlacementLifecycle {
        &self.lifecycle
    }

    pub fn coordinator(&self) -> &ResetCoordinator {
        &self.coordinator
    }

    pub fn cover(&self) -> &TransitionCover {
        &self.cover
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    pub fn target(&self) -> &PlacementTarget {
        self.lifecycle.target()
    }

    pub fn drain_notices(&mut self) -> Vec<PlacementNotice> {
        std::mem::take(&mut self.notices)
    }

    /// One rendered frame: cover fade, reset progress, then the lifecycle.
    pub fn frame<H: PlacementHost + ?Sized>(
        &mut self,
        dt: Duration,
        host: &mut H,
        pipeline: &mut dyn TrackingPipeline,
    ) {
        match self.cover.tick(dt.as_secs_f32()) {
            Some(CoverTransition::Opaque) => {
                self.notices.push(PlacementNotice::CoverChanged { visible: true })
            }
            Some(CoverTransition::Hidden) => {
                self.notices.push(PlacementNotice::CoverChanged { visible: false })
            }
            None => {}
        }

        self.coordinator
            .tick(dt, &mut self.lifecycle, &self.cover, pipeline);
        self.lifecycle.tick(host);

        for event in self.lifecycle.drain_events() {
            match event {
                LifecycleEvent::PhaseChanged { to, rescan, .. } => {
                    self.notices
                        .push(PlacementNotice::PhaseChanged { phase: to, rescan });
                }
                LifecycleEvent::SurfaceStable => {
                    self.coordinator.surface_stable(&mut self.cover);
                    self.notices.push(PlacementNotice::SurfaceStable);
                }
            }
        }
    }

    pub fn handle_touch(&mut self, event: &TouchEvent, ctx: &GestureContext) -> bool {
        self.lifecycle.handle_touch(event, ctx)
    }

    /// Entry point for the overlay's reset button.
    pub fn request_reset(&mut self) -> bool {
        let started = self.coordinator.begin(&mut self.lifecycle, &mut self.cover);
        if started {
            self.notices.push(PlacementNotice::DisposeDecorations);
        }
        started
    }

    pub fn open_secondary_view(&mut self) {
        self.lifecycle.open_secondary_view();
    }

    /// Returning from a secondary view always goes through a full reset.
    pub fn close_secondary_view(&mut self) -> bool {
        if !self.lifecycle.close_secondary_view() {
            return false;
        }
        self.request_reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::viewer::ViewerPose;
    use crate::tools::gesture::engine::NoHitTest;
    use crate::tools::gesture::touch::TouchPoint;
    use crate::tools::testing::{FakeHost, FakePipeline, PipelineCall};

    const FRAME: Duration = Duration::from_millis(16);

    fn session() -> PlacementSession {
        let mut disable = || {};
        PlacementSession::new(PlacementConfig::default(), Some(&mut disable))
            .expect("default config is valid")
    }

    fn place(session: &mut PlacementSession, host: &mut FakeHost, pipeline: &mut FakePipeline) {
        host.geometry_ready = true;
        host.hit = Some(Vec3::new(0.0, 0.0, -2.0));
        session.frame(FRAME, host, pipeline);
        session.frame(FRAME, host, pipeline);
        assert_eq!(session.phase(), LifecyclePhase::Placed);
    }

    /// Runs frames without hits until the lifecycle is rescanning.
    fn restart(session: &mut PlacementSession, host: &mut FakeHost, pipeline: &mut FakePipeline) {
        host.hit = None;
        for _ in 0..600 {
            session.frame(FRAME, host, pipeline);
            if session.phase() == LifecyclePhase::Scanning {
                return;
            }
        }
        panic!("reset never reached rescan");
    }

    #[test]
    fn scale_source_is_disabled_once_at_construction() {
        let mut calls = 0;
        let mut disable = || calls += 1;
        let session = PlacementSession::new(PlacementConfig::default(), Some(&mut disable));

        assert!(session.is_ok());
        assert_eq!(calls, 1);
    }

    #[test]
    fn missing_scale_source_fails_fast() {
        let result = PlacementSession::new(PlacementConfig::default(), None);

        assert!(matches!(
            result,
            Err(PlacementError::MissingCapability(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut disable = || {};
        let config = PlacementConfig {
            rescan_settle_frames: 0,
            ..PlacementConfig::default()
        };

        assert!(matches!(
            PlacementSession::new(config, Some(&mut disable)),
            Err(PlacementError::InvalidConfig(_))
        ));
    }

    #[test]
    fn full_reset_cycle_needs_forty_five_settled_hits() {
        let mut session = session();
        let mut host = FakeHost::new();
        let mut pipeline = FakePipeline::default();
        place(&mut session, &mut host, &mut pipeline);
        session.drain_notices();

        assert!(session.request_reset());
        assert_eq!(session.drain_notices(), vec![PlacementNotice::DisposeDecorations]);
        assert_eq!(session.lifecycle().live_gesture_engines(), 0);

        restart(&mut session, &mut host, &mut pipeline);
        assert!(session.lifecycle().is_rescan());
        assert!(session.cover().is_opaque());
        assert_eq!(
            pipeline.calls,
            vec![PipelineCall::Stop, PipelineCall::Run("ground".into())]
        );

        host.hit = Some(Vec3::new(0.5, 0.0, -3.0));
        for _ in 0..44 {
            session.frame(FRAME, &mut host, &mut pipeline);
        }
        assert_eq!(session.phase(), LifecyclePhase::Scanning);
        assert!(session.cover().is_requested());

        session.frame(FRAME, &mut host, &mut pipeline);
        assert_eq!(session.phase(), LifecyclePhase::Placed);
        assert_eq!(session.lifecycle().live_gesture_engines(), 1);
        assert!(!session.cover().is_requested());

        let notices = session.drain_notices();
        assert!(notices.contains(&PlacementNotice::CoverChanged { visible: true }));
        assert!(notices.contains(&PlacementNotice::SurfaceStable));
        assert!(notices.contains(&PlacementNotice::PhaseChanged {
            phase: LifecyclePhase::Placed,
            rescan: true
        }));

        for _ in 0..60 {
            session.frame(FRAME, &mut host, &mut pipeline);
        }
        assert_eq!(
            session.drain_notices(),
            vec![PlacementNotice::CoverChanged { visible: false }]
        );
    }

    #[test]
    fn every_reset_cycle_ends_with_exactly_one_engine() {
        let mut session = session();
        let mut host = FakeHost::new();
        let mut pipeline = FakePipeline::default();
        place(&mut session, &mut host, &mut pipeline);

        for _ in 0..3 {
            session.request_reset();
            restart(&mut session, &mut host, &mut pipeline);
            host.hit = Some(Vec3::new(0.0, 0.0, -2.0));
            while session.phase() != LifecyclePhase::Placed {
                session.frame(FRAME, &mut host, &mut pipeline);
            }
            assert_eq!(session.lifecycle().live_gesture_engines(), 1);
        }
        assert_eq!(session.coordinator().restarts(), 3);
    }

    #[test]
    fn closing_secondary_view_resets_the_session() {
        let mut session = session();
        let mut host = FakeHost::new();
        let mut pipeline = FakePipeline::default();
        place(&mut session, &mut host, &mut pipeline);
        let ctx = GestureContext {
            viewer: ViewerPose::default(),
            hit_tester: &NoHitTest,
        };

        session.open_secondary_view();
        session.handle_touch(&TouchEvent::start(&[TouchPoint::new(1, 0.0, 0.0)]), &ctx);
        assert!(!session.handle_touch(&TouchEvent::moved(&[TouchPoint::new(1, 50.0, 0.0)]), &ctx));

        assert!(session.close_secondary_view());
        assert!(session.coordinator().is_active());
        assert!(!session.close_secondary_view());
    }

    #[test]
    fn view_opened_mid_reset_still_resets_when_closed() {
        let mut session = session();
        let mut host = FakeHost::new();
        let mut pipeline = FakePipeline::default();
        place(&mut session, &mut host, &mut pipeline);

        session.request_reset();
        session.open_secondary_view();
        restart(&mut session, &mut host, &mut pipeline);
        host.hit = Some(Vec3::new(0.0, 0.0, -2.0));
        while session.phase() != LifecyclePhase::Placed {
            session.frame(FRAME, &mut host, &mut pipeline);
        }
        assert_eq!(session.lifecycle().live_gesture_engines(), 0);
        assert!(!session.coordinator().is_active());

        assert!(session.close_secondary_view());
        assert!(session.coordinator().is_active());
        assert_eq!(session.coordinator().restarts(), 1);
    }

    #[test]
    fn reset_requests_before_placement_are_ignored() {
        let mut session = session();

        assert!(!session.request_reset());
        assert!(session.drain_notices().is_empty());
    }
}
