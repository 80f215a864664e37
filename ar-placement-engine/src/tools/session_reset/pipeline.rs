use crate::engine::scene::surface::SurfaceReference;

/// Control surface of the device's spatial tracking subsystem.
///
/// Resets always go through `stop` + `run`. `pause`/`resume` keep the
/// pipeline's internal scale estimate and are only for focus changes.
pub trait TrackingPipeline {
    fn stop(&mut self);

    /// Full (re)start against `surface`.
    fn run(&mut self, surface: &SurfaceReference);

    fn is_running(&self) -> bool;

    fn pause(&mut self) {}

    fn resume(&mut self) {}
}
