//! Device viewpoint for the AR session.
//!
//! The placement core only ever sees a `ViewerPose`; how the camera moves
//! is the host's business (device tracking on a phone, `DeviceRig` on desktop).

/// Desktop camera rig that stands in for device motion.
pub mod device_rig;

/// Camera marker and per-frame viewer pose accessor.
pub mod viewer;
