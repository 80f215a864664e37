//! Tuning constants shared across the placement engine.
//!
//! Every value here is a default: the runtime configuration asset may
//! override any of them.

pub mod gesture;
pub mod placement;
pub mod session;
