//! Procedural ocean waves and floating rigid bodies.
//!
//! - [`water`]: the wave field, a pure function of position and time
//! - [`buoyancy`]: multi-point buoyancy, drag, righting torque and splashes
//! - [`wobble`]: scripted motion for boats outside the physics step
//! - [`physics`]: bevy + Rapier integration

pub mod buoyancy;
pub mod constants;
pub mod error;
pub mod physics;
pub mod water;
pub mod wobble;

pub use constants::*;
pub use error::ConfigError;
