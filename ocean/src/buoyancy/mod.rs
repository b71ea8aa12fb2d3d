//! Floating bodies on the wave field.
//!
//! A [`BuoyantBody`] approximates distributed buoyancy with a handful of
//! body-relative sample points. It drives any rigid body through the
//! [`FloatingBody`] trait, which keeps the integration free of engine types
//! and easy to test with synthetic poses.

pub mod body;
pub mod config;
pub mod creak;
pub mod points;
pub mod stability;

pub use body::{BuoyantBody, FloatingBody, Splash, StepReport};
pub use config::{BuoyancyConfig, DampingPair, SampleLayout};
pub use creak::{Creak, CreakMonitor};
pub use points::{default_footprint, Probe, SamplePoint, SplashGate};
