//! Scripted bobbing for boats that are not physically simulated.

use bevy::math::{EulerRot, Quat, Vec3};
use bevy_ecs::component::Component;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Gentle bob, roll and pitch around a resting pose.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoatWobble {
    /// Vertical travel in meters
    pub bob_amount: f32,
    /// Cycles per second
    pub bob_speed: f32,
    /// Degrees
    pub roll_amount: f32,
    pub roll_speed: f32,
    /// Degrees
    pub pitch_amount: f32,
    pub pitch_speed: f32,
    /// Phase shift in seconds so boats don't move in lockstep
    pub time_offset: f32,
}

impl Default for BoatWobble {
    fn default() -> Self {
        Self {
            bob_amount: 0.15,
            bob_speed: 0.2,
            roll_amount: 1.0,
            roll_speed: 0.15,
            pitch_amount: 0.5,
            pitch_speed: 0.18,
            time_offset: 0.0,
        }
    }
}

impl BoatWobble {
    /// Default motion with a reproducible phase offset in `[0, 100)` seconds.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            time_offset: rng.gen_range(0.0..100.0),
            ..Default::default()
        }
    }

    /// Translation offset and rotation at `time`, keeping the given yaw.
    pub fn pose(&self, yaw: f32, time: f32) -> (Vec3, Quat) {
        let t = time + self.time_offset;

        let bob = (t * self.bob_speed * TAU).sin() * self.bob_amount;
        let roll = (t * self.roll_speed * TAU).sin() * self.roll_amount;
        let pitch = (t * self.pitch_speed * TAU + 1.0).sin() * self.pitch_amount;

        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            yaw,
            pitch.to_radians(),
            roll.to_radians(),
        );

        (Vec3::new(0.0, bob, 0.0), rotation)
    }
}
