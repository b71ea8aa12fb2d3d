//! Validated, immutable wave field.
//!
//! Height queries are pure: the same `(x, z, time)` always yields the same
//! surface height, so points can be sampled in any order or on any thread.

use super::config::{WaveComponent, WaveFieldConfig};
use crate::error::{self, ConfigError};
use crate::DEFAULT_NORMAL_SAMPLE_DISTANCE;
use bevy::math::{Vec2, Vec3};
use bevy_log::debug;
use std::f32::consts::PI;

/// Precomputed constants for a single wave.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WaveConstants {
    /// Wave number k = 2π / wavelength
    k: f32,
    /// Phase advance per second
    speed: f32,
    amplitude: f32,
    /// Unit propagation direction
    dir_x: f32,
    dir_y: f32,
}

impl WaveConstants {
    #[inline]
    fn contribution(&self, x: f32, z: f32, time: f32) -> f32 {
        // Phase = k * (dir · pos) - speed * t
        let phase = self.k * (self.dir_x * x + self.dir_y * z) - self.speed * time;
        self.amplitude * phase.sin()
    }
}

/// Superposition of traveling sine waves over a resting water level.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveField {
    components: Vec<WaveComponent>,
    constants: Vec<WaveConstants>,
    base_level: f32,
    intensity: f32,
}

impl WaveField {
    /// Validate a configuration and build the field.
    ///
    /// Fails on the first invalid component or parameter, so a field is either
    /// fully valid or never built.
    pub fn new(config: WaveFieldConfig) -> Result<Self, ConfigError> {
        let base_level = error::finite("base_level", config.base_level)?;
        let intensity = error::non_negative("intensity", config.intensity)?;

        let mut components = Vec::with_capacity(config.components.len());
        let mut constants = Vec::with_capacity(config.components.len());

        for (index, wave) in config.components.iter().enumerate() {
            if !(wave.wavelength.is_finite() && wave.wavelength > 0.0) {
                return Err(ConfigError::InvalidWavelength {
                    index,
                    value: wave.wavelength,
                });
            }
            if !(wave.amplitude.is_finite() && wave.amplitude >= 0.0) {
                return Err(ConfigError::InvalidAmplitude {
                    index,
                    value: wave.amplitude,
                });
            }
            if !wave.speed.is_finite() {
                return Err(ConfigError::InvalidSpeed {
                    index,
                    value: wave.speed,
                });
            }
            let direction = wave
                .direction
                .try_normalize()
                .ok_or(ConfigError::InvalidDirection { index })?;

            components.push(WaveComponent { direction, ..*wave });
            constants.push(WaveConstants {
                k: 2.0 * PI / wave.wavelength,
                speed: wave.speed,
                amplitude: wave.amplitude,
                dir_x: direction.x,
                dir_y: direction.y,
            });
        }

        debug!(
            "Built wave field with {} components (base level {}, intensity {})",
            components.len(),
            base_level,
            intensity
        );

        Ok(Self {
            components,
            constants,
            base_level,
            intensity,
        })
    }

    /// A flat sea at `base_level`.
    pub fn still(base_level: f32) -> Result<Self, ConfigError> {
        Self::new(WaveFieldConfig::new(base_level))
    }

    /// Same components and base level at another intensity.
    pub fn with_intensity(&self, intensity: f32) -> Result<Self, ConfigError> {
        let intensity = error::non_negative("intensity", intensity)?;
        Ok(Self {
            intensity,
            ..self.clone()
        })
    }

    /// Components with their directions normalized.
    pub fn components(&self) -> &[WaveComponent] {
        &self.components
    }

    pub fn base_level(&self) -> f32 {
        self.base_level
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Largest possible distance of the surface from the base level.
    pub fn max_displacement(&self) -> f32 {
        self.intensity * self.constants.iter().map(|c| c.amplitude).sum::<f32>()
    }

    /// Surface height at `(x, z)` and `time`.
    #[inline]
    pub fn height(&self, x: f32, z: f32, time: f32) -> f32 {
        if self.intensity == 0.0 {
            return self.base_level;
        }

        let waves: f32 = self
            .constants
            .iter()
            .map(|wc| wc.contribution(x, z, time))
            .sum();

        self.base_level + self.intensity * waves
    }

    /// Surface normal estimated by finite differences over `sample_distance`.
    ///
    /// A smaller distance follows the local slope more closely but picks up
    /// more noise from short waves. Non-positive distances fall back to
    /// [`DEFAULT_NORMAL_SAMPLE_DISTANCE`].
    pub fn normal(&self, position: Vec2, time: f32, sample_distance: f32) -> Vec3 {
        let d = if sample_distance.is_finite() && sample_distance > 0.0 {
            sample_distance
        } else {
            debug!(
                "Invalid normal sample distance {}, using {}",
                sample_distance, DEFAULT_NORMAL_SAMPLE_DISTANCE
            );
            DEFAULT_NORMAL_SAMPLE_DISTANCE
        };

        let center = self.height(position.x, position.y, time);
        let right_h = self.height(position.x + d, position.y, time);
        let forward_h = self.height(position.x, position.y + d, time);

        let right = Vec3::new(d, right_h - center, 0.0);
        let forward = Vec3::new(0.0, forward_h - center, d);

        // y component is d², so the cross product never vanishes
        forward.cross(right).normalize_or(Vec3::Y)
    }

    /// How deep `position` lies below the surface. Negative above water.
    #[inline]
    pub fn depth_at(&self, position: Vec3, time: f32) -> f32 {
        self.height(position.x, position.z, time) - position.y
    }

    #[inline]
    pub fn is_underwater(&self, position: Vec3, time: f32) -> bool {
        self.depth_at(position, time) > 0.0
    }

    /// Batch sample heights at `(x, z)` points.
    pub fn sample_heights(&self, points: &[Vec2], time: f32, heights: &mut [f32]) {
        debug_assert_eq!(points.len(), heights.len());

        for (point, height) in points.iter().zip(heights.iter_mut()) {
            *height = self.height(point.x, point.y, time);
        }
    }
}
