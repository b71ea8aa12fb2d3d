//! Serializable wave configuration.
//!
//! These are the raw, unchecked parameters as they come out of a scenario
//! file or a preset. [`WaveField::new`](super::WaveField::new) validates them.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// One traveling sine wave contributing to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveComponent {
    /// Half-height of this wave's contribution (world units)
    pub amplitude: f32,
    /// Spatial period in world units
    pub wavelength: f32,
    /// Phase advance per second along `direction` (may be negative)
    pub speed: f32,
    /// Propagation direction on the horizontal (x, z) plane
    pub direction: Vec2,
}

impl WaveComponent {
    pub const fn new(amplitude: f32, wavelength: f32, speed: f32, direction: Vec2) -> Self {
        Self {
            amplitude,
            wavelength,
            speed,
            direction,
        }
    }
}

/// Large swell of the default sea.
pub const SWELL: WaveComponent = WaveComponent::new(1.5, 40.0, 8.0, Vec2::new(1.0, 0.0));
/// Medium waves crossing the swell diagonally.
pub const MEDIUM_WAVES: WaveComponent = WaveComponent::new(0.8, 20.0, 12.0, Vec2::new(0.7, 0.7));
/// Short, fast chop.
pub const CHOP: WaveComponent = WaveComponent::new(0.3, 8.0, 15.0, Vec2::new(-0.5, 0.8));

/// Complete wave field configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveFieldConfig {
    /// Resting water height with no waves (Y coordinate)
    pub base_level: f32,
    /// Global multiplier on the summed waves (storm severity, usually 0..1)
    pub intensity: f32,
    /// Superposed wave components, order does not matter
    pub components: Vec<WaveComponent>,
}

impl WaveFieldConfig {
    /// Create a flat configuration with no components.
    pub fn new(base_level: f32) -> Self {
        Self {
            base_level,
            intensity: 1.0,
            components: Vec::new(),
        }
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_component(mut self, component: WaveComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Sum of component amplitudes, before intensity scaling.
    pub fn total_amplitude(&self) -> f32 {
        self.components.iter().map(|c| c.amplitude).sum()
    }
}

impl Default for WaveFieldConfig {
    fn default() -> Self {
        WavePreset::default().to_config(0.0)
    }
}

/// Preset seas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WavePreset {
    /// Flat water
    Still,
    /// One gentle swell
    Calm,
    /// Three-layer sea at half strength
    #[default]
    Ocean,
    /// Three-layer sea at full strength
    Storm,
}

impl WavePreset {
    /// Create a WaveFieldConfig from this preset.
    pub fn to_config(self, base_level: f32) -> WaveFieldConfig {
        let config = WaveFieldConfig::new(base_level);

        match self {
            WavePreset::Still => config,
            WavePreset::Calm => config.with_intensity(0.2).with_component(SWELL),
            WavePreset::Ocean => config
                .with_intensity(0.5)
                .with_component(SWELL)
                .with_component(MEDIUM_WAVES)
                .with_component(CHOP),
            WavePreset::Storm => config
                .with_intensity(1.0)
                .with_component(SWELL)
                .with_component(MEDIUM_WAVES)
                .with_component(CHOP),
        }
    }
}
