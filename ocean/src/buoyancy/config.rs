//! Tuning for a floating body.

use super::points::default_footprint;
use crate::error::{self, ConfigError};
use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Constants for floating bodies, tuned for a small wooden boat.
pub mod defaults {
    /// Upward force at a fully submerged sample point
    pub const BUOYANCY_COEFFICIENT: f32 = 20.0;
    /// Depth at which a sample point's force saturates
    pub const FLOAT_POINT_DEPTH: f32 = 1.0;
    pub const WET_LINEAR_DAMPING: f32 = 3.0;
    pub const WET_ANGULAR_DAMPING: f32 = 2.0;
    pub const DRY_LINEAR_DAMPING: f32 = 0.1;
    pub const DRY_ANGULAR_DAMPING: f32 = 0.1;
    /// Torque per degree of misalignment
    pub const STABILITY_COEFFICIENT: f32 = 2.0;
    /// Share of the wave normal in the target up direction
    pub const NORMAL_BLEND: f32 = 0.5;
    /// Misalignment ignored by the stability controller (degrees)
    pub const STABILITY_DEADBAND_DEG: f32 = 0.1;
    /// Finite-difference step for the stability normal
    pub const STABILITY_SAMPLE_DISTANCE: f32 = 3.0;
    /// Minimum vertical point speed for a splash
    pub const SPLASH_THRESHOLD: f32 = 2.0;
    /// Seconds a sample point stays silent after splashing
    pub const SPLASH_COOLDOWN: f32 = 0.3;
    /// Vertical distance from the surface that still counts as crossing it
    pub const SURFACE_BAND: f32 = 0.5;
    /// Angular speed increase (rad/s) that makes the hull creak
    pub const CREAK_THRESHOLD: f32 = 0.05;
    /// Seconds between two creaks
    pub const CREAK_INTERVAL: f32 = 2.0;
    pub const FOOTPRINT_HALF_WIDTH: f32 = 3.0;
    pub const FOOTPRINT_HALF_LENGTH: f32 = 5.0;
}

/// Where the sample points sit relative to the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SampleLayout {
    /// Explicit body-relative offsets
    Explicit(Vec<Vec3>),
    /// Four corners of a rectangle in the body's local XZ plane
    Footprint { half_width: f32, half_length: f32 },
}

impl SampleLayout {
    /// Body-relative offsets for this layout.
    pub fn offsets(&self) -> Vec<Vec3> {
        match self {
            SampleLayout::Explicit(offsets) => offsets.clone(),
            SampleLayout::Footprint {
                half_width,
                half_length,
            } => default_footprint(*half_width, *half_length)
                .iter()
                .map(|p| p.local_offset)
                .collect(),
        }
    }
}

impl Default for SampleLayout {
    fn default() -> Self {
        SampleLayout::Footprint {
            half_width: defaults::FOOTPRINT_HALF_WIDTH,
            half_length: defaults::FOOTPRINT_HALF_LENGTH,
        }
    }
}

/// Linear and angular damping pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DampingPair {
    pub linear: f32,
    pub angular: f32,
}

impl DampingPair {
    pub const fn new(linear: f32, angular: f32) -> Self {
        Self { linear, angular }
    }
}

/// Complete configuration of a buoyant body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuoyancyConfig {
    pub buoyancy_coefficient: f32,
    pub float_point_depth: f32,
    /// Damping while any sample point is submerged
    pub wet_damping: DampingPair,
    /// Damping while the body is clear of the water
    pub dry_damping: DampingPair,
    pub stability_coefficient: f32,
    pub normal_blend: f32,
    pub stability_deadband_deg: f32,
    pub stability_sample_distance: f32,
    pub splash_threshold: f32,
    pub splash_cooldown: f32,
    pub surface_band: f32,
    /// `None` disables creak detection
    pub creak_threshold: Option<f32>,
    pub creak_interval: f32,
    pub layout: SampleLayout,
}

impl Default for BuoyancyConfig {
    fn default() -> Self {
        Self {
            buoyancy_coefficient: defaults::BUOYANCY_COEFFICIENT,
            float_point_depth: defaults::FLOAT_POINT_DEPTH,
            wet_damping: DampingPair::new(
                defaults::WET_LINEAR_DAMPING,
                defaults::WET_ANGULAR_DAMPING,
            ),
            dry_damping: DampingPair::new(
                defaults::DRY_LINEAR_DAMPING,
                defaults::DRY_ANGULAR_DAMPING,
            ),
            stability_coefficient: defaults::STABILITY_COEFFICIENT,
            normal_blend: defaults::NORMAL_BLEND,
            stability_deadband_deg: defaults::STABILITY_DEADBAND_DEG,
            stability_sample_distance: defaults::STABILITY_SAMPLE_DISTANCE,
            splash_threshold: defaults::SPLASH_THRESHOLD,
            splash_cooldown: defaults::SPLASH_COOLDOWN,
            surface_band: defaults::SURFACE_BAND,
            creak_threshold: Some(defaults::CREAK_THRESHOLD),
            creak_interval: defaults::CREAK_INTERVAL,
            layout: SampleLayout::default(),
        }
    }
}

impl BuoyancyConfig {
    pub fn with_layout(mut self, layout: SampleLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_buoyancy(mut self, coefficient: f32, float_point_depth: f32) -> Self {
        self.buoyancy_coefficient = coefficient;
        self.float_point_depth = float_point_depth;
        self
    }

    pub fn with_splash(mut self, threshold: f32, cooldown: f32, surface_band: f32) -> Self {
        self.splash_threshold = threshold;
        self.splash_cooldown = cooldown;
        self.surface_band = surface_band;
        self
    }

    pub fn without_creaks(mut self) -> Self {
        self.creak_threshold = None;
        self
    }

    /// Check every scalar parameter and resolve the sample layout.
    pub fn validate(&self) -> Result<Vec<Vec3>, ConfigError> {
        error::non_negative("buoyancy_coefficient", self.buoyancy_coefficient)?;
        error::positive("float_point_depth", self.float_point_depth)?;
        error::non_negative("wet_damping.linear", self.wet_damping.linear)?;
        error::non_negative("wet_damping.angular", self.wet_damping.angular)?;
        error::non_negative("dry_damping.linear", self.dry_damping.linear)?;
        error::non_negative("dry_damping.angular", self.dry_damping.angular)?;
        error::non_negative("stability_coefficient", self.stability_coefficient)?;
        error::unit_range("normal_blend", self.normal_blend)?;
        error::non_negative("stability_deadband_deg", self.stability_deadband_deg)?;
        error::positive("stability_sample_distance", self.stability_sample_distance)?;
        error::non_negative("splash_threshold", self.splash_threshold)?;
        error::non_negative("splash_cooldown", self.splash_cooldown)?;
        error::positive("surface_band", self.surface_band)?;
        if let Some(threshold) = self.creak_threshold {
            error::non_negative("creak_threshold", threshold)?;
        }
        error::non_negative("creak_interval", self.creak_interval)?;

        if let SampleLayout::Footprint {
            half_width,
            half_length,
        } = self.layout
        {
            error::non_negative("layout.half_width", half_width)?;
            error::non_negative("layout.half_length", half_length)?;
        }

        let offsets = self.layout.offsets();
        if offsets.is_empty() {
            return Err(ConfigError::NoSamplePoints);
        }
        if let Some(index) = offsets.iter().position(|o| !o.is_finite()) {
            return Err(ConfigError::InvalidSamplePoint { index });
        }

        Ok(offsets)
    }
}
