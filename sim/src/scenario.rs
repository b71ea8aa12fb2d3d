use bevy::prelude::*;
use bevy_log::info;
use bevy_rapier3d::prelude::{Collider, RigidBody};
use ocean::buoyancy::{BuoyancyConfig, BuoyantBody};
use ocean::physics::{FloatingBodyBundle, WobbleAnchor};
use ocean::water::{WaveField, WaveFieldConfig, WavePreset};
use ocean::wobble::BoatWobble;
use ocean::ConfigError;
use ron::de::from_str;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A physically simulated boat.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BoatSpec {
    pub name: String,
    pub spawn: Vec3,
    /// Heading in degrees around +y
    pub yaw: f32,
    /// Hull half size (width, height, length)
    pub half_extents: Vec3,
    pub mass: f32,
    pub buoyancy: BuoyancyConfig,
}

impl Default for BoatSpec {
    fn default() -> Self {
        Self {
            name: "boat".to_string(),
            spawn: Vec3::new(0.0, 1.0, 0.0),
            yaw: 0.0,
            half_extents: Vec3::new(3.0, 0.5, 5.0),
            mass: 4.0,
            buoyancy: BuoyancyConfig::default(),
        }
    }
}

/// A boat tied up in place, bobbing on a script instead of physics.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MooredSpec {
    pub name: String,
    pub anchor: Vec3,
    pub half_extents: Vec3,
    /// Seed for the wobble phase
    pub seed: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Scenario {
    pub ocean: WaveFieldConfig,
    pub boats: Vec<BoatSpec>,
    pub moored: Vec<MooredSpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            ocean: WavePreset::Ocean.to_config(ocean::SEA_LEVEL),
            boats: vec![BoatSpec::default()],
            moored: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("sea: {0}")]
    Sea(ConfigError),

    #[error("boat {name}: {source}")]
    Boat { name: String, source: ConfigError },
}

/// Validated scenario, ready to spawn.
pub struct BuiltScenario {
    pub field: WaveField,
    pub boats: Vec<(BoatSpec, BuoyantBody)>,
    pub moored: Vec<MooredSpec>,
}

impl Scenario {
    /// Replace the sea with a preset, keeping the configured base level.
    pub fn with_preset(mut self, preset: WavePreset) -> Self {
        self.ocean = preset.to_config(self.ocean.base_level);
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.ocean.intensity = intensity;
        self
    }

    /// Validate the wave field and every boat, failing on the first error.
    pub fn build(&self) -> Result<BuiltScenario, ScenarioError> {
        let field = WaveField::new(self.ocean.clone()).map_err(ScenarioError::Sea)?;
        let boats = self
            .boats
            .iter()
            .map(|spec| {
                let buoyant = BuoyantBody::new(spec.buoyancy.clone()).map_err(|source| {
                    ScenarioError::Boat {
                        name: spec.name.clone(),
                        source,
                    }
                })?;
                Ok((spec.clone(), buoyant))
            })
            .collect::<Result<Vec<_>, ScenarioError>>()?;

        Ok(BuiltScenario {
            field,
            boats,
            moored: self.moored.clone(),
        })
    }
}

pub fn load_scenario(path: Option<&Path>) -> Result<Scenario, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        info!("No scenario file given, using the default sea");
        return Ok(Scenario::default());
    };

    if !path.exists() {
        info!(
            "Scenario file not found: {}. Using the default sea.",
            path.display()
        );
        return Ok(Scenario::default());
    }

    let contents: String = fs::read_to_string(path)?;
    let scenario: Scenario = from_str(&contents)?;

    info!("Loaded scenario from disk: {}", path.display());

    Ok(scenario)
}

impl BuiltScenario {
    pub fn spawn(self, world: &mut World) {
        for (spec, buoyant) in self.boats {
            info!("Spawning boat {} at {}", spec.name, spec.spawn);
            world.spawn((
                Name::new(spec.name),
                Transform::from_translation(spec.spawn)
                    .with_rotation(Quat::from_rotation_y(spec.yaw.to_radians())),
                FloatingBodyBundle::new(spec.half_extents, spec.mass, buoyant),
            ));
        }

        for spec in self.moored {
            info!("Mooring boat {} at {}", spec.name, spec.anchor);
            world.spawn((
                Name::new(spec.name),
                Transform::from_translation(spec.anchor),
                BoatWobble::seeded(spec.seed),
                WobbleAnchor(spec.anchor),
                RigidBody::KinematicPositionBased,
                Collider::cuboid(spec.half_extents.x, spec.half_extents.y, spec.half_extents.z),
            ));
        }
    }
}
