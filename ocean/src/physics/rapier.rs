//! Rapier integration for floating bodies.
//!
//! This module adapts Rapier rigid bodies to [`FloatingBody`] and runs every
//! [`BuoyantBody`] once per fixed step against the shared [`Ocean`].

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::buoyancy::{BuoyantBody, FloatingBody, Splash};
use crate::water::WaveField;
use crate::wobble::BoatWobble;

/// The wave field every floating body samples.
#[derive(Resource, Debug, Clone)]
pub struct Ocean {
    field: WaveField,
}

impl Ocean {
    pub fn new(field: WaveField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Swap in another field, e.g. when a storm builds up.
    pub fn replace(&mut self, field: WaveField) {
        self.field = field;
    }
}

/// A sample point of `entity` hit the surface fast.
#[derive(Event, Debug, Clone, Copy)]
pub struct SplashEvent {
    pub entity: Entity,
    pub splash: Splash,
}

/// The hull of `entity` strained hard enough to creak.
#[derive(Event, Debug, Clone, Copy)]
pub struct CreakEvent {
    pub entity: Entity,
    pub strain: f32,
}

/// `entity` entered or left the water.
#[derive(Event, Debug, Clone, Copy)]
pub struct WaterContactChanged {
    pub entity: Entity,
    pub in_water: bool,
}

/// Rapier body state seen through [`FloatingBody`].
///
/// Forces and torque accumulate into `external` and are written back to the
/// entity's [`ExternalForce`] once the step is done. Torque is taken about the
/// body origin, so colliders are expected to be centered on it.
pub struct RapierFloater<'a> {
    transform: &'a Transform,
    velocity: &'a Velocity,
    damping: &'a mut Damping,
    external: ExternalForce,
}

impl<'a> RapierFloater<'a> {
    pub fn new(transform: &'a Transform, velocity: &'a Velocity, damping: &'a mut Damping) -> Self {
        Self {
            transform,
            velocity,
            damping,
            external: ExternalForce::default(),
        }
    }

    /// Accumulated force and torque for this step.
    pub fn into_external_force(self) -> ExternalForce {
        self.external
    }
}

impl FloatingBody for RapierFloater<'_> {
    fn world_point(&self, local_offset: Vec3) -> Option<Vec3> {
        let point = self.transform.transform_point(local_offset);
        point.is_finite().then_some(point)
    }

    fn point_velocity(&self, world_point: Vec3) -> Vec3 {
        self.velocity.linvel + self.velocity.angvel.cross(world_point - self.transform.translation)
    }

    fn apply_force_at_point(&mut self, force: Vec3, world_point: Vec3) {
        self.external.force += force;
        self.external.torque += (world_point - self.transform.translation).cross(force);
    }

    fn apply_torque(&mut self, torque: Vec3) {
        self.external.torque += torque;
    }

    fn set_damping(&mut self, linear: f32, angular: f32) {
        self.damping.linear_damping = linear;
        self.damping.angular_damping = angular;
    }

    fn up(&self) -> Vec3 {
        self.transform.up().as_vec3()
    }

    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn angular_velocity(&self) -> Vec3 {
        self.velocity.angvel
    }
}

/// Run one buoyancy step for every floating body.
pub fn float_bodies(
    time: Res<Time>,
    ocean: Res<Ocean>,
    mut bodies: Query<(
        Entity,
        &mut BuoyantBody,
        &Transform,
        &Velocity,
        &mut Damping,
        &mut ExternalForce,
    )>,
    mut splashes: EventWriter<SplashEvent>,
    mut creaks: EventWriter<CreakEvent>,
    mut contacts: EventWriter<WaterContactChanged>,
) {
    let wave_time = time.elapsed_secs();
    let delta = time.delta_secs();

    for (entity, mut buoyant, transform, velocity, mut damping, mut external) in bodies.iter_mut() {
        let was_in_water = buoyant.is_in_water();

        let mut floater = RapierFloater::new(transform, velocity, &mut damping);
        let report = buoyant.step(ocean.field(), &mut floater, wave_time, delta);
        *external = floater.into_external_force();

        if report.in_water != was_in_water {
            contacts.write(WaterContactChanged {
                entity,
                in_water: report.in_water,
            });
        }
        for splash in report.splashes {
            splashes.write(SplashEvent { entity, splash });
        }
        if let Some(creak) = report.creak {
            creaks.write(CreakEvent {
                entity,
                strain: creak.strain,
            });
        }
    }
}

/// Resting pose a [`BoatWobble`] moves around.
#[derive(Component, Debug, Clone, Copy)]
pub struct WobbleAnchor(pub Vec3);

/// Move kinematic boats along their scripted wobble.
pub fn wobble_boats(time: Res<Time>, mut boats: Query<(&BoatWobble, &WobbleAnchor, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (wobble, anchor, mut transform) in boats.iter_mut() {
        let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
        let (offset, rotation) = wobble.pose(yaw, t);
        transform.translation = anchor.0 + offset;
        transform.rotation = rotation;
    }
}

/// Bundle for a dynamic box hull that floats on the [`Ocean`].
#[derive(Bundle)]
pub struct FloatingBodyBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub mass: ColliderMassProperties,
    pub velocity: Velocity,
    pub damping: Damping,
    pub external_force: ExternalForce,
    pub sleeping: Sleeping,
    pub buoyant: BuoyantBody,
}

impl FloatingBodyBundle {
    /// Create a floating hull.
    ///
    /// # Arguments
    /// * `half_extents` - Hull half size (x width, y height, z length)
    /// * `mass` - Hull mass
    /// * `buoyant` - Sample points and tuning
    pub fn new(half_extents: Vec3, mass: f32, buoyant: BuoyantBody) -> Self {
        let dry = buoyant.config().dry_damping;
        Self {
            body: RigidBody::Dynamic,
            collider: Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            mass: ColliderMassProperties::Mass(mass),
            velocity: Velocity::zero(),
            damping: Damping {
                linear_damping: dry.linear,
                angular_damping: dry.angular,
            },
            external_force: ExternalForce::default(),
            // Forces change every step, the body must never fall asleep
            sleeping: Sleeping::disabled(),
            buoyant,
        }
    }
}

/// Plugin that keeps [`BuoyantBody`] entities afloat.
///
/// Rapier should run in the fixed schedule
/// (`RapierPhysicsPlugin::default().in_fixed_schedule()`) so forces are
/// written once per physics step, ahead of its `FixedPostUpdate` sets.
pub struct FloatingPlugin {
    field: WaveField,
}

impl FloatingPlugin {
    pub fn new(field: WaveField) -> Self {
        Self { field }
    }
}

impl Plugin for FloatingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Ocean::new(self.field.clone()));
        app.add_event::<SplashEvent>();
        app.add_event::<CreakEvent>();
        app.add_event::<WaterContactChanged>();

        // Rapier steps in FixedPostUpdate, after these forces are written
        app.add_systems(FixedUpdate, (wobble_boats, float_bodies));
    }
}
