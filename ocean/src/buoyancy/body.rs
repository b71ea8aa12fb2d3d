//! Multi-point buoyancy integration against a rigid body.
//!
//! Each fixed step a [`BuoyantBody`] probes the wave field at its sample
//! points and pushes forces, damping and torque into a [`FloatingBody`]:
//!
//! 1. refresh submersion depth at every sample point
//! 2. apply an upward force at every submerged point
//! 3. switch damping between wet and dry coefficients
//! 4. apply a righting torque toward the blended wave normal
//! 5. emit splashes for points crossing the surface fast, then cool down
//!
//! Drag switches on this step's submersion, before the body integrates.

use super::config::{BuoyancyConfig, DampingPair};
use super::creak::{Creak, CreakMonitor};
use super::points::{Probe, SamplePoint};
use super::stability::{stability_torque, target_up};
use crate::error::ConfigError;
use crate::water::WaveField;
use bevy::math::{Vec2, Vec3};
use bevy_ecs::component::Component;
use bevy_log::debug;

/// Rigid-body capability a buoyant body drives each step.
///
/// Implementations resolve the current pose on every call; nothing is cached
/// between steps.
pub trait FloatingBody {
    /// World position of a body-relative offset, `None` if it cannot be resolved.
    fn world_point(&self, local_offset: Vec3) -> Option<Vec3>;
    /// Linear velocity of the body at a world point, including rotation.
    fn point_velocity(&self, world_point: Vec3) -> Vec3;
    fn apply_force_at_point(&mut self, force: Vec3, world_point: Vec3);
    fn apply_torque(&mut self, torque: Vec3);
    fn set_damping(&mut self, linear: f32, angular: f32);
    /// Body's current up direction.
    fn up(&self) -> Vec3;
    /// Body's reference position.
    fn position(&self) -> Vec3;
    fn angular_velocity(&self) -> Vec3;
}

/// A sample point crossing the surface at speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splash {
    pub point_index: usize,
    pub position: Vec3,
    /// Vertical speed of the point when it crossed
    pub intensity: f32,
}

/// Everything a step did to the body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub in_water: bool,
    /// Points whose world position was resolved
    pub resolved_points: usize,
    pub submerged_points: usize,
    /// Sum of buoyancy forces applied
    pub buoyancy_force: Vec3,
    /// Righting torque, zero when the body was aligned
    pub stability_torque: Vec3,
    /// In sample point order
    pub splashes: Vec<Splash>,
    pub creak: Option<Creak>,
}

/// A rigid body kept afloat by a fixed set of sample points.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct BuoyantBody {
    config: BuoyancyConfig,
    points: Vec<SamplePoint>,
    in_water: bool,
    creak: Option<CreakMonitor>,
}

impl BuoyantBody {
    /// Validate `config` and lay out its sample points.
    pub fn new(config: BuoyancyConfig) -> Result<Self, ConfigError> {
        let offsets = config.validate()?;
        let points = offsets.into_iter().map(SamplePoint::new).collect();
        let creak = config
            .creak_threshold
            .map(|threshold| CreakMonitor::new(threshold, config.creak_interval));

        Ok(Self {
            config,
            points,
            in_water: false,
            creak,
        })
    }

    pub fn config(&self) -> &BuoyancyConfig {
        &self.config
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    /// Whether any sample point was submerged in the latest step.
    pub fn is_in_water(&self) -> bool {
        self.in_water
    }

    /// Upward force for a single sample point at `depth`.
    ///
    /// Ramps linearly from zero at the surface and saturates at
    /// `float_point_depth`.
    pub fn point_force(&self, depth: f32) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        self.config.buoyancy_coefficient
            * (depth / self.config.float_point_depth).clamp(0.0, 1.0)
    }

    /// Advance one fixed step of `delta` seconds at wave time `time`.
    pub fn step(
        &mut self,
        field: &WaveField,
        body: &mut impl FloatingBody,
        time: f32,
        delta: f32,
    ) -> StepReport {
        let mut report = StepReport::default();

        self.refresh_submersion(field, body, time);
        self.apply_buoyancy(body, &mut report);
        self.update_drag(body, &mut report);
        self.apply_stability(field, body, time, &mut report);
        self.detect_splashes(body, delta, &mut report);

        if let Some(monitor) = self.creak.as_mut() {
            report.creak = monitor.observe(body.angular_velocity().length(), delta);
        }

        report
    }

    fn refresh_submersion(&mut self, field: &WaveField, body: &impl FloatingBody, time: f32) {
        for (index, point) in self.points.iter_mut().enumerate() {
            point.probe = match body.world_point(point.local_offset) {
                Some(world_position) if world_position.is_finite() => {
                    let water_height = field.height(world_position.x, world_position.z, time);
                    Some(Probe {
                        world_position,
                        water_height,
                        depth: water_height - world_position.y,
                    })
                }
                _ => {
                    debug!("Skipping sample point {index}: world position unavailable");
                    None
                }
            };
        }
    }

    fn apply_buoyancy(&self, body: &mut impl FloatingBody, report: &mut StepReport) {
        for probe in self.points.iter().filter_map(SamplePoint::probe) {
            report.resolved_points += 1;
            if !probe.is_submerged() {
                continue;
            }

            let force = Vec3::Y * self.point_force(probe.depth);
            body.apply_force_at_point(force, probe.world_position);
            report.submerged_points += 1;
            report.buoyancy_force += force;
        }
    }

    fn update_drag(&mut self, body: &mut impl FloatingBody, report: &mut StepReport) {
        self.in_water = self
            .points
            .iter()
            .filter_map(SamplePoint::probe)
            .any(Probe::is_submerged);

        let DampingPair { linear, angular } = if self.in_water {
            self.config.wet_damping
        } else {
            self.config.dry_damping
        };
        body.set_damping(linear, angular);
        report.in_water = self.in_water;
    }

    fn apply_stability(
        &self,
        field: &WaveField,
        body: &mut impl FloatingBody,
        time: f32,
        report: &mut StepReport,
    ) {
        let position = body.position();
        if !position.is_finite() {
            return;
        }

        let normal = field.normal(
            Vec2::new(position.x, position.z),
            time,
            self.config.stability_sample_distance,
        );
        let target = target_up(normal, self.config.normal_blend);

        if let Some(torque) = stability_torque(
            body.up(),
            target,
            self.config.stability_coefficient,
            self.config.stability_deadband_deg,
        ) {
            body.apply_torque(torque);
            report.stability_torque = torque;
        }
    }

    fn detect_splashes(&mut self, body: &impl FloatingBody, delta: f32, report: &mut StepReport) {
        let threshold = self.config.splash_threshold;
        let band = self.config.surface_band;
        let cooldown = self.config.splash_cooldown;

        for (index, point) in self.points.iter_mut().enumerate() {
            if point.splash_cooldown_remaining() <= 0.0 {
                if let Some(probe) = point.probe {
                    let vertical_speed = body.point_velocity(probe.world_position).y.abs();
                    let at_surface = (probe.world_position.y - probe.water_height).abs() < band;

                    if at_surface && vertical_speed > threshold {
                        report.splashes.push(Splash {
                            point_index: index,
                            position: probe.world_position,
                            intensity: vertical_speed,
                        });
                        point.start_cooldown(cooldown);
                    }
                }
            }
            point.tick_cooldown(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buoyancy::config::SampleLayout;
    use crate::water::{WaveComponent, WaveFieldConfig, WavePreset};
    use bevy::math::Quat;
    use std::f32::consts::PI;

    /// Rigid body with a scripted pose that records what it receives.
    #[derive(Default)]
    struct TestBody {
        position: Vec3,
        rotation: Quat,
        linear_velocity: Vec3,
        angular_velocity: Vec3,
        /// Offsets the body pretends it cannot resolve
        unresolved: Vec<Vec3>,
        forces: Vec<(Vec3, Vec3)>,
        torques: Vec<Vec3>,
        damping: Option<(f32, f32)>,
    }

    impl TestBody {
        fn at(position: Vec3) -> Self {
            Self {
                position,
                ..Default::default()
            }
        }
    }

    impl FloatingBody for TestBody {
        fn world_point(&self, local_offset: Vec3) -> Option<Vec3> {
            if self.unresolved.contains(&local_offset) {
                return None;
            }
            Some(self.position + self.rotation * local_offset)
        }

        fn point_velocity(&self, world_point: Vec3) -> Vec3 {
            self.linear_velocity + self.angular_velocity.cross(world_point - self.position)
        }

        fn apply_force_at_point(&mut self, force: Vec3, world_point: Vec3) {
            self.forces.push((force, world_point));
        }

        fn apply_torque(&mut self, torque: Vec3) {
            self.torques.push(torque);
        }

        fn set_damping(&mut self, linear: f32, angular: f32) {
            self.damping = Some((linear, angular));
        }

        fn up(&self) -> Vec3 {
            self.rotation * Vec3::Y
        }

        fn position(&self) -> Vec3 {
            self.position
        }

        fn angular_velocity(&self) -> Vec3 {
            self.angular_velocity
        }
    }

    fn single_point_body(coefficient: f32, float_point_depth: f32) -> BuoyantBody {
        BuoyantBody::new(
            BuoyancyConfig::default()
                .with_buoyancy(coefficient, float_point_depth)
                .with_layout(SampleLayout::Explicit(vec![Vec3::ZERO]))
                .without_creaks(),
        )
        .unwrap()
    }

    fn flat_sea() -> WaveField {
        WaveField::still(0.0).unwrap()
    }

    #[test]
    fn test_zero_sample_points_are_rejected() {
        let config = BuoyancyConfig::default().with_layout(SampleLayout::Explicit(vec![]));
        assert_eq!(BuoyantBody::new(config), Err(ConfigError::NoSamplePoints));
    }

    #[test]
    fn test_half_submerged_point_force() {
        let mut buoyant = single_point_body(20.0, 1.0);
        let mut body = TestBody::at(Vec3::new(0.0, -0.5, 0.0));

        let report = buoyant.step(&flat_sea(), &mut body, 0.0, 0.02);

        assert_eq!(body.forces.len(), 1);
        let (force, at) = body.forces[0];
        assert!((force - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-5);
        assert_eq!(at, Vec3::new(0.0, -0.5, 0.0));
        assert!(report.in_water);
        assert_eq!(report.submerged_points, 1);
        assert!((report.buoyancy_force.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_point_above_water_is_dry() {
        let mut buoyant = single_point_body(20.0, 1.0);
        let mut body = TestBody::at(Vec3::new(0.0, 0.2, 0.0));

        let report = buoyant.step(&flat_sea(), &mut body, 0.0, 0.02);

        assert!(body.forces.is_empty());
        assert!(!report.in_water);
        assert!(!buoyant.is_in_water());
        assert_eq!(buoyant.points()[0].depth(), Some(-0.2));
        let dry = BuoyancyConfig::default().dry_damping;
        assert_eq!(body.damping, Some((dry.linear, dry.angular)));
    }

    #[test]
    fn test_force_is_monotonic_and_saturates() {
        let buoyant = single_point_body(20.0, 1.0);
        assert_eq!(buoyant.point_force(-1.0), 0.0);
        assert_eq!(buoyant.point_force(0.0), 0.0);

        let mut last = 0.0;
        for i in 1..=40 {
            let force = buoyant.point_force(i as f32 * 0.05);
            assert!(force >= last);
            last = force;
        }
        assert_eq!(buoyant.point_force(1.0), 20.0);
        assert_eq!(buoyant.point_force(5.0), 20.0);
    }

    #[test]
    fn test_wet_damping_when_any_point_submerged() {
        let mut buoyant = BuoyantBody::new(BuoyancyConfig::default().without_creaks()).unwrap();
        // Tilted so only the front corners dip below the surface
        let mut body = TestBody {
            position: Vec3::new(0.0, 0.5, 0.0),
            rotation: Quat::from_rotation_x(15f32.to_radians()),
            ..Default::default()
        };

        let report = buoyant.step(&flat_sea(), &mut body, 0.0, 0.02);

        assert!(report.in_water);
        assert_eq!(report.submerged_points, 2);
        let wet = BuoyancyConfig::default().wet_damping;
        assert_eq!(body.damping, Some((wet.linear, wet.angular)));
    }

    #[test]
    fn test_drag_follows_each_step_without_hysteresis() {
        let mut buoyant = single_point_body(20.0, 1.0);
        let field = flat_sea();
        let wet = BuoyancyConfig::default().wet_damping;
        let dry = BuoyancyConfig::default().dry_damping;

        for (y, expected) in [(-0.1, wet), (0.1, dry), (-0.1, wet), (0.1, dry)] {
            let mut body = TestBody::at(Vec3::new(0.0, y, 0.0));
            buoyant.step(&field, &mut body, 0.0, 0.02);
            assert_eq!(body.damping, Some((expected.linear, expected.angular)));
        }
    }

    #[test]
    fn test_unresolved_point_is_skipped() {
        let mut buoyant = BuoyantBody::new(BuoyancyConfig::default().without_creaks()).unwrap();
        let offsets = buoyant.config().layout.offsets();
        let mut body = TestBody {
            position: Vec3::new(0.0, -0.5, 0.0),
            unresolved: vec![offsets[1]],
            ..Default::default()
        };

        let report = buoyant.step(&flat_sea(), &mut body, 0.0, 0.02);

        assert_eq!(report.resolved_points, 3);
        assert_eq!(report.submerged_points, 3);
        assert_eq!(body.forces.len(), 3);
        assert!(buoyant.points()[1].probe().is_none());
        assert!(report.in_water);
    }

    #[test]
    fn test_all_points_unresolved_reads_as_dry() {
        let mut buoyant = single_point_body(20.0, 1.0);
        let mut body = TestBody {
            position: Vec3::new(0.0, -3.0, 0.0),
            unresolved: vec![Vec3::ZERO],
            ..Default::default()
        };

        let report = buoyant.step(&flat_sea(), &mut body, 0.0, 0.02);

        assert!(!report.in_water);
        assert!(body.forces.is_empty());
        assert!(report.splashes.is_empty());
    }

    #[test]
    fn test_aligned_body_on_flat_sea_gets_no_torque() {
        let mut buoyant = BuoyantBody::new(BuoyancyConfig::default()).unwrap();
        let mut body = TestBody::at(Vec3::new(0.0, -0.3, 0.0));

        let report = buoyant.step(&flat_sea(), &mut body, 0.0, 0.02);

        assert!(body.torques.is_empty());
        assert_eq!(report.stability_torque, Vec3::ZERO);
    }

    #[test]
    fn test_tilted_body_is_righted() {
        let mut buoyant = BuoyantBody::new(BuoyancyConfig::default()).unwrap();
        let mut body = TestBody {
            position: Vec3::new(0.0, -0.3, 0.0),
            rotation: Quat::from_rotation_z(20f32.to_radians()),
            ..Default::default()
        };

        let report = buoyant.step(&flat_sea(), &mut body, 0.0, 0.02);

        assert_eq!(body.torques.len(), 1);
        // Rolled about +z, so the correction is about -z
        assert!(report.stability_torque.z < 0.0);
        assert!((report.stability_torque.length() - 40.0).abs() < 0.05);
    }

    #[test]
    fn test_body_matching_blended_normal_gets_no_torque() {
        let field = WaveField::new(
            WaveFieldConfig::new(0.0)
                .with_component(WaveComponent::new(1.0, 2.0 * PI * 10.0, 0.0, Vec2::X)),
        )
        .unwrap();
        let config = BuoyancyConfig::default();
        let normal = field.normal(Vec2::ZERO, 0.0, config.stability_sample_distance);
        let target = target_up(normal, config.normal_blend);

        let mut buoyant = BuoyantBody::new(config).unwrap();
        let mut body = TestBody {
            position: Vec3::new(0.0, -0.3, 0.0),
            rotation: Quat::from_rotation_arc(Vec3::Y, target),
            ..Default::default()
        };

        let report = buoyant.step(&field, &mut body, 0.0, 0.02);

        assert!(body.torques.is_empty());
        assert_eq!(report.stability_torque, Vec3::ZERO);
    }

    #[test]
    fn test_fast_surface_crossing_splashes() {
        let mut buoyant = single_point_body(20.0, 1.0);
        let mut body = TestBody {
            position: Vec3::new(1.0, -0.1, 2.0),
            linear_velocity: Vec3::new(0.0, -4.0, 0.0),
            ..Default::default()
        };

        let report = buoyant.step(&flat_sea(), &mut body, 0.0, 0.02);

        assert_eq!(report.splashes.len(), 1);
        let splash = report.splashes[0];
        assert_eq!(splash.point_index, 0);
        assert_eq!(splash.position, Vec3::new(1.0, -0.1, 2.0));
        assert_eq!(splash.intensity, 4.0);
        assert!(buoyant.points()[0].splash_cooldown_remaining() > 0.0);
    }

    #[test]
    fn test_no_splash_away_from_surface_or_when_slow() {
        let field = flat_sea();

        let mut deep = single_point_body(20.0, 1.0);
        let mut body = TestBody {
            position: Vec3::new(0.0, -2.0, 0.0),
            linear_velocity: Vec3::new(0.0, 10.0, 0.0),
            ..Default::default()
        };
        assert!(deep.step(&field, &mut body, 0.0, 0.02).splashes.is_empty());

        let mut slow = single_point_body(20.0, 1.0);
        let mut body = TestBody {
            position: Vec3::new(0.0, 0.1, 0.0),
            linear_velocity: Vec3::new(5.0, -1.0, 0.0),
            ..Default::default()
        };
        assert!(slow.step(&field, &mut body, 0.0, 0.02).splashes.is_empty());
    }

    #[test]
    fn test_custom_splash_tuning() {
        let config = BuoyancyConfig::default()
            .with_layout(SampleLayout::Explicit(vec![Vec3::ZERO]))
            .with_splash(5.0, 1.0, 1.5)
            .without_creaks();
        let field = flat_sea();

        // Outside the default band, inside the widened one
        let mut buoyant = BuoyantBody::new(config.clone()).unwrap();
        let mut body = TestBody {
            position: Vec3::new(0.0, -1.0, 0.0),
            linear_velocity: Vec3::new(0.0, 6.0, 0.0),
            ..Default::default()
        };
        assert_eq!(buoyant.step(&field, &mut body, 0.0, 0.02).splashes.len(), 1);
        assert!((buoyant.points()[0].splash_cooldown_remaining() - 0.98).abs() < 1e-5);

        // Fast enough for the default threshold, not for this one
        let mut buoyant = BuoyantBody::new(config).unwrap();
        let mut body = TestBody {
            position: Vec3::new(0.0, -1.0, 0.0),
            linear_velocity: Vec3::new(0.0, 4.0, 0.0),
            ..Default::default()
        };
        assert!(buoyant.step(&field, &mut body, 0.0, 0.02).splashes.is_empty());
    }

    #[test]
    fn test_splashes_are_rate_limited_per_point() {
        let mut buoyant = single_point_body(20.0, 1.0);
        let field = flat_sea();
        let cooldown = buoyant.config().splash_cooldown;
        let delta = 0.02;

        let mut splash_times = Vec::new();
        for step in 0..100 {
            let time = step as f32 * delta;
            let mut body = TestBody {
                position: Vec3::new(0.0, 0.05, 0.0),
                linear_velocity: Vec3::new(0.0, 6.0, 0.0),
                ..Default::default()
            };
            if !buoyant.step(&field, &mut body, time, delta).splashes.is_empty() {
                splash_times.push(time);
            }
        }

        // Two seconds of continuous crossing
        assert!(splash_times.len() >= 2);
        assert!(splash_times.len() as f32 <= 1.0 + 2.0 / cooldown);
        for pair in splash_times.windows(2) {
            assert!(pair[1] - pair[0] >= cooldown - 1e-4);
        }
    }

    #[test]
    fn test_points_splash_independently() {
        let mut buoyant = BuoyantBody::new(
            BuoyancyConfig::default()
                .with_layout(SampleLayout::Explicit(vec![
                    Vec3::new(-1.0, 0.0, 0.0),
                    Vec3::new(1.0, 0.0, 0.0),
                ]))
                .without_creaks(),
        )
        .unwrap();
        let field = flat_sea();

        // Spinning about z: the two ends move vertically in opposite directions
        let mut body = TestBody {
            angular_velocity: Vec3::new(0.0, 0.0, 5.0),
            ..Default::default()
        };
        let report = buoyant.step(&field, &mut body, 0.0, 0.02);
        assert_eq!(report.splashes.len(), 2);
        assert_eq!(report.splashes[0].point_index, 0);
        assert_eq!(report.splashes[1].point_index, 1);

        // Both cooling now
        let report = buoyant.step(&field, &mut body, 0.02, 0.02);
        assert!(report.splashes.is_empty());
    }

    #[test]
    fn test_cooldowns_decay_without_splashes() {
        let mut buoyant = single_point_body(20.0, 1.0);
        let field = flat_sea();
        let mut body = TestBody {
            position: Vec3::new(0.0, 0.0, 0.0),
            linear_velocity: Vec3::new(0.0, -3.0, 0.0),
            ..Default::default()
        };
        assert_eq!(buoyant.step(&field, &mut body, 0.0, 0.1).splashes.len(), 1);

        // Leave the surface; the timer still runs down
        let mut airborne = TestBody::at(Vec3::new(0.0, 5.0, 0.0));
        for step in 1..=3 {
            buoyant.step(&field, &mut airborne, step as f32 * 0.1, 0.1);
        }
        assert_eq!(buoyant.points()[0].splash_cooldown_remaining(), 0.0);
    }

    #[test]
    fn test_wavy_sea_keeps_floating_body_outputs_finite() {
        let field = WaveField::new(WavePreset::Storm.to_config(0.0)).unwrap();
        let mut buoyant = BuoyantBody::new(BuoyancyConfig::default()).unwrap();
        for step in 0..200 {
            let time = step as f32 * 0.02;
            let mut body = TestBody {
                position: Vec3::new(time * 3.0, -0.2, 1.0),
                rotation: Quat::from_rotation_x((time * 2.0).sin() * 0.3),
                linear_velocity: Vec3::new(3.0, (time * 5.0).cos() * 4.0, 0.0),
                angular_velocity: Vec3::new((time * 2.0).cos() * 0.6, 0.0, 0.0),
                ..Default::default()
            };
            let report = buoyant.step(&field, &mut body, time, 0.02);
            assert!(report.buoyancy_force.is_finite());
            assert!(report.stability_torque.is_finite());
            assert!(body.torques.iter().all(|t| t.is_finite()));
        }
    }

    #[test]
    fn test_creak_reported_on_sudden_spin() {
        let mut buoyant = BuoyantBody::new(BuoyancyConfig::default()).unwrap();
        let field = flat_sea();

        let mut calm = TestBody::at(Vec3::new(0.0, -0.2, 0.0));
        assert!(buoyant.step(&field, &mut calm, 0.0, 0.02).creak.is_none());

        let mut jolted = TestBody {
            position: Vec3::new(0.0, -0.2, 0.0),
            angular_velocity: Vec3::new(1.0, 0.0, 0.0),
            ..Default::default()
        };
        let creak = buoyant.step(&field, &mut jolted, 0.02, 0.02).creak;
        assert!(creak.is_some());
    }
}
