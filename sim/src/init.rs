use crate::report::{self, StopAfter};
use crate::scenario::{Scenario, ScenarioError};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_app::ScheduleRunnerPlugin;
use bevy_log::{error, info};
use bevy_rapier3d::prelude::{NoUserData, RapierPhysicsPlugin};
use ocean::physics::FloatingPlugin;
use ocean::{INVALID_BUOYANCY_ERROR, INVALID_WAVE_FIELD_ERROR};
use std::time::Duration;

/// How the simulation clock runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimSettings {
    pub ticks_per_second: u64,
    /// Simulated seconds before the run ends
    pub seconds: f32,
    /// Pace ticks against the wall clock instead of running flat out
    pub realtime: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            ticks_per_second: ocean::TICKS_PER_SECOND,
            seconds: 30.0,
            realtime: false,
        }
    }
}

impl SimSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second as f64)
    }
}

/// Set up a headless app for a scenario. Fails if the scenario is invalid.
pub fn build_app(app: &mut App, scenario: &Scenario, settings: SimSettings) -> Result<(), AppExit> {
    let built = match scenario.build() {
        Ok(built) => built,
        Err(err) => {
            let context = match err {
                ScenarioError::Sea(_) => INVALID_WAVE_FIELD_ERROR,
                ScenarioError::Boat { .. } => INVALID_BUOYANCY_ERROR,
            };
            error!("{}: {}", context, err);
            return Err(AppExit::error());
        }
    };

    let loop_wait = if settings.realtime {
        settings.tick()
    } else {
        Duration::ZERO
    };
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(loop_wait)));
    app.add_plugins(TransformPlugin);

    // Every update advances exactly one fixed step so runs are reproducible.
    if !settings.realtime {
        app.insert_resource(TimeUpdateStrategy::ManualDuration(settings.tick()));
    }
    app.insert_resource(Time::<Fixed>::from_hz(settings.ticks_per_second as f64));

    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
    app.add_plugins(FloatingPlugin::new(built.field.clone()));

    app.insert_resource(StopAfter(settings.seconds));
    report::register_systems(app);

    info!(
        "Simulating {} boat(s) and {} moored boat(s) for {:.1}s at {} ticks per second",
        built.boats.len(),
        built.moored.len(),
        settings.seconds,
        settings.ticks_per_second
    );

    built.spawn(app.world_mut());

    Ok(())
}

pub fn init(scenario: Scenario, settings: SimSettings) -> AppExit {
    let mut app = App::new();
    app.add_plugins(bevy_log::LogPlugin::default());

    if let Err(exit) = build_app(&mut app, &scenario, settings) {
        return exit;
    }

    app.run()
}
