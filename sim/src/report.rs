use bevy::prelude::*;
use bevy_log::{debug, info};
use ocean::buoyancy::BuoyantBody;
use ocean::physics::{CreakEvent, SplashEvent, WaterContactChanged};

/// Running totals over the whole simulation.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct SimStats {
    pub splashes: usize,
    pub creaks: usize,
    pub contact_changes: usize,
    pub strongest_splash: f32,
}

/// End the run once this much simulated time has elapsed.
#[derive(Resource, Debug, Clone, Copy)]
pub struct StopAfter(pub f32);

#[derive(Resource)]
pub struct StatusTimer(pub Timer);

impl Default for StatusTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(5.0, TimerMode::Repeating))
    }
}

fn display_name(entity: Entity, names: &Query<'_, '_, &Name>) -> String {
    names
        .get(entity)
        .map(|name| name.as_str().to_string())
        .unwrap_or_else(|_| format!("{entity}"))
}

pub fn log_splashes(
    mut events: EventReader<SplashEvent>,
    names: Query<&Name>,
    mut stats: ResMut<SimStats>,
) {
    for ev in events.read() {
        debug!(
            "[{}] splash at point {} ({}), intensity {:.2}",
            display_name(ev.entity, &names),
            ev.splash.point_index,
            ev.splash.position,
            ev.splash.intensity
        );
        stats.splashes += 1;
        stats.strongest_splash = stats.strongest_splash.max(ev.splash.intensity);
    }
}

pub fn log_water_contact(
    mut events: EventReader<WaterContactChanged>,
    names: Query<&Name>,
    mut stats: ResMut<SimStats>,
) {
    for ev in events.read() {
        let name = display_name(ev.entity, &names);
        if ev.in_water {
            info!("[{name}] entered the water");
        } else {
            info!("[{name}] left the water");
        }
        stats.contact_changes += 1;
    }
}

pub fn log_creaks(
    mut events: EventReader<CreakEvent>,
    names: Query<&Name>,
    mut stats: ResMut<SimStats>,
) {
    for ev in events.read() {
        debug!(
            "[{}] hull creaks (strain {:.2} rad/s)",
            display_name(ev.entity, &names),
            ev.strain
        );
        stats.creaks += 1;
    }
}

pub fn log_status(
    time: Res<Time>,
    mut timer: ResMut<StatusTimer>,
    boats: Query<(&Name, &Transform, &BuoyantBody)>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    for (name, transform, buoyant) in boats.iter() {
        info!(
            "[{}] t={:.1}s position {} tilt {:.1}° {}",
            name,
            time.elapsed_secs(),
            transform.translation,
            transform.up().angle_between(Vec3::Y).to_degrees(),
            if buoyant.is_in_water() { "afloat" } else { "airborne" }
        );
    }
}

pub fn stop_after(
    time: Res<Time>,
    stop: Res<StopAfter>,
    stats: Res<SimStats>,
    mut exit: EventWriter<AppExit>,
) {
    if time.elapsed_secs() < stop.0 {
        return;
    }

    info!(
        "Simulated {:.1}s: {} splashes (strongest {:.2}), {} creaks, {} water contact changes",
        time.elapsed_secs(),
        stats.splashes,
        stats.strongest_splash,
        stats.creaks,
        stats.contact_changes
    );
    exit.write(AppExit::Success);
}

pub fn register_systems(app: &mut App) {
    app.init_resource::<SimStats>();
    app.init_resource::<StatusTimer>();

    app.add_systems(
        Update,
        (
            log_splashes,
            log_water_contact,
            log_creaks,
            log_status,
            stop_after,
        )
            .chain(),
    );
}
