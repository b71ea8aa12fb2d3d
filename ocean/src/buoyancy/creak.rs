//! Hull strain detection for creaking sounds.

/// Reported when the hull's angular speed changes sharply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Creak {
    /// Change of angular speed over the last step (rad/s)
    pub strain: f32,
}

/// Watches the body's angular speed between steps.
#[derive(Debug, Clone, PartialEq)]
pub struct CreakMonitor {
    threshold: f32,
    interval: f32,
    last_angular_speed: f32,
    since_last_creak: f32,
}

impl CreakMonitor {
    pub fn new(threshold: f32, interval: f32) -> Self {
        Self {
            threshold,
            interval,
            last_angular_speed: 0.0,
            // The first creak does not wait for a full interval
            since_last_creak: interval,
        }
    }

    /// Feed this step's angular speed. At most one creak per `interval` seconds.
    pub fn observe(&mut self, angular_speed: f32, delta: f32) -> Option<Creak> {
        self.since_last_creak += delta;
        let strain = (angular_speed - self.last_angular_speed).abs();
        self.last_angular_speed = angular_speed;

        if self.since_last_creak < self.interval || strain <= self.threshold {
            return None;
        }

        self.since_last_creak = 0.0;
        Some(Creak { strain })
    }
}
