use bevy::math::Vec3;

/// Refractory state of a sample point's splash detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplashGate {
    /// Ready to emit
    Armed,
    /// Silent for the remaining seconds
    Cooling(f32),
}

/// What a sample point saw of the water this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub world_position: Vec3,
    pub water_height: f32,
    /// Positive below the surface, negative above it
    pub depth: f32,
}

impl Probe {
    #[inline]
    pub fn is_submerged(&self) -> bool {
        self.depth > 0.0
    }
}

/// Body-relative probe used to approximate distributed buoyancy.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePoint {
    pub local_offset: Vec3,
    /// Set during the step, `None` when the position could not be resolved
    pub(crate) probe: Option<Probe>,
    pub(crate) splash_cooldown: f32,
}

impl SamplePoint {
    pub fn new(local_offset: Vec3) -> Self {
        Self {
            local_offset,
            probe: None,
            splash_cooldown: 0.0,
        }
    }

    /// Last probe, if the point was resolved in the latest step.
    pub fn probe(&self) -> Option<&Probe> {
        self.probe.as_ref()
    }

    /// Submersion depth from the latest step.
    pub fn depth(&self) -> Option<f32> {
        self.probe.map(|p| p.depth)
    }

    pub fn splash_cooldown_remaining(&self) -> f32 {
        self.splash_cooldown
    }

    pub fn splash_gate(&self) -> SplashGate {
        if self.splash_cooldown > 0.0 {
            SplashGate::Cooling(self.splash_cooldown)
        } else {
            SplashGate::Armed
        }
    }

    pub(crate) fn start_cooldown(&mut self, seconds: f32) {
        self.splash_cooldown = seconds;
    }

    pub(crate) fn tick_cooldown(&mut self, delta: f32) {
        self.splash_cooldown = (self.splash_cooldown - delta).max(0.0);
    }
}

/// Four corner sample points of a `2 * half_width` by `2 * half_length` hull.
///
/// Order: front-left, front-right, back-left, back-right (front is +z).
pub fn default_footprint(half_width: f32, half_length: f32) -> [SamplePoint; 4] {
    [
        SamplePoint::new(Vec3::new(-half_width, 0.0, half_length)),
        SamplePoint::new(Vec3::new(half_width, 0.0, half_length)),
        SamplePoint::new(Vec3::new(-half_width, 0.0, -half_length)),
        SamplePoint::new(Vec3::new(half_width, 0.0, -half_length)),
    ]
}
