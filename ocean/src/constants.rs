/// Fixed physics steps per second.
pub const TICKS_PER_SECOND: u64 = 50;
/// Finite-difference step for surface normals (world units).
pub const DEFAULT_NORMAL_SAMPLE_DISTANCE: f32 = 1.0;
/// Resting water height when nothing else is configured.
pub const SEA_LEVEL: f32 = 0.0;
pub const INVALID_WAVE_FIELD_ERROR: &str = "Invalid wave field configuration";
pub const INVALID_BUOYANCY_ERROR: &str = "Invalid floating body configuration";
