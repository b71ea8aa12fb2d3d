//! Procedural ocean surface.
//!
//! The surface is a sum of traveling sine waves scaled by a global storm
//! intensity:
//!
//! ```text
//! height(x, z, t) = base_level + intensity * Σ amplitude_i * sin(k_i * (d_i · (x, z)) - speed_i * t)
//! k_i             = 2π / wavelength_i
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use ocean::water::{WaveField, WavePreset};
//!
//! let field = WaveField::new(WavePreset::Ocean.to_config(0.0)).unwrap();
//! let height = field.height(10.0, 5.0, 0.5);
//! assert!(height.abs() <= field.max_displacement());
//! ```

pub mod config;
pub mod field;

pub use config::{WaveComponent, WaveFieldConfig, WavePreset};
pub use field::WaveField;
