pub mod rapier;

pub use rapier::{
    float_bodies, wobble_boats, CreakEvent, FloatingBodyBundle, FloatingPlugin, Ocean,
    RapierFloater, SplashEvent, WaterContactChanged, WobbleAnchor,
};
