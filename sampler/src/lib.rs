// Crate root for the BarVelocity sampler modules.

pub mod app;
pub mod constants;
pub mod display;
pub mod sampling;
pub mod sensor;
pub mod utils;
