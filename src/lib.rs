pub mod batch;
pub mod config;
pub mod error;
pub mod estimator;
pub mod feature;
pub mod footprint;
pub mod math;
pub mod mesh;
pub mod sample;

pub use error::{LofterError, Result};
