pub mod geo;
pub mod pollutant;
pub mod prediction;

pub use geo::*;
pub use pollutant::*;
pub use prediction::*;
