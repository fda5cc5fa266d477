//! Service layer: prediction orchestration and the supporting directories
//! and policies served over HTTP.

pub mod cities;
pub mod fallback;
pub mod heatmap;
pub mod history;
pub mod normalizer;
pub mod prediction;
pub mod stations;

pub use normalizer::PredictionNormalizer;
pub use prediction::{PredictionOutcome, PredictionService};
