//! AQI computation: breakpoint tables, the sub-index calculator, and the
//! category scales.

pub mod breakpoints;
pub mod calculator;
pub mod category;

pub use breakpoints::{BreakpointRange, BreakpointTable};
pub use calculator::{aggregate, compute, compute_reading, AqiResult, AQI_MAX};
pub use category::{classify, classify_standard, AqiCategory, CategoryScale};
