pub mod moving_average;
pub mod registry;

pub mod cycle;
pub mod momentum;
pub mod sentiment;
pub mod valuation;

pub use moving_average::{latest, moving_average, MovingAverage, MovingAverageEngine};
pub use registry::*;
