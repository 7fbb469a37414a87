//! Long-horizon cycle indicators built on multi-hundred-day averages.

pub mod golden_ratio;
pub mod pi_cycle;
pub mod two_year_ma;

pub use golden_ratio::{GoldenRatio, GoldenRatioState};
pub use pi_cycle::{PiCycle, PiCycleState};
pub use two_year_ma::{TwoYearMa, TwoYearMaState};
