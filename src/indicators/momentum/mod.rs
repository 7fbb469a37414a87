pub mod rsi;

pub use rsi::{wilder_rsi, Rsi, RsiState};
