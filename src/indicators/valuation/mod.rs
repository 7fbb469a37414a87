//! Price relative to a long baseline average.

pub mod mayer;
pub mod rainbow;

pub use mayer::{MayerMultiple, MayerState};
pub use rainbow::{Rainbow, RainbowBand};
