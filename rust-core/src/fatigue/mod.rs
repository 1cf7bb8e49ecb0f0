//! Fatigue damage accumulation

pub mod basquin;
pub mod rainflow;
pub mod special;

pub use basquin::FatigueLaw;
pub use rainflow::{Cycle, extract_cycles};
pub use special::{gamma, trapezoid};
