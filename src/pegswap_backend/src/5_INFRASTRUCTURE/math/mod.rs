//! Math layer - pure, deterministic, side-effect free

pub mod pure_math;

pub use pure_math::{convert_precision, nat_to_u128, u128_to_nat};
