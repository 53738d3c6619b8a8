//! Metrics module

mod prometheus;

pub use self::prometheus::*;
