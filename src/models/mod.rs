//! Data models for the storage collector
//!
//! Platform-independent shapes shared by the collectors, the normalizer
//! and the HTTP layer.

mod drive;
mod report;
mod error;

pub use drive::*;
pub use report::*;
pub use error::*;
