//! Service layer between the collectors and the HTTP surface

mod heartbeat_service;
mod storage_metadata_service;

pub use heartbeat_service::*;
pub use storage_metadata_service::*;

#[cfg(test)]
pub(crate) use storage_metadata_service::tests as fixtures;
