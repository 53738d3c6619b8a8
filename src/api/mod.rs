//! HTTP API for the service
//!
//! Liveness and storage-metadata routes served by Actix-Web.

mod rest;
mod health;
mod responses;

pub use rest::*;
pub use health::*;
pub use responses::*;
