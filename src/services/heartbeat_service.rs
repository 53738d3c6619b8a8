//! Liveness message

use chrono::{Local, SecondsFormat};

/// Prefix of every heartbeat message
pub const HEARTBEAT_PREFIX: &str = "System Operational: ";

/// Builds the heartbeat body
#[derive(Debug, Clone, Default)]
pub struct HeartbeatService;

impl HeartbeatService {
    pub fn new() -> Self {
        Self
    }

    /// Prefix followed by the current local time in RFC 3339
    pub fn ping(&self) -> String {
        let now = Local::now().to_rfc3339_opts(SecondsFormat::Nanos, false);
        format!("{}{}", HEARTBEAT_PREFIX, now)
    }
}
