//! Request correlation
//!
//! A comparison request (opening a change-request review, a version diff, a
//! CLI invocation) gets one `RequestId`; log events and errors raised while
//! serving it carry that id.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single comparison request (UUIDv7, time-ordered)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-request context: the id plus the moment the request started.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    started_at: Instant,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            started_at: Instant::now(),
        }
    }

    /// Milliseconds since the request started, for `duration_ms` log fields
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
