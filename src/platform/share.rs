//! Share capability: hands a named image attachment to a platform share
//! target.

use std::sync::Mutex;

use crate::error::Result;

/// The attachment and accompanying text handed to a share target.
#[derive(Debug, Clone)]
pub struct SharePayload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    pub title: String,
    pub text: String,
}

/// A platform share surface (OS share sheet or equivalent).
///
/// Implementations may block for as long as the user keeps the share UI
/// open; the dispatcher invokes them off the async scheduler.
pub trait ShareTarget: Send + Sync {
    fn share(&self, payload: SharePayload) -> Result<()>;
}

/// Records shared payloads in memory for tests.
#[derive(Default)]
pub struct MemoryShareTarget {
    shared: Mutex<Vec<SharePayload>>,
}

impl MemoryShareTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every payload shared so far.
    pub fn shared(&self) -> Vec<SharePayload> {
        self.shared.lock().unwrap().clone()
    }
}

impl ShareTarget for MemoryShareTarget {
    fn share(&self, payload: SharePayload) -> Result<()> {
        self.shared.lock().unwrap().push(payload);
        Ok(())
    }
}
