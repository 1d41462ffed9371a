//! Caller session identity forwarded to the recommendation service.

use serde::{Deserialize, Serialize};

/// Identity of a logged-in caller.
///
/// Anonymous requests carry no session at all (`Option<SessionContext>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Stable identifier of the browsing session.
    pub session_uuid: String,
    /// Opaque user identifier from the identity provider.
    pub aai_id: String,
}

impl SessionContext {
    /// Create a session context.
    pub fn new(session_uuid: impl Into<String>, aai_id: impl Into<String>) -> Self {
        Self {
            session_uuid: session_uuid.into(),
            aai_id: aai_id.into(),
        }
    }
}
