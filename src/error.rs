//! Relay error taxonomy.
//!
//! Every variant is recovered locally: the relay drops the offending event
//! and keeps serving. The only fatal paths are config extraction and port
//! bind at startup, which propagate out of `main`.

use thiserror::Error;

use crate::presence::SessionId;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Private message addressed to a session with no presence record.
    /// Fire-and-forget: the sender is never told.
    #[error("recipient {0} is not joined")]
    UnknownRecipient(SessionId),

    /// Frame that does not decode into a known client event. Dropped at
    /// the protocol boundary without feedback to the sender.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
