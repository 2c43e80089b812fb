//! Error taxonomy for mention extraction and notification rendering.

use serde::Serialize;

use crate::model::{ActorId, SourceType};

/// Errors raised while resolving a stored notification.
///
/// Only [`NotifyError::ActorNotFound`], [`NotifyError::MalformedPayload`] and
/// [`NotifyError::Lookup`] escape [`crate::NotificationRenderer::render`]. The
/// two source errors are recovered from by rendering a placeholder link.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Acting actor referenced by `from_user_id` does not exist.
    #[error("Actor not found: {actor_id}")]
    ActorNotFound { actor_id: ActorId },
    /// Source entity was deleted after the notification was stored.
    #[error("{source_type} not found: {source_id}")]
    UnresolvedSource {
        source_type: SourceType,
        source_id: u64,
    },
    /// `from_type` outside the recognized set.
    #[error("Unknown source type: {from_type}")]
    UnknownSourceType { from_type: String },
    /// Payload lacks a required field or carries a non-numeric id.
    #[error("Malformed notification payload: missing or invalid '{field}'")]
    MalformedPayload { field: &'static str },
    /// A collaborator failed while answering a lookup.
    #[error("Lookup failed: {0}")]
    Lookup(#[source] anyhow::Error),
}

impl NotifyError {
    /// Status code reported to clients for this error.
    pub fn code(&self) -> u16 {
        match self {
            Self::ActorNotFound { .. } | Self::UnresolvedSource { .. } => 404,
            Self::MalformedPayload { .. } | Self::UnknownSourceType { .. } => 422,
            Self::Lookup(_) => 500,
        }
    }

    /// Whether rendering can continue with a placeholder link.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedSource { .. } | Self::UnknownSourceType { .. }
        )
    }
}

/// Serializable error body for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: u16,
}

impl ErrorResponse {
    /// Builds a response from an error.
    ///
    /// Non-empty `message` overrides the error text. The code comes from a
    /// wrapped [`NotifyError`] and falls back to 500.
    pub fn from_error(error: &anyhow::Error, message: &str) -> Self {
        let message = if message.is_empty() {
            error.to_string()
        } else {
            message.to_string()
        };
        let code = error
            .downcast_ref::<NotifyError>()
            .map(NotifyError::code)
            .unwrap_or(500);

        Self { message, code }
    }
}

/// Logs an error together with its cause chain.
pub fn record_error(error: &anyhow::Error) {
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    tracing::error!(error = %error, causes = ?chain, "Unhandled error");
}
