//! Seam between the service and whatever produces completions.

use std::future::Future;

use crate::error::ScriptGenError;

/// One chat completion: a system instruction block plus a user message.
///
/// Every request asks for a JSON object response.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Anything that can turn a [`CompletionRequest`] into raw message text.
pub trait CompletionBackend: Send + Sync {
    /// Run one completion and return the assistant message content.
    ///
    /// # Errors
    ///
    /// Implementations return a [`ScriptGenError`] on transport failure,
    /// non-success status, or a response with no content.
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<String, ScriptGenError>> + Send;
}
