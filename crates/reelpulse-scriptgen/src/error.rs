use thiserror::Error;

/// Errors raised while talking to the completion backend.
///
/// Only [`ScriptGenError::MissingApiKey`], [`ScriptGenError::SceneNotFound`]
/// and [`ScriptGenError::Regeneration`] ever reach a caller of
/// [`crate::ScriptGenerationService`]; everything else is absorbed by a
/// fallback and reported through [`crate::Generated::Fallback`].
#[derive(Debug, Error)]
pub enum ScriptGenError {
    /// `OPENAI_API_KEY` is unset or blank.
    #[error("OpenAI API key is not configured; set OPENAI_API_KEY")]
    MissingApiKey,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion API answered with a non-2xx status.
    #[error("completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// A response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request payload could not be encoded for the prompt.
    #[error("failed to encode prompt payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The completion carried no message content, or a script with no scenes.
    #[error("completion response contained no usable content")]
    EmptyCompletion,

    #[error("scene not found: {scene_id}")]
    SceneNotFound { scene_id: String },

    /// Regenerating a scene failed after the scene was located.
    #[error("failed to regenerate scene {scene_id}: {source}")]
    Regeneration {
        scene_id: String,
        #[source]
        source: Box<ScriptGenError>,
    },
}
