//! Video script drafting over a chat-completion backend.
//!
//! [`ScriptGenerationService`] wraps any [`CompletionBackend`] (in production
//! an [`OpenAiClient`]) behind four operations: full script generation,
//! voiceover optimization, image-prompt enhancement, and single-scene
//! regeneration. The first three degrade to deterministic local output when
//! the backend fails.

pub mod backend;
pub mod error;
pub mod fallback;
pub mod openai;
pub mod outcome;
pub mod service;
pub mod types;

mod prompts;

pub use backend::{CompletionBackend, CompletionRequest};
pub use error::ScriptGenError;
pub use openai::OpenAiClient;
pub use outcome::{Generated, Source};
pub use service::ScriptGenerationService;
pub use types::{
    EnhancedScene, ImagePromptPlan, ImagePromptRequest, MotionEngine, OptimizedScene,
    RegenerateRequest, Scene, ScriptRequest, TechnicalSettings, VideoScript, VoiceInstructions,
    VoiceProfile, VoiceSettings, VoiceoverPlan, VoiceoverRequest,
};
