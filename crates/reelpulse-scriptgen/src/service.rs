//! The four script operations over an injected completion backend.

use reelpulse_core::wire;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::backend::{CompletionBackend, CompletionRequest};
use crate::error::ScriptGenError;
use crate::fallback;
use crate::outcome::Generated;
use crate::prompts;
use crate::types::{
    ImagePromptPlan, ImagePromptRequest, RegenerateRequest, Scene, ScriptRequest, VideoScript,
    VoiceInstructions, VoiceoverPlan, VoiceoverRequest,
};

/// Drafts scripts, voiceover notes, and image prompts.
///
/// Generation calls never fail: when the backend errors or returns something
/// unparseable, a deterministic local substitute is returned as
/// [`Generated::Fallback`]. Scene regeneration is the exception and returns
/// its error to the caller.
#[derive(Debug)]
pub struct ScriptGenerationService<B> {
    backend: B,
}

/// Shape the backend is asked to return for a regenerated scene.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegeneratedScene {
    #[serde(default, deserialize_with = "wire::optional_seconds")]
    duration: Option<u32>,
    narration: String,
    #[serde(default, alias = "visualDescription")]
    description: Option<String>,
    #[serde(default)]
    emotion: Option<String>,
    #[serde(default)]
    visual_elements: Option<Vec<String>>,
    #[serde(default)]
    camera_angle: Option<String>,
    #[serde(default)]
    lighting: Option<String>,
}

impl<B: CompletionBackend> ScriptGenerationService<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Draft a full script with scenes and delivery notes.
    pub async fn generate_video_script(&self, request: &ScriptRequest) -> Generated<VideoScript> {
        tracing::info!(
            duration = request.duration,
            style = %request.visual_style,
            "generating video script"
        );

        let result = self
            .complete_json::<VideoScript>(prompts::script_request(request), "video script")
            .await
            .and_then(normalize_script);

        match result {
            Ok(script) => {
                tracing::info!(title = %script.title, scenes = script.scenes.len(), "video script generated");
                Generated::Remote(script)
            }
            Err(e) => {
                tracing::warn!(error = %e, "script generation failed; using fallback script");
                Generated::Fallback {
                    data: fallback::mock_script(request),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Rewrite narration for voice synthesis.
    pub async fn generate_voiceover_text(
        &self,
        request: &VoiceoverRequest,
    ) -> Generated<VoiceoverPlan> {
        tracing::info!(scenes = request.scenes.len(), "optimizing voiceover");

        let result = match prompts::voiceover_request(request) {
            Ok(completion) => self.complete_json::<VoiceoverPlan>(completion, "voiceover").await,
            Err(e) => Err(e),
        };

        match result {
            Ok(plan) => Generated::Remote(plan),
            Err(e) => {
                tracing::warn!(error = %e, "voiceover optimization failed; echoing narration");
                Generated::Fallback {
                    data: fallback::plain_voiceover(request),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Turn scene descriptions into image-model prompts.
    pub async fn generate_scene_image_prompts(
        &self,
        request: &ImagePromptRequest,
    ) -> Generated<ImagePromptPlan> {
        tracing::info!(
            scenes = request.scenes.len(),
            style = %request.visual_style,
            "generating scene image prompts"
        );

        let result = match prompts::image_prompt_request(request) {
            Ok(completion) => {
                self.complete_json::<ImagePromptPlan>(completion, "image prompts")
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(plan) => Generated::Remote(plan),
            Err(e) => {
                tracing::warn!(error = %e, "image prompt generation failed; using basic prompts");
                Generated::Fallback {
                    data: fallback::basic_image_prompts(request),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Replace one scene, keeping its id and the narrative around it.
    ///
    /// # Errors
    ///
    /// - [`ScriptGenError::SceneNotFound`] if `scene_id` is not in the
    ///   script. The backend is not called.
    /// - [`ScriptGenError::Regeneration`] wrapping the backend or parse
    ///   failure otherwise.
    pub async fn regenerate_scene(&self, request: &RegenerateRequest) -> Result<Scene, ScriptGenError> {
        let scene_id = request.scene_id.as_str();
        let Some(index) = request.current_script.scene_index(scene_id) else {
            tracing::warn!(scene_id, "scene not found for regeneration");
            return Err(ScriptGenError::SceneNotFound {
                scene_id: scene_id.to_string(),
            });
        };
        let original = &request.current_script.scenes[index];

        tracing::info!(scene_id, "regenerating scene");
        let completion = prompts::regenerate_request(request, index);

        match self
            .complete_json::<RegeneratedScene>(completion, "regenerated scene")
            .await
        {
            Ok(regenerated) => {
                tracing::info!(scene_id, "scene regenerated");
                Ok(merge_scene(original, regenerated))
            }
            Err(e) => {
                tracing::error!(scene_id, error = %e, "scene regeneration failed");
                Err(ScriptGenError::Regeneration {
                    scene_id: scene_id.to_string(),
                    source: Box::new(e),
                })
            }
        }
    }

    async fn complete_json<T: DeserializeOwned>(
        &self,
        request: CompletionRequest,
        context: &str,
    ) -> Result<T, ScriptGenError> {
        let content = self.backend.complete(request).await?;
        serde_json::from_str(content.trim()).map_err(|e| ScriptGenError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Number any scene the backend left without an id. Missing delivery notes
/// already defaulted during parsing.
fn normalize_script(mut script: VideoScript) -> Result<VideoScript, ScriptGenError> {
    if script.scenes.is_empty() {
        return Err(ScriptGenError::EmptyCompletion);
    }
    for (i, scene) in script.scenes.iter_mut().enumerate() {
        if scene.id.trim().is_empty() {
            scene.id = format!("scene_{}", i + 1);
        }
    }
    Ok(script)
}

/// The regenerated scene always keeps the original id. Anything the backend
/// omitted is carried over from the original.
fn merge_scene(original: &Scene, regenerated: RegeneratedScene) -> Scene {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    Scene {
        id: original.id.clone(),
        duration: regenerated.duration.unwrap_or(original.duration),
        narration: regenerated.narration,
        visual_description: non_empty(regenerated.description)
            .unwrap_or_else(|| original.visual_description.clone()),
        voice_instructions: VoiceInstructions {
            emotion: non_empty(regenerated.emotion)
                .unwrap_or_else(|| original.voice_instructions.emotion.clone()),
            ..original.voice_instructions.clone()
        },
        visual_elements: regenerated
            .visual_elements
            .filter(|elements| !elements.is_empty())
            .unwrap_or_else(|| original.visual_elements.clone()),
        camera_angle: non_empty(regenerated.camera_angle)
            .unwrap_or_else(|| original.camera_angle.clone()),
        lighting: non_empty(regenerated.lighting).unwrap_or_else(|| original.lighting.clone()),
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
