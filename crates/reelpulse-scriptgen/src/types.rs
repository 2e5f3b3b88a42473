//! Script, voiceover, and image-prompt shapes.
//!
//! Field names follow the camelCase JSON the completion backend is asked to
//! produce. Most fields default when absent or `null` so a partially filled
//! response still parses; `scenes` is the exception. Durations accept any
//! number and are rounded to whole seconds.

use reelpulse_core::wire;
use serde::{Deserialize, Serialize};

pub const DEFAULT_VOICE_GENDER: &str = "Female";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_ACCENT: &str = "American";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoScript {
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "wire::seconds")]
    pub total_duration: u32,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub voice_profile: VoiceProfile,
    pub scenes: Vec<Scene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_engine: Option<MotionEngine>,
}

impl VideoScript {
    /// Position of the scene with `scene_id`, if present.
    #[must_use]
    pub fn scene_index(&self, scene_id: &str) -> Option<usize> {
        self.scenes.iter().position(|scene| scene.id == scene_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceProfile {
    pub gender: String,
    pub language: String,
    pub accent: String,
    pub tone: String,
    pub pace: String,
    pub emphasis: String,
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self {
            gender: DEFAULT_VOICE_GENDER.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
            tone: String::new(),
            pace: "medium".to_string(),
            emphasis: "natural".to_string(),
        }
    }
}

/// One timed segment of a script. Replaced only as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scene {
    #[serde(deserialize_with = "wire::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "wire::seconds")]
    pub duration: u32,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub narration: String,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub visual_description: String,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub voice_instructions: VoiceInstructions,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub visual_elements: Vec<String>,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub camera_angle: String,
    #[serde(deserialize_with = "wire::null_as_default")]
    pub lighting: String,
}

/// Delivery notes for one scene. The default is what a scene gets when the
/// backend leaves the block out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceInstructions {
    pub emotion: String,
    pub pace: String,
    pub emphasis: String,
    pub pause: String,
}

impl Default for VoiceInstructions {
    fn default() -> Self {
        Self {
            emotion: "natural".to_string(),
            pace: "medium".to_string(),
            emphasis: String::new(),
            pause: "natural".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionEngine {
    pub recommendation: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceoverPlan {
    pub optimized_scenes: Vec<OptimizedScene>,
    #[serde(deserialize_with = "wire::seconds")]
    pub total_estimated_duration: u32,
    pub voice_settings: VoiceSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizedScene {
    pub id: String,
    pub optimized_narration: String,
    pub pronunciation_guide: String,
    pub timing_notes: String,
    pub emotional_cues: String,
}

/// Synthesis settings handed to the voice engine. Snake case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
    pub style: f64,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.75,
            similarity_boost: 0.8,
            style: 0.6,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImagePromptPlan {
    pub enhanced_scenes: Vec<EnhancedScene>,
    pub overall_style_guide: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhancedScene {
    pub id: String,
    pub positive_prompt: String,
    pub negative_prompt: String,
    pub style_notes: String,
    pub technical_settings: TechnicalSettings,
}

/// Image generation parameters. Snake case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalSettings {
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub guidance_scale: f64,
}

impl Default for TechnicalSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            steps: 30,
            guidance_scale: 7.5,
        }
    }
}

/// Input to [`crate::ScriptGenerationService::generate_video_script`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    pub prompt: String,
    /// Target length in seconds.
    pub duration: u32,
    pub visual_style: String,
    pub tone: String,
    #[serde(default)]
    pub voice_gender: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub accent: Option<String>,
}

impl ScriptRequest {
    #[must_use]
    pub fn voice_gender(&self) -> &str {
        self.voice_gender.as_deref().unwrap_or(DEFAULT_VOICE_GENDER)
    }

    #[must_use]
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    #[must_use]
    pub fn accent(&self) -> &str {
        self.accent.as_deref().unwrap_or(DEFAULT_ACCENT)
    }

    /// Voice profile implied by the request, as the fallback script uses it.
    #[must_use]
    pub fn voice_profile(&self) -> VoiceProfile {
        VoiceProfile {
            gender: self.voice_gender().to_string(),
            language: self.language().to_string(),
            accent: self.accent().to_string(),
            tone: self.tone.clone(),
            ..VoiceProfile::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceoverRequest {
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub voice_profile: VoiceProfile,
    pub total_duration: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePromptRequest {
    pub scenes: Vec<Scene>,
    pub visual_style: String,
    #[serde(default)]
    pub overall_theme: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    pub original_prompt: String,
    pub scene_id: String,
    pub visual_style: String,
    pub tone: String,
    pub current_script: VideoScript,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_request_applies_voice_defaults() {
        let request: ScriptRequest = serde_json::from_value(serde_json::json!({
            "prompt": "tide pools",
            "duration": 20,
            "visualStyle": "documentary",
            "tone": "curious",
            "accent": "British"
        }))
        .expect("parse request");

        let profile = request.voice_profile();
        assert_eq!(profile.gender, "Female");
        assert_eq!(profile.language, "English");
        assert_eq!(profile.accent, "British");
        assert_eq!(profile.tone, "curious");
        assert_eq!(profile.pace, "medium");
    }

    #[test]
    fn scene_without_voice_block_gets_default_instructions() {
        let scene: Scene = serde_json::from_value(serde_json::json!({
            "id": "scene_2",
            "duration": 5,
            "narration": "Waves roll in."
        }))
        .expect("parse scene");

        assert_eq!(scene.voice_instructions, VoiceInstructions::default());
        assert_eq!(scene.voice_instructions.emotion, "natural");
        assert!(scene.visual_elements.is_empty());
    }

    #[test]
    fn script_without_scenes_is_rejected() {
        let result = serde_json::from_value::<VideoScript>(serde_json::json!({
            "title": "Untitled"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn settings_keep_snake_case_on_the_wire() {
        let json = serde_json::to_value(VoiceoverPlan::default()).expect("serialize");
        assert_eq!(json["voiceSettings"]["similarity_boost"], 0.8);

        let json = serde_json::to_value(EnhancedScene::default()).expect("serialize");
        assert_eq!(json["technicalSettings"]["guidance_scale"], 7.5);
    }

    #[test]
    fn scene_index_finds_by_id() {
        let script = VideoScript {
            title: String::new(),
            description: String::new(),
            total_duration: 10,
            voice_profile: VoiceProfile::default(),
            scenes: vec![
                Scene {
                    id: "scene_1".to_string(),
                    ..Scene::default()
                },
                Scene {
                    id: "scene_2".to_string(),
                    ..Scene::default()
                },
            ],
            motion_engine: None,
        };
        assert_eq!(script.scene_index("scene_2"), Some(1));
        assert_eq!(script.scene_index("scene_9"), None);
    }
}
