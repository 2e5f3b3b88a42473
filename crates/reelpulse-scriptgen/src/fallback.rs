//! Deterministic stand-ins used when the backend is unavailable.

use crate::types::{
    EnhancedScene, ImagePromptPlan, ImagePromptRequest, MotionEngine, OptimizedScene, Scene,
    ScriptRequest, TechnicalSettings, VideoScript, VoiceInstructions, VoiceSettings, VoiceoverPlan,
    VoiceoverRequest,
};

const MIN_SCENES: u32 = 3;
const MAX_SCENES: u32 = 8;
const SECONDS_PER_SCENE: u32 = 5;

const EMOTIONS: [&str; 3] = ["calm", "energetic", "inspiring"];
const LIGHTING: [&str; 3] = ["natural", "dramatic", "golden hour"];
const EMPHASIS: [&str; 2] = ["key words", "natural flow"];
const CAMERA_ANGLES: [&str; 2] = ["wide", "close-up"];

const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, watermark, text, worst quality";

/// `clamp(ceil(duration / 5), 3, 8)`
#[must_use]
pub fn scene_count(duration: u32) -> u32 {
    duration
        .div_ceil(SECONDS_PER_SCENE)
        .clamp(MIN_SCENES, MAX_SCENES)
}

/// Canned script of evenly sized scenes.
///
/// Each scene lasts `floor(duration / count)` seconds, so the scenes can add
/// up to less than `duration`.
#[must_use]
pub fn mock_script(request: &ScriptRequest) -> VideoScript {
    let count = scene_count(request.duration);
    let scene_length = request.duration / count;
    let prompt = &request.prompt;
    let style = &request.visual_style;
    let tone = &request.tone;

    let scenes = (0..count as usize)
        .map(|i| {
            let n = i + 1;
            Scene {
                id: format!("scene_{n}"),
                duration: scene_length,
                narration: format!(
                    "Scene {n}: a {tone} look at {prompt}, told in a {style} style that holds \
                     the viewer's attention and gets the message across."
                ),
                visual_description: format!(
                    "{style} cinematography of {prompt}, scene {n}. Professional production with \
                     careful lighting and composition. Cinematic, photorealistic, 8K resolution."
                ),
                voice_instructions: VoiceInstructions {
                    emotion: EMOTIONS[i % 3].to_string(),
                    pace: "medium".to_string(),
                    emphasis: EMPHASIS[i % 2].to_string(),
                    pause: "natural pause points".to_string(),
                },
                visual_elements: [
                    "cinematic lighting",
                    "professional composition",
                    "high quality",
                    "engaging visuals",
                ]
                .map(String::from)
                .to_vec(),
                camera_angle: CAMERA_ANGLES[i % 2].to_string(),
                lighting: LIGHTING[i % 3].to_string(),
            }
        })
        .collect();

    VideoScript {
        title: format!("{prompt} - AI Generated Video"),
        description: format!(
            "A {}-second video about {prompt} with {style} style and {tone} tone",
            request.duration
        ),
        total_duration: request.duration,
        voice_profile: request.voice_profile(),
        scenes,
        motion_engine: Some(MotionEngine {
            recommendation: "AnimateDiff".to_string(),
            reason: "Fallback script; defaulting to the lower-cost engine".to_string(),
        }),
    }
}

/// Narration passed through unchanged with neutral delivery notes.
#[must_use]
pub fn plain_voiceover(request: &VoiceoverRequest) -> VoiceoverPlan {
    VoiceoverPlan {
        optimized_scenes: request
            .scenes
            .iter()
            .map(|scene| OptimizedScene {
                id: scene.id.clone(),
                optimized_narration: scene.narration.clone(),
                pronunciation_guide: String::new(),
                timing_notes: "natural pace".to_string(),
                emotional_cues: if scene.voice_instructions.emotion.is_empty() {
                    "natural".to_string()
                } else {
                    scene.voice_instructions.emotion.clone()
                },
            })
            .collect(),
        total_estimated_duration: request.total_duration,
        voice_settings: VoiceSettings::default(),
    }
}

/// Each scene's visual description with the style and stock quality terms.
#[must_use]
pub fn basic_image_prompts(request: &ImagePromptRequest) -> ImagePromptPlan {
    let style = &request.visual_style;
    ImagePromptPlan {
        enhanced_scenes: request
            .scenes
            .iter()
            .map(|scene| EnhancedScene {
                id: scene.id.clone(),
                positive_prompt: format!(
                    "{}, {style}, cinematic, high quality, 8K, photorealistic",
                    scene.visual_description
                ),
                negative_prompt: NEGATIVE_PROMPT.to_string(),
                style_notes: format!("Maintain {style} consistency"),
                technical_settings: TechnicalSettings::default(),
            })
            .collect(),
        overall_style_guide: format!("Maintain consistent {style} style throughout all scenes"),
    }
}
