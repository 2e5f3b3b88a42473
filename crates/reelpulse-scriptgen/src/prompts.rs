//! Instruction blocks sent to the completion backend.
//!
//! Each block describes the exact JSON object the backend must return. The
//! sampling parameters for each operation live next to its prompt.

use crate::backend::CompletionRequest;
use crate::error::ScriptGenError;
use crate::types::{ImagePromptRequest, RegenerateRequest, Scene, ScriptRequest, VoiceoverRequest};

const SCRIPT_TEMPERATURE: f32 = 0.8;
const SCRIPT_MAX_TOKENS: u32 = 3000;
const VOICEOVER_TEMPERATURE: f32 = 0.3;
const VOICEOVER_MAX_TOKENS: u32 = 2000;
const IMAGE_PROMPT_TEMPERATURE: f32 = 0.7;
const IMAGE_PROMPT_MAX_TOKENS: u32 = 2500;
const REGENERATE_TEMPERATURE: f32 = 0.9;
const REGENERATE_MAX_TOKENS: u32 = 500;

pub(crate) fn script_request(request: &ScriptRequest) -> CompletionRequest {
    let duration = request.duration;
    let style = &request.visual_style;
    let tone = &request.tone;
    let gender = request.voice_gender();
    let language = request.language();
    let accent = request.accent();

    let system = format!(
        r#"You are a video scriptwriter who prepares scripts for an automated production pipeline. The script you write drives AI image generation for every scene, AI voiceover synthesis, and final video assembly.

Requirements:
- Total duration: {duration} seconds
- Visual style: {style}
- Tone: {tone}
- Voice: {gender} voice, {accent} accent, speaking {language}
- Split the video into 3 to 8 scenes depending on duration, each 3 to 8 seconds long
- Give every scene a visual description detailed enough for image generation
- Write narration that reads naturally aloud and include delivery instructions

Respond with a single JSON object in exactly this shape:
{{
  "title": "Video title",
  "description": "One or two sentence summary",
  "totalDuration": {duration},
  "voiceProfile": {{
    "gender": "{gender}",
    "language": "{language}",
    "accent": "{accent}",
    "tone": "{tone}",
    "pace": "medium",
    "emphasis": "natural"
  }},
  "scenes": [
    {{
      "id": "scene_1",
      "duration": 5,
      "narration": "Narration for this scene",
      "visualDescription": "Detailed cinematic description for image generation",
      "voiceInstructions": {{
        "emotion": "calm | energetic | dramatic | inspiring",
        "pace": "slow | medium | fast",
        "emphasis": "words to stress",
        "pause": "where to pause"
      }},
      "visualElements": ["element", "element", "element"],
      "cameraAngle": "wide | close-up | medium | aerial",
      "lighting": "natural | dramatic | soft | golden hour"
    }}
  ],
  "motionEngine": {{
    "recommendation": "RunwayGen2 | AnimateDiff",
    "reason": "Why this engine suits the scenes"
  }}
}}"#
    );

    CompletionRequest {
        system,
        user: format!("Write a complete video production script about: {}", request.prompt),
        temperature: SCRIPT_TEMPERATURE,
        max_tokens: SCRIPT_MAX_TOKENS,
    }
}

pub(crate) fn voiceover_request(
    request: &VoiceoverRequest,
) -> Result<CompletionRequest, ScriptGenError> {
    let total = request.total_duration;
    let profile = &request.voice_profile;

    let system = format!(
        r#"You prepare narration for AI voice synthesis. Rewrite each scene's narration so it sounds natural when spoken.

Requirements:
- Pace the narration to fit {total} seconds in total
- Voice: {gender} voice, {accent} accent, speaking {language}
- Tone: {tone}
- Mark pauses and emphasis, and note pronunciation for unusual words
- Keep transitions between scenes smooth and the emotion consistent

Respond with a single JSON object in exactly this shape:
{{
  "optimizedScenes": [
    {{
      "id": "scene_1",
      "optimizedNarration": "Narration with (pause) and *emphasis* markers",
      "pronunciationGuide": "word: pronunciation",
      "timingNotes": "Where to speed up or slow down",
      "emotionalCues": "Emotional direction for this scene"
    }}
  ],
  "totalEstimatedDuration": {total},
  "voiceSettings": {{
    "stability": 0.75,
    "similarity_boost": 0.8,
    "style": 0.6
  }}
}}"#,
        gender = profile.gender,
        accent = profile.accent,
        language = profile.language,
        tone = profile.tone,
    );

    Ok(CompletionRequest {
        system,
        user: format!("Optimize the voiceover for these scenes: {}", encode_scenes(&request.scenes)?),
        temperature: VOICEOVER_TEMPERATURE,
        max_tokens: VOICEOVER_MAX_TOKENS,
    })
}

pub(crate) fn image_prompt_request(
    request: &ImagePromptRequest,
) -> Result<CompletionRequest, ScriptGenError> {
    let style = &request.visual_style;
    let theme = &request.overall_theme;

    let system = format!(
        r#"You write prompts for diffusion image models such as SDXL. Produce one detailed prompt per scene.

Requirements:
- Visual style: {style}
- Overall theme: {theme}
- 50 to 100 words per prompt, including technical and compositional detail
- A negative prompt listing what to avoid
- Keep every scene visually consistent with the others

Respond with a single JSON object in exactly this shape:
{{
  "enhancedScenes": [
    {{
      "id": "scene_1",
      "positivePrompt": "Detailed prompt with style specifications",
      "negativePrompt": "Things to avoid",
      "styleNotes": "Consistency notes",
      "technicalSettings": {{
        "width": 1024,
        "height": 1024,
        "steps": 30,
        "guidance_scale": 7.5
      }}
    }}
  ],
  "overallStyleGuide": "Guidelines that apply to every scene"
}}"#
    );

    Ok(CompletionRequest {
        system,
        user: format!("Write image prompts for these scenes: {}", encode_scenes(&request.scenes)?),
        temperature: IMAGE_PROMPT_TEMPERATURE,
        max_tokens: IMAGE_PROMPT_MAX_TOKENS,
    })
}

/// `index` must point at an existing scene in `request.current_script`.
pub(crate) fn regenerate_request(request: &RegenerateRequest, index: usize) -> CompletionRequest {
    let scenes = &request.current_script.scenes;
    let current = &scenes[index];
    let before = index
        .checked_sub(1)
        .and_then(|i| scenes.get(i))
        .map_or_else(|| "This is the first scene.".to_string(), |s| {
            format!("Previous scene: \"{}\"", s.narration)
        });
    let after = scenes
        .get(index + 1)
        .map_or_else(|| "This is the last scene.".to_string(), |s| {
            format!("Next scene: \"{}\"", s.narration)
        });

    let system = format!(
        r#"You are rewriting one scene of an existing video script.

Video concept: {concept}
Visual style: {style}
Tone: {tone}
Scene duration: {duration} seconds

Context:
{before}
Scene to rewrite: "{narration}"
{after}

Write a fresh version of this scene that flows from the previous scene into the next, keeps the same duration of {duration} seconds, and matches the style and tone.

Respond with a single JSON object in exactly this shape:
{{
  "id": "{id}",
  "duration": {duration},
  "narration": "New narration",
  "description": "New visual description for image generation",
  "emotion": "Emotion for the delivery",
  "visualElements": ["element", "element", "element"]
}}"#,
        concept = request.original_prompt,
        style = request.visual_style,
        tone = request.tone,
        duration = current.duration,
        narration = current.narration,
        id = current.id,
    );

    CompletionRequest {
        system,
        user: "Rewrite this scene with fresh content while keeping the story flowing.".to_string(),
        temperature: REGENERATE_TEMPERATURE,
        max_tokens: REGENERATE_MAX_TOKENS,
    }
}

fn encode_scenes(scenes: &[Scene]) -> Result<String, ScriptGenError> {
    serde_json::to_string(scenes).map_err(ScriptGenError::Encode)
}
