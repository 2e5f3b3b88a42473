use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::*;
use crate::types::{VoiceProfile, VoiceSettings};

/// Backend that replays a fixed reply and records what it was asked.
struct StubBackend {
    reply: Option<String>,
    calls: AtomicUsize,
    last: Mutex<Option<CompletionRequest>>,
}

impl StubBackend {
    fn replying(reply: serde_json::Value) -> Self {
        Self::raw(Some(reply.to_string()))
    }

    fn failing() -> Self {
        Self::raw(None)
    }

    fn raw(reply: Option<String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> CompletionRequest {
        self.last
            .lock()
            .expect("lock")
            .clone()
            .expect("backend was called")
    }
}

impl CompletionBackend for StubBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ScriptGenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("lock") = Some(request);
        self.reply.clone().ok_or(ScriptGenError::Api {
            status: 500,
            body: "upstream down".to_string(),
        })
    }
}

fn script_request(duration: u32) -> ScriptRequest {
    ScriptRequest {
        prompt: "urban gardening".to_string(),
        duration,
        visual_style: "documentary".to_string(),
        tone: "warm".to_string(),
        voice_gender: None,
        language: None,
        accent: None,
    }
}

fn three_scene_script() -> VideoScript {
    let scene = |n: u32, narration: &str| Scene {
        id: format!("scene_{n}"),
        duration: 5,
        narration: narration.to_string(),
        visual_description: format!("shot {n}"),
        voice_instructions: VoiceInstructions {
            emotion: "calm".to_string(),
            pace: "slow".to_string(),
            emphasis: "soil".to_string(),
            pause: "after intro".to_string(),
        },
        visual_elements: vec!["planter".to_string()],
        camera_angle: "wide".to_string(),
        lighting: "soft".to_string(),
    };
    VideoScript {
        title: "Rooftop Gardens".to_string(),
        description: String::new(),
        total_duration: 15,
        voice_profile: VoiceProfile::default(),
        scenes: vec![
            scene(1, "Seeds go in."),
            scene(2, "Sprouts appear."),
            scene(3, "Harvest day."),
        ],
        motion_engine: None,
    }
}

fn regenerate(scene_id: &str) -> RegenerateRequest {
    RegenerateRequest {
        original_prompt: "urban gardening".to_string(),
        scene_id: scene_id.to_string(),
        visual_style: "documentary".to_string(),
        tone: "warm".to_string(),
        current_script: three_scene_script(),
    }
}

#[tokio::test]
async fn remote_script_gets_missing_ids_and_voice_defaults() {
    let backend = StubBackend::replying(serde_json::json!({
        "title": "Green Roofs",
        "description": "Gardens above the city",
        "totalDuration": 10,
        "scenes": [
            { "id": "intro", "duration": 5, "narration": "Look up." },
            { "duration": 5, "narration": "Plants everywhere.", "voiceInstructions": { "emotion": "inspiring" } }
        ]
    }));
    let service = ScriptGenerationService::new(backend);

    let generated = service.generate_video_script(&script_request(10)).await;

    assert!(!generated.is_fallback(), "expected remote script, got {generated:?}");
    let script = generated.into_data();
    assert_eq!(script.title, "Green Roofs");
    assert_eq!(script.scenes[0].id, "intro");
    assert_eq!(script.scenes[1].id, "scene_2");
    assert_eq!(script.scenes[0].voice_instructions, VoiceInstructions::default());
    assert_eq!(script.scenes[1].voice_instructions.emotion, "inspiring");

    let sent = service.backend().last_request();
    assert!((sent.temperature - 0.8).abs() < f32::EPSILON);
    assert_eq!(sent.max_tokens, 3000);
}

#[tokio::test]
async fn null_fields_are_treated_as_missing() {
    let backend = StubBackend::replying(serde_json::json!({
        "title": null,
        "totalDuration": 10,
        "voiceProfile": null,
        "scenes": [
            {
                "id": null,
                "duration": 5,
                "narration": "Look up.",
                "voiceInstructions": null,
                "visualElements": null,
                "cameraAngle": null
            },
            { "id": "close", "duration": null, "narration": "Soil.", "lighting": null }
        ]
    }));
    let service = ScriptGenerationService::new(backend);

    let generated = service.generate_video_script(&script_request(10)).await;

    assert!(!generated.is_fallback(), "expected remote script, got {generated:?}");
    let script = generated.into_data();
    assert_eq!(script.title, "");
    assert_eq!(script.voice_profile, VoiceProfile::default());
    assert_eq!(script.scenes[0].id, "scene_1");
    assert_eq!(script.scenes[0].voice_instructions, VoiceInstructions::default());
    assert!(script.scenes[0].visual_elements.is_empty());
    assert_eq!(script.scenes[1].id, "close");
    assert_eq!(script.scenes[1].duration, 0);
}

#[tokio::test]
async fn fractional_durations_are_rounded() {
    let backend = StubBackend::replying(serde_json::json!({
        "totalDuration": 9.5,
        "scenes": [
            { "id": "scene_1", "duration": 4.5, "narration": "Look up." },
            { "id": "scene_2", "duration": 4.2, "narration": "Soil." }
        ]
    }));
    let service = ScriptGenerationService::new(backend);

    let generated = service.generate_video_script(&script_request(9)).await;

    assert!(!generated.is_fallback(), "expected remote script, got {generated:?}");
    let script = generated.into_data();
    assert_eq!(script.total_duration, 10);
    assert_eq!(script.scenes[0].duration, 5);
    assert_eq!(script.scenes[1].duration, 4);
}

#[tokio::test]
async fn backend_failure_falls_back_to_mock_script() {
    let service = ScriptGenerationService::new(StubBackend::failing());

    let generated = service.generate_video_script(&script_request(17)).await;

    assert!(generated.is_fallback());
    assert!(
        generated.fallback_reason().is_some_and(|r| r.contains("500")),
        "reason: {:?}",
        generated.fallback_reason()
    );
    let script = generated.into_data();
    assert_eq!(script.scenes.len(), 4);
    assert!(script.scenes.iter().all(|s| s.duration == 4));
    assert_eq!(script.voice_profile.gender, "Female");
}

#[tokio::test]
async fn unparseable_reply_falls_back() {
    let service = ScriptGenerationService::new(StubBackend::raw(Some("not json".to_string())));

    let generated = service.generate_video_script(&script_request(30)).await;

    assert!(
        generated
            .fallback_reason()
            .is_some_and(|r| r.contains("video script")),
        "reason: {:?}",
        generated.fallback_reason()
    );
    assert_eq!(generated.data().scenes.len(), 6);
}

#[tokio::test]
async fn script_without_scenes_falls_back() {
    let service = ScriptGenerationService::new(StubBackend::replying(serde_json::json!({
        "title": "Empty",
        "scenes": []
    })));

    let generated = service.generate_video_script(&script_request(9)).await;

    assert!(generated.is_fallback());
    assert_eq!(generated.data().scenes.len(), 3);
}

#[tokio::test]
async fn voiceover_parses_remote_plan() {
    let service = ScriptGenerationService::new(StubBackend::replying(serde_json::json!({
        "optimizedScenes": [
            {
                "id": "scene_1",
                "optimizedNarration": "Seeds (pause) go *in*.",
                "pronunciationGuide": "",
                "timingNotes": "slow start",
                "emotionalCues": "gentle"
            }
        ],
        "totalEstimatedDuration": 15
    })));
    let request = VoiceoverRequest {
        scenes: three_scene_script().scenes,
        voice_profile: VoiceProfile::default(),
        total_duration: 15,
    };

    let generated = service.generate_voiceover_text(&request).await;

    assert!(!generated.is_fallback(), "expected remote plan, got {generated:?}");
    let plan = generated.into_data();
    assert_eq!(plan.optimized_scenes[0].emotional_cues, "gentle");
    assert_eq!(plan.voice_settings, VoiceSettings::default());
    assert_eq!(service.backend().last_request().max_tokens, 2000);
}

#[tokio::test]
async fn voiceover_failure_echoes_narration() {
    let service = ScriptGenerationService::new(StubBackend::failing());
    let request = VoiceoverRequest {
        scenes: three_scene_script().scenes,
        voice_profile: VoiceProfile::default(),
        total_duration: 15,
    };

    let generated = service.generate_voiceover_text(&request).await;

    assert!(generated.is_fallback());
    let plan = generated.data();
    assert_eq!(plan.optimized_scenes.len(), 3);
    assert_eq!(plan.optimized_scenes[2].optimized_narration, "Harvest day.");
    assert_eq!(plan.optimized_scenes[2].emotional_cues, "calm");
}

#[tokio::test]
async fn image_prompt_failure_uses_basic_prompts() {
    let service = ScriptGenerationService::new(StubBackend::failing());
    let request = ImagePromptRequest {
        scenes: three_scene_script().scenes,
        visual_style: "documentary".to_string(),
        overall_theme: "growth".to_string(),
    };

    let generated = service.generate_scene_image_prompts(&request).await;

    assert!(generated.is_fallback());
    let plan = generated.data();
    assert_eq!(
        plan.enhanced_scenes[0].positive_prompt,
        "shot 1, documentary, cinematic, high quality, 8K, photorealistic"
    );
    assert_eq!(plan.enhanced_scenes[0].technical_settings.width, 1024);
    assert_eq!(service.backend().calls(), 1);
}

#[tokio::test]
async fn unknown_scene_fails_without_calling_backend() {
    let service = ScriptGenerationService::new(StubBackend::replying(serde_json::json!({})));

    let err = service.regenerate_scene(&regenerate("scene_9")).await.unwrap_err();

    assert!(
        matches!(&err, ScriptGenError::SceneNotFound { scene_id } if scene_id == "scene_9"),
        "got {err:?}"
    );
    assert_eq!(service.backend().calls(), 0);
}

#[tokio::test]
async fn regenerated_scene_keeps_original_id() {
    let service = ScriptGenerationService::new(StubBackend::replying(serde_json::json!({
        "id": "scene_42",
        "duration": 5,
        "narration": "Tiny shoots push through.",
        "description": "macro shot of seedlings",
        "emotion": "hopeful",
        "visualElements": ["seedling", "dew"]
    })));

    let scene = service
        .regenerate_scene(&regenerate("scene_2"))
        .await
        .expect("regenerated scene");

    assert_eq!(scene.id, "scene_2");
    assert_eq!(scene.duration, 5);
    assert_eq!(scene.narration, "Tiny shoots push through.");
    assert_eq!(scene.visual_description, "macro shot of seedlings");
    assert_eq!(scene.voice_instructions.emotion, "hopeful");
    assert_eq!(scene.voice_instructions.pace, "slow");
    assert_eq!(scene.visual_elements, ["seedling", "dew"]);
    assert_eq!(scene.camera_angle, "wide");
    assert_eq!(scene.lighting, "soft");

    let sent = service.backend().last_request();
    assert!(sent.system.contains("Previous scene: \"Seeds go in.\""));
    assert!(sent.system.contains("Next scene: \"Harvest day.\""));
    assert!((sent.temperature - 0.9).abs() < f32::EPSILON);
}

#[tokio::test]
async fn regenerated_scene_defaults_missing_duration() {
    let service = ScriptGenerationService::new(StubBackend::replying(serde_json::json!({
        "narration": "Harvest, finally."
    })));

    let scene = service
        .regenerate_scene(&regenerate("scene_3"))
        .await
        .expect("regenerated scene");

    assert_eq!(scene.duration, 5);
    assert_eq!(scene.visual_description, "shot 3");
    assert_eq!(scene.visual_elements, ["planter"]);
}

#[tokio::test]
async fn regenerated_scene_accepts_fractional_duration() {
    let service = ScriptGenerationService::new(StubBackend::replying(serde_json::json!({
        "duration": 6.6,
        "narration": "Harvest, finally.",
        "emotion": null
    })));

    let scene = service
        .regenerate_scene(&regenerate("scene_3"))
        .await
        .expect("regenerated scene");

    assert_eq!(scene.duration, 7);
    assert_eq!(scene.voice_instructions.emotion, "calm");
}

#[tokio::test]
async fn regeneration_failure_is_propagated() {
    let service = ScriptGenerationService::new(StubBackend::failing());

    let err = service.regenerate_scene(&regenerate("scene_1")).await.unwrap_err();

    assert!(
        matches!(&err, ScriptGenError::Regeneration { scene_id, .. } if scene_id == "scene_1"),
        "got {err:?}"
    );
    assert_eq!(service.backend().calls(), 1);
}
