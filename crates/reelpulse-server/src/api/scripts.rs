//! Script generation handlers.
//!
//! Request and result bodies use the same camelCase field names the
//! completion backend produces.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use reelpulse_scriptgen::{
    Generated, ImagePromptPlan, ImagePromptRequest, RegenerateRequest, Scene, ScriptGenError,
    ScriptRequest, Source, VideoScript, VoiceoverPlan, VoiceoverRequest,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ErrorCode, ScriptService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct RegenerateSceneBody {
    pub original_prompt: String,
    pub visual_style: String,
    pub tone: String,
    pub current_script: VideoScript,
}

/// Generated content plus where it came from.
#[derive(Debug, Serialize)]
pub(in crate::api) struct GeneratedData<T: Serialize> {
    pub result: T,
    pub source: Source,
    pub fallback_reason: Option<String>,
}

impl<T: Serialize> From<Generated<T>> for GeneratedData<T> {
    fn from(generated: Generated<T>) -> Self {
        let source = generated.source();
        let (result, fallback_reason) = generated.into_parts();
        Self {
            result,
            source,
            fallback_reason,
        }
    }
}

fn script_service(state: &AppState, req_id: &str) -> Result<Arc<ScriptService>, ApiError> {
    state.scripts.clone().ok_or_else(|| {
        ApiError::new(
            req_id,
            ErrorCode::ConfigurationError,
            ScriptGenError::MissingApiKey.to_string(),
        )
    })
}

fn require_scenes(req_id: &str, scenes: &[Scene]) -> Result<(), ApiError> {
    if scenes.is_empty() {
        return Err(ApiError::new(
            req_id,
            ErrorCode::ValidationError,
            "scenes must not be empty",
        ));
    }
    Ok(())
}

fn map_regeneration_error(req_id: &str, error: &ScriptGenError) -> ApiError {
    match error {
        ScriptGenError::SceneNotFound { scene_id } => ApiError::new(
            req_id,
            ErrorCode::NotFound,
            format!("scene '{scene_id}' is not in the current script"),
        ),
        ScriptGenError::Regeneration { .. } => {
            ApiError::new(req_id, ErrorCode::UpstreamError, "failed to regenerate scene")
        }
        other => {
            tracing::error!(error = %other, "unexpected scene regeneration error");
            ApiError::new(req_id, ErrorCode::InternalError, "scene regeneration failed")
        }
    }
}

/// POST /api/v1/scripts: draft a full video script.
pub(in crate::api) async fn generate_script(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ScriptRequest>,
) -> Result<Json<ApiResponse<GeneratedData<VideoScript>>>, ApiError> {
    let rid = &req_id.0;
    let service = script_service(&state, rid)?;

    if body.prompt.trim().is_empty() {
        return Err(ApiError::new(
            rid,
            ErrorCode::ValidationError,
            "prompt must not be empty",
        ));
    }
    if body.duration == 0 {
        return Err(ApiError::new(
            rid,
            ErrorCode::ValidationError,
            "duration must be at least 1 second",
        ));
    }

    let generated = service.generate_video_script(&body).await;

    Ok(Json(ApiResponse::new(generated.into(), req_id.0)))
}

/// POST /api/v1/scripts/voiceover: optimize narration for voice synthesis.
pub(in crate::api) async fn generate_voiceover(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<VoiceoverRequest>,
) -> Result<Json<ApiResponse<GeneratedData<VoiceoverPlan>>>, ApiError> {
    let rid = &req_id.0;
    let service = script_service(&state, rid)?;
    require_scenes(rid, &body.scenes)?;

    let generated = service.generate_voiceover_text(&body).await;

    Ok(Json(ApiResponse::new(generated.into(), req_id.0)))
}

/// POST /api/v1/scripts/image-prompts: per-scene image generation prompts.
pub(in crate::api) async fn generate_image_prompts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ImagePromptRequest>,
) -> Result<Json<ApiResponse<GeneratedData<ImagePromptPlan>>>, ApiError> {
    let rid = &req_id.0;
    let service = script_service(&state, rid)?;
    require_scenes(rid, &body.scenes)?;

    let generated = service.generate_scene_image_prompts(&body).await;

    Ok(Json(ApiResponse::new(generated.into(), req_id.0)))
}

/// POST /api/v1/scripts/scenes/{scene_id}/regenerate: replace one scene.
pub(in crate::api) async fn regenerate_scene(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(scene_id): Path<String>,
    Json(body): Json<RegenerateSceneBody>,
) -> Result<Json<ApiResponse<Scene>>, ApiError> {
    let rid = &req_id.0;
    let service = script_service(&state, rid)?;

    let request = RegenerateRequest {
        original_prompt: body.original_prompt,
        scene_id,
        visual_style: body.visual_style,
        tone: body.tone,
        current_script: body.current_script,
    };

    let scene = service
        .regenerate_scene(&request)
        .await
        .map_err(|e| map_regeneration_error(rid, &e))?;

    Ok(Json(ApiResponse::new(scene, req_id.0)))
}
