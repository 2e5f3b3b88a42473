//! `script` command: one-shot script generation against the configured model.

use reelpulse_core::AppConfig;
use reelpulse_scriptgen::{OpenAiClient, ScriptGenerationService, ScriptRequest};

/// Generate a script and print it as pretty JSON on stdout.
///
/// A backend failure still prints the deterministic fallback script; the
/// reason goes to stderr so stdout stays parseable.
///
/// # Errors
///
/// Returns an error if `OPENAI_API_KEY` is not configured, the HTTP client
/// cannot be built, or the script cannot be serialized.
pub(crate) async fn run_script(config: &AppConfig, request: &ScriptRequest) -> anyhow::Result<()> {
    let client = OpenAiClient::from_settings(&config.openai)
        .map_err(|e| anyhow::anyhow!("failed to build OpenAI client: {e}"))?;
    let service = ScriptGenerationService::new(client);

    tracing::info!(
        duration = request.duration,
        style = %request.visual_style,
        "generating video script"
    );
    let generated = service.generate_video_script(request).await;

    if let Some(reason) = generated.fallback_reason() {
        eprintln!("note: model unavailable, printed the template script instead ({reason})");
    }

    println!("{}", serde_json::to_string_pretty(generated.data())?);
    Ok(())
}
