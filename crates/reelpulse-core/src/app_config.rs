use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Refresh cadence for the three dashboard queries. The default is what the
/// loader uses when no override is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub analytics: Duration,
    pub accounts: Duration,
    pub history: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            analytics: Duration::from_millis(2_000),
            accounts: Duration::from_millis(2_000),
            history: Duration::from_millis(5_000),
        }
    }
}

/// Settings for the chat-completion backend.
///
/// The API key is optional at load time. Callers that need the backend turn a
/// missing key into a hard error when they first build a client.
#[derive(Clone)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl OpenAiSettings {
    /// Whether a credential is configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub dashboard_api_url: String,
    pub poll: PollIntervals,
    pub http_timeout_secs: u64,
    pub openai: OpenAiSettings,
}
