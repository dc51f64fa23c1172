use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub governance: GovernanceConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub enable_tracing: bool,
    /// Upper bound on live chat sessions; the least recently used is evicted.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Idle time after which a chat session is dropped.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_max_sessions() -> usize {
    1000
}

fn default_session_ttl_secs() -> u64 {
    30 * 60
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// YAML catalog to load instead of the built-in clinic content.
    pub catalog_path: Option<String>,
    pub normalization: NormalizationMode,
    pub greeting: Option<String>,
    pub fallback: Option<String>,
}

/// How diacritics are stripped during text normalization.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Probe the runtime and pick the best strategy.
    #[default]
    Auto,
    /// Canonical decomposition, then drop every `Diacritic` character.
    Unicode,
    /// Canonical decomposition, then drop U+0300..=U+036F only.
    CombiningRange,
    /// Trim and lowercase, no diacritic stripping.
    CaseOnly,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GovernanceConfig {
    pub json_logs: bool,
    pub metrics_enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub default_theme: String,
    pub nav_breakpoint_px: u32,
    pub reveal_threshold: f64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("CLINIC_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__SERVER__PORT=3000 to server.port
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 3000,
                enable_cors: true,
                enable_tracing: true,
                max_sessions: default_max_sessions(),
                session_ttl_secs: default_session_ttl_secs(),
            },
            chat: ChatConfig {
                catalog_path: None,
                normalization: NormalizationMode::Auto,
                greeting: None,
                fallback: None,
            },
            governance: GovernanceConfig {
                json_logs: false,
                metrics_enabled: true,
            },
            site: SiteConfig {
                default_theme: "dark".into(),
                nav_breakpoint_px: 980,
                reveal_threshold: 0.12,
            },
        }
    }
}
