//! Runtime configuration.
//!
//! Values come from built-in defaults, then an optional JSON file, then
//! environment variables, then command-line flags; each layer overrides
//! the previous one.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::api::ServerConfig;
use crate::cli::Args;
use crate::dispatch::menu::{self, MenuEntry};
use crate::services::{DEFAULT_ART_ENDPOINT, DEFAULT_QA_ENDPOINT, DEFAULT_TRANSLATE_ENDPOINT};
use crate::session::SessionId;

/// Effective configuration of one process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telegram bot settings.
    pub telegram: TelegramSection,
    /// Content server settings.
    pub server: ServerSection,
    /// Content store and deep link settings.
    pub content: ContentSection,
    /// Outbound service endpoints.
    pub services: ServicesSection,
    /// Sites menu.
    pub menu: MenuSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Telegram bot section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSection {
    /// Bot token from @BotFather.
    #[serde(skip_serializing)]
    pub token: Option<Secret<String>>,
    /// Chat that receives developer contact messages.
    pub operator_chat_id: Option<i64>,
    /// Handle shown in the developer contact prompt.
    pub developer_username: String,
}

impl Default for TelegramSection {
    fn default() -> Self {
        Self {
            token: None,
            operator_chat_id: None,
            developer_username: "@QR_l4".to_string(),
        }
    }
}

/// Content server section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable graceful shutdown.
    pub graceful_shutdown: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            graceful_shutdown: true,
        }
    }
}

/// Content store section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    /// Directory of documents served under `/uploads` and `/file`.
    pub uploads_dir: PathBuf,
    /// Directory served for all other paths.
    pub public_dir: PathBuf,
    /// Public base URL used to build deep links to hosted documents.
    pub public_base_url: Option<String>,
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from("uploads"),
            public_dir: PathBuf::from("public"),
            public_base_url: None,
        }
    }
}

/// Outbound services section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesSection {
    /// Image generation endpoint (POST, JSON `{"prompt"}`).
    pub image_url: String,
    /// Q&A endpoint (GET, `?q=`).
    pub qa_url: String,
    /// Translation endpoint (GET, `?q=&langpair=`).
    pub translate_url: String,
    /// Translation source language.
    pub source_lang: String,
    /// Translation target language.
    pub target_lang: String,
    /// Request timeout in seconds; the HTTP client default when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ServicesSection {
    fn default() -> Self {
        Self {
            image_url: DEFAULT_ART_ENDPOINT.to_string(),
            qa_url: DEFAULT_QA_ENDPOINT.to_string(),
            translate_url: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            source_lang: "en".to_string(),
            target_lang: "ar".to_string(),
            timeout_secs: None,
        }
    }
}

impl ServicesSection {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Sites menu section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSection {
    pub entries: Vec<MenuEntry>,
}

impl Default for MenuSection {
    fn default() -> Self {
        Self {
            entries: menu::default_entries(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log filter (error, warn, info, debug, trace, or directives).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "relay_bot=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(token) = var("TELEGRAM_BOT_TOKEN") {
            self.telegram.token = Some(Secret::new(token));
        }

        if let Some(chat) = var("DEVELOPER_CHAT_ID").and_then(|v| v.parse().ok()) {
            self.telegram.operator_chat_id = Some(chat);
        }

        if let Some(host) = var("RELAY_BOT_HOST") {
            self.server.host = host;
        }

        if let Some(port) = var("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }

        if let Some(url) = var("RENDER_URL") {
            self.content.public_base_url = Some(url);
        } else if let Some(instance) = var("RENDER_INSTANCE") {
            self.content.public_base_url = Some(format!("https://{instance}.onrender.com"));
        }

        if let Some(level) = var("RELAY_BOT_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = args.host {
            self.server.host = host.to_string();
        }

        if let Some(port) = args.port {
            self.server.port = port;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Build the effective configuration for a run.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Bot token, required to start.
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.telegram
            .token
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    /// Public base URL, required to build deep links.
    pub fn public_base_url(&self) -> Result<&str, ConfigError> {
        self.content
            .public_base_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)
    }

    /// Operator chat for developer contact messages.
    pub fn operator(&self) -> Option<SessionId> {
        self.telegram.operator_chat_id.map(SessionId::from_raw)
    }

    /// Convert to ServerConfig for the content server.
    pub fn to_server_config(&self) -> Result<ServerConfig, ConfigError> {
        let host: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.server.host.clone()))?;

        let mut server_config = ServerConfig::new(host.to_string(), self.server.port)
            .with_public_dir(&self.content.public_dir);

        if !self.server.graceful_shutdown {
            server_config = server_config.without_graceful_shutdown();
        }

        Ok(server_config)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Invalid host address.
    InvalidHost(String),
    /// No bot token configured.
    MissingToken,
    /// No public base URL configured.
    MissingBaseUrl,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read config file: {e}"),
            Self::Json(e) => write!(f, "malformed config file: {e}"),
            Self::InvalidHost(host) => write!(f, "server.host is not an IP address: {host}"),
            Self::MissingToken => {
                write!(f, "bot token not set (TELEGRAM_BOT_TOKEN or telegram.token)")
            }
            Self::MissingBaseUrl => write!(
                f,
                "public base URL not set (RENDER_URL, RENDER_INSTANCE or content.public_base_url)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
