use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::embeddings::EmbeddingProvider;
use crate::embeddings::HASHED_MODEL;
use crate::rag::RetrievalMethod;
use crate::KbRagError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    /// Directory holding `index.html` and the `assets/` folder
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_sources_path")]
    pub sources_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    #[serde(default)]
    pub provider: EmbeddingProvider,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default)]
    pub method: RetrievalMethod,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Secondary sources are only mentioned above this similarity
    #[serde(default = "default_related_threshold")]
    pub related_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Serve canned text for example.com when the network is unavailable
    #[serde(default = "default_true")]
    pub offline_fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default)]
    pub file_output: bool,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_sources_path() -> PathBuf {
    PathBuf::from("sources").join("sources.json")
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_dimension() -> usize {
    384
}

fn default_embedding_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_top_k() -> usize {
    3
}

fn default_related_threshold() -> f32 {
    0.3
}

fn default_fetch_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: true,
            static_dir: default_static_dir(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            sources_path: default_sources_path(),
        }
    }
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            model: default_embedding_model(),
            dimension: default_dimension(),
            endpoint: default_embedding_endpoint(),
            api_key: None,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            method: RetrievalMethod::default(),
            top_k: default_top_k(),
            related_threshold: default_related_threshold(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            offline_fallback: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: default_log_dir(),
            file_output: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from the default locations
    ///
    /// Tries `config.toml`, then `config.example.toml`, then built-in defaults.
    pub fn load() -> crate::Result<Self> {
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            eprintln!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            eprintln!("Warning: No config file found, using built-in defaults.");
            let mut config = Self::default();
            config.apply_env_overrides()?;
            Ok(config)
        }
    }

    /// Apply `KBRAG_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> crate::Result<()> {
        if let Ok(host) = std::env::var("KBRAG_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("KBRAG_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| KbRagError::ConfigError(format!("KBRAG_PORT is not a port: {port}")))?;
        }
        if let Ok(path) = std::env::var("KBRAG_SOURCES_PATH") {
            self.storage.sources_path = PathBuf::from(path);
        }
        if let Ok(level) = std::env::var("KBRAG_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Reject values the service cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(KbRagError::ConfigError("server.port must not be 0".into()));
        }
        if self.retrieval.top_k == 0 {
            return Err(KbRagError::ConfigError("retrieval.top_k must be at least 1".into()));
        }
        if self.embeddings.dimension == 0 {
            return Err(KbRagError::ConfigError(
                "embeddings.dimension must be at least 1".into(),
            ));
        }
        if self.embeddings.provider == EmbeddingProvider::OpenAI
            && self.embeddings.api_key.as_deref().map_or(true, str::is_empty)
        {
            return Err(KbRagError::ConfigError(
                "embeddings.api_key is required for the openai provider".into(),
            ));
        }
        Ok(())
    }

    /// Address the API server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn sources_path(&self) -> &Path {
        &self.storage.sources_path
    }

    /// Model that actually produces embeddings for the configured provider
    pub fn embedding_model(&self) -> &str {
        match self.embeddings.provider {
            EmbeddingProvider::Hashed => HASHED_MODEL,
            EmbeddingProvider::Ollama | EmbeddingProvider::OpenAI => &self.embeddings.model,
        }
    }

    pub fn embedding_dimension(&self) -> usize {
        self.embeddings.dimension
    }

    /// API key with everything but the last four characters hidden
    pub fn masked_api_key(&self) -> Option<String> {
        self.embeddings.api_key.as_ref().map(|key| {
            let visible: String = key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("***{visible}")
        })
    }
}
