use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// Upstream completion API settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Bearer credential; absent means fallback-only mode
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub temperature: Option<f32>,
    /// Request `response_format = json_object`
    pub json_mode: bool,
    /// Request timeout in seconds, 0 keeps the HTTP client default
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub timeout_secs: u64,
}

impl LLMConfig {
    /// API key, treating an empty string as absent
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

// Keep the credential out of logs
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("api_key", &self.credential().map(|_| "***"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("json_mode", &self.json_mode)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the first config.toml found
    /// 2. Override with environment variables
    /// 3. Validate the final configuration
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = match path.map(str::to_string).or_else(Self::find_config_file) {
            Some(config_path) => Self::from_toml(&config_path)?,
            None => {
                tracing::warn!("Configuration file not found, using defaults");
                Config::default()
            },
        };

        // 2. Override with environment variables
        config.apply_env_overrides();

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - OPENAI_API_KEY: Completion API credential (unset = fallback only)
    /// - OPENAI_MODEL: Model name (default: gpt-5-mini)
    /// - APP_LLM_API_BASE: API base URL (default: https://api.openai.com/v1)
    /// - APP_LLM_TIMEOUT: Request timeout (accepts "30", "30s", "2m")
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,satire_api=debug")
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
            tracing::info!("Override llm.api_key from env");
        }

        if let Some(model) = lookup("OPENAI_MODEL")
            && !model.trim().is_empty()
        {
            self.llm.model = model;
            tracing::info!("Override llm.model from env: {}", self.llm.model);
        }

        if let Some(base) = lookup("APP_LLM_API_BASE") {
            self.llm.api_base = base;
            tracing::info!("Override llm.api_base from env: {}", self.llm.api_base);
        }

        if let Some(timeout) = lookup("APP_LLM_TIMEOUT") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.llm.timeout_secs = val;
                    tracing::info!("Override llm.timeout_secs from env: {}", self.llm.timeout_secs);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_LLM_TIMEOUT '{}': {} (keep {})",
                    timeout,
                    e,
                    self.llm.timeout_secs
                ),
            }
        }

        if let Some(host) = lookup("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Some(port) = lookup("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Some(level) = lookup("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.llm.credential().is_none() {
            tracing::warn!("OPENAI_API_KEY is not set, every request will use fallback templates");
        }

        // Validate server port
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model cannot be empty");
        }

        if self.llm.api_base.trim().is_empty() {
            anyhow::bail!("llm.api_base cannot be empty");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,satire_api=debug".to_string(), file: None }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-5-mini".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            temperature: Some(0.8),
            json_mode: true,
            timeout_secs: 0,
        }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(n * 60),
        "h" | "hr" | "hour" | "hours" => Ok(n * 60 * 60),
        _ => Err(format!("unsupported unit: {}", unit)),
    }
}

// Custom serde deserializer to support numeric or human-friendly string values
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '2m'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
