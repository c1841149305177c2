use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set. Add it to the environment or a .env file.")]
    MissingKey(&'static str),
}

/// Secret value whose `Debug` output is redacted.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Service credentials and model selection, resolved once at startup.
///
/// Environment variables:
/// - `NEWS_API_KEY`: NewsAPI key (required)
/// - `GOOGLE_API_KEY` or `GEMINI_API_KEY`: Gemini key (required)
/// - `GEMINI_MODEL`: model name (optional)
#[derive(Debug, Clone)]
pub struct Config {
    pub news_api_key: ApiKey,
    pub google_api_key: ApiKey,
    pub model: String,
}

/// Load `.env` from the working directory, if present. Existing variables win.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let news_api_key =
            non_blank("NEWS_API_KEY").ok_or(ConfigError::MissingKey("NEWS_API_KEY"))?;
        let google_api_key = non_blank("GOOGLE_API_KEY")
            .or_else(|| non_blank("GEMINI_API_KEY"))
            .ok_or(ConfigError::MissingKey("GOOGLE_API_KEY"))?;
        let model = non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            news_api_key: ApiKey::new(news_api_key),
            google_api_key: ApiKey::new(google_api_key),
            model,
        })
    }
}
