use crate::config::Config;
use std::fmt;

/// Environment variable holding the OMDb key
pub const API_KEY_ENV: &str = "POPCORN_OMDB_KEY";

/// Shared development key, only good for light local use
pub const DEV_API_KEY: &str = "7f44b81c";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    Environment,
    ConfigFile,
    Development,
}

impl fmt::Display for KeyOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyOrigin::Environment => write!(f, "environment ({})", API_KEY_ENV),
            KeyOrigin::ConfigFile => write!(f, "config file"),
            KeyOrigin::Development => write!(f, "built-in development key"),
        }
    }
}

/// OMDb API key, resolved once at startup and handed to the client explicitly.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    value: String,
    origin: KeyOrigin,
}

impl ApiKey {
    /// Precedence: `POPCORN_OMDB_KEY`, then `omdb.api_key`, then [`DEV_API_KEY`].
    pub fn resolve(config: &Config) -> Self {
        Self::resolve_with(std::env::var(API_KEY_ENV).ok(), config)
    }

    pub fn resolve_with(env_value: Option<String>, config: &Config) -> Self {
        if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
            return Self { value: value.trim().to_string(), origin: KeyOrigin::Environment };
        }

        if let Some(value) = config.omdb.api_key.as_ref().filter(|v| !v.trim().is_empty()) {
            return Self { value: value.trim().to_string(), origin: KeyOrigin::ConfigFile };
        }

        Self { value: DEV_API_KEY.to_string(), origin: KeyOrigin::Development }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }

    /// Key with everything but the last 4 characters masked
    pub fn masked(&self) -> String {
        let len = self.value.chars().count();
        if len <= 4 {
            return "*".repeat(len);
        }
        let tail: String = self.value.chars().skip(len - 4).collect();
        format!("{}{}", "*".repeat(len - 4), tail)
    }
}

// Never print the raw key in logs
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &self.masked())
            .field("origin", &self.origin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> Config {
        let mut config = Config::default();
        config.omdb.api_key = key.map(str::to_string);
        config
    }

    #[test]
    fn test_environment_wins() {
        let key = ApiKey::resolve_with(Some("envkey".to_string()), &config_with_key(Some("filekey")));
        assert_eq!(key.as_str(), "envkey");
        assert_eq!(key.origin(), KeyOrigin::Environment);
    }

    #[test]
    fn test_config_file_when_env_missing_or_blank() {
        let config = config_with_key(Some("filekey"));

        let key = ApiKey::resolve_with(None, &config);
        assert_eq!(key.as_str(), "filekey");
        assert_eq!(key.origin(), KeyOrigin::ConfigFile);

        let key = ApiKey::resolve_with(Some("  ".to_string()), &config);
        assert_eq!(key.origin(), KeyOrigin::ConfigFile);
    }

    #[test]
    fn test_development_fallback() {
        let key = ApiKey::resolve_with(None, &config_with_key(None));
        assert_eq!(key.as_str(), DEV_API_KEY);
        assert_eq!(key.origin(), KeyOrigin::Development);
    }

    #[test]
    fn test_masked_hides_prefix() {
        let key = ApiKey::resolve_with(Some("abcdef123".to_string()), &Config::default());
        assert_eq!(key.masked(), "*****f123");
        assert!(!format!("{:?}", key).contains("abcdef"));
    }
}
