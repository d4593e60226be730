use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct NlpConfig {
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Secret<String>,
    /// Chat model used for every operation (e.g., gpt-4o-mini)
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared secret expected in the X-API-Key header
    pub api_key: Secret<String>,
    /// CORS origins; a single "*" allows any origin
    pub allowed_origins: Vec<String>,
}

impl NlpConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service settings from an arbitrary key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: Option<&str>| -> Result<String, AppError> {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(val) => Ok(val),
                None => default.map(str::to_string).ok_or_else(|| {
                    AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
                }),
            }
        };

        let timeout_secs = get(
            "OPENAI_TIMEOUT_SECS",
            Some(&DEFAULT_OPENAI_TIMEOUT_SECS.to_string()),
        )?
        .parse::<u64>()
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("OPENAI_TIMEOUT_SECS: {}", e)))?;

        let allowed_origins = get("ALLOWED_ORIGINS", Some("*"))?
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(NlpConfig {
            common,
            openai: OpenAiConfig {
                api_key: Secret::new(get("OPENAI_API_KEY", None)?),
                model: get("OPENAI_MODEL", Some(DEFAULT_OPENAI_MODEL))?,
                base_url: get("OPENAI_BASE_URL", Some(DEFAULT_OPENAI_BASE_URL))?
                    .trim_end_matches('/')
                    .to_string(),
                timeout: Duration::from_secs(timeout_secs),
            },
            security: SecurityConfig {
                api_key: Secret::new(get("API_KEY", None)?),
                allowed_origins,
            },
        })
    }
}

impl SecurityConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl OpenAiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn common() -> core_config::Config {
        core_config::Config {
            port: 0,
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }

    fn load(vars: &[(&str, &str)]) -> Result<NlpConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NlpConfig::from_lookup(common(), |key| vars.get(key).cloned())
    }

    #[test]
    fn required_keys_with_defaults() {
        let config = load(&[("OPENAI_API_KEY", "sk-test"), ("API_KEY", "secret123")]).unwrap();

        assert_eq!(config.openai.api_key.expose_secret(), "sk-test");
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.openai.timeout, Duration::from_secs(60));
        assert_eq!(config.security.api_key.expose_secret(), "secret123");
        assert!(config.security.allows_any_origin());
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        let err = load(&[("OPENAI_API_KEY", "sk-test"), ("API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn missing_openai_key_is_a_config_error() {
        let err = load(&[("API_KEY", "secret123")]).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("API_KEY", "secret123"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1/"),
            ("OPENAI_TIMEOUT_SECS", "5"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();

        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.base_url, "http://localhost:9000/v1");
        assert_eq!(config.openai.timeout, Duration::from_secs(5));
        assert_eq!(
            config.security.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(!config.security.allows_any_origin());
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("API_KEY", "secret123"),
            ("OPENAI_TIMEOUT_SECS", "soon"),
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
