use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub frontend_dir: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let frontend_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
            format!("{}/../frontend/dist", manifest_dir)
        } else {
            "/usr/src/app/frontend/dist".to_string()
        };

        Self {
            port: 8081,
            frontend_dir,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://router.huggingface.co/hf-inference/models".to_string(),
            model: "dima806/facial_emotions_image_detection".to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// YAML file (optional) first, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("EMOTION_CONFIG").unwrap_or_else(|_| "config/emotion.yaml".to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&config_str).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_yaml(config_str: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(config_str)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = parse_override(&lookup, "PORT") {
            self.server.port = port;
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            self.server.frontend_dir = dir;
        }
        if let Some(max) = parse_override(&lookup, "MAX_UPLOAD_BYTES") {
            self.server.max_upload_bytes = max;
        }
        if let Some(endpoint) = lookup("CLASSIFIER_ENDPOINT") {
            self.classifier.endpoint = endpoint;
        }
        if let Some(model) = lookup("CLASSIFIER_MODEL") {
            self.classifier.model = model;
        }
        if let Some(token) = lookup("HF_API_TOKEN").filter(|t| !t.trim().is_empty()) {
            self.classifier.api_token = Some(token);
        }
        if let Some(timeout) = parse_override(&lookup, "CLASSIFIER_TIMEOUT_SECS") {
            self.classifier.timeout_secs = timeout;
        }
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.server.port)
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_hosted_model() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.classifier.model, "dima806/facial_emotions_image_detection");
        assert_eq!(config.classifier.api_token, None);
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let config = AppConfig::from_yaml(
            "server:\n  port: 9000\nclassifier:\n  timeout_secs: 5\n",
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.classifier.timeout_secs, 5);
        assert_eq!(config.classifier.endpoint, ClassifierConfig::default().endpoint);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(AppConfig::from_yaml("server: [1, 2").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::from_file(Path::new("does/not/exist.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn environment_overrides_win() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "7000"),
            ("CLASSIFIER_MODEL", "someone/other-model"),
            ("HF_API_TOKEN", "hf_secret"),
            ("CLASSIFIER_TIMEOUT_SECS", "not-a-number"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.classifier.model, "someone/other-model");
        assert_eq!(config.classifier.api_token.as_deref(), Some("hf_secret"));
        assert_eq!(config.classifier.timeout_secs, 30);
    }

    #[test]
    fn blank_token_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == "HF_API_TOKEN").then(|| "  ".to_string()));
        assert_eq!(config.classifier.api_token, None);
    }
}
