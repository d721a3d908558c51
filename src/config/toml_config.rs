use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::{ChronosError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub display: DisplayConfig,
    pub transmission: TransmissionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub hour_format_24: bool,
    pub theme: String,
    pub fullscreen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hour_format_24: false,
            theme: "AMBER".to_string(),
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ChronosError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${API_KEY})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::{Captures, Regex};
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 是否輸出 debug 等級日誌
    pub fn verbose(&self) -> bool {
        matches!(
            self.logging.level.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("debug") | Some("trace")
        )
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("transmission.endpoint", &self.transmission.endpoint)?;
        validation::validate_non_empty_string("transmission.model", &self.transmission.model)?;

        if let Some(timeout) = self.transmission.timeout_seconds {
            validation::validate_range(
                "transmission.timeout_seconds",
                timeout,
                1,
                MAX_TIMEOUT_SECONDS,
            )?;
        }

        if let Some(file) = &self.logging.file {
            validation::validate_path("logging.file", file)?;
        }

        // 缺少金鑰不阻擋啟動，收訊時會改用 sentinel
        if self.api_key().is_none() {
            tracing::warn!("⚠️ No API key configured, transmissions will report SIGNAL LOST");
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.transmission.endpoint
    }

    fn model(&self) -> &str {
        &self.transmission.model
    }

    fn api_key(&self) -> Option<&str> {
        self.transmission
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && !k.starts_with("${"))
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.transmission.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[display]
hour_format_24 = true
theme = "CYAN"
fullscreen = true

[transmission]
endpoint = "https://api.example.com"
model = "gemini-test"
api_key = "secret"
timeout_seconds = 15

[logging]
file = "chronos.log"
level = "DEBUG"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.display.hour_format_24);
        assert_eq!(config.display.theme, "CYAN");
        assert!(config.display.fullscreen);
        assert_eq!(config.endpoint(), "https://api.example.com");
        assert_eq!(config.model(), "gemini-test");
        assert_eq!(config.api_key(), Some("secret"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.logging.file.as_deref(), Some("chronos.log"));
        assert!(config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert!(!config.display.hour_format_24);
        assert_eq!(config.display.theme, "AMBER");
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.api_key(), None);
        assert_eq!(config.request_timeout(), None);
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CHRONOS_TEST_KEY", "from-env");

        let toml_content = r#"
[transmission]
api_key = "${CHRONOS_TEST_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), Some("from-env"));

        std::env::remove_var("CHRONOS_TEST_KEY");
    }

    #[test]
    fn test_unresolved_env_var_counts_as_missing_key() {
        let toml_content = r#"
[transmission]
api_key = "${CHRONOS_SURELY_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.transmission.api_key.as_deref(),
            Some("${CHRONOS_SURELY_UNSET_VARIABLE}")
        );
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = TomlConfig::from_toml_str(
            r#"
[transmission]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_timeout = TomlConfig::from_toml_str(
            r#"
[transmission]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(bad_timeout.validate().is_err());

        let bad_model = TomlConfig::from_toml_str(
            r#"
[transmission]
model = "  "
"#,
        )
        .unwrap();
        assert!(bad_model.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let err = TomlConfig::from_toml_str("[display\ntheme = ").unwrap_err();
        assert!(matches!(err, ChronosError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[display]
theme = "MAGENTA"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.display.theme, "MAGENTA");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ChronosError::IoError(_)));
    }
}
