use crate::config::CliConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, StudyBuddyError};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_SUPABASE_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub groq: GroqConfig,
    pub supabase: SupabaseConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StudyBuddyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value. Unset variables are
    /// left in place so validation reports them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StudyBuddyError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn from_env() -> Result<Self> {
        let required = |name: &str| {
            env::var(name).map_err(|_| StudyBuddyError::ConfigError {
                message: format!("{} environment variable is required", name),
            })
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| StudyBuddyError::InvalidConfigValueError {
                    field: "PORT".to_string(),
                    value: raw.clone(),
                    reason: "Port must be a number between 1 and 65535".to_string(),
                })?,
            Err(_) => default_port(),
        };

        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| default_host()),
                port,
            },
            groq: GroqConfig {
                api_key: required("GROQ_API_KEY")?,
                base_url: env::var("GROQ_BASE_URL").ok(),
                model: env::var("GROQ_MODEL").ok(),
                timeout_seconds: env::var("GROQ_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|v| v.parse().ok()),
            },
            supabase: SupabaseConfig {
                url: required("SUPABASE_URL")?,
                anon_key: required("SUPABASE_ANON_KEY")?,
                timeout_seconds: env::var("SUPABASE_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|v| v.parse().ok()),
            },
            logging: None,
        })
    }

    /// Loads the file given on the command line, otherwise the environment,
    /// then applies command-line overrides.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        config.apply_cli_overrides(cli);
        Ok(config)
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliConfig) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if cli.verbose || cli.json_logs {
            let logging = self.logging.get_or_insert_with(LoggingConfig::default);
            if cli.verbose {
                logging.verbose = Some(true);
            }
            if cli.json_logs {
                logging.json = Some(true);
            }
        }
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;

        validate_non_empty_string("groq.api_key", &self.groq.api_key)?;
        if self.groq.api_key.starts_with("${") {
            return Err(StudyBuddyError::InvalidConfigValueError {
                field: "groq.api_key".to_string(),
                value: self.groq.api_key.clone(),
                reason: "Environment variable is not set".to_string(),
            });
        }
        validate_url("groq.base_url", self.groq_base_url())?;
        validate_range("groq.timeout_seconds", self.groq_timeout_seconds(), 1, 600)?;

        validate_url("supabase.url", &self.supabase.url)?;
        validate_non_empty_string("supabase.anon_key", &self.supabase.anon_key)?;
        validate_range(
            "supabase.timeout_seconds",
            self.supabase_timeout_seconds(),
            1,
            600,
        )?;

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn groq_api_key(&self) -> &str {
        &self.groq.api_key
    }

    fn groq_base_url(&self) -> &str {
        self.groq.base_url.as_deref().unwrap_or(DEFAULT_GROQ_BASE_URL)
    }

    fn groq_model(&self) -> &str {
        self.groq.model.as_deref().unwrap_or(DEFAULT_GROQ_MODEL)
    }

    fn groq_timeout_seconds(&self) -> u64 {
        self.groq.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn supabase_url(&self) -> &str {
        &self.supabase.url
    }

    fn supabase_anon_key(&self) -> &str {
        &self.supabase.anon_key
    }

    fn supabase_timeout_seconds(&self) -> u64 {
        self.supabase
            .timeout_seconds
            .unwrap_or(DEFAULT_SUPABASE_TIMEOUT_SECONDS)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 8090

[groq]
api_key = "gsk_test"

[supabase]
url = "https://project.supabase.co"
anon_key = "anon"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = AppConfig::from_toml_str(BASIC_CONFIG).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8090");
        assert_eq!(config.groq_base_url(), DEFAULT_GROQ_BASE_URL);
        assert_eq!(config.groq_model(), DEFAULT_GROQ_MODEL);
        assert_eq!(config.groq_timeout_seconds(), 60);
        assert_eq!(config.supabase_timeout_seconds(), 15);
        assert!(!config.verbose_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_section_defaults() {
        let toml_content = r#"
[groq]
api_key = "gsk_test"
model = "llama-3.3-70b-versatile"

[supabase]
url = "https://project.supabase.co"
anon_key = "anon"

[logging]
json = true
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.groq_model(), "llama-3.3-70b-versatile");
        assert!(config.json_logging());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STUDY_BUDDY_TEST_GROQ_KEY", "gsk_from_env");

        let toml_content = r#"
[groq]
api_key = "${STUDY_BUDDY_TEST_GROQ_KEY}"

[supabase]
url = "https://project.supabase.co"
anon_key = "anon"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.groq.api_key, "gsk_from_env");

        std::env::remove_var("STUDY_BUDDY_TEST_GROQ_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[groq]
api_key = "${STUDY_BUDDY_TEST_UNSET_KEY}"

[supabase]
url = "https://project.supabase.co"
anon_key = "anon"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[groq]
api_key = "gsk_test"
base_url = "not a url"

[supabase]
url = "https://project.supabase.co"
anon_key = "anon"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[groq]
api_key = "gsk_test"

[supabase]
url = "https://project.supabase.co"
anon_key = "  "
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_supabase_timeout() {
        let toml_content = r#"
[groq]
api_key = "gsk_test"

[supabase]
url = "https://project.supabase.co"
anon_key = "anon"
timeout_seconds = 5
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.supabase_timeout_seconds(), 5);
        assert!(config.validate().is_ok());

        let config = AppConfig::from_toml_str(&toml_content.replace("= 5", "= 0")).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::from_toml_str(BASIC_CONFIG).unwrap();
        let cli = CliConfig {
            config: None,
            host: None,
            port: Some(9000),
            verbose: true,
            json_logs: false,
        };
        config.apply_cli_overrides(&cli);

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert!(config.verbose_logging());
        assert!(!config.json_logging());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC_CONFIG.as_bytes()).unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.supabase_url(), "https://project.supabase.co");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::from_file("/nonexistent/study-buddy.toml").unwrap_err();
        assert!(matches!(err, StudyBuddyError::IoError(_)));
    }
}
