use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use anyhow::{anyhow, Context};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TRANSPORT_SENDMAIL: &str = "sendmail";
pub const TRANSPORT_SMTP: &str = "smtp";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub mailer: MailerConfig,
    pub storage: StorageConfig,
    #[serde(skip)]
    raw: toml::Table,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    pub from: String,
    pub default: String,
    pub transport: Option<String>,
    pub smtp_url: Option<String>,
    pub sendmail_command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Read configuration file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed = Self::substitute_env_vars(content)?;

        let raw: toml::Table = toml::from_str(&processed).context("TOML parsing error")?;
        let mut config: TomlConfig = toml::Value::Table(raw.clone())
            .try_into()
            .context("Invalid configuration layout")?;
        config.raw = raw;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${SMTP_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").context("Compile env substitution pattern")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn transport(&self) -> &str {
        self.mailer.transport.as_deref().unwrap_or(TRANSPORT_SENDMAIL)
    }

    pub fn storage_path(&self) -> &str {
        &self.storage.path
    }
}

impl ConfigProvider for TomlConfig {
    /// Looks up slash-separated keys such as `mailer/from`.
    fn find(&self, key: &str) -> Result<Option<String>> {
        let mut segments = key.split('/');
        let Some(mut value) = segments.next().and_then(|first| self.raw.get(first)) else {
            return Ok(None);
        };
        for segment in segments {
            match value.get(segment) {
                Some(next) => value = next,
                None => return Ok(None),
            }
        }

        match value {
            toml::Value::String(s) => Ok(Some(s.clone())),
            toml::Value::Integer(i) => Ok(Some(i.to_string())),
            toml::Value::Float(f) => Ok(Some(f.to_string())),
            toml::Value::Boolean(b) => Ok(Some(b.to_string())),
            _ => Err(anyhow!("Configuration key \"{}\" is not a scalar value", key).into()),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_mailbox("mailer.from", &self.mailer.from)?;
        validation::validate_mailbox("mailer.default", &self.mailer.default)?;
        validation::validate_one_of(
            "mailer.transport",
            self.transport(),
            &[TRANSPORT_SENDMAIL, TRANSPORT_SMTP],
        )?;
        if self.transport() == TRANSPORT_SMTP {
            let url = self.mailer.smtp_url.as_deref().unwrap_or_default();
            validation::validate_not_empty("mailer.smtp_url", url)?;
        }
        validation::validate_path("storage.path", &self.storage.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[mailer]
from = "DMARC Reports <dmarc@example.org>"
default = "postmaster@example.org"

[storage]
path = "/var/lib/dmarc-summary/summary.json"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.mailer.default, "postmaster@example.org");
        assert_eq!(config.transport(), TRANSPORT_SENDMAIL);
        assert_eq!(config.storage_path(), "/var/lib/dmarc-summary/summary.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_get_walks_slash_separated_keys() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(
            config.get("mailer/from").unwrap(),
            "DMARC Reports <dmarc@example.org>"
        );
        assert_eq!(config.get("mailer/default").unwrap(), "postmaster@example.org");
    }

    #[test]
    fn test_get_missing_key_is_system_error() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        let err = config.get("mailer/nope").unwrap_err();
        assert!(!err.is_expected());
        assert_eq!(err.to_string(), "Configuration key \"mailer/nope\" is not set");
        assert!(config.get("mailer").is_err());
    }

    #[test]
    fn test_find_separates_missing_from_malformed() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.find("mailer/sendmail_command").unwrap(), None);
        assert_eq!(config.find("storage/path/deeper").unwrap(), None);
        let err = config.find("mailer").unwrap_err();
        assert_eq!(err.to_string(), "Configuration key \"mailer\" is not a scalar value");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DMARC_SUMMARY_TEST_FROM", "robot@example.net");

        let content = r#"
[mailer]
from = "${DMARC_SUMMARY_TEST_FROM}"
default = "${DMARC_SUMMARY_TEST_UNSET}"

[storage]
path = "summary.json"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.mailer.from, "robot@example.net");
        assert_eq!(config.mailer.default, "${DMARC_SUMMARY_TEST_UNSET}");

        std::env::remove_var("DMARC_SUMMARY_TEST_FROM");
    }

    #[test]
    fn test_config_validation() {
        let content = r#"
[mailer]
from = "not an address"
default = "postmaster@example.org"

[storage]
path = "summary.json"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert!(config.validate().is_err());

        let content = r#"
[mailer]
from = "dmarc@example.org"
default = "postmaster@example.org"
transport = "smtp"

[storage]
path = "summary.json"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert!(config.validate().is_err());

        let content = r#"
[mailer]
from = "dmarc@example.org"
default = "postmaster@example.org"
transport = "carrier-pigeon"

[storage]
path = "summary.json"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_section_fails_to_load() {
        let err = TomlConfig::from_toml_str("[mailer]\nfrom = \"a@b.c\"\n").unwrap_err();
        assert!(!err.is_expected());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.mailer.from, "DMARC Reports <dmarc@example.org>");
    }
}
