use crate::error::{AppError, Result};
use crate::home::{grouping::SectionLabels, scroll::ScrollGeometry};
use config::{Config, Environment, File};
use pocket_api::endpoints::postings::DEFAULT_PAGE_SIZE;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

/// Application settings, layered from defaults, an optional TOML file and
/// `POCKET__`-prefixed environment variables (`POCKET__API__TOKEN`, ...)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub home: HomeSettings,
    pub refresh: RefreshSettings,
    pub labels: SectionLabels,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_secret")]
    pub token: Option<SecretString>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: pocket_api::DEFAULT_BASE_URL.to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HomeSettings {
    pub page_size: u32,
    pub debounce_ms: u64,
    /// Layout units that make up one terminal row
    pub units_per_row: f32,
    pub geometry: ScrollGeometry,
}

impl Default for HomeSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: 400,
            units_per_row: 25.0,
            geometry: ScrollGeometry::default(),
        }
    }
}

impl HomeSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Period of the background account refresh, 0 disables it
    pub accounts_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self { accounts_secs: 60 }
    }
}

impl RefreshSettings {
    pub fn accounts_interval(&self) -> Option<Duration> {
        (self.accounts_secs > 0).then(|| Duration::from_secs(self.accounts_secs))
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl Settings {
    /// Load settings from `POCKET_CONFIG` (or the default config file) and the environment
    pub fn new() -> Result<Self> {
        let path = match std::env::var("POCKET_CONFIG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => Self::default_path()?,
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("POCKET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(AppError::MissingDirectory("config"))?;
        Ok(dir.join("pocket").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        match &self.api.token {
            Some(token) if !token.expose_secret().trim().is_empty() => {}
            _ => {
                return Err(AppError::InvalidConfig(
                    "api.token is required (set POCKET__API__TOKEN)".to_string(),
                ))
            }
        }
        if !self.api.base_url.starts_with("http") {
            return Err(AppError::InvalidConfig(
                "api.base_url must be a valid HTTP(S) URL".to_string(),
            ));
        }
        if self.home.page_size == 0 {
            return Err(AppError::InvalidConfig(
                "home.page_size must be greater than zero".to_string(),
            ));
        }
        if self.home.units_per_row <= 0.0 {
            return Err(AppError::InvalidConfig(
                "home.units_per_row must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn with_token(token: &str) -> Settings {
        Settings {
            api: ApiSettings {
                token: Some(SecretString::from(token.to_string())),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_the_home_screen_constants() {
        let settings = Settings::default();
        assert_eq!(settings.home.page_size, 30);
        assert_eq!(settings.home.debounce(), Duration::from_millis(400));
        assert_eq!(settings.labels.today, "Today");
        assert_eq!(settings.home.geometry.bottom_bound, 310.0);
    }

    #[test]
    fn validate_requires_a_token() {
        assert!(Settings::default().validate().is_err());
        assert!(with_token("   ").validate().is_err());
        assert!(with_token("secret").validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut settings = with_token("secret");
        settings.api.base_url = "ftp://example.com".to_string();
        assert!(settings.validate().is_err());

        let mut settings = with_token("secret");
        settings.home.page_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn disabled_refresh_has_no_interval() {
        let refresh = RefreshSettings { accounts_secs: 0 };
        assert_eq!(refresh.accounts_interval(), None);
        assert_eq!(
            RefreshSettings::default().accounts_interval(),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn reads_a_toml_file() {
        let dir = std::env::temp_dir().join(format!("pocket-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://ledger.test"
token = "abc"

[home]
page_size = 10

[labels]
today = "Heute"
"#
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.api.base_url, "https://ledger.test");
        assert_eq!(settings.home.page_size, 10);
        assert_eq!(settings.home.debounce_ms, 400);
        assert_eq!(settings.labels.today, "Heute");
        assert_eq!(settings.labels.yesterday, "Yesterday");
        assert!(settings.validate().is_ok());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
