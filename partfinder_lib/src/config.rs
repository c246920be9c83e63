//! Process settings, read once at start-up from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use digikey_api::Credentials;
use thiserror::Error;

/// Errors from reading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// DigiKey credentials and endpoint selection.
#[derive(Clone, Debug)]
pub struct DigiKeySettings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub sandbox_url: String,
    pub use_sandbox: bool,
    pub timeout: Duration,
}

impl Default for DigiKeySettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_url: digikey_api::PRODUCTION_URL.to_string(),
            sandbox_url: digikey_api::SANDBOX_URL.to_string(),
            use_sandbox: false,
            timeout: digikey_api::DEFAULT_TIMEOUT,
        }
    }
}

impl DigiKeySettings {
    /// The credential pair, or `None` if either half is blank.
    pub fn credentials(&self) -> Option<Credentials> {
        let id = self.client_id.trim();
        let secret = self.client_secret.trim();
        if id.is_empty() || secret.is_empty() {
            None
        } else {
            Some(Credentials::new(id, secret))
        }
    }

    /// The sandbox or production root, depending on `use_sandbox`.
    pub fn base_url(&self) -> &str {
        if self.use_sandbox {
            &self.sandbox_url
        } else {
            &self.api_url
        }
    }
}

/// Settings for the whole gateway. Built once and passed by reference.
#[derive(Clone, Debug)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub bind_addr: SocketAddr,
    pub digikey: DigiKeySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Electronics Parts API".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            digikey: DigiKeySettings::default(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup. Missing or blank keys
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut settings = Settings::default();

        if let Some(name) = get("APP_NAME") {
            settings.app_name = name;
        }
        if let Some(version) = get("APP_VERSION") {
            settings.app_version = version;
        }
        if let Some(bind) = get("PARTFINDER_BIND") {
            settings.bind_addr = bind.parse().map_err(|e: std::net::AddrParseError| {
                SettingsError::InvalidValue {
                    key: "PARTFINDER_BIND",
                    value: bind.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        let digikey = &mut settings.digikey;
        if let Some(id) = get("DIGIKEY_CLIENT_ID") {
            digikey.client_id = id;
        }
        if let Some(secret) = get("DIGIKEY_CLIENT_SECRET") {
            digikey.client_secret = secret;
        }
        if let Some(url) = get("DIGIKEY_API_URL") {
            digikey.api_url = url;
        }
        if let Some(url) = get("DIGIKEY_SANDBOX_URL") {
            digikey.sandbox_url = url;
        }
        if let Some(flag) = get("DIGIKEY_USE_SANDBOX") {
            digikey.use_sandbox = parse_bool("DIGIKEY_USE_SANDBOX", &flag)?;
        }
        if let Some(secs) = get("DIGIKEY_TIMEOUT_SECS") {
            let parsed = secs
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| SettingsError::InvalidValue {
                    key: "DIGIKEY_TIMEOUT_SECS",
                    value: secs.clone(),
                    reason: "expected a positive number of seconds".to_string(),
                })?;
            digikey.timeout = Duration::from_secs(parsed);
        }

        Ok(settings)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
