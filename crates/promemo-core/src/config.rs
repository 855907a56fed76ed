//! Service configuration.
//!
//! Lives at `~/.promemo/config.toml`. Twilio credentials and the reminder
//! recipient can also arrive through the environment (`TWILIO_ACCOUNT_SID`,
//! `TWILIO_AUTH_TOKEN`, `TWILIO_WHATSAPP_NUMBER`, `MY_WHATSAPP_NUMBER`,
//! `PORT`), which wins over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PromemoError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromemoConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub reminder: ReminderConfig,
    /// Absent means: log reminders instead of sending them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twilio: Option<TwilioConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database path; defaults to `~/.promemo/planner.db`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn db_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PromemoConfig::home_dir().join("planner.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Scan period in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Single fixed recipient for all reminders.
    #[serde(default)]
    pub recipient: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            recipient: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender address, e.g. `whatsapp:+123456789`.
    pub from_number: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}
fn default_interval_secs() -> u64 {
    3600
}
fn default_http_timeout_secs() -> u64 {
    30
}

impl PromemoConfig {
    /// Promemo home directory (`~/.promemo`).
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".promemo")
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Load from the default path, falling back to defaults when the file
    /// does not exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| PromemoError::config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| PromemoError::config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Fold environment variables over the file values.
    pub fn apply_env_overrides(&mut self) {
        let sid = std::env::var("TWILIO_ACCOUNT_SID").ok();
        let token = std::env::var("TWILIO_AUTH_TOKEN").ok();
        let from = std::env::var("TWILIO_WHATSAPP_NUMBER").ok();
        if sid.is_some() || token.is_some() || from.is_some() {
            let twilio = self.twilio.get_or_insert_with(TwilioConfig::default);
            if let Some(v) = sid {
                twilio.account_sid = v;
            }
            if let Some(v) = token {
                twilio.auth_token = v;
            }
            if let Some(v) = from {
                twilio.from_number = v;
            }
        }
        if let Ok(v) = std::env::var("MY_WHATSAPP_NUMBER") {
            self.reminder.recipient = v;
        }
        if let Ok(port) = std::env::var("PORT").map(|v| v.parse()) {
            if let Ok(port) = port {
                self.gateway.port = port;
            }
        }
    }

    /// Reminder scan period.
    pub fn reminder_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.reminder.interval_secs.max(1))
    }
}
