use chrono_tz::Tz;
use clap::Parser;
use listview::ExpiryPolicy;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub email: String,
    pub timezone: String,
    /// Enables the third "Expiring Soon" contract bucket when set.
    pub expiring_soon_days: Option<u32>,
    /// Log destination; logging stays off without it so the alternate
    /// screen is not scribbled over.
    pub log_file: Option<String>,
    pub log_level: String,
    pub session_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            email: String::new(),
            timezone: "Asia/Kolkata".to_string(),
            expiring_soon_days: None,
            log_file: None,
            log_level: "info".to_string(),
            session_path: crate::session::default_session_path().to_string(),
        }
    }
}

impl AppConfig {
    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy {
            expiring_within_days: self.expiring_soon_days,
        }
    }

    /// Display timezone; silently falls back to UTC on an unknown name.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(Tz::UTC)
    }
}

#[derive(Debug, Parser)]
#[command(name = "wecdesk_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override login email (password is never read from CLI).
    #[arg(long)]
    email: Option<String>,
    /// Override display timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Count contracts ending within N days as "Expiring Soon".
    #[arg(long)]
    expiring_soon_days: Option<u32>,
    /// Write tracing output to this file.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("WECDESK_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(email) = args.email {
        settings.email = email;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(days) = args.expiring_soon_days {
        settings.expiring_soon_days = Some(days);
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }

    Ok(settings)
}
