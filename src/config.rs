//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Mail relay
//!
//! ```bash
//! export SMTP_HOST="smtp.gmail.com"
//! export SMTP_PORT="587"
//! export SMTP_SECURE="false"          # true = implicit TLS (465), none = plaintext
//! export SMTP_USER="me@gmail.com"
//! export SMTP_PASS="app-password"
//! export RECEIVER_EMAIL="me@gmail.com"
//! ```
//!
//! Missing or unparsable `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS` and
//! `RECEIVER_EMAIL` never stop the server from starting. They are carried as
//! absent and every submission then fails at dispatch time.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SMTP_FROM` - Sender of the acknowledgement (default: `SMTP_USER`)
//! - `CONTACT_SIGNATURE` - Sign-off of the acknowledgement (default: `The Portfolio Team`)
//! - `MAIL_DRY_RUN` - Log messages instead of sending them (default: `false`)
//! - `CMS_PROJECT_ID` - Sanity project; enables the portfolio API when set
//! - `CMS_DATASET` - Sanity dataset (default: `production`)
//! - `CMS_API_VERSION` - Sanity API version date (default: `2023-01-01`)
//! - `CMS_USE_CDN` - Query the API CDN (default: `true`)
//! - `CMS_REVALIDATE_SECONDS` - Portfolio snapshot lifetime (default: 10)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpSecurity {
    /// TLS from the first byte, usually port 465.
    Implicit,
    /// Plain connection upgraded with STARTTLS, usually port 587.
    #[default]
    StartTls,
    /// No encryption. Only for local mail catchers.
    Plain,
}

impl FromStr for SmtpSecurity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "tls" => Ok(SmtpSecurity::Implicit),
            "false" | "0" | "starttls" => Ok(SmtpSecurity::StartTls),
            "none" | "plain" => Ok(SmtpSecurity::Plain),
            other => anyhow::bail!(
                "SMTP_SECURE must be 'true', 'false' or 'none', got '{}'",
                other
            ),
        }
    }
}

/// Mail relay connection settings.
#[derive(Clone, Default)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub security: SmtpSecurity,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Headless CMS (Sanity) settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsSettings {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,

    pub smtp: SmtpSettings,
    /// Owner inbox that receives notifications (`RECEIVER_EMAIL`).
    pub receiver_email: Option<String>,
    /// Sender of the acknowledgement (`SMTP_FROM`, falling back to `SMTP_USER`).
    pub sender_email: Option<String>,
    pub contact_signature: String,
    /// When true, messages are logged instead of sent.
    pub mail_dry_run: bool,

    /// `None` when `CMS_PROJECT_ID` is not set.
    pub cms: Option<CmsSettings>,
    pub cms_revalidate_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SMTP_SECURE` has an unknown value.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let smtp = Self::load_smtp_settings().context("Failed to load SMTP configuration")?;

        let receiver_email = non_empty_var("RECEIVER_EMAIL");
        let sender_email = non_empty_var("SMTP_FROM").or_else(|| smtp.user.clone());
        let contact_signature =
            non_empty_var("CONTACT_SIGNATURE").unwrap_or_else(|| "The Portfolio Team".to_string());

        let mail_dry_run = flag_var("MAIL_DRY_RUN").unwrap_or(false);

        let cms = Self::load_cms_settings();

        let cms_revalidate_seconds = env::var("CMS_REVALIDATE_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            smtp,
            receiver_email,
            sender_email,
            contact_signature,
            mail_dry_run,
            cms,
            cms_revalidate_seconds,
        })
    }

    /// Loads SMTP settings. Absent or unparsable values are kept as `None`.
    fn load_smtp_settings() -> Result<SmtpSettings> {
        let security = match non_empty_var("SMTP_SECURE") {
            Some(value) => value.parse()?,
            None => SmtpSecurity::default(),
        };

        Ok(SmtpSettings {
            host: non_empty_var("SMTP_HOST"),
            port: non_empty_var("SMTP_PORT").and_then(|v| v.parse().ok()),
            security,
            user: non_empty_var("SMTP_USER"),
            password: non_empty_var("SMTP_PASS"),
        })
    }

    /// Loads CMS settings. Returns `None` if `CMS_PROJECT_ID` is not set.
    fn load_cms_settings() -> Option<CmsSettings> {
        let project_id = non_empty_var("CMS_PROJECT_ID")?;

        Some(CmsSettings {
            project_id,
            dataset: non_empty_var("CMS_DATASET").unwrap_or_else(|| "production".to_string()),
            api_version: non_empty_var("CMS_API_VERSION")
                .unwrap_or_else(|| "2023-01-01".to_string()),
            use_cdn: flag_var("CMS_USE_CDN").unwrap_or(true),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `cms_revalidate_seconds` is zero
    /// - the CMS project id or dataset contains characters outside `[a-z0-9_-]`
    pub fn validate(&self) -> Result<()> {
        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.cms_revalidate_seconds == 0 {
            anyhow::bail!("CMS_REVALIDATE_SECONDS must be greater than 0");
        }

        if let Some(ref cms) = self.cms {
            for (name, value) in [
                ("CMS_PROJECT_ID", &cms.project_id),
                ("CMS_DATASET", &cms.dataset),
            ] {
                if !value
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
                {
                    anyhow::bail!(
                        "{} may only contain lowercase letters, digits, '-' and '_', got '{}'",
                        name,
                        value
                    );
                }
            }
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if self.mail_dry_run {
            tracing::info!("  Mail: dry run (messages are logged, not sent)");
        } else {
            tracing::info!(
                "  SMTP: {} ({:?})",
                describe_relay(&self.smtp),
                self.smtp.security
            );
        }

        tracing::info!(
            "  Receiver: {}",
            self.receiver_email.as_deref().unwrap_or("<not set>")
        );
        tracing::info!(
            "  Sender: {}",
            self.sender_email.as_deref().unwrap_or("<not set>")
        );

        match self.cms {
            Some(ref cms) => tracing::info!(
                "  CMS: {}/{} (cdn: {}, revalidate: {}s)",
                cms.project_id,
                cms.dataset,
                cms.use_cdn,
                self.cms_revalidate_seconds
            ),
            None => tracing::info!("  CMS: disabled"),
        }
    }
}

/// Describes the relay as `user:***@host:port`, leaving out the password.
fn describe_relay(smtp: &SmtpSettings) -> String {
    let host = smtp.host.as_deref().unwrap_or("<host not set>");
    let port = smtp
        .port
        .map_or_else(|| "<port not set>".to_string(), |p| p.to_string());

    match (&smtp.user, &smtp.password) {
        (Some(user), Some(_)) => format!("{}:***@{}:{}", user, host, port),
        (Some(user), None) => format!("{}@{}:{}", user, host, port),
        _ => format!("{}:{}", host, port),
    }
}

/// Reads a variable, treating an empty value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Reads a boolean flag (`true`/`1` or `false`/`0`).
fn flag_var(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        None
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables are malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
