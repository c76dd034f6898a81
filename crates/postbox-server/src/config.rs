use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::warn;

use postbox_api::session::{SessionCodec, SessionMode};

const DEFAULT_SESSION_SECRET: &str = "dev-secret-change-me";

/// Signed sessions live between one hour and one year.
const SESSION_TTL_HOURS_RANGE: std::ops::RangeInclusive<i64> = 1..=8760;

/// Server settings, read from `POSTBOX_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub session_mode: SessionMode,
    pub session_secret: String,
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("POSTBOX_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = lookup("POSTBOX_PORT")
            .unwrap_or_else(|| "8000".into())
            .parse()
            .context("POSTBOX_PORT must be a port number")?;
        let session_mode = lookup("POSTBOX_SESSION_MODE")
            .unwrap_or_else(|| "signed".into())
            .parse()?;
        let session_secret =
            lookup("POSTBOX_SESSION_SECRET").unwrap_or_else(|| DEFAULT_SESSION_SECRET.into());
        let session_ttl_hours = lookup("POSTBOX_SESSION_TTL_HOURS")
            .unwrap_or_else(|| "24".into())
            .parse()
            .context("POSTBOX_SESSION_TTL_HOURS must be a whole number of hours")?;
        if !SESSION_TTL_HOURS_RANGE.contains(&session_ttl_hours) {
            anyhow::bail!(
                "POSTBOX_SESSION_TTL_HOURS must be between {} and {}, got {}",
                SESSION_TTL_HOURS_RANGE.start(),
                SESSION_TTL_HOURS_RANGE.end(),
                session_ttl_hours
            );
        }

        Ok(Self {
            host,
            port,
            session_mode,
            session_secret,
            session_ttl_hours,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    pub fn session_codec(&self) -> SessionCodec {
        match self.session_mode {
            SessionMode::Plain => {
                warn!("Plain sessions enabled: the cookie is the bare username and is not verified");
                SessionCodec::Plain
            }
            SessionMode::Signed => {
                if self.session_secret == DEFAULT_SESSION_SECRET {
                    warn!("POSTBOX_SESSION_SECRET not set, using the development default");
                }
                SessionCodec::signed(
                    self.session_secret.clone(),
                    chrono::Duration::hours(self.session_ttl_hours),
                )
            }
        }
    }
}
