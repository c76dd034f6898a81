//! Session cookie encoding.
//!
//! The login cookie is always named `username`. What goes inside it depends
//! on the [`SessionCodec`] the server was started with.

use std::str::FromStr;

use anyhow::Context;
use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use postbox_types::api::SessionClaims;

pub const SESSION_COOKIE_NAME: &str = "username";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Plain,
    Signed,
}

impl FromStr for SessionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "signed" => Ok(Self::Signed),
            other => Err(anyhow::anyhow!(
                "unknown session mode '{}', expected 'plain' or 'signed'",
                other
            )),
        }
    }
}

#[derive(Clone)]
pub enum SessionCodec {
    /// Cookie value is the bare username. Anyone who knows a username can
    /// present it; kept for compatibility with existing clients.
    Plain,
    /// Cookie value is an HS256 JWT whose subject is the username.
    Signed { secret: String, ttl: chrono::Duration },
}

impl SessionCodec {
    pub fn signed(secret: impl Into<String>, ttl: chrono::Duration) -> Self {
        Self::Signed {
            secret: secret.into(),
            ttl,
        }
    }

    pub fn mode(&self) -> SessionMode {
        match self {
            Self::Plain => SessionMode::Plain,
            Self::Signed { .. } => SessionMode::Signed,
        }
    }

    /// Produce the cookie value for a freshly logged-in user.
    pub fn issue(&self, username: &str) -> anyhow::Result<String> {
        match self {
            Self::Plain => Ok(username.to_string()),
            Self::Signed { secret, ttl } => {
                let expires_at = chrono::Utc::now()
                    .checked_add_signed(*ttl)
                    .context("session expiry out of range")?;
                let claims = SessionClaims {
                    sub: username.to_string(),
                    exp: usize::try_from(expires_at.timestamp())
                        .context("session expiry before the epoch")?,
                };

                let token = encode(
                    &Header::default(),
                    &claims,
                    &EncodingKey::from_secret(secret.as_bytes()),
                )?;

                Ok(token)
            }
        }
    }

    /// Recover the username a cookie value claims to be, if the value is acceptable.
    /// The caller still has to check that the user exists.
    pub fn resolve(&self, value: &str) -> Option<String> {
        match self {
            Self::Plain => Some(value.to_string()),
            Self::Signed { secret, .. } => decode::<SessionClaims>(
                value,
                &DecodingKey::from_secret(secret.as_bytes()),
                &Validation::default(),
            )
            .map(|data| data.claims.sub)
            .map_err(|e| debug!("Rejected session token: {}", e))
            .ok(),
        }
    }

    pub fn cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed() -> SessionCodec {
        SessionCodec::signed("test-secret", chrono::Duration::hours(1))
    }

    #[test]
    fn parse_mode() {
        assert_eq!("plain".parse::<SessionMode>().unwrap(), SessionMode::Plain);
        assert_eq!(" Signed ".parse::<SessionMode>().unwrap(), SessionMode::Signed);
        assert!("jwt".parse::<SessionMode>().is_err());
    }

    #[test]
    fn plain_cookie_is_the_username() {
        let codec = SessionCodec::Plain;
        assert_eq!(codec.issue("alice").unwrap(), "alice");
        assert_eq!(codec.resolve("alice").as_deref(), Some("alice"));
        assert_eq!(codec.mode(), SessionMode::Plain);
    }

    #[test]
    fn signed_token_resolves_to_its_subject() {
        let codec = signed();
        let token = codec.issue("alice").unwrap();
        assert_ne!(token, "alice");
        assert_eq!(codec.resolve(&token).as_deref(), Some("alice"));
    }

    #[test]
    fn signed_rejects_bare_username() {
        assert!(signed().resolve("alice").is_none());
    }

    #[test]
    fn signed_rejects_other_secret() {
        let token = SessionCodec::signed("other-secret", chrono::Duration::hours(1))
            .issue("alice")
            .unwrap();
        assert!(signed().resolve(&token).is_none());
    }

    #[test]
    fn signed_rejects_tampered_token() {
        // Mallory's claims under Alice's signature.
        let alice: Vec<String> = signed().issue("alice").unwrap().split('.').map(String::from).collect();
        let mallory: Vec<String> = signed().issue("mallory").unwrap().split('.').map(String::from).collect();
        let forged = format!("{}.{}.{}", alice[0], mallory[1], alice[2]);
        assert!(signed().resolve(&forged).is_none());
    }

    #[test]
    fn signed_rejects_expired_token() {
        let expired = SessionCodec::signed("test-secret", chrono::Duration::hours(-2));
        let token = expired.issue("alice").unwrap();
        assert!(signed().resolve(&token).is_none());
    }

    #[test]
    fn overflowing_ttl_is_an_error() {
        let codec = SessionCodec::signed("test-secret", chrono::Duration::hours(2_000_000_000_000));
        assert!(codec.issue("alice").is_err());
    }

    #[test]
    fn cookie_attributes() {
        let cookie = SessionCodec::Plain.cookie("alice".into());
        assert_eq!(cookie.name(), "username");
        assert_eq!(cookie.value(), "alice");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
}
