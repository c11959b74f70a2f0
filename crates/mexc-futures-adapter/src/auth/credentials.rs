/*
[INPUT]:  MEXC_API_KEY / MEXC_API_SECRET (process env, optional .env file)
[OUTPUT]: Immutable API credentials
[POS]:    Auth layer - credential loading for signed requests
[UPDATE]: When credential sources or variable names change
*/

use std::fmt;

use crate::http::{MexcError, Result};

pub const API_KEY_ENV: &str = "MEXC_API_KEY";
pub const API_SECRET_ENV: &str = "MEXC_API_SECRET";

/// API key (sent as a header) and secret (HMAC key only)
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Load credentials from the environment, reading a local `.env` first if present.
    ///
    /// Fails if either variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| MexcError::Config(format!("{name} is not set")))
        };

        Ok(Self::new(read(API_KEY_ENV)?, read(API_SECRET_ENV)?))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn api_secret(&self) -> &[u8] {
        self.api_secret.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_reads_both_values() {
        let creds = Credentials::from_lookup(lookup(&[
            (API_KEY_ENV, "mx0key"),
            (API_SECRET_ENV, "secret"),
        ]))
        .expect("credentials");

        assert_eq!(creds.api_key(), "mx0key");
        assert_eq!(creds.api_secret(), b"secret");
    }

    #[test]
    fn test_from_lookup_fails_fast_on_missing_secret() {
        let err = Credentials::from_lookup(lookup(&[(API_KEY_ENV, "mx0key")]))
            .expect_err("missing secret must fail");
        assert!(matches!(err, MexcError::Config(ref msg) if msg.contains(API_SECRET_ENV)));
    }

    #[test]
    fn test_from_lookup_rejects_blank_key() {
        let err = Credentials::from_lookup(lookup(&[(API_KEY_ENV, "  "), (API_SECRET_ENV, "s")]))
            .expect_err("blank key must fail");
        assert!(matches!(err, MexcError::Config(ref msg) if msg.contains(API_KEY_ENV)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("mx0key", "super-secret");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("mx0key"));
        assert!(!rendered.contains("super-secret"));
    }
}
