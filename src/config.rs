// src/config.rs
use crate::constants::{
    ENV_TESTRAIL_EMAIL, ENV_TESTRAIL_PASSWORD, ENV_TESTRAIL_URL, ENV_TESTRAIL_VERIFY,
};
use crate::error::TestRailError;
use crate::types::{BaseUrl, Password, Username};

/// Resolved client configuration: where the instance lives and how to log in.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: BaseUrl,
    pub username: Username,
    pub password: Password,
    /// Verify TLS certificates. Reattached to every replacement session.
    pub verify_tls: bool,
}

impl ClientConfig {
    /// Builds a configuration from already validated parts.
    pub fn new(base_url: BaseUrl, username: Username, password: Password) -> Self {
        Self {
            base_url,
            username,
            password,
            verify_tls: true,
        }
    }

    pub fn with_verify_tls(self, verify_tls: bool) -> Self {
        Self { verify_tls, ..self }
    }

    /// Resolves the configuration from `TESTRAIL_URL`, `TESTRAIL_EMAIL`,
    /// `TESTRAIL_PASSWORD` and the optional `TESTRAIL_VERIFY`.
    pub fn from_env() -> Result<Self, TestRailError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, TestRailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            let message = format!("{} environment variable not set", key);
            lookup(key).ok_or(TestRailError::MissingConfiguration(message))
        };

        let base_url = BaseUrl::parse(&required(ENV_TESTRAIL_URL)?)?;
        let username = Username::new(required(ENV_TESTRAIL_EMAIL)?)?;
        let password = Password::new(required(ENV_TESTRAIL_PASSWORD)?)?;
        let verify_tls = lookup(ENV_TESTRAIL_VERIFY)
            .map(|raw| parse_flag(&raw))
            .unwrap_or(true);

        log::debug!(
            "Resolved TestRail configuration for {} as {} (verify TLS: {})",
            base_url,
            username.as_str(),
            verify_tls
        );

        Ok(Self {
            base_url,
            username,
            password,
            verify_tls,
        })
    }
}

/// Anything but an explicit "off" keeps verification enabled.
fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
