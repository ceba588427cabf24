// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use crate::constants::TESTRAIL_API_PATH;
use std::fmt;
use url::Url;

/// Base URL of a TestRail instance, always ending in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parse and validate an instance URL such as `https://example.testrail.com`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        };

        let url = Url::parse(&normalized).map_err(|e| ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ValidationError::InvalidUrl {
                    url: input.to_string(),
                    reason: format!("unsupported scheme '{}'", scheme),
                })
            }
        }

        if url.query().is_some() {
            return Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: "base URL must not carry a query string".to_string(),
            });
        }

        Ok(Self(url))
    }

    /// Get the URL as a string reference
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Root of the v2 API, e.g. `https://example.testrail.com/index.php?/api/v2/`.
    pub fn api_root(&self) -> String {
        format!("{}{}", self.0.as_str(), TESTRAIL_API_PATH)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account identifier used for basic auth (usually an email address).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField("username"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Password or API key for basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyField("password"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact credential in display
        write!(f, "********")
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password(********)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_validation() {
        let url = BaseUrl::parse("https://example.testrail.com").unwrap();
        assert_eq!(url.as_str(), "https://example.testrail.com/");
        assert_eq!(
            url.api_root(),
            "https://example.testrail.com/index.php?/api/v2/"
        );

        assert!(BaseUrl::parse("http://localhost:8080/testrail/").is_ok());
        assert!(BaseUrl::parse("ftp://example.com").is_err());
        assert!(BaseUrl::parse("not a url").is_err());
        assert!(BaseUrl::parse("https://example.com/?x=1").is_err());
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Username::new("example@mail.com").is_ok());
        assert!(Username::new("  ").is_err());
        assert!(Password::new("").is_err());
    }

    #[test]
    fn test_password_is_redacted() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(password.to_string(), "********");
        assert!(!format!("{:?}", password).contains("hunter2"));
    }
}
