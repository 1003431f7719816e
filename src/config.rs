use std::time::Duration;

use crate::error::PdError;
use crate::version::ProductVersion;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Connection settings shared by every lifecycle call.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Base URL of the server, e.g. `https://localhost:1443`.
    pub https_host: String,
    pub username: String,
    pub password: String,
    pub product_version: ProductVersion,
    /// Skip TLS certificate verification. Test environments only.
    pub insecure_trust_all_tls: bool,
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Validates raw settings. Every missing setting is reported in one error.
    pub fn from_parts(
        https_host: Option<String>,
        username: Option<String>,
        password: Option<String>,
        product_version: Option<String>,
        insecure_trust_all_tls: bool,
    ) -> Result<Self, PdError> {
        let mut missing = Vec::new();
        let mut require = |value: Option<String>, setting: &'static str| match value {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(setting);
                String::new()
            }
        };

        let https_host = require(https_host, "https_host (PINGDIRECTORY_PROVIDER_HTTPS_HOST)");
        let username = require(username, "username (PINGDIRECTORY_PROVIDER_USERNAME)");
        let password = require(password, "password (PINGDIRECTORY_PROVIDER_PASSWORD)");
        let product_version = require(
            product_version,
            "product_version (PINGDIRECTORY_PROVIDER_PRODUCT_VERSION)",
        );

        if !missing.is_empty() {
            return Err(PdError::Config(format!(
                "missing provider settings: {}",
                missing.join(", ")
            )));
        }

        if !https_host.starts_with("https://") {
            return Err(PdError::Config(format!(
                "https_host must start with https://, got '{https_host}'"
            )));
        }

        let product_version = ProductVersion::parse_supported(&product_version)?;

        Ok(Self {
            https_host,
            username,
            password,
            product_version,
            insecure_trust_all_tls,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("https_host", &self.https_host)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("product_version", &self.product_version)
            .field("insecure_trust_all_tls", &self.insecure_trust_all_tls)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::V9_2;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_from_parts_valid() {
        let config = ProviderConfig::from_parts(
            some("https://localhost:1443"),
            some("cn=administrator"),
            some("2FederateM0re"),
            some("9.2"),
            false,
        )
        .unwrap();
        assert_eq!(config.product_version, V9_2);
        assert_eq!(
            config.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_from_parts_reports_all_missing_settings() {
        let err = ProviderConfig::from_parts(None, some(""), None, some("9.3"), false).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("https_host"));
        assert!(message.contains("username"));
        assert!(message.contains("password"));
        assert!(!message.contains("product_version"));
    }

    #[test]
    fn test_from_parts_rejects_plain_http() {
        let err = ProviderConfig::from_parts(
            some("http://localhost:1389"),
            some("cn=administrator"),
            some("pw"),
            some("9.3"),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("https://"));
    }

    #[test]
    fn test_from_parts_rejects_unsupported_version() {
        let err = ProviderConfig::from_parts(
            some("https://localhost:1443"),
            some("cn=administrator"),
            some("pw"),
            some("8.0"),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, PdError::Version(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ProviderConfig::from_parts(
            some("https://localhost:1443"),
            some("cn=administrator"),
            some("hunter2-secret"),
            some("9.3"),
            false,
        )
        .unwrap();
        let output = format!("{config:?}");
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("hunter2-secret"));
    }
}
