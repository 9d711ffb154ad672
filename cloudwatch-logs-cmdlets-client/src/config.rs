//! Client configuration and endpoint resolution

use crate::error::ClientError;
use std::time::Duration;
use url::Url;

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for building a [`crate::LogsClient`].
///
/// Unset fields fall back to the standard AWS configuration chain
/// (environment, shared config files, instance metadata).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    /// Replaces the regional endpoint, e.g. for a local emulator
    pub endpoint_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}

/// Endpoint for `region`, or the parsed override when one is given
pub fn resolve_endpoint(region: &str, endpoint_url: Option<&str>) -> Result<Url, ClientError> {
    let endpoint = match endpoint_url {
        Some(url) => url.to_string(),
        None if region.starts_with("cn-") => format!("https://logs.{region}.amazonaws.com.cn/"),
        None => format!("https://logs.{region}.amazonaws.com/"),
    };

    Url::parse(&endpoint).map_err(|source| ClientError::InvalidEndpoint { endpoint, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("us-east-1", "https://logs.us-east-1.amazonaws.com/")]
    #[case("eu-west-2", "https://logs.eu-west-2.amazonaws.com/")]
    #[case("cn-north-1", "https://logs.cn-north-1.amazonaws.com.cn/")]
    fn test_regional_endpoints(#[case] region: &str, #[case] expected: &str) {
        let url = resolve_endpoint(region, None).unwrap();
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn test_endpoint_override_wins() {
        let url = resolve_endpoint("us-east-1", Some("http://localhost:4566")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4566/");
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let err = resolve_endpoint("us-east-1", Some("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(ClientConfig::default().timeout(), DEFAULT_TIMEOUT);
        let config = ClientConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
