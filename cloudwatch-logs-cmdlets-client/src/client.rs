//! SigV4-signed AWS JSON 1.1 client

use crate::config::{resolve_endpoint, ClientConfig};
use crate::error::ClientError;
use crate::fault::{service_fault, success_body, transport_fault};
use crate::signing::signature_headers;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use cloudwatch_logs_cmdlets_core::{LogsApi, ServiceFault};
use serde_json::{Map, Value};
use std::time::{Instant, SystemTime};
use url::Url;

/// `X-Amz-Target` prefix for the 2014-03-28 CloudWatch Logs API
pub(crate) const TARGET_PREFIX: &str = "Logs_20140328";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const USER_AGENT: &str = concat!("cwl/", env!("CARGO_PKG_VERSION"));

/// CloudWatch Logs client for one region and endpoint
pub struct LogsClient {
    http: reqwest::Client,
    credentials: SharedCredentialsProvider,
    region: String,
    endpoint: Url,
}

impl LogsClient {
    /// Create a client using the standard AWS configuration chain.
    ///
    /// Explicit region and profile in `config` take precedence over the
    /// environment and shared config files.
    pub async fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let region = sdk_config
            .region()
            .map(|r| r.as_ref().to_string())
            .ok_or(ClientError::MissingRegion)?;
        let credentials = sdk_config
            .credentials_provider()
            .ok_or(ClientError::MissingCredentials)?;

        Self::build(config, region, credentials)
    }

    /// Create a client with fixed credentials. `config.region` is required.
    pub fn with_credentials(
        config: &ClientConfig,
        credentials: Credentials,
    ) -> Result<Self, ClientError> {
        let region = config.region.clone().ok_or(ClientError::MissingRegion)?;
        Self::build(config, region, SharedCredentialsProvider::new(credentials))
    }

    fn build(
        config: &ClientConfig,
        region: String,
        credentials: SharedCredentialsProvider,
    ) -> Result<Self, ClientError> {
        let endpoint = resolve_endpoint(&region, config.endpoint_url.as_deref())?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        log::debug!("CloudWatch Logs endpoint for {}: {}", region, endpoint);
        Ok(Self {
            http,
            credentials,
            region,
            endpoint,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn transport(&self, message: String) -> ServiceFault {
        ServiceFault::Transport {
            endpoint: self.endpoint.to_string(),
            message,
            name_resolution: false,
        }
    }
}

#[async_trait]
impl LogsApi for LogsClient {
    async fn call(
        &self,
        operation: &str,
        request: &Map<String, Value>,
    ) -> Result<Value, ServiceFault> {
        let start = Instant::now();
        let body = Value::Object(request.clone()).to_string().into_bytes();

        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|e| self.transport(format!("Failed to load AWS credentials: {e}")))?;

        let mut headers = vec![
            ("content-type".to_string(), CONTENT_TYPE.to_string()),
            (
                "x-amz-target".to_string(),
                format!("{TARGET_PREFIX}.{operation}"),
            ),
        ];
        let signed = signature_headers(
            &credentials,
            &self.region,
            self.endpoint.as_str(),
            &headers,
            &body,
            SystemTime::now(),
        )
        .map_err(|e| self.transport(e.to_string()))?;
        headers.extend(signed);

        let mut builder = self
            .http
            .post(self.endpoint.clone())
            .header("user-agent", USER_AGENT);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| transport_fault(self.endpoint.as_str(), &e))?;

        let status = response.status();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let request_id = header("x-amzn-requestid");
        let error_type = header("x-amzn-errortype");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_fault(self.endpoint.as_str(), &e))?;

        log::debug!(
            "{} returned {} in {:?} (request id {})",
            operation,
            status.as_u16(),
            start.elapsed(),
            request_id.as_deref().unwrap_or("-")
        );

        if status.is_success() {
            success_body(operation, &bytes)
        } else {
            Err(service_fault(
                status.as_u16(),
                error_type.as_deref(),
                request_id.as_deref(),
                &bytes,
            ))
        }
    }
}
