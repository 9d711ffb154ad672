//! SigV4 request signing

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use std::time::SystemTime;
use thiserror::Error;

pub(crate) const SIGNING_NAME: &str = "logs";

#[derive(Debug, Error)]
pub(crate) enum SigningError {
    #[error("Failed to build signing params: {0}")]
    Params(String),

    #[error("Failed to sign request: {0}")]
    Sign(#[from] aws_sigv4::http_request::SigningError),
}

/// Headers to add to a `POST` so it carries a valid SigV4 signature
pub(crate) fn signature_headers(
    credentials: &Credentials,
    region: &str,
    url: &str,
    headers: &[(String, String)],
    body: &[u8],
    time: SystemTime,
) -> Result<Vec<(String, String)>, SigningError> {
    let signable_request = SignableRequest::new(
        "POST",
        url,
        headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
        SignableBody::Bytes(body),
    )?;

    let identity: Identity = credentials.clone().into();
    let signing_params = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(SIGNING_NAME)
        .time(time)
        .settings(SigningSettings::default())
        .build()
        .map_err(|e| SigningError::Params(e.to_string()))?
        .into();

    let (instructions, _signature) = sign(signable_request, &signing_params)?.into_parts();

    Ok(instructions
        .headers()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect())
}
