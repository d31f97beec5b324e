//! Authenticated JSON-over-HTTP POST transport shared by both endpoints.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ServiceError;

/// POSTs JSON with a bearer token and decodes a JSON reply.
#[derive(Clone)]
pub struct JsonTransport {
    client: Client,
    token: SecretString,
}

impl JsonTransport {
    /// Build a transport whose every request is bounded by `timeout`.
    pub fn new(token: SecretString, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::ClientSetup(e.to_string()))?;
        Ok(Self { client, token })
    }

    /// POST `body` to `url`; `endpoint` names the collaborator in errors.
    ///
    /// Transport failures, timeouts, non-2xx statuses and undecodable bodies
    /// each map to their own [`ServiceError`] variant.
    pub async fn post<B, R>(&self, endpoint: &'static str, url: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(endpoint, url, "POST");

        let response = self
            .client
            .post(url)
            .bearer_auth(self.token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| request_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response.json::<R>().await.map_err(|e| {
            if e.is_timeout() {
                ServiceError::Timeout { endpoint }
            } else {
                ServiceError::MalformedResponse {
                    endpoint,
                    reason: e.to_string(),
                }
            }
        })
    }
}

fn request_error(endpoint: &'static str, e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout { endpoint }
    } else {
        ServiceError::Transport {
            endpoint,
            reason: e.to_string(),
        }
    }
}
