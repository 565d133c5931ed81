//! HTTP layer for the dashboard backend client.
//!
//! GETs retry transient failures (5xx and transport errors) with
//! exponential backoff; POSTs push simulated client state and are
//! fire-and-forget, so they get a single attempt.

use serde::de::DeserializeOwned;
use std::time::Duration;

use regdash_core::ports::backend::ApiError;

use crate::config::ApiClientConfig;

pub(crate) struct HttpClient {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl HttpClient {
    pub(crate) fn new(config: &ApiClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        }
    }

    /// Fetch JSON from a URL and deserialize it, retrying transient errors.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.get_with_retry(url).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1);
                tokio::time::sleep(delay).await;
            }

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(ApiError::RequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    // 4xx errors or final attempt - fail immediately
                    return Err(ApiError::RequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(network_error(&e));
                        continue;
                    }
                    return Err(network_error(&e));
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ApiError::Network("unknown error during fetch".to_string())))
    }

    /// POST a JSON body, single attempt.
    pub(crate) async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| network_error(&e))?;
        check_status(url, &response)
    }

    /// POST with an empty body, single attempt.
    pub(crate) async fn post_empty(&self, url: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| network_error(&e))?;
        check_status(url, &response)
    }
}

fn check_status(url: &str, response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::RequestFailed {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

fn network_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network(format!("request timed out: {e}"))
    } else {
        ApiError::Network(e.to_string())
    }
}
