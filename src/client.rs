//! HTTP request execution with exponential-backoff retry.

use crate::error::FetchError;
use crate::types::FetchConfig;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio_retry2::strategy::ExponentialBackoff;
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// Outcome of a single attempt that still has (or has run out of) retries.
///
/// A 504 keeps the response around so the last one can be handed back to the
/// caller once retries are exhausted; a transport error is terminal.
#[derive(Error, Debug)]
enum AttemptFailure {
    #[error("504 Gateway Timeout from {}", .0.url())]
    GatewayTimeout(Box<Response>),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("request cannot be cloned for a retry attempt")]
    Unclonable,
}

/// HTTP client wrapper that retries transient failures.
///
/// A request is attempted up to `max_retries + 1` times. Retries happen when
/// the response status is 504 or the transport itself errors; every other
/// status is returned immediately for the caller to inspect. Waits double
/// from `initial_backoff` (1, 2, 4, 8, 16 seconds with the defaults).
///
/// The two exhaustion paths differ on purpose: repeated 504s hand back the
/// last response as-is, while repeated transport errors propagate as
/// [`FetchError`]. Callers must status-check responses themselves.
pub struct RetryingClient {
    http: reqwest::Client,
    config: FetchConfig,
}

impl RetryingClient {
    /// Builds a client carrying the configured User-Agent.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Starts a GET request; finish it with headers/query and pass it to
    /// [`execute`](Self::execute).
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url)
    }

    /// Sends a request with retry on 504 and transport failures.
    ///
    /// # Returns
    ///
    /// The first response with a non-504 status, or the last 504 response
    /// once retries are exhausted. Transport errors that survive all
    /// retries are returned as `Err`.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let attempt = || {
            let next = request.try_clone();
            async move {
                let next = match next {
                    Some(builder) => builder,
                    None => return RetryError::to_permanent(AttemptFailure::Unclonable),
                };
                match next.send().await {
                    Ok(response) if response.status() == StatusCode::GATEWAY_TIMEOUT => {
                        RetryError::to_transient(AttemptFailure::GatewayTimeout(Box::new(response)))
                    }
                    Ok(response) => Ok(response),
                    Err(e) => RetryError::to_transient(AttemptFailure::Transport(e)),
                }
            }
        };

        match Retry::spawn_notify(retry_schedule(&self.config), attempt, log_retry).await {
            Ok(response) => Ok(response),
            // Retries exhausted on 504: pass the last response through.
            Err(AttemptFailure::GatewayTimeout(response)) => Ok(*response),
            Err(AttemptFailure::Transport(e)) => Err(e.into()),
            Err(AttemptFailure::Unclonable) => Err(FetchError::RequestFailed(
                "request body cannot be cloned for retry".to_string(),
            )),
        }
    }
}

/// Backoff waits for one request: `initial_backoff` doubling on every retry,
/// `max_retries` entries long.
fn retry_schedule(config: &FetchConfig) -> impl Iterator<Item = Duration> {
    let factor = (config.initial_backoff.as_millis() as u64 / 2).max(1);
    ExponentialBackoff::from_millis(2)
        .factor(factor)
        .take(config.max_retries as usize)
}

fn log_retry(error: &AttemptFailure, wait: Duration) {
    warn!(
        "Request failed: {}, retrying in {}...",
        error,
        humantime::format_duration(wait)
    );
}
