//! Shared HTTP plumbing for the route providers.
//!
//! Every adapter funnels its request through [`exchange`], which races the
//! whole send-and-decode step against the provider's time budget and the
//! caller's cancellation token.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;
use yatra_core::{ProviderId, RouteProviderError};

use super::config::RoutingConfig;

/// Error type for provider construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// A configured base URL could not be parsed.
    #[error("invalid {provider} endpoint {url:?}: {source}")]
    InvalidEndpoint {
        /// Provider the endpoint belongs to.
        provider: ProviderId,
        /// The rejected value.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// A configured base URL does not use `http` or `https`.
    #[error("{provider} endpoint {url:?} must use http or https")]
    UnsupportedScheme {
        /// Provider the endpoint belongs to.
        provider: ProviderId,
        /// The rejected value.
        url: String,
    },
}

/// Build the HTTP client shared by every provider in a chain.
///
/// # Errors
///
/// Returns [`ProviderBuildError::HttpClient`] when the TLS backend cannot be
/// initialised.
pub fn build_http_client(config: &RoutingConfig) -> Result<Client, ProviderBuildError> {
    Client::builder()
        .user_agent(&config.user_agent)
        .build()
        .map_err(ProviderBuildError::HttpClient)
}

/// Parse and check the configured base URL for `provider`.
pub(super) fn parse_base_url(
    provider: ProviderId,
    config: &RoutingConfig,
) -> Result<Url, ProviderBuildError> {
    let raw = config.endpoints.get(provider);
    let url = Url::parse(raw.trim()).map_err(|source| ProviderBuildError::InvalidEndpoint {
        provider,
        url: raw.to_owned(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProviderBuildError::UnsupportedScheme {
            provider,
            url: raw.to_owned(),
        });
    }
    Ok(url)
}

/// Append `segments` to the path of `base`, dropping any query.
pub(super) fn join_path(base: &Url, segments: &str) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    let path = format!("{}/{segments}", base.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}

/// Render `url` without credentials, query or fragment.
pub(super) fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    // Both only fail for cannot-be-a-base URLs, which never get this far.
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url.to_string()
}

/// Send `request` and decode a JSON body, bounded by `timeout` and `cancel`.
///
/// `url` is only used to describe failures and is redacted first.
pub(super) async fn exchange<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &Url,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<T, RouteProviderError> {
    let redacted = redact(url);
    let round_trip = async {
        let response = request
            .send()
            .await
            .map_err(|err| convert_reqwest_error(err, &redacted, timeout))?;
        let status = response.status();
        if !status.is_success() {
            // The body only feeds the error message; a failed read is not worth reporting.
            let body = response.text().await.unwrap_or_default();
            return Err(RouteProviderError::HttpError {
                url: redacted.clone(),
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| RouteProviderError::ParseError {
                message: err.without_url().to_string(),
            })
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(RouteProviderError::Cancelled),
        outcome = tokio::time::timeout(timeout, round_trip) => {
            outcome.unwrap_or_else(|_| Err(timeout_error(&redacted, timeout)))
        }
    }
}

fn timeout_error(url: &str, timeout: Duration) -> RouteProviderError {
    RouteProviderError::Timeout {
        url: url.to_owned(),
        timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
    }
}

/// Convert a reqwest error to a `RouteProviderError`.
fn convert_reqwest_error(error: reqwest::Error, url: &str, timeout: Duration) -> RouteProviderError {
    if error.is_timeout() {
        return timeout_error(url, timeout);
    }

    if let Some(status) = error.status() {
        return RouteProviderError::HttpError {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.without_url().to_string(),
        };
    }

    RouteProviderError::NetworkError {
        url: url.to_owned(),
        message: error.without_url().to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pick a human-readable reason out of an error response.
///
/// All three services put their explanation under `message`; anything else
/// falls back to the status reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
        })
}
