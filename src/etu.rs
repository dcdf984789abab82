use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub mod schedule;

use crate::json_util::improve_json_error;
use crate::query::ScheduleQuery;
use schedule::ScheduleDocument;

pub const DEFAULT_BASE_URL: &str = "https://digital.etu.ru/api/mobile/";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Anything that can answer a [`ScheduleQuery`] with a [`ScheduleDocument`].
///
/// One call is one remote request: no retries, no caching.
pub trait ScheduleSource {
    /// # Errors
    /// Fails if the request could not be sent, the server did not respond with
    /// a success status, or the body is not a valid schedule document.
    fn fetch(&self, query: &ScheduleQuery) -> Result<ScheduleDocument>;
}

/// Blocking client for the ETU mobile schedule API.
#[derive(Debug, Clone)]
pub struct EtuClient {
    http_client: Client,
    base_url: Url,
}

impl EtuClient {
    /// # Errors
    /// Fails if the base URL is unusable or the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self> {
        validate_base_url(&base_url).context("Invalid schedule API URL")?;

        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Could not build HTTP client")?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request to the relative URL with the given query parameters
    fn get(&self, relative_url: &str, query: &[(&str, String)]) -> Result<String> {
        let url: Url = self
            .base_url
            .join(relative_url)
            .context("Could not create URL")?;
        log::debug!("GET {url} {query:?}");
        let ctx = || format!("Could not send GET request to {url}");
        let resp: Response = self
            .http_client
            .get(url.clone())
            .header("Accept", "application/json")
            .query(query)
            .send()
            .with_context(ctx)?;
        let text: String = handle_response(resp).with_context(ctx)?;
        Ok(text)
    }

    /// Sends a GET request to the relative URL and decodes the JSON body
    fn get_json<J>(&self, url: &str, query: &[(&str, String)]) -> Result<J>
    where
        J: DeserializeOwned,
    {
        let text: String = self.get(url, query)?;
        let json: J = serde_json::from_str(&text)
            .map_err(|e| improve_json_error(&e, &text))
            .with_context(|| {
                format!("Could not extract JSON from success response from GET request to {url}")
            })?;
        Ok(json)
    }
}

impl ScheduleSource for EtuClient {
    fn fetch(&self, query: &ScheduleQuery) -> Result<ScheduleDocument> {
        self.fetch_schedule(query)
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    error: Option<String>,
    detail: Option<String>,
}

fn handle_response(response: Response) -> Result<String> {
    let status: StatusCode = response.status();
    log::debug!("Response status {status}");
    let text: String = response
        .text()
        .with_context(|| format!("Could not extract text from response with status {status}"))?;

    if status.is_success() {
        return Ok(text);
    }

    // Request was not successful
    let message: String = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(json) => extract_error(json).unwrap_or_else(|| shorten(&text)),
        Err(err) => {
            log::warn!("Could not parse error json response: {err}");
            shorten(&text)
        }
    };

    bail!("Request failed with status {status}: {message}");
}

fn extract_error(err: ErrorResponse) -> Option<String> {
    [err.message, err.error, err.detail]
        .into_iter()
        .flatten()
        .map(|msg| msg.trim().to_owned())
        .find(|msg| !msg.is_empty())
}

/// Error pages can be whole HTML documents; keep the log line readable.
fn shorten(text: &str) -> String {
    const MAX_CHARS: usize = 200;
    let text = text.trim();
    if text.is_empty() {
        return String::from("<empty body>");
    }
    if text.chars().count() <= MAX_CHARS {
        return text.to_owned();
    }
    let mut short: String = text.chars().take(MAX_CHARS).collect();
    short.push_str("...");
    short
}

fn validate_base_url(url: &Url) -> Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        bail!("URL scheme is {:?} instead of http(s)", url.scheme());
    }
    if url.cannot_be_a_base() {
        bail!("URL {url} cannot be used as a base");
    }
    if let Some(query) = url.query() {
        bail!("Expected no query, got {query}");
    }
    if let Some(frag) = url.fragment() {
        bail!("Expected no fragment, got {frag}");
    }
    Ok(())
}
