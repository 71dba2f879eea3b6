//! Single-request page fetcher.
//!
//! Every request carries a `User-Agent` from the injected provider plus fixed
//! `Accept` and `Accept-Language` headers. There is no retry: a status of 400
//! or above is reported once, through the notifier and the returned
//! [`FetchOutcome::Rejected`], and the caller decides what to do with it.

use crate::error::Result;
use crate::models::FetchFailure;
use crate::notify::Notifier;
use crate::user_agent::UserAgentProvider;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.8,en-US;q=0.5,en;q=0.3";

/// Optional per-request transport settings.
#[derive(Debug, Default, Clone)]
pub struct RequestParams {
    /// Extra query-string pairs appended to the URL.
    pub query: Vec<(String, String)>,
    /// Overrides the client-wide timeout for this request.
    pub timeout: Option<Duration>,
    /// Skip the notifier on an error status; the rejection is still returned.
    pub silent: bool,
}

/// What the server answered, when it answered at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Status below 400; the decoded body text.
    Body(String),
    /// Status 400 or above.
    Rejected(FetchFailure),
}

/// HTTP client that sends the browser-like headers and reports rejections.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agents: Arc<dyn UserAgentProvider>,
    notifier: Arc<dyn Notifier>,
    /// Deployment tag printed in diagnostics.
    environment: Option<String>,
    /// Name of the calling unit, printed in diagnostics.
    unit: String,
}

impl Fetcher {
    /// Build a fetcher around a fresh `reqwest` client.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Client-wide request timeout
    /// * `unit` - Name printed in failure diagnostics
    /// * `environment` - Deployment tag printed in failure diagnostics
    /// * `user_agents` - Source of the `User-Agent` header
    /// * `notifier` - Receives the diagnostic of every non-silent rejection
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend of the client cannot be initialized.
    pub fn new(
        timeout: Duration,
        unit: impl Into<String>,
        environment: Option<String>,
        user_agents: Arc<dyn UserAgentProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            user_agents,
            notifier,
            environment,
            unit: unit.into(),
        })
    }

    /// GET `url` and return its body, or the rejection if the status is 400+.
    ///
    /// Transport errors (DNS, connect, timeout) are returned as `Err`.
    #[instrument(level = "info", skip(self, params))]
    pub async fn get_data(&self, url: &str, params: &RequestParams) -> Result<FetchOutcome> {
        let user_agent = self.user_agents.user_agent();
        debug!(%user_agent, "Sending request");

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT, DEFAULT_ACCEPT)
            .header(ACCEPT_LANGUAGE, DEFAULT_ACCEPT_LANGUAGE);
        if !params.query.is_empty() {
            request = request.query(&params.query);
        }
        if let Some(timeout) = params.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let diagnostic =
                failure_diagnostic(self.environment.as_deref(), &self.unit, status.as_u16());
            if params.silent {
                debug!(status = status.as_u16(), "Request rejected; notification suppressed");
            } else {
                self.notifier.notify(&diagnostic);
            }
            return Ok(FetchOutcome::Rejected(FetchFailure {
                status: status.as_u16(),
                diagnostic,
            }));
        }

        let body = response.text().await?;
        info!(status = status.as_u16(), bytes = body.len(), "Fetched page");
        Ok(FetchOutcome::Body(body))
    }
}

/// Message sent to the alerting channel when a page answers with an error.
pub fn failure_diagnostic(environment: Option<&str>, unit: &str, status: u16) -> String {
    format!(
        "ENVIRONMENT: {}\nParser error in {}\nStatus code: {}",
        environment.unwrap_or("None"),
        unit,
        status
    )
}
