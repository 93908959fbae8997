// SPDX-License-Identifier: MPL-2.0
//! Network boundary of the submission controller.
//!
//! [`Transport`] is what the runtime calls to perform a submission;
//! [`HttpTransport`] is the `reqwest`-backed implementation used by the
//! binary.

use std::future::Future;

use reqwest::{Client, Url};

use super::outcome::{Outcome, ResponseFields};
use super::{FormId, SessionId};
use crate::config::SubmissionConfig;
use crate::error::{Error, Result};

/// Form fields in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// One network call the host must perform for a started session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub form: FormId,
    pub session: SessionId,
    pub endpoint: String,
    pub payload: Payload,
}

/// Performs submissions.
///
/// Every failure, including the transport's own timeout, must resolve to
/// an [`Outcome::Failure`]; the future never errors or panics.
pub trait Transport {
    fn submit(&self, request: &SubmitRequest) -> impl Future<Output = Outcome>;
}

/// Form-encoded POST over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Option<Url>,
    fields: ResponseFields,
    csrf_field: String,
}

impl HttpTransport {
    /// Builds a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unparseable `base_url` and
    /// [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &SubmissionConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|err| Error::Config(format!("base_url: {err}")))?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url,
            fields: ResponseFields::from(config),
            csrf_field: config.csrf_field.clone(),
        })
    }

    /// Resolves a form endpoint, which may be relative to the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the endpoint is not a valid URL.
    pub fn resolve(&self, endpoint: &str) -> Result<Url> {
        let resolved = match &self.base_url {
            Some(base) => base.join(endpoint),
            None => Url::parse(endpoint),
        };
        resolved.map_err(|err| Error::Transport(format!("{endpoint}: {err}")))
    }
}

impl Transport for HttpTransport {
    async fn submit(&self, request: &SubmitRequest) -> Outcome {
        let url = match self.resolve(&request.endpoint) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(error = %err, "cannot resolve submission endpoint");
                return Outcome::network();
            }
        };

        let mut builder = self.client.post(url).form(request.payload.fields());
        if let Some(token) = request.payload.get(&self.csrf_field) {
            builder = builder.header("X-CSRFToken", token);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, form = %request.form, "submission request failed");
                return Outcome::network();
            }
        };
        let status_ok = response.status().is_success();
        match response.text().await {
            Ok(body) => Outcome::from_response(status_ok, &body, &self.fields),
            Err(err) => {
                tracing::warn!(error = %err, form = %request.form, "submission body unreadable");
                Outcome::network()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_get_returns_first_value() {
        let payload = Payload::new()
            .with_field("name", "first")
            .with_field("name", "second")
            .with_field("csrfmiddlewaretoken", "t0k");

        assert_eq!(payload.get("name"), Some("first"));
        assert_eq!(payload.get("csrfmiddlewaretoken"), Some("t0k"));
        assert_eq!(payload.get("missing"), None);
        assert_eq!(payload.iter().count(), 3);
    }

    #[test]
    fn payload_collects_from_pairs() {
        let payload: Payload = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(payload.fields().len(), 2);
        assert!(!payload.is_empty());
    }

    #[test]
    fn relative_endpoints_join_base_url() {
        let config = SubmissionConfig {
            base_url: Some("https://sites.example/app/".to_string()),
            ..SubmissionConfig::default()
        };
        let transport = HttpTransport::new(&config).expect("client");

        assert_eq!(
            transport.resolve("generate/").unwrap().as_str(),
            "https://sites.example/app/generate/"
        );
        assert_eq!(
            transport.resolve("/generate/").unwrap().as_str(),
            "https://sites.example/generate/"
        );
    }

    #[test]
    fn relative_endpoint_without_base_is_an_error() {
        let transport = HttpTransport::new(&SubmissionConfig::default()).expect("client");
        assert!(matches!(
            transport.resolve("/generate/"),
            Err(Error::Transport(_))
        ));
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let config = SubmissionConfig {
            base_url: Some("not a url".to_string()),
            ..SubmissionConfig::default()
        };
        assert!(matches!(HttpTransport::new(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_failure() {
        let config = SubmissionConfig {
            request_timeout_ms: 500,
            ..SubmissionConfig::default()
        };
        let transport = HttpTransport::new(&config).expect("client");
        let request = SubmitRequest {
            form: FormId(0),
            session: SessionId(0),
            // Port 9 (discard) on loopback is closed in test environments.
            endpoint: "http://127.0.0.1:9/generate/".to_string(),
            payload: Payload::new(),
        };

        assert_eq!(transport.submit(&request).await, Outcome::network());
    }
}
