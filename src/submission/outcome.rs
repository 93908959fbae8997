// SPDX-License-Identifier: MPL-2.0
//! Result of one submission, as seen by the controller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SubmissionConfig;

/// How a submission ended. Exactly two variants: the controller never
/// inspects raw response data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { resource_id: String },
    Failure(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub cause: FailureCause,
    /// Application-supplied description, shown verbatim when present.
    pub message: Option<String>,
}

/// Why a submission failed. All causes are shown to the user the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    /// No response: connectivity loss or network-layer timeout.
    Network,
    /// A response arrived but could not be understood.
    Malformed,
    /// The application answered and refused the submission.
    Rejected,
}

/// Names of the response fields the classifier looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFields {
    pub success_field: String,
    pub error_field: String,
}

impl From<&SubmissionConfig> for ResponseFields {
    fn from(config: &SubmissionConfig) -> Self {
        Self {
            success_field: config.success_field.clone(),
            error_field: config.error_field.clone(),
        }
    }
}

impl Default for ResponseFields {
    fn default() -> Self {
        Self::from(&SubmissionConfig::default())
    }
}

impl Outcome {
    pub fn success(resource_id: impl Into<String>) -> Self {
        Outcome::Success {
            resource_id: resource_id.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Outcome::Failure(Failure {
            cause: FailureCause::Rejected,
            message: Some(message.into()),
        })
    }

    #[must_use]
    pub fn network() -> Self {
        Outcome::Failure(Failure {
            cause: FailureCause::Network,
            message: None,
        })
    }

    #[must_use]
    pub fn malformed() -> Self {
        Outcome::Failure(Failure {
            cause: FailureCause::Malformed,
            message: None,
        })
    }

    /// Classifies a response body.
    ///
    /// Success requires an OK status and a non-empty success field. A body
    /// that is not a JSON object is malformed. Anything else is a rejection
    /// carrying the error field's text, if there is one.
    #[must_use]
    pub fn from_response(status_ok: bool, body: &str, fields: &ResponseFields) -> Self {
        let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) else {
            return Outcome::malformed();
        };

        if status_ok {
            if let Some(resource_id) = object.get(&fields.success_field).and_then(scalar_text) {
                return Outcome::Success { resource_id };
            }
        }

        Outcome::Failure(Failure {
            cause: FailureCause::Rejected,
            message: object.get(&fields.error_field).and_then(scalar_text),
        })
    }
}

impl Failure {
    /// Text for the error notification: the application message, else
    /// `fallback`.
    #[must_use]
    pub fn display_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

/// Non-empty string or number, as text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
