// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for feedback activity tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notifications::Kind;
use crate::submission::FailureCause;

/// What caused a notification to leave the `active` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissTrigger {
    /// The user pressed the close affordance.
    Manual,
    /// The auto-dismiss deadline elapsed.
    Timer,
    /// The page was torn down.
    Unload,
}

/// A diagnostic event with its wall-clock timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    NotificationCreated {
        id: u64,
        kind: Kind,
    },
    NotificationDismissed {
        id: u64,
        trigger: DismissTrigger,
    },
    NotificationRemoved {
        id: u64,
    },

    SubmissionStarted {
        form: u64,
        session: u64,
    },
    /// A submit arrived while the form was still busy.
    SubmissionIgnored {
        form: u64,
    },
    SubmissionSucceeded {
        form: u64,
        session: u64,
        resource_id: String,
    },
    SubmissionFailed {
        form: u64,
        session: u64,
        cause: FailureCause,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Redirected {
        form: u64,
        path: String,
    },

    /// The primary clipboard failed and the fallback was used.
    ClipboardFallback {
        message: String,
    },
    ClipboardFailed {
        message: String,
    },
}
