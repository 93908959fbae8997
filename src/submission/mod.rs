// SPDX-License-Identifier: MPL-2.0
//! Submission feedback for forms.
//!
//! The [`Controller`] runs one session per submit: it disables the trigger
//! control, swaps in a busy label and shows the blocking overlay, then
//! turns the [`Outcome`] of the network call into a notification and either
//! a scheduled redirect (success) or restored controls (failure).
//!
//! # Components
//!
//! - [`controller`] - per-form state machine and overlay authority
//! - [`outcome`] - tagged success/failure result and response classifier
//! - [`transport`] - `Transport` trait, `Payload`, and the HTTP transport

mod controller;
mod outcome;
mod transport;

use std::fmt;

pub use controller::{Controller, FormBinding, FormMode, Phase, SubmissionTexts, SubmitDecision};
pub use outcome::{Failure, FailureCause, Outcome, ResponseFields};
pub use transport::{HttpTransport, Payload, SubmitRequest, Transport};

/// Identifies a registered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormId(pub(crate) u64);

impl FormId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "form-{}", self.0)
    }
}

/// Identifies one submission session; a fresh id per submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

impl SessionId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A clickable control whose label and enabled state the page drives:
/// form submit buttons and download buttons.
pub trait Control {
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
    fn set_disabled(&mut self, disabled: bool);
}

/// The page-wide blocking overlay.
pub trait Overlay {
    fn set_visible(&mut self, visible: bool);
}

/// Page navigation.
pub trait Navigator {
    fn redirect_to(&mut self, path: &str);
}
