// SPDX-License-Identifier: MPL-2.0
//! Per-form submission state machine.
//!
//! ```text
//! idle ──submit──▶ submitting ──Success──▶ succeeded ──(2s)──▶ redirect
//!                       │
//!                       └──Failure──▶ failed
//! ```
//!
//! `succeeded` and `failed` are terminal for a session; the next submit
//! starts a new one. The control's disabled state and the overlay are
//! recomputed from the phases after every transition.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::outcome::Outcome;
use super::transport::{Payload, SubmitRequest};
use super::{Control, FormId, Navigator, Overlay, SessionId};
use crate::config::SubmissionConfig;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::i18n::I18n;
use crate::notifications::{Kind, Store};
use crate::timer::{TimerQueue, TimerToken};

/// Phase of a form's current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl Phase {
    /// Disabled while busy, and after success so nothing competes with the
    /// pending redirect.
    #[must_use]
    pub fn control_disabled(self) -> bool {
        matches!(self, Phase::Submitting | Phase::Succeeded)
    }

    #[must_use]
    pub fn overlay_visible(self) -> bool {
        self == Phase::Submitting
    }

}

/// How a form's submission is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Submitted in-page through the transport; success redirects.
    Async { endpoint: String, redirect_to: String },
    /// The browser submits and navigates on its own; only the busy
    /// indicators are driven.
    Native,
}

/// Registration data for a participating form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBinding {
    pub mode: FormMode,
    /// Label shown on the trigger control while submitting.
    pub busy_label: String,
}

impl FormBinding {
    pub fn async_form(
        endpoint: impl Into<String>,
        redirect_to: impl Into<String>,
        busy_label: impl Into<String>,
    ) -> Self {
        Self {
            mode: FormMode::Async {
                endpoint: endpoint.into(),
                redirect_to: redirect_to.into(),
            },
            busy_label: busy_label.into(),
        }
    }

    pub fn native(busy_label: impl Into<String>) -> Self {
        Self {
            mode: FormMode::Native,
            busy_label: busy_label.into(),
        }
    }
}

/// Notification texts for terminal transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTexts {
    pub success: String,
    /// Used when a failure carries no application message.
    pub generic_failure: String,
}

impl SubmissionTexts {
    #[must_use]
    pub fn from_i18n(i18n: &I18n) -> Self {
        Self {
            success: i18n.tr("submission-success"),
            generic_failure: i18n.tr("submission-failed"),
        }
    }
}

/// What the host must do with the submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Suppress the default action and perform this request.
    Dispatch(SubmitRequest),
    /// Let the browser's default submission proceed.
    Proceed,
    /// The form is busy: suppress the default action and do nothing else.
    Ignored,
}

impl SubmitDecision {
    #[must_use]
    pub fn suppress_default(&self) -> bool {
        !matches!(self, SubmitDecision::Proceed)
    }
}

#[derive(Debug)]
struct Session {
    id: SessionId,
    phase: Phase,
}

struct FormEntry {
    binding: FormBinding,
    control: Box<dyn Control>,
    /// Label the control had when registered; restored after a failure.
    idle_label: String,
    session: Option<Session>,
    redirect: Option<TimerToken>,
}

impl FormEntry {
    fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, |s| s.phase)
    }

    fn is_locked(&self) -> bool {
        self.phase() == Phase::Submitting || self.redirect.is_some()
    }
}

/// Drives submission sessions for every registered form and is the sole
/// authority over the overlay.
pub struct Controller {
    forms: BTreeMap<FormId, FormEntry>,
    overlay: Box<dyn Overlay>,
    overlay_visible: bool,
    navigator: Box<dyn Navigator>,
    timers: TimerQueue<FormId>,
    redirect_delay: Duration,
    texts: SubmissionTexts,
    next_form: u64,
    next_session: u64,
    diagnostics: Option<DiagnosticsHandle>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("forms", &self.forms.len())
            .field("overlay_visible", &self.overlay_visible)
            .field("redirect_delay", &self.redirect_delay)
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Takes ownership of the overlay and hides it.
    pub fn new(
        mut overlay: Box<dyn Overlay>,
        navigator: Box<dyn Navigator>,
        config: &SubmissionConfig,
        texts: SubmissionTexts,
    ) -> Self {
        overlay.set_visible(false);
        Self {
            forms: BTreeMap::new(),
            overlay,
            overlay_visible: false,
            navigator,
            timers: TimerQueue::new(),
            redirect_delay: config.redirect_delay(),
            texts,
            next_form: 0,
            next_session: 0,
            diagnostics: None,
        }
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Puts a form under the controller's governance.
    pub fn register(&mut self, binding: FormBinding, mut control: Box<dyn Control>) -> FormId {
        let id = FormId(self.next_form);
        self.next_form += 1;
        control.set_disabled(Phase::Idle.control_disabled());
        let idle_label = control.label();
        self.forms.insert(
            id,
            FormEntry {
                binding,
                control,
                idle_label,
                session: None,
                redirect: None,
            },
        );
        id
    }

    /// Handles a user-initiated submit.
    ///
    /// Starts a new session unless the form is already submitting or
    /// waiting for its success redirect.
    pub fn submit(&mut self, form: FormId, payload: Payload, _now: Instant) -> SubmitDecision {
        let Some(entry) = self.forms.get_mut(&form) else {
            tracing::warn!(%form, "submit for unregistered form");
            return SubmitDecision::Ignored;
        };
        if entry.is_locked() {
            tracing::debug!(%form, "submit ignored while busy");
            self.log(DiagnosticEventKind::SubmissionIgnored { form: form.value() });
            return SubmitDecision::Ignored;
        }

        let session = SessionId(self.next_session);
        self.next_session += 1;

        entry.control.set_label(&entry.binding.busy_label);
        entry.session = Some(Session {
            id: session,
            phase: Phase::Submitting,
        });
        let decision = match &entry.binding.mode {
            FormMode::Async { endpoint, .. } => SubmitDecision::Dispatch(SubmitRequest {
                form,
                session,
                endpoint: endpoint.clone(),
                payload,
            }),
            FormMode::Native => SubmitDecision::Proceed,
        };

        self.sync(form);
        tracing::debug!(%form, session = session.value(), "submission started");
        self.log(DiagnosticEventKind::SubmissionStarted {
            form: form.value(),
            session: session.value(),
        });
        decision
    }

    /// Applies the outcome of a dispatched request.
    ///
    /// Creates exactly one notification in `store`. Returns `false` and
    /// does nothing if the request does not belong to the form's current
    /// submitting session.
    pub fn complete(
        &mut self,
        request: &SubmitRequest,
        outcome: Outcome,
        store: &mut Store,
        now: Instant,
    ) -> bool {
        let form = request.form;
        let Some(entry) = self.forms.get_mut(&form) else {
            return false;
        };
        let Some(session) = entry
            .session
            .as_mut()
            .filter(|s| s.id == request.session && s.phase == Phase::Submitting)
        else {
            tracing::debug!(%form, session = request.session.value(), "stale completion dropped");
            return false;
        };

        let event = match outcome {
            Outcome::Success { resource_id } => {
                session.phase = Phase::Succeeded;
                store.create(self.texts.success.clone(), Kind::Success, now);
                if let FormMode::Async { redirect_to, .. } = &entry.binding.mode {
                    entry.redirect = Some(self.timers.schedule(now + self.redirect_delay, form));
                    tracing::debug!(%form, path = %redirect_to, "redirect scheduled");
                }
                DiagnosticEventKind::SubmissionSucceeded {
                    form: form.value(),
                    session: session.id.value(),
                    resource_id,
                }
            }
            Outcome::Failure(failure) => {
                session.phase = Phase::Failed;
                let text = failure.display_message(&self.texts.generic_failure);
                store.create(text, Kind::Error, now);
                entry.control.set_label(&entry.idle_label);
                tracing::debug!(%form, cause = ?failure.cause, "submission failed");
                DiagnosticEventKind::SubmissionFailed {
                    form: form.value(),
                    session: session.id.value(),
                    cause: failure.cause,
                    message: failure.message,
                }
            }
        };

        self.sync(form);
        self.log(event);
        true
    }

    /// Performs every redirect due at `now`.
    pub fn tick(&mut self, now: Instant) {
        while let Some(fired) = self.timers.pop_due(now) {
            let form = fired.event;
            let Some(entry) = self.forms.get_mut(&form) else {
                continue;
            };
            if entry.redirect != Some(fired.token) {
                continue;
            }
            entry.redirect = None;
            if let FormMode::Async { redirect_to, .. } = &entry.binding.mode {
                let path = redirect_to.clone();
                tracing::debug!(%form, %path, "redirecting");
                self.navigator.redirect_to(&path);
                self.log(DiagnosticEventKind::Redirected {
                    form: form.value(),
                    path,
                });
            }
        }
    }

    /// Cancels pending redirects; the page is going away.
    pub fn unload(&mut self) {
        self.timers.clear();
        for entry in self.forms.values_mut() {
            entry.redirect = None;
        }
    }

    #[must_use]
    pub fn phase(&self, form: FormId) -> Phase {
        self.forms.get(&form).map_or(Phase::Idle, FormEntry::phase)
    }

    #[must_use]
    pub fn is_redirect_pending(&self, form: FormId) -> bool {
        self.forms
            .get(&form)
            .is_some_and(|entry| entry.redirect.is_some())
    }

    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Re-derives the form's control state and the overlay from phases.
    fn sync(&mut self, form: FormId) {
        if let Some(entry) = self.forms.get_mut(&form) {
            let disabled = entry.phase().control_disabled();
            entry.control.set_disabled(disabled);
        }
        let visible = self.forms.values().any(|e| e.phase().overlay_visible());
        if visible != self.overlay_visible {
            self.overlay_visible = visible;
            self.overlay.set_visible(visible);
        }
    }

    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(kind);
        }
    }
}
