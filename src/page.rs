// SPDX-License-Identifier: MPL-2.0
//! The page: every feedback component wired to its host collaborators.
//!
//! `Page` owns the notification store, the submission controller and the
//! ambient reactors. Hosts forward user events to it and call
//! [`Page::tick`] whenever [`Page::next_deadline`] elapses.

use std::time::Instant;

use crate::config::Config;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::error::{Error, Result};
use crate::i18n::I18n;
use crate::notifications::{Kind, Message, NotificationId, Renderer, Store};
use crate::reactors::{
    copy_source, copy_text, Clipboard, CopyPath, DownloadButtons, ElementId, NavToggle, Rect,
    RevealTracker, ScrollReactor, TooltipReactor, TooltipSurface,
};
use crate::submission::{
    Control, Controller, FormBinding, FormId, Navigator, Outcome, Overlay, Payload,
    SubmissionTexts, SubmitDecision, SubmitRequest,
};

/// Host objects the page drives.
pub struct Collaborators {
    /// `None` runs the notification store headless.
    pub renderer: Option<Box<dyn Renderer>>,
    pub overlay: Box<dyn Overlay>,
    pub navigator: Box<dyn Navigator>,
    pub tooltips: Box<dyn TooltipSurface>,
    /// The modern clipboard API, when the host has one.
    pub clipboard: Option<Box<dyn Clipboard>>,
    pub fallback_clipboard: Box<dyn Clipboard>,
}

/// Localized texts used outside the submission controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTexts {
    pub submission: SubmissionTexts,
    pub copied: String,
    pub download_busy: String,
}

impl PageTexts {
    #[must_use]
    pub fn from_i18n(i18n: &I18n) -> Self {
        Self {
            submission: SubmissionTexts::from_i18n(i18n),
            copied: i18n.tr("notification-copied"),
            download_busy: i18n.tr("download-preparing"),
        }
    }
}

pub struct Page {
    store: Store,
    controller: Controller,
    tooltips: TooltipReactor,
    downloads: DownloadButtons,
    navigation: NavToggle,
    scroll: ScrollReactor,
    reveal: RevealTracker,
    clipboard: Option<Box<dyn Clipboard>>,
    fallback_clipboard: Box<dyn Clipboard>,
    copied_text: String,
    diagnostics: Option<DiagnosticsHandle>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("store", &self.store)
            .field("controller", &self.controller)
            .field("tooltips", &self.tooltips)
            .field("downloads", &self.downloads)
            .field("navigation", &self.navigation)
            .finish_non_exhaustive()
    }
}

impl Page {
    pub fn new(config: &Config, texts: PageTexts, collaborators: Collaborators) -> Self {
        let Collaborators {
            renderer,
            overlay,
            navigator,
            tooltips,
            clipboard,
            fallback_clipboard,
        } = collaborators;

        let store = match renderer {
            Some(renderer) => Store::with_renderer(&config.notifications, renderer),
            None => Store::new(&config.notifications),
        };

        Self {
            store,
            controller: Controller::new(overlay, navigator, &config.submission, texts.submission),
            tooltips: TooltipReactor::new(tooltips, &config.ui),
            downloads: DownloadButtons::new(texts.download_busy, &config.ui),
            navigation: NavToggle::new(),
            scroll: ScrollReactor::new(config.ui.scroll_threshold),
            reveal: RevealTracker::new(config.ui.reveal_threshold),
            clipboard,
            fallback_clipboard,
            copied_text: texts.copied,
            diagnostics: None,
        }
    }

    /// Attaches a diagnostics handle to the page and its components.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.store.set_diagnostics(handle.clone());
        self.controller.set_diagnostics(handle.clone());
        self.diagnostics = Some(handle);
    }

    /// Shows a notification; used by declarative notification triggers.
    pub fn notify(&mut self, text: impl Into<String>, kind: Kind, now: Instant) -> NotificationId {
        self.store.create(text, kind, now)
    }

    pub fn dismiss(&mut self, id: NotificationId, now: Instant) -> bool {
        self.store.dismiss(id, now)
    }

    pub fn handle_message(&mut self, message: &Message, now: Instant) {
        self.store.handle_message(message, now);
    }

    pub fn register_form(&mut self, binding: FormBinding, control: Box<dyn Control>) -> FormId {
        self.controller.register(binding, control)
    }

    pub fn submit(&mut self, form: FormId, payload: Payload, now: Instant) -> SubmitDecision {
        self.controller.submit(form, payload, now)
    }

    pub fn complete(&mut self, request: &SubmitRequest, outcome: Outcome, now: Instant) -> bool {
        self.controller
            .complete(request, outcome, &mut self.store, now)
    }

    pub fn register_download(&mut self, element: ElementId, control: Box<dyn Control>) {
        self.downloads.register(element, control);
    }

    pub fn click_download(&mut self, element: ElementId, now: Instant) -> bool {
        self.downloads.click(element, now)
    }

    pub fn hover_enter(&mut self, element: ElementId, text: &str, anchor: Rect, now: Instant) {
        self.tooltips.enter(element, text, anchor, now);
    }

    pub fn hover_leave(&mut self, element: ElementId, now: Instant) {
        self.tooltips.leave(element, now);
    }

    /// Copies the button's text and confirms with a success notification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Clipboard`] when there is nothing to copy or both
    /// clipboard mechanisms fail. No notification is shown in that case.
    pub fn copy(
        &mut self,
        data_text: Option<&str>,
        previous_sibling_text: Option<&str>,
        now: Instant,
    ) -> Result<CopyPath> {
        let Some(text) = copy_source(data_text, previous_sibling_text) else {
            return Err(Error::Clipboard("nothing to copy".to_string()));
        };

        let primary = self
            .clipboard
            .as_mut()
            .map(|clipboard| clipboard.as_mut() as &mut dyn Clipboard);
        match copy_text(text, primary, self.fallback_clipboard.as_mut()) {
            Ok(path) => {
                if path == CopyPath::Fallback && self.clipboard.is_some() {
                    self.log(DiagnosticEventKind::ClipboardFallback {
                        message: "primary clipboard unavailable".to_string(),
                    });
                }
                self.store.create(self.copied_text.clone(), Kind::Success, now);
                Ok(path)
            }
            Err(err) => {
                tracing::warn!(error = %err, "copy failed");
                self.log(DiagnosticEventKind::ClipboardFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fires every timer due at `now`, across all components.
    pub fn tick(&mut self, now: Instant) {
        self.store.tick(now);
        self.controller.tick(now);
        self.tooltips.tick(now);
        self.downloads.tick(now);
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.store.next_deadline(),
            self.controller.next_deadline(),
            self.tooltips.next_deadline(),
            self.downloads.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Page teardown: cancels every pending timer and removes transient UI.
    pub fn unload(&mut self) {
        self.store.clear();
        self.controller.unload();
        self.tooltips.clear();
        self.downloads.clear();
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    #[must_use]
    pub fn tooltips(&self) -> &TooltipReactor {
        &self.tooltips
    }

    #[must_use]
    pub fn downloads(&self) -> &DownloadButtons {
        &self.downloads
    }

    pub fn navigation_mut(&mut self) -> &mut NavToggle {
        &mut self.navigation
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollReactor {
        &mut self.scroll
    }

    pub fn reveal_mut(&mut self) -> &mut RevealTracker {
        &mut self.reveal
    }

    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(kind);
        }
    }
}
