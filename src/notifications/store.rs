// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Store` owns every notification record and its timers. Records are
//! created active with an auto-dismiss timer armed; both the timer and the
//! close affordance go through [`Store::dismiss`], which starts the exit
//! window and schedules the final removal.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::notification::{Kind, Notification, NotificationId, State};
use super::render::{ContainerHandle, ElementHandle, Renderer};
use crate::config::NotificationConfig;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle, DismissTrigger};
use crate::timer::{TimerQueue, TimerToken};

/// Messages for notification state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The close affordance of a rendered notification was pressed.
    Dismiss(NotificationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheduled {
    AutoDismiss(NotificationId),
    Remove(NotificationId),
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    element: Option<ElementHandle>,
    /// The single pending timer for this record: auto-dismiss while active,
    /// removal while dismissing.
    timer: Option<TimerToken>,
}

/// Owns notification records, their timers and the shared container.
pub struct Store {
    entries: BTreeMap<NotificationId, Entry>,
    timers: TimerQueue<Scheduled>,
    renderer: Option<Box<dyn Renderer>>,
    container: Option<ContainerHandle>,
    ttl: Duration,
    exit: Duration,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(&NotificationConfig::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("entries", &self.entries)
            .field("container", &self.container)
            .field("has_renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Creates a store without a renderer.
    ///
    /// Logical state is tracked as usual but nothing becomes visible.
    #[must_use]
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            timers: TimerQueue::new(),
            renderer: None,
            container: None,
            ttl: config.ttl(),
            exit: config.exit(),
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn with_renderer(config: &NotificationConfig, renderer: Box<dyn Renderer>) -> Self {
        Self {
            renderer: Some(renderer),
            ..Self::new(config)
        }
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Creates an active notification, arms its auto-dismiss timer and
    /// renders it into the shared container.
    pub fn create(&mut self, text: impl Into<String>, kind: Kind, now: Instant) -> NotificationId {
        let notification = Notification::new(text, kind, now, self.ttl);
        let id = notification.id();

        let element = match self.renderer.as_mut() {
            Some(renderer) => {
                let container = *self
                    .container
                    .get_or_insert_with(|| renderer.create_container());
                Some(renderer.render(container, &notification))
            }
            None => None,
        };
        let timer = self.timers.schedule(now + self.ttl, Scheduled::AutoDismiss(id));

        tracing::debug!(%id, %kind, text = notification.text(), "notification created");
        self.log(DiagnosticEventKind::NotificationCreated {
            id: id.value(),
            kind,
        });

        self.entries.insert(
            id,
            Entry {
                notification,
                element,
                timer: Some(timer),
            },
        );
        id
    }

    /// Dismisses an active notification.
    ///
    /// Cancels its auto-dismiss timer, starts the exit animation and
    /// schedules removal after the exit window. Returns `false` without any
    /// effect if the notification is already dismissing, removed, or unknown.
    pub fn dismiss(&mut self, id: NotificationId, now: Instant) -> bool {
        self.dismiss_with(id, now, DismissTrigger::Manual)
    }

    fn dismiss_with(&mut self, id: NotificationId, now: Instant, trigger: DismissTrigger) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        if !entry.notification.begin_dismissing() {
            return false;
        }
        if let Some(token) = entry.timer.take() {
            self.timers.cancel(token);
        }
        if let (Some(renderer), Some(element)) = (self.renderer.as_mut(), entry.element) {
            renderer.begin_exit(element);
        }
        entry.timer = Some(self.timers.schedule(now + self.exit, Scheduled::Remove(id)));

        tracing::debug!(%id, ?trigger, "notification dismissing");
        self.log(DiagnosticEventKind::NotificationDismissed {
            id: id.value(),
            trigger,
        });
        true
    }

    fn remove(&mut self, id: NotificationId) {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        if !entry.notification.mark_removed() {
            return;
        }
        if let Some(entry) = self.entries.remove(&id) {
            if let (Some(renderer), Some(element)) = (self.renderer.as_mut(), entry.element) {
                renderer.unmount(element);
            }
        }
        tracing::debug!(%id, "notification removed");
        self.log(DiagnosticEventKind::NotificationRemoved { id: id.value() });
    }

    /// Fires every timer due at `now`.
    ///
    /// Each event is handled at its own deadline, so a late tick still
    /// produces the same removal times as a punctual one.
    pub fn tick(&mut self, now: Instant) {
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.event {
                Scheduled::AutoDismiss(id) => {
                    if let Some(entry) = self.entries.get_mut(&id) {
                        if entry.timer == Some(fired.token) {
                            entry.timer = None;
                        }
                    }
                    self.dismiss_with(id, fired.deadline, DismissTrigger::Timer);
                }
                Scheduled::Remove(id) => self.remove(id),
            }
        }
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message, now: Instant) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id, now);
            }
        }
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.get(&id).map(|entry| &entry.notification)
    }

    /// Lifecycle state of a notification; `None` once it has been deleted.
    #[must_use]
    pub fn state(&self, id: NotificationId) -> Option<State> {
        self.get(id).map(Notification::state)
    }

    /// Notifications that are still attached (active or dismissing), oldest first.
    pub fn live(&self) -> impl Iterator<Item = &Notification> {
        self.entries.values().map(|entry| &entry.notification)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.live().filter(|n| n.is_active()).count()
    }

    /// The shared container, once the first notification has been rendered.
    #[must_use]
    pub fn container(&self) -> Option<ContainerHandle> {
        self.container
    }

    /// Tears everything down: cancels all timers and unmounts every element
    /// without exit animations. The container itself is kept.
    pub fn clear(&mut self) {
        self.timers.clear();
        for (id, entry) in std::mem::take(&mut self.entries) {
            if let (Some(renderer), Some(element)) = (self.renderer.as_mut(), entry.element) {
                renderer.unmount(element);
            }
            if entry.notification.is_active() {
                self.log(DiagnosticEventKind::NotificationDismissed {
                    id: id.value(),
                    trigger: DismissTrigger::Unload,
                });
            }
        }
    }

    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(kind);
        }
    }
}
