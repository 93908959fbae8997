// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` record, its `Kind` and the
//! forward-only lifecycle `State` it moves through.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
///
/// Identifiers come from a process-wide counter and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the notification reports. Determines styling only; every kind has
/// the same lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[default]
    Info,
    Success,
    Error,
}

impl Kind {
    /// CSS class applied to the rendered message element.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Kind::Info => "message message-info",
            Kind::Success => "message message-success",
            Kind::Error => "message message-error",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Info => "info",
            Kind::Success => "success",
            Kind::Error => "error",
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    /// Parses the value of a notification trigger's `data-kind` attribute.
    /// An empty value means the default kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "info" => Ok(Kind::Info),
            "success" => Ok(Kind::Success),
            "error" => Ok(Kind::Error),
            _ => Err(Error::InvalidAttribute {
                name: "data-kind",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state. Transitions only move forward:
/// `Active` → `Dismissing` → `Removed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    Active,
    /// Exit animation is playing; removal is scheduled.
    Dismissing,
    Removed,
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    text: String,
    kind: Kind,
    created_at: Instant,
    /// Auto-dismiss deadline; cleared once the timer is cancelled.
    dismiss_at: Option<Instant>,
    state: State,
}

impl Notification {
    /// Creates an active notification whose auto-dismiss deadline is
    /// `created_at + ttl`.
    pub fn new(text: impl Into<String>, kind: Kind, created_at: Instant, ttl: Duration) -> Self {
        Self {
            id: NotificationId::new(),
            text: text.into(),
            kind,
            created_at,
            dismiss_at: Some(created_at + ttl),
            state: State::Active,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn dismiss_at(&self) -> Option<Instant> {
        self.dismiss_at
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == State::Active
    }

    /// `Active` → `Dismissing`, dropping the auto-dismiss deadline.
    /// Returns `false` (and changes nothing) from any other state.
    pub(crate) fn begin_dismissing(&mut self) -> bool {
        if self.state != State::Active {
            return false;
        }
        self.dismiss_at = None;
        self.state = State::Dismissing;
        true
    }

    /// `Dismissing` → `Removed`. Returns `false` from any other state.
    pub(crate) fn mark_removed(&mut self) -> bool {
        if self.state != State::Dismissing {
            return false;
        }
        self.state = State::Removed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(5_000);

    #[test]
    fn notification_ids_are_unique() {
        let now = Instant::now();
        let n1 = Notification::new("test", Kind::Info, now, TTL);
        let n2 = Notification::new("test", Kind::Info, now, TTL);
        assert_ne!(n1.id(), n2.id());
        assert!(n2.id() > n1.id());
    }

    #[test]
    fn deadline_is_creation_plus_ttl() {
        let now = Instant::now();
        let n = Notification::new("saved", Kind::Success, now, TTL);
        assert_eq!(n.dismiss_at(), Some(now + TTL));
        assert_eq!(n.state(), State::Active);
        assert_eq!(n.text(), "saved");
    }

    #[test]
    fn lifecycle_only_moves_forward() {
        let mut n = Notification::new("x", Kind::Error, Instant::now(), TTL);

        assert!(!n.mark_removed(), "cannot skip dismissing");
        assert!(n.begin_dismissing());
        assert_eq!(n.dismiss_at(), None);
        assert!(!n.begin_dismissing(), "second dismissal is rejected");
        assert!(n.mark_removed());
        assert!(!n.begin_dismissing(), "removed never returns to dismissing");
        assert_eq!(n.state(), State::Removed);
    }

    #[test]
    fn kind_parses_trigger_attribute() {
        assert_eq!("success".parse::<Kind>().unwrap(), Kind::Success);
        assert_eq!(" Error ".parse::<Kind>().unwrap(), Kind::Error);
        assert_eq!("".parse::<Kind>().unwrap(), Kind::Info);
        assert!("warning".parse::<Kind>().is_err());
    }

    #[test]
    fn kind_defaults_to_info() {
        assert_eq!(Kind::default(), Kind::Info);
        assert_eq!(Kind::Success.css_class(), "message message-success");
    }
}
