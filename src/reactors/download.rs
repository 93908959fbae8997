// SPDX-License-Identifier: MPL-2.0
//! Busy state for download buttons.
//!
//! A click swaps the button into a disabled "preparing" state for a fixed
//! time, then restores its label. The download itself is not observed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::ElementId;
use crate::config::UiConfig;
use crate::submission::Control;
use crate::timer::{TimerQueue, TimerToken};

struct Button {
    control: Box<dyn Control>,
    busy: Option<Busy>,
}

struct Busy {
    saved_label: String,
    timer: TimerToken,
}

pub struct DownloadButtons {
    buttons: HashMap<ElementId, Button>,
    timers: TimerQueue<ElementId>,
    busy_label: String,
    reset_after: Duration,
}

impl std::fmt::Debug for DownloadButtons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadButtons")
            .field("buttons", &self.buttons.len())
            .field("busy_label", &self.busy_label)
            .field("reset_after", &self.reset_after)
            .finish_non_exhaustive()
    }
}

impl DownloadButtons {
    pub fn new(busy_label: impl Into<String>, config: &UiConfig) -> Self {
        Self {
            buttons: HashMap::new(),
            timers: TimerQueue::new(),
            busy_label: busy_label.into(),
            reset_after: Duration::from_millis(config.download_reset_ms),
        }
    }

    pub fn register(&mut self, element: ElementId, control: Box<dyn Control>) {
        self.buttons.insert(
            element,
            Button {
                control,
                busy: None,
            },
        );
    }

    /// Returns `false` if the button is unknown or already busy.
    pub fn click(&mut self, element: ElementId, now: Instant) -> bool {
        let Some(button) = self.buttons.get_mut(&element) else {
            return false;
        };
        if button.busy.is_some() {
            return false;
        }
        let saved_label = button.control.label();
        button.control.set_label(&self.busy_label);
        button.control.set_disabled(true);
        button.busy = Some(Busy {
            saved_label,
            timer: self.timers.schedule(now + self.reset_after, element),
        });
        true
    }

    pub fn tick(&mut self, now: Instant) {
        while let Some(fired) = self.timers.pop_due(now) {
            let Some(button) = self.buttons.get_mut(&fired.event) else {
                continue;
            };
            match button.busy.take() {
                Some(busy) if busy.timer == fired.token => {
                    button.control.set_label(&busy.saved_label);
                    button.control.set_disabled(false);
                }
                other => button.busy = other,
            }
        }
    }

    #[must_use]
    pub fn is_busy(&self, element: ElementId) -> bool {
        self.buttons
            .get(&element)
            .is_some_and(|button| button.busy.is_some())
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Drops pending resets.
    pub fn clear(&mut self) {
        self.timers.clear();
        for button in self.buttons.values_mut() {
            button.busy = None;
        }
    }
}
