// SPDX-License-Identifier: MPL-2.0
//! Explicit scheduled events with cancellation tokens.
//!
//! Every delayed transition in the crate (auto-dismiss, exit animation,
//! redirect, tooltip fades, download reset) is an entry in a [`TimerQueue`]
//! rather than a detached callback. The owner of the queue polls it with
//! the current time and handles whatever is due.
//!
//! Cancelling a token removes its entry, so a cancelled event can never be
//! returned by [`TimerQueue::pop_due`] afterwards, even if its deadline has
//! already passed.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Handle to one scheduled event, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

/// An event returned by [`TimerQueue::pop_due`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<E> {
    pub token: TimerToken,
    /// The deadline the event was scheduled for, not the time it was polled.
    pub deadline: Instant,
    pub event: E,
}

/// Deadline-ordered queue of pending events.
#[derive(Debug)]
pub struct TimerQueue<E> {
    next_token: u64,
    // Keyed by (deadline, token) so equal deadlines fire in scheduling order.
    entries: BTreeMap<(Instant, TimerToken), E>,
    deadlines: HashMap<TimerToken, Instant>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            next_token: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<E> TimerQueue<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `event` to become due at `at`.
    pub fn schedule(&mut self, at: Instant, event: E) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.entries.insert((at, token), event);
        self.deadlines.insert(token, at);
        token
    }

    /// Cancels a pending event.
    ///
    /// Returns `false` if the token already fired or was already cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.deadlines.remove(&token) {
            Some(at) => self.entries.remove(&(at, token)).is_some(),
            None => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.deadlines.contains_key(&token)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|(at, _)| *at)
    }

    /// Removes and returns the earliest event whose deadline is `<= now`.
    ///
    /// Handlers should call this in a loop so that events they schedule or
    /// cancel while handling are taken into account.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired<E>> {
        let (&(deadline, token), _) = self.entries.iter().next()?;
        if deadline > now {
            return None;
        }
        let event = self.entries.remove(&(deadline, token))?;
        self.deadlines.remove(&token);
        Some(Fired {
            token,
            deadline,
            event,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending event.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn events_fire_in_deadline_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(t0 + ms(300), "late");
        queue.schedule(t0 + ms(100), "early");

        assert_eq!(queue.next_deadline(), Some(t0 + ms(100)));
        assert!(queue.pop_due(t0 + ms(50)).is_none());

        let first = queue.pop_due(t0 + ms(400)).expect("due");
        assert_eq!(first.event, "early");
        assert_eq!(first.deadline, t0 + ms(100));
        assert_eq!(queue.pop_due(t0 + ms(400)).expect("due").event, "late");
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_deadlines_keep_scheduling_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(t0, 1);
        queue.schedule(t0, 2);
        queue.schedule(t0, 3);

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(t0).map(|f| f.event)).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn cancelled_event_never_fires_even_when_overdue() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let token = queue.schedule(t0 + ms(10), ());

        assert!(queue.cancel(token));
        assert!(!queue.is_pending(token));
        assert!(queue.pop_due(t0 + ms(1_000)).is_none());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn cancel_is_false_after_fire_or_second_cancel() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let fired = queue.schedule(t0, ());
        let cancelled = queue.schedule(t0 + ms(5), ());

        assert!(queue.pop_due(t0).is_some());
        assert!(!queue.cancel(fired));

        assert!(queue.cancel(cancelled));
        assert!(!queue.cancel(cancelled));
    }

    #[test]
    fn tokens_are_never_reused() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let a = queue.schedule(t0, ());
        queue.pop_due(t0);
        let b = queue.schedule(t0, ());
        assert_ne!(a, b);
    }
}
