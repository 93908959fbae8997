// SPDX-License-Identifier: MPL-2.0
//! One-shot "animate-in" reveal for cards and forms scrolled into view.

use std::collections::HashSet;

use super::ElementId;
use crate::config::DEFAULT_REVEAL_THRESHOLD;

/// Class added to an element when it is revealed.
pub const REVEAL_CLASS: &str = "animate-in";

#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    observed: HashSet<ElementId>,
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_THRESHOLD)
    }
}

impl RevealTracker {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observed: HashSet::new(),
        }
    }

    pub fn observe(&mut self, element: ElementId) {
        self.observed.insert(element);
    }

    /// Reports an intersection ratio. Returns `true` exactly once per
    /// observed element, when it should receive [`REVEAL_CLASS`]; the
    /// element is unobserved at that point.
    pub fn on_intersection(&mut self, element: ElementId, ratio: f64) -> bool {
        ratio >= self.threshold && self.observed.remove(&element)
    }

    #[must_use]
    pub fn is_observed(&self, element: ElementId) -> bool {
        self.observed.contains(&element)
    }
}
