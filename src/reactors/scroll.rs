// SPDX-License-Identifier: MPL-2.0
//! Navbar style driven by the scroll offset.

use crate::config::DEFAULT_SCROLL_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    Top,
    Scrolled,
}

impl NavbarStyle {
    /// `Scrolled` strictly above the threshold.
    #[must_use]
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            NavbarStyle::Scrolled
        } else {
            NavbarStyle::Top
        }
    }

    #[must_use]
    pub fn background(self) -> &'static str {
        match self {
            NavbarStyle::Top => "rgba(255, 255, 255, 0.95)",
            NavbarStyle::Scrolled => "rgba(255, 255, 255, 0.98)",
        }
    }

    #[must_use]
    pub fn box_shadow(self) -> &'static str {
        match self {
            NavbarStyle::Top => "none",
            NavbarStyle::Scrolled => "0 2px 20px rgba(0,0,0,0.1)",
        }
    }
}

/// Tracks the current offset and reports style changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollReactor {
    threshold: f64,
    offset: f64,
    style: NavbarStyle,
}

impl Default for ScrollReactor {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl ScrollReactor {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            offset: 0.0,
            style: NavbarStyle::Top,
        }
    }

    /// Records a new offset; returns the style only when it changed.
    pub fn on_scroll(&mut self, offset: f64) -> Option<NavbarStyle> {
        self.offset = offset;
        let style = NavbarStyle::for_offset(offset, self.threshold);
        (style != self.style).then(|| {
            self.style = style;
            style
        })
    }

    #[must_use]
    pub fn style(&self) -> NavbarStyle {
        self.style
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }
}
