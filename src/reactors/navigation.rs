// SPDX-License-Identifier: MPL-2.0
//! Mobile navigation toggle.

/// Where a click landed, relative to the menu and its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The hamburger button.
    Trigger,
    /// Inside the menu container.
    Menu,
    Outside,
}

/// Open/closed state of the navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavToggle {
    open: bool,
}

impl NavToggle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Applies a click. Returns `true` if the open state changed.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        let next = match target {
            ClickTarget::Trigger => !self.open,
            ClickTarget::Menu => self.open,
            ClickTarget::Outside => false,
        };
        let changed = next != self.open;
        self.open = next;
        changed
    }

    /// Styles for the three hamburger bars, top to bottom.
    #[must_use]
    pub fn bar_styles(&self) -> [BarStyle; 3] {
        if !self.open {
            return [BarStyle::RESET; 3];
        }
        [
            BarStyle {
                rotate_deg: 45,
                translate_px: (0, 8),
                opacity: 1.0,
            },
            BarStyle {
                rotate_deg: 0,
                translate_px: (10, 0),
                opacity: 0.0,
            },
            BarStyle {
                rotate_deg: -45,
                translate_px: (0, -8),
                opacity: 1.0,
            },
        ]
    }
}

/// Transform of one hamburger bar; the open menu turns the bars into a cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    pub rotate_deg: i32,
    pub translate_px: (i32, i32),
    pub opacity: f32,
}

impl BarStyle {
    pub const RESET: BarStyle = BarStyle {
        rotate_deg: 0,
        translate_px: (0, 0),
        opacity: 1.0,
    };

    /// CSS `transform` value.
    #[must_use]
    pub fn transform(&self) -> String {
        if *self == Self::RESET {
            return "none".to_string();
        }
        let (x, y) = self.translate_px;
        format!(
            "rotate({}deg) translate({}, {})",
            self.rotate_deg,
            px(x),
            px(y)
        )
    }
}

fn px(value: i32) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        format!("{value}px")
    }
}
