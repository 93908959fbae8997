// SPDX-License-Identifier: MPL-2.0
//! Required-field marking.
//!
//! Validation errors are shown on the field itself; they never produce a
//! notification.

/// Border color of an invalid field.
pub const ERROR_BORDER_COLOR: &str = "#dc3545";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldState {
    #[default]
    Valid,
    /// Marked with the `error` class and a red border.
    Invalid,
}

impl FieldState {
    /// State after the field loses focus.
    #[must_use]
    pub fn on_blur(required: bool, value: &str) -> Self {
        if required && value.trim().is_empty() {
            FieldState::Invalid
        } else {
            FieldState::Valid
        }
    }

    /// State after the user types: an invalid field clears as soon as it
    /// holds something, otherwise nothing changes until the next blur.
    #[must_use]
    pub fn on_input(self, value: &str) -> Self {
        if self == FieldState::Invalid && !value.trim().is_empty() {
            FieldState::Valid
        } else {
            self
        }
    }

    #[must_use]
    pub fn border_color(self) -> Option<&'static str> {
        match self {
            FieldState::Valid => None,
            FieldState::Invalid => Some(ERROR_BORDER_COLOR),
        }
    }
}
