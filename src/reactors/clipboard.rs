// SPDX-License-Identifier: MPL-2.0
//! Copy-to-clipboard buttons.
//!
//! The modern clipboard API is tried first; if it is missing or fails, the
//! legacy mechanism is used. The copy counts as done if either succeeds.

use crate::error::{Error, Result};

/// One way of writing text to the system clipboard.
pub trait Clipboard {
    /// # Errors
    ///
    /// Returns [`Error::Clipboard`] if the text could not be written.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Which mechanism completed the copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Primary,
    Fallback,
}

/// Text a copy button copies: its `data-text` attribute, else the text of
/// the element just before it.
#[must_use]
pub fn copy_source<'a>(data_text: Option<&'a str>, previous_sibling_text: Option<&'a str>) -> Option<&'a str> {
    data_text.or(previous_sibling_text)
}

/// Writes `text` with `primary` if available, falling back to `fallback`.
///
/// # Errors
///
/// Returns the fallback's error when both mechanisms fail.
pub fn copy_text(
    text: &str,
    primary: Option<&mut dyn Clipboard>,
    fallback: &mut dyn Clipboard,
) -> Result<CopyPath> {
    if let Some(primary) = primary {
        match primary.write_text(text) {
            Ok(()) => return Ok(CopyPath::Primary),
            Err(err) => tracing::debug!(error = %err, "primary clipboard failed, falling back"),
        }
    }
    fallback
        .write_text(text)
        .map(|()| CopyPath::Fallback)
        .map_err(|err| match err {
            Error::Clipboard(_) => err,
            other => Error::Clipboard(other.to_string()),
        })
}
