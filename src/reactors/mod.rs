// SPDX-License-Identifier: MPL-2.0
//! Small page behaviours that react to user input without a lifecycle of
//! their own beyond a few timers.
//!
//! - [`navigation`] - hamburger menu toggle
//! - [`scroll`] - navbar style from scroll offset
//! - [`tooltip`] - hover tooltips
//! - [`download`] - busy state for download buttons
//! - [`validation`] - required-field marking
//! - [`clipboard`] - copy buttons with fallback
//! - [`reveal`] - one-shot reveal on scroll

pub mod clipboard;
pub mod download;
pub mod navigation;
pub mod reveal;
pub mod scroll;
pub mod tooltip;
pub mod validation;

pub use clipboard::{copy_source, copy_text, Clipboard, CopyPath};
pub use download::DownloadButtons;
pub use navigation::{BarStyle, ClickTarget, NavToggle};
pub use reveal::{RevealTracker, REVEAL_CLASS};
pub use scroll::{NavbarStyle, ScrollReactor};
pub use tooltip::{Position, Rect, Size, TooltipHandle, TooltipReactor, TooltipSurface};
pub use validation::FieldState;

/// Host-assigned identifier of a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);
