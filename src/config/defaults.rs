// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Notifications**: Toast lifetime and exit animation window
//! - **Submission**: Redirect delay, request timeout, response field names
//! - **Reactors**: Scroll threshold, tooltip fades, download reset

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// How long a notification stays active before auto-dismissal (in milliseconds).
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5_000;

/// Length of the exit animation between dismissal and removal (in milliseconds).
pub const DEFAULT_EXIT_ANIMATION_MS: u64 = 500;

// ==========================================================================
// Submission Defaults
// ==========================================================================

/// Delay between a successful submission and the redirect (in milliseconds).
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 2_000;

/// Network-layer timeout for a submission request (in milliseconds).
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Response field whose presence marks a successful submission.
pub const DEFAULT_SUCCESS_FIELD: &str = "site_id";

/// Response field carrying an application error description.
pub const DEFAULT_ERROR_FIELD: &str = "error";

/// Form field holding the CSRF token, echoed as the `X-CSRFToken` header.
pub const DEFAULT_CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Where a successful submission redirects to.
pub const DEFAULT_REDIRECT_PATH: &str = "/dashboard/";

// ==========================================================================
// Reactor Defaults
// ==========================================================================

/// Scroll offset (in pixels) above which the navbar switches style.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 50.0;

/// Delay before a freshly attached tooltip becomes opaque (in milliseconds).
pub const DEFAULT_TOOLTIP_FADE_IN_MS: u64 = 10;

/// Fade-out window before a tooltip is detached (in milliseconds).
pub const DEFAULT_TOOLTIP_FADE_OUT_MS: u64 = 300;

/// Gap between a tooltip and the top edge of its anchor (in pixels).
pub const TOOLTIP_GAP_PX: f32 = 10.0;

/// How long a download button stays busy after a click (in milliseconds).
pub const DEFAULT_DOWNLOAD_RESET_MS: u64 = 3_000;

/// Intersection ratio at which an observed element is revealed.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
