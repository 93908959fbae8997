// SPDX-License-Identifier: MPL-2.0
//! Transient notification system for user feedback.
//!
//! Notifications are short-lived messages ("Copied to clipboard!",
//! submission results) stacked in a shared container. Each one stays active
//! for a fixed lifetime, then plays an exit animation and is removed. The
//! user can close it earlier; both paths share the same dismissal logic.
//!
//! # Components
//!
//! - [`notification`] - `Notification` record, `Kind` and lifecycle `State`
//! - [`store`] - `Store` owning records, timers and the container
//! - [`render`] - `Renderer` trait implemented by the host
//!
//! # Usage
//!
//! ```
//! use page_feedback::notifications::{Kind, Store};
//! use std::time::{Duration, Instant};
//!
//! let mut store = Store::default();
//! let now = Instant::now();
//! let id = store.create("Copied to clipboard!", Kind::Success, now);
//!
//! store.tick(now + Duration::from_millis(5_500));
//! assert!(store.get(id).is_none());
//! ```

mod notification;
mod render;
mod store;

pub use notification::{Kind, Notification, NotificationId, State};
pub use render::{ContainerHandle, ElementHandle, Renderer};
pub use store::{Message, Store};
