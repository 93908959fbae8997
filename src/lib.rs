// SPDX-License-Identifier: MPL-2.0
//! `page_feedback` is the interactivity layer of a server-rendered web page.
//!
//! It provides transient notifications, submission feedback for forms
//! (busy controls, a blocking overlay, outcome notifications and a delayed
//! redirect) and a handful of small reactors: navigation toggle, scroll
//! styling, tooltips, download buttons, field validation, copy buttons and
//! reveal-on-scroll. Hosts supply the DOM side through small traits.

#![doc(html_root_url = "https://docs.rs/page_feedback/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod notifications;
pub mod page;
pub mod reactors;
pub mod runtime;
pub mod submission;
pub mod timer;
