// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording feedback activity.
//!
//! The notification store and the submission controller report lifecycle
//! transitions through a [`DiagnosticsHandle`]. Events are kept in a
//! memory-bounded circular buffer and can be exported as JSON.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event record
//! - [`DiagnosticsCollector`]: Drains handles into the buffer

mod buffer;
mod collector;
mod events;

pub use buffer::{buffer_capacity_bounds, BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, DismissTrigger};
