// SPDX-License-Identifier: MPL-2.0
//! Single-task event loop driving a [`Page`].
//!
//! The loop multiplexes three sources: host commands, completed network
//! calls and the page's next timer deadline. Everything runs on one task;
//! components are never touched concurrently.

use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::notifications::{Kind, NotificationId};
use crate::page::Page;
use crate::reactors::{ElementId, Rect};
use crate::submission::{FormId, Payload, SubmitDecision, SubmitRequest, Transport};

/// A user event forwarded by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Submit {
        form: FormId,
        payload: Payload,
    },
    Notify {
        text: String,
        kind: Kind,
    },
    Dismiss(NotificationId),
    HoverEnter {
        element: ElementId,
        text: String,
        anchor: Rect,
    },
    HoverLeave(ElementId),
    DownloadClick(ElementId),
    Copy {
        data_text: Option<String>,
        previous_sibling_text: Option<String>,
    },
    Unload,
}

#[derive(Debug)]
pub struct Runtime<T> {
    page: Page,
    transport: T,
}

impl<T: Transport> Runtime<T> {
    pub fn new(page: Page, transport: T) -> Self {
        Self { page, transport }
    }

    /// Runs until the command channel is closed, no request is in flight
    /// and no timer is pending, then hands the page back.
    pub async fn run(self, mut commands: UnboundedReceiver<Command>) -> Page {
        let Runtime {
            mut page,
            transport,
        } = self;
        let transport = &transport;
        let mut in_flight = FuturesUnordered::new();
        let mut accepting = true;

        loop {
            let deadline = page.next_deadline();
            if !accepting && in_flight.is_empty() && deadline.is_none() {
                break;
            }
            let wake = tokio::time::Instant::from_std(deadline.unwrap_or_else(now));

            tokio::select! {
                command = commands.recv(), if accepting => match command {
                    Some(command) => {
                        if let Some(request) = apply(&mut page, command) {
                            in_flight.push(async move {
                                let outcome = transport.submit(&request).await;
                                (request, outcome)
                            });
                        }
                    }
                    None => {
                        tracing::debug!("command channel closed");
                        accepting = false;
                    }
                },
                Some((request, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                    page.complete(&request, outcome, now());
                }
                () = tokio::time::sleep_until(wake), if deadline.is_some() => {
                    page.tick(now());
                }
            }
        }

        tracing::debug!("runtime settled");
        page
    }
}

/// Current time on the tokio clock, so paused-time tests stay consistent.
fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

fn apply(page: &mut Page, command: Command) -> Option<SubmitRequest> {
    let now = now();
    match command {
        Command::Submit { form, payload } => match page.submit(form, payload, now) {
            SubmitDecision::Dispatch(request) => return Some(request),
            SubmitDecision::Proceed => tracing::debug!(%form, "native submission proceeds"),
            SubmitDecision::Ignored => {}
        },
        Command::Notify { text, kind } => {
            page.notify(text, kind, now);
        }
        Command::Dismiss(id) => {
            page.dismiss(id, now);
        }
        Command::HoverEnter {
            element,
            text,
            anchor,
        } => page.hover_enter(element, &text, anchor, now),
        Command::HoverLeave(element) => page.hover_leave(element, now),
        Command::DownloadClick(element) => {
            page.click_download(element, now);
        }
        Command::Copy {
            data_text,
            previous_sibling_text,
        } => {
            // Failures are already logged by the page.
            let _ = page.copy(data_text.as_deref(), previous_sibling_text.as_deref(), now);
        }
        Command::Unload => page.unload(),
    }
    None
}
