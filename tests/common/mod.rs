// SPDX-License-Identifier: MPL-2.0
//! Recording host collaborators shared by integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use page_feedback::config::Config;
use page_feedback::error::Result;
use page_feedback::i18n::I18n;
use page_feedback::notifications::{ContainerHandle, ElementHandle, Kind, Notification, Renderer};
use page_feedback::page::{Collaborators, Page, PageTexts};
use page_feedback::reactors::{Clipboard, Position, Size, TooltipHandle, TooltipSurface};
use page_feedback::submission::{Control, Navigator, Outcome, Overlay, SubmitRequest, Transport};
use tokio::time::Instant;

pub const GENERIC_FAILURE: &str = "Failed to generate website. Please try again.";
pub const SUCCESS_TEXT: &str = "Website generated successfully! Redirecting to dashboard...";

#[derive(Debug, Default)]
pub struct Recorded {
    pub rendered: Vec<(Kind, String, Instant)>,
    pub unmounted: Vec<(u64, Instant)>,
    pub redirects: Vec<(String, Instant)>,
    pub overlay: Vec<bool>,
}

pub type Log = Rc<RefCell<Recorded>>;

pub struct RecordingRenderer {
    log: Log,
    next: u64,
}

impl Renderer for RecordingRenderer {
    fn create_container(&mut self) -> ContainerHandle {
        ContainerHandle(1)
    }

    fn render(&mut self, _container: ContainerHandle, notification: &Notification) -> ElementHandle {
        self.next += 1;
        self.log.borrow_mut().rendered.push((
            notification.kind(),
            notification.text().to_string(),
            Instant::now(),
        ));
        ElementHandle(self.next)
    }

    fn unmount(&mut self, element: ElementHandle) {
        self.log.borrow_mut().unmounted.push((element.0, Instant::now()));
    }
}

struct RecordingOverlay(Log);

impl Overlay for RecordingOverlay {
    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().overlay.push(visible);
    }
}

struct RecordingNavigator(Log);

impl Navigator for RecordingNavigator {
    fn redirect_to(&mut self, path: &str) {
        self.0
            .borrow_mut()
            .redirects
            .push((path.to_string(), Instant::now()));
    }
}

struct NoTooltips;

impl TooltipSurface for NoTooltips {
    fn attach(&mut self, _text: &str) -> (TooltipHandle, Size) {
        (TooltipHandle(0), Size::default())
    }
    fn place(&mut self, _tooltip: TooltipHandle, _position: Position) {}
    fn set_opacity(&mut self, _tooltip: TooltipHandle, _opacity: f32) {}
    fn detach(&mut self, _tooltip: TooltipHandle) {}
}

struct NullClipboard;

impl Clipboard for NullClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
}

#[derive(Clone)]
pub struct Button(pub Rc<RefCell<ButtonState>>);

impl Button {
    pub fn new(label: &str) -> Self {
        Self(Rc::new(RefCell::new(ButtonState {
            label: label.to_string(),
            disabled: false,
        })))
    }

    pub fn state(&self) -> ButtonState {
        self.0.borrow().clone()
    }
}

impl Control for Button {
    fn label(&self) -> String {
        self.0.borrow().label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.0.borrow_mut().label = label.to_string();
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }
}

/// Answers every request with the same outcome after a fixed latency.
pub struct FakeTransport {
    pub calls: Rc<Cell<usize>>,
    latency: Duration,
    outcome: Outcome,
}

impl FakeTransport {
    pub fn new(outcome: Outcome, latency: Duration) -> Self {
        Self {
            calls: Rc::new(Cell::new(0)),
            latency,
            outcome,
        }
    }
}

impl Transport for FakeTransport {
    async fn submit(&self, _request: &SubmitRequest) -> Outcome {
        self.calls.set(self.calls.get() + 1);
        tokio::time::sleep(self.latency).await;
        self.outcome.clone()
    }
}

pub fn english() -> I18n {
    I18n::new(Some("en-US".to_string()), &Config::default())
}

/// A page whose collaborators record into the returned log.
pub fn recording_page() -> (Page, Log) {
    let log = Log::default();
    let page = Page::new(
        &Config::default(),
        PageTexts::from_i18n(&english()),
        Collaborators {
            renderer: Some(Box::new(RecordingRenderer {
                log: log.clone(),
                next: 0,
            })),
            overlay: Box::new(RecordingOverlay(log.clone())),
            navigator: Box::new(RecordingNavigator(log.clone())),
            tooltips: Box::new(NoTooltips),
            clipboard: None,
            fallback_clipboard: Box::new(NullClipboard),
        },
    );
    (page, log)
}

/// Asserts `elapsed` is `expected_ms`, allowing for timer-wheel rounding.
pub fn assert_near(elapsed: Duration, expected_ms: u64) {
    let expected = Duration::from_millis(expected_ms);
    assert!(
        elapsed >= expected && elapsed <= expected + Duration::from_millis(3),
        "expected ~{expected:?}, got {elapsed:?}"
    );
}
