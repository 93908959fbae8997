// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;

use page_feedback::config::{self, Config, DEFAULT_REDIRECT_PATH};
use page_feedback::diagnostics::DiagnosticsCollector;
use page_feedback::error::{Error, Result};
use page_feedback::i18n::I18n;
use page_feedback::notifications::{ContainerHandle, ElementHandle, Notification, Renderer};
use page_feedback::page::{Collaborators, Page, PageTexts};
use page_feedback::reactors::{Clipboard, Position, Size, TooltipHandle, TooltipSurface};
use page_feedback::runtime::{Command, Runtime};
use page_feedback::submission::{Control, FormBinding, HttpTransport, Navigator, Overlay, Payload};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: page_feedback [--endpoint <URL>] [OPTIONS]

Without --endpoint the form is submitted natively: only the busy label and
the overlay are shown.

Options:
  --endpoint <URL>     Submission endpoint, absolute or relative to base_url
  --field <NAME=VALUE> Form field to submit (repeatable)
  --redirect <PATH>    Path to open after a successful submission
  --config <FILE>      Settings file instead of the platform default
  --lang <LOCALE>      Override the interface language
  --diagnostics        Print collected diagnostics as JSON on exit
";

struct Args {
    endpoint: Option<String>,
    fields: Vec<(String, String)>,
    redirect: String,
    config: Option<PathBuf>,
    lang: Option<String>,
    diagnostics: bool,
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))
}

fn parse_args() -> std::result::Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    Ok(Args {
        diagnostics: args.contains("--diagnostics"),
        endpoint: args.opt_value_from_str("--endpoint")?,
        fields: args.values_from_fn("--field", parse_field)?,
        redirect: args
            .opt_value_from_str("--redirect")?
            .unwrap_or_else(|| DEFAULT_REDIRECT_PATH.to_string()),
        config: args.opt_value_from_str("--config")?,
        lang: args.opt_value_from_str("--lang")?,
    })
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "using default settings");
        Config::default()
    })
}

#[derive(Default)]
struct ConsoleRenderer {
    next: u64,
}

impl Renderer for ConsoleRenderer {
    fn create_container(&mut self) -> ContainerHandle {
        ContainerHandle(0)
    }

    fn render(&mut self, _container: ContainerHandle, notification: &Notification) -> ElementHandle {
        self.next += 1;
        println!("[{}] {}", notification.kind(), notification.text());
        ElementHandle(self.next)
    }

    fn unmount(&mut self, _element: ElementHandle) {}
}

struct ConsoleOverlay;

impl Overlay for ConsoleOverlay {
    fn set_visible(&mut self, visible: bool) {
        tracing::info!(visible, "loading overlay");
    }
}

struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect_to(&mut self, path: &str) {
        println!("-> {path}");
    }
}

struct ConsoleButton {
    label: String,
}

impl Control for ConsoleButton {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
        tracing::info!(label, "button label");
    }

    fn set_disabled(&mut self, disabled: bool) {
        tracing::debug!(disabled, "button state");
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

struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_ref());
    let i18n = I18n::new(args.lang, &config);
    let transport = HttpTransport::new(&config.submission)?;

    let mut page = Page::new(
        &config,
        PageTexts::from_i18n(&i18n),
        Collaborators {
            renderer: Some(Box::new(ConsoleRenderer::default())),
            overlay: Box::new(ConsoleOverlay),
            navigator: Box::new(ConsoleNavigator),
            tooltips: Box::new(NoTooltips),
            clipboard: None,
            fallback_clipboard: Box::new(StdoutClipboard),
        },
    );
    let mut collector = DiagnosticsCollector::default();
    page.set_diagnostics(collector.handle());

    let binding = match args.endpoint {
        Some(endpoint) => {
            FormBinding::async_form(endpoint, args.redirect, i18n.tr("submission-generating"))
        }
        None => FormBinding::native(i18n.tr("submission-busy")),
    };
    let form = page.register_form(
        binding,
        Box::new(ConsoleButton {
            label: "Generate Website".to_string(),
        }),
    );
    let payload: Payload = args.fields.into_iter().collect();

    let (commands, receiver) = tokio::sync::mpsc::unbounded_channel();
    commands
        .send(Command::Submit { form, payload })
        .map_err(|err| Error::Io(err.to_string()))?;
    drop(commands);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(Runtime::new(page, transport).run(receiver));

    if args.diagnostics {
        collector.process_pending();
        let json = collector
            .export_json()
            .map_err(|err| Error::Io(err.to_string()))?;
        println!("{json}");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "page_feedback failed");
            ExitCode::FAILURE
        }
    }
}
