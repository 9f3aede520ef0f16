use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, ExamApi, HttpExamApi};
use storage::{InMemoryStore, SessionStore};
use ui::{App, UiApp, build_app_context};

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {DEFAULT_API_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EGZAMINATOR_API_URL, RUST_LOG");
}

struct Args {
    api_url: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url =
            std::env::var("EGZAMINATOR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    api_url = require_value(args, "--api-url")?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ArgsError::InvalidApiUrl { raw: api_url });
        }

        Ok(Self { api_url })
    }
}

/// Composition root: HTTP backend client plus a per-run session store, so a
/// route change keeps the exam and closing the app discards it.
struct DesktopApp {
    exam_api: Arc<dyn ExamApi>,
    store: Arc<InMemoryStore>,
}

impl UiApp for DesktopApp {
    fn exam_api(&self) -> Arc<dyn ExamApi> {
        Arc::clone(&self.exam_api)
    }

    fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.store) as Arc<dyn SessionStore>
    }

    fn clock(&self) -> Clock {
        Clock::default_clock()
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    log::info!("starting egzAIminator against {}", parsed.api_url);

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        exam_api: Arc::new(HttpExamApi::new(parsed.api_url)),
        store: Arc::new(InMemoryStore::new()),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("egzAIminator")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
