use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::BackendClient;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_COMPLETE_HOLD_MS: u64 = 600;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBackendUrl { raw: String },
    InvalidHold { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBackendUrl { raw } => {
                write!(f, "invalid --backend-url value: {raw}")
            }
            ArgsError::InvalidHold { raw } => {
                write!(f, "invalid --complete-hold-ms value: {raw}")
            }
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

struct Args {
    backend_url: String,
    complete_hold: Duration,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--backend-url <url>] [--complete-hold-ms <ms>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --backend-url {DEFAULT_BACKEND_URL}");
    eprintln!("  --complete-hold-ms {DEFAULT_COMPLETE_HOLD_MS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GRADER_BACKEND_URL, GRADER_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut backend_url = std::env::var("GRADER_BACKEND_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let mut complete_hold = Duration::from_millis(DEFAULT_COMPLETE_HOLD_MS);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--backend-url" => {
                    backend_url = require_value(args, "--backend-url")?;
                }
                "--complete-hold-ms" => {
                    let value = require_value(args, "--complete-hold-ms")?;
                    let millis: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidHold { raw: value.clone() })?;
                    complete_hold = Duration::from_millis(millis);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let trimmed = backend_url.trim();
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ArgsError::InvalidBackendUrl { raw: backend_url });
        }

        Ok(Self {
            backend_url: trimmed.to_string(),
            complete_hold,
        })
    }
}

struct DesktopApp {
    backend: Arc<BackendClient>,
    complete_hold: Duration,
}

impl UiApp for DesktopApp {
    fn backend(&self) -> Arc<BackendClient> {
        Arc::clone(&self.backend)
    }

    fn complete_hold(&self) -> Duration {
        self.complete_hold
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GRADER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

fn main() {
    init_tracing();

    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv) {
        Ok(parsed) => parsed,
        Err(error) => {
            eprintln!("{error}");
            print_usage();
            std::process::exit(2);
        }
    };

    tracing::info!(backend_url = %parsed.backend_url, "starting bulk grader");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        backend: Arc::new(BackendClient::new(parsed.backend_url)),
        complete_hold: parsed.complete_hold,
    });
    let context = build_app_context(&app);

    // Dioxus/tao can default to an always-on-top window in some dev setups.
    // Explicitly disable it so the app doesn't behave like a modal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Bulk Grader")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}
