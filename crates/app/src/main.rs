use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing_subscriber::EnvFilter;

use prep_core::Clock;
use services::{GatewayConfig, HttpAssistantGateway, SessionController};
use ui::{App, AppContext};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidServerUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidServerUrl { raw } => write!(f, "invalid --server value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--server <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --server http://localhost:8000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_SERVER_URL   assistant service address");
    eprintln!("  PREP_LOG          log filter (default: info)");
}

struct Args {
    server_url: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut server_url = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--server" => {
                    let value = args.next().ok_or(ArgsError::MissingValue { flag: "--server" })?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidServerUrl { raw: value });
                    }
                    server_url = Some(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { server_url })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PREP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let config = match args.server_url {
        Some(raw) => {
            GatewayConfig::new(&raw).map_err(|_| ArgsError::InvalidServerUrl { raw })?
        }
        None => GatewayConfig::from_env()?,
    };
    tracing::info!(server = %config.base_url, "starting study assistant");

    let gateway = Arc::new(HttpAssistantGateway::new(config));
    let controller = SessionController::new(gateway, Clock::default_clock());
    let context = AppContext::new(controller);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Study Assistant")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
