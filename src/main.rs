use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn, Level};

use floodgate::config::{LimiterConfig, Mode};
use floodgate::ratelimit::{Identifier, RateLimiter, Timestamp, Window};
use floodgate::store::MemoryStore;

/// Replay a batch of simulated requests through the rate limiter and report
/// each identifier's allow/deny tally.
#[derive(Parser)]
#[command(name = "floodgate", version, about)]
struct Cli {
    /// Path to a YAML limiter configuration file
    #[arg(long)]
    config: Option<String>,

    /// Window duration in seconds (overrides the configuration file)
    #[arg(long)]
    window_seconds: Option<u64>,

    /// Maximum requests per identifier per window (overrides the
    /// configuration file)
    #[arg(long)]
    max_requests: Option<u64>,

    /// Use strict mode (atomic increment-with-ceiling store updates)
    #[arg(long)]
    strict: bool,

    /// Identifier to replay requests for; repeatable. Omitted entirely, the
    /// anonymous sentinel is used
    #[arg(long = "identifier")]
    identifiers: Vec<String>,

    /// Number of requests to replay per identifier
    #[arg(long, default_value_t = 10)]
    requests: u32,

    /// Emit the summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ReplaySummary {
    identifier: String,
    allowed: u32,
    denied: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    info!("Starting Floodgate exercise run");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => LimiterConfig::from_file(path)?,
        None => LimiterConfig::default(),
    };
    if let Some(window_seconds) = cli.window_seconds {
        config.window_seconds = window_seconds;
    }
    if let Some(max_requests) = cli.max_requests {
        config.max_requests = max_requests;
    }
    if cli.strict {
        config.mode = Mode::Strict;
    }

    info!(
        window_seconds = config.window_seconds,
        max_requests = config.max_requests,
        mode = ?config.mode,
        "Configuration loaded"
    );

    let window_seconds = config.window_seconds;
    let limiter = RateLimiter::with_config(MemoryStore::new(), config)?;

    let identifiers: Vec<Identifier> = if cli.identifiers.is_empty() {
        vec![Identifier::from_optional(None)]
    } else {
        cli.identifiers
            .iter()
            .map(|value| Identifier::new(value.as_str()))
            .collect()
    };

    let mut summaries = Vec::with_capacity(identifiers.len());
    for identifier in &identifiers {
        let mut allowed = 0u32;
        let mut denied = 0u32;

        for _ in 0..cli.requests {
            let now = unix_now()?;
            let decision = limiter.check_and_record(identifier, now).await?;

            if decision.is_allow() {
                allowed += 1;
            } else {
                denied += 1;
                let reset_in =
                    Window::containing(now, window_seconds).seconds_until_reset(now);
                warn!(identifier = %identifier, reset_in, "Request denied");
            }
        }

        info!(identifier = %identifier, allowed, denied, "Replay finished");
        summaries.push(ReplaySummary {
            identifier: identifier.to_string(),
            allowed,
            denied,
        });
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }

    Ok(())
}

/// Current wall-clock time as epoch seconds.
///
/// Reading the clock is the caller's job; the limiter only ever sees the
/// timestamps handed to it.
fn unix_now() -> anyhow::Result<Timestamp> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}
