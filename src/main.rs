use anyhow::Context;
use clap::Parser;
use status_tracker::adapters::statuspage::StatuspageClient;
use status_tracker::config::{resolve_poll_interval, LogFormat};
use status_tracker::{AppConfig, Poller};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Watch a status page for new incidents and status changes.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seconds between checks (minimum 10)
    poll_interval: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format);
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Configuration validation failed")?;

    let interval = resolve_poll_interval(cli.poll_interval.as_deref(), config.poll_interval_secs);

    let client = StatuspageClient::new(
        config.incidents_url.clone(),
        config.components_url.clone(),
        &config.user_agent,
        config.request_timeout(),
    )
    .context("Failed to build HTTP client")?;

    print_banner(client.incidents_url(), interval.as_secs());

    let mut poller = Poller::new(client, &config);

    println!("Fetching initial status...");
    match poller.prime().await {
        Ok(events) => poller.print_events(&events),
        Err(e) => error!("Initial fetch failed: {}", e),
    }
    println!(
        "Monitoring for new updates (checking every {} seconds)...\n",
        interval.as_secs()
    );

    let stats = poller.run(interval, shutdown_signal()).await;
    info!(
        "Tracker stopped ({} check(s), {} event(s))",
        stats.cycles, stats.events
    );
    println!("\nTracker stopped.");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "status_tracker=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn print_banner(url: &str, interval_secs: u64) {
    let rule = "=".repeat(70);
    println!("OpenAI Status Page Tracker");
    println!("{}", rule);
    println!("Monitoring: {}", url);
    println!("Poll interval: {} seconds", interval_secs);
    println!("Press Ctrl+C to stop");
    println!("{}\n", rule);
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down gracefully...");
}
