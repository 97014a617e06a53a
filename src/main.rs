use clap::Parser;
use matchday::cli::{self, Cli};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matchday=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!(root = %cli.root.display(), "Starting matchday");

    if let Err(err) = cli::run(cli) {
        error!(error = %err, "Command failed");
        let mut source = std::error::Error::source(&err);
        eprintln!("Error: {}", err);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}
