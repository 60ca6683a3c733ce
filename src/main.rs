//! # Artline Main Entry Point
//!
//! Browse the Rijksmuseum collection page by page from the terminal.

use anyhow::Result;
use artline::cmd_args::CommandLineArgs;
use artline::AppController;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose());

    tracing::debug!("Starting with {:?}", cmd_args);
    let mut app = AppController::new(cmd_args)?;
    app.run().await?;

    println!("\nTot ziens!");
    Ok(())
}

fn init_tracing_subscriber(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut filter = EnvFilter::try_from_env(format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase()
    ))
    .unwrap_or_else(|_| EnvFilter::new(default_level));

    for directive in ["reqwest=warn", "hyper=warn", "hyper_util=warn", "rustls=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
