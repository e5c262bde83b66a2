//! Perplexity gateway entry point

use clap::Parser;
use pplx_cli::{
    cli::Cli,
    commands,
    config::GatewayConfig,
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};
use tracing::info;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Disable colored output if requested
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Refuse to start without an API key, before anything is served
    let config = GatewayConfig::from_cli(&cli)?;

    init_tracing()?;

    info!("Perplexity gateway v{}", env!("CARGO_PKG_VERSION"));

    commands::serve::execute(config).await?;
    Ok(())
}
