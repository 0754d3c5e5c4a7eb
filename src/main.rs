use clap::Parser;
use dotenvy::dotenv;
use recipe_box::{cli::Cli, config, errors::Result};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Every failure is logged once, here
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // 2. Load .env file; variables can also be set externally
    dotenv().ok();

    // 3. Parse the command line
    let cli = Cli::parse();

    // 4. Load the application configuration (file, then environment)
    let app_config = config::load_app_configuration()?;
    info!("Successfully processed application configuration.");

    // 5. Serve the API or run a client command
    recipe_box::cli::run(cli, app_config).await
}
