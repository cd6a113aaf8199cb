use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use hiscores_www::{client::DataClient, config::Config, start_server, state::AppState};

#[derive(Parser, Debug)]
#[command(name = "hiscores-www", version, about = "Web front-end for the game hiscores")]
struct Cli {
    /// use a specific config.json file
    #[arg(short, long, default_value = "./config.json")]
    config: String,

    /// the logging verbosity level
    #[arg(short, long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    verbose: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.verbose));
    fmt().with_env_filter(filter).init();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            error!("failed to load {}: {err}", cli.config);
            return ExitCode::FAILURE;
        }
    };

    let mut client = DataClient::new(&config);

    if let Err(err) = client.connect().await {
        error!("data client connect failed: {err}");
        return ExitCode::FAILURE;
    }

    if let Err(err) = client.authenticate().await {
        error!("data client authentication failed: {err}");
        return ExitCode::FAILURE;
    }

    let dev = std::env::var("APP_ENV").map(|env| env != "production").unwrap_or(true);
    let state = AppState::new(config, Arc::new(client), dev);

    if let Err(err) = start_server(state).await {
        error!("server error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
