// Entrypoint for the CLI application.
// - Parses flags, sets up logging, builds the client and hands it to the
//   menu loop.
// - The process exit status comes from how the loop ended.

use anyhow::Context;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vintage_cars::api::CarsClient;
use vintage_cars::config::Cli;
use vintage_cars::prompt::{Screen, StdinInput, TerminalInput};
use vintage_cars::ui::{Exit, Session};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the table on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&cli) {
        Ok(exit) => exit.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Exit> {
    let config = cli.client_config().context("Invalid configuration")?;
    tracing::info!(url = %config.collection_url(), "starting session");
    let api = CarsClient::new(config)?;

    // Prompts need a real terminal; piped input falls back to plain lines.
    let attended = console::user_attended();
    let screen = Screen::new(io::stdout(), attended && !cli.no_color);
    if attended {
        Session::new(&api, TerminalInput, screen)
            .with_spinners(true)
            .run()
    } else {
        Session::new(&api, StdinInput::new(), screen).run()
    }
}
