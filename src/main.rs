use std::process::ExitCode;

use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use dashwrap::cli::Args;
use dashwrap::{Config, Delivery, DispatchError, Dispatcher, HttpProviders};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dashwrap=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<Delivery, DispatchError> {
    let config = Config::load(&args.config)?;
    let dispatcher = Dispatcher::from_config(&config, HttpProviders::new(&config))?;
    let request = args.command.into_request();

    if args.dry_run {
        dispatcher.prepare(&request).await
    } else {
        dispatcher.dispatch(&request).await
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let dry_run = args.dry_run;

    match run(args).await {
        Ok(delivery) if dry_run => match serde_json::to_string_pretty(&delivery) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{} {}", "could not render payload:".bright_red(), e);
                ExitCode::FAILURE
            }
        },
        Ok(delivery) => {
            eprintln!(
                "{}",
                format!("pushed to widget '{}'", delivery.widget).bright_green()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.to_string().bright_red());
            ExitCode::from(e.exit_code())
        }
    }
}
