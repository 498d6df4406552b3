//! modelcards - model and dataset card tool
//!
//! Command line front end for the `modelcards` library: show, create, validate and push
//! Hugging Face repo cards.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use commands::HubOptions;

fn init_logging(verbose: bool) {
    let default = if verbose {
        "modelcards=debug"
    } else {
        "modelcards=error"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let hub = HubOptions {
        endpoint: cli.endpoint,
        token: cli.token,
    };

    let result = match cli.command {
        Commands::Show(args) => commands::show::run(&hub, args),
        Commands::New(args) => commands::new::run(args),
        Commands::Validate(args) => commands::validate::run(&hub, args),
        Commands::Push(args) => commands::push::run(&hub, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
