mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Fetch { remote, prune } => {
            commands::fetch::handle_fetch(remote.as_deref(), prune, cli.json)
        }
        Commands::Checkout { branch } => {
            commands::checkout::handle_checkout(branch.as_deref(), cli.json)
        }
        Commands::Commit { message, paths } => {
            commands::commit::handle_commit(&message, &paths, cli.json)
        }
        Commands::NewFb {
            name,
            local,
            integration_branch,
            remote,
        } => commands::new_feature_branch::handle_new_feature_branch(
            &name,
            local,
            integration_branch,
            remote,
            cli.json,
        ),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
