use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gp")]
#[command(about = "Branch lifecycle automation for git repositories", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the latest changes from a remote
    Fetch {
        /// Remote to fetch from (defaults to gitProcess.remoteName, then "origin")
        #[arg(long)]
        remote: Option<String>,
        /// Remove tracking branches the remote no longer has
        #[arg(long)]
        prune: bool,
    },
    /// Switch to a branch, picking one interactively when none is given
    Checkout {
        branch: Option<String>,
    },
    /// Stage paths and commit them on top of HEAD
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
        /// Paths to stage, relative to the repository root
        paths: Vec<String>,
    },
    /// Create a feature branch from the integration branch and switch to it
    #[command(name = "new-fb")]
    NewFb {
        name: String,
        /// Do not fetch; branch off the local integration branch
        #[arg(long)]
        local: bool,
        /// Branch to start from (defaults to gitProcess.integrationBranch)
        #[arg(long)]
        integration_branch: Option<String>,
        /// Remote to fetch from
        #[arg(long)]
        remote: Option<String>,
    },
}
