#![allow(dead_code)]

use crate::areas::repository::Repository;
use anyhow::Result;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;

#[derive(Parser)]
#[command(
    name = "sit",
    version = "0.1.0",
    about = "A research version-control system with a single plain-text history file",
    long_about = "Sit keeps a project's entire history in one append-only plain-text file. \
    Change operations and commit records are interleaved in a line-oriented log; \
    every view of the repository is re-folded from that file on demand.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the history file with its initial commit, \
        in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage working-directory changes",
        long_about = "This command scans the given paths, diffs them against the staged tree \
        and appends the resulting operation records to the history file."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(name = "status", about = "Show staged operations and unstaged changes")]
    Status,
    #[command(name = "stats", about = "Show repository counters")]
    Stats,
    #[command(
        name = "commit",
        about = "Seal the staged operations into a commit",
        long_about = "This command computes the commit hash over the staged operation bytes \
        and appends a commit record. The message words are joined with spaces."
    )]
    Commit {
        #[arg(index = 1, required = true, help = "The commit message")]
        message: Vec<String>,
    },
    #[command(name = "reset", about = "Drop the staged operations")]
    Reset,
    #[command(name = "stash", about = "Park the staged operations in a stash record")]
    Stash,
    #[command(name = "unstash", about = "Restore the most recently stashed operations")]
    Unstash,
    #[command(
        name = "checkout",
        about = "Reconcile the working directory with a tree state",
        long_about = "With a query (an order number or a hash fragment), checks out the \
        matching commit's tree; without one, fast-forwards back to the staged tree."
    )]
    Checkout {
        #[arg(index = 1, help = "Commit order number or hash fragment")]
        query: Option<String>,
    },
    #[command(name = "ls", about = "List tracked paths")]
    Ls,
    #[command(name = "log", about = "Show the commit chain, newest first")]
    Log,
    #[command(name = "diff", about = "Preview the operations add would stage")]
    Diff {
        #[arg(index = 1, help = "The files or directories to diff")]
        paths: Vec<String>,
    },
    #[command(name = "stage", about = "Print the staged records verbatim")]
    Stage,
    #[command(name = "clone", about = "Copy another repository's history file here")]
    Clone {
        #[arg(index = 1, help = "The source repository directory")]
        source: String,
    },
    #[command(
        name = "from-git",
        about = "Import the Git repository in the current directory",
        long_about = "This command walks the Git commit log oldest-first and synthesizes a \
        history file with the same commit metadata; text blob hashes match git hash-object."
    )]
    FromGit,
}

fn repository_here() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(pwd, Box::new(std::io::stdout()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path.into(), Box::new(std::io::stdout()))?,
                None => repository_here()?,
            };

            repository.init().await?
        }
        Commands::Add { paths } => repository_here()?.add(paths).await?,
        Commands::Status => repository_here()?.status().await?,
        Commands::Stats => repository_here()?.stats().await?,
        Commands::Commit { message } => repository_here()?.commit(&message.join(" ")).await?,
        Commands::Reset => repository_here()?.reset().await?,
        Commands::Stash => repository_here()?.stash().await?,
        Commands::Unstash => repository_here()?.unstash().await?,
        Commands::Checkout { query } => repository_here()?.checkout(query.as_deref()).await?,
        Commands::Ls => repository_here()?.ls().await?,
        Commands::Log => repository_here()?.log().await?,
        Commands::Diff { paths } => repository_here()?.diff(paths).await?,
        Commands::Stage => repository_here()?.stage().await?,
        Commands::Clone { source } => repository_here()?.clone_from(source).await?,
        Commands::FromGit => repository_here()?.from_git().await?,
    }

    Ok(())
}
