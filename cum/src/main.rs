pub mod analyzer;
pub mod assigned_renderer;
pub mod clickup;
pub mod commands;
pub mod config;
pub mod context;
pub mod types;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cum",
    version,
    about = "ClickUp from the command line",
    long_about = "cum talks to the ClickUp API and ranks your assigned tasks by how many open blockers stand in their way."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rank assigned tasks by open blockers and dependency depth
    Assigned {
        /// Team (workspace) ID, or "current"
        #[arg(short, long)]
        team: Option<String>,

        /// Assignee user ID, or "current" (defaults to the token's user)
        #[arg(short, long)]
        assignee: Option<String>,

        /// Also fetch closed tasks
        #[arg(long)]
        include_closed: bool,

        /// Count blockers outside the assigned set as open
        #[arg(long)]
        count_external: bool,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        /// Hide the status legend
        #[arg(long)]
        no_legend: bool,
    },

    /// Show a single task and its dependency edges
    Task {
        /// Task ID, or "current"
        task_id: String,

        /// Print the raw task as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remember an ID as the current team, task or assignee
    Set {
        /// team, task or assignee
        kind: String,

        /// ID to store
        id: String,
    },

    /// Show the current context IDs
    Current {
        /// Only show this kind
        kind: Option<String>,
    },

    /// Clear one or all current context IDs
    Clear {
        /// Only clear this kind
        kind: Option<String>,
    },

    /// Show current configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "cum=debug" } else { "cum=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        if Cli::command().print_help().is_err() {
            std::process::exit(1);
        }
        println!();
        return;
    };

    let (name, result) = match command {
        Command::Assigned {
            team,
            assignee,
            include_closed,
            count_external,
            json,
            no_legend,
        } => (
            "Assigned",
            commands::assigned::run(
                team.as_deref(),
                assignee.as_deref(),
                include_closed,
                count_external,
                json,
                no_legend,
            ),
        ),
        Command::Task { task_id, json } => ("Task", commands::task::run(&task_id, json)),
        Command::Set { kind, id } => ("Set", commands::set::run(&kind, &id)),
        Command::Current { kind } => ("Current", commands::current::run(kind.as_deref())),
        Command::Clear { kind } => ("Clear", commands::clear::run(kind.as_deref())),
        Command::Config { init } => ("Config", commands::config::run(init)),
    };

    if let Err(e) = result {
        eprintln!("{}", format!("{} error: {}", name, e).red());
        std::process::exit(1);
    }
}
