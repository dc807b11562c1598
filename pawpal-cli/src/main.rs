use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pawpal_core::{Owner, Scheduler, filter_tasks, sort_by_time};
use std::path::PathBuf;

mod config;
mod inputs;
mod render;
mod session;

use config::{load_config, ConfigCommand};
use inputs::{apply_completions, load_owner, HouseholdArgs};

#[derive(Parser, Debug)]
#[command(
    name = "pawpal",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PAWPAL_BUILD_SHA"), ")"),
    about = "Daily pet care planner"
)]
struct Cli {
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Debug logging (overridden by PAWPAL_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build today's schedule for a household
    Plan {
        #[command(flatten)]
        household: HouseholdArgs,

        /// Complete a task before planning, as <pet>/<title> (repeatable)
        #[arg(long)]
        complete: Vec<String>,

        /// Print one JSON document instead of text
        #[arg(long)]
        json: bool,
    },

    /// List tasks in time order after planning
    Tasks {
        #[command(flatten)]
        household: HouseholdArgs,

        /// Only tasks for this pet (case-insensitive)
        #[arg(long)]
        pet: Option<String>,

        /// Only open tasks
        #[arg(long, conflicts_with = "done")]
        pending: bool,

        /// Only completed tasks
        #[arg(long)]
        done: bool,
    },

    /// Interactive planning session
    Session {
        /// Start from a household file instead of an empty owner
        #[arg(long)]
        household: Option<PathBuf>,

        /// Owner name for an empty session
        #[arg(long, default_value = "Owner")]
        owner: String,
    },

    /// Manage ~/.pawpal/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match cli.command {
        Command::Plan {
            household,
            complete,
            json,
        } => {
            let cfg = load_config()?;
            let mut owner = load_owner(&household, &cfg)?;
            apply_completions(&mut owner, &complete)?;

            let mut scheduler = Scheduler::new();
            scheduler.generate_schedule(&mut owner);

            if json || cfg.output.json {
                let report = render::plan_report(&owner, &scheduler);
                println!("{}", serde_json::to_string_pretty(&report).context("serialize plan")?);
            } else {
                print!("{}", render::render_plan_report(&owner, &scheduler));
            }
        }

        Command::Tasks {
            household,
            pet,
            pending,
            done,
        } => {
            let cfg = load_config()?;
            let mut owner = load_owner(&household, &cfg)?;
            Scheduler::new().generate_schedule(&mut owner);

            let completed = match (pending, done) {
                (true, _) => Some(false),
                (_, true) => Some(true),
                _ => None,
            };
            let all = owner.all_tasks();
            let filtered = filter_tasks(&owner, all.iter().copied(), completed, pet.as_deref());
            let sorted = sort_by_time(filtered);
            print!("{}", render::render_task_list(&owner, &sorted));
        }

        Command::Session { household, owner } => {
            let cfg = load_config()?;
            let owner = match household {
                Some(path) => load_owner(
                    &HouseholdArgs {
                        household: path,
                        care_sheets: Vec::new(),
                        csvs: Vec::new(),
                    },
                    &cfg,
                )?,
                None => {
                    let (start, end) = cfg.default_window();
                    Owner::with_window(owner, start, end)
                }
            };
            session::run_session(session::AppState::new(owner))?;
        }

        Command::Config { command } => config::run(command)?,
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PAWPAL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
