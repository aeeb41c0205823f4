use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use studyplan_core::time::parse_timezone;
use studyplan_core::{Algorithm, Clock, FixedClock, StudyScheduler, SystemClock, summarize};

mod config;
mod input;
mod logging;
mod output;
mod state;

#[derive(Parser, Debug)]
#[command(name = "studyplan", version, about = "Deterministic study-session planner")]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Schedule study sessions for a task file
    Plan {
        /// Tasks as a JSON array or CSV
        #[arg(long)]
        tasks: PathBuf,

        /// Busy intervals as a JSON array
        #[arg(long)]
        busy: Option<PathBuf>,

        /// priority | deadline | energy | balanced (default: from config)
        #[arg(long)]
        algorithm: Option<String>,

        /// IANA timezone (default: from config)
        #[arg(long)]
        tz: Option<String>,

        /// Pin "now" to an RFC3339 instant for reproducible plans
        #[arg(long)]
        now: Option<String>,

        /// Emit JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.studyplan/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config as TOML
    Show,
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Plan {
            tasks,
            busy,
            algorithm,
            tz,
            now,
            json,
        } => {
            let opts = PlanOptions {
                tasks,
                busy,
                algorithm,
                tz,
                now,
                json,
            };
            match opts.now.as_deref() {
                Some(s) => {
                    let pinned = parse_now(s)?;
                    plan(&opts, FixedClock(pinned))?;
                }
                None => plan(&opts, SystemClock)?,
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

struct PlanOptions {
    tasks: PathBuf,
    busy: Option<PathBuf>,
    algorithm: Option<String>,
    tz: Option<String>,
    now: Option<String>,
    json: bool,
}

fn parse_now(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s.trim())
        .with_context(|| format!("--now must be RFC3339, got {s}"))?
        .with_timezone(&Utc))
}

fn plan<C: Clock>(opts: &PlanOptions, clock: C) -> Result<()> {
    let cfg = config::load_config()?;

    let tz = match opts.tz.as_deref() {
        Some(name) => parse_timezone(name)?,
        None => cfg.timezone()?,
    };

    let mut prefs = cfg.preferences.clone();
    if let Some(name) = opts.algorithm.as_deref() {
        prefs.algorithm = name.parse::<Algorithm>().map_err(|e| anyhow!(e))?;
    }

    if !opts.tasks.exists() {
        bail!("Task file not found: {}", opts.tasks.display());
    }
    let all_tasks = input::load_tasks(&opts.tasks, tz)?;
    let tasks: Vec<_> = all_tasks.into_iter().filter(|t| t.is_eligible()).collect();

    let busy = match &opts.busy {
        Some(p) => input::load_busy(p)?,
        None => Vec::new(),
    };
    debug!(tasks = tasks.len(), busy = busy.len(), %tz, "inputs loaded");

    let scheduler = StudyScheduler::new(clock, tz);
    let result = scheduler
        .generate(&tasks, &busy, &prefs)
        .context("schedule generation failed")?;
    let local_tz = scheduler.timezone();
    let insights = summarize(&result.sessions, local_tz);

    let report = output::PlanReport {
        algorithm: prefs.algorithm,
        timezone: local_tz.to_string(),
        result: &result,
        insights: &insights,
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::render_plan(&report, local_tz));
    }

    Ok(())
}
