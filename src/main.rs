//! Strip Mining Yield Calculator
//!
//! Estimates how many ore blocks (and drops) a windmill-style strip mine yields.

mod calculator;
mod coerce;
mod input;
mod models;
mod ore_effects;
mod report;
mod session;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::input::{Command, Edit, Validation};
use crate::models::{OreKind, DEFAULT_ORE_PER_CHUNK, DEFAULT_PURE_FACTOR};
use crate::session::Session;

#[derive(Parser)]
#[command(name = "mine-yield-calculator")]
#[command(about = "Strip-mining ore yield calculator for Minecraft")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the yield for one set of inputs
    Calc {
        #[command(flatten)]
        inputs: Inputs,

        /// Print the full state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Tabulate the yield for every pass count up to a limit
    Table {
        #[command(flatten)]
        inputs: Inputs,

        /// Last pass count to tabulate
        #[arg(long, default_value = "10")]
        max_loops: u32,
    },

    /// List the other ores and their default correction
    Ores,

    /// Edit the inputs line by line and watch the results update
    Interactive {
        /// Accept any text in numeric fields
        #[arg(long)]
        lenient: bool,
    },
}

#[derive(Args)]
struct Inputs {
    /// Number of windmill passes
    #[arg(short = 'n', long, default_value = "0")]
    loops: String,

    /// "until" (cumulative through pass n) or "at" (exactly at pass n)
    #[arg(short, long, default_value = "until")]
    mode: String,

    /// Expected ore blocks per chunk
    #[arg(short, long, default_value_t = DEFAULT_ORE_PER_CHUNK.to_string())]
    density: String,

    /// Correction factor for the ore alone
    #[arg(long, default_value_t = DEFAULT_PURE_FACTOR.to_string())]
    pure_factor: String,

    /// Count the effect of another ore (repeatable)
    #[arg(long = "ore")]
    ores: Vec<String>,

    /// Override an ore's correction, as <ore>=<value> (repeatable)
    #[arg(long = "magnitude")]
    magnitudes: Vec<String>,

    /// Fortune tier: none, 1, 2 or 3
    #[arg(short, long, default_value = "none")]
    fortune: String,

    /// Skip input checks and let bad numbers through
    #[arg(long)]
    lenient: bool,
}

impl Inputs {
    /// Edits in form order: toggles before magnitudes so a magnitude is never
    /// rejected for an ore enabled on the same command line.
    fn edits(&self) -> Result<Vec<Edit>> {
        let mut edits = vec![
            Edit::Mode(input::parse_mode(&self.mode)?),
            Edit::LoopCount(self.loops.clone()),
            Edit::OrePerChunk(self.density.clone()),
            Edit::PureFactor(self.pure_factor.clone()),
        ];
        for ore in &self.ores {
            edits.push(Edit::OreEnabled(input::parse_ore(ore)?, true));
        }
        for assignment in &self.magnitudes {
            let (ore, value) = input::parse_assignment(assignment)?;
            edits.push(Edit::OreMagnitude(ore, value));
        }
        edits.push(Edit::Fortune(input::parse_tier(&self.fortune)?));
        Ok(edits)
    }

    fn validation(&self) -> Validation {
        if self.lenient {
            Validation::Lenient
        } else {
            Validation::Strict
        }
    }

    fn build_session(&self) -> Result<Session> {
        let mut session = Session::new();
        let validation = self.validation();
        for edit in self.edits()? {
            input::apply(&mut session, &edit, validation)?;
        }
        Ok(session)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Calc { inputs, json } => {
            let session = inputs.build_session()?;
            let snapshot = session.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", snapshot);
            }
        }

        Commands::Table { inputs, max_loops } => {
            let session = inputs.build_session()?;
            let rows = report::loop_table(&session, max_loops);
            println!(
                "Mode: {}, fortune: {}\n",
                session.state().mode().label(),
                session.fortune_tier().label()
            );
            print!("{}", report::format_table(&rows));
        }

        Commands::Ores => {
            println!("{:<10} {:<18} {:>10}", "Key", "Ore", "Default");
            println!("{}", "-".repeat(40));
            for ore in OreKind::ALL {
                println!(
                    "{:<10} {:<18} {:>10.2}",
                    ore.to_string(),
                    ore.display_name(),
                    ore.default_magnitude()
                );
            }
        }

        Commands::Interactive { lenient } => {
            let validation = if lenient {
                Validation::Lenient
            } else {
                Validation::Strict
            };
            run_interactive(validation)?;
        }
    }

    Ok(())
}

/// Line-oriented form: every edit re-renders the results
fn run_interactive(mut validation: Validation) -> Result<()> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", session.snapshot());
    println!("Type 'help' for commands.");

    loop {
        print!("> ");
        stdout.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read command")?;
        if read == 0 {
            break;
        }

        let command = match input::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("  {}", e);
                continue;
            }
        };

        match command {
            Command::Edit(edit) => match input::apply(&mut session, &edit, validation) {
                Ok(()) => println!("{}", session.snapshot()),
                Err(e) => eprintln!("  {}", e),
            },
            Command::Validation(v) => {
                debug!(?v, "validation changed");
                validation = v;
            }
            Command::Show => println!("{}", session.snapshot()),
            Command::Json => println!("{}", serde_json::to_string_pretty(&session.snapshot())?),
            Command::Help => println!("{}", input::HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}
