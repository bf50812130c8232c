//! Kickoff CLI
//!
//! 스펙 문서 검증, 분 단위 경기 실행

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "kickoff")]
#[command(about = "Validate Markov spec documents and run matches minute by minute", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Validate a spec document (JSON or YAML)
    Validate {
        /// Spec document path
        path: PathBuf,
    },

    /// Simulate a match minute by minute
    Simulate {
        #[arg(long, default_value_t = 42)]
        seed: i64,

        /// Maximum minutes to run (stops at full time)
        #[arg(long, default_value_t = 90)]
        minutes: u32,

        #[arg(long, default_value = "Home")]
        home: String,

        #[arg(long, default_value = "Away")]
        away: String,

        /// Rosters JSON file
        #[arg(long)]
        rosters: Option<PathBuf>,

        /// Spec document (defaults to the embedded one)
        #[arg(long)]
        spec: Option<PathBuf>,

        /// Engine config file (JSON or YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable the personality layer
        #[arg(long, default_value = "false")]
        personality: bool,

        /// Resume from a token file
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Write the final token here (.msgpack for compact)
        #[arg(long)]
        token_out: Option<PathBuf>,

        /// Print minute summaries as JSON lines
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use kickoff_cli::{load_engine, load_rosters, load_token, run_match, save_token, validate_spec, MatchRun};
    use kickoff_core::engine::narrative::TeamNames;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("kickoff=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            let report = validate_spec(&path)?;
            println!("✅ {} is valid", path.display());
            println!("   Version:    {}", report.version);
            println!("   Tick:       {}s", report.tick_seconds);
            println!("   Regulation: {} min", report.regulation_minutes);
            for (state, next) in &report.states {
                println!("   {:<16} → {}", state, next.join(", "));
            }
        }

        Commands::Simulate {
            seed,
            minutes,
            home,
            away,
            rosters,
            spec,
            config,
            personality,
            resume,
            token_out,
            json,
        } => {
            let engine = load_engine(spec.as_deref(), config.as_deref(), personality)?;
            let run = MatchRun {
                seed,
                names: TeamNames::new(home.clone(), away.clone()),
                minutes,
                rosters: rosters.as_deref().map(load_rosters).transpose()?,
                token: resume.as_deref().map(load_token).transpose()?,
            };

            let summaries = run_match(&engine, &run);
            for summary in &summaries {
                if json {
                    println!("{}", serde_json::to_string(summary)?);
                } else {
                    for line in &summary.narrative {
                        println!("{:>3}' {}", summary.minute, line);
                    }
                }
            }

            if let Some(last) = summaries.last() {
                if !json {
                    println!(
                        "\n{} {} - {} {}{}",
                        home,
                        last.score.home,
                        last.score.away,
                        away,
                        if last.full_time { " (FT)" } else { "" }
                    );
                }
                if let Some(path) = token_out {
                    save_token(&path, &last.next_token)?;
                    eprintln!("📄 Token saved to: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("kickoff CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
