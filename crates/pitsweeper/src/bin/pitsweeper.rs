//! Pitsweeper CLI
//!
//! Plays one maze with the knowledge-base agent and prints a JSON report.
//!
//! ```text
//! pitsweeper maze.txt --config agent.json --max-steps 500 --dump-kb
//! ```

use clap::Parser;
use pitsweeper::json::AgentJson;
use pitsweeper::{run, AgentConfig, GridMaze, MazeAgent};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pitsweeper")]
#[command(about = "Walk a pit maze using propositional resolution")]
#[command(version)]
struct Cli {
    /// Maze file (`#` wall, `.` floor, `P` pit, `@` start, `G` goal)
    maze: PathBuf,
    /// Agent configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Give up after this many moves
    #[arg(long, default_value = "1000")]
    max_steps: usize,
    /// Log every query and simplification
    #[arg(short, long)]
    verbose: bool,
    /// Print the final knowledge base and agent state as JSON
    #[arg(long)]
    dump_kb: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match play(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn play(cli: &Cli) -> pitsweeper::Result<()> {
    let config = match &cli.config {
        Some(path) => AgentConfig::from_file(path)?,
        None => AgentConfig::default(),
    };
    let mut maze = GridMaze::from_file(&cli.maze)?;
    let mut agent = MazeAgent::new(&maze, config);

    let result = run(&mut maze, &mut agent, cli.max_steps);
    eprint!("{}", maze);

    if cli.dump_kb {
        println!("{}", serde_json::to_string_pretty(&AgentJson::from_agent(&agent))?);
    }
    let report = result?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
