use anyhow::Result;

use stat_slam::cli::Command;
use stat_slam::{
    handle_add_stats, handle_completions, handle_export, handle_reset, handle_serve,
    handle_stats, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Stats { query } => handle_stats(query),
        Command::Export { query, output } => handle_export(query, output.as_deref()),
        Command::AddStats(args) => handle_add_stats(args),
        Command::Reset => handle_reset(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
