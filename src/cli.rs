use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::stats::RawStatLine;

#[derive(Parser, Debug)]
#[command(author, version, about = "StatSlam basketball stats backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 4000)
        #[arg(short, long, default_value_t = 4000)]
        port: u16,
    },
    /// Print the master stats table
    Stats {
        /// Only rows whose name or team contains this text
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Write the master stats table as CSV
    Export {
        #[arg(short, long, default_value = "")]
        query: String,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate and store one stat line
    AddStats(StatLineArgs),
    /// Drop all stored documents and recreate the schema
    Reset,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct StatLineArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub team: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub layup_attempts: u32,
    #[arg(long, default_value_t = 0)]
    pub layup_made: u32,
    #[arg(long, default_value_t = 0)]
    pub three_point_attempts: u32,
    #[arg(long, default_value_t = 0)]
    pub three_point_made: u32,
    #[arg(long, default_value_t = 0)]
    pub free_throw_attempts: u32,
    #[arg(long, default_value_t = 0)]
    pub free_throw_made: u32,
}

impl From<&StatLineArgs> for RawStatLine {
    fn from(args: &StatLineArgs) -> Self {
        RawStatLine {
            player_name: args.name.clone(),
            team: args.team.clone(),
            layup_attempts: args.layup_attempts,
            layup_made: args.layup_made,
            three_point_attempts: args.three_point_attempts,
            three_point_made: args.three_point_made,
            free_throw_attempts: args.free_throw_attempts,
            free_throw_made: args.free_throw_made,
        }
    }
}
