// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for SkyGraph

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    /// Convert to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// SkyGraph CLI - flights and music analytics on Dgraph
#[derive(Parser, Debug)]
#[command(name = "skygraph")]
#[command(about = "SkyGraph - load, query and maintain a Dgraph flights/music graph")]
#[command(version)]
pub struct Cli {
    /// Dgraph alpha HTTP endpoint
    #[arg(
        short = 'e',
        long = "endpoint",
        global = true,
        env = "SKYGRAPH_ENDPOINT",
        default_value = skygraph::config::DEFAULT_ENDPOINT
    )]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(
        short = 't',
        long = "timeout",
        global = true,
        env = "SKYGRAPH_TIMEOUT_SECS",
        default_value_t = 30
    )]
    pub timeout: u64,

    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short = 'f', long = "format", global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the schema (the built-in flights/music schema unless --file is given)
    Schema {
        /// Schema text file to install instead of the built-in schema
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the built-in schema and exit
        #[arg(long)]
        print: bool,
    },

    /// Load a JSON file of entities in one transaction
    Load {
        /// Path to a JSON array of entity objects
        path: PathBuf,
    },

    /// Delete every entity whose attribute equals a value
    Delete {
        /// Value to match exactly
        value: String,

        /// Indexed predicate to match on
        #[arg(short, long, default_value = "name")]
        predicate: String,
    },

    /// Airlines with the lowest mean flight wait
    Fastest {
        /// Number of airlines to show
        #[arg(short = 'n', long, default_value_t = skygraph::query::DEFAULT_RANK_LIMIT)]
        limit: usize,
    },

    /// Airlines with the highest mean flight wait
    Slowest {
        /// Number of airlines to show
        #[arg(short = 'n', long, default_value_t = skygraph::query::DEFAULT_RANK_LIMIT)]
        limit: usize,
    },

    /// Number of songs liked by users with this exact username
    LikedSongs {
        username: String,
    },

    /// Longest song per album for artists with this exact name
    LongestSong {
        artist: String,
    },

    /// Execute an ad hoc read-only DQL query
    Query {
        /// The DQL query to execute
        query: String,

        /// Query variable as name=value (repeatable)
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },

    /// Drop all data and schema
    DropAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rank_command() {
        let cli = Cli::try_parse_from(["skygraph", "fastest", "-n", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Fastest { limit: 3 }));
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_rank_limit_defaults_to_five() {
        let cli = Cli::try_parse_from(["skygraph", "slowest"]).unwrap();
        assert!(matches!(cli.command, Commands::Slowest { limit: 5 }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "skygraph",
            "liked-songs",
            "ana",
            "--format",
            "json",
            "--endpoint",
            "http://alpha:8080",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.endpoint, "http://alpha:8080");
    }

    #[test]
    fn test_query_vars() {
        let cli = Cli::try_parse_from([
            "skygraph",
            "query",
            "query q($a: string) { q(func: eq(name, $a)) { uid } }",
            "--var",
            "a=Acme Air",
        ])
        .unwrap();
        match cli.command {
            Commands::Query { vars, .. } => {
                assert_eq!(vars, vec![("a".to_string(), "Acme Air".to_string())]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_var_is_rejected() {
        assert!(Cli::try_parse_from(["skygraph", "query", "{}", "--var", "novalue"]).is_err());
    }

    #[test]
    fn test_delete_predicate_default() {
        let cli = Cli::try_parse_from(["skygraph", "delete", "Acme Air"]).unwrap();
        match cli.command {
            Commands::Delete { value, predicate } => {
                assert_eq!(value, "Acme Air");
                assert_eq!(predicate, "name");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
