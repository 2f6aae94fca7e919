// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! SkyGraph command-line entry point

mod cli;

use clap::Parser;
use colored::Colorize;
use std::time::Duration;

use cli::handlers;
use cli::{Cli, Commands};
use skygraph::{Client, ClientConfig, RankOrder};

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        cli.log_level
            .map(|l| l.to_level_filter())
            .unwrap_or(log::LevelFilter::Warn)
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Schema { print: true, .. } = cli.command {
        handlers::print_schema();
        return Ok(());
    }

    let config =
        ClientConfig::new(cli.endpoint.clone()).with_timeout(Duration::from_secs(cli.timeout));
    let client = Client::connect(&config)?;
    let format = cli.format;

    match cli.command {
        Commands::Schema { file, .. } => handlers::handle_schema(&client, file.as_deref()),
        Commands::Load { path } => handlers::handle_load(&client, &path),
        Commands::Delete { value, predicate } => {
            handlers::handle_delete(&client, &predicate, &value)
        }
        Commands::Fastest { limit } => {
            handlers::handle_rank(&client, RankOrder::Fastest, limit, format)
        }
        Commands::Slowest { limit } => {
            handlers::handle_rank(&client, RankOrder::Slowest, limit, format)
        }
        Commands::LikedSongs { username } => {
            handlers::handle_liked_songs(&client, &username, format)
        }
        Commands::LongestSong { artist } => handlers::handle_longest_song(&client, &artist, format),
        Commands::Query { query, vars } => handlers::handle_query(&client, &query, &vars, format),
        Commands::DropAll { yes } => handlers::handle_drop_all(&client, yes),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}
