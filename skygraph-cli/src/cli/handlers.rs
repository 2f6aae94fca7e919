// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for SkyGraph

use colored::Colorize;
use std::io::Write;
use std::path::Path;

use skygraph::query::{self, RankOrder, Vars};
use skygraph::{delete, loader, maintenance, schema, Client, Schema};

use super::commands::OutputFormat;
use super::output::ResultFormatter;

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// Handle the schema command
pub fn handle_schema(client: &Client, file: Option<&Path>) -> HandlerResult {
    match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read schema file {:?}: {}", path, e))?;
            println!("  → Installing schema from {:?}...", path);
            schema::install_text(client, &text)?;
        }
        None => {
            println!("  → Installing built-in flights/music schema...");
            schema::install(client, &Schema::flights_and_music())?;
        }
    }
    println!("{}", "Schema installed".green());
    Ok(())
}

/// Print the built-in schema text
pub fn print_schema() {
    print!("{}", Schema::flights_and_music());
}

/// Handle the load command
pub fn handle_load(client: &Client, path: &Path) -> HandlerResult {
    println!("  → Loading {:?}...", path);
    let report = loader::load_file(client, path)?;

    println!(
        "{}",
        format!("Committed {} entities", report.entities).green()
    );
    if report.uids.is_empty() {
        println!("No new uids assigned");
    } else {
        println!("{}", "New uids:".bold());
        for (blank, uid) in &report.uids {
            println!("  {} → {}", blank.cyan(), uid);
        }
    }
    Ok(())
}

/// Handle the delete command
pub fn handle_delete(client: &Client, predicate: &str, value: &str) -> HandlerResult {
    let report = delete::delete_by(client, predicate, value)?;
    if report.is_empty() {
        println!(
            "{}",
            format!("No entities with {} = {:?}", predicate, value).yellow()
        );
        return Ok(());
    }
    for uid in &report.deleted {
        println!("  deleted {}", uid.to_string().cyan());
    }
    println!(
        "{}",
        format!(
            "Deleted {} entities with {} = {:?}",
            report.deleted.len(),
            predicate,
            value
        )
        .green()
    );
    Ok(())
}

/// Handle the fastest and slowest commands
pub fn handle_rank(
    client: &Client,
    order: RankOrder,
    limit: usize,
    format: OutputFormat,
) -> HandlerResult {
    let response = query::rank_airlines(client, order, limit)?;
    if format == OutputFormat::Table {
        println!("{}", format!("Top {} {} airlines by mean wait", limit, order).bold());
    }
    println!("{}", ResultFormatter::airlines(&response, format)?);
    Ok(())
}

/// Handle the liked-songs command
pub fn handle_liked_songs(client: &Client, username: &str, format: OutputFormat) -> HandlerResult {
    let response = query::user_liked_songs(client, username)?;
    if format == OutputFormat::Table {
        println!(
            "{}",
            format!(
                "Users named {}: {}",
                username,
                response.block("user").len()
            )
            .bold()
        );
    }
    println!("{}", ResultFormatter::liked_songs(&response, format)?);
    Ok(())
}

/// Handle the longest-song command
pub fn handle_longest_song(client: &Client, artist: &str, format: OutputFormat) -> HandlerResult {
    let response = query::longest_song_per_artist(client, artist)?;
    if format == OutputFormat::Table {
        println!(
            "{}",
            format!(
                "Artists named {}: {}",
                artist,
                response.block("artist").len()
            )
            .bold()
        );
    }
    println!("{}", ResultFormatter::longest_songs(&response, format)?);
    Ok(())
}

/// Handle the query command (one-off query execution)
pub fn handle_query(
    client: &Client,
    dql: &str,
    vars: &[(String, String)],
    format: OutputFormat,
) -> HandlerResult {
    let mut bound = Vars::new();
    for (name, value) in vars {
        bound.insert(name, value.as_str());
    }
    let response = query::run_raw(client, dql, &bound)?;
    println!("{}", ResultFormatter::envelope(&response, format));
    Ok(())
}

/// Handle the drop-all command
pub fn handle_drop_all(client: &Client, yes: bool) -> HandlerResult {
    if !yes && !confirm(&format!("Drop ALL data and schema at {}?", client.endpoint()))? {
        println!("{}", "Aborted".yellow());
        return Ok(());
    }
    maintenance::drop_all(client)?;
    println!("{}", "All data dropped".green());
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, std::io::Error> {
    print!("{} [y/N] ", prompt.red().bold());
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
