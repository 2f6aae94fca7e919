// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for the CLI

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::Value;
use skygraph::query::{AirlineRank, ArtistLongestSong, UserLikes};
use skygraph::{QueryResponse, Result};

use super::commands::OutputFormat;

pub struct ResultFormatter;

impl ResultFormatter {
    /// Ranked airlines
    pub fn airlines(response: &QueryResponse, format: OutputFormat) -> Result<String> {
        if format == OutputFormat::Json {
            return Ok(response.to_pretty());
        }
        let rows: Vec<AirlineRank> = response.rows("airlines")?;
        let mut table = Self::table(&["#", "Airline", "Mean wait"]);
        for (i, row) in rows.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&row.name),
                Cell::new(format!("{:.2}", row.mean_wait)),
            ]);
        }
        Ok(Self::finish(table, rows.len()))
    }

    /// Users with their liked-song counts
    pub fn liked_songs(response: &QueryResponse, format: OutputFormat) -> Result<String> {
        if format == OutputFormat::Json {
            return Ok(response.to_pretty());
        }
        let rows: Vec<UserLikes> = response.rows("user")?;
        let mut table = Self::table(&["Uid", "Username", "Liked songs"]);
        for row in &rows {
            table.add_row(vec![
                Cell::new(row.uid.as_ref().map(|u| u.to_string()).unwrap_or_default()),
                Cell::new(&row.username),
                Cell::new(row.liked_songs),
            ]);
        }
        Ok(Self::finish(table, rows.len()))
    }

    /// Artists with the longest song of each album
    pub fn longest_songs(response: &QueryResponse, format: OutputFormat) -> Result<String> {
        if format == OutputFormat::Json {
            return Ok(response.to_pretty());
        }
        let rows: Vec<ArtistLongestSong> = response.rows("artist")?;
        let mut table = Self::table(&["Artist", "Album", "Longest song"]);
        let mut count = 0;
        for artist in &rows {
            if artist.publishes.is_empty() {
                table.add_row(vec![Cell::new(&artist.name), Cell::new("-"), Cell::new("-")]);
                count += 1;
            }
            for album in &artist.publishes {
                table.add_row(vec![
                    Cell::new(&artist.name),
                    Cell::new(album.name.as_deref().unwrap_or("-")),
                    Cell::new(
                        album
                            .longest_song
                            .map(|l| l.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ]);
                count += 1;
            }
        }
        Ok(Self::finish(table, count))
    }

    /// Generic envelope: JSON dump, or one table per block in table mode
    pub fn envelope(response: &QueryResponse, format: OutputFormat) -> String {
        let blocks = match (format, response.json().as_object()) {
            (OutputFormat::Table, Some(blocks)) => blocks,
            _ => return response.to_pretty(),
        };

        let mut out = Vec::new();
        for (name, value) in blocks {
            let rows = match value.as_array() {
                Some(rows) if rows.iter().all(Value::is_object) => rows,
                _ => {
                    out.push(format!("{}: {}", name, value));
                    continue;
                }
            };
            let mut columns: Vec<String> = Vec::new();
            for row in rows.iter().filter_map(Value::as_object) {
                for key in row.keys() {
                    if !columns.contains(key) {
                        columns.push(key.clone());
                    }
                }
            }
            let headers: Vec<&str> = columns.iter().map(String::as_str).collect();
            let mut table = Self::table(&headers);
            for row in rows {
                table.add_row(
                    columns
                        .iter()
                        .map(|c| Cell::new(row.get(c).map(Self::cell_text).unwrap_or_default()))
                        .collect::<Vec<_>>(),
                );
            }
            out.push(format!("{}:\n{}", name, Self::finish(table, rows.len())));
        }
        out.join("\n\n")
    }

    fn cell_text(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    fn table(headers: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers.to_vec());
        table
    }

    fn finish(table: Table, rows: usize) -> String {
        if rows == 0 {
            return "(no results)".to_string();
        }
        format!("{}\n({} rows)", table, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_airlines_table_keeps_server_order() {
        let response = QueryResponse::new(json!({
            "airlines": [
                {"name": "B", "mean_wait": 5.0},
                {"name": "A", "mean_wait": 15.0}
            ]
        }));
        let out = ResultFormatter::airlines(&response, OutputFormat::Table).unwrap();
        assert!(out.find("B").unwrap() < out.find("15.00").unwrap());
        assert!(out.ends_with("(2 rows)"));
    }

    #[test]
    fn test_json_format_dumps_envelope() {
        let response = QueryResponse::new(json!({"user": []}));
        let out = ResultFormatter::liked_songs(&response, OutputFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"user\": []\n}");
    }

    #[test]
    fn test_empty_block_reports_no_results() {
        let response = QueryResponse::new(json!({"user": []}));
        let out = ResultFormatter::liked_songs(&response, OutputFormat::Table).unwrap();
        assert_eq!(out, "(no results)");
    }

    #[test]
    fn test_envelope_table_collects_columns() {
        let response = QueryResponse::new(json!({
            "q": [{"uid": "0x1", "name": "Acme"}, {"uid": "0x2", "wait": 7}]
        }));
        let out = ResultFormatter::envelope(&response, OutputFormat::Table);
        assert!(out.starts_with("q:\n"));
        assert!(out.contains("wait"));
        assert!(out.contains("Acme"));
    }
}
