// Copyright (c) 2024-2025 SkyGraph Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Fixed analytical queries over the flights and music graphs

use serde::Deserialize;
use std::fmt;

use super::vars::{Template, VarType, Vars};
use super::{run, QueryResponse};
use crate::client::{Client, Uid};
use crate::error::{DgraphError, Error, Result};

/// Number of airlines returned by the ranking queries unless overridden
pub const DEFAULT_RANK_LIMIT: usize = 5;

pub const AIRLINES_BLOCK: &str = "airlines";
pub const USER_BLOCK: &str = "user";
pub const ARTIST_BLOCK: &str = "artist";

/// Direction for ranking airlines by mean flight wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Lowest mean wait first
    Fastest,
    /// Highest mean wait first
    Slowest,
}

impl RankOrder {
    fn order_keyword(self) -> &'static str {
        match self {
            RankOrder::Fastest => "orderasc",
            RankOrder::Slowest => "orderdesc",
        }
    }
}

impl fmt::Display for RankOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankOrder::Fastest => write!(f, "fastest"),
            RankOrder::Slowest => write!(f, "slowest"),
        }
    }
}

/// One row of the `airlines` block
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirlineRank {
    pub uid: Option<Uid>,
    #[serde(default)]
    pub name: String,
    pub mean_wait: f64,
}

/// One row of the `user` block
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserLikes {
    pub uid: Option<Uid>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub liked_songs: u64,
}

/// One row of the `artist` block
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArtistLongestSong {
    pub uid: Option<Uid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub publishes: Vec<AlbumLongestSong>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlbumLongestSong {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub longest_song: Option<i64>,
}

impl ArtistLongestSong {
    /// Longest song across all albums
    pub fn longest(&self) -> Option<i64> {
        self.publishes.iter().filter_map(|a| a.longest_song).max()
    }
}

/// Per airline, the mean wait of its scheduled flights, ordered by that
/// mean and truncated to `$first`. Ties keep the server's order.
fn rank_template(order: RankOrder) -> Template {
    let body = format!(
        r#"{{
  var(func: type(Airline)) {{
    schedules {{
      flight_wait as wait
    }}
    mean_wait as avg(val(flight_wait))
  }}

  {block}(func: uid(mean_wait), {order}: val(mean_wait), first: $first) {{
    uid
    name
    mean_wait: val(mean_wait)
  }}
}}"#,
        block = AIRLINES_BLOCK,
        order = order.order_keyword(),
    );
    Template::new(&format!("{}_airlines", order), body).param("first", VarType::Int)
}

fn liked_songs_template() -> Template {
    Template::new(
        "user_liked_songs",
        r#"{
  user(func: type(User)) @filter(eq(username, $username)) {
    uid
    username
    liked_songs: count(likes)
  }
}"#,
    )
    .param("username", VarType::String)
}

fn longest_song_template() -> Template {
    Template::new(
        "longest_song_per_artist",
        r#"{
  artist(func: type(Artist)) @filter(eq(name, $artist)) {
    uid
    name
    publishes {
      name
      contains {
        song_length as length
      }
      longest_song: max(val(song_length))
    }
  }
}"#,
    )
    .param("artist", VarType::String)
}

/// Rank airlines by mean flight wait; result block `airlines`
pub fn rank_airlines(client: &Client, order: RankOrder, limit: usize) -> Result<QueryResponse> {
    if limit == 0 {
        return Err(Error::Query(DgraphError::invalid(
            "ranking limit must be at least 1",
        )));
    }
    // A negative `first` counts from the end of the ordering.
    let first = i64::try_from(limit).map_err(|_| {
        Error::Query(DgraphError::invalid(format!(
            "ranking limit {} is too large",
            limit
        )))
    })?;
    run(client, &rank_template(order), &Vars::new().with("first", first))
}

/// Users whose username matches exactly, with their liked-song count;
/// result block `user`
pub fn user_liked_songs(client: &Client, username: &str) -> Result<QueryResponse> {
    run(
        client,
        &liked_songs_template(),
        &Vars::new().with("username", username),
    )
}

/// Artists whose name matches exactly, with the longest song per album;
/// result block `artist`
pub fn longest_song_per_artist(client: &Client, artist: &str) -> Result<QueryResponse> {
    run(
        client,
        &longest_song_template(),
        &Vars::new().with("artist", artist),
    )
}
