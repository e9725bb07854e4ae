use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::model::schedule::Game;

/// Keeps games involving any of the given teams, in input order. An empty
/// team set means all teams and returns the input unchanged.
pub fn by_teams(games: Vec<Game>, team_ids: &[i64]) -> Vec<Game> {
    if team_ids.is_empty() {
        return games;
    }

    let wanted: HashSet<i64> = team_ids.iter().copied().collect();
    let filtered: Vec<Game> = games
        .into_iter()
        .filter(|game| wanted.contains(&game.home_team.id) || wanted.contains(&game.away_team.id))
        .collect();

    info!(count = filtered.len(), "Filtered to games involving specified teams");
    filtered
}

/// Keeps games whose start time is strictly after `now`. A game whose start
/// time does not parse is dropped with a warning rather than failing the run.
pub fn upcoming(games: Vec<Game>, now: DateTime<Utc>) -> Vec<Game> {
    let mut upcoming_games = Vec::new();

    for game in games {
        match DateTime::parse_from_rfc3339(&game.start_time_utc) {
            Ok(start_time) => {
                if start_time.with_timezone(&Utc) > now {
                    upcoming_games.push(game);
                }
            }
            Err(e) => {
                warn!(game_id = game.id, error = %e, "Could not parse start time for game");
            }
        }
    }

    info!(count = upcoming_games.len(), "Filtered to upcoming games");
    upcoming_games
}
