use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::info;

use crate::model::schedule::{Game, ScheduleResponse, Team};

/// Base URL for NHL API endpoints.
pub const NHL_API_BASE_URL: &str = "https://api-web.nhle.com/v1";

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to fetch schedule: {0}")]
    Request(#[source] ureq::Error),
    #[error("NHL API returned status: {0}")]
    Status(u16),
    #[error("failed to decode schedule response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Retrieves games for a specific date from the NHL API. The response groups
/// games into week buckets; they are flattened in order.
pub fn fetch_games_for_date(base_url: &str, date: &str) -> Result<Vec<Game>, ScheduleError> {
    let url = format!("{}/schedule/{}", base_url, date);
    info!(url = %url, "Fetching games from NHL API");

    let response = match ureq::get(&url).call() {
        Ok(response) => response,
        Err(ureq::Error::StatusCode(code)) => return Err(ScheduleError::Status(code)),
        Err(e) => return Err(ScheduleError::Request(e)),
    };

    let mut body = response.into_body();
    let body = body.read_to_string().map_err(ScheduleError::Request)?;
    let games = parse_schedule(&body)?;

    info!(count = games.len(), date = %date, "Found games for date");
    Ok(games)
}

/// Decodes a schedule response body and flattens the week buckets in order
/// (no network).
pub fn parse_schedule(body: &str) -> Result<Vec<Game>, ScheduleError> {
    let schedule: ScheduleResponse = serde_json::from_str(body)?;

    let mut games = Vec::new();
    for week in schedule.game_week {
        games.extend(week.games);
    }
    Ok(games)
}

/// Creates a game with predefined data for test runs. The shootout variant
/// selects the game id that replays a shootout finish.
pub fn create_test_game(shootout: bool, now: DateTime<Utc>) -> Game {
    let game_id = if shootout { 2024030412 } else { 2024030411 };

    Game {
        id: game_id,
        game_date: now.format("%Y-%m-%d").to_string(),
        start_time_utc: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        away_team: Team::with_default_names(25, "Stars", "Dallas", "DAL"),
        home_team: Team::with_default_names(1, "Bruins", "Boston", "BOS"),
    }
}
