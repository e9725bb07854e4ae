use serde::{Deserialize, Serialize};

use crate::model::schedule::Team;

/// Game information carried inside the task payload. The start time keeps its
/// original string form from the schedule response rather than being
/// re-formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePayload {
    pub id: String,
    #[serde(rename = "gameDate")]
    pub game_date: String,
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: String,
    #[serde(rename = "homeTeam")]
    pub home_team: Team,
    #[serde(rename = "awayTeam")]
    pub away_team: Team,
}

/// Body of a dispatch task, matching what the game tracker service consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPayload {
    pub game: GamePayload,
    #[serde(rename = "execution_end", skip_serializing_if = "Option::is_none")]
    pub execution_end: Option<String>,
    #[serde(rename = "ShouldNotify")]
    pub should_notify: bool,
}
