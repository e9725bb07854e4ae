use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Team block as it appears in the NHL API schedule response. The localized
/// name maps are carried through to the task payload untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    #[serde(rename = "commonName", default)]
    pub common_name: HashMap<String, String>,
    #[serde(rename = "placeName", default)]
    pub place_name: HashMap<String, String>,
    #[serde(rename = "placeNameWithPreposition", default)]
    pub place_name_with_preposition: HashMap<String, String>,
    pub abbrev: String,
}

impl Team {
    /// Build a team block with the same value in every localized name map.
    pub fn with_default_names(id: i64, common: &str, place: &str, abbrev: &str) -> Self {
        let name_map = |value: &str| HashMap::from([("default".to_string(), value.to_string())]);
        Team {
            id,
            common_name: name_map(common),
            place_name: name_map(place),
            place_name_with_preposition: name_map(place),
            abbrev: abbrev.to_string(),
        }
    }
}

/// A single scheduled game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    #[serde(rename = "gameDate")]
    pub game_date: String,
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: String,
    #[serde(rename = "awayTeam")]
    pub away_team: Team,
    #[serde(rename = "homeTeam")]
    pub home_team: Team,
}

/// Schedule response: a list of week buckets, each holding a date and games.
#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    #[serde(rename = "gameWeek", default)]
    pub game_week: Vec<GameWeek>,
}

#[derive(Debug, Deserialize)]
pub struct GameWeek {
    pub date: String,
    #[serde(default)]
    pub games: Vec<Game>,
}
