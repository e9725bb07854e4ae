use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

/// One franchise in the static team directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub code: &'static str,
    pub name: &'static str,
}

/// City code to team id pairs as used by the NHL API. Defined once at process
/// start; codes are stored uppercase and matched case-insensitively on input.
pub static TEAMS: &[Team] = &[
    Team { id: 24, code: "ANA", name: "Anaheim Ducks" },
    Team { id: 53, code: "ARI", name: "Arizona Coyotes" },
    Team { id: 1, code: "BOS", name: "Boston Bruins" },
    Team { id: 7, code: "BUF", name: "Buffalo Sabres" },
    Team { id: 12, code: "CAR", name: "Carolina Hurricanes" },
    Team { id: 29, code: "CBJ", name: "Columbus Blue Jackets" },
    Team { id: 20, code: "CGY", name: "Calgary Flames" },
    Team { id: 16, code: "CHI", name: "Chicago Blackhawks" },
    Team { id: 21, code: "COL", name: "Colorado Avalanche" },
    Team { id: 25, code: "DAL", name: "Dallas Stars" },
    Team { id: 17, code: "DET", name: "Detroit Red Wings" },
    Team { id: 22, code: "EDM", name: "Edmonton Oilers" },
    Team { id: 13, code: "FLA", name: "Florida Panthers" },
    Team { id: 26, code: "LAK", name: "Los Angeles Kings" },
    Team { id: 30, code: "MIN", name: "Minnesota Wild" },
    Team { id: 8, code: "MTL", name: "Montreal Canadiens" },
    Team { id: 6, code: "NJD", name: "New Jersey Devils" },
    Team { id: 18, code: "NSH", name: "Nashville Predators" },
    Team { id: 2, code: "NYI", name: "New York Islanders" },
    Team { id: 3, code: "NYR", name: "New York Rangers" },
    Team { id: 9, code: "OTT", name: "Ottawa Senators" },
    Team { id: 4, code: "PHI", name: "Philadelphia Flyers" },
    Team { id: 5, code: "PIT", name: "Pittsburgh Penguins" },
    Team { id: 55, code: "SEA", name: "Seattle Kraken" },
    Team { id: 28, code: "SJS", name: "San Jose Sharks" },
    Team { id: 19, code: "STL", name: "St. Louis Blues" },
    Team { id: 14, code: "TBL", name: "Tampa Bay Lightning" },
    Team { id: 10, code: "TOR", name: "Toronto Maple Leafs" },
    Team { id: 23, code: "VAN", name: "Vancouver Canucks" },
    Team { id: 54, code: "VGK", name: "Vegas Golden Knights" },
    Team { id: 52, code: "WPG", name: "Winnipeg Jets" },
    Team { id: 15, code: "WSH", name: "Washington Capitals" },
];

static CODE_TO_ID: LazyLock<HashMap<&'static str, i64>> =
    LazyLock::new(|| TEAMS.iter().map(|t| (t.code, t.id)).collect());

static ID_TO_CODE: LazyLock<HashMap<i64, &'static str>> =
    LazyLock::new(|| TEAMS.iter().map(|t| (t.id, t.code)).collect());

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("invalid team identifier: {0} (use a city code like CHI or a numeric id like 16)")]
    UnknownIdentifier(String),
}

/// Converts a team identifier (city code or numeric id) to a team id.
pub fn resolve(identifier: &str) -> Result<i64, TeamError> {
    let identifier = identifier.trim().to_uppercase();

    if let Some(&team_id) = CODE_TO_ID.get(identifier.as_str()) {
        return Ok(team_id);
    }

    identifier
        .parse::<i64>()
        .map_err(|_| TeamError::UnknownIdentifier(identifier))
}

/// Resolves a batch of identifiers, failing fast on the first invalid token.
/// Mixed formats are fine: `"CHI,25,BOS"` split on commas resolves cleanly.
pub fn resolve_all<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> Result<Vec<i64>, TeamError> {
    identifiers.into_iter().map(resolve).collect()
}

/// Reverse lookup from team id to city code, for display.
pub fn code_for(team_id: i64) -> Option<&'static str> {
    ID_TO_CODE.get(&team_id).copied()
}
