use chrono::{TimeZone, Utc};

use nhl_game_scheduler::filter;
use nhl_game_scheduler::model::schedule::{Game, Team};

fn game(id: i64, away: (i64, &str), home: (i64, &str), start: &str) -> Game {
    Game {
        id,
        game_date: "2025-01-15".to_string(),
        start_time_utc: start.to_string(),
        away_team: Team::with_default_names(away.0, away.1, away.1, away.1),
        home_team: Team::with_default_names(home.0, home.1, home.1, home.1),
    }
}

fn sample_games() -> Vec<Game> {
    vec![
        game(1, (55, "SEA"), (26, "LAK"), "2025-01-16T00:00:00Z"),
        game(2, (25, "DAL"), (1, "BOS"), "2025-01-16T02:30:00Z"),
        game(3, (16, "CHI"), (3, "NYR"), "2025-01-16T03:00:00Z"),
    ]
}

#[test]
fn by_teams_with_empty_set_returns_input_unchanged() {
    let games = sample_games();
    let filtered = filter::by_teams(games, &[]);
    let ids: Vec<i64> = filtered.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn by_teams_matches_home_or_away_membership() {
    // 26 is LAK's home slot in game 1; 25 is DAL's away slot in game 2
    let filtered = filter::by_teams(sample_games(), &[26, 25]);
    let ids: Vec<i64> = filtered.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn by_teams_is_idempotent() {
    let once = filter::by_teams(sample_games(), &[16]);
    let twice = filter::by_teams(once.clone(), &[16]);
    let once_ids: Vec<i64> = once.iter().map(|g| g.id).collect();
    let twice_ids: Vec<i64> = twice.iter().map(|g| g.id).collect();
    assert_eq!(once_ids, twice_ids);
}

#[test]
fn by_teams_preserves_input_order() {
    let filtered = filter::by_teams(sample_games(), &[16, 55]);
    let ids: Vec<i64> = filtered.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn upcoming_keeps_only_games_strictly_after_now() {
    let now = Utc.with_ymd_and_hms(2025, 1, 16, 2, 30, 0).unwrap();
    let filtered = filter::upcoming(sample_games(), now);
    // Game 1 already started, game 2 starts exactly at `now`: both excluded
    let ids: Vec<i64> = filtered.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![3]);
}

#[test]
fn upcoming_drops_games_with_malformed_start_times() {
    let games = vec![
        game(1, (55, "SEA"), (26, "LAK"), "not-a-timestamp"),
        game(2, (25, "DAL"), (1, "BOS"), "2025-01-16T02:30:00Z"),
    ];
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
    let filtered = filter::upcoming(games, now);
    let ids: Vec<i64> = filtered.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn upcoming_of_empty_is_empty() {
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
    assert!(filter::upcoming(Vec::new(), now).is_empty());
}
