//! Wire types exchanged with the fantasy service

use chrono::{DateTime, Duration, Utc};
use player_catalog::PlayerId;
use roster_engine::{Chip, Gameweek, LineupSelection, SquadSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Account id issued by `/register`, sent back in the `X-User` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(pub u64);

/// A team's membership of a league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `POST /squad/set`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadSubmission {
    pub gameweek: Gameweek,
    pub player_ids: Vec<PlayerId>,
}

impl From<&SquadSelection> for SquadSubmission {
    fn from(selection: &SquadSelection) -> Self {
        Self { gameweek: selection.gameweek(), player_ids: selection.player_ids().to_vec() }
    }
}

/// Body of `POST /lineup/set`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSubmission {
    pub gameweek: Gameweek,
    pub starters: Vec<PlayerId>,
    pub captain_id: PlayerId,
    pub vice_captain_id: PlayerId,
    pub chip: Option<Chip>,
}

impl LineupSubmission {
    /// `None` until both captain and vice-captain are set
    pub fn from_lineup(lineup: &LineupSelection) -> Option<Self> {
        Some(Self {
            gameweek: lineup.gameweek,
            starters: lineup.starters.clone(),
            captain_id: lineup.captain?,
            vice_captain_id: lineup.vice_captain?,
            chip: lineup.chip,
        })
    }
}

/// Acknowledgement of an accepted request
#[derive(Debug, Clone, PartialEq)]
pub struct Ack {
    pub status: u16,
    /// Response body when the service returned JSON
    pub body: Option<serde_json::Value>,
}

/// One row of a league table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub entry_id: EntryId,
    pub team_name: String,
    pub points: f64,
}

/// League table in the order the service ranked it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Standings(pub Vec<StandingsEntry>);

impl Standings {
    /// Rows paired with their 1-based rank
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &StandingsEntry)> {
        self.0.iter().enumerate().map(|(index, entry)| (index + 1, entry))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegisteredUser {
    pub id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateLeagueRequest<'a> {
    pub name: &'a str,
    pub team_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueCreated {
    pub league_id: LeagueId,
    pub entry_id: EntryId,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct JoinLeagueRequest<'a> {
    pub league_id: LeagueId,
    pub team_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueJoined {
    pub entry_id: EntryId,
}

/// Body of `POST /gameweeks/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameweekSpec {
    pub id: Gameweek,
    pub name: String,
    pub deadline_at: DateTime<Utc>,
}

impl GameweekSpec {
    /// Named `GW<n>` with a deadline one hour from now
    pub fn new(id: Gameweek) -> Self {
        Self::with_deadline(id, Utc::now() + Duration::hours(1))
    }

    pub fn with_deadline(id: Gameweek, deadline_at: DateTime<Utc>) -> Self {
        Self { id, name: format!("GW{}", id.get()), deadline_at }
    }
}

/// Raw stat line for one player, e.g. `{"player_id": 1, "pass_yd": 250}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub stats: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct StatsUpload<'a> {
    pub gameweek: Gameweek,
    pub stats: &'a [PlayerStatLine],
}

/// Result of `POST /compute/{gw}`; points are keyed as the service chooses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeReport {
    #[serde(default)]
    pub gw_points: serde_json::Value,
}
