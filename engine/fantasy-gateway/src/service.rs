//! The operations the roster client consumes from the fantasy service

use crate::error::GatewayResult;
use crate::models::{Ack, LeagueId, LineupSubmission, SquadSubmission, Standings, UserId};
use player_catalog::Player;

/// Remote fantasy service as seen by the roster client
///
/// Implementations transmit exactly what they are given. Validation and
/// in-flight tracking belong to [`crate::SubmissionGateway`].
#[async_trait::async_trait]
pub trait FantasyService: Send + Sync {
    /// Current player list
    async fn fetch_players(&self) -> GatewayResult<Vec<Player>>;

    /// Persist a squad for a gameweek. The service may still refuse it,
    /// e.g. after the deadline.
    async fn submit_squad(&self, user: UserId, submission: &SquadSubmission) -> GatewayResult<Ack>;

    /// Persist a lineup for a gameweek
    async fn submit_lineup(&self, user: UserId, submission: &LineupSubmission)
        -> GatewayResult<Ack>;

    /// League table, best first
    async fn fetch_standings(&self, league: LeagueId) -> GatewayResult<Standings>;
}
