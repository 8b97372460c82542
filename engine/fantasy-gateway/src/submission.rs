//! Validated, one-at-a-time submission of squads and lineups

use crate::error::{GatewayError, GatewayResult};
use crate::models::{Ack, LeagueId, LineupSubmission, SquadSubmission, Standings, UserId};
use crate::service::FantasyService;
use parking_lot::Mutex;
use player_catalog::PlayerCatalog;
use roster_engine::{Gameweek, LineupComposer, SquadBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Which selection a submission carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionKind {
    Squad,
    Lineup,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Squad => f.write_str("Squad"),
            SelectionKind::Lineup => f.write_str("Lineup"),
        }
    }
}

type InFlightKey = (SelectionKind, Gameweek);

/// The only path by which selections reach the fantasy service
///
/// A selection is sent only if it passes the roster checks and no earlier
/// submission of the same selection is outstanding. Success marks the
/// builder or composer submitted; any failure leaves it untouched so the
/// user can correct and resend. Nothing is retried automatically.
pub struct SubmissionGateway {
    service: Arc<dyn FantasyService>,
    in_flight: Mutex<HashSet<InFlightKey>>,
}

impl SubmissionGateway {
    pub fn new(service: Arc<dyn FantasyService>) -> Self {
        Self { service, in_flight: Mutex::new(HashSet::new()) }
    }

    /// Fetch a fresh player snapshot
    pub async fn refresh_catalog(&self) -> GatewayResult<PlayerCatalog> {
        let players = self.service.fetch_players().await?;
        Ok(PlayerCatalog::from_players(players))
    }

    pub async fn submit_squad(
        &self,
        user: UserId,
        squad: &mut SquadBuilder,
        catalog: &PlayerCatalog,
    ) -> GatewayResult<Ack> {
        let gameweek = squad.gameweek();
        let result = squad.validate(catalog);
        if !result.is_valid() {
            return Err(GatewayError::Validation {
                selection: SelectionKind::Squad,
                gameweek,
                result,
            });
        }

        let _guard = self.claim(SelectionKind::Squad, gameweek)?;
        let submission = SquadSubmission::from(squad.selection());
        info!("Submitting squad of {} players for {}", submission.player_ids.len(), gameweek);

        match self.service.submit_squad(user, &submission).await {
            Ok(ack) => {
                squad.mark_submitted();
                info!("Squad for {} accepted", gameweek);
                Ok(ack)
            }
            Err(e) => {
                warn!("Squad submission for {} failed: {}", gameweek, e);
                Err(e)
            }
        }
    }

    pub async fn submit_lineup(
        &self,
        user: UserId,
        lineup: &mut LineupComposer,
    ) -> GatewayResult<Ack> {
        let gameweek = lineup.gameweek();
        let result = lineup.validate();
        let submission = match LineupSubmission::from_lineup(lineup.lineup()) {
            Some(submission) if result.is_valid() => submission,
            _ => {
                return Err(GatewayError::Validation {
                    selection: SelectionKind::Lineup,
                    gameweek,
                    result,
                })
            }
        };

        let _guard = self.claim(SelectionKind::Lineup, gameweek)?;
        info!(
            "Submitting lineup for {} (captain {}, vice {})",
            gameweek, submission.captain_id, submission.vice_captain_id
        );

        match self.service.submit_lineup(user, &submission).await {
            Ok(ack) => {
                lineup.mark_submitted();
                info!("Lineup for {} accepted", gameweek);
                Ok(ack)
            }
            Err(e) => {
                warn!("Lineup submission for {} failed: {}", gameweek, e);
                Err(e)
            }
        }
    }

    pub async fn standings(&self, league: LeagueId) -> GatewayResult<Standings> {
        self.service.fetch_standings(league).await
    }

    pub fn is_in_flight(&self, selection: SelectionKind, gameweek: Gameweek) -> bool {
        self.in_flight.lock().contains(&(selection, gameweek))
    }

    fn claim(
        &self,
        selection: SelectionKind,
        gameweek: Gameweek,
    ) -> GatewayResult<InFlightGuard<'_>> {
        let key = (selection, gameweek);
        if !self.in_flight.lock().insert(key) {
            return Err(GatewayError::SubmissionInFlight { selection, gameweek });
        }
        Ok(InFlightGuard { in_flight: &self.in_flight, key })
    }
}

/// Releases an in-flight claim when the submission finishes, however it ends
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<InFlightKey>>,
    key: InFlightKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.key);
    }
}
