//! Starting lineup, captaincy and chip for a saved squad

use crate::rules::RosterRules;
use crate::squad::SquadSelection;
use crate::types::{Chip, Gameweek, SelectionStatus};
use crate::validator::{RosterValidator, ValidationResult};
use player_catalog::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Starters, captaincy and chip chosen for one gameweek
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSelection {
    pub gameweek: Gameweek,
    pub starters: Vec<PlayerId>,
    pub captain: Option<PlayerId>,
    pub vice_captain: Option<PlayerId>,
    pub chip: Option<Chip>,
}

impl LineupSelection {
    pub fn new(gameweek: Gameweek) -> Self {
        Self { gameweek, starters: Vec::new(), captain: None, vice_captain: None, chip: None }
    }

    pub fn is_starter(&self, id: PlayerId) -> bool {
        self.starters.contains(&id)
    }
}

/// Composes a lineup out of a saved squad
///
/// Every mutator is a silent no-op when its precondition fails: starters must
/// come from the squad and stop at the starter count, and captain or vice
/// must currently be starting. Captain and vice are set independently; a
/// clash between them is reported by [`Self::validate`], not prevented here.
#[derive(Debug, Clone)]
pub struct LineupComposer {
    squad: SquadSelection,
    lineup: LineupSelection,
    rules: RosterRules,
    submitted: bool,
}

impl LineupComposer {
    /// Start an empty lineup for the squad's gameweek
    pub fn from_squad(squad: SquadSelection, rules: RosterRules) -> Self {
        let lineup = LineupSelection::new(squad.gameweek());
        Self { squad, lineup, rules, submitted: false }
    }

    /// Resume editing a lineup against its squad
    ///
    /// Repeated starters are dropped. Nothing else is corrected; the
    /// validator reports whatever rules the restored lineup breaks.
    pub fn with_lineup(
        squad: SquadSelection,
        mut lineup: LineupSelection,
        rules: RosterRules,
    ) -> Self {
        let mut seen = HashSet::new();
        lineup.starters.retain(|&id| seen.insert(id));
        Self { squad, lineup, rules, submitted: false }
    }

    /// Returns whether the starter set changed
    pub fn set_starter(&mut self, id: PlayerId) -> bool {
        if self.lineup.is_starter(id) {
            return false;
        }

        if !self.squad.contains(id) {
            debug!("Player {} is not in the squad, ignoring start", id);
            return false;
        }

        if self.lineup.starters.len() >= self.rules.starter_count {
            debug!(
                "Starter limit ({}) reached, ignoring start of player {}",
                self.rules.starter_count, id
            );
            return false;
        }

        self.lineup.starters.push(id);
        self.submitted = false;
        true
    }

    /// Bench a starter. Captaincy held by the player is left for the validator.
    pub fn unset_starter(&mut self, id: PlayerId) -> bool {
        let Some(position) = self.lineup.starters.iter().position(|&starter| starter == id) else {
            return false;
        };

        self.lineup.starters.remove(position);
        self.submitted = false;
        true
    }

    pub fn toggle_starter(&mut self, id: PlayerId) -> bool {
        if self.lineup.is_starter(id) {
            self.unset_starter(id)
        } else {
            self.set_starter(id)
        }
    }

    pub fn set_captain(&mut self, id: PlayerId) -> bool {
        if !self.lineup.is_starter(id) {
            debug!("Player {} is not starting, ignoring captaincy", id);
            return false;
        }
        Self::assign(&mut self.lineup.captain, id, &mut self.submitted)
    }

    pub fn set_vice_captain(&mut self, id: PlayerId) -> bool {
        if !self.lineup.is_starter(id) {
            debug!("Player {} is not starting, ignoring vice-captaincy", id);
            return false;
        }
        Self::assign(&mut self.lineup.vice_captain, id, &mut self.submitted)
    }

    /// Chip legality beyond its kind (e.g. already played) is decided remotely
    pub fn set_chip(&mut self, chip: Option<Chip>) -> bool {
        if self.lineup.chip == chip {
            return false;
        }
        self.lineup.chip = chip;
        self.submitted = false;
        true
    }

    fn assign(slot: &mut Option<PlayerId>, id: PlayerId, submitted: &mut bool) -> bool {
        if *slot == Some(id) {
            return false;
        }
        *slot = Some(id);
        *submitted = false;
        true
    }

    pub fn starters(&self) -> &[PlayerId] {
        &self.lineup.starters
    }

    /// Squad players not currently starting, in squad order
    pub fn bench(&self) -> Vec<PlayerId> {
        self.squad.player_ids().iter().copied().filter(|&id| !self.lineup.is_starter(id)).collect()
    }

    pub fn captain(&self) -> Option<PlayerId> {
        self.lineup.captain
    }

    pub fn vice_captain(&self) -> Option<PlayerId> {
        self.lineup.vice_captain
    }

    pub fn chip(&self) -> Option<Chip> {
        self.lineup.chip
    }

    pub fn lineup(&self) -> &LineupSelection {
        &self.lineup
    }

    pub fn squad(&self) -> &SquadSelection {
        &self.squad
    }

    pub fn rules(&self) -> &RosterRules {
        &self.rules
    }

    pub fn gameweek(&self) -> Gameweek {
        self.lineup.gameweek
    }

    pub fn validate(&self) -> ValidationResult {
        RosterValidator::validate_lineup(&self.lineup, &self.squad, &self.rules)
    }

    pub fn status(&self) -> SelectionStatus {
        if self.submitted {
            SelectionStatus::Submitted
        } else if self.validate().is_valid() {
            SelectionStatus::Validated
        } else {
            SelectionStatus::Editing
        }
    }

    /// Record that the fantasy service accepted the current lineup
    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }
}
