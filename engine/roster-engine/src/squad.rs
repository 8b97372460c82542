//! Squad selection under the salary cap

use crate::rules::RosterRules;
use crate::types::{Gameweek, SelectionStatus};
use crate::validator::{RosterValidator, ValidationResult};
use player_catalog::{Decimal, PlayerCatalog, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The set of players picked for one gameweek
///
/// Ids are kept in pick order for display. Order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SavedSquad")]
pub struct SquadSelection {
    gameweek: Gameweek,
    player_ids: Vec<PlayerId>,
}

/// Wire shape of a saved squad, read back through [`SquadSelection::from_ids`]
#[derive(Deserialize)]
struct SavedSquad {
    gameweek: Gameweek,
    player_ids: Vec<PlayerId>,
}

impl From<SavedSquad> for SquadSelection {
    fn from(saved: SavedSquad) -> Self {
        Self::from_ids(saved.gameweek, saved.player_ids)
    }
}

impl SquadSelection {
    pub fn new(gameweek: Gameweek) -> Self {
        Self { gameweek, player_ids: Vec::new() }
    }

    /// Rebuild a selection from ids held elsewhere (e.g. a saved squad)
    ///
    /// Repeated ids are dropped. No size cap is applied here; an oversized
    /// selection is reported by the validator instead.
    pub fn from_ids(gameweek: Gameweek, ids: impl IntoIterator<Item = PlayerId>) -> Self {
        let mut selection = Self::new(gameweek);
        for id in ids {
            if !selection.contains(id) {
                selection.player_ids.push(id);
            }
        }
        selection
    }

    pub fn gameweek(&self) -> Gameweek {
        self.gameweek
    }

    pub fn player_ids(&self) -> &[PlayerId] {
        &self.player_ids
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.player_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.player_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.player_ids.is_empty()
    }

    /// Summed price of the selection against the given catalog snapshot
    pub fn total_price(&self, catalog: &PlayerCatalog) -> Decimal {
        catalog.total_price(&self.player_ids)
    }
}

/// Builds a squad one toggle at a time
///
/// Removing a player is always allowed. Adding a player once the squad is
/// full is a no-op, so the caller never has to deselect before browsing.
/// Budget is not enforced while editing; it is reported by [`Self::validate`].
#[derive(Debug, Clone)]
pub struct SquadBuilder {
    selection: SquadSelection,
    rules: RosterRules,
    submitted: bool,
}

impl SquadBuilder {
    pub fn new(gameweek: Gameweek, rules: RosterRules) -> Self {
        Self::from_selection(SquadSelection::new(gameweek), rules)
    }

    /// Resume editing an existing selection
    pub fn from_selection(selection: SquadSelection, rules: RosterRules) -> Self {
        Self { selection, rules, submitted: false }
    }

    /// Add the player if absent, remove it if present
    ///
    /// Returns whether the selection changed. An add that would exceed the
    /// squad size leaves the selection untouched and returns `false`.
    pub fn toggle(&mut self, id: PlayerId) -> bool {
        if let Some(position) = self.selection.player_ids.iter().position(|&picked| picked == id) {
            self.selection.player_ids.remove(position);
            self.submitted = false;
            return true;
        }

        if self.is_full() {
            debug!("Squad full ({} players), ignoring pick of player {}", self.selection.len(), id);
            return false;
        }

        self.selection.player_ids.push(id);
        self.submitted = false;
        true
    }

    /// Move the selection to another gameweek
    pub fn set_gameweek(&mut self, gameweek: Gameweek) {
        if self.selection.gameweek != gameweek {
            self.selection.gameweek = gameweek;
            self.submitted = false;
        }
    }

    /// Summed price of the current picks, read from the live catalog
    pub fn budget_used(&self, catalog: &PlayerCatalog) -> Decimal {
        self.selection.total_price(catalog)
    }

    /// Cap minus current spend. Negative when over budget.
    pub fn budget_remaining(&self, catalog: &PlayerCatalog) -> Decimal {
        self.rules.budget_cap - self.budget_used(catalog)
    }

    /// Picked ids in pick order
    pub fn current_selection(&self) -> &[PlayerId] {
        self.selection.player_ids()
    }

    pub fn selection(&self) -> &SquadSelection {
        &self.selection
    }

    pub fn rules(&self) -> &RosterRules {
        &self.rules
    }

    pub fn gameweek(&self) -> Gameweek {
        self.selection.gameweek
    }

    pub fn is_selected(&self, id: PlayerId) -> bool {
        self.selection.contains(id)
    }

    pub fn is_full(&self) -> bool {
        self.selection.len() >= self.rules.squad_size
    }

    pub fn validate(&self, catalog: &PlayerCatalog) -> ValidationResult {
        RosterValidator::validate_squad(&self.selection, catalog, &self.rules)
    }

    pub fn status(&self, catalog: &PlayerCatalog) -> SelectionStatus {
        if self.submitted {
            SelectionStatus::Submitted
        } else if self.validate(catalog).is_valid() {
            SelectionStatus::Validated
        } else {
            SelectionStatus::Editing
        }
    }

    /// Record that the fantasy service accepted the current selection
    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }
}
