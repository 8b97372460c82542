//! Roster plan files
//!
//! A plan lists the picks a user would make by hand. Replaying it through the
//! builder and composer applies the same caps and membership rules as
//! interactive editing, so a plan can never smuggle in an oversized squad.

use anyhow::Context;
use player_catalog::PlayerId;
use roster_engine::{Chip, Gameweek, LineupComposer, RosterRules, SquadBuilder};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct RosterPlan {
    pub gameweek: Gameweek,
    pub squad: Vec<PlayerId>,
    #[serde(default)]
    pub starters: Vec<PlayerId>,
    pub captain: Option<PlayerId>,
    pub vice_captain: Option<PlayerId>,
    pub chip: Option<Chip>,
}

impl RosterPlan {
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read plan {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Malformed plan {}", path.display()))
    }

    /// Toggle every squad pick in order
    pub fn build_squad(&self, rules: &RosterRules) -> SquadBuilder {
        let mut squad = SquadBuilder::new(self.gameweek, rules.clone());
        for &id in &self.squad {
            if !squad.is_selected(id) {
                squad.toggle(id);
            }
        }
        squad
    }

    /// Start every listed starter, then hand out captaincy and the chip
    pub fn compose_lineup(&self, squad: &SquadBuilder) -> LineupComposer {
        let mut lineup = LineupComposer::from_squad(squad.selection().clone(), squad.rules().clone());
        for &id in &self.starters {
            lineup.set_starter(id);
        }
        if let Some(captain) = self.captain {
            lineup.set_captain(captain);
        }
        if let Some(vice_captain) = self.vice_captain {
            lineup.set_vice_captain(vice_captain);
        }
        lineup.set_chip(self.chip);
        lineup
    }

    /// Whether the plan goes beyond the squad
    pub fn has_lineup(&self) -> bool {
        !self.starters.is_empty() || self.captain.is_some() || self.vice_captain.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_engine::Violation;

    fn plan(json: &str) -> RosterPlan {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_repeated_picks_are_not_toggled_off() {
        let plan = plan(r#"{"gameweek": 1, "squad": [1, 2, 2, 3]}"#);
        let squad = plan.build_squad(&RosterRules::default());

        assert_eq!(squad.current_selection(), &[PlayerId(1), PlayerId(2), PlayerId(3)]);
        assert!(!plan.has_lineup());
    }

    #[test]
    fn test_extra_picks_hit_the_soft_cap() {
        let ids: Vec<u64> = (1..=18).collect();
        let plan = plan(&format!(r#"{{"gameweek": 2, "squad": {ids:?}}}"#));
        let squad = plan.build_squad(&RosterRules::default());

        assert_eq!(squad.current_selection().len(), 15);
        assert!(!squad.is_selected(PlayerId(16)));
    }

    #[test]
    fn test_lineup_replay_skips_non_squad_starters() {
        let plan = plan(
            r#"{
                "gameweek": 3,
                "squad": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
                "starters": [1, 2, 3, 4, 5, 6, 7, 8, 99],
                "captain": 99,
                "vice_captain": 2,
                "chip": "TC"
            }"#,
        );
        let squad = plan.build_squad(&RosterRules::default());
        let lineup = plan.compose_lineup(&squad);

        assert_eq!(lineup.starters().len(), 8);
        assert_eq!(lineup.captain(), None);
        assert_eq!(lineup.chip(), Some(Chip::TripleCaptain));
        assert_eq!(
            lineup.validate().violations(),
            &[Violation::StarterCountViolation, Violation::MissingCaptain]
        );
    }
}
