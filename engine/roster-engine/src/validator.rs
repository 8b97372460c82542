//! Submission-gate checks for squads and lineups
//!
//! Every check runs on every call and all failures are reported together, in
//! a fixed order, so one pass gives the user the complete list to fix. The
//! functions here are pure: same inputs, same result.

use crate::lineup::LineupSelection;
use crate::rules::RosterRules;
use crate::squad::SquadSelection;
use player_catalog::PlayerCatalog;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A violated roster rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Violation {
    /// Squad does not hold exactly the required number of players
    SizeViolation,
    /// Squad price is above the salary cap
    BudgetExceeded,
    /// Lineup does not hold exactly the required number of starters
    StarterCountViolation,
    MissingCaptain,
    MissingViceCaptain,
    CaptainNotStarter,
    ViceNotStarter,
    /// Captain and vice-captain are the same player
    CaptainViceConflict,
    /// A starter is not part of the squad the lineup was built from
    StarterNotInSquad,
}

impl Violation {
    /// Stable rule identifier
    pub fn code(self) -> &'static str {
        match self {
            Violation::SizeViolation => "SizeViolation",
            Violation::BudgetExceeded => "BudgetExceeded",
            Violation::StarterCountViolation => "StarterCountViolation",
            Violation::MissingCaptain => "MissingCaptain",
            Violation::MissingViceCaptain => "MissingViceCaptain",
            Violation::CaptainNotStarter => "CaptainNotStarter",
            Violation::ViceNotStarter => "ViceNotStarter",
            Violation::CaptainViceConflict => "CaptainViceConflict",
            Violation::StarterNotInSquad => "StarterNotInSquad",
        }
    }

    /// Feedback line for display
    pub fn describe(self, rules: &RosterRules) -> String {
        match self {
            Violation::SizeViolation => format!("Pick exactly {} players.", rules.squad_size),
            Violation::BudgetExceeded => format!("Squad costs more than {:.1}.", rules.budget_cap),
            Violation::StarterCountViolation => {
                format!("Pick exactly {} starters.", rules.starter_count)
            }
            Violation::MissingCaptain => "Set a captain.".to_string(),
            Violation::MissingViceCaptain => "Set a vice-captain.".to_string(),
            Violation::CaptainNotStarter => "Captain must be a starter.".to_string(),
            Violation::ViceNotStarter => "Vice-captain must be a starter.".to_string(),
            Violation::CaptainViceConflict => {
                "Captain and vice-captain must be different players.".to_string()
            }
            Violation::StarterNotInSquad => "Every starter must come from the squad.".to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of a validation pass: empty means the selection may be submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn has(&self, violation: Violation) -> bool {
        self.violations.contains(&violation)
    }

    fn check(&mut self, failed: bool, violation: Violation) {
        if failed {
            self.violations.push(violation);
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return f.write_str("valid");
        }
        let codes: Vec<&str> = self.violations.iter().map(|violation| violation.code()).collect();
        f.write_str(&codes.join(", "))
    }
}

/// Pure roster checks applied before anything is submitted
pub struct RosterValidator;

impl RosterValidator {
    /// Check squad size and salary cap against the catalog snapshot
    pub fn validate_squad(
        selection: &SquadSelection,
        catalog: &PlayerCatalog,
        rules: &RosterRules,
    ) -> ValidationResult {
        let distinct: HashSet<_> = selection.player_ids().iter().collect();
        let mut result = ValidationResult::default();
        result.check(
            distinct.len() != rules.squad_size || distinct.len() != selection.len(),
            Violation::SizeViolation,
        );
        result.check(selection.total_price(catalog) > rules.budget_cap, Violation::BudgetExceeded);
        result
    }

    /// Check starter count, captaincy and squad membership
    pub fn validate_lineup(
        lineup: &LineupSelection,
        squad: &SquadSelection,
        rules: &RosterRules,
    ) -> ValidationResult {
        let starters: HashSet<_> = lineup.starters.iter().copied().collect();
        let mut result = ValidationResult::default();

        result.check(
            starters.len() != rules.starter_count || starters.len() != lineup.starters.len(),
            Violation::StarterCountViolation,
        );
        result.check(lineup.captain.is_none(), Violation::MissingCaptain);
        result.check(lineup.vice_captain.is_none(), Violation::MissingViceCaptain);
        result.check(
            lineup.captain.is_some_and(|id| !starters.contains(&id)),
            Violation::CaptainNotStarter,
        );
        result.check(
            lineup.vice_captain.is_some_and(|id| !starters.contains(&id)),
            Violation::ViceNotStarter,
        );
        result.check(
            lineup.captain.is_some() && lineup.captain == lineup.vice_captain,
            Violation::CaptainViceConflict,
        );
        result.check(
            starters.iter().any(|&id| !squad.contains(id)),
            Violation::StarterNotInSquad,
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Gameweek;
    use player_catalog::{Decimal, Player, PlayerId, Position};
    use std::str::FromStr;

    fn gw() -> Gameweek {
        Gameweek::new(1).unwrap()
    }

    fn catalog_with_prices(prices: &[&str]) -> PlayerCatalog {
        PlayerCatalog::from_players(prices.iter().enumerate().map(|(index, price)| {
            let id = index as u64 + 1;
            let price = Decimal::from_str(price).unwrap();
            Player::new(id, format!("Player {id}"), "KC", Position::RB, price)
        }))
    }

    fn squad_of(count: u64) -> SquadSelection {
        SquadSelection::from_ids(gw(), (1..=count).map(PlayerId))
    }

    fn lineup(
        starters: impl IntoIterator<Item = u64>,
        captain: Option<u64>,
        vice: Option<u64>,
    ) -> LineupSelection {
        LineupSelection {
            gameweek: gw(),
            starters: starters.into_iter().map(PlayerId).collect(),
            captain: captain.map(PlayerId),
            vice_captain: vice.map(PlayerId),
            chip: None,
        }
    }

    #[test]
    fn test_squad_over_budget_only() {
        // 14 x 6.5 + 10.0 = 101.0
        let mut prices = vec!["6.5"; 14];
        prices.push("10.0");
        let catalog = catalog_with_prices(&prices);

        let result =
            RosterValidator::validate_squad(&squad_of(15), &catalog, &RosterRules::default());
        assert_eq!(result.violations(), &[Violation::BudgetExceeded]);
    }

    #[test]
    fn test_squad_short_under_budget() {
        let catalog = catalog_with_prices(&["5.0"; 15]);

        let result =
            RosterValidator::validate_squad(&squad_of(14), &catalog, &RosterRules::default());
        assert_eq!(result.violations(), &[Violation::SizeViolation]);
    }

    #[test]
    fn test_squad_reports_both_violations() {
        let catalog = catalog_with_prices(&["9.0"; 16]);

        let result =
            RosterValidator::validate_squad(&squad_of(16), &catalog, &RosterRules::default());
        assert_eq!(result.violations(), &[Violation::SizeViolation, Violation::BudgetExceeded]);
        assert_eq!(result.to_string(), "SizeViolation, BudgetExceeded");
    }

    #[test]
    fn test_squad_exactly_at_cap_passes() {
        let mut prices = vec!["6.5"; 14];
        prices.push("9.0");
        let catalog = catalog_with_prices(&prices);

        let result =
            RosterValidator::validate_squad(&squad_of(15), &catalog, &RosterRules::default());
        assert!(result.is_valid());
    }

    #[test]
    fn test_custom_cap() {
        let catalog = catalog_with_prices(&["6.0"; 15]);
        let rules = RosterRules::default().with_budget_cap(Decimal::from(80));

        let result = RosterValidator::validate_squad(&squad_of(15), &catalog, &rules);
        assert_eq!(result.violations(), &[Violation::BudgetExceeded]);
    }

    #[test]
    fn test_lineup_captain_vice_conflict() {
        let result = RosterValidator::validate_lineup(
            &lineup(1..=9, Some(7), Some(7)),
            &squad_of(15),
            &RosterRules::default(),
        );
        assert_eq!(result.violations(), &[Violation::CaptainViceConflict]);
    }

    #[test]
    fn test_lineup_short_without_captain() {
        let result = RosterValidator::validate_lineup(
            &lineup(1..=8, None, Some(2)),
            &squad_of(15),
            &RosterRules::default(),
        );
        assert_eq!(
            result.violations(),
            &[Violation::StarterCountViolation, Violation::MissingCaptain]
        );
    }

    #[test]
    fn test_lineup_empty_reports_everything_missing() {
        let result = RosterValidator::validate_lineup(
            &lineup(std::iter::empty(), None, None),
            &squad_of(15),
            &RosterRules::default(),
        );
        assert_eq!(
            result.violations(),
            &[
                Violation::StarterCountViolation,
                Violation::MissingCaptain,
                Violation::MissingViceCaptain
            ]
        );
    }

    #[test]
    fn test_lineup_captaincy_off_the_field() {
        let result = RosterValidator::validate_lineup(
            &lineup(1..=9, Some(12), Some(13)),
            &squad_of(15),
            &RosterRules::default(),
        );
        assert_eq!(result.violations(), &[Violation::CaptainNotStarter, Violation::ViceNotStarter]);
    }

    #[test]
    fn test_lineup_starter_outside_squad() {
        let result = RosterValidator::validate_lineup(
            &lineup([1, 2, 3, 4, 5, 6, 7, 8, 40], Some(1), Some(2)),
            &squad_of(15),
            &RosterRules::default(),
        );
        assert_eq!(result.violations(), &[Violation::StarterNotInSquad]);
    }

    #[test]
    fn test_lineup_repeated_starter_counts_once() {
        let result = RosterValidator::validate_lineup(
            &lineup([1, 1, 2, 3, 4, 5, 6, 7, 8], Some(1), Some(2)),
            &squad_of(15),
            &RosterRules::default(),
        );
        assert_eq!(result.violations(), &[Violation::StarterCountViolation]);
    }

    #[test]
    fn test_lineup_repeated_starter_is_never_a_full_lineup() {
        let result = RosterValidator::validate_lineup(
            &lineup([1, 1, 2, 3, 4, 5, 6, 7, 8, 9], Some(1), Some(2)),
            &squad_of(15),
            &RosterRules::default(),
        );
        assert_eq!(result.violations(), &[Violation::StarterCountViolation]);
    }

    #[test]
    fn test_valid_lineup() {
        let result = RosterValidator::validate_lineup(
            &lineup(3..=11, Some(3), Some(11)),
            &squad_of(15),
            &RosterRules::default(),
        );
        assert!(result.is_valid());
        assert_eq!(result.to_string(), "valid");
    }

    #[test]
    fn test_violation_codes_serialize_as_identifiers() {
        let result = RosterValidator::validate_lineup(
            &lineup(1..=9, Some(7), Some(7)),
            &squad_of(15),
            &RosterRules::default(),
        );
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"violations":["CaptainViceConflict"]}"#);
        assert_eq!(
            Violation::BudgetExceeded.describe(&RosterRules::default()),
            "Squad costs more than 100.0."
        );
    }
}
