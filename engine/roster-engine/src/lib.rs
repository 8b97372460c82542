//! # Roster Engine
//!
//! Squad and lineup construction for an FPL-style fantasy game.
//!
//! A [`SquadBuilder`] collects up to fifteen players under a salary cap, a
//! [`LineupComposer`] picks nine starters plus captaincy from that squad, and
//! [`RosterValidator`] decides whether either selection may be submitted.
//! Mutators never fail: anything a cap or membership rule forbids is ignored,
//! and the full set of rule violations is reported only at the submission
//! gate so the user can keep editing freely.

pub mod lineup;
pub mod rules;
pub mod squad;
pub mod types;
pub mod validator;


pub use lineup::{LineupComposer, LineupSelection};
pub use rules::RosterRules;
pub use squad::{SquadBuilder, SquadSelection};
pub use types::{Chip, Gameweek, SelectionStatus};
pub use validator::{RosterValidator, ValidationResult, Violation};

/// Re-export commonly used catalog types
pub use player_catalog::{Decimal, Player, PlayerCatalog, PlayerId, Position};

/// Players in a complete squad
pub const DEFAULT_SQUAD_SIZE: usize = 15;

/// Starters in a complete lineup
pub const DEFAULT_STARTER_COUNT: usize = 9;

/// Salary cap, in millions
pub const DEFAULT_BUDGET_CAP: Decimal = Decimal::ONE_HUNDRED;
