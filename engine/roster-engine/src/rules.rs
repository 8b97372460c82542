//! Roster size and budget rules

use crate::{DEFAULT_BUDGET_CAP, DEFAULT_SQUAD_SIZE, DEFAULT_STARTER_COUNT};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Limits applied by the builder, the composer and the validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRules {
    /// Exact squad size required for submission, and the soft cap while editing
    pub squad_size: usize,

    /// Exact starter count required for submission, and the soft cap while editing
    pub starter_count: usize,

    /// Maximum summed squad price accepted at submission
    pub budget_cap: Decimal,
}

impl Default for RosterRules {
    fn default() -> Self {
        Self {
            squad_size: DEFAULT_SQUAD_SIZE,
            starter_count: DEFAULT_STARTER_COUNT,
            budget_cap: DEFAULT_BUDGET_CAP,
        }
    }
}

impl RosterRules {
    pub fn with_budget_cap(mut self, budget_cap: Decimal) -> Self {
        self.budget_cap = budget_cap;
        self
    }
}
