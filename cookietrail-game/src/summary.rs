//! Day ledger records and end-of-run summaries.
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    /// Funds reached the win threshold.
    Victory,
    /// Funds fell to the bankruptcy threshold with no way to keep baking.
    Bankrupt,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory => write!(f, "victory"),
            Self::Bankrupt => write!(f, "bankrupt"),
        }
    }
}

/// Closed-out accounting record for one completed day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: u32,
    pub demand: u32,
    pub cookies_baked: u32,
    pub revenue_cents: i64,
    pub tips_cents: i64,
    pub expenses_cents: i64,
    pub dishes_cleaned: u32,
    pub dish_penalty_cents: i64,
    pub reputation_after: f32,
    pub funds_after_cents: i64,
}

impl DaySummary {
    /// Net money movement for the day.
    #[must_use]
    pub const fn net_cents(&self) -> i64 {
        self.revenue_cents + self.tips_cents - self.expenses_cents - self.dish_penalty_cents
    }
}

/// Summary of a whole run for the victory/defeat screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ending: Ending,
    pub username: String,
    pub days_played: u32,
    pub final_funds_cents: i64,
    pub reputation: f32,
    pub total_cookies_sold: u32,
}

impl RunSummary {
    /// Build the end-screen summary from final player state.
    #[must_use]
    pub fn from_state(state: &crate::state::PlayerState, ending: Ending) -> Self {
        Self {
            ending,
            username: state.username.clone().unwrap_or_default(),
            days_played: state.ledger.len() as u32,
            final_funds_cents: state.funds_cents,
            reputation: state.reputation,
            total_cookies_sold: state.total_cookies_sold(),
        }
    }
}
