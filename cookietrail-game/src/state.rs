//! Game phases and the mutable player record.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::GameConfig;
use crate::constants::REPUTATION_START;
use crate::orders::OrderBook;
use crate::recipe::{CookieRecipe, Pantry};
use crate::summary::DaySummary;

/// One discrete screen of the game loop.
///
/// Serialized names are stable; any persisted reference uses the snake_case
/// string, never a numeric discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Login,
    HowToPlay,
    Order,
    Shopping,
    RecipeBook,
    Baking,
    Cleaning,
    DaySummary,
    GameOver,
}

impl GamePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::HowToPlay => "how_to_play",
            Self::Order => "order",
            Self::Shopping => "shopping",
            Self::RecipeBook => "recipe_book",
            Self::Baking => "baking",
            Self::Cleaning => "cleaning",
            Self::DaySummary => "day_summary",
            Self::GameOver => "game_over",
        }
    }

    /// Terminal phases accept no further operations.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GamePhase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "how_to_play" => Ok(Self::HowToPlay),
            "order" => Ok(Self::Order),
            "shopping" => Ok(Self::Shopping),
            "recipe_book" => Ok(Self::RecipeBook),
            "baking" => Ok(Self::Baking),
            "cleaning" => Ok(Self::Cleaning),
            "day_summary" => Ok(Self::DaySummary),
            "game_over" => Ok(Self::GameOver),
            _ => Err(()),
        }
    }
}

/// Mutable economic state for one play-through, owned by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Set once at login, immutable afterwards.
    pub username: Option<String>,
    /// Signed: negative funds represent debt.
    pub funds_cents: i64,
    pub pantry: Pantry,
    pub recipe: CookieRecipe,
    /// 1-based day counter, incremented once per completed day.
    pub current_day: u32,
    /// Dishes produced by baking, consumed as the cleaning target.
    pub dishes_to_clean: u32,
    /// Demand multiplier adjusted by cleaning performance.
    pub reputation: f32,
    /// Total cookies customers ordered for the active day.
    pub current_day_demand: u32,
    /// Accepted customer orders for the active day.
    pub orders: OrderBook,
    /// Stable log keys for the frontend to localize and display.
    pub logs: Vec<String>,
    /// Closed-out day records, one per completed day.
    pub ledger: Vec<DaySummary>,
}

impl PlayerState {
    /// Fresh state with defaults drawn from the config snapshot.
    #[must_use]
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            username: None,
            funds_cents: cfg.starting_funds_cents,
            pantry: Pantry::default(),
            recipe: CookieRecipe::default(),
            current_day: 1,
            dishes_to_clean: 0,
            reputation: REPUTATION_START,
            current_day_demand: 0,
            orders: OrderBook::default(),
            logs: Vec::new(),
            ledger: Vec::new(),
        }
    }

    /// Reinitialize in place for a new play-through.
    pub fn reset(&mut self, cfg: &GameConfig) {
        *self = Self::new(cfg);
    }

    pub(crate) fn push_log(&mut self, key: &str) {
        self.logs.push(key.to_string());
    }

    /// Cookies sold across every completed day.
    #[must_use]
    pub fn total_cookies_sold(&self) -> u32 {
        self.ledger.iter().map(|day| day.cookies_baked).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLOAT_EPSILON;

    #[test]
    fn phase_round_trips_through_str() {
        let phases = [
            GamePhase::Login,
            GamePhase::HowToPlay,
            GamePhase::Order,
            GamePhase::Shopping,
            GamePhase::RecipeBook,
            GamePhase::Baking,
            GamePhase::Cleaning,
            GamePhase::DaySummary,
            GamePhase::GameOver,
        ];
        for phase in phases {
            assert_eq!(phase.as_str().parse::<GamePhase>(), Ok(phase));
        }
        assert!("victory_lap".parse::<GamePhase>().is_err());
    }

    #[test]
    fn phase_serde_names_are_stable() {
        let json = serde_json::to_string(&GamePhase::HowToPlay).unwrap();
        assert_eq!(json, "\"how_to_play\"");
        let back: GamePhase = serde_json::from_str("\"day_summary\"").unwrap();
        assert_eq!(back, GamePhase::DaySummary);
    }

    #[test]
    fn only_game_over_is_terminal() {
        assert!(GamePhase::GameOver.is_terminal());
        assert!(!GamePhase::DaySummary.is_terminal());
        assert!(!GamePhase::Login.is_terminal());
    }

    #[test]
    fn new_state_takes_config_defaults() {
        let cfg = GameConfig::default();
        let state = PlayerState::new(&cfg);
        assert_eq!(state.funds_cents, 50_000);
        assert_eq!(state.current_day, 1);
        assert!((state.reputation - 1.0).abs() < FLOAT_EPSILON);
        assert!(state.pantry.is_empty());
        assert!(state.username.is_none());
    }

    #[test]
    fn reset_reinitializes_in_place() {
        let cfg = GameConfig::default();
        let mut state = PlayerState::new(&cfg);
        state.username = Some("Tester".to_string());
        state.funds_cents = -5;
        state.current_day = 9;
        state.reset(&cfg);
        assert_eq!(state, PlayerState::new(&cfg));
    }
}
