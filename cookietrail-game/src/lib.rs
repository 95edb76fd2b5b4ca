//! Cookie Trailer Tycoon Engine
//!
//! Platform-agnostic core game logic for the Cookie Trailer Tycoon bakery
//! game. This crate provides the phase state machine, economy simulation, and
//! minigame sessions without UI or platform-specific dependencies; a frontend
//! renders the phase screens and drives the controller through its typed
//! operations.

pub mod config;
pub mod constants;
pub mod controller;
pub mod market;
pub mod minigame;
pub mod orders;
pub mod recipe;
pub mod state;
pub mod summary;

// Re-export commonly used types
pub use config::GameConfig;
pub use constants::{COUNTDOWN_CRITICAL_SECS, COUNTDOWN_WARNING_SECS, FEEDBACK_DELAY_MS};
pub use controller::{ControllerError, GameController};
pub use market::{Cart, CartLine, PriceBoard, calculate_cart_total, cost_of_one_cookie};
pub use minigame::{
    AnswerFeedback, CountdownUrgency, InputKey, MinigameKind, MinigameOutcome, MinigameResult,
    MinigameSession, MinigameSpec, Problem, type_answer,
};
pub use orders::{CustomerOrder, OrderBook, OrderList};
pub use recipe::{CookieRecipe, Ingredient, Pantry};
pub use state::{GamePhase, PlayerState};
pub use summary::{DaySummary, Ending, RunSummary};
