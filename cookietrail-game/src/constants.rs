//! Centralized balance and tuning constants for Cookie Trailer Tycoon logic.
//!
//! These values define the deterministic math for the bakery simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through scattered
//! magic numbers.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_LOGIN_OK: &str = "log.login.ok";
pub(crate) const LOG_ORDERS_ACCEPTED: &str = "log.orders.accepted";
pub(crate) const LOG_PURCHASE_OK: &str = "log.shop.purchase";
pub(crate) const LOG_PURCHASE_INSUFFICIENT_FUNDS: &str = "log.shop.insufficient-funds";
pub(crate) const LOG_CANNOT_BAKE: &str = "log.shop.cannot-bake";
pub(crate) const LOG_BAKING_DONE: &str = "log.baking.done";
pub(crate) const LOG_BAKING_SKIPPED: &str = "log.baking.skipped";
pub(crate) const LOG_CLEANING_PERFECT: &str = "log.cleaning.perfect";
pub(crate) const LOG_CLEANING_PENALTY: &str = "log.cleaning.penalty";
pub(crate) const LOG_CLEANING_SKIPPED: &str = "log.cleaning.skipped";
pub(crate) const LOG_DAY_COMPLETE: &str = "log.day.complete";
pub(crate) const LOG_VICTORY: &str = "log.game.victory";
pub(crate) const LOG_BANKRUPT: &str = "log.game.bankrupt";

// Economy tuning -----------------------------------------------------------
/// Charge per dish left dirty at the end of the cleaning minigame.
pub(crate) const DIRTY_DISH_PENALTY_CENTS: i64 = 1_000;
/// Tip rate (percent of cookie price) when the full day demand is met.
pub(crate) const TIP_RATE_PCT: i64 = 10;

// Reputation tuning --------------------------------------------------------
pub(crate) const REPUTATION_START: f32 = 1.0;
pub(crate) const REPUTATION_CLEAN_BONUS: f32 = 0.05;
pub(crate) const REPUTATION_DIRTY_PENALTY: f32 = 0.10;
pub(crate) const REPUTATION_MIN: f32 = 0.5;
pub(crate) const REPUTATION_MAX: f32 = 2.0;

// Demand tuning ------------------------------------------------------------
pub(crate) const DEMAND_MIN_CUSTOMERS: u32 = 3;
pub(crate) const DEMAND_MAX_CUSTOMERS: u32 = 5;
pub(crate) const DEMAND_MIN_PER_CUSTOMER: u32 = 1;
pub(crate) const DEMAND_MAX_PER_CUSTOMER: u32 = 4;

// Minigame tuning ----------------------------------------------------------
/// Factor range for multiplication problems and the divisor/quotient pair.
pub(crate) const PROBLEM_FACTOR_MIN: u32 = 1;
pub(crate) const PROBLEM_FACTOR_MAX: u32 = 12;
/// Divisors start at 2 so division problems are never the identity.
pub(crate) const PROBLEM_DIVISOR_MIN: u32 = 2;
/// Longest answer the input buffer will accept.
pub(crate) const ANSWER_BUFFER_MAX_LEN: usize = 6;
/// Countdown turns to the warning color at or below this many seconds.
pub const COUNTDOWN_WARNING_SECS: u32 = 30;
/// Countdown turns to the critical color at or below this many seconds.
pub const COUNTDOWN_CRITICAL_SECS: u32 = 10;
/// How long frontends should display answer feedback before the next problem.
pub const FEEDBACK_DELAY_MS: u32 = 650;

#[cfg(test)]
pub(crate) const FLOAT_EPSILON: f32 = 1e-6;
