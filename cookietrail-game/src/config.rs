//! Game configuration snapshot and the key=value tunables format.
//!
//! The configuration file is a plain text format: one `KEY = value` pair per
//! line, `#` starts a comment line, blank lines are ignored, whitespace around
//! `=` is trimmed. Unknown keys and unparsable values are skipped without
//! surfacing an error; every field has a hard-coded default.
//!
//! Monetary values are written in dollars in the file but stored as cents to
//! avoid floating-point money.

use serde::{Deserialize, Serialize};

/// Immutable snapshot of all numeric tunables.
///
/// Constructed once at startup and injected into the controller; never
/// mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Funds the player starts a run with.
    pub starting_funds_cents: i64,
    /// Reaching this much money wins the run.
    pub win_threshold_cents: i64,
    /// Falling to (or below) this much money triggers the bankruptcy check.
    pub bankruptcy_threshold_cents: i64,
    /// Lower bound of the daily ingredient price roll.
    pub ingredient_price_min_cents: i64,
    /// Upper bound of the daily ingredient price roll.
    pub ingredient_price_max_cents: i64,
    /// Countdown budget for the baking (division) minigame, in seconds.
    pub baking_time_secs: u32,
    /// Countdown budget for the cleaning (multiplication) minigame, in seconds.
    pub cleaning_time_secs: u32,
    /// Hard cap on total cookies customers can order in one day.
    pub max_oven_capacity: u32,
    /// Fallback problem quota for the division minigame.
    pub division_problems: u32,
    /// Fallback problem quota for the multiplication minigame.
    pub multiplication_problems: u32,
    /// Sale price of one cookie.
    pub cookie_price_cents: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_funds_cents: 50_000,
            win_threshold_cents: 100_000,
            bankruptcy_threshold_cents: 0,
            ingredient_price_min_cents: 500,
            ingredient_price_max_cents: 1_500,
            baking_time_secs: 60,
            cleaning_time_secs: 45,
            max_oven_capacity: 20,
            division_problems: 10,
            multiplication_problems: 8,
            cookie_price_cents: 1_500,
        }
    }
}

impl GameConfig {
    /// Parse the key=value tunables format, falling back to defaults for
    /// anything missing or malformed.
    #[must_use]
    pub fn from_key_values(text: &str) -> Self {
        let mut cfg = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let Ok(value) = value.trim().parse::<f64>() else {
                continue;
            };
            cfg.apply(key.trim(), value);
        }
        cfg
    }

    fn apply(&mut self, key: &str, value: f64) {
        match key {
            "STARTING_FUNDS" => self.starting_funds_cents = dollars_to_cents(value),
            "WIN_THRESHOLD" => self.win_threshold_cents = dollars_to_cents(value),
            "BANKRUPTCY_THRESHOLD" => self.bankruptcy_threshold_cents = dollars_to_cents(value),
            "FLOUR_PRICE_MIN" => self.ingredient_price_min_cents = dollars_to_cents(value),
            "FLOUR_PRICE_MAX" => self.ingredient_price_max_cents = dollars_to_cents(value),
            "BAKING_TIME" => self.baking_time_secs = whole_seconds(value),
            "CLEANING_TIME" => self.cleaning_time_secs = whole_seconds(value),
            "MAX_BREAD_CAPACITY" => self.max_oven_capacity = whole_count(value),
            "DIVISION_PROBLEMS" => self.division_problems = whole_count(value),
            "MULTIPLICATION_PROBLEMS" => self.multiplication_problems = whole_count(value),
            "COOKIE_PRICE" => self.cookie_price_cents = dollars_to_cents(value),
            _ => {}
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(value: f64) -> u32 {
    // Zero-length countdowns are unplayable; clamp to one second.
    value.max(1.0).round() as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_count(value: f64) -> u32 {
    value.max(0.0).round() as u32
}
