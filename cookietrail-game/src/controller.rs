//! The phase/economy state machine driving a play-through.
//!
//! Screens and minigames are external presentation; they call the typed
//! operations here and the controller computes the next phase plus the state
//! mutations. Every operation is gated on the current phase, so an
//! out-of-order call is rejected instead of silently corrupting state.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::config::GameConfig;
use crate::constants::{
    DIRTY_DISH_PENALTY_CENTS, LOG_BAKING_DONE, LOG_BAKING_SKIPPED, LOG_BANKRUPT, LOG_CANNOT_BAKE,
    LOG_CLEANING_PENALTY, LOG_CLEANING_PERFECT, LOG_CLEANING_SKIPPED, LOG_DAY_COMPLETE,
    LOG_LOGIN_OK, LOG_ORDERS_ACCEPTED, LOG_PURCHASE_INSUFFICIENT_FUNDS, LOG_PURCHASE_OK,
    LOG_VICTORY, REPUTATION_CLEAN_BONUS, REPUTATION_DIRTY_PENALTY, REPUTATION_MAX, REPUTATION_MIN,
    TIP_RATE_PCT,
};
use crate::market::{Cart, PriceBoard, calculate_cart_total, cost_of_one_cookie};
use crate::minigame::{MinigameOutcome, MinigameSession, MinigameSpec};
use crate::orders::OrderBook;
use crate::recipe::Ingredient;
use crate::state::{GamePhase, PlayerState};
use crate::summary::{DaySummary, Ending, RunSummary};

/// Rejection of a controller operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// The operation does not belong to the current phase.
    #[error("operation `{op}` is not valid in phase `{phase}`")]
    WrongPhase { op: &'static str, phase: GamePhase },
    /// Login requires a non-empty username.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The cart costs more than the player has; nothing was purchased.
    #[error("purchase costs {needed_cents} cents but only {available_cents} are available")]
    InsufficientFunds {
        needed_cents: i64,
        available_cents: i64,
    },
}

/// Accumulates the in-flight day's accounting until cleaning closes it out.
#[derive(Debug, Clone, Copy, Default)]
struct DayDraft {
    expenses_cents: i64,
    revenue_cents: i64,
    tips_cents: i64,
    cookies_baked: u32,
    /// Recipes already consumed via the per-cookie gate during baking.
    cookies_consumed: u32,
}

/// Owns the player state and drives the phase transitions of `GamePhase`.
#[derive(Debug, Clone)]
pub struct GameController {
    cfg: GameConfig,
    state: PlayerState,
    phase: GamePhase,
    /// Supports returning from an interstitial screen (recipe book).
    previous_phase: Option<GamePhase>,
    prices: PriceBoard,
    pending_orders: OrderBook,
    draft: DayDraft,
    ending: Option<Ending>,
    rng: ChaCha20Rng,
}

impl GameController {
    /// Construct a controller for a fresh play-through.
    ///
    /// The config snapshot is injected here and never mutated; the seed makes
    /// prices, demand, and minigame problems reproducible.
    #[must_use]
    pub fn new(cfg: GameConfig, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let state = PlayerState::new(&cfg);
        let prices = PriceBoard::roll(&cfg, &mut rng);
        Self {
            cfg,
            state,
            phase: GamePhase::Login,
            previous_phase: None,
            prices,
            pending_orders: OrderBook::default(),
            draft: DayDraft::default(),
            ending: None,
            rng,
        }
    }

    /// Reinitialize for a new play-through with a fresh seed.
    pub fn reset(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self.state.reset(&self.cfg);
        self.prices = PriceBoard::roll(&self.cfg, &mut self.rng);
        self.phase = GamePhase::Login;
        self.previous_phase = None;
        self.pending_orders = OrderBook::default();
        self.draft = DayDraft::default();
        self.ending = None;
    }

    // Accessors ------------------------------------------------------------

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub const fn state(&self) -> &PlayerState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.cfg
    }

    /// Today's ingredient price board.
    #[must_use]
    pub const fn prices(&self) -> &PriceBoard {
        &self.prices
    }

    /// Orders generated for the order screen, awaiting acceptance.
    #[must_use]
    pub const fn pending_orders(&self) -> &OrderBook {
        &self.pending_orders
    }

    /// Set once the run reaches `GamePhase::GameOver`.
    #[must_use]
    pub const fn ending(&self) -> Option<Ending> {
        self.ending
    }

    /// End-screen summary; only available after the run ended.
    #[must_use]
    pub fn run_summary(&self) -> Option<RunSummary> {
        self.ending
            .map(|ending| RunSummary::from_state(&self.state, ending))
    }

    // Economy queries -------------------------------------------------------

    /// True iff the pantry holds a full recipe's worth of every ingredient.
    #[must_use]
    pub fn can_make_cookies(&self) -> bool {
        self.state.recipe.can_make(&self.state.pantry)
    }

    /// How many cookies the pantry supports right now.
    #[must_use]
    pub fn max_cookies(&self) -> u32 {
        self.state.recipe.max_cookies(&self.state.pantry)
    }

    /// Ingredient cost of one cookie at today's prices.
    #[must_use]
    pub fn cost_of_one_cookie_cents(&self) -> i64 {
        cost_of_one_cookie(&self.state.recipe, &self.prices)
    }

    /// Funds reached the win threshold.
    #[must_use]
    pub fn check_victory(&self) -> bool {
        self.state.funds_cents >= self.cfg.win_threshold_cents
    }

    /// Broke, nothing on hand, and unable to afford a restock.
    ///
    /// Ingredients on hand, even a partial recipe, defer bankruptcy: the
    /// player may still trade their way back.
    #[must_use]
    pub fn check_bankruptcy(&self) -> bool {
        self.state.funds_cents <= self.cfg.bankruptcy_threshold_cents
            && self.state.recipe.max_cookies(&self.state.pantry) == 0
            && self.state.pantry.is_empty()
            && self.state.funds_cents < self.min_restock_cost_cents()
    }

    /// Cost of one recipe's worth at the cheapest possible price roll.
    fn min_restock_cost_cents(&self) -> i64 {
        let cheapest = PriceBoard::cheapest_cents(&self.cfg);
        Ingredient::ALL
            .iter()
            .map(|&ing| cheapest * i64::from(self.state.recipe.required(ing)))
            .sum()
    }

    // Phase operations ------------------------------------------------------

    /// LOGIN: record the username and move to the instructions screen.
    pub fn submit_login(&mut self, username: &str) -> Result<GamePhase, ControllerError> {
        self.require_phase(GamePhase::Login, "submit_login")?;
        let username = username.trim();
        if username.is_empty() {
            return Err(ControllerError::EmptyUsername);
        }
        self.state.username = Some(username.to_string());
        self.state.push_log(LOG_LOGIN_OK);
        Ok(self.transition(GamePhase::HowToPlay))
    }

    /// HOW_TO_PLAY: continue into the first order screen.
    pub fn acknowledge_instructions(&mut self) -> Result<GamePhase, ControllerError> {
        self.require_phase(GamePhase::HowToPlay, "acknowledge_instructions")?;
        self.roll_new_orders();
        Ok(self.transition(GamePhase::Order))
    }

    /// ORDER: accept the generated customer orders as today's demand.
    pub fn accept_orders(&mut self) -> Result<GamePhase, ControllerError> {
        self.require_phase(GamePhase::Order, "accept_orders")?;
        self.state.current_day_demand = self.pending_orders.total_cookies;
        self.state.orders = self.pending_orders.clone();
        self.state.push_log(LOG_ORDERS_ACCEPTED);
        Ok(self.transition(GamePhase::Shopping))
    }

    /// SHOPPING: pay for the cart and stock the pantry.
    ///
    /// Moves to BAKING when a full recipe is on hand afterwards, otherwise to
    /// CLEANING with a warning logged.
    pub fn complete_purchase(&mut self, cart: &Cart) -> Result<GamePhase, ControllerError> {
        self.require_phase(GamePhase::Shopping, "complete_purchase")?;
        let total = calculate_cart_total(cart, &self.prices);
        // A cart that costs nothing always goes through: a player in debt who
        // still has ingredients on hand must be able to leave the shop.
        if total > 0 && total > self.state.funds_cents {
            self.state.push_log(LOG_PURCHASE_INSUFFICIENT_FUNDS);
            return Err(ControllerError::InsufficientFunds {
                needed_cents: total,
                available_cents: self.state.funds_cents,
            });
        }
        self.state.funds_cents -= total;
        self.draft.expenses_cents += total;
        cart.stock_pantry(&mut self.state.pantry);
        self.state.push_log(LOG_PURCHASE_OK);

        if self.can_make_cookies() {
            Ok(self.transition(GamePhase::Baking))
        } else {
            self.state.push_log(LOG_CANNOT_BAKE);
            Ok(self.transition(GamePhase::Cleaning))
        }
    }

    /// Open the recipe book interstitial, remembering where we came from.
    pub fn open_recipe_book(&mut self) -> Result<GamePhase, ControllerError> {
        if self.phase.is_terminal() || self.phase == GamePhase::RecipeBook {
            return Err(self.wrong_phase("open_recipe_book"));
        }
        self.previous_phase = Some(self.phase);
        self.phase = GamePhase::RecipeBook;
        Ok(self.phase)
    }

    /// Close the recipe book and restore the phase it was opened from.
    pub fn close_recipe_book(&mut self) -> Result<GamePhase, ControllerError> {
        self.require_phase(GamePhase::RecipeBook, "close_recipe_book")?;
        // Login is the fallback if the previous phase was somehow lost.
        self.phase = self.previous_phase.take().unwrap_or(GamePhase::Login);
        Ok(self.phase)
    }

    /// BAKING: build the division drill session for today's demand.
    pub fn begin_baking(&mut self) -> Result<MinigameSession, ControllerError> {
        self.require_phase(GamePhase::Baking, "begin_baking")?;
        let spec = MinigameSpec::baking(&self.cfg, self.state.current_day_demand);
        Ok(MinigameSession::new(spec, self.rng.r#gen()))
    }

    /// Per-cookie gate for the baking drill: consume one recipe's worth if a
    /// full recipe is on hand, otherwise leave the pantry untouched.
    pub fn try_consume_one_cookie_worth(&mut self) -> bool {
        if self.phase != GamePhase::Baking {
            return false;
        }
        if !self.state.recipe.can_make(&self.state.pantry) {
            return false;
        }
        self.state.recipe.consume_one(&mut self.state.pantry);
        self.draft.cookies_consumed += 1;
        true
    }

    /// BAKING complete: bank the revenue and queue the dirty dishes.
    pub fn resolve_baking(&mut self, outcome: MinigameOutcome) -> Result<GamePhase, ControllerError> {
        self.require_phase(GamePhase::Baking, "resolve_baking")?;
        let cookies = if outcome.skipped {
            self.state.push_log(LOG_BAKING_SKIPPED);
            0
        } else {
            self.state.push_log(LOG_BAKING_DONE);
            outcome.result.correct_answers
        };

        // The per-answer gate consumed ingredients as cookies were made; any
        // remainder (frontends that only report the final score) is consumed
        // here, capped by what the pantry actually supports.
        let already = self.draft.cookies_consumed;
        let cap = already + self.state.recipe.max_cookies(&self.state.pantry);
        let cookies = cookies.min(cap);
        let shortfall = cookies.saturating_sub(already);
        self.state.recipe.consume(&mut self.state.pantry, shortfall);

        let revenue = i64::from(cookies) * self.cfg.cookie_price_cents;
        self.state.funds_cents += revenue;
        let tips = self.tips_for(cookies);
        self.state.funds_cents += tips;

        self.draft.cookies_baked = cookies;
        self.draft.revenue_cents = revenue;
        self.draft.tips_cents = tips;
        self.state.dishes_to_clean = cookies;
        Ok(self.transition(GamePhase::Cleaning))
    }

    /// CLEANING complete: settle dish penalties and reputation, close the day.
    pub fn resolve_cleaning(
        &mut self,
        outcome: MinigameOutcome,
    ) -> Result<GamePhase, ControllerError> {
        self.require_phase(GamePhase::Cleaning, "resolve_cleaning")?;
        let dishes = self.state.dishes_to_clean;
        let cleaned = outcome.result.correct_answers.min(dishes);
        let not_cleaned = dishes - cleaned;

        if outcome.skipped {
            self.state.push_log(LOG_CLEANING_SKIPPED);
        }
        let mut penalty = 0;
        if not_cleaned > 0 {
            penalty = i64::from(not_cleaned) * DIRTY_DISH_PENALTY_CENTS;
            self.state.funds_cents -= penalty;
            self.state.push_log(LOG_CLEANING_PENALTY);
        }
        // Skipping counts as a failed cleaning even when no dishes piled up.
        if outcome.skipped || not_cleaned > 0 {
            self.state.reputation =
                (self.state.reputation - REPUTATION_DIRTY_PENALTY).max(REPUTATION_MIN);
        } else {
            self.state.reputation =
                (self.state.reputation + REPUTATION_CLEAN_BONUS).min(REPUTATION_MAX);
            self.state.push_log(LOG_CLEANING_PERFECT);
        }

        let closing_day = self.state.current_day;
        self.state.current_day += 1;
        self.state.ledger.push(DaySummary {
            day: closing_day,
            demand: self.state.current_day_demand,
            cookies_baked: self.draft.cookies_baked,
            revenue_cents: self.draft.revenue_cents,
            tips_cents: self.draft.tips_cents,
            expenses_cents: self.draft.expenses_cents,
            dishes_cleaned: cleaned,
            dish_penalty_cents: penalty,
            reputation_after: self.state.reputation,
            funds_after_cents: self.state.funds_cents,
        });
        self.state.push_log(LOG_DAY_COMPLETE);
        Ok(self.transition(GamePhase::DaySummary))
    }

    /// DAY_SUMMARY: evaluate the end conditions or roll into the next day.
    pub fn advance_day(&mut self) -> Result<GamePhase, ControllerError> {
        self.require_phase(GamePhase::DaySummary, "advance_day")?;
        if self.check_victory() {
            self.ending = Some(Ending::Victory);
            self.state.push_log(LOG_VICTORY);
            return Ok(self.transition(GamePhase::GameOver));
        }
        if self.check_bankruptcy() {
            self.ending = Some(Ending::Bankrupt);
            self.state.push_log(LOG_BANKRUPT);
            return Ok(self.transition(GamePhase::GameOver));
        }

        // New trading day: fresh prices, fresh customers, clean slate.
        self.prices = PriceBoard::roll(&self.cfg, &mut self.rng);
        self.state.current_day_demand = 0;
        self.state.dishes_to_clean = 0;
        self.state.orders = OrderBook::default();
        self.draft = DayDraft::default();
        self.roll_new_orders();
        Ok(self.transition(GamePhase::Order))
    }

    /// CLEANING: build the multiplication drill session for today's dishes.
    pub fn begin_cleaning(&mut self) -> Result<MinigameSession, ControllerError> {
        self.require_phase(GamePhase::Cleaning, "begin_cleaning")?;
        let spec = MinigameSpec::cleaning(&self.cfg, self.state.dishes_to_clean);
        Ok(MinigameSession::new(spec, self.rng.r#gen()))
    }

    // Internals -------------------------------------------------------------

    fn tips_for(&self, cookies_baked: u32) -> i64 {
        let demand = self.state.current_day_demand;
        if demand == 0 || cookies_baked < demand {
            return 0;
        }
        let tip_per_order = (self.cfg.cookie_price_cents * TIP_RATE_PCT + 99) / 100;
        tip_per_order * self.state.orders.orders.len() as i64
    }

    fn roll_new_orders(&mut self) {
        self.pending_orders =
            OrderBook::generate(&self.cfg, self.state.reputation, &mut self.rng);
    }

    fn transition(&mut self, next: GamePhase) -> GamePhase {
        self.previous_phase = Some(self.phase);
        self.phase = next;
        next
    }

    fn require_phase(
        &self,
        expected: GamePhase,
        op: &'static str,
    ) -> Result<(), ControllerError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ControllerError::WrongPhase {
                op,
                phase: self.phase,
            })
        }
    }

    const fn wrong_phase(&self, op: &'static str) -> ControllerError {
        ControllerError::WrongPhase {
            op,
            phase: self.phase,
        }
    }
}
