//! Bot player policies for automated playthroughs.
//!
//! A policy decides what the simulated player buys each morning and how well
//! they answer the arithmetic problems during the minigames. Skill tiers map
//! to answer accuracy so that playability sweeps can cover both strong and
//! weak players.

use clap::ValueEnum;
use cookietrail_game::{Cart, GameController, Problem};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// How capable the simulated player is at mental arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BotSkill {
    /// Answers correctly ~60% of the time.
    Novice,
    /// Answers correctly ~85% of the time.
    Competent,
    /// Never misses.
    Expert,
}

impl BotSkill {
    #[must_use]
    pub const fn accuracy(self) -> f64 {
        match self {
            Self::Novice => 0.60,
            Self::Competent => 0.85,
            Self::Expert => 1.0,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Novice => "novice",
            Self::Competent => "competent",
            Self::Expert => "expert",
        }
    }
}

/// Deterministic bot that shops to demand and answers with a fixed accuracy.
pub struct BotPolicy {
    accuracy: f64,
    rng: ChaCha20Rng,
}

impl BotPolicy {
    #[must_use]
    pub fn new(skill: BotSkill, seed: u64) -> Self {
        Self {
            accuracy: skill.accuracy(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Build the morning shopping cart: enough ingredients for today's demand,
    /// trimmed down batch by batch until the cart fits the available funds.
    #[must_use]
    pub fn plan_cart(&self, game: &GameController) -> Cart {
        let recipe = game.state().recipe;
        let funds = game.state().funds_cents;
        let mut batches = game.state().current_day_demand;
        loop {
            let cart = Cart::for_recipes(&recipe, batches);
            if batches == 0
                || cookietrail_game::calculate_cart_total(&cart, game.prices()) <= funds
            {
                return cart;
            }
            batches -= 1;
        }
    }

    /// Produce an answer for one problem. Misses are off by one, which is the
    /// most common slip a human makes on these tables.
    pub fn answer(&mut self, problem: &Problem) -> u32 {
        let correct = problem.answer();
        if self.rng.gen_bool(self.accuracy) {
            correct
        } else if correct > 1 && self.rng.gen_bool(0.5) {
            correct - 1
        } else {
            correct + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookietrail_game::{GameConfig, MinigameKind};

    #[test]
    fn expert_never_misses() {
        let mut policy = BotPolicy::new(BotSkill::Expert, 42);
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for _ in 0..50 {
            let problem = Problem::generate(MinigameKind::Multiplication, &mut rng);
            assert_eq!(policy.answer(&problem), problem.answer());
        }
    }

    #[test]
    fn novice_misses_sometimes() {
        let mut policy = BotPolicy::new(BotSkill::Novice, 42);
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let misses = (0..200)
            .filter(|_| {
                let problem = Problem::generate(MinigameKind::Division, &mut rng);
                policy.answer(&problem) != problem.answer()
            })
            .count();
        assert!(misses > 0);
        assert!(misses < 200);
    }

    #[test]
    fn cart_fits_available_funds() {
        let cfg = GameConfig::from_key_values("STARTING_FUNDS=20\nFLOUR_PRICE_MIN=1\nFLOUR_PRICE_MAX=1\n");
        let mut game = GameController::new(cfg, 7);
        game.submit_login("bot").unwrap();
        game.acknowledge_instructions().unwrap();
        game.accept_orders().unwrap();

        let policy = BotPolicy::new(BotSkill::Competent, 7);
        let cart = policy.plan_cart(&game);
        let total = cookietrail_game::calculate_cart_total(&cart, game.prices());
        assert!(total <= game.state().funds_cents);
    }

    #[test]
    fn skill_labels_are_stable() {
        assert_eq!(BotSkill::Novice.label(), "novice");
        assert_eq!(BotSkill::Expert.label(), "expert");
    }
}
