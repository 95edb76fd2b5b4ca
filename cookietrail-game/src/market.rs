//! Daily ingredient pricing and the shopping cart.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::recipe::{CookieRecipe, Ingredient, Pantry};

/// Ingredient prices for a single day, in cents per unit.
///
/// Rolled once per day within the configured price band; immutable until the
/// next day's reroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBoard {
    pub flour_cents: i64,
    pub sugar_cents: i64,
    pub butter_cents: i64,
    pub chocolate_cents: i64,
    pub baking_soda_cents: i64,
}

impl PriceBoard {
    /// Roll a fresh day of prices inside the configured band.
    pub fn roll(cfg: &GameConfig, rng: &mut impl Rng) -> Self {
        let lo = cfg.ingredient_price_min_cents.min(cfg.ingredient_price_max_cents);
        let hi = cfg.ingredient_price_min_cents.max(cfg.ingredient_price_max_cents);
        let mut price = || -> i64 {
            if lo == hi {
                lo
            } else {
                rng.gen_range(lo..=hi)
            }
        };
        Self {
            flour_cents: price(),
            sugar_cents: price(),
            butter_cents: price(),
            chocolate_cents: price(),
            baking_soda_cents: price(),
        }
    }

    /// Price per unit for one ingredient.
    #[must_use]
    pub const fn price_cents(&self, ingredient: Ingredient) -> i64 {
        match ingredient {
            Ingredient::Flour => self.flour_cents,
            Ingredient::Sugar => self.sugar_cents,
            Ingredient::Butter => self.butter_cents,
            Ingredient::Chocolate => self.chocolate_cents,
            Ingredient::BakingSoda => self.baking_soda_cents,
        }
    }

    /// Cheapest possible ingredient price under the configured band.
    #[must_use]
    pub fn cheapest_cents(cfg: &GameConfig) -> i64 {
        cfg.ingredient_price_min_cents.min(cfg.ingredient_price_max_cents)
    }
}

/// A line item in the shopping cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub ingredient: Ingredient,
    pub qty: u32,
}

/// Shopping cart state for the shopping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Create a new empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a cart line by ingredient.
    #[must_use]
    pub fn find_line(&self, ingredient: Ingredient) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.ingredient == ingredient)
    }

    /// Add quantity of an ingredient. Returns the new quantity for that line.
    pub fn add_item(&mut self, ingredient: Ingredient, qty_to_add: u32) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.ingredient == ingredient) {
            line.qty = line.qty.saturating_add(qty_to_add);
            line.qty
        } else {
            self.lines.push(CartLine {
                ingredient,
                qty: qty_to_add,
            });
            qty_to_add
        }
    }

    /// Remove quantity of an ingredient. Returns the new quantity (0 if the
    /// line is removed).
    pub fn remove_item(&mut self, ingredient: Ingredient, qty_to_remove: u32) -> u32 {
        let Some(line) = self.lines.iter_mut().find(|l| l.ingredient == ingredient) else {
            return 0;
        };
        line.qty = line.qty.saturating_sub(qty_to_remove);
        let remaining = line.qty;
        if remaining == 0 {
            self.lines.retain(|l| l.ingredient != ingredient);
        }
        remaining
    }

    /// Get the current quantity of an ingredient in the cart.
    #[must_use]
    pub fn get_quantity(&self, ingredient: Ingredient) -> u32 {
        self.find_line(ingredient).map_or(0, |line| line.qty)
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Clear the entire cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Fill the cart with exactly `count` recipes' worth of ingredients.
    #[must_use]
    pub fn for_recipes(recipe: &CookieRecipe, count: u32) -> Self {
        let mut cart = Self::new();
        for &ing in &Ingredient::ALL {
            let qty = recipe.required(ing).saturating_mul(count);
            if qty > 0 {
                cart.add_item(ing, qty);
            }
        }
        cart
    }

    /// Apply the cart's contents to a pantry.
    pub fn stock_pantry(&self, pantry: &mut Pantry) {
        for line in &self.lines {
            pantry.add(line.ingredient, line.qty);
        }
    }
}

/// Total cost of a cart at today's prices.
#[must_use]
pub fn calculate_cart_total(cart: &Cart, prices: &PriceBoard) -> i64 {
    cart.lines
        .iter()
        .map(|line| prices.price_cents(line.ingredient) * i64::from(line.qty))
        .sum()
}

/// Cost of one recipe's worth of ingredients at today's prices.
#[must_use]
pub fn cost_of_one_cookie(recipe: &CookieRecipe, prices: &PriceBoard) -> i64 {
    Ingredient::ALL
        .iter()
        .map(|&ing| prices.price_cents(ing) * i64::from(recipe.required(ing)))
        .sum()
}
