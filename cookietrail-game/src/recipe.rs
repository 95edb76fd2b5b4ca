//! Ingredients, the pantry, and the cookie recipe math.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of ingredients the trailer stocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ingredient {
    Flour,
    Sugar,
    Butter,
    Chocolate,
    BakingSoda,
}

impl Ingredient {
    /// Every ingredient, in display order.
    pub const ALL: [Self; 5] = [
        Self::Flour,
        Self::Sugar,
        Self::Butter,
        Self::Chocolate,
        Self::BakingSoda,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flour => "flour",
            Self::Sugar => "sugar",
            Self::Butter => "butter",
            Self::Chocolate => "chocolate",
            Self::BakingSoda => "baking_soda",
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ingredient {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flour" => Ok(Self::Flour),
            "sugar" => Ok(Self::Sugar),
            "butter" => Ok(Self::Butter),
            "chocolate" => Ok(Self::Chocolate),
            "baking_soda" => Ok(Self::BakingSoda),
            _ => Err(()),
        }
    }
}

/// Quantities of each ingredient currently on hand.
///
/// Quantities are unsigned, so negative stock is unrepresentable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pantry {
    #[serde(default)]
    pub flour: u32,
    #[serde(default)]
    pub sugar: u32,
    #[serde(default)]
    pub butter: u32,
    #[serde(default)]
    pub chocolate: u32,
    #[serde(default)]
    pub baking_soda: u32,
}

impl Pantry {
    /// Quantity on hand for one ingredient.
    #[must_use]
    pub const fn get(&self, ingredient: Ingredient) -> u32 {
        match ingredient {
            Ingredient::Flour => self.flour,
            Ingredient::Sugar => self.sugar,
            Ingredient::Butter => self.butter,
            Ingredient::Chocolate => self.chocolate,
            Ingredient::BakingSoda => self.baking_soda,
        }
    }

    /// Add purchased stock for one ingredient.
    pub const fn add(&mut self, ingredient: Ingredient, qty: u32) {
        let slot = self.slot_mut(ingredient);
        *slot = slot.saturating_add(qty);
    }

    /// Remove stock for one ingredient, saturating at zero.
    pub const fn take(&mut self, ingredient: Ingredient, qty: u32) {
        let slot = self.slot_mut(ingredient);
        *slot = slot.saturating_sub(qty);
    }

    const fn slot_mut(&mut self, ingredient: Ingredient) -> &mut u32 {
        match ingredient {
            Ingredient::Flour => &mut self.flour,
            Ingredient::Sugar => &mut self.sugar,
            Ingredient::Butter => &mut self.butter,
            Ingredient::Chocolate => &mut self.chocolate,
            Ingredient::BakingSoda => &mut self.baking_soda,
        }
    }

    /// True when nothing at all is on hand.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.flour == 0
            && self.sugar == 0
            && self.butter == 0
            && self.chocolate == 0
            && self.baking_soda == 0
    }
}

/// Per-cookie ingredient requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecipe {
    pub flour: u32,
    pub sugar: u32,
    pub butter: u32,
    pub chocolate: u32,
    pub baking_soda: u32,
}

impl Default for CookieRecipe {
    fn default() -> Self {
        Self {
            flour: 3,
            sugar: 1,
            butter: 1,
            chocolate: 1,
            baking_soda: 1,
        }
    }
}

impl CookieRecipe {
    /// Quantity of one ingredient required per cookie.
    #[must_use]
    pub const fn required(&self, ingredient: Ingredient) -> u32 {
        match ingredient {
            Ingredient::Flour => self.flour,
            Ingredient::Sugar => self.sugar,
            Ingredient::Butter => self.butter,
            Ingredient::Chocolate => self.chocolate,
            Ingredient::BakingSoda => self.baking_soda,
        }
    }

    /// True iff the pantry holds at least one full recipe's worth.
    #[must_use]
    pub fn can_make(&self, pantry: &Pantry) -> bool {
        Ingredient::ALL
            .iter()
            .all(|&ing| pantry.get(ing) >= self.required(ing))
    }

    /// Minimum over all required ingredients of floor(have / need).
    #[must_use]
    pub fn max_cookies(&self, pantry: &Pantry) -> u32 {
        Ingredient::ALL
            .iter()
            .filter(|&&ing| self.required(ing) > 0)
            .map(|&ing| pantry.get(ing) / self.required(ing))
            .min()
            .unwrap_or(0)
    }

    /// Consume one recipe's worth from the pantry.
    ///
    /// Callers must check [`Self::can_make`] first; short stock saturates at
    /// zero rather than going negative.
    pub fn consume_one(&self, pantry: &mut Pantry) {
        for &ing in &Ingredient::ALL {
            pantry.take(ing, self.required(ing));
        }
    }

    /// Consume `count` recipes' worth from the pantry.
    pub fn consume(&self, pantry: &mut Pantry, count: u32) {
        for &ing in &Ingredient::ALL {
            pantry.take(ing, self.required(ing).saturating_mul(count));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked(flour: u32, sugar: u32, butter: u32, chocolate: u32, baking_soda: u32) -> Pantry {
        Pantry {
            flour,
            sugar,
            butter,
            chocolate,
            baking_soda,
        }
    }

    #[test]
    fn can_make_requires_every_ingredient() {
        let recipe = CookieRecipe::default();
        assert!(recipe.can_make(&stocked(3, 1, 1, 1, 1)));
        // Short on exactly one ingredient fails the check.
        assert!(!recipe.can_make(&stocked(2, 1, 1, 1, 1)));
        assert!(!recipe.can_make(&stocked(3, 1, 1, 1, 0)));
        assert!(!recipe.can_make(&Pantry::default()));
    }

    #[test]
    fn max_cookies_is_min_of_floored_ratios() {
        let recipe = CookieRecipe::default();
        assert_eq!(recipe.max_cookies(&stocked(9, 3, 3, 3, 3)), 3);
        assert_eq!(recipe.max_cookies(&stocked(9, 3, 3, 2, 3)), 2);
        assert_eq!(recipe.max_cookies(&stocked(2, 9, 9, 9, 9)), 0);
        assert_eq!(recipe.max_cookies(&Pantry::default()), 0);
    }

    #[test]
    fn max_cookies_butter_heavy_revision_example() {
        // Butter 8 / soda 2 variant: butter and soda both bottleneck at 1.
        let recipe = CookieRecipe {
            flour: 3,
            sugar: 1,
            butter: 8,
            chocolate: 1,
            baking_soda: 2,
        };
        let pantry = stocked(9, 3, 8, 2, 2);
        assert_eq!(recipe.max_cookies(&pantry), 1);
    }

    #[test]
    fn consume_one_decrements_each_ingredient() {
        let recipe = CookieRecipe::default();
        let mut pantry = stocked(6, 2, 2, 2, 2);
        recipe.consume_one(&mut pantry);
        assert_eq!(pantry, stocked(3, 1, 1, 1, 1));
        recipe.consume_one(&mut pantry);
        assert_eq!(pantry, Pantry::default());
    }

    #[test]
    fn consume_many_saturates_at_zero() {
        let recipe = CookieRecipe::default();
        let mut pantry = stocked(4, 1, 1, 1, 1);
        recipe.consume(&mut pantry, 2);
        assert_eq!(pantry.flour, 0);
        assert_eq!(pantry.sugar, 0);
    }

    #[test]
    fn ingredient_round_trips_through_str() {
        for ing in Ingredient::ALL {
            assert_eq!(ing.as_str().parse::<Ingredient>(), Ok(ing));
        }
        assert!("nutmeg".parse::<Ingredient>().is_err());
    }
}
