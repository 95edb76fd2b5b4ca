//! Customer demand generation for the order phase.
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::GameConfig;
use crate::constants::{
    DEMAND_MAX_CUSTOMERS, DEMAND_MAX_PER_CUSTOMER, DEMAND_MIN_CUSTOMERS, DEMAND_MIN_PER_CUSTOMER,
};

/// Customer roster capacity stored inline without allocation.
pub type OrderList = SmallVec<[CustomerOrder; 8]>;

/// One customer's cookie order for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub customer: String,
    pub cookies: u32,
}

/// The accepted orders for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    pub orders: OrderList,
    /// Sum of all order quantities after reputation scaling and capping.
    pub total_cookies: u32,
}

const CUSTOMER_NAMES: &[&str] = &[
    "Avery", "Bernadette", "Casey", "Dmitri", "Esme", "Franklin", "Greta", "Hollis",
];

impl OrderBook {
    /// Generate a day's worth of customer orders.
    ///
    /// A random roster of customers each asks for a few cookies; the total is
    /// scaled by reputation and clamped to `[1, max_oven_capacity]`.
    pub fn generate(cfg: &GameConfig, reputation: f32, rng: &mut impl Rng) -> Self {
        let customer_count = rng.gen_range(DEMAND_MIN_CUSTOMERS..=DEMAND_MAX_CUSTOMERS);
        let mut orders = OrderList::new();
        let mut raw_total: u32 = 0;
        for i in 0..customer_count {
            let cookies = rng.gen_range(DEMAND_MIN_PER_CUSTOMER..=DEMAND_MAX_PER_CUSTOMER);
            raw_total += cookies;
            let name = CUSTOMER_NAMES[(i as usize) % CUSTOMER_NAMES.len()];
            orders.push(CustomerOrder {
                customer: name.to_string(),
                cookies,
            });
        }

        let total_cookies = scale_demand(raw_total, reputation, cfg.max_oven_capacity);
        let mut book = Self {
            orders,
            total_cookies,
        };
        book.rebalance();
        book
    }

    /// Spread the capped/scaled total back across the roster so the displayed
    /// orders sum to `total_cookies`.
    fn rebalance(&mut self) {
        let count = self.orders.len() as u32;
        if count == 0 {
            return;
        }
        let base = self.total_cookies / count;
        let mut remainder = self.total_cookies % count;
        for order in &mut self.orders {
            order.cookies = base + u32::from(remainder > 0);
            remainder = remainder.saturating_sub(1);
        }
        self.orders.retain(|order| order.cookies > 0);
    }
}

/// Scale raw demand by reputation and clamp to the oven capacity.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scale_demand(raw_total: u32, reputation: f32, max_capacity: u32) -> u32 {
    let scaled = (raw_total as f32 * reputation).round() as u32;
    scaled.clamp(1, max_capacity.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn generated_demand_respects_capacity() {
        let cfg = GameConfig {
            max_oven_capacity: 6,
            ..GameConfig::default()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..40 {
            let book = OrderBook::generate(&cfg, 2.0, &mut rng);
            assert!(book.total_cookies >= 1);
            assert!(book.total_cookies <= 6);
        }
    }

    #[test]
    fn orders_sum_to_total() {
        let cfg = GameConfig::default();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for _ in 0..40 {
            let book = OrderBook::generate(&cfg, 1.0, &mut rng);
            let sum: u32 = book.orders.iter().map(|o| o.cookies).sum();
            assert_eq!(sum, book.total_cookies);
        }
    }

    #[test]
    fn reputation_scales_demand() {
        assert_eq!(scale_demand(10, 1.0, 20), 10);
        assert_eq!(scale_demand(10, 1.5, 20), 15);
        assert_eq!(scale_demand(10, 0.5, 20), 5);
        // Clamped at both ends.
        assert_eq!(scale_demand(10, 3.0, 20), 20);
        assert_eq!(scale_demand(1, 0.1, 20), 1);
    }

    #[test]
    fn same_seed_same_orders() {
        let cfg = GameConfig::default();
        let a = OrderBook::generate(&cfg, 1.0, &mut ChaCha20Rng::seed_from_u64(77));
        let b = OrderBook::generate(&cfg, 1.0, &mut ChaCha20Rng::seed_from_u64(77));
        assert_eq!(a, b);
    }
}
