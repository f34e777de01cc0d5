//! Mock Data Generator
//!
//! Random transactions and balance fluctuations for the dashboard. The
//! generator is generic over the RNG so tests can seed it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::model::{
    AccountBalance, SpendingBreakdown, SpendingPeriod, Transaction, TransactionCategory,
    BASE_BALANCE,
};

/// Largest balance change in either direction
pub const DEFAULT_MAX_FLUCTUATION: f64 = 500.0;

/// Canned transactions the feed draws from. Amounts in cents.
pub const TRANSACTION_CATALOG: [(&str, TransactionCategory, i64); 7] = [
    ("Adobe Creative Suite", TransactionCategory::Software, -5999),
    ("Client Payment", TransactionCategory::Income, 250000),
    ("Office Supplies", TransactionCategory::Office, -12450),
    ("Marketing Campaign", TransactionCategory::Marketing, -89000),
    ("Freelancer Payment", TransactionCategory::Income, 120000),
    ("Cloud Storage", TransactionCategory::Software, -2999),
    ("Coffee & Snacks", TransactionCategory::Office, -4580),
];

/// Produces mock dashboard records
#[derive(Debug, Clone)]
pub struct MockDataGenerator<R: Rng = StdRng> {
    rng: R,
    base_balance: f64,
    max_fluctuation: f64,
}

impl MockDataGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MockDataGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            base_balance: BASE_BALANCE,
            max_fluctuation: DEFAULT_MAX_FLUCTUATION,
        }
    }

    /// Builder: base balance and fluctuation half-width
    pub fn balance_range(mut self, base: f64, max_fluctuation: f64) -> Self {
        self.base_balance = base;
        self.max_fluctuation = max_fluctuation.abs();
        self
    }

    pub fn base_balance(&self) -> f64 {
        self.base_balance
    }

    /// Uniform pick from [`TRANSACTION_CATALOG`]
    pub fn next_transaction(&mut self) -> Transaction {
        let (name, category, cents) =
            TRANSACTION_CATALOG[self.rng.gen_range(0..TRANSACTION_CATALOG.len())];
        Transaction::new(name, category, Decimal::new(cents, 2))
    }

    /// Uniform change in `[-max_fluctuation, +max_fluctuation]`
    pub fn balance_delta(&mut self) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * 2.0 * self.max_fluctuation
    }

    /// Fresh balance from the base, never accumulated
    pub fn balance(&mut self) -> AccountBalance {
        let delta = self.balance_delta();
        AccountBalance::from_delta(self.base_balance, delta)
    }

    /// Spend totals for a period
    pub fn spending_for(&self, period: SpendingPeriod) -> SpendingBreakdown {
        period.breakdown()
    }
}
