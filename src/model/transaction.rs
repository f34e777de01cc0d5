//! Transactions and the bounded transaction feed

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::currency::usd_fixed;

/// Number of transactions the feed keeps visible
pub const DEFAULT_FEED_CAPACITY: usize = 5;

/// Category of a mock transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionCategory {
    Software,
    Income,
    Office,
    Marketing,
}

impl std::fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionCategory::Software => write!(f, "Software"),
            TransactionCategory::Income => write!(f, "Income"),
            TransactionCategory::Office => write!(f, "Office"),
            TransactionCategory::Marketing => write!(f, "Marketing"),
        }
    }
}

/// A single transaction shown in the feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub name: String,
    pub category: TransactionCategory,
    /// Signed amount in USD. Income is positive.
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(name: impl Into<String>, category: TransactionCategory, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            category,
            amount,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Amount as displayed: `+$2500.00` for income, `$59.99` otherwise
    pub fn display_amount(&self) -> String {
        let prefix = if self.is_positive() { "+" } else { "" };
        format!("{}{}", prefix, usd_fixed(self.amount.abs()))
    }
}

/// Newest-first list of recent transactions with a fixed capacity
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFeed {
    entries: VecDeque<Transaction>,
    capacity: usize,
}

impl TransactionFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the front. Returns the evicted oldest entry, if any.
    pub fn push(&mut self, transaction: Transaction) -> Option<Transaction> {
        self.entries.push_front(transaction);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest entry
    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.front()
    }

    /// Entries newest-first
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// Net of all visible amounts
    pub fn net(&self) -> Decimal {
        self.entries.iter().map(|t| t.amount).sum()
    }
}

impl Default for TransactionFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}
