//! Dashboard View Model
//!
//! Transient view-model state shown by the dashboard:
//!
//! - **types**: Theme, series selectors, chart series, spending periods, balance
//! - **transaction**: Transactions and the bounded newest-first feed
//! - **currency**: USD formatting helpers
//!
//! Nothing here is persisted except the theme preference, which is handled by
//! [`crate::theme::ThemeStore`].

pub mod currency;
pub mod transaction;
pub mod types;

pub use currency::{to_cents, usd_fixed, usd_grouped};
pub use transaction::{Transaction, TransactionCategory, TransactionFeed, DEFAULT_FEED_CAPACITY};
pub use types::{
    AccountBalance, ChartSeries, SeriesSelector, SpendingBreakdown, SpendingPeriod, Theme,
    BASE_BALANCE, MONTH_LABELS,
};
