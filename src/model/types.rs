//! Core view-model types
//!
//! - `Theme`: light/dark display theme
//! - `SeriesSelector` and `ChartSeries`: which metric is charted and its data
//! - `SpendingPeriod` and `SpendingBreakdown`: category spend widget
//! - `AccountBalance`: balance recomputed on every refresh

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::to_cents;

/// Fixed base balance every refresh is computed from
pub const BASE_BALANCE: f64 = 24890.50;

/// Month labels for the x-axis of every chart series
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Display theme
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored theme name. Anything unrecognized is `Light`.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Key used when persisting the theme
    pub fn as_key(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Which metric series the main chart shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SeriesSelector {
    #[default]
    Revenue,
    Profit,
    Expense,
    BurnRate,
    /// Unrecognized selector key, charted as an all-zero series
    Other(String),
}

impl SeriesSelector {
    /// Parse a selector key (`revenue`, `profit`, `expense`, `burn_rate`).
    /// Unknown keys are kept as [`SeriesSelector::Other`].
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "revenue" => SeriesSelector::Revenue,
            "profit" => SeriesSelector::Profit,
            "expense" => SeriesSelector::Expense,
            "burn_rate" => SeriesSelector::BurnRate,
            other => SeriesSelector::Other(other.to_string()),
        }
    }

    pub fn as_key(&self) -> &str {
        match self {
            SeriesSelector::Revenue => "revenue",
            SeriesSelector::Profit => "profit",
            SeriesSelector::Expense => "expense",
            SeriesSelector::BurnRate => "burn_rate",
            SeriesSelector::Other(key) => key,
        }
    }

    /// Human-readable dataset label
    pub fn label(&self) -> &'static str {
        match self {
            SeriesSelector::Revenue => "Revenue",
            SeriesSelector::Profit => "Profit",
            SeriesSelector::Expense => "Expenses",
            SeriesSelector::BurnRate => "Burn Rate",
            SeriesSelector::Other(_) => "Data",
        }
    }

    /// All known selectors, in display order
    pub fn all() -> [SeriesSelector; 4] {
        [
            SeriesSelector::Revenue,
            SeriesSelector::Profit,
            SeriesSelector::Expense,
            SeriesSelector::BurnRate,
        ]
    }
}

impl std::fmt::Display for SeriesSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Twelve monthly values for one metric
///
/// Fixed-size arrays keep labels and values the same length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: [&'static str; 12],
    pub values: [f64; 12],
}

impl ChartSeries {
    /// Mock series for a selector
    pub fn for_selector(selector: &SeriesSelector) -> Self {
        let values = match selector {
            SeriesSelector::Revenue => [
                5000.0, 6200.0, 7100.0, 8000.0, 9200.0, 8800.0, 9500.0, 10200.0, 11000.0,
                10800.0, 12000.0, 13500.0,
            ],
            SeriesSelector::Profit => [
                1200.0, 1800.0, 2100.0, 2400.0, 2800.0, 2600.0, 2900.0, 3200.0, 3500.0, 3300.0,
                3800.0, 4200.0,
            ],
            SeriesSelector::Expense => [
                3800.0, 4400.0, 5000.0, 5600.0, 6400.0, 6200.0, 6600.0, 7000.0, 7500.0, 7500.0,
                8200.0, 9300.0,
            ],
            SeriesSelector::BurnRate => [
                800.0, 900.0, 1000.0, 1100.0, 1300.0, 1200.0, 1400.0, 1500.0, 1600.0, 1700.0,
                1800.0, 1900.0,
            ],
            SeriesSelector::Other(_) => [0.0; 12],
        };

        Self {
            labels: MONTH_LABELS,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.values.iter().cloned().fold(f64::INFINITY, f64::min)
    }
}

/// Aggregation window for the spending widget
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpendingPeriod {
    #[default]
    #[serde(rename = "last_30d")]
    Last30Days,
    #[serde(rename = "last_3m")]
    Last3Months,
    #[serde(rename = "last_6m")]
    Last6Months,
}

impl SpendingPeriod {
    /// Parse a period key. Unknown keys fall back to `last_30d`.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "last_3m" => SpendingPeriod::Last3Months,
            "last_6m" => SpendingPeriod::Last6Months,
            _ => SpendingPeriod::Last30Days,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            SpendingPeriod::Last30Days => "last_30d",
            SpendingPeriod::Last3Months => "last_3m",
            SpendingPeriod::Last6Months => "last_6m",
        }
    }

    /// Fixed spend totals for this period
    pub fn breakdown(&self) -> SpendingBreakdown {
        match self {
            SpendingPeriod::Last30Days => SpendingBreakdown {
                software: 2450.0,
                marketing: 1850.0,
                office: 890.0,
            },
            SpendingPeriod::Last3Months => SpendingBreakdown {
                software: 7200.0,
                marketing: 5400.0,
                office: 2600.0,
            },
            SpendingPeriod::Last6Months => SpendingBreakdown {
                software: 14500.0,
                marketing: 10800.0,
                office: 5200.0,
            },
        }
    }
}

impl std::fmt::Display for SpendingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

/// Spend totals per category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpendingBreakdown {
    pub software: f64,
    pub marketing: f64,
    pub office: f64,
}

impl SpendingBreakdown {
    pub fn total(&self) -> f64 {
        self.software + self.marketing + self.office
    }
}

/// Account balance for the current refresh
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct AccountBalance {
    /// Balance after applying the delta
    pub amount: Decimal,
    /// Change shown as "this month"
    pub delta: Decimal,
}

impl AccountBalance {
    /// Recompute from a base. The delta is never accumulated across refreshes.
    ///
    /// Both inputs are taken to cents before adding, so the amount is exact.
    pub fn from_delta(base: f64, delta: f64) -> Self {
        let delta = to_cents(delta);
        Self {
            amount: to_cents(base) + delta,
            delta,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.delta > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_key() {
        assert_eq!(Theme::from_key("dark"), Theme::Dark);
        assert_eq!(Theme::from_key("light"), Theme::Light);
        assert_eq!(Theme::from_key("solarized"), Theme::Light);
        assert_eq!(Theme::from_key(""), Theme::Light);
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn test_selector_roundtrip_keys() {
        for selector in SeriesSelector::all() {
            assert_eq!(SeriesSelector::from_key(selector.as_key()), selector);
        }

        let other = SeriesSelector::from_key("churn");
        assert_eq!(other, SeriesSelector::Other("churn".to_string()));
        assert_eq!(other.label(), "Data");
        assert_eq!(other.as_key(), "churn");
    }

    #[test]
    fn test_series_shape() {
        for selector in SeriesSelector::all() {
            let series = ChartSeries::for_selector(&selector);
            assert_eq!(series.labels.len(), 12);
            assert_eq!(series.values.len(), 12);
        }

        let revenue = ChartSeries::for_selector(&SeriesSelector::Revenue);
        assert_eq!(revenue.labels[0], "Jan");
        assert_eq!(revenue.values[11], 13500.0);
        assert_eq!(revenue.max(), 13500.0);
        assert_eq!(revenue.min(), 5000.0);
    }

    #[test]
    fn test_unknown_series_is_zero() {
        let series = ChartSeries::for_selector(&SeriesSelector::from_key("nope"));
        assert_eq!(series.len(), 12);
        assert!(series.values.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_spending_lookup() {
        let last_30d = SpendingPeriod::Last30Days.breakdown();
        assert_eq!(last_30d.software, 2450.0);
        assert_eq!(last_30d.marketing, 1850.0);
        assert_eq!(last_30d.office, 890.0);
        assert_eq!(last_30d.total(), 5190.0);

        assert_eq!(SpendingPeriod::from_key("unknown"), SpendingPeriod::Last30Days);
        assert_eq!(
            SpendingPeriod::from_key("unknown").breakdown(),
            SpendingPeriod::from_key("last_30d").breakdown()
        );
        assert_eq!(SpendingPeriod::from_key("last_6m").breakdown().software, 14500.0);
    }

    #[test]
    fn test_balance_is_recomputed_from_base() {
        let up = AccountBalance::from_delta(BASE_BALANCE, 500.0);
        assert_eq!(up.amount, Decimal::new(2539050, 2));
        assert!(up.is_positive());

        let down = AccountBalance::from_delta(BASE_BALANCE, -500.0);
        assert_eq!(down.amount, Decimal::new(2439050, 2));
        assert!(!down.is_positive());

        assert!(!AccountBalance::from_delta(BASE_BALANCE, 0.0).is_positive());
        assert!(!AccountBalance::from_delta(BASE_BALANCE, 0.004).is_positive());
    }

    #[test]
    fn test_balance_has_no_float_residue() {
        let balance = AccountBalance::from_delta(0.1, 0.2);
        assert_eq!(balance.amount, Decimal::new(30, 2));

        let below_zero = AccountBalance::from_delta(100.0, -400.0);
        assert_eq!(below_zero.amount, Decimal::new(-30000, 2));
    }
}
