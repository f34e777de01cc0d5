//! View Renderer
//!
//! Applies generated data to the display surface:
//!
//! - transaction feed, capped at the feed capacity, newest first
//! - account balance and its change marker
//! - spending breakdown rows
//! - the main chart instance
//!
//! A missing target element is never an error: the display part of the
//! operation is skipped and the view model is still updated.

use std::time::Instant;

use crate::chart::{ChartBackend, ChartConfig, ChartHandle};
use crate::model::{
    usd_fixed, usd_grouped, AccountBalance, SpendingBreakdown, SpendingPeriod, Transaction,
    TransactionFeed, BASE_BALANCE, DEFAULT_FEED_CAPACITY,
};
use crate::surface::{ids, DisplaySurface, Element};

/// Category rows of the spending widget with their fixed colors
const SPENDING_ROWS: [(&str, &str); 3] = [
    ("Software", "#3b82f6"),
    ("Marketing", "#ef4444"),
    ("Office", "#10b981"),
];

const TRANSACTION_ITEM: &str = "transaction-item";

/// Writes view-model updates into a display surface
pub struct ViewRenderer {
    surface: Box<dyn DisplaySurface>,
    backend: Box<dyn ChartBackend>,
    chart: Option<Box<dyn ChartHandle>>,
    feed: TransactionFeed,
    base_balance: f64,
    balance: Option<AccountBalance>,
    spending: Option<SpendingPeriod>,
}

impl ViewRenderer {
    pub fn new(surface: Box<dyn DisplaySurface>, backend: Box<dyn ChartBackend>) -> Self {
        Self {
            surface,
            backend,
            chart: None,
            feed: TransactionFeed::new(DEFAULT_FEED_CAPACITY),
            base_balance: BASE_BALANCE,
            balance: None,
            spending: None,
        }
    }

    /// Builder: number of visible transactions
    pub fn feed_capacity(mut self, capacity: usize) -> Self {
        self.feed = TransactionFeed::new(capacity);
        self
    }

    /// Builder: base the balance is recomputed from
    pub fn base_balance(mut self, base: f64) -> Self {
        self.base_balance = base;
        self
    }

    /// Prepend a transaction, evicting the oldest beyond capacity
    pub fn apply_transaction(&mut self, transaction: Transaction) {
        let element = transaction_element(&transaction);
        let capacity = self.feed.capacity();

        if let Some(evicted) = self.feed.push(transaction) {
            tracing::trace!(name = %evicted.name, "Evicted transaction from feed");
        }

        let Some(list) = self.surface.element_mut(ids::TRANSACTION_LIST) else {
            tracing::debug!("Transaction list not present, skipping render");
            return;
        };

        list.children.insert(0, element);

        // The list may hold non-item children; only items count toward the cap
        let visible = list.children_with_class(TRANSACTION_ITEM).count();
        if visible > capacity {
            if let Some(oldest) = list
                .children
                .iter()
                .rposition(|c| c.has_class(TRANSACTION_ITEM))
            {
                list.children.remove(oldest);
            }
        }
    }

    /// Render `base + delta` and the signed change
    pub fn apply_balance(&mut self, delta: f64) -> AccountBalance {
        let balance = AccountBalance::from_delta(self.base_balance, delta);
        self.balance = Some(balance);

        let (sign, marker) = if balance.is_positive() {
            ("+", "positive")
        } else {
            ("-", "negative")
        };

        if self.surface.element(ids::BALANCE_AMOUNT).is_none()
            || self.surface.element(ids::BALANCE_CHANGE).is_none()
        {
            tracing::debug!("Balance elements not present, skipping render");
            return balance;
        }

        if let Some(amount) = self.surface.element_mut(ids::BALANCE_AMOUNT) {
            amount.set_text(usd_fixed(balance.amount));
        }
        if let Some(change) = self.surface.element_mut(ids::BALANCE_CHANGE) {
            change.set_text(format!("{}{} this month", sign, usd_fixed(balance.delta.abs())));
            change.set_classes(&["balance-change", marker]);
        }

        balance
    }

    /// Replace the spending rows with the totals for `period`
    pub fn apply_spending(&mut self, period: SpendingPeriod) -> SpendingBreakdown {
        let breakdown = period.breakdown();
        self.spending = Some(period);

        let Some(list) = self.surface.element_mut(ids::SPENDING_LIST) else {
            tracing::debug!("Spending list not present, skipping render");
            return breakdown;
        };

        let amounts = [breakdown.software, breakdown.marketing, breakdown.office];
        let rows = SPENDING_ROWS
            .iter()
            .zip(amounts)
            .map(|((label, color), amount)| {
                Element::new("spending-item")
                    .child(
                        Element::new("spending-category")
                            .text(*label)
                            .attr("color", *color),
                    )
                    .child(Element::new("spending-amount").text(usd_grouped(amount)))
            })
            .collect();

        list.replace_children(rows);
        breakdown
    }

    /// Create or update the main chart and redraw it
    pub fn apply_chart(&mut self, config: &ChartConfig) {
        let Some(target) = self.surface.element_mut(ids::MAIN_CHART) else {
            tracing::debug!("Chart target not present, skipping render");
            return;
        };

        let started = Instant::now();
        match self.chart.as_mut() {
            Some(handle) => handle.update(config),
            None => self.chart = Some(self.backend.create(ids::MAIN_CHART, config)),
        }

        if let Some(handle) = self.chart.as_ref() {
            target.replace_children(handle.draw());
        }
        tracing::debug!(elapsed_us = started.elapsed().as_micros() as u64, "Chart rendered");
    }

    pub fn feed(&self) -> &TransactionFeed {
        &self.feed
    }

    /// Last rendered balance
    pub fn balance(&self) -> Option<AccountBalance> {
        self.balance
    }

    /// Last rendered spending period
    pub fn spending_period(&self) -> Option<SpendingPeriod> {
        self.spending
    }

    pub fn chart_config(&self) -> Option<&ChartConfig> {
        self.chart.as_ref().map(|h| h.config())
    }

    pub fn surface(&self) -> &dyn DisplaySurface {
        self.surface.as_ref()
    }
}

fn transaction_element(transaction: &Transaction) -> Element {
    let marker = if transaction.is_positive() {
        "positive"
    } else {
        "negative"
    };

    Element::new(TRANSACTION_ITEM)
        .child(
            Element::new("transaction-info")
                .child(Element::new("transaction-name").text(transaction.name.clone()))
                .child(
                    Element::new("transaction-category").text(transaction.category.to_string()),
                ),
        )
        .child(
            Element::new("transaction-amount")
                .class(marker)
                .text(transaction.display_amount()),
        )
}
