//! Refresh Scheduler
//!
//! Two independent repeating timers drive the dashboard refresh:
//!
//! - transaction feed, every 30 seconds
//! - account balance, every 60 seconds
//!
//! Timers only emit [`RefreshTick`]s; the dashboard run loop does the work.
//! Every timer is returned as a [`TimerHandle`] and collected into a
//! [`TimerSet`], which cancels all of them on shutdown or drop.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Which refresh is due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshTick {
    Transaction,
    Balance,
}

/// A running repeating timer
#[derive(Debug)]
pub struct TimerHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stop the timer. Pending callbacks never run after this returns.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

/// Run `callback` every `period`, first one full period from now.
///
/// The timer stops when the callback returns `ControlFlow::Break` or the
/// handle is cancelled.
pub fn schedule<F>(name: &'static str, period: Duration, mut callback: F) -> TimerHandle
where
    F: FnMut() -> ControlFlow<()> + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    let start = Instant::now() + period;

    let task = tokio::spawn(async move {
        let mut interval = interval_at(start, period);

        loop {
            interval.tick().await;

            if callback().is_break() {
                tracing::debug!(timer = name, "Timer stopped by callback");
                break;
            }
        }
    });

    tracing::debug!(timer = name, period_ms = period.as_millis() as u64, "Timer scheduled");
    TimerHandle { name, task }
}

/// Owns timers and cancels them together
#[derive(Debug, Default)]
pub struct TimerSet {
    handles: Vec<TimerHandle>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: TimerHandle) {
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.handles.iter().filter(|h| h.is_active()).count()
    }

    /// Cancel and release every timer
    pub fn shutdown(&mut self) {
        for handle in self.handles.drain(..) {
            handle.cancel();
            tracing::debug!(timer = handle.name(), "Timer cancelled");
        }
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Refresh intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub transaction_interval: Duration,
    pub balance_interval: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            transaction_interval: Duration::from_secs(30),
            balance_interval: Duration::from_secs(60),
        }
    }
}

/// Tick counters since the scheduler was created
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickStats {
    pub transaction_ticks: u64,
    pub balance_ticks: u64,
    pub last_transaction: Option<DateTime<Utc>>,
    pub last_balance: Option<DateTime<Utc>>,
}

impl TickStats {
    fn record(&mut self, tick: RefreshTick) {
        let now = Utc::now();
        match tick {
            RefreshTick::Transaction => {
                self.transaction_ticks += 1;
                self.last_transaction = Some(now);
            }
            RefreshTick::Balance => {
                self.balance_ticks += 1;
                self.last_balance = Some(now);
            }
        }
    }
}

/// Starts the transaction and balance timers
pub struct RefreshScheduler {
    config: ScheduleConfig,
    stats: Arc<Mutex<TickStats>>,
}

impl RefreshScheduler {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config,
            stats: Arc::new(Mutex::new(TickStats::default())),
        }
    }

    pub fn config(&self) -> ScheduleConfig {
        self.config
    }

    /// Start both timers, sending ticks to `sink`.
    ///
    /// A timer stops on its own once `sink` is closed.
    pub fn start(&self, sink: mpsc::UnboundedSender<RefreshTick>) -> TimerSet {
        let mut timers = TimerSet::new();

        timers.push(self.timer(
            "transactions",
            self.config.transaction_interval,
            RefreshTick::Transaction,
            sink.clone(),
        ));
        timers.push(self.timer(
            "balance",
            self.config.balance_interval,
            RefreshTick::Balance,
            sink,
        ));

        tracing::info!(
            transaction_secs = self.config.transaction_interval.as_secs_f64(),
            balance_secs = self.config.balance_interval.as_secs_f64(),
            "Refresh timers started"
        );
        timers
    }

    fn timer(
        &self,
        name: &'static str,
        period: Duration,
        tick: RefreshTick,
        sink: mpsc::UnboundedSender<RefreshTick>,
    ) -> TimerHandle {
        let stats = Arc::clone(&self.stats);

        schedule(name, period, move || {
            if sink.send(tick).is_err() {
                return ControlFlow::Break(());
            }

            if let Ok(mut stats) = stats.lock() {
                stats.record(tick);
            }
            ControlFlow::Continue(())
        })
    }

    pub fn stats(&self) -> TickStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }
}
