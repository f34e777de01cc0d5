//! Dashboard Application Context
//!
//! Owns the theme store, mock data generator, chart adapter, renderer and
//! refresh timers. All view state is mutated from one place: either directly
//! through the methods below or from the [`Dashboard::run`] loop, which
//! multiplexes refresh ticks and user commands.
//!
//! ```text
//! ThemeStore ──set──▶ ChartDataAdapter ──config──▶ ViewRenderer.apply_chart
//! RefreshScheduler ──tick──▶ MockDataGenerator ──record──▶ ViewRenderer.apply_*
//! ```

use tokio::sync::{mpsc, watch};

use crate::chart::{ChartBackend, ChartDataAdapter};
use crate::config::DashboardConfig;
use crate::mock::MockDataGenerator;
use crate::model::{SeriesSelector, SpendingPeriod, Theme};
use crate::render::ViewRenderer;
use crate::scheduler::{RefreshScheduler, RefreshTick, TickStats, TimerSet};
use crate::store::KeyValueStore;
use crate::surface::DisplaySurface;
use crate::theme::ThemeStore;

/// User-initiated changes routed through the run loop
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetTheme(Theme),
    ToggleTheme,
    SwitchChart(SeriesSelector),
    SelectPeriod(SpendingPeriod),
    Shutdown,
}

/// The run loop has exited
#[derive(Debug, thiserror::Error)]
#[error("Dashboard is not running")]
pub struct DashboardClosed;

/// Sends commands to a running dashboard
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl DashboardHandle {
    pub fn send(&self, command: Command) -> Result<(), DashboardClosed> {
        self.tx.send(command).map_err(|_| DashboardClosed)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), DashboardClosed> {
        self.send(Command::SetTheme(theme))
    }

    pub fn toggle_theme(&self) -> Result<(), DashboardClosed> {
        self.send(Command::ToggleTheme)
    }

    pub fn switch_chart(&self, selector: SeriesSelector) -> Result<(), DashboardClosed> {
        self.send(Command::SwitchChart(selector))
    }

    pub fn select_period(&self, period: SpendingPeriod) -> Result<(), DashboardClosed> {
        self.send(Command::SelectPeriod(period))
    }

    pub fn shutdown(&self) -> Result<(), DashboardClosed> {
        self.send(Command::Shutdown)
    }
}

/// Create a command channel for [`Dashboard::run`]
pub fn command_channel() -> (DashboardHandle, mpsc::UnboundedReceiver<Command>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DashboardHandle { tx }, rx)
}

/// The dashboard application context
pub struct Dashboard {
    themes: ThemeStore,
    generator: MockDataGenerator,
    adapter: ChartDataAdapter,
    renderer: ViewRenderer,
    scheduler: RefreshScheduler,
    series: SeriesSelector,
    period: SpendingPeriod,
    timers: TimerSet,
    started: bool,
}

impl Dashboard {
    pub fn new(
        config: &DashboardConfig,
        store: Box<dyn KeyValueStore>,
        surface: Box<dyn DisplaySurface>,
        backend: Box<dyn ChartBackend>,
        generator: MockDataGenerator,
    ) -> Self {
        let renderer = ViewRenderer::new(surface, backend)
            .feed_capacity(config.feed_capacity)
            .base_balance(config.base_balance);

        Self {
            themes: ThemeStore::new(store),
            generator: generator.balance_range(config.base_balance, config.max_fluctuation),
            adapter: ChartDataAdapter,
            renderer,
            scheduler: RefreshScheduler::new(config.schedule()),
            series: config.series(),
            period: config.period(),
            timers: TimerSet::new(),
            started: false,
        }
    }

    /// Initial render: chart for the restored theme, a first balance and the
    /// spending breakdown.
    pub fn start(&mut self) {
        tracing::info!(
            theme = %self.themes.get(),
            series = %self.series,
            period = %self.period,
            "Dashboard starting"
        );

        self.refresh_chart();
        self.refresh_balance();
        self.renderer.apply_spending(self.period);
        self.started = true;
    }

    pub fn theme(&self) -> Theme {
        self.themes.get()
    }

    /// Persist the theme and redraw the chart with its palette
    pub fn set_theme(&mut self, theme: Theme) {
        self.themes.set(theme);
        self.refresh_chart();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.themes.toggle();
        self.refresh_chart();
        theme
    }

    /// Observe theme changes
    pub fn subscribe_theme(&self) -> watch::Receiver<Theme> {
        self.themes.subscribe()
    }

    pub fn series(&self) -> &SeriesSelector {
        &self.series
    }

    /// Chart another series
    pub fn switch_chart(&mut self, selector: SeriesSelector) {
        tracing::info!(series = %selector, "Switching chart");
        self.series = selector;
        self.refresh_chart();
    }

    pub fn period(&self) -> SpendingPeriod {
        self.period
    }

    /// Show spending for another period
    pub fn select_period(&mut self, period: SpendingPeriod) {
        tracing::info!(period = %period, "Switching spending period");
        self.period = period;
        self.renderer.apply_spending(period);
    }

    /// Generate and render the record a tick asks for
    pub fn handle_tick(&mut self, tick: RefreshTick) {
        match tick {
            RefreshTick::Transaction => {
                let transaction = self.generator.next_transaction();
                tracing::info!(
                    name = %transaction.name,
                    category = %transaction.category,
                    amount = %transaction.amount,
                    "New transaction"
                );
                self.renderer.apply_transaction(transaction);
            }
            RefreshTick::Balance => self.refresh_balance(),
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetTheme(theme) => self.set_theme(theme),
            Command::ToggleTheme => {
                self.toggle_theme();
            }
            Command::SwitchChart(selector) => self.switch_chart(selector),
            Command::SelectPeriod(period) => self.select_period(period),
            Command::Shutdown => self.shutdown(),
        }
    }

    /// Start the refresh timers and process ticks and commands until a
    /// shutdown command arrives or every [`DashboardHandle`] is dropped.
    /// Timers are cancelled before returning.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) -> Self {
        if !self.started {
            self.start();
        }

        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        self.timers = self.scheduler.start(tick_tx);

        loop {
            tokio::select! {
                Some(tick) = tick_rx.recv() => self.handle_tick(tick),
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
            }
        }

        self.shutdown();
        self
    }

    /// Cancel the refresh timers
    pub fn shutdown(&mut self) {
        if !self.timers.is_empty() {
            self.timers.shutdown();
            tracing::info!("Dashboard stopped");
        }
    }

    pub fn active_timers(&self) -> usize {
        self.timers.active_count()
    }

    pub fn tick_stats(&self) -> TickStats {
        self.scheduler.stats()
    }

    pub fn renderer(&self) -> &ViewRenderer {
        &self.renderer
    }

    fn refresh_chart(&mut self) {
        let config = self.adapter.build_config(&self.series, self.themes.get());
        self.renderer.apply_chart(&config);
    }

    fn refresh_balance(&mut self) {
        let delta = self.generator.balance_delta();
        let balance = self.renderer.apply_balance(delta);
        tracing::info!(amount = %balance.amount, delta = %balance.delta, "Balance refreshed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::TextChartBackend;
    use crate::model::{to_cents, BASE_BALANCE};
    use rust_decimal::Decimal;
    use crate::store::MemoryStore;
    use crate::surface::{ids, MemorySurface};
    use crate::theme::THEME_KEY;
    use std::time::Duration;

    fn dashboard_with(store: MemoryStore) -> Dashboard {
        Dashboard::new(
            &DashboardConfig::default(),
            Box::new(store),
            Box::new(MemorySurface::dashboard_layout()),
            Box::new(TextChartBackend),
            MockDataGenerator::seeded(11),
        )
    }

    fn chart_line_color(dashboard: &Dashboard) -> String {
        let chart = dashboard.renderer().surface().element(ids::MAIN_CHART).unwrap();
        chart.find_class("chart-line").unwrap().attributes["color"].clone()
    }

    #[test]
    fn test_start_renders_everything() {
        let mut dashboard = dashboard_with(MemoryStore::new());
        dashboard.start();

        let renderer = dashboard.renderer();
        let balance = renderer.balance().unwrap();
        assert!((balance.amount - to_cents(BASE_BALANCE)).abs() <= Decimal::from(500));
        assert_eq!(renderer.spending_period(), Some(SpendingPeriod::Last30Days));
        assert_eq!(renderer.chart_config().unwrap().data.datasets[0].label, "Revenue");
        assert_eq!(chart_line_color(&dashboard), "#000000");
        assert!(renderer.feed().is_empty());
    }

    #[test]
    fn test_start_restores_dark_theme() {
        let mut dashboard = dashboard_with(MemoryStore::new().with(THEME_KEY, "dark"));
        dashboard.start();

        assert_eq!(dashboard.theme(), Theme::Dark);
        assert_eq!(chart_line_color(&dashboard), "#ffffff");
    }

    #[test]
    fn test_theme_change_redraws_chart() {
        let mut dashboard = dashboard_with(MemoryStore::new());
        dashboard.start();
        let mut observer = dashboard.subscribe_theme();
        let light_values = dashboard.renderer().chart_config().unwrap().data.datasets[0]
            .data
            .clone();

        assert_eq!(dashboard.toggle_theme(), Theme::Dark);
        assert!(observer.has_changed().unwrap());
        assert_eq!(*observer.borrow_and_update(), Theme::Dark);

        let config = dashboard.renderer().chart_config().unwrap();
        assert_eq!(config.data.datasets[0].data, light_values);
        assert_eq!(config.data.datasets[0].border_color, "#ffffff");
        assert_eq!(chart_line_color(&dashboard), "#ffffff");

        dashboard.set_theme(Theme::Light);
        assert_eq!(chart_line_color(&dashboard), "#000000");
    }

    #[test]
    fn test_switch_chart_and_period() {
        let mut dashboard = dashboard_with(MemoryStore::new());
        dashboard.start();

        dashboard.switch_chart(SeriesSelector::BurnRate);
        assert_eq!(dashboard.series(), &SeriesSelector::BurnRate);
        let chart = dashboard.renderer().surface().element(ids::MAIN_CHART).unwrap();
        assert_eq!(chart.find_class("chart-title").unwrap().text, "Burn Rate");

        dashboard.switch_chart(SeriesSelector::from_key("ltv"));
        let config = dashboard.renderer().chart_config().unwrap();
        assert!(config.data.datasets[0].data.iter().all(|v| *v == 0.0));

        dashboard.select_period(SpendingPeriod::Last3Months);
        assert_eq!(dashboard.period(), SpendingPeriod::Last3Months);
        let spending = dashboard.renderer().surface().element(ids::SPENDING_LIST).unwrap();
        assert_eq!(
            spending.children[0].find_class("spending-amount").unwrap().text,
            "$7,200"
        );
    }

    #[test]
    fn test_ticks_update_feed_and_balance() {
        let mut dashboard = dashboard_with(MemoryStore::new());
        dashboard.start();

        for _ in 0..8 {
            dashboard.handle_tick(RefreshTick::Transaction);
        }
        assert_eq!(dashboard.renderer().feed().len(), 5);
        let list = dashboard
            .renderer()
            .surface()
            .element(ids::TRANSACTION_LIST)
            .unwrap();
        assert_eq!(list.children.len(), 5);

        dashboard.handle_tick(RefreshTick::Balance);
        let balance = dashboard.renderer().balance().unwrap();
        assert_eq!(balance.amount, to_cents(BASE_BALANCE) + balance.delta);
    }

    #[test]
    fn test_commands_route_to_methods() {
        let mut dashboard = dashboard_with(MemoryStore::new());
        dashboard.start();

        dashboard.handle_command(Command::SetTheme(Theme::Dark));
        assert_eq!(dashboard.theme(), Theme::Dark);

        dashboard.handle_command(Command::ToggleTheme);
        assert_eq!(dashboard.theme(), Theme::Light);

        dashboard.handle_command(Command::SwitchChart(SeriesSelector::Profit));
        assert_eq!(dashboard.series(), &SeriesSelector::Profit);

        dashboard.handle_command(Command::SelectPeriod(SpendingPeriod::Last6Months));
        assert_eq!(dashboard.period(), SpendingPeriod::Last6Months);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_refreshes_until_shutdown() {
        let dashboard = dashboard_with(MemoryStore::new());
        let (handle, commands) = command_channel();
        let task = tokio::spawn(dashboard.run(commands));

        tokio::time::sleep(Duration::from_secs(95)).await;
        handle.switch_chart(SeriesSelector::Expense).unwrap();
        handle.shutdown().unwrap();

        let dashboard = task.await.unwrap();
        let stats = dashboard.tick_stats();
        assert_eq!(stats.transaction_ticks, 3);
        assert_eq!(stats.balance_ticks, 1);
        assert_eq!(dashboard.renderer().feed().len(), 3);
        assert_eq!(dashboard.series(), &SeriesSelector::Expense);
        assert_eq!(dashboard.active_timers(), 0);

        assert!(handle.toggle_theme().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_stops_when_handles_drop() {
        let dashboard = dashboard_with(MemoryStore::new());
        let (handle, commands) = command_channel();
        let task = tokio::spawn(dashboard.run(commands));

        tokio::time::sleep(Duration::from_secs(31)).await;
        drop(handle);

        let dashboard = task.await.unwrap();
        assert_eq!(dashboard.tick_stats().transaction_ticks, 1);
        assert_eq!(dashboard.active_timers(), 0);
    }
}
