//! Interactive dashboard.
//!
//! A blocking thread reads crossterm key events; the async loop multiplexes
//! them with store events coming back from the executor and redraws after
//! each one.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use provdash_client::Backend;
use provdash_runtime::{Action, ChartStyle, Event, Executor, Store, View};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::Tabs,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::presentation::presenters::{
    build_dashboard, build_provider_detail, build_provider_list, build_review_queue, notice,
};
use crate::presentation::views::tui::components::{
    DashboardComponent, DetailComponent, ProviderListComponent, ReviewQueueComponent,
};
use crate::presentation::views::tui::{ConfirmView, StatusBarView};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const TICK_RATE: Duration = Duration::from_millis(500);

const TABS: [&str; 3] = ["1 Dashboard", "2 Providers", "3 Manual Review"];

const DASHBOARD_HINTS: &[(&str, &str)] = &[
    ("d/w/f", "batch"),
    ("p", "report"),
    ("t", "chart"),
    ("r", "reload"),
    ("q", "quit"),
];
const PROVIDER_HINTS: &[(&str, &str)] = &[
    ("/", "search"),
    ("enter", "open"),
    ("r", "reload"),
    ("q", "quit"),
];
const DETAIL_HINTS: &[(&str, &str)] = &[("e", "explain"), ("esc", "back"), ("q", "quit")];
const REVIEW_HINTS: &[(&str, &str)] = &[
    ("a", "approve"),
    ("x", "reject"),
    ("o", "override"),
    ("e", "explain"),
    ("q", "quit"),
];

enum Input {
    Key(KeyEvent),
    Store(Event),
    Tick,
}

pub struct TuiRenderer<B> {
    store: Store,
    executor: Executor<B>,
    events: UnboundedReceiver<Event>,
    trend_len: usize,
    dashboard: DashboardComponent,
    providers: ProviderListComponent,
    detail: DetailComponent,
    review: ReviewQueueComponent,
    shown_detail: Option<View>,
    should_quit: bool,
}

impl<B: Backend> TuiRenderer<B> {
    pub fn new(
        store: Store,
        executor: Executor<B>,
        events: UnboundedReceiver<Event>,
        chart_style: ChartStyle,
        trend_len: usize,
    ) -> Self {
        Self {
            store,
            executor,
            events,
            trend_len,
            dashboard: DashboardComponent::new(chart_style),
            providers: ProviderListComponent::new(),
            detail: DetailComponent::new(),
            review: ReviewQueueComponent::new(),
            shown_detail: None,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let (key_tx, mut keys) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));
        let reader = spawn_key_reader(key_tx, Arc::clone(&stop));

        let result = self.event_loop(&mut terminal, &mut keys).await;

        stop.store(true, Ordering::Relaxed);
        if reader.join().is_err() {
            warn!("key reader thread panicked");
        }
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        keys: &mut UnboundedReceiver<KeyEvent>,
    ) -> Result<()> {
        info!("dashboard started");
        let effects = self.store.reload();
        self.executor.execute_all(effects);

        let mut tick = tokio::time::interval(TICK_RATE);

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            let input = tokio::select! {
                Some(key) = keys.recv() => Input::Key(key),
                Some(event) = self.events.recv() => Input::Store(event),
                _ = tick.tick() => Input::Tick,
            };

            match input {
                Input::Key(key) => self.on_key(key),
                Input::Store(event) => {
                    let effects = self.store.apply(event);
                    self.executor.execute_all(effects);
                }
                Input::Tick => {}
            }
        }

        info!("dashboard closed");
        Ok(())
    }

    fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        let effects = self.store.dispatch(action);
        self.executor.execute_all(effects);

        let view = self.store.state().view;
        if matches!(view, View::Detail(_)) && self.shown_detail != Some(view) {
            self.detail.reset();
            self.shown_detail = Some(view);
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let state = self.store.state();

        if state.pending_confirmation.is_some() {
            let action = match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Action::ConfirmPending),
                KeyCode::Char('n') | KeyCode::Esc => Some(Action::CancelPending),
                _ => None,
            };
            if let Some(action) = action {
                self.dispatch(action);
            }
            return;
        }

        let view = state.view;
        let capturing = match view {
            View::Providers => self.providers.is_capturing_input(),
            View::ManualReview => self.review.is_capturing_input(),
            _ => false,
        };

        if !capturing {
            let global = match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('1') => Some(Action::Navigate(View::Dashboard)),
                KeyCode::Char('2') => Some(Action::Navigate(View::Providers)),
                KeyCode::Char('3') => Some(Action::Navigate(View::ManualReview)),
                KeyCode::Char('r') => Some(Action::Reload),
                KeyCode::Char('c') => Some(Action::DismissNotices),
                KeyCode::Esc | KeyCode::Backspace if state.can_go_back() => Some(Action::Back),
                _ => None,
            };
            if let Some(action) = global {
                self.dispatch(action);
                return;
            }
        }

        let action = match view {
            View::Dashboard => self.dashboard.handle_input(key),
            View::Providers => {
                let model = build_provider_list(
                    &state.filtered_providers(),
                    state.providers.len(),
                    &state.search,
                );
                self.providers.handle_input(key, &model)
            }
            View::Detail(_) => {
                let model = state.current_detail().and_then(build_provider_detail);
                self.detail.handle_input(key, model.as_ref())
            }
            View::ManualReview => {
                let model = build_review_queue(state);
                self.review.handle_input(key, &model)
            }
        };
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        let [tabs_area, body, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(f.area());

        let state = self.store.state();

        let selected = match state.view {
            View::Dashboard => 0,
            View::Providers | View::Detail(_) => 1,
            View::ManualReview => 2,
        };
        let tabs = Tabs::new(TABS.to_vec())
            .select(selected)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, tabs_area);

        let hints = match state.view {
            View::Dashboard => {
                let model = state
                    .stats
                    .as_ref()
                    .map(|stats| build_dashboard(stats, state.pending_reviews.len(), self.trend_len));
                self.dashboard.render(f, body, model.as_ref());
                DASHBOARD_HINTS
            }
            View::Providers => {
                let model = build_provider_list(
                    &state.filtered_providers(),
                    state.providers.len(),
                    &state.search,
                );
                self.providers.render(f, body, &model);
                PROVIDER_HINTS
            }
            View::Detail(_) => {
                self.detail.render(f, body, state.current_detail());
                DETAIL_HINTS
            }
            View::ManualReview => {
                let model = build_review_queue(state);
                self.review.render(f, body, &model);
                REVIEW_HINTS
            }
        };

        let latest = state.latest_notice().map(notice);
        let mut status = StatusBarView::new(latest.as_ref(), hints);
        if state.reloading {
            status = status.with_busy("loading");
        }
        if state.batch_running {
            status = status.with_busy("batch");
        }
        if state.report_downloading {
            status = status.with_busy("report");
        }
        f.render_widget(status, status_area);

        if let Some(confirmation) = &state.pending_confirmation {
            let prompt = confirmation.to_string();
            f.render_widget(ConfirmView::new(&prompt), f.area());
        }
    }
}

fn spawn_key_reader(tx: UnboundedSender<KeyEvent>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => match event::read() {
                    Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!(error = %err, "failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => {}
                Err(err) => {
                    warn!(error = %err, "failed to poll terminal");
                    break;
                }
            }
        }
    })
}
