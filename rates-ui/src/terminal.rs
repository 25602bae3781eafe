//! Terminal ownership and the dashboard event loop.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use rates_core::RatesApi;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{info, warn};

use crate::app::{self, Dispatcher};
use crate::keymap::map_key;
use crate::logging;
use crate::messages::AppMessage;
use crate::state::AppState;
use crate::views::render_dashboard;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);

fn setup_terminal() -> io::Result<Tui> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn teardown_terminal(terminal: &mut Tui) -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Run the dashboard until the user quits.
///
/// Must be called from inside a multi-threaded tokio runtime; the loop
/// itself blocks, effects run as tasks on the runtime.
pub fn run_dashboard(
    api: Arc<dyn RatesApi>,
    current_year: i32,
    log_file: &Path,
) -> anyhow::Result<()> {
    // Raw mode and log lines on stdout don't mix.
    if let Err(e) = logging::enable_file_logging(log_file) {
        warn!("{e:#}");
    }
    if let Err(e) = logging::set_stdout_enabled(false) {
        warn!("{e:#}");
    }
    info!(log_file = %log_file.display(), "starting dashboard");

    let result = tokio::task::block_in_place(|| {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(api, tx, Handle::current());
        let mut state = AppState::new(current_year);
        dispatcher.dispatch(app::init(&mut state));

        let mut terminal = setup_terminal().context("failed to initialise terminal")?;
        let looped = event_loop(&mut terminal, &mut state, &dispatcher, &mut rx);
        teardown_terminal(&mut terminal).context("failed to restore terminal")?;
        looped.context("dashboard loop failed")
    });

    info!("dashboard closed");
    logging::disable_file_logging();
    if let Err(e) = logging::set_stdout_enabled(true) {
        warn!("{e:#}");
    }
    result
}

fn event_loop(
    terminal: &mut Tui,
    state: &mut AppState,
    dispatcher: &Dispatcher,
    rx: &mut UnboundedReceiver<AppMessage>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render_dashboard(frame, state))?;

        if state.should_quit {
            return Ok(());
        }

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                dispatcher.dispatch(app::handle_key(state, map_key(key)));
            }
        }

        while let Ok(msg) = rx.try_recv() {
            dispatcher.dispatch(app::update(state, msg));
        }
    }
}
