use crate::config::UiConfig;
use crate::event::{action_for, Action};
use crate::ui;
use crate::view::{TweetView, ViewState};
use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

pub struct App {
    view: TweetView,
    title: String,
    tick_rate: Duration,
    scroll: usize,
    seen_batches: u64,
    should_quit: bool,
}

impl App {
    pub fn new(view: TweetView, config: &UiConfig) -> Self {
        Self {
            view,
            title: config.title.clone(),
            tick_rate: config.tick_rate(),
            scroll: 0,
            seen_batches: 0,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Generate => {
                self.view.activate();
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            Action::ScrollDown => {
                let max = ui::max_scroll(&self.view.snapshot());
                self.scroll = (self.scroll + 1).min(max);
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Current view state with the scroll offset fitted to it. A new batch
    /// starts back at the first card.
    pub fn refresh(&mut self) -> ViewState {
        let state = self.view.snapshot();
        if state.batches != self.seen_batches {
            self.seen_batches = state.batches;
            self.scroll = 0;
        }
        self.scroll = self.scroll.min(ui::max_scroll(&state));
        state
    }

    /// Draws on every tick or input event until a quit action arrives.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.tick_rate);

        while !self.should_quit {
            let state = self.refresh();
            terminal
                .draw(|frame| ui::draw(frame, &state, &self.title, self.scroll))
                .context("Failed to draw frame")?;

            tokio::select! {
                _ = ticker.tick() => {}
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(action) = action_for(key) {
                            self.handle_action(action);
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                    None => break,
                },
            }
        }

        Ok(())
    }
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
