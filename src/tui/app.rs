//! Main TUI application loop.
//!
//! Handles:
//! - Input events (keys and bracketed paste as the drop target)
//! - Session controller integration
//! - Background prediction via the worker

use std::io;
use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::HttpPredictor;
use crate::application::SessionController;
use crate::ports::{PredictError, Predictor};
use crate::ClientConfig;

use super::ui::{
    render_footer, render_header,
    result::{render_result, ResultViewState},
    upload::{render_upload, DropZoneState},
};
use super::worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};

/// Main application state
pub struct App<P>
where
    P: Predictor + 'static,
{
    /// Session controller (owns the session and the predictor)
    controller: SessionController<P>,

    /// Endpoint shown in the header
    endpoint: String,

    drop_zone: DropZoneState,

    result_view: ResultViewState,

    /// Pending prediction worker (if running)
    pending_worker: Option<PredictionWorkerHandle>,

    /// Frame counter for the loader animation
    tick: usize,

    should_quit: bool,
}

impl App<HttpPredictor> {
    /// Create the application against the configured prediction endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let predictor = HttpPredictor::new(&config.api_url)
            .map_err(|e| anyhow!("Failed to create prediction client: {}", e))?;
        let endpoint = predictor.endpoint().to_string();

        tracing::info!("Prediction endpoint: {}", endpoint);
        Ok(Self::with_dependencies(Arc::new(predictor), endpoint))
    }
}

impl<P> App<P>
where
    P: Predictor + 'static,
{
    /// Create application with an injected predictor.
    pub fn with_dependencies(predictor: Arc<P>, endpoint: impl Into<String>) -> Self {
        Self {
            controller: SessionController::new(predictor),
            endpoint: endpoint.into(),
            drop_zone: DropZoneState::default(),
            result_view: ResultViewState::default(),
            pending_worker: None,
            tick: 0,
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();
            self.tick = self.tick.wrapping_add(1);

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(2),
                        Constraint::Min(0),
                        Constraint::Length(3),
                    ])
                    .split(f.area());

                render_header(f, chunks[0], &self.endpoint);

                let session = self.controller.session();
                match session.result() {
                    Some(result) => {
                        let body = Layout::default()
                            .direction(Direction::Horizontal)
                            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                            .split(chunks[1]);
                        render_upload(f, body[0], session, &self.drop_zone, self.tick);
                        render_result(f, body[1], result, &self.result_view);
                    }
                    None => render_upload(f, chunks[1], session, &self.drop_zone, self.tick),
                }

                render_footer(f, chunks[2], session);
            })?;

            // Short poll keeps the loader animated
            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code, key.modifiers);
                    }
                    Event::Paste(text) => self.handle_drop(&text),
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker for progress updates.
    fn poll_worker(&mut self) {
        loop {
            let Some(worker) = self.pending_worker.as_ref() else {
                return;
            };

            match worker.try_recv() {
                Ok(PredictionProgress::Uploading) => {
                    tracing::debug!("Upload in progress");
                }
                Ok(PredictionProgress::Complete { ticket, outcome }) => {
                    if self.controller.resolve(ticket, outcome) {
                        self.result_view = ResultViewState::default();
                    }
                    self.pending_worker = None;
                    return;
                }
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    let ticket = worker.ticket;
                    self.pending_worker = None;
                    self.controller.resolve(
                        ticket,
                        Err(PredictError::Transport(
                            "Prediction worker stopped unexpectedly".to_string(),
                        )),
                    );
                    return;
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(key, KeyCode::Char('q') | KeyCode::Char('c')) {
                self.should_quit = true;
            }
            return;
        }

        match key {
            KeyCode::Enter => {
                if self.drop_zone.input.trim().is_empty() {
                    self.drop_zone.input.clear();
                    self.submit();
                } else {
                    let text = self.drop_zone.take_input();
                    self.handle_drop(&text);
                }
            }
            KeyCode::Esc => self.clear(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                if self.controller.session().result().is_some() {
                    self.result_view.next_tab();
                }
            }
            KeyCode::Backspace => self.drop_zone.delete_char(),
            KeyCode::Char(c) => self.drop_zone.input_char(c),
            _ => {}
        }
    }

    /// Feed dropped or typed text to the drop filter.
    fn handle_drop(&mut self, text: &str) {
        match self.controller.on_text_dropped(text) {
            Ok(()) => {
                self.drop_zone = DropZoneState::default();
                self.result_view = ResultViewState::default();
                // Any in-flight request now belongs to an abandoned submission.
                self.pending_worker = None;
            }
            Err(e) => self.drop_zone.reject(e.to_string()),
        }
    }

    fn submit(&mut self) {
        if let Some(pending) = self.controller.begin_submit() {
            let worker = PredictionWorker::spawn(self.controller.predictor(), pending);
            self.pending_worker = Some(worker);
        }
    }

    fn clear(&mut self) {
        if !self.controller.session().can_clear() {
            return;
        }
        self.controller.clear();
        self.pending_worker = None;
        self.drop_zone = DropZoneState::default();
        self.result_view = ResultViewState::default();
    }
}
