// /app.rs
use crate::{
    ai::TurnResolver,
    ai_response::TurnOutcome,
    error::AIError,
    game::{GameSession, PendingTurn},
    settings::Settings,
    tui::{Tui, TuiEvent},
    ui::{self, spinner::Spinner},
};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tui_textarea::TextArea;

pub enum Action {
    Quit,
    Submit,
    ReportCompliance,
    Reset,
    ScrollUp(usize),
    ScrollDown(usize),
    TurnResolved(Box<TurnResolution>),
}

pub struct TurnResolution {
    pub pending: PendingTurn,
    pub result: std::result::Result<TurnOutcome, AIError>,
}

pub struct App {
    // Application state and control flow
    running: bool,
    settings: Settings,
    pub(crate) console_message: Option<String>,

    // --- Game
    pub(crate) session: GameSession,
    resolver: TurnResolver,

    // --- UI elements
    pub(crate) input: TextArea<'static>,
    pub(crate) spinner: Spinner,
    pub(crate) transcript_scroll: usize,
    pub(crate) follow_bottom: bool,
    pub(crate) total_lines: usize,
    pub(crate) visible_lines: usize,

    action_sender: mpsc::UnboundedSender<Action>,
    action_receiver: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let resolver = TurnResolver::from_settings(&settings);
        Self::with_resolver(settings, resolver)
    }

    pub fn with_resolver(settings: Settings, resolver: TurnResolver) -> Self {
        let (action_sender, action_receiver) = mpsc::unbounded_channel();

        let console_message = (!settings.has_api_key()).then(|| {
            "OpenAI API key is not set: export OPENAI_API_KEY or add it to ~/nogashio/data/settings.json"
                .to_string()
        });

        Self {
            running: true,
            settings,
            console_message,

            session: GameSession::new(),
            resolver,

            input: ui::new_textarea(),
            spinner: Spinner::new(),
            transcript_scroll: 0,
            follow_bottom: true,
            total_lines: 0,
            visible_lines: 0,

            action_sender,
            action_receiver,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join(" ")
    }

    // Asynchronous function to continuously run and update the application.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(10.0) // spinner speed
            .frame_rate(30.0);

        tui.enter()?; // Starts event handler, enters raw mode, enters alternate screen
        log::info!("Playing with model {}", self.resolver.model());

        while self.running {
            tui.draw(|frame| ui::draw(frame, self))?;

            tokio::select! {
                Some(event) = tui.next() => self.handle_tui_event(event),
                Some(action) = self.action_receiver.recv() => self.handle_action(action),
                else => break,
            }
        }

        tui.exit()?; // stops event handler, exits raw mode, exits alternate screen
        Ok(())
    }

    /// Waits for the next queued action, such as a resolved turn.
    pub async fn recv_action(&mut self) -> Option<Action> {
        self.action_receiver.recv().await
    }

    fn handle_tui_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key_event) => {
                if let Some(action) = self.on_key(key_event) {
                    self.handle_action(action);
                }
            }
            TuiEvent::Paste(pasted_text) => {
                if self.session.accepts_input() {
                    self.input.insert_str(pasted_text.replace(['\r', '\n'], " "));
                }
            }
            TuiEvent::Tick => {
                if self.session.is_in_flight() {
                    self.spinner.tick();
                }
            }
            TuiEvent::Error => log::warn!("Terminal event error"),
            TuiEvent::Init
            | TuiEvent::Render
            | TuiEvent::FocusGained
            | TuiEvent::FocusLost
            | TuiEvent::Resize(_, _) => {}
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => return Some(Action::Quit),
                KeyCode::Char('r') => return Some(Action::ReportCompliance),
                KeyCode::Char('n') => return Some(Action::Reset),
                _ => {}
            }
        }

        // The ending overlay only knows how to start over or leave.
        if self.session.status().is_terminal() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('r') => Some(Action::Reset),
                KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::PageUp => Some(Action::ScrollUp(self.visible_lines.max(1))),
            KeyCode::PageDown => Some(Action::ScrollDown(self.visible_lines.max(1))),
            KeyCode::Up => Some(Action::ScrollUp(1)),
            KeyCode::Down => Some(Action::ScrollDown(1)),
            KeyCode::Home => Some(Action::ScrollUp(usize::MAX)),
            KeyCode::End => Some(Action::ScrollDown(usize::MAX)),
            _ => {
                if self.session.accepts_input() {
                    self.input.input(key);
                }
                None
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::Submit => self.submit_user_input(),
            Action::ReportCompliance => {
                self.session.report_compliance();
            }
            Action::Reset => self.reset(),
            Action::ScrollUp(lines) => self.scroll_up(lines),
            Action::ScrollDown(lines) => self.scroll_down(lines),
            Action::TurnResolved(resolution) => {
                let TurnResolution { pending, result } = *resolution;
                if self.session.complete_turn(pending, result) {
                    self.scroll_to_bottom();
                }
            }
        }
    }

    fn quit(&mut self) {
        self.running = false;
    }

    fn reset(&mut self) {
        self.session.reset();
        self.input = ui::new_textarea();
        self.scroll_to_bottom();
    }

    fn submit_user_input(&mut self) {
        let input = self.input_text();
        let Some(pending) = self.session.begin_turn(&input) else {
            return;
        };

        // Clear the user input
        self.input = ui::new_textarea();
        self.scroll_to_bottom();

        let resolver = self.resolver.clone();
        let sender = self.action_sender.clone();
        tokio::spawn(async move {
            let result = resolver
                .resolve(&pending.input, &pending.history, &pending.meters)
                .await;
            let resolution = TurnResolution { pending, result };
            if sender
                .send(Action::TurnResolved(Box::new(resolution)))
                .is_err()
            {
                log::error!("App closed before the turn could be delivered");
            }
        });
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.follow_bottom = false;
        self.transcript_scroll = self.transcript_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max_scroll = self.max_scroll();
        self.transcript_scroll = self.transcript_scroll.saturating_add(lines).min(max_scroll);
        if self.transcript_scroll >= max_scroll {
            self.follow_bottom = true;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow_bottom = true;
    }

    /// Called by the renderer once the wrapped transcript height is known.
    pub(crate) fn update_scroll(&mut self, total_lines: usize, visible_lines: usize) {
        self.total_lines = total_lines;
        self.visible_lines = visible_lines;
        let max_scroll = self.max_scroll();
        self.transcript_scroll = if self.follow_bottom {
            max_scroll
        } else {
            self.transcript_scroll.min(max_scroll)
        };
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_lines)
    }
}
