//! TUI application state and logic

use crate::core::{Difficulty, GameError, GameSession, GuessOutcome, Temperature};
use crate::output::formatters::attempts_label;
use crate::storage::BestScoreStore;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Longest guess text the input box accepts
const MAX_INPUT_LEN: usize = 12;

/// How often the event loop wakes up to expire effects
const TICK_RATE: Duration = Duration::from_millis(100);

/// Application state
pub struct App {
    pub session: GameSession,
    pub store: BestScoreStore,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub input_mode: InputMode,
    pub show_stats: bool,
    pub effect: Option<Effect>,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    WinCelebration,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Transient visual flourish; has no effect on the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    pub kind: EffectKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Fireworks,
    Heat,
    Frost,
}

impl EffectKind {
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Fireworks => Duration::from_millis(2000),
            Self::Heat => Duration::from_millis(1200),
            Self::Frost => Duration::from_millis(1700),
        }
    }
}

impl App {
    #[must_use]
    pub fn new(difficulty: Difficulty, store: BestScoreStore) -> Self {
        Self::with_session(GameSession::start(difficulty), store)
    }

    /// Build the app around an existing session
    #[must_use]
    pub fn with_session(session: GameSession, store: BestScoreStore) -> Self {
        let mut app = Self {
            session,
            store,
            input_buffer: String::new(),
            messages: Vec::new(),
            input_mode: InputMode::Guessing,
            show_stats: false,
            effect: None,
            should_quit: false,
        };
        app.add_message("Welcome! Find the hidden number.", MessageStyle::Info);
        app.announce_level();
        app
    }

    /// Submit the input buffer as a guess
    pub fn submit_input(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);

        match self.session.submit_guess(&input) {
            Ok(GuessOutcome::Hint(feedback)) => {
                if let Some(temperature) = feedback.temperature() {
                    match temperature {
                        Temperature::Hot => self.trigger_effect(EffectKind::Heat),
                        Temperature::Cold => self.trigger_effect(EffectKind::Frost),
                        Temperature::Warm | Temperature::Tepid => {}
                    }
                }
            }
            Ok(GuessOutcome::FirstGuessRejected) => {
                // The same value wins on resubmit
                self.input_buffer = input;
                self.add_message("Lucky first guess refused, try again!", MessageStyle::Info);
            }
            Ok(GuessOutcome::Won { attempts }) => self.handle_win(attempts),
            Err(GameError::InvalidInput { input, .. }) => {
                // Keep what the player typed so it can be corrected
                self.input_buffer = input;
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    fn handle_win(&mut self, attempts: u32) {
        let level = self.session.difficulty();
        let previous = self.store.best(level);
        let improved = self.store.record_if_better(level, attempts);

        self.input_mode = InputMode::WinCelebration;
        self.trigger_effect(EffectKind::Fireworks);

        self.add_message(
            &format!(
                "🎉 BRAVO! {} found in {}",
                self.session.target(),
                attempts_label(attempts)
            ),
            MessageStyle::Success,
        );
        if improved {
            let text = match previous {
                Some(old) => format!("🏆 New best on {} (was {old})", level.name()),
                None => format!("🏆 First win on {}", level.name()),
            };
            self.add_message(&text, MessageStyle::Success);
        }
        self.add_message("Press 'n' to play again or 'q' to quit.", MessageStyle::Info);
    }

    /// Start over on the current level
    pub fn new_game(&mut self) {
        self.session.restart();
        self.reset_round();
        self.add_message("New game started!", MessageStyle::Info);
    }

    /// Switch level; always discards the current session
    pub fn change_level(&mut self, difficulty: Difficulty) {
        debug!("Switching level to {difficulty}");
        self.session = GameSession::start(difficulty);
        self.reset_round();
        self.announce_level();
    }

    fn reset_round(&mut self) {
        self.input_buffer.clear();
        self.input_mode = InputMode::Guessing;
        self.effect = None;
    }

    fn announce_level(&mut self) {
        let level = self.session.difficulty();
        self.add_message(
            &format!(
                "{} {}: guess between {} and {}",
                level.icon(),
                level.name(),
                level.min_value(),
                level.max_value()
            ),
            MessageStyle::Info,
        );
    }

    pub fn toggle_stats(&mut self) {
        self.show_stats = !self.show_stats;
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    pub fn trigger_effect(&mut self, kind: EffectKind) {
        self.effect = Some(Effect {
            kind,
            expires_at: Instant::now() + kind.duration(),
        });
    }

    /// Drop the current effect once it has expired
    pub fn tick(&mut self, now: Instant) {
        if self.effect.is_some_and(|effect| now >= effect.expires_at) {
            self.effect = None;
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events (fixes Windows double-input bug)
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('n') => {
                self.new_game();
                return;
            }
            KeyCode::Char('s') => {
                self.toggle_stats();
                return;
            }
            KeyCode::Tab => {
                self.change_level(self.session.difficulty().next());
                return;
            }
            KeyCode::BackTab => {
                self.change_level(self.session.difficulty().previous());
                return;
            }
            KeyCode::Esc if self.show_stats => {
                self.show_stats = false;
                return;
            }
            _ => {}
        }

        if self.input_mode == InputMode::WinCelebration {
            // In celebration mode, ignore other keys
            return;
        }

        match key.code {
            KeyCode::Char(c) => {
                if self.input_buffer.chars().count() < MAX_INPUT_LEN {
                    self.input_buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Enter => self.submit_input(),
            _ => {}
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(TICK_RATE)?
            && let Event::Key(key) = event::read()?
        {
            app.handle_key(key);
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
