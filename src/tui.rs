//! TUI (Terminal User Interface) module for Guess My Number
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `Screen`: everything that is drawn, plus key handling. No terminal access,
//!   so it can be exercised directly.
//! - `TuiInterface`: owns the terminal, forwards call-outs into the `Screen`
//!   and redraws after each one.
//!
//! # Guess field
//! The field is enabled while a round is active. Once the round is won or lost
//! only "Again!" (`A`) and quit (`ESC`) do anything.

use crate::game::{GameView, MAX_VALUE, MIN_VALUE};
use crate::game_state::{GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_INPUT_LEN: usize = 6;
// The page widens the number box from 15rem to 30rem on a win.
const NUMBER_BOX_WIDTH: u16 = 15;
const NUMBER_BOX_WIDTH_WIN: u16 = 30;

const DEFAULT_BG: Color = Color::Rgb(0x22, 0x22, 0x22);
const WIN_BG: Color = Color::Rgb(0x60, 0xb3, 0x47);

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const NUMBER_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const DISABLED_STYLE: Style = Style::new().fg(Color::DarkGray);

/// What the player currently sees.
#[derive(Debug)]
pub struct Screen {
    message: String,
    score: u32,
    best_score: u32,
    target: Option<u32>,
    win_visual: bool,
    guess_enabled: bool,
    input: String,
    error_message: String,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            message: String::new(),
            score: 0,
            best_score: 0,
            target: None,
            win_visual: false,
            guess_enabled: true,
            input: String::new(),
            error_message: String::new(),
        }
    }
}

impl Screen {
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Apply one key press. Returns an action when the key asks the game
    /// to do something.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return None;
        }
        self.error_message.clear();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(UserAction::Exit);
        }
        if Self::has_modifier_keys(&key) {
            debug_log!("handle_key() - Ignoring input with modifier: {:?}", key.modifiers);
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Char('a' | 'A') => Some(UserAction::Again),
            KeyCode::Enter if self.guess_enabled => Some(UserAction::Check(self.input.clone())),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                if !self.guess_enabled {
                    self.error_message = "Round is over! Press A to play again.".to_string();
                } else if self.input.len() < MAX_INPUT_LEN {
                    self.input.push(c);
                }
                None
            }
            KeyCode::Backspace if self.guess_enabled => {
                self.input.pop();
                None
            }
            KeyCode::Enter => {
                self.error_message = "Round is over! Press A to play again.".to_string();
                None
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only numbers are allowed! ('{c}' is not a digit)");
                None
            }
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    /// Render the complete UI layout.
    pub fn render(&self, f: &mut Frame) {
        let background = if self.win_visual { WIN_BG } else { DEFAULT_BG };
        f.render_widget(Block::default().style(Style::default().bg(background)), f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Number box
                Constraint::Length(3), // Message
                Constraint::Length(3), // Scores
                Constraint::Length(3), // Guess field
                Constraint::Min(0),
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        self.render_number(f, chunks[1]);
        self.render_message(f, chunks[2]);
        self.render_scores(f, chunks[3]);
        self.render_guess_field(f, chunks[4]);
        self.render_instructions(f, chunks[6]);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new(format!("GUESS MY NUMBER! (between {MIN_VALUE} and {MAX_VALUE})"))
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_number(&self, f: &mut Frame, area: Rect) {
        let wanted = if self.win_visual {
            NUMBER_BOX_WIDTH_WIN
        } else {
            NUMBER_BOX_WIDTH
        };
        let width = wanted.min(area.width);
        let boxed = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y,
            width,
            height: area.height,
        };

        let text = self
            .target
            .map_or_else(|| "?".to_string(), |target| target.to_string());
        let number = Paragraph::new(vec![Line::from(""), Line::from(text)])
            .style(NUMBER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(number, boxed);
    }

    fn render_message(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(self.message.as_str(), MESSAGE_STYLE)];
        if !self.error_message.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(self.error_message.as_str(), ERROR_STYLE));
        }
        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Message"));
        f.render_widget(paragraph, area);
    }

    fn render_scores(&self, f: &mut Frame, area: Rect) {
        let text = format!("💯 Score: {}    🥇 Highscore: {}", self.score, self.best_score);
        let paragraph = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_guess_field(&self, f: &mut Frame, area: Rect) {
        let (style, title) = if self.guess_enabled {
            (Style::default().fg(Color::White), "Your guess")
        } else {
            (DISABLED_STYLE, "Your guess (disabled)")
        };
        let paragraph = Paragraph::new(self.input.as_str())
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(&self, f: &mut Frame, area: Rect) {
        let text = if self.guess_enabled {
            "Type a number | ENTER: Check! | A: Again! | ESC: Quit"
        } else {
            "A: Again! | ESC: Quit"
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

impl GameView for Screen {
    fn show_message(&mut self, text: &str) {
        self.message = text.to_string();
    }

    fn show_score(&mut self, value: u32) {
        self.score = value;
    }

    fn show_best_score(&mut self, value: u32) {
        self.best_score = value;
    }

    fn reveal_target(&mut self, value: u32) {
        self.target = Some(value);
    }

    fn conceal_target(&mut self) {
        self.target = None;
    }

    fn set_win_visual(&mut self) {
        self.win_visual = true;
    }

    fn set_default_visual(&mut self) {
        self.win_visual = false;
    }

    fn set_guess_field_enabled(&mut self, enabled: bool) {
        self.guess_enabled = enabled;
    }

    fn clear_guess_field(&mut self) {
        self.input.clear();
    }
}

/// Main TUI interface component.
///
/// Manages terminal setup and teardown, rendering, and input handling.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    screen: Screen,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            screen: Screen::default(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let screen = &self.screen;
        self.terminal.draw(|f| screen.render(f))?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                debug_log!(
                    "handle_input() - Key event received: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                Ok(self.screen.handle_key(key))
            }
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(None)
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameView for TuiInterface {
    fn show_message(&mut self, text: &str) {
        self.screen.show_message(text);
        self.draw_or_log();
    }

    fn show_score(&mut self, value: u32) {
        self.screen.show_score(value);
        self.draw_or_log();
    }

    fn show_best_score(&mut self, value: u32) {
        self.screen.show_best_score(value);
        self.draw_or_log();
    }

    fn reveal_target(&mut self, value: u32) {
        self.screen.reveal_target(value);
        self.draw_or_log();
    }

    fn conceal_target(&mut self) {
        self.screen.conceal_target();
        self.draw_or_log();
    }

    fn set_win_visual(&mut self) {
        self.screen.set_win_visual();
        self.draw_or_log();
    }

    fn set_default_visual(&mut self) {
        self.screen.set_default_visual();
        self.draw_or_log();
    }

    fn set_guess_field_enabled(&mut self, enabled: bool) {
        self.screen.set_guess_field_enabled(enabled);
        self.draw_or_log();
    }

    fn clear_guess_field(&mut self) {
        self.screen.clear_guess_field();
        self.draw_or_log();
    }
}

impl GameInterface for TuiInterface {
    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input ({}), returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.screen.show_message("Exiting...");
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
