use crate::debug_log;
use crate::game::{GameView, MAX_VALUE, MIN_VALUE};
use crate::game_state::{GameInterface, UserAction};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Guess My Number: find the secret number before your score runs out
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Play in plain line mode instead of the full-screen interface
    #[arg(long)]
    pub cli: bool,

    /// Seed for the secret number generator (repeatable games)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Where to write debug logs
    #[arg(short = 'l', long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Turn one line of player input into an action.
#[must_use]
pub fn parse_action(line: &str) -> UserAction {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "again" | "again!" => UserAction::Again,
        "exit" | "quit" => UserAction::Exit,
        _ => UserAction::Check(trimmed.to_string()),
    }
}

/// Line-mode implementation of the `GameInterface` trait.
///
/// Reads actions from `reader`, one per line, and prints every call-out
/// to `writer` as it happens.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    guess_enabled: bool,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            guess_enabled: true,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            debug_log!("CliInterface::say() - write failed: {}", e);
        }
    }

    fn prompt(&mut self) {
        let prompt = if self.guess_enabled {
            format!(
                "\nGuess a number between {MIN_VALUE} and {MAX_VALUE} ('again' for a new round, 'exit' to quit):"
            )
        } else {
            "\nType 'again' for a new round or 'exit' to quit:".to_string()
        };
        self.say(&prompt);
        if let Err(e) = self.writer.flush() {
            debug_log!("CliInterface::prompt() - flush failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> GameView for CliInterface<R, W> {
    fn show_message(&mut self, text: &str) {
        self.say(text);
    }

    fn show_score(&mut self, value: u32) {
        self.say(&format!("Score: {value}"));
    }

    fn show_best_score(&mut self, value: u32) {
        self.say(&format!("Highscore: {value}"));
    }

    fn reveal_target(&mut self, value: u32) {
        self.say(&format!("Number: {value}"));
    }

    fn conceal_target(&mut self) {
        self.say("Number: ?");
    }

    fn set_win_visual(&mut self) {
        self.say("*** You got it! ***");
    }

    fn set_default_visual(&mut self) {}

    fn set_guess_field_enabled(&mut self, enabled: bool) {
        self.guess_enabled = enabled;
    }

    fn clear_guess_field(&mut self) {}
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn read_action(&mut self) -> Option<UserAction> {
        self.prompt();
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => Some(UserAction::Exit),
            Ok(_) => Some(parse_action(&input)),
            Err(e) => {
                debug_log!("CliInterface::read_action() - read failed: {}", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.say("Exiting.");
    }
}
