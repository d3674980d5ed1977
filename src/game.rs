//! Round state and the two operations that drive it.
//!
//! `GameController` owns everything about the current round and the best
//! score of the session. It never draws anything itself: every visible
//! change goes out through a [`GameView`] passed into each call.

use crate::{debug_log, info_log};
use rand::Rng;
use rand::rngs::StdRng;

pub const START_SCORE: u32 = 20;
pub const MIN_VALUE: u32 = 1;
pub const MAX_VALUE: u32 = 20;

pub const MSG_START: &str = "Start guessing...";
pub const MSG_INVALID: &str = "🛑 Enter a valid number!";
pub const MSG_CORRECT: &str = "🎉 Correct Number!";
pub const MSG_TOO_HIGH: &str = "🔺 Too high!";
pub const MSG_TOO_LOW: &str = "🔻 Too low!";
pub const MSG_LOST: &str = "💥 You lost!";
pub const MSG_ROUND_OVER: &str = "Round is over. Press Again! to play a new round.";

/// Presentation call-outs. Fire-and-forget: the controller never reads
/// anything back from the view.
pub trait GameView {
    fn show_message(&mut self, text: &str);
    fn show_score(&mut self, value: u32);
    fn show_best_score(&mut self, value: u32);
    fn reveal_target(&mut self, value: u32);
    /// Put the "?" placeholder back in place of the target.
    fn conceal_target(&mut self);
    fn set_win_visual(&mut self);
    fn set_default_visual(&mut self);
    fn set_guess_field_enabled(&mut self, enabled: bool);
    fn clear_guess_field(&mut self);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RoundStatus {
    Active,
    Won,
    Lost,
}

impl RoundStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Active)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Hint {
    TooHigh,
    TooLow,
}

impl Hint {
    fn message(self) -> &'static str {
        match self {
            Self::TooHigh => MSG_TOO_HIGH,
            Self::TooLow => MSG_TOO_LOW,
        }
    }
}

/// What a single `submit_guess` call did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GuessOutcome {
    /// Not a number, zero, or outside the range. Nothing changed.
    Invalid,
    /// The round already ended. Nothing changed.
    RoundOver,
    Miss { hint: Hint, remaining_score: u32 },
    Won { score: u32, new_best: bool },
    Lost,
}

/// Read a guess as a decimal number. Fractional and exponent forms are
/// accepted; radix prefixes such as `0x` are not. Surrounding whitespace is
/// ignored, empty text and anything non-numeric are rejected. Zero counts
/// as "no guess".
fn parse_guess(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_nan() || value == 0.0 {
        return None;
    }
    if value < f64::from(MIN_VALUE) || value > f64::from(MAX_VALUE) {
        return None;
    }
    Some(value)
}

pub struct GameController<R: Rng = StdRng> {
    rng: R,
    secret_target: u32,
    remaining_score: u32,
    best_score: u32,
    status: RoundStatus,
}

impl<R: Rng> GameController<R> {
    /// Start the first round with a target drawn from `rng`.
    pub fn new(mut rng: R) -> Self {
        let secret_target = rng.gen_range(MIN_VALUE..=MAX_VALUE);
        debug_log!("GameController::new() - first target drawn: {}", secret_target);
        Self {
            rng,
            secret_target,
            remaining_score: START_SCORE,
            best_score: 0,
            status: RoundStatus::Active,
        }
    }

    /// Start the first round with a chosen target. Later rounds still draw
    /// from `rng`. Returns `None` when the target is out of range.
    pub fn with_target(rng: R, secret_target: u32) -> Option<Self> {
        if !(MIN_VALUE..=MAX_VALUE).contains(&secret_target) {
            return None;
        }
        Some(Self {
            rng,
            secret_target,
            remaining_score: START_SCORE,
            best_score: 0,
            status: RoundStatus::Active,
        })
    }

    pub fn submit_guess<V: GameView + ?Sized>(&mut self, raw_input: &str, view: &mut V) -> GuessOutcome {
        let Some(guess) = parse_guess(raw_input) else {
            debug_log!("submit_guess() - rejected input {:?}", raw_input);
            view.show_message(MSG_INVALID);
            return GuessOutcome::Invalid;
        };

        if self.status.is_over() {
            debug_log!("submit_guess() - guess {} after round ended ({:?})", guess, self.status);
            view.show_message(MSG_ROUND_OVER);
            return GuessOutcome::RoundOver;
        }

        if guess == f64::from(self.secret_target) {
            return self.win(view);
        }

        let hint = if guess > f64::from(self.secret_target) {
            Hint::TooHigh
        } else {
            Hint::TooLow
        };

        if self.remaining_score > 1 {
            self.remaining_score -= 1;
            view.show_message(hint.message());
            view.show_score(self.remaining_score);
            debug_log!(
                "submit_guess() - miss {:?}, score now {}",
                hint,
                self.remaining_score
            );
            GuessOutcome::Miss {
                hint,
                remaining_score: self.remaining_score,
            }
        } else {
            self.remaining_score = 0;
            self.status = RoundStatus::Lost;
            view.show_message(MSG_LOST);
            view.show_score(0);
            view.set_guess_field_enabled(false);
            info_log!("Round lost, target was {}", self.secret_target);
            GuessOutcome::Lost
        }
    }

    fn win<V: GameView + ?Sized>(&mut self, view: &mut V) -> GuessOutcome {
        self.status = RoundStatus::Won;
        view.show_message(MSG_CORRECT);
        view.reveal_target(self.secret_target);
        view.set_win_visual();
        view.set_guess_field_enabled(false);

        let new_best = self.remaining_score > self.best_score;
        if new_best {
            self.best_score = self.remaining_score;
            view.show_best_score(self.best_score);
        }
        info_log!(
            "Round won with score {} (best {})",
            self.remaining_score,
            self.best_score
        );
        GuessOutcome::Won {
            score: self.remaining_score,
            new_best,
        }
    }

    pub fn reset_round<V: GameView + ?Sized>(&mut self, view: &mut V) {
        self.secret_target = self.rng.gen_range(MIN_VALUE..=MAX_VALUE);
        self.remaining_score = START_SCORE;
        self.status = RoundStatus::Active;
        debug_log!("reset_round() - new target drawn: {}", self.secret_target);

        view.show_message(MSG_START);
        view.show_score(self.remaining_score);
        view.conceal_target();
        view.clear_guess_field();
        view.set_guess_field_enabled(true);
        view.set_default_visual();
    }

    /// Push the whole current state to a freshly created view.
    pub fn sync_view<V: GameView + ?Sized>(&self, view: &mut V) {
        view.show_score(self.remaining_score);
        view.show_best_score(self.best_score);
        view.clear_guess_field();
        view.set_guess_field_enabled(!self.status.is_over());

        match self.status {
            RoundStatus::Active => {
                view.show_message(MSG_START);
                view.conceal_target();
                view.set_default_visual();
            }
            RoundStatus::Won => {
                view.show_message(MSG_CORRECT);
                view.reveal_target(self.secret_target);
                view.set_win_visual();
            }
            RoundStatus::Lost => {
                view.show_message(MSG_LOST);
                view.conceal_target();
                view.set_default_visual();
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn remaining_score(&self) -> u32 {
        self.remaining_score
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn secret_target(&self) -> u32 {
        self.secret_target
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Records every call-out so tests can assert on what the player saw.
    #[derive(Default, Debug)]
    pub(crate) struct RecordingView {
        pub messages: Vec<String>,
        pub scores: Vec<u32>,
        pub best_scores: Vec<u32>,
        pub revealed: Option<u32>,
        pub win_visual: bool,
        pub guess_enabled: bool,
        pub cleared: usize,
    }

    impl RecordingView {
        pub fn last_message(&self) -> Option<&str> {
            self.messages.last().map(String::as_str)
        }
    }

    impl GameView for RecordingView {
        fn show_message(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }
        fn show_score(&mut self, value: u32) {
            self.scores.push(value);
        }
        fn show_best_score(&mut self, value: u32) {
            self.best_scores.push(value);
        }
        fn reveal_target(&mut self, value: u32) {
            self.revealed = Some(value);
        }
        fn conceal_target(&mut self) {
            self.revealed = None;
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
            self.cleared += 1;
        }
    }

    fn controller(target: u32) -> GameController {
        GameController::with_target(StdRng::seed_from_u64(7), target).unwrap()
    }

    /// Any in-range value other than the target.
    fn wrong_guess(target: u32) -> u32 {
        if target == MAX_VALUE { MIN_VALUE } else { target + 1 }
    }

    #[test]
    fn test_new_round_in_range() {
        for seed in 0..200 {
            let game = GameController::new(StdRng::seed_from_u64(seed));
            assert!((MIN_VALUE..=MAX_VALUE).contains(&game.secret_target()));
            assert_eq!(game.remaining_score(), START_SCORE);
            assert_eq!(game.best_score(), 0);
            assert_eq!(game.status(), RoundStatus::Active);
        }
    }

    #[test]
    fn test_with_target_rejects_out_of_range() {
        assert!(GameController::with_target(StdRng::seed_from_u64(1), 0).is_none());
        assert!(GameController::with_target(StdRng::seed_from_u64(1), 21).is_none());
        assert!(GameController::with_target(StdRng::seed_from_u64(1), 20).is_some());
    }

    #[test]
    fn test_parse_guess() {
        assert_eq!(parse_guess("7"), Some(7.0));
        assert_eq!(parse_guess("  12\n"), Some(12.0));
        assert_eq!(parse_guess("1e1"), Some(10.0));
        assert_eq!(parse_guess("2.5"), Some(2.5));
        assert_eq!(parse_guess(""), None);
        assert_eq!(parse_guess("   "), None);
        assert_eq!(parse_guess("abc"), None);
        assert_eq!(parse_guess("0"), None);
        assert_eq!(parse_guess("-0"), None);
        assert_eq!(parse_guess("-3"), None);
        assert_eq!(parse_guess("21"), None);
        assert_eq!(parse_guess("NaN"), None);
        assert_eq!(parse_guess("inf"), None);
    }

    #[test]
    fn test_out_of_range_guess_rejected() {
        let mut game = controller(10);
        let mut view = RecordingView::default();

        assert_eq!(game.submit_guess("25", &mut view), GuessOutcome::Invalid);
        assert_eq!(view.last_message(), Some(MSG_INVALID));
        assert_eq!(game.remaining_score(), START_SCORE);
        assert_eq!(game.status(), RoundStatus::Active);
        assert!(view.scores.is_empty());
    }

    #[test]
    fn test_invalid_inputs_leave_state_unchanged() {
        let mut game = controller(10);
        let mut view = RecordingView::default();
        for raw in ["", "abc", "0", "-1", "21", "100", "ten"] {
            assert_eq!(game.submit_guess(raw, &mut view), GuessOutcome::Invalid);
        }
        assert_eq!(game.remaining_score(), START_SCORE);
        assert_eq!(game.secret_target(), 10);
        assert_eq!(view.messages.len(), 7);
        assert!(view.messages.iter().all(|m| m == MSG_INVALID));
    }

    #[test]
    fn test_too_high_decrements_score() {
        let mut game = controller(10);
        let mut view = RecordingView::default();

        let outcome = game.submit_guess("15", &mut view);
        assert_eq!(
            outcome,
            GuessOutcome::Miss {
                hint: Hint::TooHigh,
                remaining_score: 19
            }
        );
        assert_eq!(view.last_message(), Some(MSG_TOO_HIGH));
        assert_eq!(view.scores, vec![19]);
        assert_eq!(game.status(), RoundStatus::Active);
    }

    #[test]
    fn test_too_low_hint() {
        let mut game = controller(10);
        let mut view = RecordingView::default();

        game.submit_guess("3", &mut view);
        assert_eq!(view.last_message(), Some(MSG_TOO_LOW));
        assert_eq!(game.remaining_score(), 19);
    }

    #[test]
    fn test_fractional_guess_is_a_miss() {
        let mut game = controller(10);
        let mut view = RecordingView::default();

        let outcome = game.submit_guess("10.5", &mut view);
        assert!(matches!(outcome, GuessOutcome::Miss { hint: Hint::TooHigh, .. }));
    }

    #[test]
    fn test_each_miss_costs_one_point_until_loss() {
        let mut game = controller(10);
        let mut view = RecordingView::default();

        for expected in (1..START_SCORE).rev() {
            game.submit_guess("11", &mut view);
            assert_eq!(game.remaining_score(), expected);
            assert_eq!(game.status(), RoundStatus::Active);
        }

        assert_eq!(game.submit_guess("11", &mut view), GuessOutcome::Lost);
        assert_eq!(game.remaining_score(), 0);
        assert_eq!(game.status(), RoundStatus::Lost);
        assert_eq!(view.last_message(), Some(MSG_LOST));
        assert_eq!(view.scores.last(), Some(&0));
        assert!(!view.guess_enabled);
        assert_eq!(game.best_score(), 0);
    }

    #[test]
    fn test_correct_guess_at_last_point_still_wins() {
        let mut game = controller(4);
        let mut view = RecordingView::default();
        for _ in 0..(START_SCORE - 1) {
            game.submit_guess("5", &mut view);
        }
        assert_eq!(game.remaining_score(), 1);

        let outcome = game.submit_guess("4", &mut view);
        assert_eq!(
            outcome,
            GuessOutcome::Won {
                score: 1,
                new_best: true
            }
        );
        assert_eq!(game.best_score(), 1);
    }

    #[test]
    fn test_win_updates_best_score() {
        let mut game = controller(7);
        let mut view = RecordingView::default();
        game.submit_guess("8", &mut view);
        game.submit_guess("9", &mut view);
        assert_eq!(game.remaining_score(), 18);

        let outcome = game.submit_guess("7", &mut view);
        assert_eq!(
            outcome,
            GuessOutcome::Won {
                score: 18,
                new_best: true
            }
        );
        assert_eq!(game.status(), RoundStatus::Won);
        assert_eq!(game.best_score(), 18);
        assert_eq!(view.best_scores, vec![18]);
        assert_eq!(view.revealed, Some(7));
        assert!(view.win_visual);
        assert!(!view.guess_enabled);
        assert_eq!(view.last_message(), Some(MSG_CORRECT));
    }

    #[test]
    fn test_lower_win_keeps_best_score() {
        let mut game = controller(5);
        let mut view = RecordingView::default();
        game.submit_guess("5", &mut view);
        assert_eq!(game.best_score(), START_SCORE);

        game.reset_round(&mut view);
        let target = game.secret_target();
        game.submit_guess(&wrong_guess(target).to_string(), &mut view);
        let outcome = game.submit_guess(&target.to_string(), &mut view);

        assert_eq!(
            outcome,
            GuessOutcome::Won {
                score: START_SCORE - 1,
                new_best: false
            }
        );
        assert_eq!(game.best_score(), START_SCORE);
        assert_eq!(view.best_scores, vec![START_SCORE]);
    }

    #[test]
    fn test_guess_after_round_end_rejected() {
        let mut game = controller(3);
        let mut view = RecordingView::default();
        game.submit_guess("3", &mut view);
        let best = game.best_score();

        assert_eq!(game.submit_guess("3", &mut view), GuessOutcome::RoundOver);
        assert_eq!(game.submit_guess("12", &mut view), GuessOutcome::RoundOver);
        assert_eq!(view.last_message(), Some(MSG_ROUND_OVER));
        assert_eq!(game.status(), RoundStatus::Won);
        assert_eq!(game.best_score(), best);
        assert_eq!(game.remaining_score(), START_SCORE);
    }

    #[test]
    fn test_reset_round_after_loss() {
        let mut game = controller(10);
        let mut view = RecordingView::default();
        for _ in 0..START_SCORE {
            game.submit_guess("1", &mut view);
        }
        assert_eq!(game.status(), RoundStatus::Lost);

        game.reset_round(&mut view);
        assert_eq!(game.status(), RoundStatus::Active);
        assert_eq!(game.remaining_score(), START_SCORE);
        assert!((MIN_VALUE..=MAX_VALUE).contains(&game.secret_target()));
        assert_eq!(view.last_message(), Some(MSG_START));
        assert_eq!(view.scores.last(), Some(&START_SCORE));
        assert_eq!(view.revealed, None);
        assert!(view.guess_enabled);
        assert!(!view.win_visual);
        assert_eq!(view.cleared, 1);
    }

    #[test]
    fn test_radix_prefixes_rejected() {
        assert_eq!(parse_guess("0x0A"), None);
        assert_eq!(parse_guess("0b1010"), None);
        assert_eq!(parse_guess("0o12"), None);
    }

    #[test]
    fn test_sync_view_active_round() {
        let game = controller(9);
        let mut view = RecordingView::default();
        game.sync_view(&mut view);

        assert_eq!(view.messages, vec![MSG_START.to_string()]);
        assert_eq!(view.scores, vec![START_SCORE]);
        assert_eq!(view.best_scores, vec![0]);
        assert_eq!(view.revealed, None);
        assert!(!view.win_visual);
        assert!(view.guess_enabled);
    }

    #[test]
    fn test_sync_view_after_win() {
        let mut game = controller(5);
        game.submit_guess("5", &mut RecordingView::default());

        let mut view = RecordingView::default();
        game.sync_view(&mut view);

        assert_eq!(view.messages, vec![MSG_CORRECT.to_string()]);
        assert_eq!(view.revealed, Some(5));
        assert!(view.win_visual);
        assert!(!view.guess_enabled);
        assert_eq!(view.scores, vec![START_SCORE]);
        assert_eq!(view.best_scores, vec![START_SCORE]);
    }

    #[test]
    fn test_sync_view_after_loss() {
        let mut game = controller(5);
        let mut played = RecordingView::default();
        for _ in 0..START_SCORE {
            game.submit_guess("6", &mut played);
        }
        assert_eq!(game.status(), RoundStatus::Lost);

        let mut view = RecordingView::default();
        game.sync_view(&mut view);

        assert_eq!(view.messages, vec![MSG_LOST.to_string()]);
        assert_eq!(view.scores, vec![0]);
        assert_eq!(view.revealed, None);
        assert!(!view.win_visual);
        assert!(!view.guess_enabled);
    }

    #[test]
    fn test_best_score_monotonic_across_rounds() {
        let mut game = GameController::new(StdRng::seed_from_u64(99));
        let mut view = RecordingView::default();
        let mut previous_best = 0;

        for round in 0..30u32 {
            let target = game.secret_target();
            for _ in 0..(round % 5) {
                game.submit_guess(&wrong_guess(target).to_string(), &mut view);
            }
            if round % 3 == 0 {
                while !game.status().is_over() {
                    game.submit_guess(&wrong_guess(target).to_string(), &mut view);
                }
            } else {
                game.submit_guess(&target.to_string(), &mut view);
            }
            assert!(game.best_score() >= previous_best);
            previous_best = game.best_score();
            game.reset_round(&mut view);
        }
        assert!(view.best_scores.windows(2).all(|w| w[0] < w[1]));
    }
}
