use crate::game::{GameController, GameView};
use crate::{debug_log, info_log};
use rand::Rng;

/// Something the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// "Check!" with the raw contents of the guess field.
    Check(String),
    /// "Again!" - start a new round.
    Again,
    Exit,
}

/// A presentation layer that can also collect player input.
pub trait GameInterface: GameView {
    /// Wait for the next action. `None` means nothing actionable happened
    /// and the loop should ask again.
    fn read_action(&mut self) -> Option<UserAction>;

    fn display_exit_message(&mut self);
}

/// Drive `controller` from `interface` until the player exits.
pub fn game_loop<R: Rng, I: GameInterface + ?Sized>(
    controller: &mut GameController<R>,
    interface: &mut I,
) {
    controller.sync_view(interface);

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Check(raw) => {
                let outcome = controller.submit_guess(&raw, interface);
                debug_log!("game_loop() - outcome: {:?}", outcome);
            }
            UserAction::Again => controller.reset_round(interface),
            UserAction::Exit => {
                info_log!(
                    "Exiting with best score {} after status {:?}",
                    controller.best_score(),
                    controller.status()
                );
                interface.display_exit_message();
                break;
            }
        }
    }
}
