use guess_my_number::cli::{CliInterface, parse_cli};
use guess_my_number::game::GameController;
use guess_my_number::game_state::game_loop;
use guess_my_number::logging::{default_log_path, init_logging};
use guess_my_number::tui::TuiInterface;
use guess_my_number::info_log;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(default_log_path)
        && let Err(e) = init_logging(&path)
    {
        eprintln!("Failed to open log file '{}': {e}", path.display());
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut controller = GameController::new(rng);
    info_log!("Starting game (cli mode: {}, seed: {:?})", cli.cli, cli.seed);

    if cli.cli {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&mut controller, &mut interface);
        return ExitCode::SUCCESS;
    }

    match TuiInterface::new() {
        Ok(mut interface) => {
            game_loop(&mut controller, &mut interface);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to start terminal interface: {e}");
            ExitCode::FAILURE
        }
    }
}
