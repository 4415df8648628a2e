/// Entry point: load config, build the town, run the interaction loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::process::ExitCode;

use config::GameConfig;
use sim::level;
use sim::session::{Session, SessionEnd};
use ui::input::{ScriptedInput, TerminalInput};
use ui::renderer::Screen;

/// Path to a key script. When set, keys are replayed from the file
/// instead of read from the keyboard.
const SCRIPT_ENV: &str = "TOWNWALK_SCRIPT";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::load();

    let setup = match level::build(&config) {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("Bad town setup: {e}");
            return ExitCode::from(2);
        }
    };

    let mut session = Session::new(setup);

    let result = match std::env::var_os(SCRIPT_ENV) {
        Some(path) => run_scripted(&mut session, &path),
        None => run_interactive(&mut session),
    };

    match result {
        Ok(end) => {
            let p = session.player();
            log::info!(
                "session over ({end:?}): {} turns, player at ({}, {})",
                session.turns(), p.x, p.y,
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Game error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_interactive(session: &mut Session) -> Result<SessionEnd, Box<dyn std::error::Error>> {
    let mut screen = Screen::new();

    if let Err(e) = screen.init() {
        return Err(format!("terminal init failed: {e}").into());
    }

    let result = session.run(&mut TerminalInput, &mut screen);

    if let Err(e) = screen.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    Ok(result?)
}

fn run_scripted(session: &mut Session, path: &std::ffi::OsStr) -> Result<SessionEnd, Box<dyn std::error::Error>> {
    let mut input = ScriptedInput::from_file(path)
        .map_err(|e| format!("could not read key script {}: {e}", path.to_string_lossy()))?;
    let mut screen = Screen::new();

    let end = session.run(&mut input, &mut screen)?;
    if input.remaining() > 0 {
        log::warn!("{} scripted keys left unread after quit", input.remaining());
    }
    Ok(end)
}
