use std::io;
use std::process::ExitCode;

use chess_rules::console::Console;
use env_logger::Env;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    match console.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
