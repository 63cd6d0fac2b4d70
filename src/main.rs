use std::io;
use std::path::Path;
use std::process::ExitCode;

use rusty_bikeshare::config::{CONFIG_FILE, Config};
use rusty_bikeshare::session::Session;
use rusty_bikeshare::ui::console::Console;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::load(Path::new(CONFIG_FILE))?;
    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    Session::new(config, console).run()
}
