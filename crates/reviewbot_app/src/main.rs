mod config;
mod runner;

use bot_logging::LogDestination;

fn main() {
    bot_logging::initialize(LogDestination::Both);
    dotenvy::dotenv().ok();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("cannot start: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = runner::run(config) {
        log::error!("cannot start: {err}");
        std::process::exit(1);
    }
}
