use std::{error::Error, io};

use log::info;
use tdee_cli::{App, Config};
use tdee_roster::Roster;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();
    log4rs::init_file(&config.log_config, Default::default())?;

    info!("Starting with an empty roster");
    let stdin = io::stdin();
    let mut app = App::new(Box::new(Roster::new()), stdin.lock(), io::stdout());
    app.run()?;

    Ok(())
}
