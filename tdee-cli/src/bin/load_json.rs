use std::{env, error::Error, fs::File, io, io::BufReader, path::PathBuf};

use log::info;
use tdee_cli::{batch, Config};
use tdee_model::PatientForm;
use tdee_roster::Roster;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();
    log4rs::init_file(&config.log_config, Default::default())?;

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or(config.import_file);
    let file = File::open(&path)?;
    let forms: Vec<PatientForm> = serde_json::from_reader(BufReader::new(file))?;
    info!("Loaded {} forms from {}", forms.len(), path.display());

    let mut roster = Roster::new();
    let outcomes = batch::register_all(&mut roster, &forms);
    serde_json::to_writer_pretty(io::stdout(), &outcomes)?;
    println!();

    Ok(())
}
