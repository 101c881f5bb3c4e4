use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use tollway_core::pricing::schedule::TollSchedule;
use tracing::info;

pub fn load_schedule(path: Option<&Path>) -> anyhow::Result<TollSchedule> {
    let Some(path) = path else {
        return Ok(TollSchedule::default());
    };

    let file = File::open(path)
        .with_context(|| format!("Failed to open toll schedule {}", path.display()))?;
    let schedule = TollSchedule::from_json_reader(BufReader::new(file))
        .with_context(|| format!("Invalid toll schedule {}", path.display()))?;

    info!(
        "Loaded toll schedule with {} brackets from {}",
        schedule.brackets.len(),
        path.display()
    );

    Ok(schedule)
}
