use std::path::{Path, PathBuf};

use clap::Subcommand;
use tollway_core::pricing::schedule::TollSchedule;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// JSON schema of the toll schedule file
    JsonSchema {
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    /// Toll schedule file holding the default rates and brackets
    DefaultSchedule {
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

fn write_json<T: serde::Serialize>(out: &Path, value: &T) -> Result<(), anyhow::Error> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(out, serde_json::to_string_pretty(value)?)?;

    Ok(())
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out } => {
            write_json(&out, &TollSchedule::json_schema())?;
        }
        GenerateSubcommands::DefaultSchedule { out } => {
            write_json(&out, &TollSchedule::default())?;
        }
    }

    Ok(())
}
