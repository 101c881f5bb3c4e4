use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use tollway_core::{
    matrix::{distance_matrix::DistanceMatrix, unroll::UnrolledRow},
    pricing::{
        time_based::{BracketMatch, TimeAdjustedTollRow},
        toll_rate::TollRow,
        vehicle::{VehicleTolls, VehicleType},
        weekday::weekday_name,
    },
};
use tracing::info;

#[derive(Args)]
pub struct OutputArgs {
    /// Writes the result as CSV instead of printing a table
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A table ready to be printed or written, all cells already formatted.
pub struct Tabular {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Tabular {
    pub fn emit(&self, args: &OutputArgs) -> anyhow::Result<()> {
        match &args.output {
            Some(path) => self.write_csv(path),
            None => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_header(&self.header)
                    .add_rows(&self.rows);
                println!("{table}");
                Ok(())
            }
        }
    }

    fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        info!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(())
    }
}

fn segment_header() -> Vec<String> {
    ["id_start", "id_end", "distance"]
        .map(String::from)
        .to_vec()
}

fn toll_header() -> Vec<String> {
    let mut header = segment_header();
    header.extend(VehicleType::ALL.map(|vehicle| vehicle.name().to_string()));
    header
}

fn toll_cells(tolls: &VehicleTolls) -> impl Iterator<Item = String> + '_ {
    tolls.iter().map(|(_, toll)| toll.to_string())
}

pub fn matrix_table(matrix: &DistanceMatrix) -> Tabular {
    let mut header = vec![String::from("id")];
    header.extend(matrix.ids().iter().map(ToString::to_string));

    let rows = matrix
        .ids()
        .iter()
        .filter_map(|&id| {
            let distances = matrix.row(id)?;
            let mut row = vec![id.to_string()];
            row.extend(distances.iter().map(ToString::to_string));
            Some(row)
        })
        .collect();

    Tabular { header, rows }
}

pub fn unrolled_table(rows: &[UnrolledRow]) -> Tabular {
    Tabular {
        header: segment_header(),
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.id_start.to_string(),
                    row.id_end.to_string(),
                    row.distance.to_string(),
                ]
            })
            .collect(),
    }
}

pub fn toll_table(rows: &[TollRow]) -> Tabular {
    Tabular {
        header: toll_header(),
        rows: rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.id_start.to_string(),
                    row.id_end.to_string(),
                    row.distance.to_string(),
                ];
                cells.extend(toll_cells(&row.tolls));
                cells
            })
            .collect(),
    }
}

pub fn time_adjusted_table(rows: &[TimeAdjustedTollRow]) -> Tabular {
    let mut header = toll_header();
    header.extend(
        ["start_day", "start_time", "end_day", "end_time", "bracket"].map(String::from),
    );

    Tabular {
        header,
        rows: rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.id_start.to_string(),
                    row.id_end.to_string(),
                    row.distance.to_string(),
                ];
                cells.extend(toll_cells(&row.tolls));
                cells.extend([
                    weekday_name(row.window.start_day).to_string(),
                    row.window.start_time.to_string(),
                    weekday_name(row.window.end_day).to_string(),
                    row.window.end_time.to_string(),
                    match &row.bracket {
                        BracketMatch::Matched { bracket, .. } => bracket.to_string(),
                        BracketMatch::Unmatched => String::from("unmatched"),
                    },
                ]);
                cells
            })
            .collect(),
    }
}
