use std::{fs::File, io::Read, path::PathBuf};

use anyhow::Context;
use clap::Args;
use tollway_core::matrix::segment::SegmentRecord;
use tracing::{debug, info};

use crate::file_utils::{has_extension, read_folder};

#[derive(Args)]
pub struct InputArgs {
    /// Segment CSV file, or a folder whose .csv files are read in order
    #[arg(short, long)]
    pub input: PathBuf,
}

impl InputArgs {
    pub fn read_segments(&self) -> anyhow::Result<Vec<SegmentRecord>> {
        let paths = if self.input.is_file() {
            vec![self.input.clone()]
        } else {
            let mut files = read_folder(&self.input)
                .with_context(|| format!("Failed to list {}", self.input.display()))?;
            files.retain(|path| has_extension(path, "csv"));
            files
        };

        let mut records = Vec::new();
        for path in &paths {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            let segments = read_segments(file)
                .with_context(|| format!("Failed to read segments from {}", path.display()))?;

            debug!("Read {} segments from {}", segments.len(), path.display());
            records.extend(segments);
        }

        info!("Loaded {} segments from {} files", records.len(), paths.len());

        Ok(records)
    }
}

/// Reads `id_start,id_end,distance` records from a CSV with a header row.
pub fn read_segments<R: Read>(reader: R) -> anyhow::Result<Vec<SegmentRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use tollway_core::matrix::location_id::LocationId;

    use super::*;

    #[test]
    fn test_read_segments() {
        let csv = "id_start,id_end,distance\n1001400, 1001402, 9.7\n1001402,1001404,20.2\n";
        let records = read_segments(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                SegmentRecord::new(1001400, 1001402, 9.7),
                SegmentRecord::new(1001402, 1001404, 20.2),
            ]
        );
    }

    #[test]
    fn test_read_segments_with_extra_columns() {
        let csv = "id_start,id_end,distance,toll_road\n1,2,3.5,A1\n";
        let records = read_segments(csv.as_bytes()).unwrap();

        assert_eq!(records[0].id_end, LocationId::new(2));
    }

    #[test]
    fn test_missing_column() {
        let csv = "id_start,distance\n1,3.5\n";
        assert!(read_segments(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_invalid_value() {
        let csv = "id_start,id_end,distance\n1,2,far\n";
        assert!(read_segments(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_read_folder_input() {
        let args = InputArgs {
            input: std::env::current_dir()
                .unwrap()
                .join("tests/fixtures/segments"),
        };

        let records = args.read_segments().unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[3], SegmentRecord::new(1001404, 1001408, 1.5));
    }
}
