use clap::ValueEnum;
use tollway_core::matrix::threshold::{ThresholdMode, ThresholdParams};

pub fn parse_band(input: &str) -> Result<f64, String> {
    let band = input
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| String::from("Invalid band"))?;

    // "10%" and "0.1" are the same band
    let band = if input.ends_with('%') { band / 100.0 } else { band };

    ThresholdParams {
        band,
        ..ThresholdParams::default()
    }
    .validate()
    .map_err(|error| error.to_string())?;

    Ok(band)
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ModeArg {
    /// Compare the mean distance of each origin
    #[default]
    GroupMean,
    /// Compare the distance of each row
    RowDistance,
}

impl From<ModeArg> for ThresholdMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::GroupMean => ThresholdMode::GroupMean,
            ModeArg::RowDistance => ThresholdMode::RowDistance,
        }
    }
}
