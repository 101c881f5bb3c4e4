use clap::Args;
use tollway_core::{
    matrix::{
        location_id::LocationId,
        threshold::{ThresholdParams, filter_within_threshold, matching_ids},
    },
    pipeline::TollPipeline,
};
use tracing::info;

use crate::{
    input::InputArgs,
    output::{OutputArgs, unrolled_table},
    parsers::{self, ModeArg},
};

#[derive(Args)]
pub struct ThresholdFilterArgs {
    /// Origin whose average distance anchors the band
    #[arg(short, long)]
    pub reference: i64,

    #[arg(long, value_enum, default_value_t = ModeArg::default())]
    pub mode: ModeArg,

    /// Half-width of the band, as a fraction ("0.1") or a percentage ("10%")
    #[arg(short, long, value_parser = parsers::parse_band, default_value = "0.1")]
    pub band: f64,
}

impl ThresholdFilterArgs {
    pub fn params(&self) -> ThresholdParams {
        ThresholdParams {
            band: self.band,
            mode: self.mode.into(),
        }
    }
}

#[derive(Args)]
pub struct ThresholdArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    filter: ThresholdFilterArgs,

    #[command(flatten)]
    output: OutputArgs,
}

pub fn run(args: ThresholdArgs) -> anyhow::Result<()> {
    let records = args.input.read_segments()?;
    let (_, unrolled) = TollPipeline::default().unrolled(&records)?;

    let reference = LocationId::new(args.filter.reference);
    let filtered = filter_within_threshold(&unrolled, reference, &args.filter.params())?;

    let ids = matching_ids(&filtered)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    info!("Ids within threshold of {reference}: {}", ids.join(", "));

    unrolled_table(&filtered).emit(&args.output)
}
