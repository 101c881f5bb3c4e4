use clap::Args;
use tollway_core::{
    matrix::{location_id::LocationId, threshold::ThresholdParams},
    pipeline::TollPipeline,
    pricing::schedule::TollSchedule,
};

use crate::{
    input::InputArgs,
    output::{OutputArgs, time_adjusted_table, toll_table},
    parsers::{self, ModeArg},
};

#[derive(Args)]
pub struct TollsArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Only price the pairs within the threshold band of this origin
    #[arg(short, long)]
    reference: Option<i64>,

    #[arg(long, value_enum, default_value_t = ModeArg::default())]
    mode: ModeArg,

    #[arg(short, long, value_parser = parsers::parse_band, default_value = "0.1")]
    band: f64,

    /// Expands every pair over the week and applies the time bracket factors
    #[arg(short, long)]
    time_based: bool,

    #[command(flatten)]
    output: OutputArgs,
}

pub fn run(args: TollsArgs, schedule: TollSchedule) -> anyhow::Result<()> {
    let records = args.input.read_segments()?;

    let pipeline = TollPipeline::new(
        schedule,
        ThresholdParams {
            band: args.band,
            mode: args.mode.into(),
        },
    )?;
    let output = pipeline.run(&records, args.reference.map(LocationId::new))?;

    if args.time_based {
        let time_adjusted = pipeline.time_based(&output.tolls)?;
        time_adjusted_table(&time_adjusted).emit(&args.output)
    } else {
        toll_table(&output.tolls).emit(&args.output)
    }
}
