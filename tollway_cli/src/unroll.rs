use clap::Args;
use tollway_core::pipeline::TollPipeline;

use crate::{
    input::InputArgs,
    output::{OutputArgs, unrolled_table},
};

#[derive(Args)]
pub struct UnrollArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

pub fn run(args: UnrollArgs) -> anyhow::Result<()> {
    let records = args.input.read_segments()?;
    let (_, unrolled) = TollPipeline::default().unrolled(&records)?;

    unrolled_table(&unrolled).emit(&args.output)
}
