use clap::Args;
use tollway_core::pipeline::TollPipeline;

use crate::{
    input::InputArgs,
    output::{OutputArgs, matrix_table},
};

#[derive(Args)]
pub struct MatrixArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

pub fn run(args: MatrixArgs) -> anyhow::Result<()> {
    let records = args.input.read_segments()?;
    let (matrix, _) = TollPipeline::default().unrolled(&records)?;

    matrix_table(&matrix).emit(&args.output)
}
