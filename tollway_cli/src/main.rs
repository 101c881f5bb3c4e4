use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{
    generate::GenerateSubcommands, matrix::MatrixArgs, threshold::ThresholdArgs, tolls::TollsArgs,
    unroll::UnrollArgs,
};

mod file_utils;
mod generate;
mod input;
mod matrix;
mod output;
mod parsers;
mod schedule;
mod threshold;
mod tolls;
mod unroll;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true)]
    debug: bool,

    /// JSON toll schedule overriding the default rates and brackets
    #[arg(short, long, global = true, env = "TOLLWAY_SCHEDULE")]
    schedule: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the symmetric distance matrix of the segments
    #[command(visible_alias = "m")]
    Matrix {
        #[command(flatten)]
        args: MatrixArgs,
    },
    /// Prints every origin-destination pair of the distance matrix
    #[command(visible_alias = "u")]
    Unroll {
        #[command(flatten)]
        args: UnrollArgs,
    },
    /// Keeps the pairs within a band around a reference id's average distance
    Threshold {
        #[command(flatten)]
        args: ThresholdArgs,
    },
    /// Computes vehicle toll rates, optionally per day and time bracket
    Tolls {
        #[command(flatten)]
        args: TollsArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Matrix { args }) => matrix::run(args)?,
        Some(Commands::Unroll { args }) => unroll::run(args)?,
        Some(Commands::Threshold { args }) => threshold::run(args)?,
        Some(Commands::Tolls { args }) => {
            let schedule = schedule::load_schedule(cli.schedule.as_deref())?;
            tolls::run(args, schedule)?
        }
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {
            tracing::warn!("No command provided, see --help");
        }
    }

    Ok(())
}
