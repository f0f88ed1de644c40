mod blocks;
mod common;
mod plot;
mod samples;

use color_eyre::Report;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub struct Cli {
    /// Log debug output, `RUST_LOG` takes precedence when set
    #[structopt(short, long)]
    pub verbose: bool,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub enum Command {
    /// Plot the total voting power over the sampled block range
    Plot(plot::PlotVotingPower),
    /// Write the sampled total voting power as csv
    Samples(samples::DumpSamples),
    /// Print the block numbers that would be sampled
    Blocks(blocks::SampleBlocks),
}

impl Cli {
    pub fn exec(self) -> Result<(), Report> {
        match self.command {
            Command::Plot(cmd) => cmd.exec(),
            Command::Samples(cmd) => cmd.exec(),
            Command::Blocks(cmd) => cmd.exec(),
        }
    }
}
