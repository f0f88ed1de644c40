use super::common::SamplingArgs;
use color_eyre::Report;
use snapshot_lib::sample_blocks;
use structopt::StructOpt;
use vepul_toolbox::stats;

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub struct SampleBlocks {
    #[structopt(flatten)]
    sampling: SamplingArgs,
}

impl SampleBlocks {
    pub fn exec(self) -> Result<(), Report> {
        let settings = self.sampling.settings(None, None)?;
        // the node is only contacted when the range end is not given
        let current_block = match self.sampling.current_block {
            Some(block) => block,
            None => stats::connect(&settings)?.block_number()?,
        };

        for block in sample_blocks(settings.start_block, current_block, settings.samples)? {
            println!("{}", block);
        }
        Ok(())
    }
}
