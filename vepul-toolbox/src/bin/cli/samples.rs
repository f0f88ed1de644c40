use super::common::SamplingArgs;
use color_eyre::Report;
use std::path::PathBuf;
use structopt::StructOpt;
use vepul_toolbox::stats;
use vepul_toolbox::utils::csv;

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub struct DumpSamples {
    #[structopt(flatten)]
    sampling: SamplingArgs,

    /// Csv output path, standard output when omitted
    #[structopt(long, short)]
    output: Option<PathBuf>,
}

impl DumpSamples {
    pub fn exec(self) -> Result<(), Report> {
        let settings = self.sampling.settings(None, None)?;
        let samples = stats::sample_voting_power(&settings, self.sampling.current_block)?
            .into_iter()
            .collect::<Vec<_>>();

        match self.output {
            Some(path) => csv::dump_data_to_csv(&samples, &path)?,
            None => csv::write_data_as_csv(&samples, std::io::stdout().lock())?,
        }
        Ok(())
    }
}
