use super::common::SamplingArgs;
use color_eyre::Report;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::info;
use vepul_toolbox::plot::Viewer;
use vepul_toolbox::stats;

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub struct PlotVotingPower {
    #[structopt(flatten)]
    sampling: SamplingArgs,

    /// Chart output path (svg)
    #[structopt(long, short)]
    output: Option<PathBuf>,

    /// Program used to display the chart, it should block until the chart is
    /// closed. Defaults to `open -W` on macOS, `start /WAIT` on Windows and
    /// `xdg-open` elsewhere, which usually returns immediately.
    #[structopt(long)]
    viewer: Option<String>,

    /// Argument passed to the viewer before the chart path, may be repeated
    #[structopt(long, number_of_values = 1, allow_hyphen_values = true)]
    viewer_arg: Vec<String>,

    /// Only write the chart, do not display it
    #[structopt(long)]
    no_show: bool,
}

impl PlotVotingPower {
    pub fn exec(self) -> Result<(), Report> {
        let Self {
            sampling,
            output,
            viewer,
            viewer_arg,
            no_show,
        } = self;
        let viewer = viewer.map(|program| Viewer {
            program,
            args: viewer_arg,
        });
        let settings = sampling.settings(output, viewer)?;

        let series = stats::plot_voting_power(&settings, sampling.current_block, !no_show)?;
        if let Some(max) = series.max_voting_power() {
            info!(
                samples = series.len(),
                %max,
                output = %settings.output.display(),
                "done"
            );
        }
        Ok(())
    }
}
