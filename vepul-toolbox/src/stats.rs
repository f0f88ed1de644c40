use crate::plot;
use crate::settings::Settings;
use snapshot_lib::rpc::{self, JsonRpcReader, Url};
use snapshot_lib::sampler::{self, SnapshotSampler};
use snapshot_lib::{BlockNumber, SampleSeries};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid rpc url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Rpc(#[from] rpc::Error),

    #[error(transparent)]
    Sampler(#[from] sampler::Error),

    #[error(transparent)]
    Plot(#[from] plot::Error),
}

pub fn connect(settings: &Settings) -> Result<JsonRpcReader, Error> {
    let url = settings
        .rpc_url
        .parse::<Url>()
        .map_err(|e| Error::InvalidUrl {
            url: settings.rpc_url.clone(),
            reason: e.to_string(),
        })?;
    Ok(JsonRpcReader::new(url)?
        .with_method(&settings.method)?
        .with_call_block(settings.call_at))
}

/// Samples the total voting power from the configured start block up to
/// `current_block`, or up to the chain height reported by the node when unset.
pub fn sample_voting_power(
    settings: &Settings,
    current_block: Option<BlockNumber>,
) -> Result<SampleSeries, Error> {
    let reader = connect(settings)?;
    let current_block = match current_block {
        Some(block) => block,
        None => reader.block_number()?,
    };
    info!(rpc = %reader.url(), current_block, "connected");

    let sampler = SnapshotSampler::new(reader, settings.sampler_config());
    Ok(sampler.sample(current_block)?)
}

/// Samples, renders the chart to the configured output and optionally shows it.
///
/// Nothing is written unless every sample was read.
pub fn plot_voting_power(
    settings: &Settings,
    current_block: Option<BlockNumber>,
    show: bool,
) -> Result<SampleSeries, Error> {
    let series = sample_voting_power(settings, current_block)?;
    plot::render(&series, &settings.output)?;
    if show {
        plot::show(&settings.output, settings.viewer.as_ref())?;
    }
    Ok(series)
}
