use crate::reader::HistoricalChainReader;
use crate::sampling::{self, sample_blocks, DEFAULT_SAMPLES};
use crate::voting_power::{self, VotingPower};
use crate::{BlockNumber, ContractAddress, Sample, SampleSeries};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sampling(#[from] sampling::Error),

    #[error("could not read the total supply at block {block}")]
    Read {
        block: BlockNumber,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid total supply at block {block}")]
    Scale {
        block: BlockNumber,
        #[source]
        source: voting_power::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplerConfig {
    pub contract: ContractAddress,
    pub start_block: BlockNumber,
    pub samples: usize,
}

impl SamplerConfig {
    pub fn new(contract: ContractAddress, start_block: BlockNumber) -> Self {
        Self {
            contract,
            start_block,
            samples: DEFAULT_SAMPLES,
        }
    }
}

/// Samples the total voting power of a contract between a fixed start block and
/// the current chain height.
pub struct SnapshotSampler<R> {
    reader: R,
    config: SamplerConfig,
}

impl<R: HistoricalChainReader> SnapshotSampler<R> {
    pub fn new(reader: R, config: SamplerConfig) -> Self {
        Self { reader, config }
    }

    /// Block numbers that [`Self::sample`] would query.
    pub fn blocks(&self, current_block: BlockNumber) -> Result<Vec<BlockNumber>, Error> {
        Ok(sample_blocks(
            self.config.start_block,
            current_block,
            self.config.samples,
        )?)
    }

    /// Queries every sampled block in order, one call at a time.
    ///
    /// Either every block is read successfully or the first failure is returned;
    /// a partial series is never produced.
    pub fn sample(&self, current_block: BlockNumber) -> Result<SampleSeries, Error> {
        let blocks = self.blocks(current_block)?;
        info!(
            contract = %self.config.contract,
            start = self.config.start_block,
            end = current_block,
            samples = blocks.len(),
            "sampling total voting power"
        );

        blocks
            .into_iter()
            .enumerate()
            .map(|(i, block)| {
                let raw = self
                    .reader
                    .total_supply_at(&self.config.contract, block)
                    .map_err(|e| Error::Read {
                        block,
                        source: Box::new(e),
                    })?;
                let voting_power = VotingPower::from_raw(&raw)
                    .map_err(|source| Error::Scale { block, source })?;
                debug!(sample = i, block, %voting_power, "sampled");
                Ok(Sample {
                    block,
                    voting_power,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SampleSeries::from)
    }
}
