//! Historical voting power snapshots of a vote-escrowed token contract.
//!
//! The library samples a block range, asks a [`HistoricalChainReader`] for the
//! contract's total supply at every sampled block and collects the scaled values
//! into a [`SampleSeries`] ready for rendering or export.

pub mod address;
pub mod reader;
pub mod rpc;
pub mod sampler;
pub mod sampling;
pub mod series;
pub mod voting_power;

pub use address::ContractAddress;
pub use reader::HistoricalChainReader;
pub use sampler::{SamplerConfig, SnapshotSampler};
pub use sampling::{sample_blocks, DEFAULT_SAMPLES};
pub use series::{Sample, SampleSeries};
pub use voting_power::{RawVotingPower, VotingPower, VOTING_POWER_DECIMALS};

/// Position in the chain's block sequence.
pub type BlockNumber = u64;
