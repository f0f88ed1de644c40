use crate::{BlockNumber, VotingPower};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub block: BlockNumber,
    pub voting_power: VotingPower,
}

/// Samples ordered by increasing block number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleSeries(Vec<Sample>);

impl SampleSeries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.0.iter()
    }

    pub fn blocks(&self) -> Vec<BlockNumber> {
        self.0.iter().map(|sample| sample.block).collect()
    }

    pub fn voting_powers_f64(&self) -> Vec<f64> {
        self.0
            .iter()
            .map(|sample| sample.voting_power.to_f64())
            .collect()
    }

    pub fn max_voting_power(&self) -> Option<VotingPower> {
        self.0.iter().map(|sample| sample.voting_power).max()
    }

    /// First and last sampled block.
    pub fn block_range(&self) -> Option<(BlockNumber, BlockNumber)> {
        Some((self.0.first()?.block, self.0.last()?.block))
    }
}

impl From<Vec<Sample>> for SampleSeries {
    fn from(from: Vec<Sample>) -> Self {
        Self(from)
    }
}

impl IntoIterator for SampleSeries {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
