use crate::{BlockNumber, ContractAddress, RawVotingPower};

/// Read access to a contract's historical total supply.
pub trait HistoricalChainReader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Total supply of `contract` as of `block`, in the contract's fixed-point unit.
    fn total_supply_at(
        &self,
        contract: &ContractAddress,
        block: BlockNumber,
    ) -> Result<RawVotingPower, Self::Error>;
}

impl<R: HistoricalChainReader + ?Sized> HistoricalChainReader for &R {
    type Error = R::Error;

    fn total_supply_at(
        &self,
        contract: &ContractAddress,
        block: BlockNumber,
    ) -> Result<RawVotingPower, Self::Error> {
        (**self).total_supply_at(contract, block)
    }
}

#[cfg(any(test, feature = "test-api"))]
pub mod test_api {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    #[derive(Debug, thiserror::Error)]
    #[error("no state available for block {0}")]
    pub struct MissingState(pub BlockNumber);

    /// In-memory reader answering with `supply(block)` and recording every call.
    pub struct ScriptedReader<F> {
        supply: F,
        failing: HashSet<BlockNumber>,
        calls: RefCell<Vec<(ContractAddress, BlockNumber)>>,
    }

    impl<F> ScriptedReader<F>
    where
        F: Fn(BlockNumber) -> RawVotingPower,
    {
        pub fn new(supply: F) -> Self {
            Self {
                supply,
                failing: HashSet::new(),
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn failing_at(mut self, block: BlockNumber) -> Self {
            self.failing.insert(block);
            self
        }

        pub fn calls(&self) -> Vec<(ContractAddress, BlockNumber)> {
            self.calls.borrow().clone()
        }
    }

    impl<F> HistoricalChainReader for ScriptedReader<F>
    where
        F: Fn(BlockNumber) -> RawVotingPower,
    {
        type Error = MissingState;

        fn total_supply_at(
            &self,
            contract: &ContractAddress,
            block: BlockNumber,
        ) -> Result<RawVotingPower, Self::Error> {
            self.calls.borrow_mut().push((*contract, block));
            if self.failing.contains(&block) {
                return Err(MissingState(block));
            }
            Ok((self.supply)(block))
        }
    }
}
