use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Number of decimal places of the fixed-point values returned by the contract.
pub const VOTING_POWER_DECIMALS: u32 = 18;

/// Largest mantissa a `Decimal` can hold (2^96 - 1).
const MAX_MANTISSA: u128 = (1 << 96) - 1;

/// Unsigned 256-bit value as returned by the contract.
pub type RawVotingPower = BigUint;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("voting power {0} does not fit into a decimal")]
    Overflow(RawVotingPower),
}

/// Voting power scaled down from its fixed-point representation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VotingPower(Decimal);

impl VotingPower {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Divides `raw` by 10^18.
    ///
    /// The result is exact as long as `raw` fits into the 96 bit mantissa of a
    /// `Decimal` (about 7.9e28, i.e. 7.9e10 whole tokens). Larger values lose their
    /// least significant digits. Raw values of 2^96 * 10^18 (about 7.9e46) and above
    /// have an integer part no `Decimal` can hold and are rejected with
    /// [`Error::Overflow`] instead of being approximated.
    pub fn from_raw(raw: &RawVotingPower) -> Result<Self, Error> {
        if raw.is_zero() {
            return Ok(Self::ZERO);
        }

        let max = BigUint::from(MAX_MANTISSA);
        let mut mantissa = raw.clone();
        let mut scale = VOTING_POWER_DECIMALS;
        while mantissa > max {
            if scale == 0 {
                return Err(Error::Overflow(raw.clone()));
            }
            mantissa /= 10u32;
            scale -= 1;
        }

        mantissa
            .to_i128()
            .and_then(|mantissa| Decimal::try_from_i128_with_scale(mantissa, scale).ok())
            .map(|value| Self(value.normalize()))
            .ok_or_else(|| Error::Overflow(raw.clone()))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl fmt::Display for VotingPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::pow;
    use rust_decimal_macros::dec;
    use test_strategy::proptest;

    fn wei(tokens: u64) -> RawVotingPower {
        BigUint::from(tokens) * pow(BigUint::from(10u32), VOTING_POWER_DECIMALS as usize)
    }

    #[test]
    fn whole_tokens() {
        assert_eq!(VotingPower::from_raw(&wei(0)).unwrap(), VotingPower::ZERO);
        assert_eq!(
            VotingPower::from_raw(&wei(1)).unwrap().as_decimal(),
            dec!(1)
        );
        assert_eq!(
            VotingPower::from_raw(&wei(1_234_567)).unwrap().as_decimal(),
            dec!(1234567)
        );
    }

    #[test]
    fn smallest_unit() {
        let power = VotingPower::from_raw(&BigUint::from(1u8)).unwrap();
        assert_eq!(power.as_decimal(), dec!(0.000000000000000001));
        assert_eq!(power.to_string(), "0.000000000000000001");
    }

    #[test]
    fn beyond_mantissa_truncates_fraction() {
        // 10^12 tokens plus one wei does not fit into 96 bits at scale 18
        let raw = wei(1_000_000_000_000) + BigUint::from(1u8);
        let power = VotingPower::from_raw(&raw).unwrap();
        assert_eq!(power.as_decimal(), dec!(1000000000000));
    }

    #[test]
    fn integer_part_too_large() {
        let raw = BigUint::from(1u8) << 255;
        assert_eq!(
            VotingPower::from_raw(&raw),
            Err(Error::Overflow(raw.clone()))
        );
    }

    #[test]
    fn largest_representable_supply() {
        let scale = pow(BigUint::from(10u32), VOTING_POWER_DECIMALS as usize);
        let largest = BigUint::from(MAX_MANTISSA) * &scale;
        assert_eq!(
            VotingPower::from_raw(&largest).unwrap().as_decimal(),
            Decimal::MAX
        );

        let too_large = (BigUint::from(MAX_MANTISSA) + 1u8) * &scale;
        assert_eq!(
            VotingPower::from_raw(&too_large),
            Err(Error::Overflow(too_large.clone()))
        );
    }

    #[proptest]
    fn scaling_matches_float_division(raw: u128) {
        let power = VotingPower::from_raw(&BigUint::from(raw)).unwrap();
        let expected = raw as f64 / 1e18;
        assert!(power.to_f64() >= 0.0);
        assert!((power.to_f64() - expected).abs() <= expected * 1e-12);
    }
}
