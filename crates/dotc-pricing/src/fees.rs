//! Protocol fee computation.
//!
//! ```text
//! total        = amount × fee_rate_bps / 10000
//! to_affiliate = total × affiliate_share_bps / 10000   (only with an affiliate)
//! to_receiver  = total − to_affiliate
//! ```

use dotc_types::{Result, U256};

use crate::fixed_point::bps_of;

/// How the fee on one take is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeSplit {
    pub total: U256,
    pub to_receiver: U256,
    pub to_affiliate: U256,
}

/// Compute the fee on `amount` and its split between receiver and affiliate.
pub fn calculate_fees(
    amount: U256,
    fee_rate_bps: u32,
    affiliate_share_bps: u32,
    has_affiliate: bool,
) -> Result<FeeSplit> {
    let total = bps_of(amount, fee_rate_bps)?;
    let to_affiliate = if has_affiliate {
        bps_of(total, affiliate_share_bps)?
    } else {
        U256::zero()
    };
    Ok(FeeSplit {
        total,
        to_receiver: total - to_affiliate,
        to_affiliate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fee_without_affiliate_goes_to_receiver() {
        let split = calculate_fees(U256::from(104_000_000u64), 25, 8_000, false).unwrap();
        assert_eq!(split.total, U256::from(260_000));
        assert_eq!(split.to_receiver, U256::from(260_000));
        assert_eq!(split.to_affiliate, U256::zero());
    }

    #[test]
    fn affiliate_takes_its_share() {
        let split = calculate_fees(U256::from(104_000_000u64), 25, 8_000, true).unwrap();
        assert_eq!(split.total, U256::from(260_000));
        assert_eq!(split.to_affiliate, U256::from(208_000));
        assert_eq!(split.to_receiver, U256::from(52_000));
    }

    #[test]
    fn tiny_amounts_floor_to_zero_fee() {
        let split = calculate_fees(U256::from(399), 25, 8_000, true).unwrap();
        assert_eq!(split, FeeSplit::default());
    }

    proptest! {
        #[test]
        fn split_matches_formula(
            amount in any::<u128>(),
            fee_bps in 0u32..=10_000,
            share_bps in 0u32..=10_000,
        ) {
            let a = U256::from(amount);
            let split = calculate_fees(a, fee_bps, share_bps, true).unwrap();
            let total = a * U256::from(fee_bps) / U256::from(10_000);
            let to_affiliate = total * U256::from(share_bps) / U256::from(10_000);
            prop_assert_eq!(split.total, total);
            prop_assert_eq!(split.to_affiliate, to_affiliate);
            prop_assert_eq!(split.to_receiver, total - to_affiliate);
            prop_assert!(split.total <= a);
        }
    }
}
