//! Fixed-point arithmetic in the standardized domain.
//!
//! Amounts of assets with different native precision are rescaled to
//! [`STANDARD_DECIMALS`](dotc_types::constants::STANDARD_DECIMALS) before any
//! ratio is taken. Intermediate products are computed in 512 bits so a
//! result that fits in 256 bits never spuriously overflows.

use dotc_types::{constants, DotcError, Result, U256};
use primitive_types::U512;

/// `10^exp`, or `ArithmeticOverflow` past `10^77`.
pub fn pow10(exp: u32) -> Result<U256> {
    if exp > 77 {
        return Err(DotcError::ArithmeticOverflow);
    }
    Ok(U256::exp10(exp as usize))
}

/// `a * b / denominator`, floored.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(DotcError::ArithmeticOverflow);
    }
    let wide = a.full_mul(b) / U512::from(denominator);
    U256::try_from(wide).map_err(|_| DotcError::ArithmeticOverflow)
}

/// `a * bps / 10000`, floored.
pub fn bps_of(a: U256, bps: u32) -> Result<U256> {
    mul_div(
        a,
        U256::from(bps),
        U256::from(constants::BPS_DENOMINATOR),
    )
}

/// Rescale a native amount into the standardized domain.
pub fn standardize(amount: U256, decimals: u8) -> Result<U256> {
    mul_div(
        amount,
        pow10(constants::STANDARD_DECIMALS)?,
        pow10(u32::from(decimals))?,
    )
}

/// Rescale a standardized amount back to native precision.
pub fn unstandardize(amount: U256, decimals: u8) -> Result<U256> {
    mul_div(
        amount,
        pow10(u32::from(decimals))?,
        pow10(constants::STANDARD_DECIMALS)?,
    )
}

/// Withdrawal per deposit, standardized, scaled by `10^18`.
///
/// # Errors
/// `AssetAmountZero` if the deposit standardizes to zero.
pub fn unit_price(
    deposit: U256,
    deposit_decimals: u8,
    withdrawal: U256,
    withdrawal_decimals: u8,
) -> Result<U256> {
    let std_deposit = standardize(deposit, deposit_decimals)?;
    if std_deposit.is_zero() {
        return Err(DotcError::AssetAmountZero);
    }
    mul_div(
        standardize(withdrawal, withdrawal_decimals)?,
        pow10(constants::RATE_DECIMALS)?,
        std_deposit,
    )
}

/// Deposit released for paying `withdrawal` at `unit_price`.
pub fn deposit_for_withdrawal(
    withdrawal: U256,
    withdrawal_decimals: u8,
    unit_price: U256,
    deposit_decimals: u8,
) -> Result<U256> {
    let std_deposit = mul_div(
        standardize(withdrawal, withdrawal_decimals)?,
        pow10(constants::RATE_DECIMALS)?,
        unit_price,
    )?;
    unstandardize(std_deposit, deposit_decimals)
}

/// Withdrawal owed for `deposit` at `unit_price`.
pub fn withdrawal_for_deposit(
    deposit: U256,
    deposit_decimals: u8,
    unit_price: U256,
    withdrawal_decimals: u8,
) -> Result<U256> {
    let std_withdrawal = mul_div(
        standardize(deposit, deposit_decimals)?,
        unit_price,
        pow10(constants::RATE_DECIMALS)?,
    )?;
    unstandardize(std_withdrawal, withdrawal_decimals)
}
