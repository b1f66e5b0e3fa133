use soroban_sdk::{panic_with_error, Env, I256};

use crate::errors::VaultError;

/// Compute `x * y / denominator` rounding down, with 256 bit intermediates.
///
/// All arguments are expected to be non-negative and the denominator
/// non-zero.
///
/// ### Panics
/// If the result does not fit in an i128 (OverflowError)
pub fn mul_floor(e: &Env, x: i128, y: i128, denominator: i128) -> i128 {
    let result = I256::from_i128(e, x)
        .mul(&I256::from_i128(e, y))
        .div(&I256::from_i128(e, denominator));
    checked_to_i128(e, &result)
}

/// Compute `x * y / denominator` rounding up, with 256 bit intermediates.
///
/// All arguments are expected to be non-negative and the denominator
/// non-zero.
///
/// ### Panics
/// If the result does not fit in an i128 (OverflowError)
pub fn mul_ceil(e: &Env, x: i128, y: i128, denominator: i128) -> i128 {
    let denominator = I256::from_i128(e, denominator);
    let result = I256::from_i128(e, x)
        .mul(&I256::from_i128(e, y))
        .add(&denominator)
        .sub(&I256::from_i32(e, 1))
        .div(&denominator);
    checked_to_i128(e, &result)
}

/// Narrow a 256 bit value back to an i128
///
/// ### Panics
/// If the value does not fit in an i128 (OverflowError)
pub(crate) fn checked_to_i128(e: &Env, value: &I256) -> i128 {
    match value.to_i128() {
        Some(value) => value,
        None => panic_with_error!(e, VaultError::OverflowError),
    }
}
