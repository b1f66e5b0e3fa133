use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{unwrap::UnwrapOptimized, Env};

use crate::{constants::SCALAR_18, math};

/// Calculate the multiplicative accrual factor `rate_per_second ^ elapsed`,
/// in 18 decimals, by exponentiation by squaring with floor rounding at each
/// step.
///
/// ### Arguments
/// * `rate_per_second` - The per second accrual factor in 18 decimals
/// * `elapsed` - The number of seconds to compound over
pub fn accrual_factor(rate_per_second: i128, elapsed: u64) -> i128 {
    if elapsed == 0 || rate_per_second == SCALAR_18 {
        return SCALAR_18;
    }
    let mut result = SCALAR_18;
    let mut base = rate_per_second;
    let mut exp = elapsed;
    loop {
        if exp & 1 == 1 {
            result = result.fixed_mul_floor(base, SCALAR_18).unwrap_optimized();
        }
        exp >>= 1;
        if exp == 0 {
            break;
        }
        base = base.fixed_mul_floor(base, SCALAR_18).unwrap_optimized();
    }
    result
}

/// Compound a debt principal forward by `elapsed` seconds. Rounds down.
///
/// ### Arguments
/// * `principal` - The debt principal in 18 decimals
/// * `rate_per_second` - The per second accrual factor in 18 decimals
/// * `elapsed` - The number of seconds since the principal was last compounded
///
/// ### Panics
/// If the compounded principal does not fit in an i128
pub fn compound_principal(e: &Env, principal: i128, rate_per_second: i128, elapsed: u64) -> i128 {
    if principal == 0 {
        return 0;
    }
    let factor = accrual_factor(rate_per_second, elapsed);
    math::mul_floor(e, principal, factor, SCALAR_18)
}
