use soroban_sdk::{panic_with_error, Env};

use crate::errors::VaultError;

/// Require that an incoming amount is not negative
///
/// ### Arguments
/// * `amount` - The amount to check
///
/// ### Panics
/// If the number is negative
pub fn require_nonnegative(e: &Env, amount: &i128) {
    if amount.is_negative() {
        panic_with_error!(e, VaultError::NegativeAmountError);
    }
}

/// Require that an incoming amount is strictly positive
///
/// ### Arguments
/// * `amount` - The amount to check
///
/// ### Panics
/// If the number is negative or zero
pub fn require_positive(e: &Env, amount: &i128) {
    require_nonnegative(e, amount);
    if *amount == 0 {
        panic_with_error!(e, VaultError::InvalidAmount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_nonnegative() {
        let e = Env::default();
        require_nonnegative(&e, &0);
        require_nonnegative(&e, &1);
        require_nonnegative(&e, &i128::MAX);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #8)")]
    fn test_require_nonnegative_panics_on_negative() {
        let e = Env::default();
        require_nonnegative(&e, &-1);
    }

    #[test]
    fn test_require_positive() {
        let e = Env::default();
        require_positive(&e, &1);
        require_positive(&e, &i128::MAX);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1300)")]
    fn test_require_positive_panics_on_zero() {
        let e = Env::default();
        require_positive(&e, &0);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #8)")]
    fn test_require_positive_panics_on_negative() {
        let e = Env::default();
        require_positive(&e, &-5);
    }
}
