use soroban_sdk::{panic_with_error, Env, I256};

use crate::{constants::SCALAR_18, errors::VaultError, math, storage::Vault};

use super::market::Market;

pub struct HealthData {
    /// The vault's collateral valued in the stable unit, in 18 decimals
    pub collateral_value: i128,
    /// The vault's debt in the stable unit, in 18 decimals
    pub debt: i128,
}

impl HealthData {
    /// Calculate the health data for a vault at the current oracle rate
    ///
    /// Expects the vault's debt to already be accrued to the current ledger
    /// timestamp.
    ///
    /// ### Arguments
    /// * `market` - The market
    /// * `vault` - The vault to calculate health data for
    pub fn calculate(e: &Env, market: &mut Market, vault: &Vault) -> Self {
        HealthData {
            collateral_value: market.to_stable(e, vault.collateral),
            debt: vault.debt_principal,
        }
    }

    /// Check whether the collateral value covers the debt scaled by a ratio
    /// in 18 decimals. The products are compared in 256 bits, so the check
    /// carries no division rounding. A vault with no debt meets any ratio.
    pub fn meets_ratio(&self, e: &Env, ratio: i128) -> bool {
        if self.debt == 0 {
            return true;
        }
        let lhs = I256::from_i128(e, self.collateral_value).mul(&I256::from_i128(e, SCALAR_18));
        let rhs = I256::from_i128(e, self.debt).mul(&I256::from_i128(e, ratio));
        lhs >= rhs
    }

    /// Return the vault's collateral ratio in 18 decimals, rounded down. A
    /// vault with no debt reports i128::MAX.
    pub fn as_ratio(&self, e: &Env) -> i128 {
        if self.debt == 0 {
            return i128::MAX;
        }
        math::mul_floor(e, self.collateral_value, SCALAR_18, self.debt)
    }

    /// Check if the vault meets the minimum collateral ratio, panic if not
    ///
    /// ### Panics
    /// If the vault is below the minimum collateral ratio (InsufficientCollateral)
    pub fn require_healthy(&self, e: &Env, min_collateral_ratio: i128) {
        if !self.meets_ratio(e, min_collateral_ratio) {
            panic_with_error!(e, VaultError::InsufficientCollateral);
        }
    }

    /// Check if the vault is below the liquidation ratio, panic if not
    ///
    /// ### Panics
    /// If the vault meets the liquidation ratio or has no debt (NotLiquidatable)
    pub fn require_liquidatable(&self, e: &Env, liquidation_ratio: i128) {
        if self.meets_ratio(e, liquidation_ratio) {
            panic_with_error!(e, VaultError::NotLiquidatable);
        }
    }
}
