use soroban_sdk::{panic_with_error, Address, Env};

use crate::{
    errors::VaultError,
    storage::{self, Vault},
};

use super::accrual;

/// Create a vault for an owner and assign it the next sequential id.
///
/// Vault ids start at 1 and are never reused. The owner index is written in
/// the same step, so an owner can never hold two vaults.
///
/// ### Arguments
/// * `owner` - The address that will own the vault
///
/// ### Panics
/// If the owner already has a vault (AlreadyExists)
pub fn create_vault(e: &Env, owner: &Address) -> u64 {
    if storage::get_vault_id(e, owner) != 0 {
        panic_with_error!(e, VaultError::AlreadyExists);
    }
    let vault_id = storage::get_vault_count(e) + 1;
    let vault = Vault {
        owner: owner.clone(),
        collateral: 0,
        debt_principal: 0,
        created_at: e.ledger().timestamp(),
        last_accrual: e.ledger().timestamp(),
    };
    storage::set_vault_count(e, &vault_id);
    storage::set_vault_id(e, owner, &vault_id);
    storage::set_vault(e, &vault_id, &vault);
    vault_id
}

impl Vault {
    /// Load a vault from the ledger
    ///
    /// ### Arguments
    /// * `vault_id` - The id of the vault
    ///
    /// ### Panics
    /// If no vault exists for the id (NotFound)
    pub fn load(e: &Env, vault_id: u64) -> Vault {
        match storage::get_vault(e, &vault_id) {
            Some(vault) => vault,
            None => panic_with_error!(e, VaultError::NotFound),
        }
    }

    /// Store the vault to the ledger
    ///
    /// ### Arguments
    /// * `vault_id` - The id of the vault
    pub fn store(&self, e: &Env, vault_id: u64) {
        storage::set_vault(e, &vault_id, self);
    }

    /// Compound the vault's debt principal forward to the current ledger
    /// timestamp and return the interest accrued, so the caller can keep the
    /// aggregate debt in step. Leaves the vault untouched when no time has
    /// passed or no debt is open.
    ///
    /// ### Arguments
    /// * `rate_per_second` - The per second accrual factor in 18 decimals
    pub fn accrue(&mut self, e: &Env, rate_per_second: i128) -> i128 {
        let now = e.ledger().timestamp();
        if now == self.last_accrual || self.debt_principal == 0 {
            self.last_accrual = now;
            return 0;
        }
        let elapsed = now - self.last_accrual;
        let new_principal =
            accrual::compound_principal(e, self.debt_principal, rate_per_second, elapsed);
        let interest = new_principal - self.debt_principal;
        self.debt_principal = new_principal;
        self.last_accrual = now;
        interest
    }

    /// Require that a caller is the vault owner
    ///
    /// ### Arguments
    /// * `caller` - The address attempting to act on the vault
    ///
    /// ### Panics
    /// If the caller is not the owner (UnauthorizedError)
    pub fn require_owner(&self, e: &Env, caller: &Address) {
        if self.owner != *caller {
            panic_with_error!(e, VaultError::UnauthorizedError);
        }
    }

    /// Add collateral to the vault
    pub fn add_collateral(&mut self, amount: i128) {
        self.collateral += amount;
    }

    /// Remove collateral from the vault
    ///
    /// ### Panics
    /// If the vault holds less collateral than requested (InsufficientBalance)
    pub fn remove_collateral(&mut self, e: &Env, amount: i128) {
        if amount > self.collateral {
            panic_with_error!(e, VaultError::InsufficientBalance);
        }
        self.collateral -= amount;
    }

    /// Add debt principal to the vault
    pub fn add_debt(&mut self, amount: i128) {
        self.debt_principal += amount;
    }

    /// Remove debt principal from the vault
    ///
    /// ### Panics
    /// If the vault owes less than requested (DebtExceeded)
    pub fn remove_debt(&mut self, e: &Env, amount: i128) {
        if amount > self.debt_principal {
            panic_with_error!(e, VaultError::DebtExceeded);
        }
        self.debt_principal -= amount;
    }
}
