use soroban_sdk::{panic_with_error, Address, Env};

use crate::{
    constants::{MAX_COLLATERAL_DECIMALS, SCALAR_18},
    errors::VaultError,
    storage::{self, CollateralParams, PriceFeedConfig},
};

/// Initialize the vaults contract for one collateral type
///
/// Panics if the contract is already initialized or the arguments are invalid
#[allow(clippy::too_many_arguments)]
pub fn execute_initialize(
    e: &Env,
    manager: &Address,
    collateral_token: &Address,
    collateral_decimals: u32,
    stable_token: &Address,
    feeds: &PriceFeedConfig,
    params: &CollateralParams,
) {
    if storage::has_manager(e) {
        panic_with_error!(e, VaultError::AlreadyInitializedError);
    }
    if collateral_decimals > MAX_COLLATERAL_DECIMALS {
        panic_with_error!(e, VaultError::InvalidConfig);
    }
    require_valid_params(e, params);
    require_valid_feeds(e, feeds);

    storage::set_manager(e, manager);
    storage::set_collateral_token(e, collateral_token);
    storage::set_collateral_decimals(e, &collateral_decimals);
    storage::set_stable_token(e, stable_token);
    storage::set_feeds(e, feeds);
    storage::set_params(e, params);
}

/// Update the manager
pub fn execute_set_manager(e: &Env, new_manager: &Address) {
    storage::set_manager(e, new_manager);
}

/// Update the collateral parameters
pub fn execute_update_params(e: &Env, params: &CollateralParams) {
    require_valid_params(e, params);
    storage::set_params(e, params);
}

/// Update the price feed pair
pub fn execute_update_feeds(e: &Env, feeds: &PriceFeedConfig) {
    require_valid_feeds(e, feeds);
    storage::set_feeds(e, feeds);
}

/// Update the debt notifier hook
pub fn execute_set_debt_notifier(e: &Env, notifier: &Address) {
    storage::set_debt_notifier(e, notifier);
}

fn require_valid_params(e: &Env, params: &CollateralParams) {
    if params.min_collateral_ratio < params.liquidation_ratio
        || params.liquidation_ratio < SCALAR_18
        || params.liquidation_bonus < SCALAR_18
        || (params.origination_fee < 0 || params.origination_fee >= SCALAR_18)
        || (params.liquidation_fee < 0 || params.liquidation_fee >= SCALAR_18)
        || params.borrow_rate_per_second < SCALAR_18
        || params.debt_ceiling < 0
    {
        panic_with_error!(e, VaultError::InvalidConfig);
    }
}

fn require_valid_feeds(e: &Env, feeds: &PriceFeedConfig) {
    if feeds.staleness_window == 0 {
        panic_with_error!(e, VaultError::InvalidConfig);
    }
}
