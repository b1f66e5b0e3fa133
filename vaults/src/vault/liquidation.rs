use sep_41_token::TokenClient;
use soroban_sdk::{panic_with_error, Address, Env};

use crate::{
    constants::SCALAR_18,
    errors::VaultError,
    math,
    storage::{self, Vault},
    validator::require_positive,
};

use super::{actions::notify_debt_change, health::HealthData, market::Market};

/// Perform a partial liquidation of an unhealthy vault
///
/// The liquidator burns `repay_amount` stable units and receives the
/// repayment valued in collateral, scaled up by the liquidation bonus. No
/// liquidation fee is taken on this path.
///
/// Returns the collateral paid out to the liquidator
pub fn execute_liquidate_partial(
    e: &Env,
    from: &Address,
    vault_id: u64,
    repay_amount: i128,
) -> i128 {
    require_positive(e, &repay_amount);
    let mut market = Market::load(e);

    let mut vault = Vault::load(e, vault_id);
    let interest = vault.accrue(e, market.params.borrow_rate_per_second);

    let health_data = HealthData::calculate(e, &mut market, &vault);
    health_data.require_liquidatable(e, market.params.liquidation_ratio);
    if repay_amount > vault.debt_principal {
        panic_with_error!(e, VaultError::DebtExceeded);
    }

    let bonus_value = math::mul_floor(e, repay_amount, market.params.liquidation_bonus, SCALAR_18);
    let collateral_out = market.to_collateral(e, bonus_value);
    if collateral_out > vault.collateral {
        panic_with_error!(e, VaultError::InsufficientBalance);
    }

    TokenClient::new(e, &market.stable_token).burn(from, &repay_amount);
    vault.remove_debt(e, repay_amount);
    vault.remove_collateral(e, collateral_out);
    TokenClient::new(e, &market.collateral_token).transfer(
        &e.current_contract_address(),
        from,
        &collateral_out,
    );

    vault.store(e, vault_id);
    storage::set_total_debt(e, &(storage::get_total_debt(e) + interest - repay_amount));

    notify_debt_change(e, &market, &vault.owner, -repay_amount);
    collateral_out
}

/// Perform a full liquidation of an unhealthy vault
///
/// The liquidator pays the collateral value discounted by the liquidation
/// bonus and receives the entire collateral balance, leaving the vault
/// zeroed. A payment beyond the debt is routed to the insurance reserve net
/// of the liquidation fee. A payment short of the debt is topped up from the
/// insurance reserve, failing the whole operation if the reserve cannot
/// cover it.
///
/// Returns the debt repaid and the collateral paid out to the liquidator
pub fn execute_liquidate(e: &Env, from: &Address, vault_id: u64) -> (i128, i128) {
    let mut market = Market::load(e);

    let mut vault = Vault::load(e, vault_id);
    let interest = vault.accrue(e, market.params.borrow_rate_per_second);

    let health_data = HealthData::calculate(e, &mut market, &vault);
    health_data.require_liquidatable(e, market.params.liquidation_ratio);

    let debt = vault.debt_principal;
    let collateral_out = vault.collateral;
    let discounted_value = math::mul_floor(
        e,
        health_data.collateral_value,
        SCALAR_18,
        market.params.liquidation_bonus,
    );

    let stable_client = TokenClient::new(e, &market.stable_token);
    if discounted_value >= debt {
        stable_client.burn(from, &debt);
        let surplus = discounted_value - debt;
        if surplus > 0 {
            stable_client.transfer(from, &e.current_contract_address(), &surplus);
            let fee = math::mul_floor(e, surplus, market.params.liquidation_fee, SCALAR_18);
            storage::set_protocol_fees(e, &(storage::get_protocol_fees(e) + fee));
            storage::set_insurance_balance(
                e,
                &(storage::get_insurance_balance(e) + surplus - fee),
            );
        }
    } else {
        let shortfall = debt - discounted_value;
        let insurance_balance = storage::get_insurance_balance(e);
        if shortfall > insurance_balance {
            panic_with_error!(e, VaultError::InsuranceFundInsufficient);
        }
        stable_client.transfer(&e.current_contract_address(), from, &shortfall);
        stable_client.burn(from, &debt);
        storage::set_insurance_balance(e, &(insurance_balance - shortfall));
    }

    vault.remove_debt(e, debt);
    vault.remove_collateral(e, collateral_out);
    TokenClient::new(e, &market.collateral_token).transfer(
        &e.current_contract_address(),
        from,
        &collateral_out,
    );

    vault.store(e, vault_id);
    storage::set_total_debt(e, &(storage::get_total_debt(e) + interest - debt));

    notify_debt_change(e, &market, &vault.owner, -debt);
    (debt, collateral_out)
}

/// Perform a deposit of stable units into the insurance reserve
pub fn execute_fund_insurance(e: &Env, from: &Address, amount: i128) {
    require_positive(e, &amount);

    TokenClient::new(e, &storage::get_stable_token(e)).transfer(
        from,
        &e.current_contract_address(),
        &amount,
    );
    storage::set_insurance_balance(e, &(storage::get_insurance_balance(e) + amount));
}

/// Perform a withdrawal from the protocol fee bucket
///
/// ### Panics
/// If the amount exceeds the accumulated fees (BalanceError)
pub fn execute_claim_fees(e: &Env, to: &Address, amount: i128) {
    require_positive(e, &amount);

    let protocol_fees = storage::get_protocol_fees(e);
    if amount > protocol_fees {
        panic_with_error!(e, VaultError::BalanceError);
    }
    storage::set_protocol_fees(e, &(protocol_fees - amount));
    TokenClient::new(e, &storage::get_stable_token(e)).transfer(
        &e.current_contract_address(),
        to,
        &amount,
    );
}
