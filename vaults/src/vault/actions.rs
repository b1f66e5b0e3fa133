use sep_41_token::TokenClient;
use soroban_sdk::{
    panic_with_error, token::StellarAssetClient, vec, Address, Env, IntoVal, InvokeError, Symbol,
    Val, Vec,
};

use crate::{
    constants::SCALAR_18,
    errors::VaultError,
    math,
    storage::{self, Vault},
    validator::require_positive,
};

use super::{create_vault, health::HealthData, market::Market};

/// Perform a deposit of collateral, opening a vault for the owner on first
/// use and reusing the owner's row afterwards
///
/// Returns the id of the vault deposited into
pub fn execute_deposit(e: &Env, from: &Address, amount: i128) -> u64 {
    require_positive(e, &amount);
    let market = Market::load(e);

    let mut vault_id = storage::get_vault_id(e, from);
    if vault_id == 0 {
        vault_id = create_vault(e, from);
    }
    let mut vault = Vault::load(e, vault_id);
    let interest = vault.accrue(e, market.params.borrow_rate_per_second);

    TokenClient::new(e, &market.collateral_token).transfer(
        from,
        &e.current_contract_address(),
        &amount,
    );
    vault.add_collateral(amount);

    vault.store(e, vault_id);
    storage::set_total_debt(e, &(storage::get_total_debt(e) + interest));
    vault_id
}

/// Perform a deposit of collateral into an existing vault. Any funder may
/// top up any vault.
pub fn execute_deposit_by_id(e: &Env, from: &Address, vault_id: u64, amount: i128) {
    require_positive(e, &amount);
    let market = Market::load(e);

    let mut vault = Vault::load(e, vault_id);
    let interest = vault.accrue(e, market.params.borrow_rate_per_second);

    TokenClient::new(e, &market.collateral_token).transfer(
        from,
        &e.current_contract_address(),
        &amount,
    );
    vault.add_collateral(amount);

    vault.store(e, vault_id);
    storage::set_total_debt(e, &(storage::get_total_debt(e) + interest));
}

/// Perform a borrow of stable units against a vault's collateral
///
/// Returns the debt delta added to the vault, the borrowed amount plus the
/// origination fee
pub fn execute_borrow(e: &Env, from: &Address, vault_id: u64, amount: i128) -> i128 {
    require_positive(e, &amount);
    let mut market = Market::load(e);

    let mut vault = Vault::load(e, vault_id);
    vault.require_owner(e, from);
    let interest = vault.accrue(e, market.params.borrow_rate_per_second);

    // the origination fee is borrowed alongside the face amount
    let debt_delta = math::mul_ceil(
        e,
        amount,
        SCALAR_18 + market.params.origination_fee,
        SCALAR_18,
    );
    let total_debt = storage::get_total_debt(e) + interest + debt_delta;
    if total_debt > market.params.debt_ceiling {
        panic_with_error!(e, VaultError::DebtCeilingExceeded);
    }

    vault.add_debt(debt_delta);
    let health_data = HealthData::calculate(e, &mut market, &vault);
    health_data.require_healthy(e, market.params.min_collateral_ratio);

    vault.store(e, vault_id);
    storage::set_total_debt(e, &total_debt);

    StellarAssetClient::new(e, &market.stable_token).mint(from, &amount);
    notify_debt_change(e, &market, &vault.owner, debt_delta);

    debt_delta
}

/// Perform a withdrawal of collateral from a vault
pub fn execute_withdraw(e: &Env, from: &Address, vault_id: u64, amount: i128) {
    require_positive(e, &amount);
    let mut market = Market::load(e);

    let mut vault = Vault::load(e, vault_id);
    vault.require_owner(e, from);
    let interest = vault.accrue(e, market.params.borrow_rate_per_second);

    vault.remove_collateral(e, amount);
    // a vault with no debt may exit without consulting the feeds
    if vault.debt_principal > 0 {
        let health_data = HealthData::calculate(e, &mut market, &vault);
        health_data.require_healthy(e, market.params.min_collateral_ratio);
    }

    vault.store(e, vault_id);
    storage::set_total_debt(e, &(storage::get_total_debt(e) + interest));

    TokenClient::new(e, &market.collateral_token).transfer(
        &e.current_contract_address(),
        from,
        &amount,
    );
}

/// Perform a repayment of a vault's debt, capped at the current accrued debt
///
/// Returns the amount of stable units burned from the caller
pub fn execute_repay(e: &Env, from: &Address, vault_id: u64, amount: i128) -> i128 {
    require_positive(e, &amount);
    repay_up_to(e, from, vault_id, amount)
}

/// Perform a repayment of a vault's entire accrued debt, driving it to
/// exactly zero
///
/// Returns the amount of stable units burned from the caller
pub fn execute_repay_all(e: &Env, from: &Address, vault_id: u64) -> i128 {
    repay_up_to(e, from, vault_id, i128::MAX)
}

fn repay_up_to(e: &Env, from: &Address, vault_id: u64, limit: i128) -> i128 {
    let market = Market::load(e);

    let mut vault = Vault::load(e, vault_id);
    let interest = vault.accrue(e, market.params.borrow_rate_per_second);

    let to_repay = limit.min(vault.debt_principal);
    if to_repay > 0 {
        TokenClient::new(e, &market.stable_token).burn(from, &to_repay);
        vault.remove_debt(e, to_repay);
    }

    vault.store(e, vault_id);
    storage::set_total_debt(e, &(storage::get_total_debt(e) + interest - to_repay));

    if to_repay > 0 {
        notify_debt_change(e, &market, &vault.owner, -to_repay);
    }
    to_repay
}

/// Report a debt change to the configured notifier contract, if any. The
/// notifier is best effort: a missing or failing notifier never aborts the
/// operation that triggered it.
pub(super) fn notify_debt_change(e: &Env, market: &Market, owner: &Address, delta: i128) {
    if let Some(notifier) = storage::get_debt_notifier(e) {
        let args: Vec<Val> = vec![
            e,
            market.collateral_token.into_val(e),
            owner.into_val(e),
            delta.into_val(e),
        ];
        let _ = e.try_invoke_contract::<Val, InvokeError>(
            &notifier,
            &Symbol::new(e, "debt_changed"),
            args,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils;
    use mock_debt_notifier::{MockDebtNotifier, MockDebtNotifierClient};
    use soroban_sdk::testutils::{Address as _, Ledger, LedgerInfo};

    #[test]
    fn test_execute_deposit() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            assert_eq!(vault_id, 1);

            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.owner, samwise);
            assert_eq!(vault.collateral, 10_0000000);
            assert_eq!(vault.debt_principal, 0);
            assert_eq!(collateral_client.balance(&vaults), 10_0000000);
            assert_eq!(collateral_client.balance(&samwise), 90_0000000);

            // a second deposit reuses the row
            let vault_id = execute_deposit(&e, &samwise, 5_0000000);
            assert_eq!(vault_id, 1);
            assert_eq!(storage::get_vault_count(&e), 1);

            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.collateral, 15_0000000);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1300)")]
    fn test_execute_deposit_panics_on_zero_amount() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, _) = testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());
            execute_deposit(&e, &samwise, 0);
        });
    }

    #[test]
    fn test_execute_deposit_by_id_any_funder() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);
        collateral_client.mint(&frodo, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_deposit_by_id(&e, &frodo, vault_id, 4_0000000);

            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.owner, samwise);
            assert_eq!(vault.collateral, 14_0000000);
            assert_eq!(collateral_client.balance(&frodo), 96_0000000);
            assert_eq!(collateral_client.balance(&vaults), 14_0000000);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1301)")]
    fn test_execute_deposit_by_id_panics_if_not_found() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let frodo = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&frodo, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());
            execute_deposit_by_id(&e, &frodo, 1, 4_0000000);
        });
    }

    #[test]
    fn test_execute_borrow() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        let (_, stable_client) = testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            // 10 collateral units at 2000 back an 8k draw at 250%
            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            let debt_delta = execute_borrow(&e, &samwise, vault_id, 8_000 * SCALAR_18);
            assert_eq!(debt_delta, 8_000 * SCALAR_18);

            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.debt_principal, 8_000 * SCALAR_18);
            assert_eq!(vault.collateral, 10_0000000);
            assert_eq!(stable_client.balance(&samwise), 8_000 * SCALAR_18);
            assert_eq!(storage::get_total_debt(&e), 8_000 * SCALAR_18);
        });
    }

    #[test]
    fn test_execute_borrow_charges_origination_fee() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        let (_, stable_client) = testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        let mut params = testutils::default_params();
        params.origination_fee = 5_000_000_000_000_000; // 0.5%

        e.as_contract(&vaults, || {
            storage::set_params(&e, &params);

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            let debt_delta = execute_borrow(&e, &samwise, vault_id, 8_000 * SCALAR_18);
            assert_eq!(debt_delta, 8_040 * SCALAR_18);

            // the fee is owed, not received
            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.debt_principal, 8_040 * SCALAR_18);
            assert_eq!(stable_client.balance(&samwise), 8_000 * SCALAR_18);
            assert_eq!(storage::get_total_debt(&e), 8_040 * SCALAR_18);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1304)")]
    fn test_execute_borrow_panics_below_min_ratio() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            // 20k of collateral cannot back a 14k draw at 150%
            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_borrow(&e, &samwise, vault_id, 14_000 * SCALAR_18);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1307)")]
    fn test_execute_borrow_panics_over_debt_ceiling() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        let mut params = testutils::default_params();
        params.debt_ceiling = 5_000 * SCALAR_18;

        e.as_contract(&vaults, || {
            storage::set_params(&e, &params);

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_borrow(&e, &samwise, vault_id, 6_000 * SCALAR_18);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #4)")]
    fn test_execute_borrow_panics_for_non_owner() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_borrow(&e, &frodo, vault_id, 1_000 * SCALAR_18);
        });
    }

    #[test]
    fn test_execute_borrow_invokes_notifier() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        let notifier = e.register_contract(None, MockDebtNotifier {});
        let notifier_client = MockDebtNotifierClient::new(&e, &notifier);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());
            storage::set_debt_notifier(&e, &notifier);

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_borrow(&e, &samwise, vault_id, 8_000 * SCALAR_18);
        });

        let call = notifier_client.last_call().unwrap();
        assert_eq!(call.collateral, collateral_token);
        assert_eq!(call.owner, samwise);
        assert_eq!(call.delta, 8_000 * SCALAR_18);
    }

    #[test]
    fn test_execute_withdraw() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_borrow(&e, &samwise, vault_id, 8_000 * SCALAR_18);

            // 14k of remaining collateral still covers 8k at 150%
            execute_withdraw(&e, &samwise, vault_id, 3_0000000);

            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.collateral, 7_0000000);
            assert_eq!(collateral_client.balance(&samwise), 93_0000000);
            assert_eq!(collateral_client.balance(&vaults), 7_0000000);
        });
    }

    #[test]
    fn test_execute_withdraw_zero_debt_ignores_feeds() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        e.ledger().set(LedgerInfo {
            timestamp: 600,
            protocol_version: 20,
            sequence_number: 100,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 2000000,
        });

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        let vault_id = e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());
            execute_deposit(&e, &samwise, 10_0000000)
        });

        // feeds go stale, an undebted vault can still exit in full
        e.ledger().set(LedgerInfo {
            timestamp: 600 + 48 * 60 * 60,
            protocol_version: 20,
            sequence_number: 200,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 2000000,
        });

        e.as_contract(&vaults, || {
            execute_withdraw(&e, &samwise, vault_id, 10_0000000);

            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.collateral, 0);
            assert_eq!(collateral_client.balance(&samwise), 100_0000000);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1304)")]
    fn test_execute_withdraw_panics_below_min_ratio() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_borrow(&e, &samwise, vault_id, 8_000 * SCALAR_18);

            // 10k of remaining collateral cannot cover 8k at 150%
            execute_withdraw(&e, &samwise, vault_id, 5_0000000);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1303)")]
    fn test_execute_withdraw_panics_if_exceeds_collateral() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_withdraw(&e, &samwise, vault_id, 10_0000001);
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #4)")]
    fn test_execute_withdraw_panics_for_non_owner() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_withdraw(&e, &frodo, vault_id, 1_0000000);
        });
    }

    #[test]
    fn test_execute_repay() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        let (_, stable_client) = testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_borrow(&e, &samwise, vault_id, 8_000 * SCALAR_18);

            let repaid = execute_repay(&e, &samwise, vault_id, 3_000 * SCALAR_18);
            assert_eq!(repaid, 3_000 * SCALAR_18);

            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.debt_principal, 5_000 * SCALAR_18);
            assert_eq!(stable_client.balance(&samwise), 5_000 * SCALAR_18);
            assert_eq!(storage::get_total_debt(&e), 5_000 * SCALAR_18);
        });
    }

    #[test]
    fn test_execute_repay_any_caller_capped_at_debt() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let frodo = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        let (_, stable_client) = testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);
        stable_client.mint(&frodo, &(10_000 * SCALAR_18));

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());

            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_borrow(&e, &samwise, vault_id, 8_000 * SCALAR_18);

            // frodo overpays on samwise's behalf, burn is capped
            let repaid = execute_repay(&e, &frodo, vault_id, 10_000 * SCALAR_18);
            assert_eq!(repaid, 8_000 * SCALAR_18);

            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.debt_principal, 0);
            assert_eq!(stable_client.balance(&frodo), 2_000 * SCALAR_18);
            assert_eq!(storage::get_total_debt(&e), 0);
        });
    }

    #[test]
    fn test_execute_repay_all_clears_accrued_debt() {
        let e = Env::default();
        e.budget().reset_unlimited();
        e.mock_all_auths_allowing_non_root_auth();

        e.ledger().set(LedgerInfo {
            timestamp: 600,
            protocol_version: 20,
            sequence_number: 100,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 2000000,
        });

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, collateral_client) =
            testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        let (_, stable_client) = testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);
        collateral_client.mint(&samwise, &100_0000000);
        stable_client.mint(&samwise, &(100 * SCALAR_18));

        let vault_id = e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());
            let vault_id = execute_deposit(&e, &samwise, 10_0000000);
            execute_borrow(&e, &samwise, vault_id, 8_000 * SCALAR_18);
            vault_id
        });

        // 1000 seconds of accrual at 1e-9 per second
        e.ledger().set(LedgerInfo {
            timestamp: 1_600,
            protocol_version: 20,
            sequence_number: 200,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 2000000,
        });

        e.as_contract(&vaults, || {
            let repaid = execute_repay_all(&e, &samwise, vault_id);
            let interest = repaid - 8_000 * SCALAR_18;
            assert!(interest > 8_000_000_000_000_000);
            assert!(interest < 8_000_010_000_000_000);

            let vault = Vault::load(&e, vault_id);
            assert_eq!(vault.debt_principal, 0);
            assert_eq!(storage::get_total_debt(&e), 0);
            assert_eq!(
                stable_client.balance(&samwise),
                8_100 * SCALAR_18 - repaid
            );
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #1300)")]
    fn test_execute_repay_panics_on_zero_amount() {
        let e = Env::default();
        e.mock_all_auths_allowing_non_root_auth();

        let bombadil = Address::generate(&e);
        let samwise = Address::generate(&e);
        let vaults = testutils::create_vaults(&e);
        let (collateral_token, _) = testutils::create_collateral_token(&e, &vaults, &bombadil, &7);
        testutils::create_stable_token(&e, &vaults);
        testutils::setup_feeds(&e, &vaults, &bombadil, &collateral_token, 2000_0000000, 1_0000000);

        e.as_contract(&vaults, || {
            storage::set_params(&e, &testutils::default_params());
            execute_repay(&e, &samwise, 1, 0);
        });
    }
}
