#![cfg(test)]

use soroban_sdk::{testutils::Address as _, Address};
use test_suites::{
    create_fixture_with_data,
    test_fixture::{SCALAR_18, SCALAR_7},
};

/// Test that every debt changing operation reports to the notifier, and
/// that collateral only operations stay silent
#[test]
fn test_notifier_receives_debt_changes() {
    let fixture = create_fixture_with_data();
    let frodo = fixture.users.get(0).unwrap();

    // the whale borrow from the fixture setup is already recorded
    assert_eq!(fixture.notifier.call_count(), 1);
    let call = fixture.notifier.last_call().unwrap();
    assert_eq!(call.collateral, fixture.collateral.address);
    assert_eq!(call.owner, frodo.clone());
    assert_eq!(call.delta, 1_000_000 * SCALAR_18);

    let samwise = Address::generate(&fixture.env);
    fixture.collateral.mint(&samwise, &(20 * SCALAR_7));
    let vault_id = fixture
        .vaults
        .deposit_and_borrow(&samwise, &(10 * SCALAR_7), &(10_000 * SCALAR_18));
    assert_eq!(fixture.notifier.call_count(), 2);
    let call = fixture.notifier.last_call().unwrap();
    assert_eq!(call.owner, samwise);
    assert_eq!(call.delta, 10_000 * SCALAR_18);

    fixture.vaults.repay(&samwise, &vault_id, &(4_000 * SCALAR_18));
    assert_eq!(fixture.notifier.call_count(), 3);
    assert_eq!(
        fixture.notifier.last_call().unwrap().delta,
        -(4_000 * SCALAR_18)
    );

    // collateral moves are not debt changes
    fixture.vaults.deposit(&samwise, &(1 * SCALAR_7));
    fixture.vaults.withdraw(&samwise, &vault_id, &(1 * SCALAR_7));
    assert_eq!(fixture.notifier.call_count(), 3);

    fixture.vaults.repay_all(&samwise, &vault_id);
    assert_eq!(fixture.notifier.call_count(), 4);
    assert_eq!(
        fixture.notifier.last_call().unwrap().delta,
        -(6_000 * SCALAR_18)
    );

    // liquidations report the repaid debt
    fixture.vaults.borrow(&samwise, &vault_id, &(10_000 * SCALAR_18));
    assert_eq!(fixture.notifier.call_count(), 5);
    fixture.set_collateral_price(1100_0000000);

    let merry = Address::generate(&fixture.env);
    fixture.stable.mint(&merry, &(12_000 * SCALAR_18));
    fixture
        .vaults
        .liquidate_partial(&merry, &vault_id, &(2_000 * SCALAR_18));
    assert_eq!(fixture.notifier.call_count(), 6);
    assert_eq!(
        fixture.notifier.last_call().unwrap().delta,
        -(2_000 * SCALAR_18)
    );

    fixture.vaults.liquidate(&merry, &vault_id);
    assert_eq!(fixture.notifier.call_count(), 7);
    let call = fixture.notifier.last_call().unwrap();
    assert_eq!(call.owner, samwise);
    assert_eq!(call.delta, -(8_000 * SCALAR_18));
}

/// A failing notifier must never block the operation that reported to it
#[test]
fn test_notifier_failure_swallowed() {
    let fixture = create_fixture_with_data();

    fixture.notifier.set_fail(&true);

    let samwise = Address::generate(&fixture.env);
    fixture.collateral.mint(&samwise, &(10 * SCALAR_7));
    let vault_id = fixture
        .vaults
        .deposit_and_borrow(&samwise, &(10 * SCALAR_7), &(10_000 * SCALAR_18));
    assert_eq!(fixture.stable.balance(&samwise), 10_000 * SCALAR_18);
    assert_eq!(
        fixture.vaults.get_vault(&vault_id).debt_principal,
        10_000 * SCALAR_18
    );
    assert_eq!(fixture.notifier.call_count(), 1);

    fixture.notifier.set_fail(&false);
    fixture.vaults.repay(&samwise, &vault_id, &(1_000 * SCALAR_18));
    assert_eq!(fixture.notifier.call_count(), 2);
    assert_eq!(
        fixture.notifier.last_call().unwrap().delta,
        -(1_000 * SCALAR_18)
    );
}
