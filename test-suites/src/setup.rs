use soroban_sdk::{testutils::Address as _, Address};

use crate::test_fixture::{TestFixture, SCALAR_18, SCALAR_7};

/// Create a test fixture with a 7 decimal collateral token and a seeded
/// market.
///
/// The whale (users[0]) holds 10k collateral units on top of a vault with
/// 10k collateral units and a 1m stable unit debt, and has funded the
/// insurance reserve with 10k stable units.
pub fn create_fixture_with_data<'a>() -> TestFixture<'a> {
    let mut fixture = TestFixture::create(7);

    let frodo = Address::generate(&fixture.env);
    fixture.users.push(frodo.clone());
    fixture.collateral.mint(&frodo, &(20_000 * SCALAR_7));

    fixture
        .vaults
        .deposit_and_borrow(&frodo, &(10_000 * SCALAR_7), &(1_000_000 * SCALAR_18));
    fixture.vaults.fund_insurance(&frodo, &(10_000 * SCALAR_18));

    fixture
}
