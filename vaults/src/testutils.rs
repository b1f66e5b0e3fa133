#![cfg(test)]

use crate::{
    constants::SCALAR_18,
    storage::{self, CollateralParams, PriceFeedConfig},
    VaultsContract,
};
use sep_40_oracle::testutils::{Asset as MockAsset, MockPriceOracleClient, MockPriceOracleWASM};
use sep_40_oracle::Asset;
use sep_41_token::testutils::{MockTokenClient, MockTokenWASM};
use soroban_sdk::{testutils::Address as _, vec, Address, Env, IntoVal, Symbol};

pub(crate) fn create_vaults(e: &Env) -> Address {
    e.register_contract(None, VaultsContract {})
}

//************************************************
//           External Contract Helpers
//************************************************

// ***** Token *****

pub(crate) fn create_token_contract<'a>(
    e: &Env,
    admin: &Address,
    decimals: &u32,
) -> (Address, MockTokenClient<'a>) {
    let contract_address = Address::generate(e);
    e.register_contract_wasm(&contract_address, MockTokenWASM);
    let client = MockTokenClient::new(e, &contract_address);
    client.initialize(admin, decimals, &"unit".into_val(e), &"test".into_val(e));
    (contract_address, client)
}

pub(crate) fn create_collateral_token<'a>(
    e: &Env,
    vaults: &Address,
    admin: &Address,
    decimals: &u32,
) -> (Address, MockTokenClient<'a>) {
    let (contract_address, client) = create_token_contract(e, admin, decimals);

    e.as_contract(vaults, || {
        storage::set_collateral_token(e, &contract_address);
        storage::set_collateral_decimals(e, decimals);
    });
    (contract_address, client)
}

/// The mint admin for the stable token is the vaults contract itself, the
/// same wiring a deployment sets up.
pub(crate) fn create_stable_token<'a>(e: &Env, vaults: &Address) -> (Address, MockTokenClient<'a>) {
    let (contract_address, client) = create_token_contract(e, vaults, &18);

    e.as_contract(vaults, || {
        storage::set_stable_token(e, &contract_address);
    });
    (contract_address, client)
}

//***** Oracle ******

pub(crate) fn create_mock_feed<'a>(e: &Env) -> (Address, MockPriceOracleClient<'a>) {
    let contract_address = e.register_contract_wasm(None, MockPriceOracleWASM);
    (
        contract_address.clone(),
        MockPriceOracleClient::new(e, &contract_address),
    )
}

/// Register a mock feed pair quoting the collateral and the reference
/// currency against USD with 7 decimal prices, and store the matching feed
/// config on the vaults contract.
pub(crate) fn setup_feeds<'a>(
    e: &Env,
    vaults: &Address,
    admin: &Address,
    collateral_token: &Address,
    collateral_price: i128,
    reference_price: i128,
) -> (MockPriceOracleClient<'a>, MockPriceOracleClient<'a>) {
    let (collateral_feed, collateral_feed_client) = create_mock_feed(e);
    let (reference_feed, reference_feed_client) = create_mock_feed(e);

    collateral_feed_client.set_data(
        admin,
        &MockAsset::Other(Symbol::new(e, "USD")),
        &vec![e, MockAsset::Stellar(collateral_token.clone())],
        &7,
        &300,
    );
    collateral_feed_client.set_price(&vec![e, collateral_price], &e.ledger().timestamp());

    reference_feed_client.set_data(
        admin,
        &MockAsset::Other(Symbol::new(e, "USD")),
        &vec![e, MockAsset::Other(Symbol::new(e, "EUR"))],
        &7,
        &300,
    );
    reference_feed_client.set_price(&vec![e, reference_price], &e.ledger().timestamp());

    e.as_contract(vaults, || {
        storage::set_feeds(
            e,
            &PriceFeedConfig {
                collateral_feed,
                collateral_asset: Asset::Stellar(collateral_token.clone()),
                reference_feed,
                reference_asset: Asset::Other(Symbol::new(e, "EUR")),
                staleness_window: 24 * 60 * 60,
            },
        );
    });

    (collateral_feed_client, reference_feed_client)
}

//************************************************
//            Object Creation Helpers
//************************************************

//***** Params *****

pub(crate) fn default_params() -> CollateralParams {
    CollateralParams {
        min_collateral_ratio: 1_500_000_000_000_000_000,
        liquidation_ratio: 1_200_000_000_000_000_000,
        borrow_rate_per_second: 1_000_000_001_000_000_000,
        origination_fee: 0,
        liquidation_bonus: 1_050_000_000_000_000_000,
        liquidation_fee: 100_000_000_000_000_000,
        debt_ceiling: 10_000_000 * SCALAR_18,
    }
}
