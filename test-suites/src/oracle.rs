use soroban_sdk::{testutils::Address as _, Address, Env};

use sep_40_oracle::testutils::{MockPriceOracleClient, MockPriceOracleWASM};

/// Deploy a mock SEP-40 price feed
pub fn create_mock_feed<'a>(e: &Env) -> (Address, MockPriceOracleClient<'a>) {
    let contract_id = Address::generate(e);
    e.register_contract_wasm(&contract_id, MockPriceOracleWASM);
    (
        contract_id.clone(),
        MockPriceOracleClient::new(e, &contract_id),
    )
}
