use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::test_fixture::SCALAR_18;
use vaults::{CollateralParams, VaultsClient, VaultsContract};

pub fn create_vaults<'a>(e: &Env) -> (Address, VaultsClient<'a>) {
    let contract_id = Address::generate(e);
    e.register_contract(&contract_id, VaultsContract {});
    (contract_id.clone(), VaultsClient::new(e, &contract_id))
}

pub fn default_params() -> CollateralParams {
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
