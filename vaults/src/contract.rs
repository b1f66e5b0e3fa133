use crate::{
    storage::{self, CollateralParams, PriceFeedConfig, Vault},
    vault::{self, HealthData, Market},
};
use soroban_sdk::{contract, contractclient, contractimpl, Address, Env, Symbol};

/// ### Vaults
///
/// A collateralized debt position ledger for a single collateral type,
/// issuing a stable unit against deposited collateral.
#[contract]
pub struct VaultsContract;

#[contractclient(name = "VaultsClient")]
pub trait Vaults {
    /// Initialize the vaults contract
    ///
    /// ### Arguments
    /// * `manager` - The Address for the manager
    /// * `collateral_token` - The contract address of the collateral token
    /// * `collateral_decimals` - The decimals collateral amounts are denominated in
    /// * `stable_token` - The contract address of the stable unit. The stable
    ///   unit's mint admin must be set to this contract.
    /// * `feeds` - The price feed pair valuing the collateral
    /// * `params` - The CollateralParams for the market
    ///
    /// ### Panics
    /// If initialize has already been called or the arguments are invalid
    #[allow(clippy::too_many_arguments)]
    fn initialize(
        e: Env,
        manager: Address,
        collateral_token: Address,
        collateral_decimals: u32,
        stable_token: Address,
        feeds: PriceFeedConfig,
        params: CollateralParams,
    );

    /// (Manager only) Set a new address as the manager
    ///
    /// ### Arguments
    /// * `new_manager` - The new manager address
    ///
    /// ### Panics
    /// If the caller is not the manager
    fn set_manager(e: Env, new_manager: Address);

    /// (Manager only) Update the collateral parameters
    ///
    /// ### Arguments
    /// * `params` - The new CollateralParams
    ///
    /// ### Panics
    /// If the caller is not the manager or the parameters are invalid
    fn update_params(e: Env, params: CollateralParams);

    /// (Manager only) Update the price feed pair
    ///
    /// ### Arguments
    /// * `feeds` - The new PriceFeedConfig
    ///
    /// ### Panics
    /// If the caller is not the manager or the config is invalid
    fn update_feeds(e: Env, feeds: PriceFeedConfig);

    /// (Manager only) Set the debt notifier hook contract
    ///
    /// The notifier is invoked best effort on every debt-changing operation
    /// and can never abort the operation that triggered it.
    ///
    /// ### Arguments
    /// * `notifier` - The notifier contract address
    ///
    /// ### Panics
    /// If the caller is not the manager
    fn set_debt_notifier(e: Env, notifier: Address);

    /// (Manager only) Withdraw accumulated liquidation fees
    ///
    /// ### Arguments
    /// * `to` - The Address to send the fees to
    /// * `amount` - The amount of stable units to withdraw
    ///
    /// ### Panics
    /// If the caller is not the manager or the amount exceeds the fee bucket
    fn claim_fees(e: Env, to: Address, amount: i128);

    /// Send stable units from "from" into the insurance reserve
    ///
    /// NOTE: This is not a deposit, and "from" will permanently lose access
    /// to the funds
    ///
    /// ### Arguments
    /// * `from` - The address funding the reserve
    /// * `amount` - The amount of stable units to add
    fn fund_insurance(e: Env, from: Address, amount: i128);

    /********** Vault **********/

    /// Deposit collateral from "from", opening a vault on first use and
    /// reusing the owner's vault afterwards
    ///
    /// Returns the id of the vault deposited into
    ///
    /// ### Arguments
    /// * `from` - The address depositing collateral
    /// * `amount` - The amount of collateral to deposit
    ///
    /// ### Panics
    /// If the amount is not positive
    fn deposit(e: Env, from: Address, amount: i128) -> u64;

    /// Deposit collateral from "from" into an existing vault. Any funder may
    /// top up any vault.
    ///
    /// ### Arguments
    /// * `from` - The address depositing collateral
    /// * `vault_id` - The id of the vault
    /// * `amount` - The amount of collateral to deposit
    ///
    /// ### Panics
    /// If the vault does not exist or the amount is not positive
    fn deposit_by_id(e: Env, from: Address, vault_id: u64, amount: i128);

    /// Deposit collateral from "from" and borrow against it in one
    /// invocation
    ///
    /// Returns the id of the vault acted on
    ///
    /// ### Arguments
    /// * `from` - The address depositing and borrowing
    /// * `deposit_amount` - The amount of collateral to deposit
    /// * `borrow_amount` - The amount of stable units to borrow
    ///
    /// ### Panics
    /// If either amount is not positive, or the borrow would leave the vault
    /// below the minimum collateral ratio or breach the debt ceiling
    fn deposit_and_borrow(
        e: Env,
        from: Address,
        deposit_amount: i128,
        borrow_amount: i128,
    ) -> u64;

    /// Borrow stable units against a vault's collateral. The origination fee
    /// is added to the vault's debt on top of the borrowed amount.
    ///
    /// ### Arguments
    /// * `from` - The vault owner
    /// * `vault_id` - The id of the vault
    /// * `amount` - The amount of stable units to borrow
    ///
    /// ### Panics
    /// If the caller is not the vault owner, the borrow would leave the
    /// vault below the minimum collateral ratio, or the debt ceiling would
    /// be breached
    fn borrow(e: Env, from: Address, vault_id: u64, amount: i128);

    /// Withdraw collateral from a vault. A vault with no debt may withdraw
    /// without consulting the price feeds.
    ///
    /// ### Arguments
    /// * `from` - The vault owner
    /// * `vault_id` - The id of the vault
    /// * `amount` - The amount of collateral to withdraw
    ///
    /// ### Panics
    /// If the caller is not the vault owner, the vault holds less collateral
    /// than requested, or the withdrawal would leave the vault below the
    /// minimum collateral ratio
    fn withdraw(e: Env, from: Address, vault_id: u64, amount: i128);

    /// Repay a vault's debt by burning stable units from "from", capped at
    /// the current accrued debt. Any caller may repay any vault.
    ///
    /// Returns the amount of stable units burned
    ///
    /// ### Arguments
    /// * `from` - The address repaying
    /// * `vault_id` - The id of the vault
    /// * `amount` - The amount of stable units to repay
    ///
    /// ### Panics
    /// If the vault does not exist or the amount is not positive
    fn repay(e: Env, from: Address, vault_id: u64, amount: i128) -> i128;

    /// Repay a vault's entire accrued debt, driving it to exactly zero
    ///
    /// Returns the amount of stable units burned
    ///
    /// ### Arguments
    /// * `from` - The address repaying
    /// * `vault_id` - The id of the vault
    fn repay_all(e: Env, from: Address, vault_id: u64) -> i128;

    /********** Liquidation **********/

    /// Fully liquidate an unhealthy vault. The liquidator pays the
    /// collateral value discounted by the liquidation bonus, receives the
    /// entire collateral balance, and the vault is zeroed. Payment beyond
    /// the debt is routed to the insurance reserve net of the liquidation
    /// fee; payment short of the debt is topped up from the insurance
    /// reserve.
    ///
    /// Returns the collateral paid out to the liquidator
    ///
    /// ### Arguments
    /// * `from` - The liquidator
    /// * `vault_id` - The id of the vault
    ///
    /// ### Panics
    /// If the vault is not below the liquidation ratio, or the insurance
    /// reserve cannot cover a shortfall
    fn liquidate(e: Env, from: Address, vault_id: u64) -> i128;

    /// Partially liquidate an unhealthy vault. The liquidator burns
    /// `repay_amount` stable units and receives the repayment valued in
    /// collateral, scaled up by the liquidation bonus.
    ///
    /// Returns the collateral paid out to the liquidator
    ///
    /// ### Arguments
    /// * `from` - The liquidator
    /// * `vault_id` - The id of the vault
    /// * `repay_amount` - The amount of stable units to repay
    ///
    /// ### Panics
    /// If the vault is not below the liquidation ratio, the repayment
    /// exceeds the vault's debt, or the payout exceeds the vault's
    /// collateral
    fn liquidate_partial(e: Env, from: Address, vault_id: u64, repay_amount: i128) -> i128;

    /********** Views **********/

    /// Fetch a vault as stored, with debt as of its last accrual
    ///
    /// ### Arguments
    /// * `vault_id` - The id of the vault
    ///
    /// ### Panics
    /// If the vault does not exist
    fn get_vault(e: Env, vault_id: u64) -> Vault;

    /// Fetch the id of an owner's vault, or 0 if the owner has none
    ///
    /// ### Arguments
    /// * `owner` - The owner to look up
    fn vault_id_of(e: Env, owner: Address) -> u64;

    /// Fetch the number of vaults ever created
    fn vault_count(e: Env) -> u64;

    /// Fetch a vault's debt accrued to the current ledger timestamp
    ///
    /// ### Arguments
    /// * `vault_id` - The id of the vault
    ///
    /// ### Panics
    /// If the vault does not exist
    fn accrued_debt(e: Env, vault_id: u64) -> i128;

    /// Fetch a vault's collateral ratio in 18 decimals at the current
    /// oracle rate, with debt accrued to the current ledger timestamp. A
    /// vault with no debt reports i128::MAX.
    ///
    /// ### Arguments
    /// * `vault_id` - The id of the vault
    ///
    /// ### Panics
    /// If the vault does not exist or a feed price is missing or stale
    fn health_ratio(e: Env, vault_id: u64) -> i128;

    /// Fetch the collateral to stable conversion rate in 18 decimals
    ///
    /// ### Panics
    /// If a feed price is missing, invalid, or stale
    fn current_rate(e: Env) -> i128;

    /// Fetch the aggregate debt across all vaults, as of each vault's last
    /// accrual
    fn total_debt(e: Env) -> i128;

    /// Fetch the insurance reserve balance
    fn insurance_balance(e: Env) -> i128;

    /// Fetch the accumulated liquidation fees
    fn protocol_fees(e: Env) -> i128;

    /// Fetch the collateral parameters
    fn get_params(e: Env) -> CollateralParams;

    /// Fetch the price feed pair config
    fn get_feeds(e: Env) -> PriceFeedConfig;

    /// Fetch the manager
    fn get_manager(e: Env) -> Address;

    /// Fetch the collateral token address
    fn get_collateral_token(e: Env) -> Address;

    /// Fetch the stable unit token address
    fn get_stable_token(e: Env) -> Address;

    /// Fetch the debt notifier hook, if one is set
    fn get_debt_notifier(e: Env) -> Option<Address>;
}

/// @dev
/// The contract implementation only manages the authorization / authentication required from the caller(s), and
/// utilizes other modules to carry out contract functionality.
#[contractimpl]
impl Vaults for VaultsContract {
    #[allow(clippy::too_many_arguments)]
    fn initialize(
        e: Env,
        manager: Address,
        collateral_token: Address,
        collateral_decimals: u32,
        stable_token: Address,
        feeds: PriceFeedConfig,
        params: CollateralParams,
    ) {
        storage::extend_instance(&e);

        vault::execute_initialize(
            &e,
            &manager,
            &collateral_token,
            collateral_decimals,
            &stable_token,
            &feeds,
            &params,
        );
    }

    fn set_manager(e: Env, new_manager: Address) {
        storage::extend_instance(&e);
        let manager = storage::get_manager(&e);
        manager.require_auth();

        vault::execute_set_manager(&e, &new_manager);

        e.events()
            .publish((Symbol::new(&e, "set_manager"), manager), new_manager);
    }

    fn update_params(e: Env, params: CollateralParams) {
        storage::extend_instance(&e);
        let manager = storage::get_manager(&e);
        manager.require_auth();

        vault::execute_update_params(&e, &params);

        e.events()
            .publish((Symbol::new(&e, "update_params"), manager), ());
    }

    fn update_feeds(e: Env, feeds: PriceFeedConfig) {
        storage::extend_instance(&e);
        let manager = storage::get_manager(&e);
        manager.require_auth();

        vault::execute_update_feeds(&e, &feeds);

        e.events()
            .publish((Symbol::new(&e, "update_feeds"), manager), ());
    }

    fn set_debt_notifier(e: Env, notifier: Address) {
        storage::extend_instance(&e);
        let manager = storage::get_manager(&e);
        manager.require_auth();

        vault::execute_set_debt_notifier(&e, &notifier);

        e.events()
            .publish((Symbol::new(&e, "set_notifier"), manager), notifier);
    }

    fn claim_fees(e: Env, to: Address, amount: i128) {
        storage::extend_instance(&e);
        let manager = storage::get_manager(&e);
        manager.require_auth();

        vault::execute_claim_fees(&e, &to, amount);

        e.events()
            .publish((Symbol::new(&e, "claim_fees"), manager), (to, amount));
    }

    fn fund_insurance(e: Env, from: Address, amount: i128) {
        storage::extend_instance(&e);
        from.require_auth();

        vault::execute_fund_insurance(&e, &from, amount);

        e.events()
            .publish((Symbol::new(&e, "fund_insurance"), from), amount);
    }

    /********** Vault **********/

    fn deposit(e: Env, from: Address, amount: i128) -> u64 {
        storage::extend_instance(&e);
        from.require_auth();

        let vault_id = vault::execute_deposit(&e, &from, amount);

        e.events()
            .publish((Symbol::new(&e, "deposit"), from), (vault_id, amount));
        vault_id
    }

    fn deposit_by_id(e: Env, from: Address, vault_id: u64, amount: i128) {
        storage::extend_instance(&e);
        from.require_auth();

        vault::execute_deposit_by_id(&e, &from, vault_id, amount);

        e.events()
            .publish((Symbol::new(&e, "deposit"), from), (vault_id, amount));
    }

    fn deposit_and_borrow(
        e: Env,
        from: Address,
        deposit_amount: i128,
        borrow_amount: i128,
    ) -> u64 {
        storage::extend_instance(&e);
        from.require_auth();

        let vault_id = vault::execute_deposit(&e, &from, deposit_amount);
        let debt_delta = vault::execute_borrow(&e, &from, vault_id, borrow_amount);

        e.events().publish(
            (Symbol::new(&e, "deposit"), from.clone()),
            (vault_id, deposit_amount),
        );
        e.events().publish(
            (Symbol::new(&e, "borrow"), from),
            (vault_id, borrow_amount, debt_delta),
        );
        vault_id
    }

    fn borrow(e: Env, from: Address, vault_id: u64, amount: i128) {
        storage::extend_instance(&e);
        from.require_auth();

        let debt_delta = vault::execute_borrow(&e, &from, vault_id, amount);

        e.events().publish(
            (Symbol::new(&e, "borrow"), from),
            (vault_id, amount, debt_delta),
        );
    }

    fn withdraw(e: Env, from: Address, vault_id: u64, amount: i128) {
        storage::extend_instance(&e);
        from.require_auth();

        vault::execute_withdraw(&e, &from, vault_id, amount);

        e.events()
            .publish((Symbol::new(&e, "withdraw"), from), (vault_id, amount));
    }

    fn repay(e: Env, from: Address, vault_id: u64, amount: i128) -> i128 {
        storage::extend_instance(&e);
        from.require_auth();

        let repaid = vault::execute_repay(&e, &from, vault_id, amount);

        e.events()
            .publish((Symbol::new(&e, "repay"), from), (vault_id, repaid));
        repaid
    }

    fn repay_all(e: Env, from: Address, vault_id: u64) -> i128 {
        storage::extend_instance(&e);
        from.require_auth();

        let repaid = vault::execute_repay_all(&e, &from, vault_id);

        e.events()
            .publish((Symbol::new(&e, "repay"), from), (vault_id, repaid));
        repaid
    }

    /********** Liquidation **********/

    fn liquidate(e: Env, from: Address, vault_id: u64) -> i128 {
        storage::extend_instance(&e);
        from.require_auth();

        let (debt_repaid, collateral_out) = vault::execute_liquidate(&e, &from, vault_id);

        e.events().publish(
            (Symbol::new(&e, "liquidate"), from),
            (vault_id, debt_repaid, collateral_out),
        );
        collateral_out
    }

    fn liquidate_partial(e: Env, from: Address, vault_id: u64, repay_amount: i128) -> i128 {
        storage::extend_instance(&e);
        from.require_auth();

        let collateral_out = vault::execute_liquidate_partial(&e, &from, vault_id, repay_amount);

        e.events().publish(
            (Symbol::new(&e, "liquidate_partial"), from),
            (vault_id, repay_amount, collateral_out),
        );
        collateral_out
    }

    /********** Views **********/

    fn get_vault(e: Env, vault_id: u64) -> Vault {
        Vault::load(&e, vault_id)
    }

    fn vault_id_of(e: Env, owner: Address) -> u64 {
        storage::get_vault_id(&e, &owner)
    }

    fn vault_count(e: Env) -> u64 {
        storage::get_vault_count(&e)
    }

    fn accrued_debt(e: Env, vault_id: u64) -> i128 {
        let params = storage::get_params(&e);
        let mut vault = Vault::load(&e, vault_id);
        vault.accrue(&e, params.borrow_rate_per_second);
        vault.debt_principal
    }

    fn health_ratio(e: Env, vault_id: u64) -> i128 {
        let mut market = Market::load(&e);
        let mut vault = Vault::load(&e, vault_id);
        vault.accrue(&e, market.params.borrow_rate_per_second);
        if vault.debt_principal == 0 {
            return i128::MAX;
        }
        let health_data = HealthData::calculate(&e, &mut market, &vault);
        health_data.as_ratio(&e)
    }

    fn current_rate(e: Env) -> i128 {
        let mut market = Market::load(&e);
        market.rate(&e)
    }

    fn total_debt(e: Env) -> i128 {
        storage::get_total_debt(&e)
    }

    fn insurance_balance(e: Env) -> i128 {
        storage::get_insurance_balance(&e)
    }

    fn protocol_fees(e: Env) -> i128 {
        storage::get_protocol_fees(&e)
    }

    fn get_params(e: Env) -> CollateralParams {
        storage::get_params(&e)
    }

    fn get_feeds(e: Env) -> PriceFeedConfig {
        storage::get_feeds(&e)
    }

    fn get_manager(e: Env) -> Address {
        storage::get_manager(&e)
    }

    fn get_collateral_token(e: Env) -> Address {
        storage::get_collateral_token(&e)
    }

    fn get_stable_token(e: Env) -> Address {
        storage::get_stable_token(&e)
    }

    fn get_debt_notifier(e: Env) -> Option<Address> {
        storage::get_debt_notifier(&e)
    }
}
