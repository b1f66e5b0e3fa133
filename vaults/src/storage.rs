use sep_40_oracle::Asset;
use soroban_sdk::{
    contracttype, unwrap::UnwrapOptimized, Address, Env, IntoVal, Symbol, TryFromVal, Val,
};

pub(crate) const LEDGER_THRESHOLD_SHARED: u32 = 172800; // ~ 10 days
pub(crate) const LEDGER_BUMP_SHARED: u32 = 241920; // ~ 14 days

pub(crate) const LEDGER_THRESHOLD_USER: u32 = 518400; // ~ 30 days
pub(crate) const LEDGER_BUMP_USER: u32 = 535670; // ~ 31 days

/********** Storage Types **********/

/// The risk and fee parameters for the collateral type, all fixed-point
/// fractions or factors with 18 decimals
#[derive(Clone)]
#[contracttype]
pub struct CollateralParams {
    pub min_collateral_ratio: i128, // the ratio required to borrow or withdraw
    pub liquidation_ratio: i128,    // the ratio below which a vault can be liquidated
    pub borrow_rate_per_second: i128, // the multiplicative per second debt accrual factor
    pub origination_fee: i128,      // the fraction of a new borrow added to principal
    pub liquidation_bonus: i128,    // the collateral payout multiplier for liquidators
    pub liquidation_fee: i128,      // the fraction of liquidation surplus kept by the protocol
    pub debt_ceiling: i128,         // the maximum aggregate debt the instance may carry
}

/// The price feed pair used to value collateral in stable units. Both feeds
/// quote against the same currency, so the conversion rate is the collateral
/// price divided by the reference price.
#[derive(Clone)]
#[contracttype]
pub struct PriceFeedConfig {
    pub collateral_feed: Address, // the feed pricing the collateral asset against the quote currency
    pub collateral_asset: Asset,  // the asset entry to read from the collateral feed
    pub reference_feed: Address,  // the feed pricing the reference currency against the quote currency
    pub reference_asset: Asset,   // the asset entry to read from the reference feed
    pub staleness_window: u64,    // the maximum price age in seconds before conversion fails
}

/// A vault record. Ids are assigned sequentially from 1 and are never reused;
/// liquidation zeroes the balances in place rather than deleting the record.
#[derive(Clone)]
#[contracttype]
pub struct Vault {
    pub owner: Address,
    pub collateral: i128,     // the collateral balance in the asset's native decimals
    pub debt_principal: i128, // the debt principal in 18 decimals, as of last_accrual
    pub created_at: u64,      // the ledger timestamp the vault was created at
    pub last_accrual: u64,    // the ledger timestamp interest was last compounded at
}

/********** Storage Key Types **********/

const MANAGER_KEY: &str = "Manager";
const COLLATERAL_TOKEN_KEY: &str = "CollTkn";
const COLLATERAL_DECIMALS_KEY: &str = "CollDec";
const STABLE_TOKEN_KEY: &str = "StblTkn";
const NOTIFIER_KEY: &str = "Notifier";
const PARAMS_KEY: &str = "Params";
const FEEDS_KEY: &str = "Feeds";
const VAULT_COUNT_KEY: &str = "VaultCnt";
const TOTAL_DEBT_KEY: &str = "TotDebt";
const INSURANCE_KEY: &str = "InsBal";
const PROTOCOL_FEES_KEY: &str = "ProtFees";

#[derive(Clone)]
#[contracttype]
pub enum VaultDataKey {
    // A map of vault id to vault record
    Vault(u64),
    // A map of owner address to vault id
    VaultId(Address),
}

/********** Storage **********/

/// Bump the instance rent for the contract
pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
}

/// Fetch an entry in persistent storage that has a default value if it doesn't exist
fn get_persistent_default<K: IntoVal<Env, Val>, V: TryFromVal<Env, Val>>(
    e: &Env,
    key: &K,
    default: V,
    bump_threshold: u32,
    bump_amount: u32,
) -> V {
    if let Some(result) = e.storage().persistent().get::<K, V>(key) {
        e.storage()
            .persistent()
            .extend_ttl(key, bump_threshold, bump_amount);
        result
    } else {
        default
    }
}

/********** Manager **********/

/// Fetch the current manager Address
///
/// ### Panics
/// If the manager does not exist
pub fn get_manager(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, MANAGER_KEY))
        .unwrap_optimized()
}

/// Set a new manager
///
/// ### Arguments
/// * `new_manager` - The Address for the manager
pub fn set_manager(e: &Env, new_manager: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, MANAGER_KEY), new_manager);
}

/// Checks if a manager is set
pub fn has_manager(e: &Env) -> bool {
    e.storage().instance().has(&Symbol::new(e, MANAGER_KEY))
}

/********** External Token Contracts **********/

/// Fetch the collateral token ID
pub fn get_collateral_token(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, COLLATERAL_TOKEN_KEY))
        .unwrap_optimized()
}

/// Set the collateral token ID
///
/// ### Arguments
/// * `collateral_token` - The ID of the collateral token
pub fn set_collateral_token(e: &Env, collateral_token: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, COLLATERAL_TOKEN_KEY), collateral_token);
}

/// Fetch the decimals of the collateral token
pub fn get_collateral_decimals(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&Symbol::new(e, COLLATERAL_DECIMALS_KEY))
        .unwrap_optimized()
}

/// Set the decimals of the collateral token
///
/// ### Arguments
/// * `decimals` - The decimals the collateral token amounts are denominated in
pub fn set_collateral_decimals(e: &Env, decimals: &u32) {
    e.storage()
        .instance()
        .set::<Symbol, u32>(&Symbol::new(e, COLLATERAL_DECIMALS_KEY), decimals);
}

/// Fetch the stable token ID
pub fn get_stable_token(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, STABLE_TOKEN_KEY))
        .unwrap_optimized()
}

/// Set the stable token ID
///
/// ### Arguments
/// * `stable_token` - The ID of the stable token
pub fn set_stable_token(e: &Env, stable_token: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, STABLE_TOKEN_KEY), stable_token);
}

/********** Debt Notifier **********/

/// Fetch the debt notifier hook, if one is set
pub fn get_debt_notifier(e: &Env) -> Option<Address> {
    e.storage().instance().get(&Symbol::new(e, NOTIFIER_KEY))
}

/// Set the debt notifier hook
///
/// ### Arguments
/// * `notifier` - The contract to notify on debt changes
pub fn set_debt_notifier(e: &Env, notifier: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, NOTIFIER_KEY), notifier);
}

/********** Collateral Params **********/

/// Fetch the collateral params
///
/// ### Panics
/// If the params are not set
pub fn get_params(e: &Env) -> CollateralParams {
    e.storage()
        .instance()
        .get(&Symbol::new(e, PARAMS_KEY))
        .unwrap_optimized()
}

/// Set the collateral params
///
/// ### Arguments
/// * `params` - The risk and fee parameters for the collateral type
pub fn set_params(e: &Env, params: &CollateralParams) {
    e.storage()
        .instance()
        .set::<Symbol, CollateralParams>(&Symbol::new(e, PARAMS_KEY), params);
}

/********** Price Feeds **********/

/// Fetch the price feed config
///
/// ### Panics
/// If the feeds are not set
pub fn get_feeds(e: &Env) -> PriceFeedConfig {
    e.storage()
        .instance()
        .get(&Symbol::new(e, FEEDS_KEY))
        .unwrap_optimized()
}

/// Set the price feed config
///
/// ### Arguments
/// * `feeds` - The price feed pair valuing the collateral
pub fn set_feeds(e: &Env, feeds: &PriceFeedConfig) {
    e.storage()
        .instance()
        .set::<Symbol, PriceFeedConfig>(&Symbol::new(e, FEEDS_KEY), feeds);
}

/********** Vault Ledger **********/

/// Fetch the number of vaults ever created. Vault ids run from 1 to this
/// count inclusive.
pub fn get_vault_count(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&Symbol::new(e, VAULT_COUNT_KEY))
        .unwrap_or(0)
}

/// Set the number of vaults ever created
///
/// ### Arguments
/// * `count` - The new vault count
pub fn set_vault_count(e: &Env, count: &u64) {
    e.storage()
        .instance()
        .set::<Symbol, u64>(&Symbol::new(e, VAULT_COUNT_KEY), count);
}

/// Fetch a vault record by id
///
/// ### Arguments
/// * `vault_id` - The id of the vault
pub fn get_vault(e: &Env, vault_id: &u64) -> Option<Vault> {
    let key = VaultDataKey::Vault(*vault_id);
    get_persistent_default::<VaultDataKey, Option<Vault>>(
        e,
        &key,
        None,
        LEDGER_THRESHOLD_USER,
        LEDGER_BUMP_USER,
    )
}

/// Set a vault record
///
/// ### Arguments
/// * `vault_id` - The id of the vault
/// * `vault` - The vault record
pub fn set_vault(e: &Env, vault_id: &u64, vault: &Vault) {
    let key = VaultDataKey::Vault(*vault_id);
    e.storage()
        .persistent()
        .set::<VaultDataKey, Vault>(&key, vault);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}

/// Fetch the vault id assigned to an owner, or 0 if the owner has none
///
/// ### Arguments
/// * `owner` - The address of the vault owner
pub fn get_vault_id(e: &Env, owner: &Address) -> u64 {
    let key = VaultDataKey::VaultId(owner.clone());
    get_persistent_default::<VaultDataKey, u64>(e, &key, 0, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER)
}

/// Set the vault id assigned to an owner
///
/// ### Arguments
/// * `owner` - The address of the vault owner
/// * `vault_id` - The id of the owner's vault
pub fn set_vault_id(e: &Env, owner: &Address, vault_id: &u64) {
    let key = VaultDataKey::VaultId(owner.clone());
    e.storage()
        .persistent()
        .set::<VaultDataKey, u64>(&key, vault_id);
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}

/********** Aggregates **********/

/// Fetch the aggregate debt principal across all vaults, in 18 decimals
pub fn get_total_debt(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&Symbol::new(e, TOTAL_DEBT_KEY))
        .unwrap_or(0)
}

/// Set the aggregate debt principal across all vaults
///
/// ### Arguments
/// * `total_debt` - The aggregate debt principal in 18 decimals
pub fn set_total_debt(e: &Env, total_debt: &i128) {
    e.storage()
        .instance()
        .set::<Symbol, i128>(&Symbol::new(e, TOTAL_DEBT_KEY), total_debt);
}

/// Fetch the stable balance of the insurance reserve
pub fn get_insurance_balance(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&Symbol::new(e, INSURANCE_KEY))
        .unwrap_or(0)
}

/// Set the stable balance of the insurance reserve
///
/// ### Arguments
/// * `balance` - The stable balance held for the insurance reserve
pub fn set_insurance_balance(e: &Env, balance: &i128) {
    e.storage()
        .instance()
        .set::<Symbol, i128>(&Symbol::new(e, INSURANCE_KEY), balance);
}

/// Fetch the stable balance of accumulated protocol fees
pub fn get_protocol_fees(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&Symbol::new(e, PROTOCOL_FEES_KEY))
        .unwrap_or(0)
}

/// Set the stable balance of accumulated protocol fees
///
/// ### Arguments
/// * `balance` - The stable balance held for the protocol
pub fn set_protocol_fees(e: &Env, balance: &i128) {
    e.storage()
        .instance()
        .set::<Symbol, i128>(&Symbol::new(e, PROTOCOL_FEES_KEY), balance);
}
