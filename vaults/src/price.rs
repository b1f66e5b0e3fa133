use sep_40_oracle::{Asset, PriceFeedClient};
use soroban_sdk::{panic_with_error, Address, Env};

use crate::{
    constants::{MAX_FEED_DECIMALS, SCALAR_18},
    errors::VaultError,
    math,
    storage::PriceFeedConfig,
};

/// Load the conversion rate from collateral asset to stable unit, in 18 decimals.
///
/// Both feeds quote against the same currency, so the rate is the collateral
/// price divided by the reference price, with both observations rescaled to
/// 18 decimals first and the division carried out in 256 bits.
///
/// ### Arguments
/// * `feeds` - The price feed pair valuing the collateral
///
/// ### Panics
/// * If either feed has no price or a price that is not positive (InvalidPrice)
/// * If either observation is older than the staleness window (StalePrice)
pub fn load_rate(e: &Env, feeds: &PriceFeedConfig) -> i128 {
    let collateral_price = load_feed_price(
        e,
        &feeds.collateral_feed,
        &feeds.collateral_asset,
        feeds.staleness_window,
    );
    let reference_price = load_feed_price(
        e,
        &feeds.reference_feed,
        &feeds.reference_asset,
        feeds.staleness_window,
    );
    let rate = math::mul_floor(e, collateral_price, SCALAR_18, reference_price);
    // a rate the stable unit cannot express prices nothing correctly
    if rate <= 0 {
        panic_with_error!(e, VaultError::InvalidPrice);
    }
    rate
}

/// Convert an amount of collateral, in the collateral's native decimals, to
/// its stable unit value in 18 decimals. Rounds down.
///
/// ### Arguments
/// * `rate` - The conversion rate in 18 decimals, must be positive
/// * `collateral_decimals` - The decimals collateral amounts are denominated in
/// * `amount` - The collateral amount to convert
pub fn to_stable(e: &Env, rate: i128, collateral_decimals: u32, amount: i128) -> i128 {
    math::mul_floor(e, amount, rate, 10i128.pow(collateral_decimals))
}

/// Convert a stable unit amount in 18 decimals to collateral in the
/// collateral's native decimals. The division by the rate happens before the
/// rescale, in 256 bits, so no precision is lost to an intermediate
/// truncation. Rounds down.
///
/// ### Arguments
/// * `rate` - The conversion rate in 18 decimals, must be positive
/// * `collateral_decimals` - The decimals collateral amounts are denominated in
/// * `amount` - The stable amount to convert, in 18 decimals
pub fn to_collateral(e: &Env, rate: i128, collateral_decimals: u32, amount: i128) -> i128 {
    math::mul_floor(e, amount, 10i128.pow(collateral_decimals), rate)
}

/// Fetch one feed observation and rescale it to 18 decimals
fn load_feed_price(e: &Env, feed: &Address, asset: &Asset, staleness_window: u64) -> i128 {
    let feed_client = PriceFeedClient::new(e, feed);
    let decimals = feed_client.decimals();
    if decimals > MAX_FEED_DECIMALS {
        panic_with_error!(e, VaultError::InvalidConfig);
    }
    let price_data = match feed_client.lastprice(asset) {
        Some(price_data) => price_data,
        None => panic_with_error!(e, VaultError::InvalidPrice),
    };
    if price_data.price <= 0 {
        panic_with_error!(e, VaultError::InvalidPrice);
    }
    if price_data.timestamp + staleness_window < e.ledger().timestamp() {
        panic_with_error!(e, VaultError::StalePrice);
    }
    match price_data.price.checked_mul(10i128.pow(18 - decimals)) {
        Some(price) => price,
        None => panic_with_error!(e, VaultError::OverflowError),
    }
}
