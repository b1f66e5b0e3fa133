use soroban_sdk::{Address, Env};

use crate::{
    price,
    storage::{self, CollateralParams, PriceFeedConfig},
};

/// The market configuration a vault operation runs under, with the oracle
/// rate fetched at most once per invocation.
pub struct Market {
    pub collateral_token: Address,
    pub collateral_decimals: u32,
    pub stable_token: Address,
    pub params: CollateralParams,
    pub feeds: PriceFeedConfig,
    rate: Option<i128>,
}

impl Market {
    /// Load the Market from the ledger
    pub fn load(e: &Env) -> Self {
        Market {
            collateral_token: storage::get_collateral_token(e),
            collateral_decimals: storage::get_collateral_decimals(e),
            stable_token: storage::get_stable_token(e),
            params: storage::get_params(e),
            feeds: storage::get_feeds(e),
            rate: None,
        }
    }

    /// Fetch the collateral to stable conversion rate, in 18 decimals. The
    /// first call reads both feeds, later calls reuse the cached rate.
    ///
    /// ### Panics
    /// If either feed price is missing, invalid, or stale
    pub fn rate(&mut self, e: &Env) -> i128 {
        match self.rate {
            Some(rate) => rate,
            None => {
                let rate = price::load_rate(e, &self.feeds);
                self.rate = Some(rate);
                rate
            }
        }
    }

    /// Value collateral in the stable unit at the current rate. Rounds down.
    ///
    /// ### Arguments
    /// * `amount` - The collateral amount, in the collateral's decimals
    pub fn to_stable(&mut self, e: &Env, amount: i128) -> i128 {
        let rate = self.rate(e);
        price::to_stable(e, rate, self.collateral_decimals, amount)
    }

    /// Convert a stable unit amount into collateral at the current rate.
    /// Rounds down.
    ///
    /// ### Arguments
    /// * `amount` - The stable amount, in 18 decimals
    pub fn to_collateral(&mut self, e: &Env, amount: i128) -> i128 {
        let rate = self.rate(e);
        price::to_collateral(e, rate, self.collateral_decimals, amount)
    }
}
