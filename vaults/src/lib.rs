#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod constants;
mod contract;
mod errors;
mod math;
mod price;
mod storage;
mod testutils;
mod validator;
mod vault;

pub use contract::*;
pub use errors::VaultError;
pub use storage::{CollateralParams, PriceFeedConfig, Vault, VaultDataKey};
