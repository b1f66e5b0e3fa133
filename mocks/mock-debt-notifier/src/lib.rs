#![no_std]

mod notifier;
mod storage;

pub use notifier::*;
pub use storage::DebtChange;
