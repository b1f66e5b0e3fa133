use crate::storage::{self, DebtChange};
use soroban_sdk::{contract, contracterror, contractimpl, panic_with_error, Address, Env};

#[contracterror]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u32)]
pub enum MockNotifierError {
    Refused = 100,
}

#[contract]
pub struct MockDebtNotifier;

pub trait MockDebtNotifierTrait {
    /// Record a debt change reported by a vaults contract
    ///
    /// ### Arguments
    /// * `collateral` - The collateral token of the reporting market
    /// * `owner` - The owner of the vault whose debt changed
    /// * `delta` - The signed change in debt, in stable units
    fn debt_changed(e: Env, collateral: Address, owner: Address, delta: i128);

    /// Mock Only: Fetch the most recent recorded debt change
    fn last_call(e: Env) -> Option<DebtChange>;

    /// Mock Only: Fetch the number of debt changes recorded
    fn call_count(e: Env) -> u32;

    /// Mock Only: Set whether debt_changed refuses the report
    ///
    /// ### Arguments
    /// * `fail` - If true, debt_changed panics when invoked
    fn set_fail(e: Env, fail: bool);
}

#[contractimpl]
impl MockDebtNotifierTrait for MockDebtNotifier {
    fn debt_changed(e: Env, collateral: Address, owner: Address, delta: i128) {
        if storage::get_fail(&e) {
            panic_with_error!(&e, MockNotifierError::Refused);
        }
        storage::set_last_call(
            &e,
            &DebtChange {
                collateral,
                owner,
                delta,
            },
        );
        storage::set_call_count(&e, &(storage::get_call_count(&e) + 1));
    }

    fn last_call(e: Env) -> Option<DebtChange> {
        storage::get_last_call(&e)
    }

    fn call_count(e: Env) -> u32 {
        storage::get_call_count(&e)
    }

    fn set_fail(e: Env, fail: bool) {
        storage::set_fail(&e, &fail);
    }
}
