use soroban_sdk::{contracttype, Address, Env};

/// A debt change reported through `debt_changed`
#[derive(Clone)]
#[contracttype]
pub struct DebtChange {
    pub collateral: Address,
    pub owner: Address,
    pub delta: i128,
}

#[derive(Clone)]
#[contracttype]
pub enum NotifierDataKey {
    LastCall,
    Calls,
    Fail,
}

pub fn get_last_call(e: &Env) -> Option<DebtChange> {
    e.storage().instance().get(&NotifierDataKey::LastCall)
}

pub fn set_last_call(e: &Env, call: &DebtChange) {
    e.storage().instance().set(&NotifierDataKey::LastCall, call);
}

pub fn get_call_count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&NotifierDataKey::Calls)
        .unwrap_or(0)
}

pub fn set_call_count(e: &Env, count: &u32) {
    e.storage().instance().set(&NotifierDataKey::Calls, count);
}

pub fn get_fail(e: &Env) -> bool {
    e.storage()
        .instance()
        .get(&NotifierDataKey::Fail)
        .unwrap_or(false)
}

pub fn set_fail(e: &Env, fail: &bool) {
    e.storage().instance().set(&NotifierDataKey::Fail, fail);
}
