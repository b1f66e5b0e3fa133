mod accrual;
pub use accrual::{accrual_factor, compound_principal};

mod actions;
pub use actions::{
    execute_borrow, execute_deposit, execute_deposit_by_id, execute_repay, execute_repay_all,
    execute_withdraw,
};

mod config;
pub use config::{
    execute_initialize, execute_set_debt_notifier, execute_set_manager, execute_update_feeds,
    execute_update_params,
};

mod health;
pub use health::HealthData;

mod ledger;
pub use ledger::create_vault;

mod liquidation;
pub use liquidation::{
    execute_claim_fees, execute_fund_insurance, execute_liquidate, execute_liquidate_partial,
};

mod market;
pub use market::Market;
