use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
/// Error codes for the vaults contract. Common errors are codes that match up with the built-in
/// contracts error reporting. Vault specific errors start at 1300.
pub enum VaultError {
    // Common Errors
    InternalError = 1,
    AlreadyInitializedError = 3,

    UnauthorizedError = 4,

    NegativeAmountError = 8,
    BalanceError = 10,
    OverflowError = 12,

    // Vault Request Errors (start at 1300)
    InvalidAmount = 1300,
    NotFound = 1301,
    AlreadyExists = 1302,
    InsufficientBalance = 1303,

    // Vault State Errors
    InsufficientCollateral = 1304,
    NotLiquidatable = 1305,
    DebtExceeded = 1306,
    DebtCeilingExceeded = 1307,

    // Oracle Errors
    StalePrice = 1308,
    InvalidPrice = 1309,

    // Insurance Errors
    InsuranceFundInsufficient = 1310,

    // Config Errors
    InvalidConfig = 1311,
}
