/********** Numbers **********/

/// Fixed-point scalar for 18 decimal numbers (WAD)
pub const SCALAR_18: i128 = 1_000_000_000_000_000_000;

/// The largest collateral decimal count the engine supports
pub const MAX_COLLATERAL_DECIMALS: u32 = 27;

/// The largest price feed decimal count the engine supports
pub const MAX_FEED_DECIMALS: u32 = 18;
