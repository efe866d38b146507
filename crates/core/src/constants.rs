/// Storage key of the persisted portfolio blob
pub const PORTFOLIO_STORAGE_KEY: &str = "minifolio_portfolio";

/// Default quote refresh cadence, in seconds
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimals of USDC on Base
pub const USDC_DECIMALS: u32 = 6;

/// USDC contract on Base
pub const USDC_BASE_ADDRESS: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
