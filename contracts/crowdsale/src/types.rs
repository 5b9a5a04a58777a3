use soroban_sdk::{contracttype, Address};

/// The two sale variants share one engine; the label only tags the deployment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum SaleKind {
    PreIco,
    PreSale,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Currency {
    Native,
    CurrencyA,
    CurrencyB,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum SalePhase {
    Created,
    Initialized,
    Open,
    Closed,
    Finalized,
}

/// Decimal scale of each asset, fixed at construction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CurrencyDecimals {
    pub native: u32,
    pub currency_a: u32,
    pub currency_b: u32,
    pub token: u32,
}

/// Construction parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleSetup {
    pub kind: SaleKind,
    pub opening_time: u64,
    pub closing_time: u64,
    pub token: Address,
    pub native_asset: Address,
    pub currency_a: Address,
    pub currency_b: Address,
    pub decimals: CurrencyDecimals,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleConfig {
    pub owner: Address,
    pub kind: SaleKind,
    pub token: Address,
    pub native_asset: Address,
    pub currency_a: Address,
    pub currency_b: Address,
    pub decimals: CurrencyDecimals,
    pub opening_time: u64,
    pub closing_time: u64,
    pub native_price_cents: u64,
    pub token_price_cents: u64,
    pub currency_a_price_cents: u64,
    pub currency_b_price_cents: u64,
    pub min_contribution_cents: i128,
    pub release_date: u64, // 0 until set; write-once
    pub initialized: bool,
    pub finalized: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct BonusTier {
    pub threshold: u64,
    pub percentage: u32,
}

/// Sale-token accounting, all in the sale token's smallest unit.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct AllocationLedger {
    pub total_sale_allocation: i128,
    pub total_tokens_sold: i128, // principal + bonus
    pub bonus_provided: i128,
    pub bonus_withdrawn: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ContributionReceipt {
    pub currency: Currency,
    pub paid: i128,
    pub usd_cents: i128,
    pub principal: i128,
    pub bonus: i128,
}

#[contracttype]
pub enum DataKey {
    Config,
    Ledger,
    BonusSchedule,
    Admin(Address),
    Whitelist(Address),
    Bonus(Address),
    Lock,
}
