use crate::types::{AllocationLedger, SaleConfig, SalePhase};

/// Closed once the window has ended or the allocation is used up.
pub fn has_closed(config: &SaleConfig, ledger: &AllocationLedger, now: u64) -> bool {
    now >= config.closing_time || ledger.is_sold_out()
}

pub fn is_open(config: &SaleConfig, ledger: &AllocationLedger, now: u64) -> bool {
    config.initialized
        && !config.finalized
        && now >= config.opening_time
        && now < config.closing_time
        && !ledger.is_sold_out()
}

pub fn phase(config: &SaleConfig, ledger: &AllocationLedger, now: u64) -> SalePhase {
    if config.finalized {
        SalePhase::Finalized
    } else if !config.initialized {
        SalePhase::Created
    } else if has_closed(config, ledger, now) {
        SalePhase::Closed
    } else if now < config.opening_time {
        SalePhase::Initialized
    } else {
        SalePhase::Open
    }
}

/// Bonus balances become claimable once a release date is set and reached.
pub fn bonus_released(config: &SaleConfig, now: u64) -> bool {
    config.release_date != 0 && now >= config.release_date
}
