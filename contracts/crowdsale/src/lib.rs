#![no_std]

mod access;
mod bonus;
mod contract;
mod errors;
mod events;
mod ledger;
mod lifecycle;
mod pricing;
mod storage;
mod types;
mod whitelist;


pub use contract::{CrowdsaleContract, CrowdsaleContractClient};
pub use errors::{Error, ErrorKind};
pub use types::{
    AllocationLedger, BonusTier, ContributionReceipt, Currency, CurrencyDecimals, SaleConfig,
    SaleKind, SalePhase, SaleSetup,
};
