use crate::errors::Error;
use crate::types::*;
use soroban_sdk::{Address, Env, Vec};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SaleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_ledger(env: &Env) -> AllocationLedger {
    env.storage()
        .instance()
        .get(&DataKey::Ledger)
        .unwrap_or_default()
}

pub fn set_ledger(env: &Env, ledger: &AllocationLedger) {
    env.storage().instance().set(&DataKey::Ledger, ledger);
}

pub fn get_bonus_schedule(env: &Env) -> Vec<BonusTier> {
    env.storage()
        .instance()
        .get(&DataKey::BonusSchedule)
        .unwrap_or(Vec::new(env))
}

pub fn set_bonus_schedule(env: &Env, tiers: &Vec<BonusTier>) {
    env.storage().instance().set(&DataKey::BonusSchedule, tiers);
}

pub fn is_admin(env: &Env, who: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Admin(who.clone()))
        .unwrap_or(false)
}

pub fn set_admin(env: &Env, who: &Address, enabled: bool) {
    let key = DataKey::Admin(who.clone());
    if enabled {
        env.storage().persistent().set(&key, &true);
        bump_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

pub fn is_whitelisted(env: &Env, who: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Whitelist(who.clone()))
        .unwrap_or(false)
}

pub fn set_whitelisted(env: &Env, who: &Address, listed: bool) {
    let key = DataKey::Whitelist(who.clone());
    if listed {
        env.storage().persistent().set(&key, &true);
        bump_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

pub fn get_bonus_balance(env: &Env, holder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Bonus(holder.clone()))
        .unwrap_or(0)
}

pub fn set_bonus_balance(env: &Env, holder: &Address, amount: i128) {
    let key = DataKey::Bonus(holder.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn require_not_reentrant(env: &Env) -> Result<(), Error> {
    let locked: bool = env
        .storage()
        .temporary()
        .get(&DataKey::Lock)
        .unwrap_or(false);
    if locked {
        return Err(Error::Reentrant);
    }
    env.storage().temporary().set(&DataKey::Lock, &true);
    Ok(())
}

pub fn clear_reentrancy(env: &Env) {
    env.storage().temporary().remove(&DataKey::Lock);
}
