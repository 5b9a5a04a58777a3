use crate::types::{ContributionReceipt, SaleKind};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

const SALE_NEW: Symbol = symbol_short!("SaleNew");
const SALE_INIT: Symbol = symbol_short!("SaleInit");
const ALLOC_ADD: Symbol = symbol_short!("AllocAdd");
const PRICE: Symbol = symbol_short!("Price");
const MIN_CONTR: Symbol = symbol_short!("MinContr");
const RELEASE: Symbol = symbol_short!("Release");
const CLOSING: Symbol = symbol_short!("Closing");
const BONUSES: Symbol = symbol_short!("Bonuses");
const WL_ADD: Symbol = symbol_short!("WlAdd");
const WL_DEL: Symbol = symbol_short!("WlDel");
const ADMIN_ADD: Symbol = symbol_short!("AdminAdd");
const ADMIN_DEL: Symbol = symbol_short!("AdminDel");
const CONTRIB: Symbol = symbol_short!("Contrib");
const BONUS_OUT: Symbol = symbol_short!("BonusOut");
const FUNDS_OUT: Symbol = symbol_short!("FundsOut");
const TOKEN_OUT: Symbol = symbol_short!("TokenOut");
const FINALIZED: Symbol = symbol_short!("Finalized");

pub fn emit_sale_created(env: &Env, owner: &Address, kind: SaleKind, opening: u64, closing: u64) {
    env.events().publish((SALE_NEW, owner.clone()), (kind, opening, closing));
}

pub fn emit_sale_initialized(env: &Env, admin: &Address, allocation: i128) {
    env.events().publish((SALE_INIT, admin.clone()), allocation);
}

pub fn emit_allocation_increased(env: &Env, admin: &Address, amount: i128, total: i128) {
    env.events().publish((ALLOC_ADD, admin.clone()), (amount, total));
}

/// `asset` names which price moved: `token`, `native`, `cur_a` or `cur_b`.
pub fn emit_price_changed(env: &Env, asset: Symbol, price_cents: u64) {
    env.events().publish((PRICE, asset), price_cents);
}

pub fn emit_min_contribution_changed(env: &Env, cents: i128) {
    env.events().publish((MIN_CONTR,), cents);
}

pub fn emit_release_date_set(env: &Env, release_date: u64) {
    env.events().publish((RELEASE,), release_date);
}

pub fn emit_closing_time_changed(env: &Env, closing_time: u64) {
    env.events().publish((CLOSING,), closing_time);
}

pub fn emit_bonuses_set(env: &Env, tiers: u32) {
    env.events().publish((BONUSES,), tiers);
}

pub fn emit_whitelist_changed(env: &Env, who: &Address, listed: bool) {
    let topic = if listed { WL_ADD } else { WL_DEL };
    env.events().publish((topic, who.clone()), ());
}

pub fn emit_admin_changed(env: &Env, who: &Address, enabled: bool) {
    let topic = if enabled { ADMIN_ADD } else { ADMIN_DEL };
    env.events().publish((topic, who.clone()), ());
}

pub fn emit_contribution(env: &Env, contributor: &Address, receipt: &ContributionReceipt) {
    env.events().publish(
        (CONTRIB, contributor.clone()),
        (
            receipt.currency,
            receipt.paid,
            receipt.usd_cents,
            receipt.principal,
            receipt.bonus,
        ),
    );
}

pub fn emit_bonus_withdrawn(env: &Env, holder: &Address, amount: i128) {
    env.events().publish((BONUS_OUT, holder.clone()), amount);
}

pub fn emit_funds_withdrawn(env: &Env, admin: &Address, amount: i128) {
    env.events().publish((FUNDS_OUT, admin.clone()), amount);
}

pub fn emit_token_withdrawn(env: &Env, admin: &Address, token: &Address, amount: i128) {
    env.events().publish((TOKEN_OUT, admin.clone()), (token.clone(), amount));
}

pub fn emit_finalized(env: &Env, admin: &Address, swept: i128, bonus_reserved: i128) {
    env.events().publish((FINALIZED, admin.clone()), (swept, bonus_reserved));
}
