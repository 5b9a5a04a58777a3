use crate::access::{has_admin_rights, require_admin, require_owner};
use crate::errors::Error;
use crate::events;
use crate::storage::{self, bump_instance, clear_reentrancy, require_not_reentrant};
use crate::types::*;
use crate::{bonus, ledger, lifecycle, pricing, whitelist};
use soroban_sdk::{
    contract, contractimpl, contractmeta, symbol_short, token, Address, Env, Symbol, Vec,
};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Multi-currency crowdsale with time-tiered bonus and deferred bonus release"
);

#[contract]
pub struct CrowdsaleContract;

fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

fn non_zero(price_cents: u64) -> Result<u64, Error> {
    if price_cents == 0 {
        return Err(Error::ZeroPrice);
    }
    Ok(price_cents)
}

fn payment_asset(config: &SaleConfig, currency: Currency) -> Address {
    match currency {
        Currency::Native => config.native_asset.clone(),
        Currency::CurrencyA => config.currency_a.clone(),
        Currency::CurrencyB => config.currency_b.clone(),
    }
}

/// Everything `owner` has currently approved this contract to spend.
fn allowance_of(env: &Env, asset: &Address, owner: &Address) -> i128 {
    token::Client::new(env, asset).allowance(owner, &env.current_contract_address())
}

fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let this = env.current_contract_address();
    token::Client::new(env, asset).transfer_from(&this, from, &this, &amount);
}

fn send(env: &Env, asset: &Address, to: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    token::Client::new(env, asset).transfer(&env.current_contract_address(), to, &amount);
}

fn balance_of_self(env: &Env, asset: &Address) -> i128 {
    token::Client::new(env, asset).balance(&env.current_contract_address())
}

fn set_price(
    env: &Env,
    caller: &Address,
    asset: Symbol,
    price_cents: u64,
    apply: impl FnOnce(&mut SaleConfig, u64),
) -> Result<(), Error> {
    let mut config = require_admin(env, caller)?;
    let price_cents = non_zero(price_cents)?;
    apply(&mut config, price_cents);
    storage::set_config(env, &config);
    bump_instance(env);
    events::emit_price_changed(env, asset, price_cents);
    Ok(())
}

/// Shared path of the three contribution entry points.
///
/// `attached` is the native amount sent with the call; token payments take the
/// contributor's whole allowance instead. Ledger effects are committed before any token
/// moves.
fn process_contribution(
    env: &Env,
    contributor: &Address,
    currency: Currency,
    attached: Option<i128>,
) -> Result<ContributionReceipt, Error> {
    contributor.require_auth();

    let config = storage::get_config(env)?;
    let mut sale_ledger = storage::get_ledger(env);
    let now = now(env);

    if !lifecycle::is_open(&config, &sale_ledger, now) {
        return Err(Error::SaleNotOpen);
    }
    if !storage::is_whitelisted(env, contributor) {
        return Err(Error::NotWhitelisted);
    }
    require_not_reentrant(env)?;

    let asset = payment_asset(&config, currency);
    let paid = match attached {
        Some(amount) => amount,
        None => allowance_of(env, &asset, contributor),
    };
    if paid <= 0 {
        return Err(Error::InvalidAmount);
    }

    let quote = pricing::quote(&config, currency, paid)?;
    let percentage = bonus::percentage_at(&storage::get_bonus_schedule(env), now);
    let bonus = bonus::calculate_bonus(quote.principal, percentage)?;

    sale_ledger.admit(quote.principal, bonus)?;
    storage::set_ledger(env, &sale_ledger);
    ledger::credit_bonus(env, contributor, bonus)?;
    bump_instance(env);

    let this = env.current_contract_address();
    match currency {
        Currency::Native => token::Client::new(env, &asset).transfer(contributor, &this, &paid),
        Currency::CurrencyA | Currency::CurrencyB => pull(env, &asset, contributor, paid),
    }
    send(env, &config.token, contributor, quote.principal);
    clear_reentrancy(env);

    let receipt = ContributionReceipt {
        currency,
        paid,
        usd_cents: quote.usd_cents,
        principal: quote.principal,
        bonus,
    };
    events::emit_contribution(env, contributor, &receipt);
    Ok(receipt)
}

#[contractimpl]
impl CrowdsaleContract {
    /// Creates the sale. Prices, minimum and bonus schedule come later through
    /// `initialize_sale`.
    pub fn initialize(env: Env, owner: Address, setup: SaleSetup) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        if setup.closing_time < setup.opening_time {
            return Err(Error::InvalidSaleWindow);
        }

        let config = SaleConfig {
            owner: owner.clone(),
            kind: setup.kind,
            token: setup.token,
            native_asset: setup.native_asset,
            currency_a: setup.currency_a,
            currency_b: setup.currency_b,
            decimals: setup.decimals,
            opening_time: setup.opening_time,
            closing_time: setup.closing_time,
            native_price_cents: 0,
            token_price_cents: 0,
            currency_a_price_cents: 0,
            currency_b_price_cents: 0,
            min_contribution_cents: 0,
            release_date: 0,
            initialized: false,
            finalized: false,
        };

        storage::set_config(&env, &config);
        storage::set_ledger(&env, &AllocationLedger::default());
        bump_instance(&env);

        events::emit_sale_created(
            &env,
            &owner,
            config.kind,
            config.opening_time,
            config.closing_time,
        );
        Ok(())
    }

    /// One-time sale setup. Pulls the caller's whole sale-token allowance into the
    /// allocation.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize_sale(
        env: Env,
        caller: Address,
        native_price_cents: u64,
        token_price_cents: u64,
        currency_a_price_cents: u64,
        currency_b_price_cents: u64,
        min_contribution_cents: i128,
        bonus_timestamps: Vec<u64>,
        bonus_percentages: Vec<u32>,
    ) -> Result<(), Error> {
        let mut config = require_admin(&env, &caller)?;
        if config.initialized {
            return Err(Error::SaleAlreadyInitialized);
        }
        if min_contribution_cents < 0 {
            return Err(Error::InvalidAmount);
        }
        config.native_price_cents = non_zero(native_price_cents)?;
        config.token_price_cents = non_zero(token_price_cents)?;
        config.currency_a_price_cents = non_zero(currency_a_price_cents)?;
        config.currency_b_price_cents = non_zero(currency_b_price_cents)?;
        config.min_contribution_cents = min_contribution_cents;
        let tiers = bonus::build_schedule(&env, &bonus_timestamps, &bonus_percentages)?;

        let mut sale_ledger = storage::get_ledger(&env);
        let pulled = allowance_of(&env, &config.token, &caller);
        sale_ledger.add_allocation(pulled)?;
        config.initialized = true;

        storage::set_config(&env, &config);
        storage::set_ledger(&env, &sale_ledger);
        storage::set_bonus_schedule(&env, &tiers);
        bump_instance(&env);

        pull(&env, &config.token, &caller, pulled);

        events::emit_bonuses_set(&env, tiers.len());
        events::emit_sale_initialized(&env, &caller, sale_ledger.total_sale_allocation);
        Ok(())
    }

    /// Adds the caller's whole current sale-token allowance to the allocation.
    pub fn increase_token_sale_allocation(env: Env, caller: Address) -> Result<i128, Error> {
        let config = require_admin(&env, &caller)?;
        let mut sale_ledger = storage::get_ledger(&env);
        let pulled = allowance_of(&env, &config.token, &caller);
        sale_ledger.add_allocation(pulled)?;
        storage::set_ledger(&env, &sale_ledger);
        bump_instance(&env);

        pull(&env, &config.token, &caller, pulled);

        events::emit_allocation_increased(
            &env,
            &caller,
            pulled,
            sale_ledger.total_sale_allocation,
        );
        Ok(pulled)
    }

    pub fn set_token_price(env: Env, caller: Address, price_cents: u64) -> Result<(), Error> {
        set_price(&env, &caller, symbol_short!("token"), price_cents, |c, p| {
            c.token_price_cents = p
        })
    }

    pub fn set_native_price(env: Env, caller: Address, price_cents: u64) -> Result<(), Error> {
        set_price(&env, &caller, symbol_short!("native"), price_cents, |c, p| {
            c.native_price_cents = p
        })
    }

    pub fn set_currency_a_price(env: Env, caller: Address, price_cents: u64) -> Result<(), Error> {
        set_price(&env, &caller, symbol_short!("cur_a"), price_cents, |c, p| {
            c.currency_a_price_cents = p
        })
    }

    pub fn set_currency_b_price(env: Env, caller: Address, price_cents: u64) -> Result<(), Error> {
        set_price(&env, &caller, symbol_short!("cur_b"), price_cents, |c, p| {
            c.currency_b_price_cents = p
        })
    }

    pub fn set_minimum_contribution(env: Env, caller: Address, cents: i128) -> Result<(), Error> {
        let mut config = require_admin(&env, &caller)?;
        if cents < 0 {
            return Err(Error::InvalidAmount);
        }
        config.min_contribution_cents = cents;
        storage::set_config(&env, &config);
        bump_instance(&env);
        events::emit_min_contribution_changed(&env, cents);
        Ok(())
    }

    /// Write-once.
    pub fn set_release_date(env: Env, caller: Address, release_date: u64) -> Result<(), Error> {
        let mut config = require_admin(&env, &caller)?;
        if config.release_date != 0 {
            return Err(Error::ReleaseDateAlreadySet);
        }
        if release_date == 0 {
            return Err(Error::InvalidReleaseDate);
        }
        config.release_date = release_date;
        storage::set_config(&env, &config);
        bump_instance(&env);
        events::emit_release_date_set(&env, release_date);
        Ok(())
    }

    pub fn change_closing_time(env: Env, caller: Address, closing_time: u64) -> Result<(), Error> {
        let mut config = require_admin(&env, &caller)?;
        config.closing_time = closing_time;
        storage::set_config(&env, &config);
        bump_instance(&env);
        events::emit_closing_time_changed(&env, closing_time);
        Ok(())
    }

    /// Replaces the whole bonus schedule.
    pub fn set_bonuses(
        env: Env,
        caller: Address,
        timestamps: Vec<u64>,
        percentages: Vec<u32>,
    ) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        let tiers = bonus::build_schedule(&env, &timestamps, &percentages)?;
        storage::set_bonus_schedule(&env, &tiers);
        bump_instance(&env);
        events::emit_bonuses_set(&env, tiers.len());
        Ok(())
    }

    pub fn add_whitelist(env: Env, caller: Address, who: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        whitelist::add(&env, &who);
        bump_instance(&env);
        events::emit_whitelist_changed(&env, &who, true);
        Ok(())
    }

    pub fn remove_whitelist(env: Env, caller: Address, who: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        whitelist::remove(&env, &who);
        bump_instance(&env);
        events::emit_whitelist_changed(&env, &who, false);
        Ok(())
    }

    pub fn add_many_whitelist(env: Env, caller: Address, addrs: Vec<Address>) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        whitelist::add_many(&env, &addrs);
        bump_instance(&env);
        for who in addrs.iter() {
            events::emit_whitelist_changed(&env, &who, true);
        }
        Ok(())
    }

    pub fn remove_many_whitelist(
        env: Env,
        caller: Address,
        addrs: Vec<Address>,
    ) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        whitelist::remove_many(&env, &addrs);
        bump_instance(&env);
        for who in addrs.iter() {
            events::emit_whitelist_changed(&env, &who, false);
        }
        Ok(())
    }

    /// Owner only; admins cannot grow the admin set.
    pub fn add_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        storage::set_admin(&env, &admin, true);
        bump_instance(&env);
        events::emit_admin_changed(&env, &admin, true);
        Ok(())
    }

    pub fn remove_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        storage::set_admin(&env, &admin, false);
        bump_instance(&env);
        events::emit_admin_changed(&env, &admin, false);
        Ok(())
    }

    /// Native contribution; `amount` is what the contributor sends with the call.
    pub fn contribute(
        env: Env,
        contributor: Address,
        amount: i128,
    ) -> Result<ContributionReceipt, Error> {
        process_contribution(&env, &contributor, Currency::Native, Some(amount))
    }

    pub fn contribute_in_currency_a(
        env: Env,
        contributor: Address,
    ) -> Result<ContributionReceipt, Error> {
        process_contribution(&env, &contributor, Currency::CurrencyA, None)
    }

    pub fn contribute_in_currency_b(
        env: Env,
        contributor: Address,
    ) -> Result<ContributionReceipt, Error> {
        process_contribution(&env, &contributor, Currency::CurrencyB, None)
    }

    /// Pays out the caller's whole bonus balance once the release date has passed.
    pub fn withdraw_bonus(env: Env, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();
        let config = storage::get_config(&env)?;
        if !lifecycle::bonus_released(&config, now(&env)) {
            return Err(Error::BonusNotReleased);
        }
        require_not_reentrant(&env)?;

        let amount = ledger::take_bonus(&env, &contributor)?;
        let mut sale_ledger = storage::get_ledger(&env);
        sale_ledger.record_bonus_withdrawal(amount)?;
        storage::set_ledger(&env, &sale_ledger);
        bump_instance(&env);

        send(&env, &config.token, &contributor, amount);
        clear_reentrancy(&env);

        events::emit_bonus_withdrawn(&env, &contributor, amount);
        Ok(amount)
    }

    /// Sends `amount` of the native asset held by the sale to the caller.
    pub fn withdraw_funds(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        let config = require_admin(&env, &caller)?;
        if amount <= 0 || balance_of_self(&env, &config.native_asset) < amount {
            return Err(Error::InvalidAmount);
        }
        require_not_reentrant(&env)?;
        send(&env, &config.native_asset, &caller, amount);
        clear_reentrancy(&env);
        events::emit_funds_withdrawn(&env, &caller, amount);
        Ok(())
    }

    /// Sends the sale's whole balance of `token` to the caller. Draining the sale token
    /// while bonus is still owed strands the holders; that ordering is on the caller.
    pub fn withdraw_token(env: Env, caller: Address, token: Address) -> Result<i128, Error> {
        require_admin(&env, &caller)?;
        require_not_reentrant(&env)?;
        let amount = balance_of_self(&env, &token);
        send(&env, &token, &caller, amount);
        clear_reentrancy(&env);
        events::emit_token_withdrawn(&env, &caller, &token, amount);
        Ok(amount)
    }

    /// Sweeps the unsold sale token to the caller, keeping the outstanding bonus in
    /// custody. Returns the swept amount.
    pub fn finalize_crowdsale(env: Env, caller: Address) -> Result<i128, Error> {
        let mut config = require_admin(&env, &caller)?;
        if config.finalized {
            return Err(Error::AlreadyFinalized);
        }
        let sale_ledger = storage::get_ledger(&env);
        if !lifecycle::has_closed(&config, &sale_ledger, now(&env)) {
            return Err(Error::SaleNotClosed);
        }
        require_not_reentrant(&env)?;

        config.finalized = true;
        storage::set_config(&env, &config);
        bump_instance(&env);

        let reserved = sale_ledger.outstanding_bonus();
        let swept = balance_of_self(&env, &config.token)
            .checked_sub(reserved)
            .unwrap_or(0)
            .max(0);
        send(&env, &config.token, &caller, swept);
        clear_reentrancy(&env);

        events::emit_finalized(&env, &caller, swept, reserved);
        Ok(swept)
    }

    // View functions
    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        storage::get_config(&env)
    }

    pub fn get_ledger(env: Env) -> AllocationLedger {
        storage::get_ledger(&env)
    }

    pub fn sale_kind(env: Env) -> Result<SaleKind, Error> {
        Ok(storage::get_config(&env)?.kind)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(storage::get_config(&env)?.owner)
    }

    pub fn sale_token(env: Env) -> Result<Address, Error> {
        Ok(storage::get_config(&env)?.token)
    }

    pub fn native_asset(env: Env) -> Result<Address, Error> {
        Ok(storage::get_config(&env)?.native_asset)
    }

    pub fn currency_a(env: Env) -> Result<Address, Error> {
        Ok(storage::get_config(&env)?.currency_a)
    }

    pub fn currency_b(env: Env) -> Result<Address, Error> {
        Ok(storage::get_config(&env)?.currency_b)
    }

    pub fn opening_time(env: Env) -> Result<u64, Error> {
        Ok(storage::get_config(&env)?.opening_time)
    }

    pub fn closing_time(env: Env) -> Result<u64, Error> {
        Ok(storage::get_config(&env)?.closing_time)
    }

    pub fn token_price(env: Env) -> Result<u64, Error> {
        Ok(storage::get_config(&env)?.token_price_cents)
    }

    pub fn native_price(env: Env) -> Result<u64, Error> {
        Ok(storage::get_config(&env)?.native_price_cents)
    }

    pub fn currency_a_price(env: Env) -> Result<u64, Error> {
        Ok(storage::get_config(&env)?.currency_a_price_cents)
    }

    pub fn currency_b_price(env: Env) -> Result<u64, Error> {
        Ok(storage::get_config(&env)?.currency_b_price_cents)
    }

    pub fn min_contribution(env: Env) -> Result<i128, Error> {
        Ok(storage::get_config(&env)?.min_contribution_cents)
    }

    pub fn release_date(env: Env) -> Result<u64, Error> {
        Ok(storage::get_config(&env)?.release_date)
    }

    pub fn is_initialized(env: Env) -> Result<bool, Error> {
        Ok(storage::get_config(&env)?.initialized)
    }

    pub fn is_finalized(env: Env) -> Result<bool, Error> {
        Ok(storage::get_config(&env)?.finalized)
    }

    pub fn is_admin(env: Env, who: Address) -> Result<bool, Error> {
        let config = storage::get_config(&env)?;
        Ok(has_admin_rights(&env, &config, &who))
    }

    pub fn is_whitelisted(env: Env, who: Address) -> bool {
        storage::is_whitelisted(&env, &who)
    }

    pub fn total_sale_allocation(env: Env) -> i128 {
        storage::get_ledger(&env).total_sale_allocation
    }

    pub fn total_tokens_sold(env: Env) -> i128 {
        storage::get_ledger(&env).total_tokens_sold
    }

    pub fn bonus_provided(env: Env) -> i128 {
        storage::get_ledger(&env).bonus_provided
    }

    pub fn bonus_withdrawn(env: Env) -> i128 {
        storage::get_ledger(&env).bonus_withdrawn
    }

    pub fn outstanding_bonus(env: Env) -> i128 {
        storage::get_ledger(&env).outstanding_bonus()
    }

    pub fn bonus_of(env: Env, holder: Address) -> i128 {
        storage::get_bonus_balance(&env, &holder)
    }

    pub fn bonus_tiers(env: Env) -> Vec<BonusTier> {
        storage::get_bonus_schedule(&env)
    }

    pub fn bonus_tier(env: Env, index: u32) -> Option<BonusTier> {
        storage::get_bonus_schedule(&env).get(index)
    }

    pub fn is_open(env: Env) -> Result<bool, Error> {
        let config = storage::get_config(&env)?;
        Ok(lifecycle::is_open(
            &config,
            &storage::get_ledger(&env),
            now(&env),
        ))
    }

    pub fn has_closed(env: Env) -> Result<bool, Error> {
        let config = storage::get_config(&env)?;
        Ok(lifecycle::has_closed(
            &config,
            &storage::get_ledger(&env),
            now(&env),
        ))
    }

    pub fn phase(env: Env) -> Result<SalePhase, Error> {
        let config = storage::get_config(&env)?;
        Ok(lifecycle::phase(
            &config,
            &storage::get_ledger(&env),
            now(&env),
        ))
    }

    pub fn get_bonus_percentage(env: Env, timestamp: u64) -> u32 {
        bonus::percentage_at(&storage::get_bonus_schedule(&env), timestamp)
    }

    pub fn calculate_bonus(_env: Env, amount: i128, percentage: u32) -> Result<i128, Error> {
        bonus::calculate_bonus(amount, percentage)
    }

    pub fn convert_to_cents(
        _env: Env,
        amount: i128,
        price_cents: u64,
        decimals: u32,
    ) -> Result<i128, Error> {
        pricing::convert_to_cents(amount, price_cents, decimals)
    }

    pub fn token_amount_for_native(env: Env, amount: i128) -> Result<i128, Error> {
        let config = storage::get_config(&env)?;
        pricing::token_amount_for_native(
            amount,
            config.native_price_cents,
            config.token_price_cents,
            config.decimals.native,
            config.decimals.token,
        )
    }

    pub fn token_amount_for_cents(env: Env, usd_cents: i128) -> Result<i128, Error> {
        let config = storage::get_config(&env)?;
        pricing::token_amount_for_cents(usd_cents, config.token_price_cents, config.decimals.token)
    }
}
