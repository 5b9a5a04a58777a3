use crate::errors::Error;
use crate::storage;
use crate::types::AllocationLedger;
use soroban_sdk::{Address, Env};

fn add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::ArithmeticOverflow)
}

impl AllocationLedger {
    pub fn add_allocation(&mut self, amount: i128) -> Result<(), Error> {
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        self.total_sale_allocation = add(self.total_sale_allocation, amount)?;
        Ok(())
    }

    /// Admits a sale of `principal + bonus` units, all or nothing. Filling the
    /// allocation exactly is allowed.
    pub fn admit(&mut self, principal: i128, bonus: i128) -> Result<(), Error> {
        if principal < 0 || bonus < 0 {
            return Err(Error::InvalidAmount);
        }
        let sold = add(self.total_tokens_sold, add(principal, bonus)?)?;
        if sold > self.total_sale_allocation {
            return Err(Error::AllocationExceeded);
        }
        self.total_tokens_sold = sold;
        self.bonus_provided = add(self.bonus_provided, bonus)?;
        Ok(())
    }

    pub fn record_bonus_withdrawal(&mut self, amount: i128) -> Result<(), Error> {
        let withdrawn = add(self.bonus_withdrawn, amount)?;
        if withdrawn > self.bonus_provided {
            return Err(Error::InvalidAmount);
        }
        self.bonus_withdrawn = withdrawn;
        Ok(())
    }

    /// Bonus owed to holders and still held in custody.
    pub fn outstanding_bonus(&self) -> i128 {
        self.bonus_provided - self.bonus_withdrawn
    }

    pub fn is_sold_out(&self) -> bool {
        self.total_tokens_sold >= self.total_sale_allocation
    }

    pub fn holds_invariants(&self) -> bool {
        self.total_tokens_sold <= self.total_sale_allocation
            && self.bonus_provided <= self.total_tokens_sold
            && self.bonus_withdrawn <= self.bonus_provided
            && self.bonus_withdrawn >= 0
    }
}

pub fn credit_bonus(env: &Env, holder: &Address, bonus: i128) -> Result<(), Error> {
    if bonus == 0 {
        return Ok(());
    }
    let balance = add(storage::get_bonus_balance(env, holder), bonus)?;
    storage::set_bonus_balance(env, holder, balance);
    Ok(())
}

/// Zeroes the holder's bonus balance and returns what it held.
pub fn take_bonus(env: &Env, holder: &Address) -> Result<i128, Error> {
    let balance = storage::get_bonus_balance(env, holder);
    if balance <= 0 {
        return Err(Error::NoBonusBalance);
    }
    storage::set_bonus_balance(env, holder, 0);
    Ok(balance)
}
