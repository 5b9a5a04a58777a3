//! Price conversion between payment assets, USD cents and sale-token units.
//!
//! Every payment asset carries its own decimal scale. USD values are whole cents,
//! rounded half-up on the final division. All arithmetic is checked.

use crate::errors::Error;
use crate::types::{Currency, SaleConfig};

fn pow10(decimals: u32) -> Result<i128, Error> {
    10i128.checked_pow(decimals).ok_or(Error::ArithmeticOverflow)
}

fn mul(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_mul(b).ok_or(Error::ArithmeticOverflow)
}

/// `round(amount * price_cents / 10^decimals)`, half-up.
pub fn convert_to_cents(amount: i128, price_cents: u64, decimals: u32) -> Result<i128, Error> {
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    let scale = pow10(decimals)?;
    let value = mul(amount, price_cents as i128)?;
    let rounded = value
        .checked_add(scale / 2)
        .ok_or(Error::ArithmeticOverflow)?;
    Ok(rounded / scale)
}

/// `amount * native_price / token_price`, rescaled when the native asset and the sale
/// token use different decimals. Equal scales give exactly the plain formula.
pub fn token_amount_for_native(
    amount: i128,
    native_price_cents: u64,
    token_price_cents: u64,
    native_decimals: u32,
    token_decimals: u32,
) -> Result<i128, Error> {
    if token_price_cents == 0 {
        return Err(Error::ZeroPrice);
    }
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    let value = mul(amount, native_price_cents as i128)?;
    let token_price = token_price_cents as i128;
    if token_decimals >= native_decimals {
        let up = pow10(token_decimals - native_decimals)?;
        Ok(mul(value, up)? / token_price)
    } else {
        let down = pow10(native_decimals - token_decimals)?;
        Ok(value / mul(token_price, down)?)
    }
}

/// `usd_cents * 10^token_decimals / token_price`.
pub fn token_amount_for_cents(
    usd_cents: i128,
    token_price_cents: u64,
    token_decimals: u32,
) -> Result<i128, Error> {
    if token_price_cents == 0 {
        return Err(Error::ZeroPrice);
    }
    let scaled = mul(usd_cents, pow10(token_decimals)?)?;
    Ok(scaled / token_price_cents as i128)
}

pub struct Quote {
    pub usd_cents: i128,
    pub principal: i128,
}

/// Values a payment in `currency` and enforces the minimum contribution.
pub fn quote(config: &SaleConfig, currency: Currency, paid: i128) -> Result<Quote, Error> {
    let (price, decimals) = match currency {
        Currency::Native => (config.native_price_cents, config.decimals.native),
        Currency::CurrencyA => (config.currency_a_price_cents, config.decimals.currency_a),
        Currency::CurrencyB => (config.currency_b_price_cents, config.decimals.currency_b),
    };
    let usd_cents = convert_to_cents(paid, price, decimals)?;
    if usd_cents < config.min_contribution_cents {
        return Err(Error::BelowMinimumContribution);
    }

    let principal = match currency {
        Currency::Native => token_amount_for_native(
            paid,
            config.native_price_cents,
            config.token_price_cents,
            config.decimals.native,
            config.decimals.token,
        )?,
        Currency::CurrencyA | Currency::CurrencyB => token_amount_for_cents(
            usd_cents,
            config.token_price_cents,
            config.decimals.token,
        )?,
    };
    Ok(Quote {
        usd_cents,
        principal,
    })
}
