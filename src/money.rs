// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Integer-cent arithmetic for currency amounts.
//!
//! Every amount that reaches the store passes through [`normalize`], and every
//! installment split goes through [`distribute`], so no persisted value ever
//! carries more than two fractional digits and a split always sums back to
//! its total.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{LedgerError, Result};

/// Number of fractional digits in a currency amount.
pub const SCALE: u32 = 2;

/// Convert an amount to whole cents, rounding half away from zero.
pub fn to_cents(amount: Decimal) -> Result<i64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::invalid(format!(
            "amount {} must not be negative",
            amount
        )));
    }
    amount
        .round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|c| c.to_i64())
        .ok_or_else(|| LedgerError::invalid(format!("amount {} is out of range", amount)))
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, SCALE)
}

/// Round a user-entered amount to currency scale. The result always has
/// exactly two fractional digits.
pub fn normalize(amount: Decimal) -> Result<Decimal> {
    Ok(from_cents(to_cents(amount)?))
}

/// Split `total_cents` into `count` parts. The first `total_cents % count`
/// parts carry one extra cent.
pub fn split_cents(total_cents: i64, count: u32) -> Result<Vec<i64>> {
    if count < 1 {
        return Err(LedgerError::invalid("cannot split into zero parts"));
    }
    if total_cents < 0 {
        return Err(LedgerError::invalid(format!(
            "cannot split negative total {}",
            total_cents
        )));
    }
    let n = i64::from(count);
    let base = total_cents / n;
    let remainder = total_cents - base * n;
    Ok((0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect())
}

/// Split `total` into `count` currency amounts summing exactly to the
/// rounded total.
pub fn distribute(total: Decimal, count: u32) -> Result<Vec<Decimal>> {
    let cents = to_cents(total)?;
    Ok(split_cents(cents, count)?
        .into_iter()
        .map(from_cents)
        .collect())
}
