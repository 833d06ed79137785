// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};
use crate::models::TxKind;
use crate::money::distribute;

/// Upper bound on the parts a single submission may expand into.
pub const MAX_INSTALLMENTS: u32 = 600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInstallment {
    pub number: u32,
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Installment count actually used for `kind`. Income is never split.
pub fn effective_count(kind: TxKind, requested: i64) -> Result<u32> {
    if kind == TxKind::Income {
        return Ok(1);
    }
    let n = requested.max(1);
    if n > i64::from(MAX_INSTALLMENTS) {
        return Err(LedgerError::invalid(format!(
            "installments {} exceeds the maximum of {}",
            n, MAX_INSTALLMENTS
        )));
    }
    Ok(n as u32)
}

/// `start` shifted by `months` calendar months. Days past the end of the
/// target month land on its last day.
pub fn add_months(start: NaiveDate, months: u32) -> Result<NaiveDate> {
    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| LedgerError::invalid(format!("date {} + {} months overflows", start, months)))
}

pub fn plan(
    kind: TxKind,
    total: Decimal,
    start: NaiveDate,
    requested: i64,
) -> Result<Vec<PlannedInstallment>> {
    let count = effective_count(kind, requested)?;
    let amounts = distribute(total, count)?;
    amounts
        .into_iter()
        .zip(0..count)
        .map(|(amount, offset)| -> Result<PlannedInstallment> {
            Ok(PlannedInstallment {
                number: offset + 1,
                date: add_months(start, offset)?,
                amount,
            })
        })
        .collect()
}
