// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};

use crate::error::{LedgerError, Result};

/// Inclusive `[first, last]` day range of a calendar month.
pub fn month_range(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::invalid(format!(
            "month {} out of range 1-12",
            month
        )));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::invalid(format!("invalid month {}-{:02}", year, month)))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| LedgerError::invalid(format!("invalid month {}-{:02}", year, month)))?;
    Ok((first, last))
}
