// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TxKind};
use crate::money::SCALE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySavings {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
    /// `max(0, income - expense)`
    pub savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsHistory {
    /// Most recent month first.
    pub months: Vec<MonthlySavings>,
    /// Sum of the per-month clamped savings.
    pub total: Decimal,
}

pub fn aggregate(txs: &[Transaction]) -> SavingsHistory {
    let zero = Decimal::new(0, SCALE);
    let mut map: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for t in txs {
        let key = (t.transaction_date.year(), t.transaction_date.month());
        let entry = map.entry(key).or_insert((zero, zero));
        match t.kind {
            TxKind::Income => entry.0 += t.amount,
            TxKind::Expense => entry.1 += t.amount,
        }
    }

    let mut total = zero;
    let mut months = Vec::with_capacity(map.len());
    for ((year, month), (income, expense)) in map.into_iter().rev() {
        let savings = (income - expense).max(zero);
        total += savings;
        months.push(MonthlySavings {
            year,
            month,
            income: income.round_dp(SCALE),
            expense: expense.round_dp(SCALE),
            savings: savings.round_dp(SCALE),
        });
    }
    SavingsHistory {
        months,
        total: total.round_dp(SCALE),
    }
}
