// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::savings::SavingsHistory;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, get_currency_label, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let history = recent(store.savings_history()?, sub.get_one::<usize>("months").copied());

    if maybe_print_json(json_flag, jsonl_flag, &history)? {
        return Ok(());
    }
    let label = get_currency_label(store.connection())?;
    let mut data: Vec<Vec<String>> = history
        .months
        .iter()
        .map(|m| {
            vec![
                format!("{}-{:02}", m.year, m.month),
                fmt_money(&m.income, &label),
                fmt_money(&m.expense, &label),
                fmt_money(&m.savings, &label),
            ]
        })
        .collect();
    data.push(vec![
        "Total".into(),
        String::new(),
        String::new(),
        fmt_money(&history.total, &label),
    ]);
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Savings"], data)
    );
    Ok(())
}

/// Keep the newest `months` entries. The total stays the all-time figure.
pub fn recent(mut history: SavingsHistory, months: Option<usize>) -> SavingsHistory {
    if let Some(n) = months {
        history.months.truncate(n);
    }
    history
}
