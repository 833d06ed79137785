// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewTransaction, Transaction, TransactionUpdate};
use crate::planner::effective_count;
use crate::store::LedgerStore;
use crate::utils::{
    fmt_money, get_currency_label, maybe_print_json, parse_date, parse_decimal, parse_kind,
    parse_month, pretty_table,
};
use anyhow::Result;
use std::collections::HashMap;

pub fn handle(store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.remove_transaction(id)?;
            println!("Removed transaction {}", id);
        }
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let req = NewTransaction {
        kind: parse_kind(sub.get_one::<String>("type").unwrap())?,
        description: sub.get_one::<String>("description").unwrap().to_string(),
        category: sub.get_one::<String>("category").unwrap().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        transaction_date: parse_date(sub.get_one::<String>("date").unwrap())?,
        installments: sub.get_one::<i64>("installments").copied(),
        card_id: sub.get_one::<i64>("card_id").copied(),
    };
    let (kind, amount, date) = (req.kind, req.amount, req.transaction_date);
    let requested = req.installments.unwrap_or(1);
    store.add_transaction(req)?;
    let parts = effective_count(kind, requested)?;
    println!(
        "Recorded {} of {} on {} ({} part{})",
        kind,
        amount,
        date,
        parts,
        if parts == 1 { "" } else { "s" }
    );
    Ok(())
}

fn update(store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let stored = store.transaction(id)?;
    let card_id = if sub.get_flag("no_card") {
        None
    } else {
        sub.get_one::<i64>("card_id").copied().or(stored.card_id)
    };
    let req = TransactionUpdate {
        id,
        kind: parse_kind(sub.get_one::<String>("type").unwrap())?,
        description: sub.get_one::<String>("description").unwrap().to_string(),
        category: sub.get_one::<String>("category").unwrap().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        transaction_date: parse_date(sub.get_one::<String>("date").unwrap())?,
        installments: sub
            .get_one::<i64>("installments")
            .copied()
            .unwrap_or(i64::from(stored.installments)),
        installment_number: sub
            .get_one::<i64>("installment_number")
            .copied()
            .unwrap_or(i64::from(stored.installment_number)),
        card_id,
    };
    store.update_transaction(req)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let label = get_currency_label(store.connection())?;
        let card_names: HashMap<i64, String> = store
            .all_cards()?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.transaction_date.to_string(),
                    t.kind.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    fmt_money(&t.amount, &label),
                    format!("{}/{}", t.installment_number, t.installments),
                    t.card_id
                        .and_then(|id| card_names.get(&id).cloned())
                        .unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Description", "Category", "Amount", "Part", "Card"],
                rows,
            )
        );
    }
    Ok(())
}

/// Rows selected by `tx list`: a single month in chronological order, or the
/// whole ledger newest first.
pub fn query_rows(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let mut rows = match sub.get_one::<String>("month") {
        Some(m) => {
            let (year, month) = parse_month(m)?;
            store.transactions_by_month(year, month)?
        }
        None => store.all_transactions()?,
    };
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}
