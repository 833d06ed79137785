// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::LedgerStore;
use anyhow::{Result, bail};
use serde_json::json;
use std::collections::HashMap;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let cards: HashMap<i64, String> = store
        .all_cards()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    // oldest first
    let mut txs = store.all_transactions()?;
    txs.sort_by(|a, b| {
        a.transaction_date
            .cmp(&b.transaction_date)
            .then(a.id.cmp(&b.id))
    });

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record([
            "date",
            "type",
            "description",
            "category",
            "amount",
            "card",
            "installment",
            "installments",
        ])?;
        for t in &txs {
            wtr.write_record([
                t.transaction_date.to_string(),
                t.kind.to_string(),
                t.description.clone(),
                t.category.clone(),
                t.amount.to_string(),
                t.card_id
                    .and_then(|id| cards.get(&id).cloned())
                    .unwrap_or_default(),
                t.installment_number.to_string(),
                t.installments.to_string(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = txs
            .iter()
            .map(|t| {
                json!({
                    "date": t.transaction_date.to_string(),
                    "type": t.kind.as_str(),
                    "description": t.description,
                    "category": t.category,
                    "amount": t.amount.to_string(),
                    "card": t.card_id.and_then(|id| cards.get(&id).cloned()),
                    "installment": t.installment_number,
                    "installments": t.installments,
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
