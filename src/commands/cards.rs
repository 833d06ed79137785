// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Card, NewCard};
use crate::store::LedgerStore;
use crate::utils::{fmt_money, get_currency_label, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let card = new_card_from(sub)?;
            let name = card.name.trim().to_string();
            store.add_card(card)?;
            println!("Added card '{}'", name);
        }
        Some(("list", sub)) => {
            let cards = store.all_cards()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cards)? {
                let label = get_currency_label(store.connection())?;
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Name", "Limit", "Closing", "Due", "Brand"],
                        card_rows(&cards, &label),
                    )
                );
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.remove_card(id)?;
            println!("Removed card {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn new_card_from(sub: &clap::ArgMatches) -> Result<NewCard> {
    Ok(NewCard {
        name: sub.get_one::<String>("name").unwrap().to_string(),
        limit_value: parse_decimal(sub.get_one::<String>("limit").unwrap())?,
        closing_day: sub.get_one::<u32>("closing_day").copied(),
        due_day: sub.get_one::<u32>("due_day").copied(),
        brand: sub.get_one::<String>("brand").cloned(),
    })
}

fn card_rows(cards: &[Card], label: &str) -> Vec<Vec<String>> {
    cards
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                fmt_money(&c.limit_value, label),
                c.closing_day.to_string(),
                c.due_day.to_string(),
                c.brand.clone().unwrap_or_default(),
            ]
        })
        .collect()
}
