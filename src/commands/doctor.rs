// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Scan raw rows for anything that breaks the ledger invariants. Reads
/// columns as text so a single bad row cannot abort the scan.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Income must be a single part with no card
    let mut stmt = conn.prepare(
        "SELECT id FROM transactions WHERE type='income'
         AND (installments != 1 OR installment_number != 1 OR card_id IS NOT NULL)
         ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["income_split_or_card".into(), format!("transaction {}", id)]);
    }

    // 2) Installment index outside [1, count]
    let mut stmt2 = conn.prepare(
        "SELECT id, installment_number, installments FROM transactions
         WHERE installments < 1 OR installment_number < 1 OR installment_number > installments
         ORDER BY id",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let n: i64 = r.get(1)?;
        let of: i64 = r.get(2)?;
        rows.push(vec![
            "installment_out_of_range".into(),
            format!("transaction {} part {}/{}", id, n, of),
        ]);
    }

    // 3) Amounts: parseable, positive, whole cents
    let mut stmt3 = conn.prepare("SELECT id, amount FROM transactions ORDER BY id")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let raw: String = r.get(1)?;
        match raw.parse::<Decimal>() {
            Err(_) => rows.push(vec![
                "unparseable_amount".into(),
                format!("transaction {} '{}'", id, raw),
            ]),
            Ok(d) if d <= Decimal::ZERO => rows.push(vec![
                "non_positive_amount".into(),
                format!("transaction {} {}", id, raw),
            ]),
            Ok(d) if d.normalize().scale() > 2 => rows.push(vec![
                "sub_cent_amount".into(),
                format!("transaction {} {}", id, raw),
            ]),
            Ok(_) => {}
        }
    }

    // 4) Card references that no longer resolve
    let mut stmt4 = conn.prepare(
        "SELECT t.id, t.card_id FROM transactions t LEFT JOIN cards c ON t.card_id=c.id
         WHERE t.card_id IS NOT NULL AND c.id IS NULL ORDER BY t.id",
    )?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        let card: i64 = r.get(1)?;
        rows.push(vec![
            "dangling_card".into(),
            format!("transaction {} -> card {}", id, card),
        ]);
    }

    Ok(rows)
}
