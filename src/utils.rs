// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::sync::Once;

use crate::models::TxKind;

const DEFAULT_CURRENCY_LABEL: &str = "$";

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber. Logs go to stderr so `serve` keeps
/// stdout for protocol traffic. `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("cardbook=warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parse `YYYY-MM` into `(year, month)`.
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let s = s.trim();
    let (y, m) = s
        .split_once('-')
        .ok_or_else(|| anyhow!("Invalid month '{}', expected YYYY-MM", s))?;
    let year: i32 = y
        .parse()
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    let month: u32 = m
        .parse()
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    if !(1..=12).contains(&month) {
        return Err(anyhow!("Invalid month number {}", month));
    }
    Ok((year, month))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_kind(s: &str) -> Result<TxKind> {
    Ok(s.parse::<TxKind>()?)
}

pub fn fmt_money(d: &Decimal, label: &str) -> String {
    format!("{} {:.2}", label, d)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Display currency label. Amounts are single-currency; this is cosmetic.
pub fn get_currency_label(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='currency_label'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY_LABEL.to_string()))
}

pub fn set_currency_label(conn: &Connection, label: &str) -> Result<()> {
    let label = label.trim();
    if label.is_empty() {
        return Err(anyhow!("Currency label must not be empty"));
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency_label', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![label],
    )?;
    Ok(())
}
