// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

pub const DEFAULT_CLOSING_DAY: u32 = 1;
pub const DEFAULT_DUE_DAY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(LedgerError::invalid(format!(
                "unknown transaction type '{}', expected income|expense",
                other
            ))),
        }
    }
}

impl ToSql for TxKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TxKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse::<TxKind>()
            .map_err(|_| FromSqlError::Other(format!("unknown transaction type '{}'", s).into()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub limit_value: Decimal,
    pub closing_day: u32,
    pub due_day: u32,
    pub brand: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub card_id: Option<i64>,
    pub installments: u32,
    pub installment_number: u32,
    pub created_at: DateTime<Utc>,
}

/// Card as submitted by the user, before defaults are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub name: String,
    pub limit_value: Decimal,
    #[serde(default)]
    pub closing_day: Option<u32>,
    #[serde(default)]
    pub due_day: Option<u32>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// One user-submitted purchase or income entry. Expands into an installment
/// group on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub installments: Option<i64>,
    #[serde(default)]
    pub card_id: Option<i64>,
}

/// Full rewrite of a single stored row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub installments: i64,
    pub installment_number: i64,
    #[serde(default)]
    pub card_id: Option<i64>,
}
