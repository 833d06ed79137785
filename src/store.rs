// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed home of cards and transactions.
//!
//! [`LedgerStore`] owns its connection. Every mutating call returns the fresh
//! ordered snapshot the caller needs to redraw, and multi-row writes run
//! inside a single SQL transaction.

use std::path::Path;

use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::db;
use crate::error::{LedgerError, Result};
use crate::models::{
    Card, DEFAULT_CLOSING_DAY, DEFAULT_DUE_DAY, NewCard, NewTransaction, Transaction,
    TransactionUpdate, TxKind,
};
use crate::month;
use crate::money;
use crate::planner;
use crate::savings::{self, SavingsHistory};

const CARD_COLUMNS: &str = "id, name, limit_value, closing_day, due_day, brand, created_at";
const TX_COLUMNS: &str = "id, type, description, category, amount, transaction_date, card_id, installments, installment_number, created_at";

pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    pub fn from_connection(conn: Connection) -> Result<Self> {
        db::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn add_card(&mut self, card: NewCard) -> Result<Vec<Card>> {
        let name = required("card name", &card.name)?;
        let limit = positive_amount("card limit", card.limit_value)?;
        let closing_day = day_of_month(
            "closing day",
            card.closing_day.unwrap_or(DEFAULT_CLOSING_DAY),
        )?;
        let due_day = day_of_month("due day", card.due_day.unwrap_or(DEFAULT_DUE_DAY))?;
        let brand = card
            .brand
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        self.conn.execute(
            "INSERT INTO cards(name, limit_value, closing_day, due_day, brand, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                name,
                limit.to_string(),
                closing_day,
                due_day,
                brand,
                Utc::now()
            ],
        )?;
        tracing::info!(id = self.conn.last_insert_rowid(), name = %name, "card added");
        self.all_cards()
    }

    /// Delete a card. Transactions that pointed at it keep existing with
    /// their card reference cleared.
    pub fn remove_card(&mut self, id: i64) -> Result<Vec<Card>> {
        let tx = self.conn.transaction()?;
        let cleared = tx.execute(
            "UPDATE transactions SET card_id=NULL WHERE card_id=?1",
            params![id],
        )?;
        let removed = tx.execute("DELETE FROM cards WHERE id=?1", params![id])?;
        if removed == 0 {
            return Err(LedgerError::NotFound { entity: "card", id });
        }
        tx.commit()?;
        tracing::info!(id, cleared, "card removed");
        self.all_cards()
    }

    /// Expand the submission into its installment group and write every row
    /// in one SQL transaction.
    pub fn add_transaction(&mut self, req: NewTransaction) -> Result<Vec<Transaction>> {
        let description = required("description", &req.description)?;
        let category = required("category", &req.category)?;
        let amount = positive_amount("amount", req.amount)?;
        let card_id = self.resolve_card(req.kind, req.card_id)?;
        let parts = planner::plan(
            req.kind,
            amount,
            req.transaction_date,
            req.installments.unwrap_or(1),
        )?;
        let count = parts.len() as u32;
        let created_at = Utc::now();

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO transactions(type, description, category, amount, transaction_date,
                     card_id, installments, installment_number, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for part in &parts {
                stmt.execute(params![
                    req.kind,
                    description,
                    category,
                    part.amount.to_string(),
                    part.date,
                    card_id,
                    count,
                    part.number,
                    created_at
                ])?;
            }
        }
        tx.commit()?;
        tracing::info!(
            kind = %req.kind,
            total = %amount,
            installments = count,
            "transaction group inserted"
        );
        self.all_transactions()
    }

    /// Rewrite exactly one row. Never expands into siblings.
    pub fn update_transaction(&mut self, req: TransactionUpdate) -> Result<Vec<Transaction>> {
        let description = required("description", &req.description)?;
        let category = required("category", &req.category)?;
        let amount = positive_amount("amount", req.amount)?;
        let card_id = self.resolve_card(req.kind, req.card_id)?;
        let count = planner::effective_count(req.kind, req.installments)?;
        let number = req.installment_number.clamp(1, i64::from(count)) as u32;

        let changed = self.conn.execute(
            "UPDATE transactions SET type=?1, description=?2, category=?3, amount=?4,
                 transaction_date=?5, card_id=?6, installments=?7, installment_number=?8
             WHERE id=?9",
            params![
                req.kind,
                description,
                category,
                amount.to_string(),
                req.transaction_date,
                card_id,
                count,
                number,
                req.id
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound {
                entity: "transaction",
                id: req.id,
            });
        }
        tracing::info!(id = req.id, "transaction updated");
        self.all_transactions()
    }

    /// Delete one row. Sibling installments stay.
    pub fn remove_transaction(&mut self, id: i64) -> Result<Vec<Transaction>> {
        let removed = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if removed == 0 {
            return Err(LedgerError::NotFound {
                entity: "transaction",
                id,
            });
        }
        tracing::info!(id, "transaction removed");
        self.all_transactions()
    }

    pub fn all_cards(&self) -> Result<Vec<Card>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM cards ORDER BY name ASC, id ASC",
            CARD_COLUMNS
        ))?;
        let cards = stmt
            .query_map([], card_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(count = cards.len(), "loaded cards");
        Ok(cards)
    }

    /// Most recent activity first; rows of the same day fall back to
    /// insertion order, newest first.
    pub fn all_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM transactions
             ORDER BY transaction_date DESC, created_at DESC, id DESC",
            TX_COLUMNS
        ))?;
        let txs = stmt
            .query_map([], tx_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(count = txs.len(), "loaded transactions");
        Ok(txs)
    }

    pub fn transaction(&self, id: i64) -> Result<Transaction> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM transactions WHERE id=?1", TX_COLUMNS),
                params![id],
                tx_from_row,
            )
            .optional()?
            .ok_or(LedgerError::NotFound {
                entity: "transaction",
                id,
            })
    }

    pub fn transactions_by_month(&self, year: i32, month: u32) -> Result<Vec<Transaction>> {
        let (first, last) = month::month_range(year, month)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM transactions
             WHERE transaction_date BETWEEN ?1 AND ?2
             ORDER BY transaction_date ASC, installment_number ASC, id ASC",
            TX_COLUMNS
        ))?;
        let txs = stmt
            .query_map(params![first, last], tx_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(txs)
    }

    pub fn savings_history(&self) -> Result<SavingsHistory> {
        Ok(savings::aggregate(&self.all_transactions()?))
    }

    /// Card reference to persist for a row of `kind`. Income never keeps one;
    /// expenses may only point at an existing card.
    fn resolve_card(&self, kind: TxKind, card_id: Option<i64>) -> Result<Option<i64>> {
        let Some(id) = card_id.filter(|_| kind == TxKind::Expense) else {
            return Ok(None);
        };
        let exists: Option<i64> = self
            .conn
            .query_row("SELECT id FROM cards WHERE id=?1", params![id], |r| r.get(0))
            .optional()?;
        match exists {
            Some(_) => Ok(Some(id)),
            None => Err(LedgerError::invalid(format!("unknown card {}", id))),
        }
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(LedgerError::invalid(format!("{} must not be empty", field)));
    }
    Ok(v.to_string())
}

fn positive_amount(field: &str, value: Decimal) -> Result<Decimal> {
    let v = money::normalize(value)?;
    if v <= Decimal::ZERO {
        return Err(LedgerError::invalid(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    Ok(v)
}

fn day_of_month(field: &str, day: u32) -> Result<u32> {
    if !(1..=31).contains(&day) {
        return Err(LedgerError::invalid(format!(
            "{} {} out of range 1-31",
            field, day
        )));
    }
    Ok(day)
}

fn decimal_column(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn card_from_row(r: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: r.get(0)?,
        name: r.get(1)?,
        limit_value: decimal_column(r, 2)?,
        closing_day: r.get(3)?,
        due_day: r.get(4)?,
        brand: r.get(5)?,
        created_at: r.get(6)?,
    })
}

fn tx_from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        kind: r.get(1)?,
        description: r.get(2)?,
        category: r.get(3)?,
        amount: decimal_column(r, 4)?,
        transaction_date: r.get(5)?,
        card_id: r.get(6)?,
        installments: r.get(7)?,
        installment_number: r.get(8)?,
        created_at: r.get(9)?,
    })
}
