// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed request/response contract for UI callers.
//!
//! Requests are adjacently tagged: `{"op": "addCard", "payload": {...}}`.
//! Operations without input omit `payload`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Card, NewCard, NewTransaction, Transaction, TransactionUpdate};
use crate::savings::SavingsHistory;
use crate::store::LedgerStore;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "op", content = "payload", rename_all = "camelCase")]
pub enum Request {
    GetInitialData,
    AddCard(NewCard),
    RemoveCard(i64),
    AddTransaction(NewTransaction),
    UpdateTransaction(TransactionUpdate),
    RemoveTransaction(i64),
    GetTransactionsByMonth { year: i32, month: u32 },
    GetSavingsHistory,
}

/// Views returned to the caller. Each operation fills only the fields it
/// defines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<SavingsHistory>,
}

impl Response {
    fn cards(cards: Vec<Card>) -> Self {
        Self {
            cards: Some(cards),
            ..Default::default()
        }
    }

    /// Transaction list plus the savings history derived from it.
    fn ledger(store: &LedgerStore, transactions: Vec<Transaction>) -> Result<Self> {
        Ok(Self {
            savings: Some(store.savings_history()?),
            transactions: Some(transactions),
            ..Default::default()
        })
    }
}

pub fn dispatch(store: &mut LedgerStore, request: Request) -> Result<Response> {
    tracing::debug!(?request, "dispatch");
    match request {
        Request::GetInitialData => Ok(Response {
            cards: Some(store.all_cards()?),
            transactions: Some(store.all_transactions()?),
            savings: Some(store.savings_history()?),
        }),
        Request::AddCard(card) => Ok(Response::cards(store.add_card(card)?)),
        Request::RemoveCard(id) => Ok(Response::cards(store.remove_card(id)?)),
        Request::AddTransaction(tx) => {
            let txs = store.add_transaction(tx)?;
            Response::ledger(store, txs)
        }
        Request::UpdateTransaction(tx) => {
            let txs = store.update_transaction(tx)?;
            Response::ledger(store, txs)
        }
        Request::RemoveTransaction(id) => {
            let txs = store.remove_transaction(id)?;
            Response::ledger(store, txs)
        }
        Request::GetTransactionsByMonth { year, month } => Ok(Response {
            transactions: Some(store.transactions_by_month(year, month)?),
            ..Default::default()
        }),
        Request::GetSavingsHistory => Ok(Response {
            savings: Some(store.savings_history()?),
            ..Default::default()
        }),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// One line of `serve` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Envelope {
    pub fn success(data: Response) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(kind: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ErrorBody {
                kind: kind.to_string(),
                message: message.into(),
            }),
        }
    }
}

impl From<Result<Response>> for Envelope {
    fn from(value: Result<Response>) -> Self {
        match value {
            Ok(data) => Envelope::success(data),
            Err(e) => Envelope::failure(e.kind(), e.to_string()),
        }
    }
}

/// Parse one JSON request line, run it and wrap the outcome.
pub fn handle_line(store: &mut LedgerStore, line: &str) -> Envelope {
    match serde_json::from_str::<Request>(line) {
        Ok(req) => dispatch(store, req).into(),
        Err(e) => Envelope::failure("request", format!("malformed request: {}", e)),
    }
}
