// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cardbook::models::{NewCard, NewTransaction, Transaction, TransactionUpdate, TxKind};
use cardbook::{LedgerError, LedgerStore};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn card(name: &str) -> NewCard {
    NewCard {
        name: name.into(),
        limit_value: Decimal::new(500000, 2),
        closing_day: None,
        due_day: None,
        brand: None,
    }
}

fn expense(desc: &str, cents: i64, date: NaiveDate, installments: i64) -> NewTransaction {
    NewTransaction {
        kind: TxKind::Expense,
        description: desc.into(),
        category: "General".into(),
        amount: Decimal::new(cents, 2),
        transaction_date: date,
        installments: Some(installments),
        card_id: None,
    }
}

fn income(desc: &str, cents: i64, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        kind: TxKind::Income,
        description: desc.into(),
        category: "Salary".into(),
        amount: Decimal::new(cents, 2),
        transaction_date: date,
        installments: None,
        card_id: None,
    }
}

fn update_of(t: &Transaction) -> TransactionUpdate {
    TransactionUpdate {
        id: t.id,
        kind: t.kind,
        description: t.description.clone(),
        category: t.category.clone(),
        amount: t.amount,
        transaction_date: t.transaction_date,
        installments: i64::from(t.installments),
        installment_number: i64::from(t.installment_number),
        card_id: t.card_id,
    }
}

fn setup() -> LedgerStore {
    LedgerStore::open_in_memory().unwrap()
}

#[test]
fn cards_get_defaults_and_come_back_sorted_by_name() {
    let mut store = setup();
    store.add_card(card("Visa")).unwrap();
    store
        .add_card(NewCard {
            brand: Some("  ".into()),
            ..card("  Amex  ")
        })
        .unwrap();
    let cards = store
        .add_card(NewCard {
            closing_day: Some(25),
            due_day: Some(5),
            brand: Some("Master".into()),
            ..card("Mastercard")
        })
        .unwrap();

    let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Amex", "Mastercard", "Visa"]);
    assert_eq!(cards[0].closing_day, 1);
    assert_eq!(cards[0].due_day, 10);
    assert_eq!(cards[0].brand, None);
    assert_eq!(cards[1].closing_day, 25);
    assert_eq!(cards[1].due_day, 5);
    assert_eq!(cards[1].brand.as_deref(), Some("Master"));
    assert_eq!(cards[2].limit_value.to_string(), "5000.00");
}

#[test]
fn invalid_cards_are_rejected_without_writing() {
    let mut store = setup();
    let bad = [
        card("   "),
        NewCard {
            limit_value: Decimal::ZERO,
            ..card("Zero")
        },
        NewCard {
            limit_value: Decimal::new(-100, 0),
            ..card("Negative")
        },
        NewCard {
            closing_day: Some(32),
            ..card("Late")
        },
        NewCard {
            due_day: Some(0),
            ..card("Early")
        },
    ];
    for c in bad {
        let err = store.add_card(c).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)), "{:?}", err);
    }
    assert!(store.all_cards().unwrap().is_empty());
}

#[test]
fn removing_a_card_clears_references_without_deleting_rows() {
    let mut store = setup();
    let card_id = store.add_card(card("Visa")).unwrap()[0].id;
    for i in 0..5 {
        store
            .add_transaction(NewTransaction {
                card_id: Some(card_id),
                ..expense(&format!("Item {}", i), 1000, d(2024, 4, 1 + i), 1)
            })
            .unwrap();
    }
    assert!(
        store
            .all_transactions()
            .unwrap()
            .iter()
            .all(|t| t.card_id == Some(card_id))
    );

    let cards = store.remove_card(card_id).unwrap();
    assert!(cards.is_empty());

    let txs = store.all_transactions().unwrap();
    assert_eq!(txs.len(), 5);
    assert!(txs.iter().all(|t| t.card_id.is_none()));
}

#[test]
fn removing_an_unknown_card_is_not_found() {
    let mut store = setup();
    let err = store.remove_card(42).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::NotFound {
            entity: "card",
            id: 42
        }
    ));
}

#[test]
fn installment_group_shares_fields_and_partitions_the_total() {
    let mut store = setup();
    let card_id = store.add_card(card("Visa")).unwrap()[0].id;
    let txs = store
        .add_transaction(NewTransaction {
            description: "  Laptop ".into(),
            category: " Electronics ".into(),
            card_id: Some(card_id),
            ..expense("", 100001, d(2024, 1, 31), 4)
        })
        .unwrap();

    assert_eq!(txs.len(), 4);
    let mut group = txs.clone();
    group.sort_by_key(|t| t.installment_number);
    let numbers: Vec<u32> = group.iter().map(|t| t.installment_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    let amounts: Vec<String> = group.iter().map(|t| t.amount.to_string()).collect();
    assert_eq!(amounts, vec!["250.01", "250.00", "250.00", "250.00"]);
    let dates: Vec<NaiveDate> = group.iter().map(|t| t.transaction_date).collect();
    assert_eq!(
        dates,
        vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30)]
    );
    assert_eq!(
        group.iter().map(|t| t.amount).sum::<Decimal>(),
        Decimal::new(100001, 2)
    );
    for t in &group {
        assert_eq!(t.description, "Laptop");
        assert_eq!(t.category, "Electronics");
        assert_eq!(t.kind, TxKind::Expense);
        assert_eq!(t.installments, 4);
        assert_eq!(t.card_id, Some(card_id));
        assert_eq!(t.created_at, group[0].created_at);
    }
}

#[test]
fn income_drops_installments_and_card() {
    let mut store = setup();
    let card_id = store.add_card(card("Visa")).unwrap()[0].id;
    let txs = store
        .add_transaction(NewTransaction {
            installments: Some(6),
            card_id: Some(card_id),
            ..income("Salary", 300000, d(2024, 2, 5))
        })
        .unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].installments, 1);
    assert_eq!(txs[0].installment_number, 1);
    assert_eq!(txs[0].card_id, None);
}

#[test]
fn income_ignores_even_an_unknown_card() {
    let mut store = setup();
    let txs = store
        .add_transaction(NewTransaction {
            card_id: Some(999),
            ..income("Bonus", 10000, d(2024, 2, 5))
        })
        .unwrap();
    assert_eq!(txs[0].card_id, None);
}

#[test]
fn expense_on_unknown_card_is_rejected() {
    let mut store = setup();
    let err = store
        .add_transaction(NewTransaction {
            card_id: Some(7),
            ..expense("TV", 10000, d(2024, 2, 5), 2)
        })
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(store.all_transactions().unwrap().is_empty());
}

#[test]
fn invalid_transactions_never_write() {
    let mut store = setup();
    let bad = [
        expense("   ", 1000, d(2024, 1, 1), 1),
        NewTransaction {
            category: "".into(),
            ..expense("Lunch", 1000, d(2024, 1, 1), 1)
        },
        expense("Lunch", 0, d(2024, 1, 1), 1),
        expense("Lunch", -500, d(2024, 1, 1), 3),
        NewTransaction {
            amount: Decimal::new(4, 3),
            ..expense("Dust", 0, d(2024, 1, 1), 1)
        },
    ];
    for t in bad {
        let err = store.add_transaction(t).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)), "{:?}", err);
    }
    assert!(store.all_transactions().unwrap().is_empty());
}

#[test]
fn failed_group_insert_leaves_no_partial_rows() {
    let mut store = setup();
    store
        .connection()
        .execute_batch(
            "CREATE TRIGGER fail_third_part BEFORE INSERT ON transactions
             WHEN NEW.installment_number = 3
             BEGIN SELECT RAISE(ABORT, 'simulated disk fault'); END;",
        )
        .unwrap();

    let err = store
        .add_transaction(expense("Fridge", 40000, d(2024, 6, 10), 4))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Storage(_)), "{:?}", err);
    assert!(store.all_transactions().unwrap().is_empty());

    // the store stays usable once the fault is gone
    store
        .connection()
        .execute_batch("DROP TRIGGER fail_third_part;")
        .unwrap();
    let txs = store
        .add_transaction(expense("Fridge", 40000, d(2024, 6, 10), 4))
        .unwrap();
    assert_eq!(txs.len(), 4);
}

#[test]
fn all_transactions_are_newest_date_first_then_newest_insert() {
    let mut store = setup();
    store
        .add_transaction(expense("Old", 1000, d(2024, 1, 10), 1))
        .unwrap();
    store
        .add_transaction(expense("First same day", 1000, d(2024, 3, 1), 1))
        .unwrap();
    store
        .add_transaction(expense("Second same day", 1000, d(2024, 3, 1), 1))
        .unwrap();
    let txs = store
        .add_transaction(income("Middle", 1000, d(2024, 2, 1)))
        .unwrap();

    let order: Vec<&str> = txs.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(
        order,
        vec!["Second same day", "First same day", "Middle", "Old"]
    );
}

#[test]
fn update_rewrites_one_row_and_normalizes_income() {
    let mut store = setup();
    let card_id = store.add_card(card("Visa")).unwrap()[0].id;
    let txs = store
        .add_transaction(NewTransaction {
            card_id: Some(card_id),
            ..expense("Phone", 90000, d(2024, 5, 10), 3)
        })
        .unwrap();
    let second = txs.iter().find(|t| t.installment_number == 2).unwrap();

    let txs = store
        .update_transaction(TransactionUpdate {
            kind: TxKind::Income,
            description: "Refund".into(),
            installments: 5,
            installment_number: 4,
            ..update_of(second)
        })
        .unwrap();

    assert_eq!(txs.len(), 3);
    let updated = txs.iter().find(|t| t.id == second.id).unwrap();
    assert_eq!(updated.kind, TxKind::Income);
    assert_eq!(updated.description, "Refund");
    assert_eq!(updated.installments, 1);
    assert_eq!(updated.installment_number, 1);
    assert_eq!(updated.card_id, None);
    // siblings untouched
    assert!(
        txs.iter()
            .filter(|t| t.id != second.id)
            .all(|t| t.description == "Phone" && t.card_id == Some(card_id))
    );
}

#[test]
fn update_clamps_installment_index_and_never_expands() {
    let mut store = setup();
    let txs = store
        .add_transaction(expense("Sofa", 120000, d(2024, 5, 10), 1))
        .unwrap();
    let row = &txs[0];

    let txs = store
        .update_transaction(TransactionUpdate {
            amount: Decimal::new(1234567, 3),
            installments: 3,
            installment_number: 9,
            ..update_of(row)
        })
        .unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].installments, 3);
    assert_eq!(txs[0].installment_number, 3);
    assert_eq!(txs[0].amount.to_string(), "1234.57");

    let txs = store
        .update_transaction(TransactionUpdate {
            installments: 0,
            installment_number: -2,
            ..update_of(&txs[0])
        })
        .unwrap();
    assert_eq!(txs[0].installments, 1);
    assert_eq!(txs[0].installment_number, 1);
}

#[test]
fn update_of_missing_row_is_not_found() {
    let mut store = setup();
    let txs = store
        .add_transaction(expense("Book", 2000, d(2024, 5, 10), 1))
        .unwrap();
    let err = store
        .update_transaction(TransactionUpdate {
            id: 999,
            ..update_of(&txs[0])
        })
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::NotFound {
            entity: "transaction",
            id: 999
        }
    ));
}

#[test]
fn remove_transaction_deletes_only_that_row() {
    let mut store = setup();
    let txs = store
        .add_transaction(expense("Bike", 30000, d(2024, 5, 10), 3))
        .unwrap();
    let first = txs.iter().find(|t| t.installment_number == 1).unwrap().id;

    let txs = store.remove_transaction(first).unwrap();
    assert_eq!(txs.len(), 2);
    assert!(txs.iter().all(|t| t.id != first));

    assert!(matches!(
        store.remove_transaction(first),
        Err(LedgerError::NotFound { .. })
    ));
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    {
        let mut store = LedgerStore::open(&path).unwrap();
        store.add_card(card("Visa")).unwrap();
        store
            .add_transaction(expense("Camera", 10000, d(2024, 5, 15), 3))
            .unwrap();
    }
    let store = LedgerStore::open(&path).unwrap();
    assert_eq!(store.all_cards().unwrap().len(), 1);
    let txs = store.all_transactions().unwrap();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs.iter().map(|t| t.amount).sum::<Decimal>(), Decimal::new(10000, 2));
}
