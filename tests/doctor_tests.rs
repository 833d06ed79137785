// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cardbook::LedgerStore;
use cardbook::commands::doctor::find_issues;
use cardbook::models::{NewTransaction, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[test]
fn clean_ledger_has_no_issues() {
    let mut store = LedgerStore::open_in_memory().unwrap();
    store
        .add_transaction(NewTransaction {
            kind: TxKind::Expense,
            description: "Rent".into(),
            category: "Home".into(),
            amount: Decimal::new(100000, 2),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            installments: Some(3),
            card_id: None,
        })
        .unwrap();
    assert!(find_issues(store.connection()).unwrap().is_empty());
}

#[test]
fn hand_edited_rows_are_flagged() {
    let store = LedgerStore::open_in_memory().unwrap();
    let conn = store.connection();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(type, description, category, amount, transaction_date, installments, installment_number, created_at)
            VALUES ('income', 'Salary', 'Work', '1000.00', '2024-01-05', 2, 1, '2024-01-05 00:00:00+00:00');
        INSERT INTO transactions(type, description, category, amount, transaction_date, installments, installment_number, created_at)
            VALUES ('expense', 'Gum', 'Snacks', '0.001', '2024-01-06', 3, 5, '2024-01-06 00:00:00+00:00');
        INSERT INTO transactions(type, description, category, amount, transaction_date, installments, installment_number, created_at)
            VALUES ('expense', 'Refund?', 'Misc', '-3.00', '2024-01-07', 1, 1, '2024-01-07 00:00:00+00:00');
        "#,
    )
    .unwrap();

    let issues = find_issues(conn).unwrap();
    let kinds: Vec<&str> = issues.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(
        kinds,
        vec![
            "income_split_or_card",
            "installment_out_of_range",
            "sub_cent_amount",
            "non_positive_amount"
        ]
    );
    assert_eq!(issues[1][1], "transaction 2 part 5/3");
}
