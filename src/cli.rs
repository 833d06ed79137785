// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

pub fn build_cli() -> Command {
    Command::new("cardbook")
        .version(crate_version!())
        .about("Income/expense ledger with credit-card installments and monthly savings")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("SQLite database file (overrides CARDBOOK_DB)"),
        )
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(card_cmd())
        .subcommand(tx_cmd())
        .subcommand(output_flags(
            Command::new("savings")
                .about("Monthly income, expense and savings")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .help("Only the most recent N months"),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Export ledger data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Export all transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored rows against ledger invariants"))
        .subcommand(
            Command::new("settings")
                .about("Display settings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("currency")
                        .about("Show or set the currency label used in tables")
                        .arg(Arg::new("set").long("set").value_name("LABEL")),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Answer JSON requests on stdin, one per line, with JSON on stdout"),
        )
}

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl"),
    )
    .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue))
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn card_cmd() -> Command {
    Command::new("card")
        .about("Manage credit cards")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("limit").long("limit").required(true))
                .arg(
                    Arg::new("closing_day")
                        .long("closing-day")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("due_day")
                        .long("due-day")
                        .value_parser(value_parser!(u32)),
                )
                .arg(Arg::new("brand").long("brand")),
        )
        .subcommand(output_flags(Command::new("list")))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn tx_fields(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .required(true)
            .help("income|expense"),
    )
    .arg(Arg::new("description").long("description").required(true))
    .arg(Arg::new("category").long("category").required(true))
    .arg(Arg::new("amount").long("amount").required(true))
    .arg(
        Arg::new("date")
            .long("date")
            .required(true)
            .help("YYYY-MM-DD"),
    )
    .arg(
        Arg::new("card_id")
            .long("card-id")
            .value_parser(value_parser!(i64)),
    )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and edit transactions")
        .subcommand_required(true)
        .subcommand(
            tx_fields(Command::new("add").about("Record income or an expense")).arg(
                Arg::new("installments")
                    .long("installments")
                    .value_parser(value_parser!(i64))
                    .allow_negative_numbers(true)
                    .help("Split an expense into monthly parts"),
            ),
        )
        .subcommand(
            tx_fields(Command::new("update").about("Rewrite a single stored row"))
                .arg(id_arg())
                .arg(
                    Arg::new("installments")
                        .long("installments")
                        .value_parser(value_parser!(i64))
                        .allow_negative_numbers(true)
                        .help("Defaults to the stored count"),
                )
                .arg(
                    Arg::new("installment_number")
                        .long("installment-number")
                        .value_parser(value_parser!(i64))
                        .allow_negative_numbers(true)
                        .help("Defaults to the stored part number"),
                )
                .arg(
                    Arg::new("no_card")
                        .long("no-card")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("card_id")
                        .help("Detach the row from its card"),
                ),
        )
        .subcommand(Command::new("rm").about("Delete a single row").arg(id_arg()))
        .subcommand(output_flags(
            Command::new("list")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
}
