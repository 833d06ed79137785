// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use cardbook::{LedgerStore, cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let explicit = matches.get_one::<String>("db").map(PathBuf::from);
    let path = db::db_path(explicit.as_deref())?;
    db::prepare_path(&path)?;
    let mut store = LedgerStore::open(&path)
        .with_context(|| format!("Open ledger at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "ledger opened");

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("card", sub)) => commands::cards::handle(&mut store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("savings", sub)) => commands::savings::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(store.connection())?,
        Some(("settings", sub)) => commands::settings::handle(store.connection(), sub)?,
        Some(("serve", _)) => commands::serve::handle(&mut store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
