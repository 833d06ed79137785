// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency_label, set_currency_label};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        if let Some(label) = sub.get_one::<String>("set") {
            set_currency_label(conn, label)?;
        }
        println!("Currency label: {}", get_currency_label(conn)?);
    }
    Ok(())
}
