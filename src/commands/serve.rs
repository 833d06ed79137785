// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{Envelope, handle_line};
use crate::store::LedgerStore;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Answer one JSON request per input line with one JSON envelope per output
/// line until EOF. Request failures are reported in-band; only I/O on the
/// streams themselves ends the loop with an error.
pub fn run<R: BufRead, W: Write>(
    store: &mut LedgerStore,
    mut input: R,
    mut output: W,
) -> Result<()> {
    let mut served = 0usize;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read request")?;
        if read == 0 {
            break;
        }
        let envelope = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_line(store, line.trim_end_matches(['\r', '\n'])),
            Err(e) => Envelope::failure("request", format!("request is not UTF-8: {}", e)),
        };
        if !envelope.ok {
            tracing::warn!(error = ?envelope.error, "request failed");
        }
        serde_json::to_writer(&mut output, &envelope)?;
        output.write_all(b"\n")?;
        output.flush().context("Failed to write response")?;
        served += 1;
    }
    tracing::info!(served, "input closed");
    Ok(())
}

pub fn handle(store: &mut LedgerStore) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(store, stdin.lock(), stdout.lock())
}
