// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line-oriented call loop.

use std::io::{BufRead, Write};

use intentbridge_bridge::NativeActionBridge;
use intentbridge_core::error::Result;
use intentbridge_core::types::{ErrorCode, MethodCall, MethodResult};
use serde::Deserialize;

/// One input line: the channel plus the call itself.
#[derive(Debug, Deserialize)]
struct Envelope {
    channel: String,
    #[serde(flatten)]
    call: MethodCall,
}

/// Serve calls until `input` is exhausted. Returns the number of calls handled.
///
/// Lines are read as raw bytes. Blank lines are skipped. A line that is not
/// a valid envelope (including one that is not UTF-8) produces an
/// `INVALID_PARAMS` result and the loop carries on; only read and write
/// failures end it.
pub fn serve(
    bridge: &NativeActionBridge,
    mut input: impl BufRead,
    output: &mut impl Write,
) -> Result<usize> {
    let mut served = 0;
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }

        let result = handle_line(bridge, trimmed);
        serde_json::to_writer(&mut *output, &result)?;
        writeln!(output)?;
        output.flush()?;
        served += 1;
    }
    Ok(served)
}

fn handle_line(bridge: &NativeActionBridge, line: &[u8]) -> MethodResult {
    match serde_json::from_slice::<Envelope>(line) {
        Ok(envelope) => {
            tracing::debug!(channel = %envelope.channel, method = %envelope.call.method, "call received");
            bridge.handle(&envelope.channel, &envelope.call)
        }
        Err(e) => {
            tracing::warn!(error = %e, "malformed envelope");
            MethodResult::error(ErrorCode::InvalidParams, format!("Malformed call: {e}"))
        }
    }
}
