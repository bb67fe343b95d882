// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Intentbridge: native action bridge host.
//
// Entry point. Initialises logging and configuration, then serves calls
// read from stdin, one JSON envelope per line, writing one JSON result per
// line to stdout.

mod host;

use std::path::PathBuf;
use std::process::ExitCode;

use intentbridge_core::BridgeConfig;
use intentbridge_core::error::Result;

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "INTENTBRIDGE_CONFIG";

fn main() -> ExitCode {
    // stdout carries results; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let bridge = intentbridge_bridge::native_bridge(&config);
    tracing::info!(
        platform = bridge.platform_name(),
        channels = config.channels.len(),
        "Intentbridge starting"
    );

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    match host::serve(&bridge, stdin, &mut stdout) {
        Ok(served) => {
            tracing::info!(calls = served, "input closed, shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "host I/O failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<BridgeConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "loading configuration");
            BridgeConfig::load(&path)
        }
        None => Ok(BridgeConfig::default()),
    }
}
