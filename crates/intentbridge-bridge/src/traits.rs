// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait for launching intents.

use intentbridge_core::error::Result;

use crate::intent::IntentRequest;

/// Launches native UI flows described by an [`IntentRequest`].
///
/// `launch` returns as soon as the flow has been dispatched. Nothing waits
/// for the user: an install the user cancels, or an SMS never sent, is
/// still `Ok(())`.
pub trait NativeIntents: Send + Sync {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;

    /// Dispatch the intent.
    ///
    /// Errors:
    /// - `BridgeError::NoHandler` when `require_handler` is set and nothing
    ///   resolves the intent.
    /// - `BridgeError::Platform` with the platform's message for any fault
    ///   raised while building or starting the intent.
    fn launch(&self, intent: &IntentRequest) -> Result<()>;
}
