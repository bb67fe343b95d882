// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where Android intents are unavailable.

use intentbridge_core::error::{BridgeError, Result};

use crate::intent::IntentRequest;
use crate::traits::NativeIntents;

/// No-op launcher returned on non-Android platforms.
pub struct StubBridge;

impl NativeIntents for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn launch(&self, intent: &IntentRequest) -> Result<()> {
        tracing::warn!(action = intent.action, "NativeIntents::launch called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}
