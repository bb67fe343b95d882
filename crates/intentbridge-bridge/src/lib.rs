// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Intentbridge: native action bridge.
//!
//! Named calls from the UI layer are validated into typed commands, turned
//! into platform-neutral intent requests, and launched through a
//! [`traits::NativeIntents`] implementation. On Android that is the JNI
//! bridge in [`android`]; everywhere else a stub that reports the platform
//! as unavailable.

pub mod dispatch;
pub mod intent;
pub mod slot;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

use intentbridge_core::BridgeConfig;

pub use dispatch::{ActionSet, NativeActionBridge};

/// Returns the intent launcher for the target operating system.
#[cfg_attr(not(target_os = "android"), allow(unused_variables))]
pub fn platform_bridge(config: &BridgeConfig) -> Box<dyn traits::NativeIntents> {
    #[cfg(target_os = "android")]
    {
        // Android: Uses `jni-rs` to invoke methods on the JVM/ART.
        Box::new(android::AndroidBridge::new(&config.provider_authority_suffix))
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: every launch reports the platform as unavailable.
        Box::new(stub::StubBridge)
    }
}

/// Build a dispatcher wired to the platform launcher and the configured channels.
pub fn native_bridge(config: &BridgeConfig) -> NativeActionBridge {
    NativeActionBridge::from_config(platform_bridge(config), config)
}
