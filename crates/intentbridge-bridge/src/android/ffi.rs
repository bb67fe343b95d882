// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JNI entry points for hosts that forward method-channel calls into Rust.
//
// Kotlin side (class `com.qsyncai.mpcm.IntentBridge`):
//
//     external fun init(activity: Activity, configJson: String?): Boolean
//     external fun handleCall(channel: String, callJson: String): String
//
// `handleCall` returns a JSON-encoded `MethodResult` and never throws.

use std::sync::{Mutex, OnceLock, PoisonError};

use jni::JNIEnv;
use jni::objects::{JClass, JObject, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jstring};

use intentbridge_core::config::BridgeConfig;
use intentbridge_core::error::{BridgeError, Result};
use intentbridge_core::types::{ErrorCode, MethodResult};

use super::{AndroidBridge, set_host_activity};
use crate::dispatch::NativeActionBridge;

static BRIDGE: OnceLock<NativeActionBridge> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Register the hosting Activity and build the bridge.
///
/// A null `config_json` selects the default two-channel configuration.
/// The host calls this again whenever it recreates its Activity: each call
/// replaces the registered Activity, while the bridge and its configuration
/// from the first successful call are kept.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_qsyncai_mpcm_IntentBridge_init<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    activity: JObject<'local>,
    config_json: JString<'local>,
) -> jboolean {
    match init(&mut env, &activity, &config_json) {
        Ok(()) => JNI_TRUE,
        Err(e) => {
            tracing::error!(error = %e, "intent bridge init failed");
            JNI_FALSE
        }
    }
}

fn init(env: &mut JNIEnv<'_>, activity: &JObject<'_>, config_json: &JString<'_>) -> Result<()> {
    if activity.is_null() {
        return Err(BridgeError::Bridge("init called with a null activity".into()));
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if BRIDGE.get().is_some() {
        set_host_activity(env, activity)?;
        tracing::debug!("intent bridge already initialised, configuration kept");
        return Ok(());
    }

    let config = if config_json.is_null() {
        BridgeConfig::default()
    } else {
        let raw: String = env
            .get_string(config_json)
            .map_err(|e| BridgeError::Bridge(format!("get_string(config): {e}")))?
            .into();
        let config: BridgeConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        config
    };

    set_host_activity(env, activity)?;

    let platform = Box::new(AndroidBridge::new(&config.provider_authority_suffix));
    let _ = BRIDGE.set(NativeActionBridge::from_config(platform, &config));

    tracing::info!(channels = config.channels.len(), "intent bridge initialised");
    Ok(())
}

/// Handle one JSON-encoded call and return the JSON-encoded result.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_qsyncai_mpcm_IntentBridge_handleCall<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    channel: JString<'local>,
    call_json: JString<'local>,
) -> jstring {
    let result = handle_call(&mut env, &channel, &call_json);
    let encoded = serde_json::to_string(&result).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to encode call result");
        r#"{"status":"error","code":"INVALID_PARAMS","message":"result encoding failed"}"#.into()
    });

    match env.new_string(encoded) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            tracing::error!(error = %e, "failed to return call result");
            std::ptr::null_mut()
        }
    }
}

fn handle_call(env: &mut JNIEnv<'_>, channel: &JString<'_>, call_json: &JString<'_>) -> MethodResult {
    let Some(bridge) = BRIDGE.get() else {
        tracing::warn!("handleCall before init");
        return MethodResult::NotImplemented;
    };

    let channel: String = match env.get_string(channel) {
        Ok(s) => s.into(),
        Err(e) => {
            return MethodResult::error(ErrorCode::InvalidParams, format!("Unreadable channel: {e}"));
        }
    };
    let payload: String = match env.get_string(call_json) {
        Ok(s) => s.into(),
        Err(e) => {
            return MethodResult::error(ErrorCode::InvalidParams, format!("Unreadable call: {e}"));
        }
    };

    bridge.handle_json(&channel, &payload)
}
