// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android intent launcher via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. The hosting Activity comes from `ffi::init`,
// which may be called again whenever the host recreates its Activity. Hosts
// built on NativeActivity glue that already publish the Activity through
// `ndk_context` need not call `init` for launching to work.
//
// ## Architecture notes
//
// Every launch is synchronous: the `Intent` is built, optionally resolved
// against the `PackageManager`, and handed to `Activity.startActivity`.
// Nothing waits for the launched flow to finish.
//
// Any Java exception raised along the way is cleared and its message is
// returned as `BridgeError::Platform`, so no exception is left pending
// when control returns to the JVM.
//
// On Android 11+ `resolveActivity` only sees packages declared in the
// manifest's `<queries>` element; the host manifest must list the SMS and
// VIEW intents it expects to resolve.

#![cfg(target_os = "android")]

pub mod ffi;

use std::path::Path;

use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use intentbridge_core::error::{BridgeError, Result};

use crate::intent::{IntentData, IntentRequest};
use crate::slot::HandleSlot;
use crate::traits::NativeIntents;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// The Activity registered through `ffi::init`.
struct HostActivity {
    vm: JavaVM,
    activity: GlobalRef,
}

static HOST_ACTIVITY: HandleSlot<HostActivity> = HandleSlot::new();

/// Register `activity` as the launch target, replacing any earlier one.
///
/// The previous global reference is released once no launch still holds it.
pub(crate) fn set_host_activity(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<()> {
    let vm = env
        .get_java_vm()
        .map_err(|e| BridgeError::Bridge(format!("get_java_vm: {e}")))?;
    let activity = env
        .new_global_ref(activity)
        .map_err(|e| BridgeError::Bridge(format!("new_global_ref(activity): {e}")))?;

    if HOST_ACTIVITY.replace(HostActivity { vm, activity }).is_some() {
        tracing::info!("Android: host activity replaced");
    }
    Ok(())
}

/// Run `f` with an attached [`JNIEnv`] and the hosting Activity.
///
/// Prefers the Activity registered through `ffi::init`; otherwise falls back
/// to the `JavaVM*` and Activity `jobject` published through `ndk_context`.
/// The current thread is attached if it is not already; a thread that was
/// already attached (the usual case from a JNI entry point) stays attached.
fn with_activity<R>(f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<R>) -> Result<R> {
    if let Some(host) = HOST_ACTIVITY.current() {
        let mut env = host
            .vm
            .attach_current_thread()
            .map_err(|e| BridgeError::Bridge(format!("failed to attach JNI thread: {e}")))?;
        return f(&mut env, host.activity.as_obj());
    }

    // `android_context` panics when nothing has been published.
    let ctx = std::panic::catch_unwind(ndk_context::android_context).map_err(|_| {
        BridgeError::Bridge("Android context not published, bridge not initialised".into())
    })?;
    if ctx.context().is_null() {
        return Err(BridgeError::Bridge(
            "Android context is null, bridge not initialised".into(),
        ));
    }
    // SAFETY: `ctx.vm()` returns the `JavaVM*` published by the host.
    // The pointer is valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| BridgeError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| BridgeError::Bridge(format!("failed to attach JNI thread: {e}")))?;
    // SAFETY: the published context is a global reference to the hosting
    // Activity owned by the glue code for the life of the process.
    let activity = unsafe { JObject::from_raw(ctx.context().cast()) };
    f(&mut env, &activity)
}

/// Map a `jni::errors::Error` into a `BridgeError`.
///
/// A pending Java exception is cleared and its message becomes
/// `BridgeError::Platform`; anything else is a JNI plumbing failure.
fn jni_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> BridgeError {
    if matches!(e, jni::errors::Error::JavaException) {
        let message = take_exception_message(env)
            .unwrap_or_else(|| format!("{context}: Java exception"));
        return BridgeError::Platform(message);
    }
    BridgeError::Bridge(format!("{context}: {e}"))
}

/// Clear the pending exception and return `getMessage()`, falling back to
/// `toString()` when the message is null.
fn take_exception_message(env: &mut JNIEnv<'_>) -> Option<String> {
    let throwable = env.exception_occurred().ok()?;
    env.exception_clear().ok()?;
    if throwable.is_null() {
        return None;
    }

    let message = env
        .call_method(&throwable, "getMessage", "()Ljava/lang/String;", &[])
        .ok()?
        .l()
        .ok()?;
    let message = if message.is_null() {
        env.call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?
    } else {
        message
    };
    if message.is_null() {
        return None;
    }

    env.get_string(&JString::from(message)).ok().map(Into::into)
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of [`NativeIntents`].
///
/// All state lives on the Java side except the file provider authority
/// suffix, which is appended to the package name when sharing files.
pub struct AndroidBridge {
    authority_suffix: String,
}

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI. The first JNI call happens lazily on
    /// the first launch.
    pub fn new(authority_suffix: &str) -> Self {
        Self {
            authority_suffix: authority_suffix.to_string(),
        }
    }
}

impl NativeIntents for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn launch(&self, request: &IntentRequest) -> Result<()> {
        with_activity(|env, activity| {
            tracing::info!(action = request.action, "Android: building intent");

            let intent = new_intent(env, request.action)?;

            // -- Data -----------------------------------------------------------
            let uri = match &request.data {
                IntentData::Uri(uri) => parse_uri(env, uri)?,
                IntentData::SharedFile(path) => {
                    shared_file_uri(env, activity, path, &self.authority_suffix)?
                }
            };
            env.call_method(
                &intent,
                "setData",
                "(Landroid/net/Uri;)Landroid/content/Intent;",
                &[JValue::Object(&uri)],
            )
            .map_err(|e| jni_err(env, "setData", e))?;

            // -- Extras and flags -----------------------------------------------
            for (key, value) in &request.extras {
                let j_key: JString = env
                    .new_string(key)
                    .map_err(|e| jni_err(env, "new_string(extra key)", e))?;
                let j_value: JString = env
                    .new_string(value)
                    .map_err(|e| jni_err(env, "new_string(extra value)", e))?;
                env.call_method(
                    &intent,
                    "putExtra",
                    "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
                    &[JValue::Object(&j_key), JValue::Object(&j_value)],
                )
                .map_err(|e| jni_err(env, "putExtra", e))?;
            }

            if request.flags != 0 {
                env.call_method(
                    &intent,
                    "addFlags",
                    "(I)Landroid/content/Intent;",
                    &[JValue::Int(request.flags)],
                )
                .map_err(|e| jni_err(env, "addFlags", e))?;
            }

            // -- Resolve --------------------------------------------------------
            if request.require_handler && !has_handler(env, activity, &intent)? {
                tracing::warn!(action = request.action, "Android: no activity resolves intent");
                return Err(BridgeError::NoHandler);
            }

            // -- Launch ---------------------------------------------------------
            env.call_method(
                activity,
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&intent)],
            )
            .map_err(|e| jni_err(env, "startActivity", e))?;

            tracing::info!(action = request.action, "Android: intent dispatched");
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// `new Intent(action)`.
fn new_intent<'local>(env: &mut JNIEnv<'local>, action: &str) -> Result<JObject<'local>> {
    let j_action: JString = env
        .new_string(action)
        .map_err(|e| jni_err(env, "new_string(action)", e))?;

    env.new_object(
        "android/content/Intent",
        "(Ljava/lang/String;)V",
        &[JValue::Object(&j_action)],
    )
    .map_err(|e| jni_err(env, "new Intent", e))
}

/// `Uri.parse(uri)`.
fn parse_uri<'local>(env: &mut JNIEnv<'local>, uri: &str) -> Result<JObject<'local>> {
    let j_uri: JString = env
        .new_string(uri)
        .map_err(|e| jni_err(env, "new_string(uri)", e))?;

    env.call_static_method(
        "android/net/Uri",
        "parse",
        "(Ljava/lang/String;)Landroid/net/Uri;",
        &[JValue::Object(&j_uri)],
    )
    .map_err(|e| jni_err(env, "Uri.parse", e))?
    .l()
    .map_err(|e| jni_err(env, "Uri.parse->l", e))
}

/// Build a `content://` URI for `path` through `FileProvider`.
///
/// `getUriForFile` throws `IllegalArgumentException` when the file lies
/// outside the provider's configured paths; that surfaces as
/// `BridgeError::Platform`.
fn shared_file_uri<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
    path: &Path,
    authority_suffix: &str,
) -> Result<JObject<'local>> {
    let path = path
        .to_str()
        .ok_or_else(|| BridgeError::Bridge(format!("path is not UTF-8: {}", path.display())))?;

    let j_path: JString = env
        .new_string(path)
        .map_err(|e| jni_err(env, "new_string(path)", e))?;

    let file_obj: JObject = env
        .new_object(
            "java/io/File",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&j_path)],
        )
        .map_err(|e| jni_err(env, "new File(path)", e))?;

    let authority = get_authority(env, activity, authority_suffix)?;
    let j_authority: JString = env
        .new_string(&authority)
        .map_err(|e| jni_err(env, "new_string(authority)", e))?;

    env.call_static_method(
        "androidx/core/content/FileProvider",
        "getUriForFile",
        "(Landroid/content/Context;Ljava/lang/String;Ljava/io/File;)Landroid/net/Uri;",
        &[
            JValue::Object(activity),
            JValue::Object(&j_authority),
            JValue::Object(&file_obj),
        ],
    )
    .map_err(|e| jni_err(env, "FileProvider.getUriForFile", e))?
    .l()
    .map_err(|e| jni_err(env, "getUriForFile->l", e))
}

/// `intent.resolveActivity(activity.getPackageManager()) != null`.
fn has_handler(env: &mut JNIEnv<'_>, activity: &JObject<'_>, intent: &JObject<'_>) -> Result<bool> {
    let package_manager: JObject = env
        .call_method(
            activity,
            "getPackageManager",
            "()Landroid/content/pm/PackageManager;",
            &[],
        )
        .map_err(|e| jni_err(env, "getPackageManager", e))?
        .l()
        .map_err(|e| jni_err(env, "getPackageManager->l", e))?;

    let component: JObject = env
        .call_method(
            intent,
            "resolveActivity",
            "(Landroid/content/pm/PackageManager;)Landroid/content/ComponentName;",
            &[JValue::Object(&package_manager)],
        )
        .map_err(|e| jni_err(env, "resolveActivity", e))?
        .l()
        .map_err(|e| jni_err(env, "resolveActivity->l", e))?;

    Ok(!component.is_null())
}

/// Build the FileProvider authority string for this application.
///
/// Convention: `<applicationId><suffix>`, with the package name read from
/// the Activity's `getPackageName()`.
fn get_authority(env: &mut JNIEnv<'_>, activity: &JObject<'_>, suffix: &str) -> Result<String> {
    let j_pkg: JObject = env
        .call_method(activity, "getPackageName", "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err(env, "getPackageName", e))?
        .l()
        .map_err(|e| jni_err(env, "getPackageName->l", e))?;

    let pkg: String = env
        .get_string(&JString::from(j_pkg))
        .map_err(|e| jni_err(env, "get_string(packageName)", e))?
        .into();

    Ok(format!("{pkg}{suffix}"))
}
