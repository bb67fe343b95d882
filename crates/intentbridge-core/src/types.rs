// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Call/result model and the typed commands the bridge executes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The native actions the bridge can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "installApk")]
    InstallApk,
    #[serde(rename = "sendSMS")]
    SendSms,
    #[serde(rename = "sendWhatsApp")]
    SendWhatsApp,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [
        ActionKind::InstallApk,
        ActionKind::SendSms,
        ActionKind::SendWhatsApp,
    ];

    /// Method name used on the call boundary.
    pub fn method_name(self) -> &'static str {
        match self {
            ActionKind::InstallApk => "installApk",
            ActionKind::SendSms => "sendSMS",
            ActionKind::SendWhatsApp => "sendWhatsApp",
        }
    }

    /// Look up an action by its method name. Matching is exact.
    pub fn from_method(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.method_name() == name)
    }

    /// Code reported when no installed application can handle the action.
    pub fn no_handler_code(self) -> ErrorCode {
        match self {
            ActionKind::InstallApk => ErrorCode::InstallError,
            ActionKind::SendSms => ErrorCode::NoSmsApp,
            ActionKind::SendWhatsApp => ErrorCode::NoWhatsApp,
        }
    }

    pub fn no_handler_message(self) -> &'static str {
        match self {
            ActionKind::InstallApk => "No package installer found",
            ActionKind::SendSms => "No SMS app found",
            ActionKind::SendWhatsApp => "WhatsApp not installed",
        }
    }

    /// Code reported for any other platform fault.
    pub fn failure_code(self) -> ErrorCode {
        match self {
            ActionKind::InstallApk => ErrorCode::InstallError,
            ActionKind::SendSms => ErrorCode::SmsError,
            ActionKind::SendWhatsApp => ErrorCode::WhatsAppError,
        }
    }

    /// Prefix placed in front of the platform message on generic faults.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            ActionKind::InstallApk => "Failed to launch installer",
            ActionKind::SendSms => "Failed to send SMS",
            ActionKind::SendWhatsApp => "Failed to send WhatsApp",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// Failure codes returned across the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "PATH_ERROR")]
    PathError,
    #[serde(rename = "INVALID_PARAMS")]
    InvalidParams,
    #[serde(rename = "NO_SMS_APP")]
    NoSmsApp,
    #[serde(rename = "SMS_ERROR")]
    SmsError,
    #[serde(rename = "NO_WHATSAPP")]
    NoWhatsApp,
    #[serde(rename = "WHATSAPP_ERROR")]
    WhatsAppError,
    #[serde(rename = "INSTALL_ERROR")]
    InstallError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::PathError => "PATH_ERROR",
            ErrorCode::InvalidParams => "INVALID_PARAMS",
            ErrorCode::NoSmsApp => "NO_SMS_APP",
            ErrorCode::SmsError => "SMS_ERROR",
            ErrorCode::NoWhatsApp => "NO_WHATSAPP",
            ErrorCode::WhatsAppError => "WHATSAPP_ERROR",
            ErrorCode::InstallError => "INSTALL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Call boundary
// ---------------------------------------------------------------------------

/// A named call arriving from the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    /// String arguments. Entries that are `null` or not strings are dropped
    /// and read as absent; `"arguments": null` decodes as an empty map.
    #[serde(default, deserialize_with = "string_arguments")]
    pub arguments: BTreeMap<String, String>,
}

fn string_arguments<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            _ => None,
        })
        .collect())
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: BTreeMap::new(),
        }
    }

    /// Builder-style argument insertion.
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }
}

/// Outcome of a single call. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResult {
    Success {
        value: Value,
    },
    Error {
        code: String,
        message: String,
    },
    /// The method is not known on the channel it arrived on.
    NotImplemented,
}

impl MethodResult {
    pub fn success(value: impl Into<Value>) -> Self {
        MethodResult::Success {
            value: value.into(),
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        MethodResult::Error {
            code: code.as_str().to_string(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResult::Success { .. })
    }

    /// The failure code, if this is an error result.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            MethodResult::Error { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Typed commands
// ---------------------------------------------------------------------------

/// Arguments for `installApk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallApkArgs {
    pub path: PathBuf,
}

/// Arguments shared by `sendSMS` and `sendWhatsApp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageArgs {
    pub phone: String,
    pub message: String,
}

/// A validated call, ready to be turned into a platform action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    InstallApk(InstallApkArgs),
    SendSms(MessageArgs),
    SendWhatsApp(MessageArgs),
}

/// Input validation failures. None of these reach the platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("APK path is null")]
    MissingPath,

    #[error("APK path is empty")]
    EmptyPath,

    #[error("APK file not found: {}", .0.display())]
    ApkNotFound(PathBuf),

    #[error("Phone or message is null")]
    MissingPhoneOrMessage,
}

impl ArgumentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ArgumentError::MissingPath
            | ArgumentError::EmptyPath
            | ArgumentError::ApkNotFound(_) => ErrorCode::PathError,
            ArgumentError::MissingPhoneOrMessage => ErrorCode::InvalidParams,
        }
    }
}

impl From<ArgumentError> for MethodResult {
    fn from(err: ArgumentError) -> Self {
        MethodResult::error(err.code(), err.to_string())
    }
}

impl Command {
    pub fn kind(&self) -> ActionKind {
        match self {
            Command::InstallApk(_) => ActionKind::InstallApk,
            Command::SendSms(_) => ActionKind::SendSms,
            Command::SendWhatsApp(_) => ActionKind::SendWhatsApp,
        }
    }

    /// Validate the arguments of `call` for the given action.
    ///
    /// For `installApk` the path must name an existing regular file; the
    /// check happens here so a bad path is never handed to the platform.
    pub fn from_call(kind: ActionKind, call: &MethodCall) -> Result<Self, ArgumentError> {
        match kind {
            ActionKind::InstallApk => {
                let path = call.argument("path").ok_or(ArgumentError::MissingPath)?;
                if path.is_empty() {
                    return Err(ArgumentError::EmptyPath);
                }
                let path = PathBuf::from(path);
                if !path.is_file() {
                    return Err(ArgumentError::ApkNotFound(path));
                }
                Ok(Command::InstallApk(InstallApkArgs { path }))
            }
            ActionKind::SendSms => message_args(call).map(Command::SendSms),
            ActionKind::SendWhatsApp => message_args(call).map(Command::SendWhatsApp),
        }
    }
}

fn message_args(call: &MethodCall) -> Result<MessageArgs, ArgumentError> {
    match (call.argument("phone"), call.argument("message")) {
        (Some(phone), Some(message)) => Ok(MessageArgs {
            phone: phone.to_string(),
            message: message.to_string(),
        }),
        _ => Err(ArgumentError::MissingPhoneOrMessage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_round_trip() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_method(kind.method_name()), Some(kind));
        }
        assert_eq!(ActionKind::from_method("sendFax"), None);
        assert_eq!(ActionKind::from_method("sendsms"), None);
    }

    #[test]
    fn missing_message_args_are_invalid_params() {
        let cases = [
            MethodCall::new("sendSMS"),
            MethodCall::new("sendSMS").with_arg("phone", "123"),
            MethodCall::new("sendSMS").with_arg("message", "hi"),
        ];
        for call in &cases {
            for kind in [ActionKind::SendSms, ActionKind::SendWhatsApp] {
                let err = Command::from_call(kind, call).unwrap_err();
                assert_eq!(err.code(), ErrorCode::InvalidParams);
                assert_eq!(err.to_string(), "Phone or message is null");
            }
        }
    }

    #[test]
    fn empty_message_args_are_accepted() {
        let call = MethodCall::new("sendSMS")
            .with_arg("phone", "")
            .with_arg("message", "");
        let cmd = Command::from_call(ActionKind::SendSms, &call).expect("valid");
        assert_eq!(cmd.kind(), ActionKind::SendSms);
    }

    #[test]
    fn install_path_validation() {
        let missing = Command::from_call(ActionKind::InstallApk, &MethodCall::new("installApk"));
        assert_eq!(missing.unwrap_err(), ArgumentError::MissingPath);

        let empty = MethodCall::new("installApk").with_arg("path", "");
        let err = Command::from_call(ActionKind::InstallApk, &empty).unwrap_err();
        assert_eq!(err, ArgumentError::EmptyPath);
        assert_eq!(err.code(), ErrorCode::PathError);

        let absent = MethodCall::new("installApk").with_arg("path", "/nonexistent/app.apk");
        let err = Command::from_call(ActionKind::InstallApk, &absent).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PathError);
    }

    #[test]
    fn install_accepts_existing_file() {
        let file = tempfile::Builder::new()
            .suffix(".apk")
            .tempfile()
            .expect("temp apk");
        let path = file.path().to_string_lossy().into_owned();
        let call = MethodCall::new("installApk").with_arg("path", path.clone());

        match Command::from_call(ActionKind::InstallApk, &call).expect("valid") {
            Command::InstallApk(args) => assert_eq!(args.path, PathBuf::from(path)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn install_rejects_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let call = MethodCall::new("installApk").with_arg("path", dir.path().to_string_lossy());
        let err = Command::from_call(ActionKind::InstallApk, &call).unwrap_err();
        assert!(matches!(err, ArgumentError::ApkNotFound(_)));
    }

    #[test]
    fn result_serializes_with_status_tag() {
        let ok = serde_json::to_value(MethodResult::success(true)).expect("serialize");
        assert_eq!(ok, serde_json::json!({"status": "success", "value": true}));

        let err = serde_json::to_value(MethodResult::error(ErrorCode::NoWhatsApp, "WhatsApp not installed"))
            .expect("serialize");
        assert_eq!(
            err,
            serde_json::json!({"status": "error", "code": "NO_WHATSAPP", "message": "WhatsApp not installed"})
        );

        let ni = serde_json::to_value(MethodResult::NotImplemented).expect("serialize");
        assert_eq!(ni, serde_json::json!({"status": "not_implemented"}));
    }

    #[test]
    fn call_deserializes_without_arguments() {
        let call: MethodCall = serde_json::from_str(r#"{"method":"sendFax"}"#).expect("parse");
        assert_eq!(call.method, "sendFax");
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn null_arguments_read_as_absent() {
        let call: MethodCall =
            serde_json::from_str(r#"{"method":"installApk","arguments":{"path":null}}"#)
                .expect("parse");
        assert_eq!(call.argument("path"), None);
        assert_eq!(
            Command::from_call(ActionKind::InstallApk, &call).unwrap_err(),
            ArgumentError::MissingPath
        );

        let call: MethodCall = serde_json::from_str(
            r#"{"method":"sendSMS","arguments":{"phone":null,"message":"hi"}}"#,
        )
        .expect("parse");
        let err = Command::from_call(ActionKind::SendSms, &call).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidParams);
    }

    #[test]
    fn null_argument_map_is_empty() {
        let call: MethodCall =
            serde_json::from_str(r#"{"method":"sendFax","arguments":null}"#).expect("parse");
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn non_string_arguments_are_dropped() {
        let call: MethodCall = serde_json::from_str(
            r#"{"method":"sendSMS","arguments":{"phone":5551234,"message":"hi","flag":true}}"#,
        )
        .expect("parse");
        assert_eq!(call.argument("phone"), None);
        assert_eq!(call.argument("message"), Some("hi"));
        assert_eq!(call.arguments.len(), 1);
    }

    #[test]
    fn error_code_strings_match_serde() {
        let codes = [
            ErrorCode::PathError,
            ErrorCode::InvalidParams,
            ErrorCode::NoSmsApp,
            ErrorCode::SmsError,
            ErrorCode::NoWhatsApp,
            ErrorCode::WhatsAppError,
            ErrorCode::InstallError,
        ];
        for code in codes {
            let json = serde_json::to_value(code).expect("serialize");
            assert_eq!(json, Value::String(code.as_str().to_string()));
        }
    }
}
