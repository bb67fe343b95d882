// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Call dispatch: channel routing, argument validation, and conversion of
// platform outcomes into call results.
//
// Every call ends in exactly one `MethodResult`. Nothing is retried and no
// error escapes as a panic.

use std::collections::HashMap;

use intentbridge_core::config::BridgeConfig;
use intentbridge_core::error::BridgeError;
use intentbridge_core::types::{ActionKind, Command, ErrorCode, MethodCall, MethodResult};
use tracing::{debug, info, warn};

use crate::intent::IntentRequest;
use crate::traits::NativeIntents;

/// A set of actions registered on one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);
    pub const INSTALLER: ActionSet = ActionSet(Self::bit(ActionKind::InstallApk));
    pub const MESSAGING: ActionSet =
        ActionSet(Self::bit(ActionKind::SendSms) | Self::bit(ActionKind::SendWhatsApp));

    const fn bit(kind: ActionKind) -> u8 {
        match kind {
            ActionKind::InstallApk => 1 << 0,
            ActionKind::SendSms => 1 << 1,
            ActionKind::SendWhatsApp => 1 << 2,
        }
    }

    pub fn with(self, kind: ActionKind) -> Self {
        ActionSet(self.0 | Self::bit(kind))
    }

    pub fn union(self, other: ActionSet) -> Self {
        ActionSet(self.0 | other.0)
    }

    pub fn contains(self, kind: ActionKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = ActionKind> {
        ActionKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<ActionKind> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        iter.into_iter().fold(ActionSet::EMPTY, ActionSet::with)
    }
}

/// The native action bridge.
///
/// Holds the platform launcher and the per-channel action registrations.
/// Immutable once built, so concurrent calls never interact.
pub struct NativeActionBridge {
    platform: Box<dyn NativeIntents>,
    channels: HashMap<String, ActionSet>,
}

impl NativeActionBridge {
    /// A bridge with no channels registered; every call is not-implemented.
    pub fn new(platform: Box<dyn NativeIntents>) -> Self {
        Self {
            platform,
            channels: HashMap::new(),
        }
    }

    pub fn from_config(platform: Box<dyn NativeIntents>, config: &BridgeConfig) -> Self {
        let mut bridge = Self::new(platform);
        for channel in &config.channels {
            bridge.register(channel.name.clone(), channel.actions.iter().copied().collect());
        }
        bridge
    }

    /// Register `actions` on `channel`, adding to any earlier registration.
    pub fn register(&mut self, channel: impl Into<String>, actions: ActionSet) -> &mut Self {
        let channel = channel.into();
        if actions.is_empty() {
            warn!(channel = %channel, "registering channel with no actions");
        }
        debug!(
            channel = %channel,
            actions = ?actions.iter().collect::<Vec<_>>(),
            "channel registered"
        );
        let entry = self.channels.entry(channel).or_default();
        *entry = entry.union(actions);
        self
    }

    /// Whether `kind` is answered on `channel`.
    pub fn handles(&self, channel: &str, kind: ActionKind) -> bool {
        self.channels
            .get(channel)
            .is_some_and(|actions| actions.contains(kind))
    }

    pub fn platform_name(&self) -> &str {
        self.platform.platform_name()
    }

    /// Handle one call arriving on `channel`.
    ///
    /// Success means the native flow was launched, not that it completed.
    pub fn handle(&self, channel: &str, call: &MethodCall) -> MethodResult {
        let Some(kind) = ActionKind::from_method(&call.method) else {
            debug!(channel, method = %call.method, "unknown method");
            return MethodResult::NotImplemented;
        };
        if !self.handles(channel, kind) {
            debug!(channel, method = %call.method, "method not registered on channel");
            return MethodResult::NotImplemented;
        }

        match Command::from_call(kind, call) {
            Ok(command) => self.execute(&command),
            Err(err) => {
                warn!(channel, method = %kind, code = %err.code(), error = %err, "rejected call arguments");
                err.into()
            }
        }
    }

    /// Decode a JSON-encoded `MethodCall` and handle it.
    ///
    /// A payload that does not decode is reported as `INVALID_PARAMS`.
    pub fn handle_json(&self, channel: &str, payload: &str) -> MethodResult {
        match serde_json::from_str::<MethodCall>(payload) {
            Ok(call) => self.handle(channel, &call),
            Err(e) => {
                warn!(channel, error = %e, "malformed call payload");
                MethodResult::error(ErrorCode::InvalidParams, format!("Malformed call: {e}"))
            }
        }
    }

    /// Launch the platform action for an already validated command.
    pub fn execute(&self, command: &Command) -> MethodResult {
        let kind = command.kind();
        let intent = IntentRequest::for_command(command);

        match self.platform.launch(&intent) {
            Ok(()) => {
                info!(method = %kind, action = intent.action, "native action launched");
                MethodResult::success(true)
            }
            Err(BridgeError::NoHandler) => {
                warn!(method = %kind, action = intent.action, "no handler for intent");
                MethodResult::error(kind.no_handler_code(), kind.no_handler_message())
            }
            Err(e) => {
                warn!(method = %kind, error = %e, "native action failed");
                MethodResult::error(kind.failure_code(), format!("{}: {e}", kind.failure_prefix()))
            }
        }
    }
}
