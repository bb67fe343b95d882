// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration: which actions are registered on which channel.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::types::ActionKind;

/// Channel carrying the package installer.
pub const APK_CHANNEL: &str = "apk_install";

/// Channel carrying SMS and WhatsApp.
pub const MESSAGING_CHANNEL: &str = "com.qsyncai.mpcm/messaging";

/// One named call endpoint and the actions it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    pub actions: Vec<ActionKind>,
}

impl ChannelConfig {
    pub fn new(name: impl Into<String>, actions: &[ActionKind]) -> Self {
        Self {
            name: name.into(),
            actions: actions.to_vec(),
        }
    }
}

/// Persistent bridge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Channels and their registered actions.
    pub channels: Vec<ChannelConfig>,
    /// Appended to the application id to form the file provider authority.
    pub provider_authority_suffix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channels: vec![
                ChannelConfig::new(APK_CHANNEL, &[ActionKind::InstallApk]),
                ChannelConfig::new(
                    MESSAGING_CHANNEL,
                    &[ActionKind::SendSms, ActionKind::SendWhatsApp],
                ),
            ],
            provider_authority_suffix: ".provider".into(),
        }
    }
}

impl BridgeConfig {
    /// The messaging-free variant: only the installer channel.
    pub fn installer_only() -> Self {
        Self {
            channels: vec![ChannelConfig::new(APK_CHANNEL, &[ActionKind::InstallApk])],
            ..Self::default()
        }
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty or duplicate channel names and channels with no actions.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for channel in &self.channels {
            if channel.name.is_empty() {
                return Err(BridgeError::Config("channel name is empty".into()));
            }
            if !seen.insert(channel.name.as_str()) {
                return Err(BridgeError::Config(format!(
                    "duplicate channel `{}`",
                    channel.name
                )));
            }
            if channel.actions.is_empty() {
                return Err(BridgeError::Config(format!(
                    "channel `{}` registers no actions",
                    channel.name
                )));
            }
        }
        Ok(())
    }
}
