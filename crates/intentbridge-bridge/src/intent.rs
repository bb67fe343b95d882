// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-neutral description of an Android intent, and the mapping from
// typed commands onto it.

use std::path::PathBuf;

use intentbridge_core::link;
use intentbridge_core::types::Command;

pub const ACTION_VIEW: &str = "android.intent.action.VIEW";
pub const ACTION_SENDTO: &str = "android.intent.action.SENDTO";
pub const ACTION_INSTALL_PACKAGE: &str = "android.intent.action.INSTALL_PACKAGE";

/// Extra read by SMS apps for the prefilled body.
pub const EXTRA_SMS_BODY: &str = "sms_body";

pub const FLAG_GRANT_READ_URI_PERMISSION: i32 = 0x0000_0001;
pub const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

/// What the intent's data slot points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentData {
    /// A URI string handed to `Uri.parse`.
    Uri(String),
    /// A local file exposed to the receiver through the app's file provider.
    SharedFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRequest {
    pub action: &'static str,
    pub data: IntentData,
    /// String extras, applied with `putExtra(String, String)`.
    pub extras: Vec<(&'static str, String)>,
    pub flags: i32,
    /// Resolve the intent against the package manager before launching.
    pub require_handler: bool,
}

impl IntentRequest {
    pub fn for_command(command: &Command) -> Self {
        match command {
            Command::InstallApk(args) => Self {
                action: ACTION_INSTALL_PACKAGE,
                data: IntentData::SharedFile(args.path.clone()),
                extras: Vec::new(),
                flags: FLAG_GRANT_READ_URI_PERMISSION | FLAG_ACTIVITY_NEW_TASK,
                require_handler: false,
            },
            Command::SendSms(args) => Self {
                action: ACTION_SENDTO,
                data: IntentData::Uri(link::sms_uri(&args.phone)),
                extras: vec![(EXTRA_SMS_BODY, args.message.clone())],
                flags: 0,
                require_handler: true,
            },
            Command::SendWhatsApp(args) => Self {
                action: ACTION_VIEW,
                data: IntentData::Uri(link::whatsapp_link(&args.phone, &args.message)),
                extras: Vec::new(),
                flags: 0,
                require_handler: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intentbridge_core::types::{InstallApkArgs, MessageArgs};

    fn message(phone: &str, text: &str) -> MessageArgs {
        MessageArgs {
            phone: phone.into(),
            message: text.into(),
        }
    }

    #[test]
    fn install_intent_shares_file_with_read_grant() {
        let intent = IntentRequest::for_command(&Command::InstallApk(InstallApkArgs {
            path: PathBuf::from("/data/app.apk"),
        }));
        assert_eq!(intent.action, ACTION_INSTALL_PACKAGE);
        assert_eq!(intent.data, IntentData::SharedFile(PathBuf::from("/data/app.apk")));
        assert_eq!(intent.flags, 0x1000_0001);
        assert!(!intent.require_handler);
    }

    #[test]
    fn sms_intent_carries_body_extra() {
        let intent = IntentRequest::for_command(&Command::SendSms(message("+1 555", "hi there")));
        assert_eq!(intent.action, ACTION_SENDTO);
        assert_eq!(intent.data, IntentData::Uri("smsto:+1 555".into()));
        assert_eq!(intent.extras, vec![(EXTRA_SMS_BODY, "hi there".to_string())]);
        assert!(intent.require_handler);
    }

    #[test]
    fn whatsapp_intent_views_deep_link() {
        let intent = IntentRequest::for_command(&Command::SendWhatsApp(message(
            "+1 (555) 123-4567",
            "Hello, world!",
        )));
        assert_eq!(intent.action, ACTION_VIEW);
        assert_eq!(
            intent.data,
            IntentData::Uri("https://wa.me/15551234567?text=Hello%2C%20world!".into())
        );
        assert!(intent.extras.is_empty());
        assert!(intent.require_handler);
    }
}
