// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// URI building for the messaging actions.
//
// The WhatsApp link format is an external contract:
// `https://wa.me/<digits>?text=<percent-encoded message>`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Base of the WhatsApp click-to-chat link.
pub const WHATSAPP_BASE: &str = "https://wa.me/";

/// Scheme used for the SMS composer intent.
pub const SMS_SCHEME: &str = "smsto:";

/// Characters left unescaped by Android's `Uri.encode`: letters, digits
/// and `_-!.~'()*`. Everything else is UTF-8 percent-encoded.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'!')
    .remove(b'.')
    .remove(b'~')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

/// Keep only the ASCII digits of a phone number.
///
/// `"+1 (555) 123-4567"` becomes `"15551234567"`.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Percent-encode a URI component the way Android's `Uri.encode` does.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Build the WhatsApp deep link for a phone number and message.
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!(
        "{WHATSAPP_BASE}{}?text={}",
        normalize_phone(phone),
        encode_component(message)
    )
}

/// Build the `smsto:` URI for the SMS composer. The phone is used verbatim.
pub fn sms_uri(phone: &str) -> String {
    format!("{SMS_SCHEME}{phone}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatting_from_phone() {
        assert_eq!(normalize_phone("+1 (555) 123-4567"), "15551234567");
        assert_eq!(normalize_phone("0044 20 7946 0958"), "00442079460958");
        assert_eq!(normalize_phone("no digits"), "");
    }

    #[test]
    fn non_ascii_digits_are_dropped() {
        // Arabic-Indic digits are not 0-9.
        assert_eq!(normalize_phone("٠١٢3"), "3");
    }

    #[test]
    fn encodes_spaces_and_punctuation() {
        assert_eq!(encode_component("Hello, world!"), "Hello%2C%20world!");
        assert_eq!(encode_component("a&b=c?d#e"), "a%26b%3Dc%3Fd%23e");
        assert_eq!(encode_component("keep_-.~'()*"), "keep_-.~'()*");
    }

    #[test]
    fn encodes_utf8_bytes_upper_hex() {
        assert_eq!(encode_component("é"), "%C3%A9");
        assert_eq!(encode_component("line\nbreak"), "line%0Abreak");
    }

    #[test]
    fn builds_whatsapp_link() {
        assert_eq!(
            whatsapp_link("+1 (555) 123-4567", "Hello, world!"),
            "https://wa.me/15551234567?text=Hello%2C%20world!"
        );
    }

    #[test]
    fn empty_message_yields_empty_text_param() {
        assert_eq!(whatsapp_link("123", ""), "https://wa.me/123?text=");
    }

    #[test]
    fn sms_uri_keeps_phone_verbatim() {
        assert_eq!(sms_uri("+1 555"), "smsto:+1 555");
    }
}
