//! Outbound wire records and payload formatting.
//!
//! The remote listener expects a `qr-codes` event whose body is a `codes`
//! array of `{publicKey, location}` records. A decoded payload carries the
//! body of a PEM public key; embedded newlines are stripped and the body is
//! wrapped in the fixed PEM template before transmission. The payload is
//! not validated semantically, so empty or malformed text passes through
//! unchanged.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::lane::Lane;

const PUBLIC_KEY_PREFIX: &str = "-----BEGIN PUBLIC KEY-----\n";
const PUBLIC_KEY_SUFFIX: &str = "\n-----END PUBLIC KEY-----";

/// One formatted detection, paired with its lane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCode {
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub location: Lane,
}

/// Batch of envelopes for one loop iteration, sent as a single message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodesMessage {
    pub codes: Vec<QrCode>,
}

impl CodesMessage {
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn newline_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\r\n|\n|\r)").expect("static newline pattern"))
}

/// Strip embedded newline sequences from decoded text.
pub fn normalize_code(code: &str) -> String {
    newline_pattern().replace_all(code, "").into_owned()
}

/// Wrap normalized payload text in the PEM public-key template.
pub fn format_public_key(text: &str) -> String {
    format!(
        "{}{}{}",
        PUBLIC_KEY_PREFIX,
        normalize_code(text),
        PUBLIC_KEY_SUFFIX
    )
}

/// Build the envelope for one decoded payload.
pub fn envelope(text: &str, location: Lane) -> QrCode {
    QrCode {
        public_key: format_public_key(text),
        location,
    }
}
