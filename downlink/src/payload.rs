use crate::errors::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// A downlink frame in both its display (hex) and wire (bytes) forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    hex: String,
    bytes: Vec<u8>,
}

impl Payload {
    /// Payload made of the UTF-8 bytes of `text`.
    pub fn from_text(text: &str) -> Self {
        let bytes = text.as_bytes().to_vec();
        Self {
            hex: hex::encode(&bytes),
            bytes,
        }
    }

    /// Parses a hex string. Spaces and `0x` markers are ignored; what is left
    /// must be an even number of hex digits.
    pub fn from_hex(input: &str) -> Result<Self> {
        let cleaned = normalize_hex(input);
        let bytes = hex::decode(&cleaned)
            .map_err(|e| Error::InvalidEncoding(format!("{:?}: {}", input, e)))?;

        Ok(Self {
            hex: cleaned.to_lowercase(),
            bytes,
        })
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

fn normalize_hex(input: &str) -> String {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    compact.replace("0x", "").replace("0X", "")
}

/// Hex form of the UTF-8 encoding of `text`.
pub fn text_to_hex(text: &str) -> String {
    Payload::from_text(text).hex
}

/// Base64 form of a hex string.
pub fn hex_to_base64(input: &str) -> Result<String> {
    Ok(Payload::from_hex(input)?.to_base64())
}
