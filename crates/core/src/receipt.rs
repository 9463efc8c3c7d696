// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Voter receipt codes.
//!
//! A receipt code is 16 characters from an alphabet without look-alike
//! glyphs (no 0/O, no 1/I), grouped as `XXXX-XXXX-XXXX-XXXX`. It doubles as
//! the queue record id.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Characters allowed in a receipt code. 32 symbols, so a digest byte maps
/// onto it without bias.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

const GROUPS: usize = 4;
const GROUP_LEN: usize = 4;
const CODE_LEN: usize = GROUPS * GROUP_LEN + GROUPS - 1;

/// A validated receipt code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReceiptCode(String);

impl ReceiptCode {
    /// Generate a fresh receipt code for a ballot cast in `election_id` at `cast_at`.
    pub fn generate(election_id: &str, cast_at: &DateTime<Utc>) -> Self {
        Self::from_seed(election_id, cast_at, rand::random())
    }

    /// Derive a receipt code from the ballot and an explicit nonce.
    ///
    /// Format: first 16 bytes of SHA256(election_id + cast_at + nonce), each
    /// byte reduced onto [`ALPHABET`].
    pub fn from_seed(election_id: &str, cast_at: &DateTime<Utc>, nonce: u64) -> Self {
        let input = format!("{}{}{}", election_id, cast_at.to_rfc3339(), nonce);
        let hash = Sha256::digest(input.as_bytes());

        let mut code = String::with_capacity(CODE_LEN);
        for (i, byte) in hash.iter().take(GROUPS * GROUP_LEN).enumerate() {
            if i > 0 && i % GROUP_LEN == 0 {
                code.push('-');
            }
            code.push(char::from(ALPHABET[usize::from(byte % 32)]));
        }
        ReceiptCode(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ReceiptCode {
    type Err = Error;

    /// Parse a receipt code typed by a voter. Case-insensitive, surrounding
    /// whitespace ignored.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_uppercase();
        if normalized.len() != CODE_LEN {
            return Err(Error::InvalidReceiptCode(s.to_string()));
        }

        let valid = normalized.bytes().enumerate().all(|(i, b)| {
            if (i + 1) % (GROUP_LEN + 1) == 0 {
                b == b'-'
            } else {
                ALPHABET.contains(&b)
            }
        });

        if valid {
            Ok(ReceiptCode(normalized))
        } else {
            Err(Error::InvalidReceiptCode(s.to_string()))
        }
    }
}

impl TryFrom<String> for ReceiptCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ReceiptCode> for String {
    fn from(code: ReceiptCode) -> Self {
        code.0
    }
}

impl fmt::Display for ReceiptCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "receipt_tests.rs"]
mod tests;
