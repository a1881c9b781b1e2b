//! Address trace reader
//!
//! Tokenizes the address-list file into logical addresses. Tokens are
//! whitespace-separated base-10 integers; reading stops at end of file
//! or at the first token that fails to parse, silently truncating the
//! rest of the stream. Values are masked to the low 16 bits.

use std::fs;
use std::path::Path;

use crate::Result;

/// Parsed address stream
pub struct AddressTrace {
    addrs: std::vec::IntoIter<u16>,
}

impl AddressTrace {
    /// Read and tokenize an address-list file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Tokenize address text; stops at the first malformed token
    pub fn parse(text: &str) -> Self {
        let mut addrs = Vec::new();
        for token in text.split_whitespace() {
            match token.parse::<i64>() {
                Ok(value) => addrs.push((value as u64 & 0xFFFF) as u16),
                Err(_) => break,
            }
        }

        Self {
            addrs: addrs.into_iter(),
        }
    }

    /// Number of addresses remaining
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.len() == 0
    }
}

impl Iterator for AddressTrace {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        self.addrs.next()
    }
}
