//! Typed Soundex code value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::soundex::CODE_DIGITS;
use crate::error::SoundexError;

/// A well-formed Soundex code: one uppercase ASCII letter followed by three
/// digits in `0..=6`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SoundexCode(String);

impl SoundexCode {
    pub(crate) fn from_parts(head: char, digits: [u8; CODE_DIGITS]) -> Self {
        let mut code = String::with_capacity(1 + CODE_DIGITS);
        code.push(head);
        code.extend(digits.iter().map(|&d| char::from(d)));
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading letter.
    pub fn letter(&self) -> char {
        char::from(self.0.as_bytes()[0])
    }

    /// The three trailing digits.
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for SoundexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SoundexCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SoundexCode {
    type Err = SoundexError;

    /// Parse an existing code. The letter may be lowercase and is normalised.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 1 + CODE_DIGITS
            && bytes[0].is_ascii_alphabetic()
            && bytes[1..].iter().all(|b| (b'0'..=b'6').contains(b));

        if !well_formed {
            return Err(SoundexError::InvalidCode(s.to_string()));
        }

        Ok(Self(s.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for SoundexCode {
    type Error = SoundexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SoundexCode> for String {
    fn from(code: SoundexCode) -> Self {
        code.0
    }
}
