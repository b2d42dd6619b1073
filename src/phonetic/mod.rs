//! Phonetic encoding.
//!
//! Only American Soundex is provided:
//!
//! - **soundex**: the encoder (`encode`, `soundex_code`)
//! - **code**: the typed `SoundexCode` result

pub mod code;
pub mod soundex;

pub use code::SoundexCode;
pub use soundex::{encode, soundex_code};
