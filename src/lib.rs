//! Soundex - American Soundex phonetic encoding.
//!
//! Maps a word to a 4-character code (one uppercase letter and three digits)
//! so that words which sound alike share a code.
//!
//! # Example
//!
//! ```rust
//! use soundex::{encode, soundex_code, SoundexError};
//!
//! assert_eq!(encode("Robert").unwrap(), "R163");
//! assert_eq!(encode("Rupert").unwrap(), "R163");
//!
//! let code = soundex_code("Jbob").unwrap();
//! assert_eq!(code.letter(), 'J');
//! assert_eq!(code.digits(), "110");
//!
//! assert!(matches!(encode(""), Err(SoundexError::InvalidInput(_))));
//! ```

pub mod config;
pub mod error;
pub mod phonetic;

pub use config::{Config, OutputFormat, RejectedOverride};
pub use error::{SoundexError, SoundexResult};
pub use phonetic::{encode, soundex_code, SoundexCode};
