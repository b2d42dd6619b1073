//! American Soundex phonetic algorithm.
//!
//! The Soundex algorithm encodes names by sound, as pronounced in English.
//! It produces a 4-character code where the first character is the first letter
//! of the word and the remaining three are digits.
//!
//! Letters after the first are mapped to digit classes:
//!
//! | Letters                  | Digit |
//! |--------------------------|-------|
//! | B, F, P, V               | 1     |
//! | C, G, J, K, Q, S, X, Z   | 2     |
//! | D, T                     | 3     |
//! | L                        | 4     |
//! | M, N                     | 5     |
//! | R                        | 6     |
//!
//! Adjacent letters with the same digit are coded once. H, W, Y and
//! non-alphabetic characters are ignored entirely, so letters with the same
//! digit on either side of them are also coded once. A, E, I, O, U contribute
//! no digit but keep the letters around them apart, so "Jbob" codes both Bs.

use super::code::SoundexCode;
use crate::error::{SoundexError, SoundexResult};

/// Number of digits following the head letter.
pub const CODE_DIGITS: usize = 3;

/// Classification of a character after the head letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// A, E, I, O, U
    Separator,
    Digit(u8),
}

/// American Soundex algorithm - returns the 4-character phonetic code as a string.
/// Example: "Smith" and "Smyth" both return "S530"
///
/// Case is folded with the full Unicode mappings before encoding, so letters
/// that map to ASCII (the Kelvin sign, `ß`) are coded like their ASCII forms.
///
/// Fails with [`SoundexError::InvalidInput`] when the folded word is empty or
/// does not start with an ASCII letter.
pub fn encode(word: &str) -> SoundexResult<String> {
    soundex_code(word).map(|code| code.to_string())
}

/// Same as [`encode`], returning the typed [`SoundexCode`].
pub fn soundex_code(word: &str) -> SoundexResult<SoundexCode> {
    let folded = fold_case(word);
    let stripped = strip_initial_duplicates(&folded);
    let mut chars = stripped.chars();

    let head = match chars.next() {
        Some(c) if c.is_ascii_uppercase() => c,
        Some(c) => {
            tracing::debug!(word, "rejecting word without a leading letter");
            return Err(SoundexError::InvalidInput(format!(
                "word must start with an ASCII letter, found {:?}",
                c
            )));
        }
        None => {
            tracing::debug!("rejecting empty word");
            return Err(SoundexError::InvalidInput("word is empty".to_string()));
        }
    };

    Ok(SoundexCode::from_parts(head, encode_tail(chars)))
}

/// Lowercase then uppercase with the full Unicode mappings, so a word, its
/// lowercase and its uppercase all fold to the same string. Letters such as
/// the Kelvin sign or `ß` become the ASCII letters they map to.
fn fold_case(word: &str) -> String {
    word.to_lowercase().to_uppercase()
}

/// Drop leading characters while the first two are the same, so "BBCD" is
/// coded as "BCD". Expects case-folded input.
fn strip_initial_duplicates(word: &str) -> &str {
    let mut word = word;
    loop {
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(first), Some(second)) if first == second => {
                word = &word[first.len_utf8()..];
            }
            _ => return word,
        }
    }
}

/// Fold the characters after the head into at most three digits, zero padded.
fn encode_tail(tail: impl Iterator<Item = char>) -> [u8; CODE_DIGITS] {
    let mut digits = [b'0'; CODE_DIGITS];
    let mut len = 0;
    let mut last: Option<Token> = None;

    for token in tail.filter_map(classify) {
        // Equal neighbours collapse; soft characters never reach this point.
        if last == Some(token) {
            continue;
        }
        last = Some(token);

        if let Token::Digit(d) = token {
            digits[len] = d;
            len += 1;
            if len == CODE_DIGITS {
                break;
            }
        }
    }

    digits
}

/// Map a case-folded character to its token. H, W, Y and anything that is
/// not an ASCII letter yield `None`.
fn classify(c: char) -> Option<Token> {
    match c {
        'A' | 'E' | 'I' | 'O' | 'U' => Some(Token::Separator),
        'B' | 'F' | 'P' | 'V' => Some(Token::Digit(b'1')),
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => Some(Token::Digit(b'2')),
        'D' | 'T' => Some(Token::Digit(b'3')),
        'L' => Some(Token::Digit(b'4')),
        'M' | 'N' => Some(Token::Digit(b'5')),
        'R' => Some(Token::Digit(b'6')),
        _ => None,
    }
}
