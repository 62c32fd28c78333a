// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text form of a selection, as stored in a share link.
//!
//! A selection is written as its ids joined by [`DELIMITER`]. Empty tokens
//! are dropped on read, and an empty selection has no text form at all so the
//! caller can remove the key instead of writing an empty value.

use alloc::string::String;
use alloc::vec::Vec;

/// Separator between ids.
pub const DELIMITER: char = ',';

/// Splits a stored value into ids, trimming whitespace and dropping empty tokens.
#[must_use]
pub fn decode(value: &str) -> Vec<String> {
    value
        .split(DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Joins ids into a stored value, or `None` if there is nothing to store.
///
/// Empty ids are skipped.
#[must_use]
pub fn encode<I, S>(ids: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for id in ids {
        let id = id.as_ref();
        if id.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(DELIMITER);
        }
        out.push_str(id);
    }
    (!out.is_empty()).then_some(out)
}

/// Returns `true` if `id` survives an encode/decode cycle unchanged.
#[must_use]
pub fn is_valid_token(id: &str) -> bool {
    !id.is_empty() && !id.contains(DELIMITER) && id.trim() == id
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{decode, encode, is_valid_token};

    #[test]
    fn decode_drops_empty_tokens() {
        assert_eq!(decode("a,,b,"), ["a", "b"]);
        assert_eq!(decode(" a , b"), ["a", "b"]);
        assert!(decode("").is_empty());
        assert!(decode(",,").is_empty());
    }

    #[test]
    fn empty_selection_has_no_text_form() {
        assert_eq!(encode(Vec::<String>::new()), None);
        assert_eq!(encode(["", ""]), None);
        assert_eq!(encode(["shop-1", "", "click-2"]).as_deref(), Some("shop-1,click-2"));
    }

    #[test]
    fn tokens_with_delimiter_are_invalid() {
        assert!(is_valid_token("click-1"));
        assert!(!is_valid_token("a,b"));
        assert!(!is_valid_token(""));
        assert!(!is_valid_token(" a"));
    }
}
