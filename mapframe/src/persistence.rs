// Copyright 2025 the Mapframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mirroring the selection into an external key-value channel.
//!
//! The host exposes its share-link state (usually the page URL) through
//! [`SelectionChannel`]. [`SelectionStore`] owns the text form of a selection
//! on that channel: ids joined by `,` under one key, with the key removed when
//! nothing is selected. Writes replace the current history entry rather than
//! pushing a new one.
//!
//! [`QueryString`] and [`MemoryLocation`] are ready-made channels for hosts
//! that keep the state as a `key=value&...` string, and for tests.

use core::fmt;

use mapframe_selection::codec;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::manifest::ShapeId;

/// Host seam for persisted state.
pub trait SelectionChannel {
    /// Current value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Replaces the value under `key` in place; `None` removes the key.
    fn replace(&mut self, key: &str, value: Option<&str>);
}

/// Reads and writes a selection under one key of a [`SelectionChannel`].
#[derive(Debug)]
pub struct SelectionStore<C> {
    channel: C,
    key: String,
    writes: u64,
}

impl<C: SelectionChannel> SelectionStore<C> {
    /// Binds `key` on `channel`.
    pub fn new(channel: C, key: impl Into<String>) -> Self {
        Self {
            channel,
            key: key.into(),
            writes: 0,
        }
    }

    /// Persisted ids, in stored order, without empty tokens.
    #[must_use]
    pub fn read(&self) -> Vec<ShapeId> {
        self.channel
            .get(&self.key)
            .map(|value| codec::decode(&value).into_iter().map(ShapeId::from).collect())
            .unwrap_or_default()
    }

    /// Stores `ids`, removing the key when `ids` is empty.
    pub fn write(&mut self, ids: &[ShapeId]) {
        let value = codec::encode(ids);
        tracing::trace!(
            key = %self.key,
            value = value.as_deref().unwrap_or(""),
            "persisting selection"
        );
        self.channel.replace(&self.key, value.as_deref());
        self.writes += 1;
    }

    /// Number of writes issued so far.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// The underlying channel.
    #[must_use]
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Mutable access to the underlying channel, for host-side navigation.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Unwraps the channel.
    pub fn into_channel(self) -> C {
        self.channel
    }
}

/// Bytes escaped in keys and values: all but ASCII alphanumerics and `-._~`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered `key=value` pairs, as found after the `?` of a URL.
///
/// Keys and values are percent-decoded on parse (`+` reads as a space) and
/// encoded on display; everything except ASCII alphanumerics and `-._~` is
/// escaped, so a `,` inside a value is written as `%2C`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Parses `a=1&b=2`, with or without a leading `?`.
    ///
    /// A pair without `=` has an empty value. Empty segments are ignored.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                (percent_decode(key), percent_decode(value))
            })
            .collect();
        Self { pairs }
    }

    /// First value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key` to `value`, keeping the position of its first occurrence and
    /// dropping any others. `None` removes every occurrence.
    pub fn set(&mut self, key: &str, value: Option<&str>) {
        match value {
            None => self.pairs.retain(|(k, _)| k != key),
            Some(value) => {
                let mut seen = false;
                self.pairs.retain_mut(|(k, v)| {
                    if k != key {
                        return true;
                    }
                    if seen {
                        return false;
                    }
                    seen = true;
                    value.clone_into(v);
                    true
                });
                if !seen {
                    self.pairs.push((key.to_owned(), value.to_owned()));
                }
            }
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )?;
        }
        Ok(())
    }
}

impl SelectionChannel for QueryString {
    fn get(&self, key: &str) -> Option<String> {
        Self::get(self, key).map(str::to_owned)
    }

    fn replace(&mut self, key: &str, value: Option<&str>) {
        self.set(key, value);
    }
}

fn percent_decode(text: &str) -> String {
    let text = text.replace('+', " ");
    percent_decode_str(&text).decode_utf8_lossy().into_owned()
}

/// In-memory channel with browser-like history.
///
/// Holds a stack of query strings. [`SelectionChannel::replace`] edits the
/// current entry in place; [`MemoryLocation::navigate`] pushes a new entry and
/// [`MemoryLocation::back`] pops one, the way a host would observe external
/// navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    current: QueryString,
    previous: Vec<QueryString>,
}

impl MemoryLocation {
    /// Starts with a single entry parsed from `query`.
    #[must_use]
    pub fn new(query: &str) -> Self {
        Self {
            current: QueryString::parse(query),
            previous: Vec::new(),
        }
    }

    /// The current entry.
    #[must_use]
    pub fn current(&self) -> &QueryString {
        &self.current
    }

    /// The current entry, serialized.
    #[must_use]
    pub fn query(&self) -> String {
        self.current.to_string()
    }

    /// Number of history entries.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.previous.len() + 1
    }

    /// Pushes a new entry parsed from `query`.
    pub fn navigate(&mut self, query: &str) {
        let next = QueryString::parse(query);
        self.previous.push(core::mem::replace(&mut self.current, next));
    }

    /// Pops the current entry. Returns `false` at the first entry.
    pub fn back(&mut self) -> bool {
        match self.previous.pop() {
            Some(entry) => {
                self.current = entry;
                true
            }
            None => false,
        }
    }
}

impl SelectionChannel for MemoryLocation {
    fn get(&self, key: &str) -> Option<String> {
        self.current.get(key).map(str::to_owned)
    }

    fn replace(&mut self, key: &str, value: Option<&str>) {
        self.current.set(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_round_trip() {
        let mut query = QueryString::parse("?lang=en&selected=a%2Cb&x");
        assert_eq!(query.get("selected"), Some("a,b"));
        assert_eq!(query.get("x"), Some(""));

        query.set("selected", Some("a,b,c d"));
        assert_eq!(query.to_string(), "lang=en&selected=a%2Cb%2Cc%20d&x=");
        assert_eq!(QueryString::parse(&query.to_string()), query);

        query.set("name", Some("caf\u{e9}+~"));
        assert!(query.to_string().ends_with("&name=caf%C3%A9%2B~"));
        assert_eq!(QueryString::parse(&query.to_string()), query);
    }

    #[test]
    fn set_collapses_duplicates_and_removes() {
        let mut query = QueryString::parse("k=1&other=2&k=3");
        query.set("k", Some("4"));
        assert_eq!(query.to_string(), "k=4&other=2");
        query.set("k", None);
        assert_eq!(query.to_string(), "other=2");
        query.set("new", Some("v"));
        assert_eq!(query.to_string(), "other=2&new=v");
    }

    #[test]
    fn decode_tolerates_bad_escapes() {
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%2c%2C"), ",,");
        assert_eq!(percent_decode("caf%C3%A9"), "caf\u{e9}");
    }

    #[test]
    fn store_round_trip_and_key_removal() {
        let mut store = SelectionStore::new(MemoryLocation::default(), "selected");
        store.write(&[ShapeId::new("a"), ShapeId::new("b")]);
        assert_eq!(store.read(), [ShapeId::new("a"), ShapeId::new("b")]);
        assert_eq!(store.channel().query(), "selected=a%2Cb");

        store.write(&[]);
        assert!(store.read().is_empty());
        assert_eq!(store.channel().get("selected"), None);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn writes_replace_the_current_history_entry() {
        let mut location = MemoryLocation::new("page=1");
        location.navigate("page=2");
        let mut store = SelectionStore::new(location, "selected");
        store.write(&[ShapeId::new("shop-1")]);

        let location = store.into_channel();
        assert_eq!(location.history_len(), 2);
        assert_eq!(location.query(), "page=2&selected=shop-1");

        let mut location = location;
        assert!(location.back());
        assert_eq!(location.query(), "page=1");
        assert!(!location.back());
    }
}
