//! Permissive URL query-string codec.
//!
//! This module provides pure, total functions for translating between a query
//! string and a [`QueryState`], plus the two transformations the UI layer
//! drives: [`upsert`] and [`remove_keys`]. Nothing here ever fails: malformed
//! fragments are silently excluded from the parsed state rather than raised
//! as errors, matching the permissive behavior of the query library the
//! original callers relied on.
//!
//! The base path is an explicit parameter to [`upsert`] and [`remove_keys`];
//! there is no ambient "current location" anywhere in this crate.

use crate::model::{ParamValue, QueryState};

// RFC 3986 unreserved characters stay literal; everything else is
// percent-encoded over its UTF-8 bytes. Space encodes as %20, never '+'.
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Best-effort percent-decoding of a single query component.
///
/// `+` decodes to a space. An invalid escape (truncated or non-hex) passes
/// through literally instead of failing the parse.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn encode_component(raw: &str, out: &mut String) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &byte in raw.as_bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(HEX[(byte >> 4) as usize] as char);
            out.push(HEX[(byte & 0x0f) as usize] as char);
        }
    }
}

/// Parse a query string into a [`QueryState`].
///
/// Accepts a bare query (`color=red&page=2`), one with a leading `?`, or a
/// full `path?query` string: everything through the first `?` is ignored.
/// Parsing is total and permissive:
///
/// - pairs split on `&`; key and value split on the first `=`
/// - a pair with no `=` maps the whole segment to an empty text value
/// - empty segments and empty-key segments are dropped
/// - invalid percent escapes pass through literally
/// - for duplicate keys, the last occurrence wins at the first occurrence's
///   position
pub fn parse(input: &str) -> QueryState {
    let query = match input.find('?') {
        Some(idx) => &input[idx + 1..],
        None => input,
    };

    let mut state = QueryState::new();
    for segment in query.split('&') {
        if segment.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match segment.split_once('=') {
            Some((k, v)) => (k, v),
            None => (segment, ""),
        };
        let key = decode_component(raw_key);
        if key.is_empty() {
            continue;
        }
        state.set(key, decode_component(raw_value));
    }
    state
}

/// Serialize a [`QueryState`] back into a query string.
///
/// This is where the skip-null policy lives: entries whose value is
/// [`ParamValue::Null`] are dropped. The serializer is the only place that
/// applies the rule, so every operation built on it behaves consistently.
pub fn serialize(state: &QueryState) -> String {
    let mut out = String::new();
    for (key, value) in state.iter() {
        if value.is_null() {
            continue;
        }
        if !out.is_empty() {
            out.push('&');
        }
        encode_component(key, &mut out);
        out.push('=');
        encode_component(&value.to_string(), &mut out);
    }
    out
}

/// Set `key` to `value` in `query` and return a full `path?query` string.
///
/// Parses `query`, overwrites (or inserts) the entry, and re-serializes
/// against the caller-supplied `base_path`. Because the serializer skips
/// nulls, `upsert(p, q, k, ParamValue::Null)` is equivalent to deleting `k`.
/// When nothing survives serialization the bare `base_path` is returned
/// without a trailing `?`.
pub fn upsert(base_path: &str, query: &str, key: &str, value: impl Into<ParamValue>) -> String {
    let mut state = parse(query);
    state.set(key, value);
    join_path(base_path, &serialize(&state))
}

/// Delete every key in `keys` from `query` and return a full `path?query`
/// string.
///
/// Keys not present are ignored, so the operation is idempotent: removing the
/// same set twice yields the same string as removing it once. Null-valued
/// survivors are dropped by the serializer like everywhere else.
pub fn remove_keys<S: AsRef<str>>(base_path: &str, query: &str, keys: &[S]) -> String {
    let mut state = parse(query);
    for key in keys {
        state.remove(key.as_ref());
    }
    join_path(base_path, &serialize(&state))
}

fn join_path(base_path: &str, query: &str) -> String {
    if query.is_empty() {
        base_path.to_string()
    } else {
        format!("{base_path}?{query}")
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
