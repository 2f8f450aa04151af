// Copyright (C) 2019-2026 The buildcond Authors.
// This file is part of the buildcond library.

// The buildcond library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The buildcond library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the buildcond library. If not, see <https://www.gnu.org/licenses/>.

//! Encode/decode the reserved MSBuild character set via `%XX`.
//!
//! `%` is escaped first among the reserved characters so that encoding is idempotent under
//! repeated application: encoding `%` after the others would double-encode escapes the first
//! pass already produced.

use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::collections::HashMap;

/// The reserved set, `%` first (see module docs).
const RESERVED: [char; 9] = ['%', '*', '?', '@', '$', '(', ')', ';', '\''];

lazy_static! {
    /// Process-wide, opt-in memoization for [`escape_cached`]. Grows unbounded; callers opt in
    /// only when they expect heavy reuse of stable keys.
    static ref ESCAPE_CACHE: Mutex<HashMap<String, String>> = Mutex::new(HashMap::new());
}

/// `true` iff `s` contains any character from the reserved set.
pub fn contains_reserved_characters(s: &str) -> bool {
    s.chars().any(|c| RESERVED.contains(&c))
}

/// Replaces every reserved character in `s` with `%HH` (lowercase hex). Returns `s` unchanged
/// (no allocation) when nothing needs escaping.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !contains_reserved_characters(s) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if RESERVED.contains(&c) {
            out.push('%');
            out.push_str(&format!("{:02x}", c as u32));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// As [`escape`], but memoizes results in a process-wide cache keyed by the unescaped string.
pub fn escape_cached(s: &str) -> String {
    if let Some(hit) = ESCAPE_CACHE.lock().get(s) {
        return hit.clone();
    }
    let escaped = escape(s).into_owned();
    ESCAPE_CACHE.lock().insert(s.to_string(), escaped.clone());
    escaped
}

/// Decodes every valid `%HH` escape in `s` back to its literal byte. An invalid or truncated
/// escape (not exactly two hex digits) is passed through literally. `trim`, if set, trims
/// leading/trailing whitespace from the result (a behavior MSBuild uses when unescaping text
/// pulled from around property/item syntax).
pub fn unescape_all(s: &str, trim: bool) -> Cow<'_, str> {
    if !s.contains('%') {
        return if trim { Cow::Owned(s.trim().to_string()) } else { Cow::Borrowed(s) };
    }
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '%' && i + 2 < chars.len() && is_hex_digit(chars[i + 1]) && is_hex_digit(chars[i + 2]) {
            let hi = chars[i + 1].to_digit(16).unwrap();
            let lo = chars[i + 2].to_digit(16).unwrap();
            let byte = (hi * 16 + lo) as u8;
            out.push(byte as char);
            i += 3;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    let result = if trim { out.trim().to_string() } else { out };
    Cow::Owned(result)
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_escape_and_unescape() {
        for s in ["plain text", "50%", "$(Foo)", "@(Bar)", "a;b'c", "no-reserved-chars"] {
            assert_eq!(unescape_all(&escape(s), false), s);
        }
    }

    #[test]
    fn escape_is_idempotent() {
        let s = "100% $(Foo)";
        let once = escape(s).into_owned();
        let twice = escape(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn unreserved_string_is_not_allocated() {
        let s = "just plain text";
        match escape(s) {
            Cow::Borrowed(b) => assert_eq!(b, s),
            Cow::Owned(_) => panic!("expected escape to avoid allocating for unreserved input"),
        }
    }

    #[test]
    fn percent_is_escaped_first_so_it_round_trips() {
        assert_eq!(escape("%"), "%25");
    }

    #[test]
    fn invalid_escape_passes_through_literally() {
        assert_eq!(unescape_all("100%zz", false), "100%zz");
        assert_eq!(unescape_all("trailing%2", false), "trailing%2");
    }

    #[test]
    fn cached_escape_matches_uncached() {
        assert_eq!(escape_cached("@(Items)"), escape("@(Items)").into_owned());
    }
}
