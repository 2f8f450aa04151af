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

//! Pure character-classification and greedy-match helpers shared by the tokenizer's top-level
//! scan and its quote-internal sub-parses. None of these touch a cursor or emit diagnostics —
//! they just answer "how many of the leading characters of this slice match?".

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn is_decimal_number_start(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Greedily matches a name: `[A-Za-z_][A-Za-z0-9_]*`. Used for property, item, metadata, and
/// function names, and for bare identifiers (`true`, `Debug`, ...).
pub fn try_lex_name(text: &str) -> Option<&str> {
    let mut chars = text.char_indices();
    let (_, first) = chars.next()?;
    if !is_identifier_start(first) {
        return None;
    }
    let end = chars.find(|(_, c)| !is_identifier_char(*c)).map(|(i, _)| i).unwrap_or(text.len());
    Some(&text[..end])
}

/// Alias kept distinct from [`try_lex_name`] for call-site clarity at identifier primaries.
pub fn try_lex_identifier(text: &str) -> Option<&str> {
    try_lex_name(text)
}

/// Greedily matches a decimal number: `[0-9]+(\.[0-9]+)?`.
pub fn try_lex_decimal_number(text: &str) -> Option<&str> {
    let mut chars = text.char_indices().peekable();
    let (_, first) = chars.peek().copied()?;
    if !is_decimal_number_start(first) {
        return None;
    }
    let mut end = 0;
    while let Some((i, c)) = chars.peek().copied() {
        if is_decimal_number_start(c) {
            end = i + c.len_utf8();
            chars.next();
        } else {
            break;
        }
    }
    if chars.peek().map(|(_, c)| *c) == Some('.') {
        let mut lookahead = chars.clone();
        lookahead.next();
        if lookahead.peek().map(|(_, c)| is_decimal_number_start(*c)).unwrap_or(false) {
            chars.next();
            while let Some((i, c)) = chars.peek().copied() {
                if is_decimal_number_start(c) {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
        }
    }
    Some(&text[..end])
}

/// Greedily matches a hex number: `0[xX][0-9a-fA-F]+`.
pub fn try_lex_hex_number(text: &str) -> Option<&str> {
    let mut chars = text.char_indices();
    let (_, zero) = chars.next()?;
    if zero != '0' {
        return None;
    }
    let (_, x) = chars.next()?;
    if x != 'x' && x != 'X' {
        return None;
    }
    let rest_start = "0x".len();
    let mut end = rest_start;
    for (i, c) in text[rest_start..].char_indices() {
        if is_hex_digit(c) {
            end = rest_start + i + c.len_utf8();
        } else {
            break;
        }
    }
    if end == rest_start { None } else { Some(&text[..end]) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_names_and_stops_at_first_non_identifier_char() {
        assert_eq!(try_lex_name("Foo.Bar"), Some("Foo"));
        assert_eq!(try_lex_name("_private1 rest"), Some("_private1"));
        assert_eq!(try_lex_name("1abc"), None);
    }

    #[test]
    fn lexes_decimal_numbers_with_optional_fraction() {
        assert_eq!(try_lex_decimal_number("123abc"), Some("123"));
        assert_eq!(try_lex_decimal_number("3.14)"), Some("3.14"));
        assert_eq!(try_lex_decimal_number("3."), Some("3"));
        assert_eq!(try_lex_decimal_number("abc"), None);
    }

    #[test]
    fn lexes_hex_numbers() {
        assert_eq!(try_lex_hex_number("0x1F and"), Some("0x1F"));
        assert_eq!(try_lex_hex_number("0x"), None);
        assert_eq!(try_lex_hex_number("0b1"), None);
    }
}
