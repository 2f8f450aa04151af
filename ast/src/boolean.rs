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

/// Recognizes one of the boolean keywords (`true|false|on|off|yes|no`, case-insensitive),
/// used both for a bare `Ident` primary and for a quoted body that is otherwise "pure"
/// Returns the literal value the keyword denotes, or `None` if `text` is not one of
/// the recognized keywords.
pub fn parse_boolean_keyword(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => Some(true),
        "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_keyword_case_insensitively() {
        for (text, expected) in [
            ("true", true),
            ("TRUE", true),
            ("On", true),
            ("yES", true),
            ("false", false),
            ("Off", false),
            ("NO", false),
        ] {
            assert_eq!(parse_boolean_keyword(text), Some(expected), "text = {text}");
        }
    }

    #[test]
    fn rejects_non_keywords() {
        assert_eq!(parse_boolean_keyword("Debug"), None);
        assert_eq!(parse_boolean_keyword(""), None);
    }
}
