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

use std::fmt::Display;

crate::create_messages!(
    /// All errors the scanner and recursive-descent parser can report.
    ParserError,
    code_mask: 1000i32,
    code_prefix: "BCP",
    @formatted

    ill_formed_equals {
        args: (position: usize),
        msg: format!("a single `=` was found at position {position} where `==` was expected"),
        help: Some("did you mean `==`?".to_string()),
    }

    ill_formed_property_open_parenthesis {
        args: (position: usize),
        msg: format!("`$` at position {position} was not followed by `(`"),
        help: None,
    }

    ill_formed_property_close_parenthesis {
        args: (position: usize),
        msg: format!("the property reference opened at position {position} has no matching `)`"),
        help: None,
    }

    ill_formed_space {
        args: (position: usize),
        msg: format!("the property name at position {position} has illegal boundary whitespace, e.g. `$( name )`"),
        help: Some("remove the whitespace immediately inside the parentheses".to_string()),
    }

    ill_formed_item_list_open_parenthesis {
        args: (position: usize),
        msg: format!("`@` at position {position} was not followed by `(`"),
        help: None,
    }

    ill_formed_item_list_close_parenthesis {
        args: (position: usize),
        msg: format!("the item list opened at position {position} has no matching `)`"),
        help: None,
    }

    ill_formed_item_list_quote {
        args: (position: usize),
        msg: format!("the `'` opened at position {position} inside an item list was never closed"),
        help: None,
    }

    ill_formed_item_metadata_open_parenthesis {
        args: (position: usize),
        msg: format!("`%` at position {position} was not followed by `(`"),
        help: None,
    }

    ill_formed_item_metadata_close_parenthesis {
        args: (position: usize),
        msg: format!("the metadata reference opened at position {position} has no matching `)`"),
        help: None,
    }

    ill_formed_quoted_string {
        args: (position: usize),
        msg: format!("the `'` opened at position {position} was never closed"),
        help: None,
    }

    item_list_not_allowed {
        args: (position: usize),
        msg: format!("an item list reference at position {position} is not allowed in this context"),
        help: None,
    }

    item_metadata_not_allowed {
        args: (position: usize),
        msg: format!("a metadata reference at position {position} is not allowed in this context"),
        help: None,
    }

    built_in_metadata_not_allowed {
        args: (position: usize, name: impl Display),
        msg: format!("the built-in metadata `{name}` at position {position} is not allowed in this context"),
        help: None,
    }

    custom_metadata_not_allowed {
        args: (position: usize, name: impl Display),
        msg: format!("the custom metadata `{name}` at position {position} is not allowed in this context"),
        help: None,
    }

    undefined_function_call {
        args: (position: usize, name: impl Display),
        msg: format!("`{name}` at position {position} is not a recognized function"),
        help: Some("known functions are `Exists` and `HasTrailingSlash`".to_string()),
    }

    incorrect_number_of_function_arguments {
        args: (position: usize, name: impl Display, expected: usize, found: usize),
        msg: format!(
            "`{name}` at position {position} expects {expected} argument(s) but {found} were given"
        ),
        help: None,
    }

    unexpected_token {
        args: (position: usize, found: impl Display, expected: impl Display),
        msg: format!("unexpected token `{found}` at position {position}, expected {expected}"),
        help: None,
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_is_stable_and_prefixed() {
        let err = ParserError::ill_formed_equals(6);
        assert_eq!(err.error_code(), "BCP1000");
        let err2 = ParserError::unexpected_token(6, "(", "an operand");
        assert!(err2.error_code().starts_with("BCP1"));
    }

    #[test]
    fn message_contains_position() {
        let err = ParserError::ill_formed_space(3);
        assert!(err.message().contains('3'));
    }
}
