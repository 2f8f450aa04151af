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
    /// Semantic violations raised while evaluating an expression tree.
    EvaluationError,
    code_mask: 2000i32,
    code_prefix: "BCE",
    @formatted

    expression_does_not_evaluate_to_boolean {
        args: (unexpanded: impl Display, expanded: impl Display),
        msg: format!(
            "the expression `{unexpanded}` (expanded: `{expanded}`) does not evaluate to a boolean"
        ),
        help: None,
    }

    comparison_on_non_numeric_expression {
        args: (unexpanded: impl Display, expanded: impl Display),
        msg: format!(
            "the expression `{unexpanded}` (expanded: `{expanded}`) cannot be used in a relational comparison"
        ),
        help: Some("relational operators require both sides to coerce to a number or a version".to_string()),
    }

    cannot_pass_multiple_items_into_scalar_function {
        args: (function: impl Display, unexpanded: impl Display),
        msg: format!(
            "`{function}` requires a single item but `{unexpanded}` expanded to multiple items"
        ),
        help: None,
    }

    undefined_function_call {
        args: (name: impl Display),
        msg: format!("`{name}` is not a recognized function"),
        help: None,
    }

    incorrect_number_of_function_arguments {
        args: (name: impl Display, expected: usize, found: usize),
        msg: format!("`{name}` expects {expected} argument(s) but {found} were given"),
        help: None,
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_both_unexpanded_and_expanded_text() {
        let err = EvaluationError::expression_does_not_evaluate_to_boolean("$(Foo)", "bar");
        assert!(err.message().contains("$(Foo)"));
        assert!(err.message().contains("bar"));
    }
}
