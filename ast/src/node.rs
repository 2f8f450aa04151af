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

use crate::boolean::parse_boolean_keyword;
use buildcond_span::Span;
use std::cell::RefCell;
use std::fmt;

/// A binary comparison operator: `Eq`, `Ne`, `Lt`, `Le`, `Gt`, `Ge`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        })
    }
}

/// The name slot of a `FunctionCall` node: one of the two known functions, or an arbitrary
/// name admitted only when `AllowUndefinedFunctions` was set at parse time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionName {
    Exists,
    HasTrailingSlash,
    Unknown(String),
}

impl FunctionName {
    /// Resolves `name` (case-insensitive) to a known function, or `Unknown` otherwise.
    pub fn resolve(name: &str) -> Self {
        if name.eq_ignore_ascii_case("Exists") {
            FunctionName::Exists
        } else if name.eq_ignore_ascii_case("HasTrailingSlash") {
            FunctionName::HasTrailingSlash
        } else {
            FunctionName::Unknown(name.to_string())
        }
    }

    /// The declared arity for known functions (both currently take exactly one argument).
    pub fn declared_arity(&self) -> Option<usize> {
        match self {
            FunctionName::Exists | FunctionName::HasTrailingSlash => Some(1),
            FunctionName::Unknown(_) => None,
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionName::Exists => write!(f, "Exists"),
            FunctionName::HasTrailingSlash => write!(f, "HasTrailingSlash"),
            FunctionName::Unknown(name) => write!(f, "{name}"),
        }
    }
}

/// The conditional-expression tree. A tagged sum, not an inheritance hierarchy: evaluation
/// dispatches through `match`, never a vtable.
#[derive(Clone, Debug)]
pub enum Node {
    /// A literal or an expandable reference. `expandable` is `true` iff `text` contains `$(`,
    /// `@(`, `%(`, or a bare `%`-escape trigger. `cache` holds the result of the most recent
    /// expansion for the lifetime of one evaluation; `reset_state` clears it.
    String { text: String, expandable: bool, span: Span, cache: RefCell<Option<String>> },
    /// The textual form of a decimal or hex literal.
    Numeric { text: String, span: Span },
    /// A precomputed boolean, retaining the original lexeme for diagnostics.
    Boolean { value: bool, text: String, span: Span },
    Not { child: Box<Node>, span: Span },
    And { left: Box<Node>, right: Box<Node>, span: Span },
    Or { left: Box<Node>, right: Box<Node>, span: Span },
    Compare { op: CompareOp, left: Box<Node>, right: Box<Node>, span: Span },
    FunctionCall { name: FunctionName, args: Vec<Node>, span: Span },
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::String { span, .. }
            | Node::Numeric { span, .. }
            | Node::Boolean { span, .. }
            | Node::Not { span, .. }
            | Node::And { span, .. }
            | Node::Or { span, .. }
            | Node::Compare { span, .. }
            | Node::FunctionCall { span, .. } => *span,
        }
    }

    /// The number of children this node's kind requires: 2 for binary logical/comparison
    /// nodes, 1 for `Not`, the function's declared arity for `FunctionCall` (or the number of
    /// arguments actually supplied, for an unknown function deferred to evaluation), 0 for the
    /// three leaf kinds.
    pub fn arity(&self) -> usize {
        match self {
            Node::String { .. } | Node::Numeric { .. } | Node::Boolean { .. } => 0,
            Node::Not { .. } => 1,
            Node::And { .. } | Node::Or { .. } | Node::Compare { .. } => 2,
            Node::FunctionCall { name, args, .. } => name.declared_arity().unwrap_or(args.len()),
        }
    }

    /// The original lexeme, without any expansion.
    pub fn get_unexpanded_value(&self) -> &str {
        match self {
            Node::String { text, .. } | Node::Numeric { text, .. } | Node::Boolean { text, .. } => text,
            Node::Not { .. } => "!(...)",
            Node::And { .. } => "(...) and (...)",
            Node::Or { .. } => "(...) or (...)",
            Node::Compare { .. } => "(...)",
            Node::FunctionCall { .. } => "(...)",
        }
    }

    /// The expanded value. For a `String` node this calls `expand`
    /// on `text` the first time it is requested and caches the result; `expand` is never called
    /// for a non-expandable `String` or for any other node kind. The cache is cleared by
    /// [`Node::reset_state`].
    pub fn get_expanded_value(&self, expand: &mut dyn FnMut(&str) -> String) -> String {
        match self {
            Node::String { text, expandable, cache, .. } => {
                if !*expandable {
                    return text.clone();
                }
                if let Some(cached) = cache.borrow().as_ref() {
                    return cached.clone();
                }
                let expanded = expand(text);
                *cache.borrow_mut() = Some(expanded.clone());
                expanded
            }
            other => other.get_unexpanded_value().to_string(),
        }
    }

    /// Attempts to view this node as a boolean without evaluating it as a sub-expression — a
    /// leaf-level coercion. Meaningful for `Boolean` directly and for `String` once
    /// expanded; `Numeric` and compound nodes are never boolean-coercible at this level (a
    /// compound operand of a comparison is evaluated recursively by the evaluator instead,
    /// see DESIGN.md).
    pub fn try_bool(&self, expand: &mut dyn FnMut(&str) -> String) -> Option<bool> {
        match self {
            Node::Boolean { value, .. } => Some(*value),
            Node::String { .. } => parse_boolean_keyword(&self.get_expanded_value(expand)),
            _ => None,
        }
    }

    /// Attempts `TryConvertDecimalOrHexToDouble` on this node's value.
    pub fn try_numeric(&self, expand: &mut dyn FnMut(&str) -> String) -> Option<f64> {
        match self {
            Node::Numeric { text, .. } => parse_decimal_or_hex(text),
            Node::String { .. } => parse_decimal_or_hex(&self.get_expanded_value(expand)),
            _ => None,
        }
    }

    /// Attempts to view this node's value as a dotted `Version`.
    pub fn try_version(&self, expand: &mut dyn FnMut(&str) -> String) -> Option<crate::version::Version> {
        match self {
            Node::Numeric { text, .. } => crate::version::Version::parse(text),
            Node::String { .. } => crate::version::Version::parse(&self.get_expanded_value(expand)),
            _ => None,
        }
    }

    /// Recursively clears every `String` node's expansion cache.
    pub fn reset_state(&self) {
        match self {
            Node::String { cache, .. } => *cache.borrow_mut() = None,
            Node::Numeric { .. } | Node::Boolean { .. } => {}
            Node::Not { child, .. } => child.reset_state(),
            Node::And { left, right, .. } | Node::Or { left, right, .. } | Node::Compare { left, right, .. } => {
                left.reset_state();
                right.reset_state();
            }
            Node::FunctionCall { args, .. } => args.iter().for_each(Node::reset_state),
        }
    }
}

impl PartialEq for Node {
    /// Structural equality over the semantic content only — spans and expansion caches are
    /// deliberately ignored (matching how tests compare parsed trees).
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::String { text: t1, expandable: e1, .. }, Node::String { text: t2, expandable: e2, .. }) => {
                t1 == t2 && e1 == e2
            }
            (Node::Numeric { text: t1, .. }, Node::Numeric { text: t2, .. }) => t1 == t2,
            (Node::Boolean { value: v1, .. }, Node::Boolean { value: v2, .. }) => v1 == v2,
            (Node::Not { child: c1, .. }, Node::Not { child: c2, .. }) => c1 == c2,
            (Node::And { left: l1, right: r1, .. }, Node::And { left: l2, right: r2, .. }) => l1 == l2 && r1 == r2,
            (Node::Or { left: l1, right: r1, .. }, Node::Or { left: l2, right: r2, .. }) => l1 == l2 && r1 == r2,
            (
                Node::Compare { op: o1, left: l1, right: r1, .. },
                Node::Compare { op: o2, left: l2, right: r2, .. },
            ) => o1 == o2 && l1 == l2 && r1 == r2,
            (
                Node::FunctionCall { name: n1, args: a1, .. },
                Node::FunctionCall { name: n2, args: a2, .. },
            ) => n1 == n2 && a1 == a2,
            _ => false,
        }
    }
}

fn parse_decimal_or_hex(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_string(text: &str, expandable: bool) -> Node {
        Node::String { text: text.to_string(), expandable, span: Span::dummy(), cache: RefCell::new(None) }
    }

    #[test]
    fn arity_matches_invariants() {
        let and = Node::And { left: Box::new(leaf_string("a", false)), right: Box::new(leaf_string("b", false)), span: Span::dummy() };
        assert_eq!(and.arity(), 2);
        let not = Node::Not { child: Box::new(leaf_string("a", false)), span: Span::dummy() };
        assert_eq!(not.arity(), 1);
        let call = Node::FunctionCall { name: FunctionName::Exists, args: vec![leaf_string("a", false)], span: Span::dummy() };
        assert_eq!(call.arity(), 1);
    }

    #[test]
    fn bare_identifier_and_quoted_text_are_equal_strings() {
        assert_eq!(leaf_string("text", false), leaf_string("text", false));
    }

    #[test]
    fn expansion_is_cached_until_reset() {
        let node = leaf_string("$(Foo)", true);
        let mut calls = 0;
        let mut expand = |s: &str| {
            calls += 1;
            format!("expanded:{s}")
        };
        assert_eq!(node.get_expanded_value(&mut expand), "expanded:$(Foo)");
        assert_eq!(node.get_expanded_value(&mut expand), "expanded:$(Foo)");
        assert_eq!(calls, 1);
        node.reset_state();
        assert_eq!(node.get_expanded_value(&mut expand), "expanded:$(Foo)");
        assert_eq!(calls, 2);
    }

    #[test]
    fn numeric_coercion_accepts_decimal_and_hex() {
        let dec = Node::Numeric { text: "16".to_string(), span: Span::dummy() };
        let hex = Node::Numeric { text: "0x10".to_string(), span: Span::dummy() };
        let mut expand = |s: &str| s.to_string();
        assert_eq!(dec.try_numeric(&mut expand), Some(16.0));
        assert_eq!(hex.try_numeric(&mut expand), Some(16.0));
    }
}
