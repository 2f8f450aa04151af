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

//! Evaluates a parsed [`buildcond_ast::Node`] tree to a `bool` against a host-supplied
//! [`EvaluationState`].
//!
//! ```
//! use buildcond_ast::Node;
//! use buildcond_eval::EvaluationState;
//!
//! struct NoProperties;
//! impl EvaluationState for NoProperties {
//!     fn expand(&mut self, text: &str) -> String { text.to_string() }
//!     fn file_or_directory_exists(&self, _path: &str) -> bool { false }
//! }
//!
//! let (handler, _buf) = buildcond_errors::emitter::Handler::new_with_buf();
//! let ast = buildcond_parser::parse("true", Default::default(), &handler).unwrap();
//! assert_eq!(buildcond_eval::evaluate(&ast, &mut NoProperties).unwrap(), true);
//! ```

mod coerce;
mod conditioned;
mod state;

pub use conditioned::ConditionedProperties;
pub use state::EvaluationState;

use buildcond_ast::{CompareOp, FunctionName, Node};
use buildcond_errors::{EvaluationError, Result};
use coerce::{numeric_to_version, try_numeric_compat, try_version_compat};
use std::cmp::Ordering;

/// Evaluates `node` against `state`. Mirrors `reset_state` being the caller's job between
/// repeated evaluations of one tree (§5): this function never clears expansion caches itself.
pub fn evaluate(node: &Node, state: &mut dyn EvaluationState) -> Result<bool> {
    eval_bool(node, state)
}

/// Clears every `String` node's cached expansion, so the same tree can be evaluated again
/// (against a new or mutated `state`) without stale values leaking across runs.
pub fn reset_state(node: &Node) {
    node.reset_state();
}

fn eval_bool(node: &Node, state: &mut dyn EvaluationState) -> Result<bool> {
    match node {
        Node::Not { child, .. } => Ok(!eval_bool(child, state)?),
        Node::And { left, right, .. } => {
            if !eval_bool(left, state)? {
                return Ok(false);
            }
            eval_bool(right, state)
        }
        Node::Or { left, right, .. } => {
            if eval_bool(left, state)? {
                return Ok(true);
            }
            eval_bool(right, state)
        }
        Node::Compare { op, left, right, .. } => eval_compare(*op, left, right, state),
        Node::FunctionCall { name, args, .. } => eval_function(name, args, state),
        Node::Boolean { .. } | Node::String { .. } | Node::Numeric { .. } => {
            let mut expand = |t: &str| state.expand(t);
            match node.try_bool(&mut expand) {
                Some(value) => Ok(value),
                None => {
                    tracing::debug!(unexpanded = node.get_unexpanded_value(), "does not evaluate to a boolean");
                    let expanded = node.get_expanded_value(&mut expand);
                    Err(EvaluationError::expression_does_not_evaluate_to_boolean(
                        node.get_unexpanded_value().to_string(),
                        expanded,
                    )
                    .into())
                }
            }
        }
    }
}

fn eval_compare(op: CompareOp, left: &Node, right: &Node, state: &mut dyn EvaluationState) -> Result<bool> {
    match op {
        CompareOp::Eq | CompareOp::Ne => {
            record_conditioned_property(left, right, state);
            let equal = eval_equality(left, right, state);
            Ok(if op == CompareOp::Eq { equal } else { !equal })
        }
        _ => eval_relational(op, left, right, state),
    }
}

/// The equality ladder (§4.5): numeric, then boolean, then case-insensitive string. Never
/// fails — anything that coerces to neither number nor boolean still has a string form.
fn eval_equality(left: &Node, right: &Node, state: &mut dyn EvaluationState) -> bool {
    let mut expand = |t: &str| state.expand(t);
    if let (Some(l), Some(r)) = (left.try_numeric(&mut expand), right.try_numeric(&mut expand)) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (left.try_bool(&mut expand), right.try_bool(&mut expand)) {
        return l == r;
    }
    let l = left.get_expanded_value(&mut expand);
    let r = right.get_expanded_value(&mut expand);
    l.eq_ignore_ascii_case(&r)
}

/// The relational ladder (§4.5): numeric-numeric, numeric-version, version-version,
/// version-numeric, in that order, each side coerced through the ToolsVersion-aware
/// [`coerce::try_numeric_compat`]/[`coerce::try_version_compat`].
fn eval_relational(op: CompareOp, left: &Node, right: &Node, state: &mut dyn EvaluationState) -> Result<bool> {
    let mut expand = |t: &str| state.expand(t);
    let ordering = if let (Some(l), Some(r)) = (try_numeric_compat(left, &mut expand), try_numeric_compat(right, &mut expand)) {
        l.partial_cmp(&r)
    } else if let (Some(l), Some(r)) = (try_numeric_compat(left, &mut expand), try_version_compat(right, &mut expand)) {
        numeric_to_version(l).partial_cmp(&r)
    } else if let (Some(l), Some(r)) = (try_version_compat(left, &mut expand), try_version_compat(right, &mut expand)) {
        l.partial_cmp(&r)
    } else if let (Some(l), Some(r)) = (try_version_compat(left, &mut expand), try_numeric_compat(right, &mut expand)) {
        l.partial_cmp(&numeric_to_version(r))
    } else {
        None
    };

    match ordering {
        Some(ord) => Ok(apply_relational_op(op, ord)),
        None => {
            let unexpanded = format!("{} {op} {}", left.get_unexpanded_value(), right.get_unexpanded_value());
            let expanded = format!(
                "{} {op} {}",
                left.get_expanded_value(&mut expand),
                right.get_expanded_value(&mut expand)
            );
            tracing::warn!(%unexpanded, %expanded, "comparison on non-numeric expression");
            Err(EvaluationError::comparison_on_non_numeric_expression(unexpanded, expanded).into())
        }
    }
}

fn apply_relational_op(op: CompareOp, ord: Ordering) -> bool {
    match op {
        CompareOp::Lt => ord == Ordering::Less,
        CompareOp::Le => ord != Ordering::Greater,
        CompareOp::Gt => ord == Ordering::Greater,
        CompareOp::Ge => ord != Ordering::Less,
        CompareOp::Eq | CompareOp::Ne => unreachable!("eval_compare routes equality separately"),
    }
}

/// The conditioned-properties side effect (§4.5): if `left` is a property reference (its
/// expanded value differs from its unexpanded lexeme), record `right`'s literal text under
/// the property's name. A no-op when the host's `state` doesn't override
/// `record_conditioned_property`, and when `left` isn't a property reference at all.
fn record_conditioned_property(left: &Node, right: &Node, state: &mut dyn EvaluationState) {
    let mut expand = |t: &str| state.expand(t);
    let unexpanded = left.get_unexpanded_value().to_string();
    let expanded = left.get_expanded_value(&mut expand);
    if unexpanded == expanded {
        return;
    }
    if let Some(name) = extract_property_name(&unexpanded) {
        let value = right.get_unexpanded_value().to_string();
        state.record_conditioned_property(name, &value);
    }
}

/// Pulls the bare property name out of a `$(Name)` or `$(Name.Method(...))` reference.
/// Returns `None` for anything else (an item list, a multi-property string, etc.) — the
/// conditioned-properties table only ever tracks single whole-property comparisons.
fn extract_property_name(unexpanded: &str) -> Option<&str> {
    let inner = unexpanded.strip_prefix("$(")?.strip_suffix(')')?;
    let name_len = inner.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(inner.len());
    if name_len == 0 {
        return None;
    }
    Some(&inner[..name_len])
}

fn eval_function(name: &FunctionName, args: &[Node], state: &mut dyn EvaluationState) -> Result<bool> {
    match name {
        FunctionName::Exists => eval_exists(&args[0], state),
        FunctionName::HasTrailingSlash => eval_has_trailing_slash(&args[0], state),
        FunctionName::Unknown(name) => Err(EvaluationError::undefined_function_call(name.clone()).into()),
    }
}

/// `Exists(arg)`: `arg` expands to a `;`-separated list of paths (MSBuild's usual item-list
/// separator), each resolved against `state.evaluation_directory()` if relative and probed
/// through `state.file_or_directory_exists`. An empty expansion is not vacuously true — it
/// mirrors the host treating `Exists('')` as `false`.
fn eval_exists(arg: &Node, state: &mut dyn EvaluationState) -> Result<bool> {
    let expanded = {
        let mut expand = |t: &str| state.expand(t);
        arg.get_expanded_value(&mut expand)
    };
    let paths: Vec<&str> = expanded.split(';').map(str::trim).filter(|p| !p.is_empty()).collect();
    if paths.is_empty() {
        return Ok(false);
    }
    let dir = state.evaluation_directory().map(str::to_string);
    Ok(paths
        .into_iter()
        .all(|path| state.file_or_directory_exists(&resolve_path(path, dir.as_deref()))))
}

fn resolve_path(path: &str, dir: Option<&str>) -> String {
    let normalized: String = path
        .chars()
        .map(|c| if c == '/' || c == '\\' { std::path::MAIN_SEPARATOR } else { c })
        .collect();
    if std::path::Path::new(&normalized).is_absolute() {
        return normalized;
    }
    match dir {
        Some(d) => format!("{d}{}{normalized}", std::path::MAIN_SEPARATOR),
        None => normalized,
    }
}

/// `HasTrailingSlash(arg)`: `arg` must expand to a single item.
fn eval_has_trailing_slash(arg: &Node, state: &mut dyn EvaluationState) -> Result<bool> {
    let expanded = {
        let mut expand = |t: &str| state.expand(t);
        arg.get_expanded_value(&mut expand)
    };
    if expanded.contains(';') {
        return Err(EvaluationError::cannot_pass_multiple_items_into_scalar_function(
            "HasTrailingSlash".to_string(),
            arg.get_unexpanded_value().to_string(),
        )
        .into());
    }
    Ok(matches!(expanded.chars().last(), Some(c) if c == '/' || c == '\\' || c == std::path::MAIN_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeState {
        properties: HashMap<String, String>,
        existing_paths: Vec<String>,
        conditioned: ConditionedProperties,
    }

    impl FakeState {
        fn new() -> Self {
            Self { properties: HashMap::new(), existing_paths: Vec::new(), conditioned: ConditionedProperties::new() }
        }

        fn with_property(mut self, name: &str, value: &str) -> Self {
            self.properties.insert(name.to_string(), value.to_string());
            self
        }
    }

    impl EvaluationState for FakeState {
        fn expand(&mut self, text: &str) -> String {
            let mut out = text.to_string();
            for (name, value) in &self.properties {
                out = out.replace(&format!("$({name})"), value);
            }
            out
        }

        fn file_or_directory_exists(&self, path: &str) -> bool {
            self.existing_paths.iter().any(|p| p == path)
        }

        fn record_conditioned_property(&mut self, name: &str, value: &str) {
            self.conditioned.record(name, value);
        }
    }

    fn parse(text: &str) -> Node {
        buildcond_parser::try_parse(text).unwrap()
    }

    #[test]
    fn bare_true_evaluates_to_true() {
        assert!(evaluate(&parse("true"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn hex_equals_decimal() {
        assert!(evaluate(&parse("0x10 == 16"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn case_insensitive_string_equality() {
        assert!(evaluate(&parse("'abc' == 'ABC'"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn negated_and_of_literals() {
        assert!(evaluate(&parse("!('true' and 'false')"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn exists_on_missing_file_is_false() {
        assert!(!evaluate(&parse("Exists('no-such-file')"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn exists_true_when_every_path_present() {
        let mut state = FakeState::new();
        state.existing_paths.push("a.txt".to_string());
        state.existing_paths.push("b.txt".to_string());
        assert!(evaluate(&parse("Exists('a.txt;b.txt')"), &mut state).unwrap());
    }

    #[test]
    fn exists_false_when_any_path_missing() {
        let mut state = FakeState::new();
        state.existing_paths.push("a.txt".to_string());
        assert!(!evaluate(&parse("Exists('a.txt;b.txt')"), &mut state).unwrap());
    }

    #[test]
    fn has_trailing_slash_detects_both_separators() {
        assert!(evaluate(&parse("HasTrailingSlash('foo/')"), &mut FakeState::new()).unwrap());
        assert!(evaluate(&parse(r"HasTrailingSlash('foo\')"), &mut FakeState::new()).unwrap());
        assert!(!evaluate(&parse("HasTrailingSlash('foo')"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn has_trailing_slash_rejects_multiple_items() {
        let err = evaluate(&parse("HasTrailingSlash('a;b')"), &mut FakeState::new()).unwrap_err();
        assert_eq!(
            err.error_code(),
            EvaluationError::cannot_pass_multiple_items_into_scalar_function("", "").error_code()
        );
    }

    #[test]
    fn numeric_relational_ladder() {
        let state = &mut FakeState::new();
        assert!(evaluate(&parse("1 < 2"), state).unwrap());
        assert!(evaluate(&parse("2.0 <= 2"), state).unwrap());
    }

    #[test]
    fn numeric_vs_version_relational() {
        assert!(evaluate(&parse("15 < 15.1"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn version_vs_version_relational() {
        // Three components each so neither side parses as an `f64` (the numeric rung would
        // otherwise win first and compare `1.9 < 1.1`, which is `false`).
        assert!(evaluate(&parse("1.9.0 < 1.10.0"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn non_numeric_relational_comparison_raises() {
        let err = evaluate(&parse("'abc' < 'def'"), &mut FakeState::new()).unwrap_err();
        assert_eq!(
            err.error_code(),
            EvaluationError::comparison_on_non_numeric_expression("", "").error_code()
        );
    }

    #[test]
    fn non_boolean_string_raises_expression_does_not_evaluate_to_boolean() {
        let err = evaluate(&parse("'neither'"), &mut FakeState::new()).unwrap_err();
        assert_eq!(
            err.error_code(),
            EvaluationError::expression_does_not_evaluate_to_boolean("", "").error_code()
        );
    }

    #[test]
    fn and_short_circuits_without_evaluating_right() {
        assert!(!evaluate(&parse("false and 'neither'"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn or_short_circuits_without_evaluating_right() {
        assert!(evaluate(&parse("true or 'neither'"), &mut FakeState::new()).unwrap());
    }

    #[test]
    fn equality_on_a_property_records_conditioned_property() {
        let mut state = FakeState::new().with_property("Configuration", "Debug");
        assert!(evaluate(&parse("'$(Configuration)' == 'Debug'"), &mut state).unwrap());
        assert_eq!(state.conditioned.values_for("Configuration"), &["Debug".to_string()]);
    }

    #[test]
    fn non_property_equality_does_not_record_anything() {
        let mut state = FakeState::new();
        assert!(evaluate(&parse("'Debug' == 'Debug'"), &mut state).unwrap());
        assert!(state.conditioned.is_empty());
    }

    #[test]
    fn reset_state_clears_expansion_cache_between_evaluations() {
        let mut state = FakeState::new().with_property("Flag", "true");
        let ast = parse("$(Flag)");
        assert!(evaluate(&ast, &mut state).unwrap());
        state.properties.insert("Flag".to_string(), "false".to_string());
        reset_state(&ast);
        assert!(!evaluate(&ast, &mut state).unwrap());
    }
}
