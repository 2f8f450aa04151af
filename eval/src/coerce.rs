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

//! The ToolsVersion compatibility kludge, isolated behind two predicates so the relational
//! ladder never has to know about it directly, and the numeric/version cross-comparison
//! convention the relational ladder's middle two rungs need.

use buildcond_ast::{Node, Version};

const TOOLS_VERSION_REFERENCE: &str = "$(MSBuildToolsVersion)";
const CURRENT_SENTINEL: &str = "Current";
/// The version `$(MSBuildToolsVersion)` is treated as once it expands to `Current`. An
/// arbitrary-but-documented stand-in for "whatever the running toolset's version is" — see
/// DESIGN.md for why a fixed constant is acceptable here.
const CURRENT_TOOLS_VERSION: [u64; 2] = [17, 0];

fn is_tools_version_current(node: &Node, expanded: &str) -> bool {
    node.get_unexpanded_value() == TOOLS_VERSION_REFERENCE && expanded == CURRENT_SENTINEL
}

/// As [`buildcond_ast::Node::try_numeric`], but a `$(MSBuildToolsVersion)` node that expanded
/// to `"Current"` also coerces, to [`CURRENT_TOOLS_VERSION`]'s numeric form. Equality never
/// calls this; only the relational ladder does (§4.5).
pub(crate) fn try_numeric_compat(node: &Node, expand: &mut dyn FnMut(&str) -> String) -> Option<f64> {
    if let Some(value) = node.try_numeric(expand) {
        return Some(value);
    }
    let expanded = node.get_expanded_value(expand);
    is_tools_version_current(node, &expanded).then(|| CURRENT_TOOLS_VERSION[0] as f64)
}

/// As [`buildcond_ast::Node::try_version`], with the same `$(MSBuildToolsVersion)` special case.
pub(crate) fn try_version_compat(node: &Node, expand: &mut dyn FnMut(&str) -> String) -> Option<Version> {
    if let Some(value) = node.try_version(expand) {
        return Some(value);
    }
    let expanded = node.get_expanded_value(expand);
    is_tools_version_current(node, &expanded).then(|| Version::from_components(CURRENT_TOOLS_VERSION.to_vec()))
}

/// Converts a plain number to a `Version` for cross-type relational comparison (`1 < 2.0`,
/// `$(ToolsVersion) >= 15`). There is no authoritative source for this convention (see
/// DESIGN.md); an integral value becomes a single-component version, a fractional value's
/// textual digits after the point become the second component.
pub(crate) fn numeric_to_version(n: f64) -> Version {
    if n.fract() == 0.0 && n >= 0.0 {
        return Version::from_components(vec![n as u64, 0]);
    }
    let text = format!("{n}");
    Version::parse(&text).unwrap_or_else(|| Version::from_components(vec![n.trunc().max(0.0) as u64]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildcond_span::Span;
    use std::cell::RefCell;

    fn property_node(text: &str) -> Node {
        Node::String { text: text.to_string(), expandable: true, span: Span::dummy(), cache: RefCell::new(None) }
    }

    #[test]
    fn tools_version_current_coerces_to_numeric() {
        let node = property_node(TOOLS_VERSION_REFERENCE);
        let mut expand = |_: &str| CURRENT_SENTINEL.to_string();
        assert_eq!(try_numeric_compat(&node, &mut expand), Some(17.0));
    }

    #[test]
    fn ordinary_property_does_not_get_the_kludge() {
        let node = property_node("$(SomeOtherProperty)");
        let mut expand = |_: &str| CURRENT_SENTINEL.to_string();
        assert_eq!(try_numeric_compat(&node, &mut expand), None);
    }

    #[test]
    fn numeric_to_version_compares_sensibly_with_real_versions() {
        assert!(numeric_to_version(15.0) < Version::parse("16.0").unwrap());
        assert_eq!(numeric_to_version(15.0), Version::parse("15.0").unwrap());
    }
}
