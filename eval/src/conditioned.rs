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

//! The conditioned-properties side table (§4.5): `name -> list-of-values`, preserving
//! duplicates in first-occurrence order. An [`EvaluationState`](crate::EvaluationState)
//! implementation is not required to use this type — `record_conditioned_property` is a plain
//! callback a host can wire to any storage it likes — but it is the concrete collection IDEs
//! that only want "the universe of configurations this project references" can plug in
//! directly, matching the ordered-map idiom the rest of the workspace uses for symbol tables.

use indexmap::IndexMap;

/// `name -> list-of-values`, insertion-ordered on first sight of each name; the value list
/// for one name keeps every occurrence, including repeats.
#[derive(Clone, Debug, Default)]
pub struct ConditionedProperties {
    values: IndexMap<String, Vec<String>>,
}

impl ConditionedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more observed comparison of `name` against `value`.
    pub fn record(&mut self, name: &str, value: &str) {
        self.values.entry(name.to_string()).or_default().push(value.to_string());
    }

    /// The values `name` was compared against, in first-occurrence order, or `&[]` if `name`
    /// was never conditioned on.
    pub fn values_for(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The property names conditioned on, in the order each was first seen.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_first_occurrence_order_across_names() {
        let mut props = ConditionedProperties::new();
        props.record("Configuration", "Debug");
        props.record("Platform", "AnyCPU");
        props.record("Configuration", "Release");
        assert_eq!(props.names().collect::<Vec<_>>(), vec!["Configuration", "Platform"]);
        assert_eq!(props.values_for("Configuration"), &["Debug".to_string(), "Release".to_string()]);
    }

    #[test]
    fn duplicate_values_are_kept_not_deduplicated() {
        let mut props = ConditionedProperties::new();
        props.record("Configuration", "Debug");
        props.record("Configuration", "Debug");
        assert_eq!(props.values_for("Configuration").len(), 2);
    }

    #[test]
    fn unconditioned_name_has_no_values() {
        let props = ConditionedProperties::new();
        assert!(props.values_for("Nope").is_empty());
    }
}
