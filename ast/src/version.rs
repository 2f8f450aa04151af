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

use std::cmp::Ordering;
use std::fmt;

/// A dotted version number: one or more non-negative integer components separated by `.`
/// Compared component-wise; a shorter version's missing trailing
/// components are treated as `0`, so `1.0` equals `1.0.0`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Builds a version directly from its components, for the evaluator's numeric/version
    /// cross-comparison (there is no textual lexeme to parse in that case).
    pub fn from_components(components: Vec<u64>) -> Self {
        Version { components }
    }

    /// Parses `text` as a dotted version. Requires at least one `.` so that a bare integer
    /// (e.g. `"16"`) is left to `try_numeric` instead — disambiguating the two coercions per
    /// the coercion ladder's ordering.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if !trimmed.contains('.') {
            return None;
        }
        let mut components = Vec::new();
        for part in trimmed.split('.') {
            components.push(part.parse::<u64>().ok()?);
        }
        Some(Version { components })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", rendered.join("."))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_dot_to_disambiguate_from_a_bare_integer() {
        assert_eq!(Version::parse("16"), None);
        assert!(Version::parse("1.6").is_some());
    }

    #[test]
    fn missing_trailing_components_compare_as_zero() {
        assert_eq!(Version::parse("1.0").unwrap(), Version::parse("1.0.0").unwrap());
    }

    #[test]
    fn compares_component_wise_not_lexically() {
        assert!(Version::parse("1.9").unwrap() < Version::parse("1.10").unwrap());
    }

    #[test]
    fn rejects_non_numeric_components() {
        assert_eq!(Version::parse("1.x"), None);
    }
}
