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

/// The fixed set of reserved, well-known metadata names.
/// Anything else is custom metadata, gated by a different parse option.
const BUILT_IN_METADATA_NAMES: &[&str] = &[
    "Identity",
    "FullPath",
    "RootDir",
    "Filename",
    "Extension",
    "RelativeDir",
    "Directory",
    "RecursiveDir",
    "ModifiedTime",
    "CreatedTime",
    "AccessedTime",
    "DefiningProjectFullPath",
    "DefiningProjectDirectory",
    "DefiningProjectName",
    "DefiningProjectExtension",
];

/// `true` iff `name` (case-insensitive) is one of the reserved built-in metadata names.
pub fn is_built_in_metadata_name(name: &str) -> bool {
    BUILT_IN_METADATA_NAMES.iter().any(|n| n.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_built_ins_case_insensitively() {
        assert!(is_built_in_metadata_name("FullPath"));
        assert!(is_built_in_metadata_name("fullpath"));
        assert!(is_built_in_metadata_name("RECURSIVEDIR"));
    }

    #[test]
    fn custom_names_are_not_built_in() {
        assert!(!is_built_in_metadata_name("MyCustomMetadata"));
    }
}
