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

use bitflags::bitflags;

bitflags! {
    /// Which reference kinds the current syntactic position permits. `ALLOW_PROPERTIES` is
    /// always forced on by [`crate::parse`] regardless of what the caller passes in — every
    /// syntactic position in the grammar permits a property reference.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ParseOptions: u8 {
        const ALLOW_PROPERTIES          = 0b0_0001;
        const ALLOW_ITEM_LISTS          = 0b0_0010;
        const ALLOW_BUILT_IN_METADATA   = 0b0_0100;
        const ALLOW_CUSTOM_METADATA     = 0b0_1000;
        const ALLOW_UNDEFINED_FUNCTIONS = 0b1_0000;

        const ALLOW_ITEM_METADATA = Self::ALLOW_BUILT_IN_METADATA.bits() | Self::ALLOW_CUSTOM_METADATA.bits();
        const ALL =
            Self::ALLOW_PROPERTIES.bits()
            | Self::ALLOW_ITEM_LISTS.bits()
            | Self::ALLOW_ITEM_METADATA.bits()
            | Self::ALLOW_UNDEFINED_FUNCTIONS.bits();
    }
}

impl Default for ParseOptions {
    /// The common case of a standalone condition: every reference kind, undefined functions
    /// rejected.
    fn default() -> Self {
        ParseOptions::ALLOW_PROPERTIES
            | ParseOptions::ALLOW_ITEM_LISTS
            | ParseOptions::ALLOW_ITEM_METADATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_metadata_combines_built_in_and_custom() {
        let combined = ParseOptions::ALLOW_BUILT_IN_METADATA | ParseOptions::ALLOW_CUSTOM_METADATA;
        assert_eq!(combined, ParseOptions::ALLOW_ITEM_METADATA);
    }

    #[test]
    fn default_does_not_allow_undefined_functions() {
        assert!(!ParseOptions::default().contains(ParseOptions::ALLOW_UNDEFINED_FUNCTIONS));
    }
}
