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

//! The typed, immutable conditional-expression tree.
//!
//! [`Node`] is a tagged sum rather than an inheritance hierarchy of expression classes — the
//! closed set of kinds dispatches through `match`, never through a vtable, which keeps the
//! coercion path (`try_bool`/`try_numeric`/`try_version`) free of virtual calls.

mod boolean;
mod metadata;
mod node;
mod version;

pub use boolean::parse_boolean_keyword;
pub use metadata::is_built_in_metadata_name;
pub use node::{CompareOp, FunctionName, Node};
pub use version::Version;
