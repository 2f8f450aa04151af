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

//! Flattens an expression string into a token stream.
//!
//! `$(...)`, `@(...)`, `%(...)`, and `'...'` bodies are each scanned eagerly into one
//! composite token apiece (see [`lexer::tokenize`]) since their internal nesting/quoting rules
//! don't compose with the outer token grammar the recursive-descent parser walks.

pub(crate) mod lexer;
pub(crate) mod token;

pub(crate) use lexer::tokenize;
pub(crate) use token::{MetadataTrigger, SpannedToken, Token};
