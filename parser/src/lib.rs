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

//! Scans and parses MSBuild-style conditional expressions into a [`buildcond_ast::Node`] tree.
//!
//! ```
//! use buildcond_errors::emitter::Handler;
//! use buildcond_parser::ParseOptions;
//!
//! let (handler, _buf) = Handler::new_with_buf();
//! let node = buildcond_parser::parse("'$(Configuration)' == 'Debug'", ParseOptions::default(), &handler).unwrap();
//! assert_eq!(node.arity(), 2);
//! ```

pub mod lex;
mod options;
mod parser;
mod tokenizer;

pub use options::ParseOptions;

use buildcond_ast::Node;
use buildcond_errors::emitter::Handler;
use buildcond_errors::Result;

/// Parses `source` to a [`Node`] tree under `options`, reporting errors and the one-shot
/// precedence warning on `handler`.
pub fn parse(source: &str, options: ParseOptions, handler: &Handler) -> Result<Node> {
    parser::parse(source, options, handler)
}

/// Parses `source` with the default [`ParseOptions`] and a throwaway buffering handler,
/// discarding any precedence warning — a convenience for callers that only want the tree or the
/// first error and don't care about the side channel.
pub fn try_parse(source: &str) -> Result<Node> {
    let (handler, _buf) = Handler::new_with_buf();
    parse(source, ParseOptions::default(), &handler)
}
