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

pub(crate) mod context;
mod grammar;

use crate::options::ParseOptions;
use crate::tokenizer::tokenize;
use buildcond_ast::Node;
use buildcond_errors::emitter::Handler;
use buildcond_errors::Result;
use context::ParserContext;

/// Tokenizes `source` and parses it to a [`Node`] under `options`. Errors and the one-shot
/// precedence warning are reported on `handler` as well as returned/propagated; `options`
/// always has `ALLOW_PROPERTIES` forced on, since every syntactic position admits a property
/// reference regardless of what the caller passed.
pub(crate) fn parse(source: &str, options: ParseOptions, handler: &Handler) -> Result<Node> {
    let options = options | ParseOptions::ALLOW_PROPERTIES;
    let tokens = handler.extend_if_error(tokenize(source))?;
    let mut ctx = ParserContext::new(handler, options, source, tokens);
    ctx.parse_program()
}
