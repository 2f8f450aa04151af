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

use crate::options::ParseOptions;
use crate::tokenizer::{SpannedToken, Token};
use buildcond_errors::emitter::Handler;
use buildcond_errors::{Error, ParserError, Result};
use buildcond_span::Span;
use std::cell::Cell;
use std::mem;

/// A cursor over the flat token stream produced by the tokenizer, in the `bump`/`check`/`eat`
/// idiom of a hand-written recursive-descent parser: one token of lookahead, no backtracking.
pub(crate) struct ParserContext<'a> {
    pub(crate) handler: &'a Handler,
    pub(crate) options: ParseOptions,
    /// The full source text, kept around for span slicing (diagnostics, boolean-literal
    /// lexemes) and for the precedence warning's message.
    pub(crate) source: &'a str,
    /// Remaining tokens, reversed so the next one is a cheap `.pop()`.
    tokens: Vec<SpannedToken>,
    pub(crate) token: SpannedToken,
    pub(crate) prev_token: SpannedToken,
    /// Set once any parenthesization scope mixed `and` and `or` without disambiguating parens.
    /// Checked once at the end of the top-level parse; see §4.3.5.
    pub(crate) mixed_precedence_seen: Cell<bool>,
}

impl<'a> ParserContext<'a> {
    pub(crate) fn new(handler: &'a Handler, options: ParseOptions, source: &'a str, mut tokens: Vec<SpannedToken>) -> Self {
        tokens.reverse();
        let dummy = SpannedToken { token: Token::Eof, span: Span::dummy() };
        let mut ctx = Self {
            handler,
            options,
            source,
            tokens,
            token: dummy.clone(),
            prev_token: dummy,
            mixed_precedence_seen: Cell::new(false),
        };
        ctx.bump();
        ctx
    }

    /// Advances the cursor by one token.
    pub(crate) fn bump(&mut self) {
        let next = self.tokens.pop().unwrap_or_else(|| SpannedToken { token: Token::Eof, span: self.token.span });
        self.prev_token = mem::replace(&mut self.token, next);
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        &self.token.token == token
    }

    pub(crate) fn eat(&mut self, token: &Token) -> bool {
        let hit = self.check(token);
        if hit {
            self.bump();
        }
        hit
    }

    /// The 1-based position the error model reports for a diagnostic about the current token:
    /// one past the token's last character, matching where the cursor comes to rest once a
    /// mismatch is detected (see [`buildcond_span::Span::one_based_end`]).
    pub(crate) fn error_pos(&self) -> usize {
        self.token.span.one_based_end()
    }

    /// Records `err` on the handler's side channel and returns it as the propagated `Result`,
    /// so a call site can simply `return self.fail(...)`.
    pub(crate) fn fail<T>(&self, err: ParserError) -> Result<T> {
        let err: Error = err.into();
        tracing::debug!(code = %err.error_code(), "parse error");
        self.handler.emit_err(err.clone());
        Err(err)
    }
}
