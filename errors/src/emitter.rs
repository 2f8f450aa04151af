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

//! Side-channel diagnostic delivery.
//!
//! Recursive-descent parsing would otherwise have to thread a `Vec<Diagnostic>` through every
//! call signature just to surface the one-shot precedence warning alongside whatever
//! `Result` that call already returns. A [`Handler`] is handed to the parser once and receives
//! diagnostics out of band; callers choose a throwing [`ConsoleEmitter`] (errors propagate via
//! `?` as usual — `Handler` here only tallies and logs them) or a buffering [`BufferEmitter`]
//! (errors and warnings are instead collected for later inspection, the shape tests want).

use crate::Error;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A one-shot, non-fatal diagnostic (currently only `ConditionMaybeEvaluatedIncorrectly`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub key: &'static str,
    pub message: String,
}

impl Warning {
    pub fn condition_maybe_evaluated_incorrectly(expr: impl fmt::Display) -> Self {
        Self {
            key: "ConditionMaybeEvaluatedIncorrectly",
            message: format!(
                "the condition `{expr}` mixes `and` and `or` without parentheses to disambiguate; it may not evaluate as expected"
            ),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Something a [`Handler`] can forward diagnostics to.
pub trait Emitter {
    fn emit_err(&self, err: &Error);
    fn emit_warning(&self, warning: &Warning);
}

/// Logs diagnostics through `tracing` and otherwise does nothing; errors still propagate to the
/// caller normally via the `Result` the parser/evaluator returns.
#[derive(Default, Debug)]
pub struct ConsoleEmitter;

impl Emitter for ConsoleEmitter {
    fn emit_err(&self, err: &Error) {
        tracing::error!(code = %err.error_code(), "{err}");
    }

    fn emit_warning(&self, warning: &Warning) {
        tracing::warn!(key = warning.key, "{warning}");
    }
}

/// Collects diagnostics instead of logging them, for callers (and tests) that want to inspect
/// exactly what was reported.
#[derive(Default, Debug)]
pub struct BufferEmitter {
    errs: RefCell<Vec<Error>>,
    warnings: RefCell<Vec<Warning>>,
}

impl Emitter for BufferEmitter {
    fn emit_err(&self, err: &Error) {
        self.errs.borrow_mut().push(err.clone());
    }

    fn emit_warning(&self, warning: &Warning) {
        self.warnings.borrow_mut().push(warning.clone());
    }
}

impl Emitter for Rc<BufferEmitter> {
    fn emit_err(&self, err: &Error) {
        self.as_ref().emit_err(err);
    }

    fn emit_warning(&self, warning: &Warning) {
        self.as_ref().emit_warning(warning);
    }
}

impl BufferEmitter {
    pub fn extract_errs(&self) -> Vec<Error> {
        self.errs.borrow_mut().drain(..).collect()
    }

    pub fn extract_warnings(&self) -> Vec<Warning> {
        self.warnings.borrow_mut().drain(..).collect()
    }
}

/// Side channel for errors and the precedence-conflict warning.
pub struct Handler {
    emitter: Box<dyn Emitter>,
    err_count: Cell<usize>,
}

impl Handler {
    pub fn new(emitter: Box<dyn Emitter>) -> Self {
        Self { emitter, err_count: Cell::new(0) }
    }

    /// A handler wired to a shared [`BufferEmitter`], for callers that want to read back what
    /// was emitted (the try-mode and test-harness shape).
    pub fn new_with_buf() -> (Self, Rc<BufferEmitter>) {
        let buf = Rc::new(BufferEmitter::default());
        (Self::new(Box::new(buf.clone())), buf)
    }

    pub fn with(emitter: Box<dyn Emitter>) -> Self {
        Self::new(emitter)
    }

    pub fn emit_err(&self, err: Error) {
        self.err_count.set(self.err_count.get() + 1);
        self.emitter.emit_err(&err);
    }

    pub fn emit_warning(&self, warning: Warning) {
        self.emitter.emit_warning(&warning);
    }

    pub fn had_errors(&self) -> bool {
        self.err_count.get() > 0
    }

    /// Records `result`'s error (if any) on the side channel, then returns `result` unchanged,
    /// so a single expression can both emit and propagate.
    pub fn extend_if_error<T>(&self, result: crate::Result<T>) -> crate::Result<T> {
        if let Err(e) = &result {
            self.emit_err(e.clone());
        }
        result
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new(Box::new(ConsoleEmitter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParserError;

    #[test]
    fn buffered_handler_collects_without_panicking() {
        let (handler, buf) = Handler::new_with_buf();
        handler.emit_err(ParserError::ill_formed_equals(6).into());
        handler.emit_warning(Warning::condition_maybe_evaluated_incorrectly("$(a)==1 or $(b)==2 and $(c)==3"));
        assert!(handler.had_errors());
        assert_eq!(buf.extract_errs().len(), 1);
        assert_eq!(buf.extract_warnings().len(), 1);
        // Draining empties the buffer.
        assert_eq!(buf.extract_errs().len(), 0);
    }
}
