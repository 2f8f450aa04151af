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

//! Resource-keyed diagnostics for the buildcond front-end.
//!
//! Two diagnostic enums, [`ParserError`] and [`EvaluationError`], are each
//! declared through [`create_messages`] and wrapped into one top-level [`Error`]. Diagnostics
//! are reported through the [`emitter`] module's `Handler`/`Emitter` side channel rather than
//! threaded through every recursive-descent call's return type.

mod macros;

pub mod emitter;
mod eval_error;
mod parser_error;

pub use eval_error::EvaluationError;
pub use parser_error::ParserError;

pub type Result<T> = core::result::Result<T, Error>;

/// The single error type crossing the crate boundary, wrapping either diagnostic taxonomy.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl Error {
    pub fn error_code(&self) -> String {
        match self {
            Error::Parser(e) => e.error_code(),
            Error::Evaluation(e) => e.error_code(),
        }
    }
}
