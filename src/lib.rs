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

//! A scanner, recursive-descent parser, typed expression tree, evaluator, and escaping codec
//! for MSBuild-style conditional expressions — the predicates that gate targets, property
//! groups, item groups, and tasks in a build (`'$(Configuration)' == 'Debug' and Exists('foo')`).
//!
//! This crate is a thin façade: each concern lives in its own workspace member and is
//! re-exported here. Reach for the sub-crates directly if you only need one piece (e.g. just
//! the escaping codec); use this crate for the common case of parsing and then evaluating one
//! expression.
//!
//! ```
//! use buildcond::{EvaluationState, Handler, ParseOptions};
//!
//! struct Env;
//! impl EvaluationState for Env {
//!     fn expand(&mut self, text: &str) -> String { text.replace("$(Configuration)", "Debug") }
//!     fn file_or_directory_exists(&self, _path: &str) -> bool { false }
//! }
//!
//! let (handler, _buf) = Handler::new_with_buf();
//! let ast = buildcond::parse("'$(Configuration)' == 'Debug'", ParseOptions::default(), &handler).unwrap();
//! assert!(buildcond::evaluate(&ast, &mut Env).unwrap());
//! ```

pub use buildcond_ast::{CompareOp, FunctionName, Node, Version};
pub use buildcond_errors::emitter::{BufferEmitter, ConsoleEmitter, Emitter, Handler, Warning};
pub use buildcond_errors::{Error, EvaluationError, ParserError, Result};
pub use buildcond_escape::{contains_reserved_characters, escape, escape_cached, unescape_all};
pub use buildcond_eval::{evaluate, reset_state, ConditionedProperties, EvaluationState};
pub use buildcond_parser::{parse, try_parse, ParseOptions};

/// Parses `source` under `options` and immediately evaluates the result against `state`, the
/// one-call shape most callers that don't need to cache the tree actually want. Both stages
/// are logged at the driver level (crate boundary), matching the host's convention of
/// tracing pipeline stages in its outermost command/driver layer rather than deep inside each
/// pass.
pub fn parse_and_evaluate(
    source: &str,
    options: ParseOptions,
    handler: &Handler,
    state: &mut dyn EvaluationState,
) -> Result<bool> {
    tracing::debug!(source, "parsing conditional expression");
    let ast = parse(source, options, handler)?;
    tracing::debug!("evaluating conditional expression");
    evaluate(&ast, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    /// Surfaces `tracing::debug!` output from [`parse_and_evaluate`] under `RUST_LOG=debug
    /// cargo test -- --nocapture`; a no-op otherwise since `try_init` only wins the race once.
    fn init_test_tracing() {
        let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).without_time().try_init();
    }

    struct NoProperties;
    impl EvaluationState for NoProperties {
        fn expand(&mut self, text: &str) -> String {
            text.to_string()
        }
        fn file_or_directory_exists(&self, _path: &str) -> bool {
            false
        }
    }

    #[test]
    fn parse_then_evaluate_round_trip() {
        let (handler, _buf) = Handler::new_with_buf();
        let ast = parse("true", ParseOptions::default(), &handler).unwrap();
        assert!(evaluate(&ast, &mut NoProperties).unwrap());
    }

    #[test]
    fn try_parse_surfaces_the_first_error() {
        let err = try_parse("1234=5678").unwrap_err();
        assert_eq!(err.error_code(), ParserError::ill_formed_equals(6).error_code());
    }

    #[test]
    fn escaping_round_trips_through_the_facade() {
        let s = "50% $(Foo)";
        assert_eq!(unescape_all(&escape(s), false), s);
    }

    #[test]
    fn parse_and_evaluate_does_both_steps_in_one_call() {
        init_test_tracing();
        let (handler, _buf) = Handler::new_with_buf();
        assert!(parse_and_evaluate("true", ParseOptions::default(), &handler, &mut NoProperties).unwrap());
    }
}
