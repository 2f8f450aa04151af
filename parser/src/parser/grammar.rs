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

//! The recursive-descent grammar itself:
//!
//! ```text
//! Expr      := AndExpr ( 'or' AndExpr )*
//! AndExpr   := CmpExpr ( 'and' CmpExpr )*
//! CmpExpr   := Unary ( RelOp Unary )?
//! Unary     := '!' Unary | '(' Expr ')' | FunCallOrId | Argument
//! Argument  := Property | Metadata | ItemList | Quoted | Number | Ident
//! ```
//!
//! `or` is lowest precedence, `and` next, comparisons bind tighter still and are
//! non-associative (at most one per `CmpExpr`), then unary `!`, then primaries.

use crate::options::ParseOptions;
use crate::parser::context::ParserContext;
use crate::tokenizer::Token;
use buildcond_ast::{CompareOp, FunctionName, Node};
use buildcond_errors::emitter::Warning;
use buildcond_errors::{ParserError, Result};
use buildcond_span::Span;
use std::cell::RefCell;

impl<'a> ParserContext<'a> {
    /// Parses one whole expression and confirms nothing is left over.
    pub(crate) fn parse_program(&mut self) -> Result<Node> {
        let node = self.parse_expr()?;
        if !self.check(&Token::Eof) {
            let found = self.token.token.to_string();
            return self.fail(ParserError::unexpected_token(self.error_pos(), found, "end of expression"));
        }
        if self.mixed_precedence_seen.get() {
            self.handler.emit_warning(Warning::condition_maybe_evaluated_incorrectly(self.source));
        }
        Ok(node)
    }

    fn parse_expr(&mut self) -> Result<Node> {
        let (mut node, mut and_seen) = self.parse_and_expr()?;
        let mut or_seen = false;
        while self.check(&Token::Or) {
            self.bump();
            or_seen = true;
            let (right, and_seen_rhs) = self.parse_and_expr()?;
            and_seen = and_seen || and_seen_rhs;
            let span = node.span() + right.span();
            node = Node::Or { left: Box::new(node), right: Box::new(right), span };
        }
        if or_seen && and_seen {
            self.mixed_precedence_seen.set(true);
        }
        Ok(node)
    }

    /// Returns the parsed node together with whether an `and` was consumed at this scope, so
    /// [`Self::parse_expr`] can detect unparenthesized `and`/`or` mixing (§4.3.5). A nested
    /// `(...)` group starts a fresh [`Self::parse_expr`] call, so its own mixing bookkeeping
    /// never leaks into the scope that contains it.
    fn parse_and_expr(&mut self) -> Result<(Node, bool)> {
        let mut node = self.parse_cmp_expr()?;
        let mut and_seen = false;
        while self.check(&Token::And) {
            self.bump();
            and_seen = true;
            let right = self.parse_cmp_expr()?;
            let span = node.span() + right.span();
            node = Node::And { left: Box::new(node), right: Box::new(right), span };
        }
        Ok((node, and_seen))
    }

    fn parse_cmp_expr(&mut self) -> Result<Node> {
        let left = self.parse_unary()?;
        if let Some(op) = self.eat_compare_op() {
            let right = self.parse_unary()?;
            let span = left.span() + right.span();
            return Ok(Node::Compare { op, left: Box::new(left), right: Box::new(right), span });
        }
        if self.check(&Token::Assign) {
            return self.fail(ParserError::ill_formed_equals(self.error_pos()));
        }
        Ok(left)
    }

    fn eat_compare_op(&mut self) -> Option<CompareOp> {
        let op = match self.token.token {
            Token::Eq => CompareOp::Eq,
            Token::Ne => CompareOp::Ne,
            Token::Lt => CompareOp::Lt,
            Token::Le => CompareOp::Le,
            Token::Gt => CompareOp::Gt,
            Token::Ge => CompareOp::Ge,
            _ => return None,
        };
        self.bump();
        Some(op)
    }

    fn parse_unary(&mut self) -> Result<Node> {
        match &self.token.token {
            Token::Not => {
                let start = self.token.span;
                self.bump();
                let child = self.parse_unary()?;
                let span = start + child.span();
                Ok(Node::Not { child: Box::new(child), span })
            }
            Token::LeftParen => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect_right_paren()?;
                Ok(inner)
            }
            Token::Ident(_) => self.parse_fun_call_or_ident(),
            _ => self.parse_argument(),
        }
    }

    fn expect_right_paren(&mut self) -> Result<()> {
        if self.eat(&Token::RightParen) {
            Ok(())
        } else {
            let found = self.token.token.to_string();
            self.fail(ParserError::unexpected_token(self.error_pos(), found, "`)`"))
        }
    }

    /// An identifier, which is either a function call (if followed by `(`) or a bare `Ident`
    /// primary (a boolean keyword or a plain string).
    fn parse_fun_call_or_ident(&mut self) -> Result<Node> {
        let name_span = self.token.span;
        let name = match &self.token.token {
            Token::Ident(name) => name.clone(),
            _ => unreachable!("caller checked Token::Ident"),
        };
        self.bump();
        if self.check(&Token::LeftParen) {
            self.parse_function_call(name, name_span)
        } else {
            Ok(make_ident_leaf(name, name_span))
        }
    }

    fn parse_function_call(&mut self, name: String, name_span: Span) -> Result<Node> {
        self.bump(); // consume '('
        let mut args = Vec::new();
        if !self.check(&Token::RightParen) {
            loop {
                args.push(self.parse_argument()?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                break;
            }
        }
        self.expect_right_paren()?;
        let span = name_span + self.prev_token.span;

        let resolved = FunctionName::resolve(&name);
        if matches!(resolved, FunctionName::Unknown(_)) && !self.options.contains(ParseOptions::ALLOW_UNDEFINED_FUNCTIONS) {
            return self.fail(ParserError::undefined_function_call(name_span.one_based_end(), name));
        }
        if let Some(expected) = resolved.declared_arity() {
            if expected != args.len() {
                return self.fail(ParserError::incorrect_number_of_function_arguments(
                    name_span.one_based_end(),
                    name,
                    expected,
                    args.len(),
                ));
            }
        }
        Ok(Node::FunctionCall { name: resolved, args, span })
    }

    /// `Argument := Property | Metadata | ItemList | Quoted | Number | Ident`. Deliberately
    /// narrower than [`Self::parse_unary`]: function arguments and the bodies the grammar calls
    /// out as `Argument` never admit `!`, parenthesization, or a nested function call.
    fn parse_argument(&mut self) -> Result<Node> {
        let span = self.token.span;
        match self.token.token.clone() {
            Token::Numeric(text) => {
                self.bump();
                Ok(Node::Numeric { text, span })
            }
            Token::Property(text) => {
                self.bump();
                Ok(expandable_string(text, span))
            }
            Token::Metadata { name, text, .. } => {
                self.bump();
                self.check_metadata_allowed(&name, span)?;
                Ok(expandable_string(text, span))
            }
            Token::ItemList(text) => {
                self.bump();
                self.check_item_list_allowed(span)?;
                Ok(expandable_string(text, span))
            }
            Token::QuotedString { body, expandable, boolean_value, metadata_triggers, item_list_triggers } => {
                self.bump();
                for trigger in &item_list_triggers {
                    self.check_item_list_allowed(*trigger)?;
                }
                for trigger in &metadata_triggers {
                    self.check_metadata_allowed(&trigger.name, trigger.span)?;
                }
                match boolean_value {
                    Some(value) => Ok(Node::Boolean { value, text: span.slice(self.source).to_string(), span }),
                    None => Ok(Node::String { text: body, expandable, span, cache: RefCell::new(None) }),
                }
            }
            Token::Ident(name) => {
                self.bump();
                Ok(make_ident_leaf(name, span))
            }
            other => {
                let found = other.to_string();
                self.fail(ParserError::unexpected_token(self.error_pos(), found, "an operand"))
            }
        }
    }

    fn check_item_list_allowed(&self, span: Span) -> Result<()> {
        if self.options.contains(ParseOptions::ALLOW_ITEM_LISTS) {
            Ok(())
        } else {
            self.fail(ParserError::item_list_not_allowed(span.one_based_end()))
        }
    }

    fn check_metadata_allowed(&self, name: &str, span: Span) -> Result<()> {
        let builtin_ok = self.options.contains(ParseOptions::ALLOW_BUILT_IN_METADATA);
        let custom_ok = self.options.contains(ParseOptions::ALLOW_CUSTOM_METADATA);
        if !builtin_ok && !custom_ok {
            return self.fail(ParserError::item_metadata_not_allowed(span.one_based_end()));
        }
        let is_built_in = buildcond_ast::is_built_in_metadata_name(name);
        if is_built_in && !builtin_ok {
            return self.fail(ParserError::built_in_metadata_not_allowed(span.one_based_end(), name.to_string()));
        }
        if !is_built_in && !custom_ok {
            return self.fail(ParserError::custom_metadata_not_allowed(span.one_based_end(), name.to_string()));
        }
        Ok(())
    }
}

fn expandable_string(text: String, span: Span) -> Node {
    Node::String { text, expandable: true, span, cache: RefCell::new(None) }
}

/// A bare identifier is a boolean keyword if it matches one, else a non-expandable string.
fn make_ident_leaf(name: String, span: Span) -> Node {
    match buildcond_ast::parse_boolean_keyword(&name) {
        Some(value) => Node::Boolean { value, text: name, span },
        None => Node::String { text: name, expandable: false, span, cache: RefCell::new(None) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseOptions;
    use buildcond_errors::emitter::Handler;

    fn parse_ok(text: &str, options: ParseOptions) -> Node {
        let (handler, _buf) = Handler::new_with_buf();
        crate::parse(text, options, &handler).unwrap()
    }

    fn parse_err(text: &str, options: ParseOptions) -> buildcond_errors::Error {
        let (handler, _buf) = Handler::new_with_buf();
        crate::parse(text, options, &handler).unwrap_err()
    }

    #[test]
    fn bare_true_parses_to_boolean() {
        assert_eq!(parse_ok("true", ParseOptions::ALL), Node::Boolean { value: true, text: "true".into(), span: Span::dummy() });
    }

    #[test]
    fn hex_vs_decimal_equality_nodes() {
        let node = parse_ok("0x10 == 16", ParseOptions::ALL);
        match node {
            Node::Compare { op: CompareOp::Eq, .. } => {}
            other => panic!("expected Compare(Eq), got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_not_and() {
        let node = parse_ok("!('true' and 'false')", ParseOptions::ALL);
        assert!(matches!(node, Node::Not { .. }));
    }

    #[test]
    fn unbalanced_paren_reports_unexpected_token_at_position_six() {
        let err = parse_err("1==(2", ParseOptions::ALL);
        assert_eq!(err.error_code(), ParserError::unexpected_token(6, "", "").error_code());
        assert!(format!("{err}").contains('6'));
    }

    #[test]
    fn single_equals_reports_ill_formed_equals_at_position_six() {
        let err = parse_err("1234=5678", ParseOptions::ALL);
        assert_eq!(err.error_code(), ParserError::ill_formed_equals(6).error_code());
        assert!(format!("{err}").contains('6'));
    }

    #[test]
    fn boundary_space_in_property_name() {
        let opts = ParseOptions::ALLOW_PROPERTIES;
        let err = parse_err("$( x)", opts);
        assert_eq!(err.error_code(), ParserError::ill_formed_space(6).error_code());
    }

    #[test]
    fn item_list_disallowed() {
        let opts = ParseOptions::ALLOW_PROPERTIES;
        let err = parse_err("@(foo) == 'a'", opts);
        assert_eq!(err.error_code(), ParserError::item_list_not_allowed(7).error_code());
    }

    #[test]
    fn mixed_and_or_without_parens_warns_once() {
        let (handler, buf) = Handler::new_with_buf();
        crate::parse("$(a)==1 or $(b)==2 and $(c)==3", ParseOptions::ALL, &handler).unwrap();
        assert_eq!(buf.extract_warnings().len(), 1);
    }

    #[test]
    fn parenthesized_mix_does_not_warn() {
        let (handler, buf) = Handler::new_with_buf();
        crate::parse("($(a)==1 or $(b)==2) and $(c)==3", ParseOptions::ALL, &handler).unwrap();
        assert_eq!(buf.extract_warnings().len(), 0);
    }

    #[test]
    fn quoted_boolean_literal_is_negated() {
        let node = parse_ok("'!TrUe'", ParseOptions::ALL);
        assert_eq!(node, Node::Boolean { value: false, text: String::new(), span: Span::dummy() });
    }

    #[test]
    fn exists_with_wrong_arity_is_rejected() {
        let err = parse_err("Exists('a', 'b')", ParseOptions::ALL);
        assert_eq!(
            err.error_code(),
            ParserError::incorrect_number_of_function_arguments(1, "", 0, 0).error_code()
        );
    }

    #[test]
    fn unknown_function_rejected_by_default() {
        let opts = ParseOptions::ALL & !ParseOptions::ALLOW_UNDEFINED_FUNCTIONS;
        let err = parse_err("MadeUpFunction('a')", opts);
        assert_eq!(err.error_code(), ParserError::undefined_function_call(1, "").error_code());
    }

    #[test]
    fn unknown_function_deferred_when_allowed() {
        let node = parse_ok("MadeUpFunction('a', 'b')", ParseOptions::ALL);
        assert!(matches!(node, Node::FunctionCall { name: FunctionName::Unknown(_), .. }));
    }
}
