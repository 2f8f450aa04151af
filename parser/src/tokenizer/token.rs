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

use buildcond_span::Span;
use std::fmt;

/// A metadata reference (`%(Name)` or `%(ItemType.Name)`) found while scanning a quoted
/// string's body. Recorded so the parser can apply the same allow-flag checks it would apply
/// to a top-level occurrence, per the "same routines, same cursor" rule for quote-local
/// sub-parses.
#[derive(Clone, Debug, PartialEq)]
pub struct MetadataTrigger {
    pub item_type: Option<String>,
    pub name: String,
    pub span: Span,
}

/// All tokens the scanner can produce. `$(...)`, `@(...)`, `%(...)`, and `'...'` bodies are
/// each scanned eagerly into one composite token, since their internal nesting and quoting
/// rules don't compose with the outer grammar's token stream.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    And,
    Or,
    Not,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// A single `=`, legal only as the first half of a malformed `==`.
    Assign,
    LeftParen,
    RightParen,
    Comma,
    Ident(String),
    /// The textual form of a decimal or hex literal, unparsed.
    Numeric(String),
    /// The full `$(...)` text, delimiters included.
    Property(String),
    Metadata {
        item_type: Option<String>,
        name: String,
        /// The full `%(...)` text, delimiters included.
        text: String,
    },
    /// The full `@(...)` text, delimiters included.
    ItemList(String),
    QuotedString {
        /// The text between the quotes, with metadata/item-list/property escapes intact.
        body: String,
        expandable: bool,
        /// `Some(value)` if the body was recognized as a (possibly `!`-negated) boolean
        /// keyword and nothing else fired inside it.
        boolean_value: Option<bool>,
        metadata_triggers: Vec<MetadataTrigger>,
        item_list_triggers: Vec<Span>,
    },
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "!"),
            Token::Eq => write!(f, "=="),
            Token::Ne => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Le => write!(f, "<="),
            Token::Gt => write!(f, ">"),
            Token::Ge => write!(f, ">="),
            Token::Assign => write!(f, "="),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Numeric(s) => write!(f, "{s}"),
            Token::Property(s) => write!(f, "{s}"),
            Token::Metadata { text, .. } => write!(f, "{text}"),
            Token::ItemList(s) => write!(f, "{s}"),
            Token::QuotedString { body, .. } => write!(f, "'{body}'"),
            Token::Eof => write!(f, "<eof>"),
        }
    }
}

/// A [`Token`] together with the span of source text it was scanned from.
#[derive(Clone, Debug, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}
