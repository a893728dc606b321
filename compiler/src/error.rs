//! Error types for the tlisp front end

use crate::ast::Span;
use thiserror::Error;

/// Lexical errors, produced while tokenizing
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
pub enum LexError {
    /// A `"` with no closing `"` before end of input
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A digit run outside the signed 32-bit range
    #[error("integer literal does not fit in 32 bits")]
    IntegerOverflow,

    /// A `/*` with no closing `*/` before end of input
    #[error("unterminated block comment")]
    UnterminatedComment,

    /// Input no token rule accepts. Every character other than whitespace
    /// starts some rule, so the lexer never yields this; logos requires a
    /// default error value.
    #[default]
    #[error("unrecognized input")]
    UnrecognizedInput,
}

/// Parse errors. The parser is fail-fast: the first one aborts the parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{error}")]
    Lex { error: LexError, span: Span },

    /// Top-level form whose head is not `main`, `defun` or `defvar`
    #[error("expected `main`, `defun` or `defvar`, found {found}")]
    UnexpectedTopLevelForm { found: String, span: Span },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// A `)` with no open form to close
    #[error("unbalanced parentheses: `)` has no matching `(`")]
    UnbalancedParens { span: Span },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String, offset: usize },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex { span, .. }
            | ParseError::UnexpectedTopLevelForm { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::UnbalancedParens { span } => *span,
            ParseError::UnexpectedEndOfInput { offset, .. } => Span::new(*offset, *offset),
        }
    }

    /// Byte offset of the offending character
    pub fn offset(&self) -> usize {
        self.span().start
    }

    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Lex {
                error: LexError::UnterminatedString,
                ..
            } => "E0001",
            ParseError::Lex {
                error: LexError::IntegerOverflow,
                ..
            } => "E0002",
            ParseError::Lex {
                error: LexError::UnrecognizedInput,
                ..
            } => "E0003",
            ParseError::UnexpectedTopLevelForm { .. } => "E0004",
            ParseError::UnexpectedToken { .. } => "E0005",
            ParseError::UnbalancedParens { .. } => "E0006",
            ParseError::UnexpectedEndOfInput { .. } => "E0007",
            ParseError::Lex {
                error: LexError::UnterminatedComment,
                ..
            } => "E0008",
        }
    }

    /// Short text attached to the source label in rendered diagnostics
    pub fn label(&self) -> String {
        match self {
            ParseError::Lex { error, .. } => error.to_string(),
            ParseError::UnexpectedTopLevelForm { .. } => "unknown top-level form".to_string(),
            ParseError::UnexpectedToken { expected, .. } => format!("expected {}", expected),
            ParseError::UnbalancedParens { .. } => "unmatched `)`".to_string(),
            ParseError::UnexpectedEndOfInput { .. } => "input ends here".to_string(),
        }
    }
}
