//! Lexer for tlisp using logos
//!
//! Converts source text into tokens. Keywords (`main`, `defun`, `defvar`)
//! are ordinary identifiers here; the parser gives them meaning by position.
//!
//! Every non-whitespace character starts some token rule, so the lexer's
//! `UnrecognizedInput` fallback is never produced.
use crate::ast::Span;
use crate::error::{LexError, ParseError};
use logos::{FilterResult, Lexer, Logos, SpannedIter};
use std::fmt;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Delimiters
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    // Literals
    #[regex(r"[0-9]+", parse_int, priority = 3)]
    Int(i32),

    #[regex(r#""[^"]*""#, string_contents)]
    #[regex(r#""[^"]*"#, unterminated_string)]
    Str(String),

    // Identifiers, keywords and atoms such as `true` or `b101101`.
    // An identifier never starts with `//` or `/*`, so comments only
    // compete with each other at a token boundary.
    #[regex(r#"[^ \t\r\n\f()"/][^ \t\r\n\f()"]*"#, |lex| lex.slice().to_string())]
    #[regex(r#"/[^ \t\r\n\f()"*/][^ \t\r\n\f()"]*"#, |lex| lex.slice().to_string())]
    #[regex(r"/", |lex| lex.slice().to_string())]
    Ident(String),

    /// `/* ... */`, consumed by its callback and never emitted
    #[token("/*", block_comment)]
    BlockComment,
}

fn block_comment(lex: &mut Lexer<Token>) -> FilterResult<(), LexError> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexError::UnterminatedComment)
        }
    }
}

fn parse_int(lex: &mut Lexer<Token>) -> Result<i32, LexError> {
    // the regex only admits digits, so a failed parse is always overflow
    lex.slice().parse().map_err(|_| LexError::IntegerOverflow)
}

fn string_contents(lex: &mut Lexer<Token>) -> String {
    let s = lex.slice();
    s[1..s.len() - 1].to_string()
}

fn unterminated_string(_lex: &mut Lexer<Token>) -> Result<String, LexError> {
    Err(LexError::UnterminatedString)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::Int(n) => write!(f, "integer `{}`", n),
            Token::Str(s) => write!(f, "string \"{}\"", s),
            Token::Ident(name) => write!(f, "identifier `{}`", name),
            Token::BlockComment => write!(f, "block comment"),
        }
    }
}

/// Lazy, left-to-right stream of tokens tagged with their source spans
pub struct TokenStream<'src> {
    inner: SpannedIter<'src, Token>,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        TokenStream {
            inner: Token::lexer(source).spanned(),
        }
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Result<(Token, Span), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (result, range) = self.inner.next()?;
        let span = Span::from(range);
        Some(
            result
                .map(|token| (token, span))
                .map_err(|error| ParseError::Lex { error, span }),
        )
    }
}

/// Tokenize `source` lazily
pub fn tokenize(source: &str) -> TokenStream<'_> {
    TokenStream::new(source)
}
