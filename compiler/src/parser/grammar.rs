//! Grammar rules for tlisp
//!
//! Recursive descent over a one-token lookahead for the top-level forms.
//! Nested calls inside a value are parsed with an explicit stack instead of
//! recursion, so nesting depth is bounded by memory rather than the thread
//! stack. Each node is built only after all of its children parsed, so a
//! failure never leaves a partially built tree behind.
//!
//! ```text
//! Program    := DefOrMain*
//! DefOrMain  := FnDecl | VarDecl | Main
//! Main       := "(" "main" "(" ")" Value ")"
//! FnDecl     := "(" "defun" Identifier "(" Identifier* ")" Value ")"
//! VarDecl    := "(" "defvar" Identifier Value ")"
//! Value      := Int | Str | FnCall | Atom
//! FnCall     := "(" Identifier Value* ")"
//! ```
use super::lexer::{Token, TokenStream};
use crate::ast::*;
use crate::error::ParseError;
use std::iter::Peekable;
use tracing::trace;

pub const KW_MAIN: &str = "main";
pub const KW_DEFUN: &str = "defun";
pub const KW_DEFVAR: &str = "defvar";

type Spanned = (Token, Span);

pub struct Parser<'src> {
    tokens: Peekable<TokenStream<'src>>,
    /// Offset reported when input runs out mid-rule
    eof: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Parser {
            tokens: TokenStream::new(source).peekable(),
            eof: source.len(),
        }
    }

    /// Program := DefOrMain*
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut forms = Vec::new();
        while self.peek()?.is_some() {
            let form = self.parse_def_or_main()?;
            let span = form.span();
            trace!(start = span.start, end = span.end, "parsed top-level form");
            forms.push(form);
        }
        Ok(Program { forms })
    }

    /// A single value followed by end of input
    pub fn parse_standalone_value(&mut self) -> Result<Value, ParseError> {
        let value = self.parse_value()?;
        match self.tokens.next() {
            None => Ok(value),
            Some(Ok((token, span))) => Err(unexpected("end of input", &token, span)),
            Some(Err(err)) => Err(err),
        }
    }

    /// DefOrMain := FnDecl | VarDecl | Main
    ///
    /// The identifier after the opening `(` picks the rule, so no
    /// backtracking is needed between the three forms.
    fn parse_def_or_main(&mut self) -> Result<DefOrMain, ParseError> {
        let open = match self.advance("`(`")? {
            (Token::LParen, span) => span,
            (Token::RParen, span) => return Err(ParseError::UnbalancedParens { span }),
            (token, span) => return Err(unexpected("`(`", &token, span)),
        };

        match self.advance("`main`, `defun` or `defvar`")? {
            (Token::Ident(kw), _) if kw == KW_MAIN => self.parse_main(open).map(DefOrMain::Main),
            (Token::Ident(kw), _) if kw == KW_DEFUN => {
                self.parse_fn_decl(open).map(DefOrMain::FnDecl)
            }
            (Token::Ident(kw), _) if kw == KW_DEFVAR => {
                self.parse_var_decl(open).map(DefOrMain::VarDecl)
            }
            (token, span) => Err(ParseError::UnexpectedTopLevelForm {
                found: token.to_string(),
                span,
            }),
        }
    }

    /// Main := "(" "main" "(" ")" Value ")"
    fn parse_main(&mut self, open: Span) -> Result<Main, ParseError> {
        self.expect(Token::LParen, "`(` opening the empty argument list of `main`")?;
        self.expect(Token::RParen, "`)`, `main` takes no arguments")?;
        let body = self.parse_value()?;
        let close = self.expect_close()?;
        Ok(Main {
            body,
            span: open.to(close),
        })
    }

    /// FnDecl := "(" "defun" Identifier "(" Identifier* ")" Value ")"
    fn parse_fn_decl(&mut self, open: Span) -> Result<FnDecl, ParseError> {
        let name = self.identifier("function name")?;
        self.expect(Token::LParen, "`(` opening the argument list")?;

        let mut args = Vec::new();
        loop {
            match self.advance("argument name or `)`")? {
                (Token::RParen, _) => break,
                (Token::Ident(arg), _) => args.push(arg),
                (token, span) => return Err(unexpected("argument name or `)`", &token, span)),
            }
        }

        let body = self.parse_value()?;
        let close = self.expect_close()?;
        Ok(FnDecl {
            name,
            args,
            body,
            span: open.to(close),
        })
    }

    /// VarDecl := "(" "defvar" Identifier Value ")"
    fn parse_var_decl(&mut self, open: Span) -> Result<VarDecl, ParseError> {
        let name = self.identifier("variable name")?;
        let value = self.parse_value()?;
        let close = self.expect_close()?;
        Ok(VarDecl {
            name,
            value,
            span: open.to(close),
        })
    }

    /// Value := Int | Str | FnCall | Atom
    /// FnCall := "(" Identifier Value* ")"
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        // calls whose `)` has not been seen yet, innermost last
        let mut open_calls: Vec<FnCall> = Vec::new();

        loop {
            let mut finished = match self.advance("a value")? {
                (Token::Int(n), span) => Some(Value::Int(n, span)),
                (Token::Str(s), span) => Some(Value::Str(s, span)),
                (Token::Ident(name), span) => Some(Value::Atom(name, span)),
                (Token::LParen, open) => {
                    let name = self.identifier("function name")?;
                    open_calls.push(FnCall {
                        name,
                        args: Vec::new(),
                        span: open,
                    });
                    self.close_call(&mut open_calls)?
                }
                (token, span) => return Err(unexpected("a value", &token, span)),
            };

            while let Some(value) = finished {
                match open_calls.last_mut() {
                    Some(call) => call.args.push(value),
                    None => return Ok(value),
                }
                finished = self.close_call(&mut open_calls)?;
            }
        }
    }

    /// If a `)` follows, pop and return the innermost open call
    fn close_call(&mut self, open_calls: &mut Vec<FnCall>) -> Result<Option<Value>, ParseError> {
        match self.peek()?.map(|(token, _)| *token == Token::RParen) {
            Some(true) => {}
            Some(false) => return Ok(None),
            None => return Err(self.end_of_input("a value or `)`")),
        }
        let close = self.expect_close()?;
        Ok(open_calls.pop().map(|mut call| {
            call.span = call.span.to(close);
            Value::Fn(call)
        }))
    }

    fn identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match self.advance(what)? {
            (Token::Ident(name), _) => Ok(name),
            (token, span) => Err(unexpected(what, &token, span)),
        }
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<Span, ParseError> {
        match self.advance(what)? {
            (token, span) if token == expected => Ok(span),
            (token, span) => Err(unexpected(what, &token, span)),
        }
    }

    /// Consume the `)` that ends the current form
    fn expect_close(&mut self) -> Result<Span, ParseError> {
        self.expect(Token::RParen, "`)`")
    }

    fn peek(&mut self) -> Result<Option<&Spanned>, ParseError> {
        match self.tokens.peek() {
            None => Ok(None),
            Some(Ok(spanned)) => Ok(Some(spanned)),
            Some(Err(err)) => Err(err.clone()),
        }
    }

    fn advance(&mut self, expected: &str) -> Result<Spanned, ParseError> {
        match self.tokens.next() {
            Some(result) => result,
            None => Err(self.end_of_input(expected)),
        }
    }

    fn end_of_input(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedEndOfInput {
            expected: expected.to_string(),
            offset: self.eof,
        }
    }
}

fn unexpected(expected: &str, found: &Token, span: Span) -> ParseError {
    ParseError::UnexpectedToken {
        expected: expected.to_string(),
        found: found.to_string(),
        span,
    }
}
