//! tlisp Compiler Library
//!
//! Front end for tlisp: lexes and parses source text into a typed AST that
//! later phases consume.

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod parser;

pub use ast::Program;
pub use error::{LexError, ParseError};
pub use parser::{parse, parse_value};
