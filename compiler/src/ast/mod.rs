//! Abstract Syntax Tree definitions for tlisp
//!
//! This module defines the AST representation of tlisp programs after parsing.
//! Every node renders back to canonical source text through `Display`.
use std::fmt;
use std::ops::Range;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// A complete tlisp program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub forms: Vec<DefOrMain>,
}

impl Program {
    /// The first `main` form, if any
    pub fn main(&self) -> Option<&Main> {
        self.forms.iter().find_map(DefOrMain::as_main)
    }

    pub fn fn_decls(&self) -> impl Iterator<Item = &FnDecl> {
        self.forms.iter().filter_map(DefOrMain::as_fn_decl)
    }

    pub fn var_decls(&self) -> impl Iterator<Item = &VarDecl> {
        self.forms.iter().filter_map(DefOrMain::as_var_decl)
    }
}

/// Top-level forms in a tlisp program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefOrMain {
    FnDecl(FnDecl),
    VarDecl(VarDecl),
    Main(Main),
}

impl DefOrMain {
    pub fn as_main(&self) -> Option<&Main> {
        match self {
            DefOrMain::Main(main) => Some(main),
            _ => None,
        }
    }

    pub fn as_fn_decl(&self) -> Option<&FnDecl> {
        match self {
            DefOrMain::FnDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_var_decl(&self) -> Option<&VarDecl> {
        match self {
            DefOrMain::VarDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            DefOrMain::FnDecl(decl) => decl.span,
            DefOrMain::VarDecl(decl) => decl.span,
            DefOrMain::Main(main) => main.span,
        }
    }
}

/// Entry point: (main () body)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Main {
    pub body: Value,
    pub span: Span,
}

/// Function declaration: (defun name (a b) body)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnDecl {
    pub name: String,
    /// Formal parameters in source order; duplicates are not rejected here
    pub args: Vec<String>,
    pub body: Value,
    pub span: Span,
}

/// Variable declaration: (defvar NAME value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: String,
    pub value: Value,
    pub span: Span,
}

/// Function call: (name arg...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnCall {
    pub name: String,
    pub args: Vec<Value>,
    pub span: Span,
}

// Frees nested calls with a worklist; the derived drop would recurse once
// per nesting level.
impl Drop for FnCall {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.args);
        while let Some(value) = pending.pop() {
            if let Value::Fn(mut call) = value {
                pending.append(&mut call.args);
            }
        }
    }
}

/// Values appearing in body, argument and initializer positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Bare identifier such as `true`, `b101101` or `x`; interpretation is left to later phases
    Atom(String, Span),
    Int(i32, Span),
    Str(String, Span),
    Fn(FnCall),
}

impl Value {
    pub fn span(&self) -> Span {
        match self {
            Value::Atom(_, span) | Value::Int(_, span) | Value::Str(_, span) => *span,
            Value::Fn(call) => call.span,
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Value::Atom(name, _) => Some(name),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n, _) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s, _) => Some(s),
            _ => None,
        }
    }

    pub fn as_fn_call(&self) -> Option<&FnCall> {
        match self {
            Value::Fn(call) => Some(call),
            _ => None,
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, form) in self.forms.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", form)?;
        }
        Ok(())
    }
}

impl fmt::Display for DefOrMain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DefOrMain::FnDecl(decl) => write!(f, "{}", decl),
            DefOrMain::VarDecl(decl) => write!(f, "{}", decl),
            DefOrMain::Main(main) => write!(f, "{}", main),
        }
    }
}

impl fmt::Display for Main {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(main () {})", self.body)
    }
}

impl fmt::Display for FnDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(defun {} ({}) {})", self.name, self.args.join(" "), self.body)
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(defvar {} {})", self.name, self.value)
    }
}

impl fmt::Display for FnCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}", self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Atom(name, _) => write!(f, "{}", name),
            Value::Int(n, _) => write!(f, "{}", n),
            Value::Str(s, _) => write!(f, "\"{}\"", s),
            Value::Fn(call) => write!(f, "{}", call),
        }
    }
}
