//! Structured, position-tagged error types.
//!
//! Grounded on `rhai::LexError`/`rhai::ParseErrorType`/`rhai::EvalAltResult`
//! (`error_parsing.rs`, `error.rs`): hand-rolled enums implementing
//! `std::error::Error` + `Display`, each variant carrying the data needed to
//! reconstruct a human-readable message, position attached separately rather
//! than folded into the message string.

use std::fmt;

use crate::input::Position;

/// Error raised by the statement lexer (`template_lexer`).
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A malformed construct in the template mini-language; wraps a human-readable reason.
    Syntax(String, Position),
    /// An underlying I/O failure while reading the template source.
    Io(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(reason, pos) => write!(f, "{pos}: {reason}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for LexError {}

/// Error raised while lexing an expression (`expr_lexer`).
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// An operator was found where an operand was expected, or input ended mid-expression.
    MissingOperand(Position),
    /// Two adjacent primaries with no operator between them.
    MissingOperator(Position),
    /// Any other malformed expression (unterminated string/index, unbalanced parens, bad number).
    Syntax(String, Position),
}

impl ExprError {
    pub fn position(&self) -> Position {
        match self {
            Self::MissingOperand(p) | Self::MissingOperator(p) => p.clone(),
            Self::Syntax(_, p) => p.clone(),
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingOperand(pos) => write!(f, "{pos}: expected an operand"),
            Self::MissingOperator(pos) => write!(f, "{pos}: expected an operator"),
            Self::Syntax(reason, pos) => write!(f, "{pos}: {reason}"),
        }
    }
}

impl std::error::Error for ExprError {}

/// Error raised while walking the statement tree against an environment.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Lookup of an undefined symbol. Wrapped value is the symbol name.
    SymbolNotFound(String, Position),
    /// Type mismatch, out-of-range index, or an un-iterable `for` target.
    IncompatibleSymbol(String, Position),
    /// Any other evaluation failure (incompatible operands, division by zero, overflow, I/O).
    Failed(String, Position),
}

impl EvalError {
    pub fn position(&self) -> Position {
        match self {
            Self::SymbolNotFound(_, p) => p.clone(),
            Self::IncompatibleSymbol(_, p) => p.clone(),
            Self::Failed(_, p) => p.clone(),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymbolNotFound(name, pos) => write!(f, "{pos}: symbol not found: '{name}'"),
            Self::IncompatibleSymbol(reason, pos) => write!(f, "{pos}: {reason}"),
            Self::Failed(reason, pos) => write!(f, "{pos}: {reason}"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Error raised while parsing an environment description file (`env_parse`).
#[derive(Debug, Clone, PartialEq)]
pub enum EnvParseError {
    Syntax(String, Position),
    Io(String),
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(reason, pos) => write!(f, "{pos}: {reason}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for EnvParseError {}

/// Umbrella error unifying every CORE error domain, for callers (the CLI) that don't care
/// which stage failed. Grounded on `rhai::EvalAltResult::ErrorParsing` folding `ParseErrorType`
/// and `LexError` into the runtime error type.
#[derive(Debug, Clone, PartialEq)]
pub enum QuillError {
    Lex(LexError),
    Expr(ExprError),
    Eval(EvalError),
    EnvParse(EnvParseError),
}

impl fmt::Display for QuillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => e.fmt(f),
            Self::Expr(e) => e.fmt(f),
            Self::Eval(e) => e.fmt(f),
            Self::EnvParse(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for QuillError {}

impl From<LexError> for QuillError {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ExprError> for QuillError {
    fn from(e: ExprError) -> Self {
        Self::Expr(e)
    }
}

impl From<EvalError> for QuillError {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}

impl From<EnvParseError> for QuillError {
    fn from(e: EnvParseError) -> Self {
        Self::EnvParse(e)
    }
}
