//! `quill` - a small text template engine.
//!
//! The public surface mirrors the three coupled CORE subsystems from the design: a statement
//! lexer (`template_lexer`), an expression lexer (`expr_lexer`), and an evaluator (`eval`),
//! operating over a typed [`Value`] and a scoped [`Scope`] environment. Grounded throughout on
//! `rhai` (`examples/rhaiscript-lsp/rhai`) - see `DESIGN.md` for the per-module ledger.
//!
//! ```
//! use quill::{InputStream, Scope, Template, Value};
//!
//! let mut scope = Scope::new();
//! scope.push("name", Value::str("World"));
//!
//! let template = Template::parse(InputStream::new("greeting", "Hello, {name}!")).unwrap();
//! let mut out = Vec::new();
//! template.render(&mut scope, &mut out).unwrap();
//! assert_eq!(out, b"Hello, World!");
//! ```

pub mod ast;
pub mod env_parse;
pub mod error;
pub mod eval;
pub mod expr_lexer;
pub mod input;
pub mod ops;
pub mod output;
pub mod scope;
pub mod template_lexer;
pub mod value;

/// An identifier (symbol name, `for`-loop iterator name). `SmartString` is used because most
/// identifiers are short enough to store inline, avoiding a heap allocation per binding -
/// grounded on `rhai`'s own `Identifier` alias (`examples/rhaiscript-lsp/rhai/src/lib.rs`).
pub type Identifier = smartstring::SmartString<smartstring::Compact>;

pub use ast::{BinOp, Expr, Stmt, UnaryOp};
pub use error::{EnvParseError, EvalError, ExprError, LexError, QuillError};
pub use input::{InputStream, Position};
pub use output::OutputStream;
pub use scope::Scope;
pub use value::Value;

/// A parsed template: an owned statement token tree, ready to render against any [`Scope`].
#[derive(Debug, Clone)]
pub struct Template {
    stmts: Vec<Stmt>,
}

impl Template {
    /// Lex `input` into a [`Template`]. Consumes the whole input stream.
    pub fn parse(input: InputStream) -> Result<Self, LexError> {
        let stmts = template_lexer::lex_template(input)?;
        Ok(Self { stmts })
    }

    /// The top-level statement tree, for callers that want to inspect or re-render it.
    pub fn statements(&self) -> &[Stmt] {
        &self.stmts
    }

    /// Evaluate this template against `scope`, writing rendered bytes to `out`. `scope` is
    /// left with exactly the bindings it had on entry, whether or not rendering succeeds.
    pub fn render(&self, scope: &mut Scope, out: &mut dyn OutputStream) -> Result<(), EvalError> {
        eval::render(&self.stmts, scope, out)
    }
}

/// Convenience one-shot: lex `text` and render it immediately against `scope`.
pub fn render_str(
    source_name: impl Into<std::rc::Rc<str>>,
    text: &str,
    scope: &mut Scope,
    out: &mut dyn OutputStream,
) -> Result<(), QuillError> {
    let template = Template::parse(InputStream::new(source_name, text))?;
    template.render(scope, out)?;
    Ok(())
}
