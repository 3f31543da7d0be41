//! The statement lexer: template text -> statement token tree (spec §4.3).
//!
//! Grounded on the recursive statement-dispatch shape of `rhai::parse::Engine::parse_block`
//! (`examples/rhaiscript-lsp/rhai/src/parse.rs`) and the keyword-lookahead idiom of
//! `rhai::token::TokenIterator` (`examples/rhaiscript-lsp/rhai/src/token.rs`), adapted to the
//! small `{if}/{else}/{end}/{for ... in ...}/{expr}` grammar this language defines. `block_depth`
//! from spec §4.3/§4.8 is a field on `TemplateLexer` since it is genuinely shared across the
//! whole recursive descent. Whether an `else` is acceptable, however, depends on which calling
//! context is currently lexing a sibling chain (an if's then-branch accepts one, everything else
//! doesn't) - that is passed as an explicit `accepts_else` argument to `lex_children` rather than
//! tracked as a shared field, since a field would be clobbered by any nested block that closes
//! via its own `end` partway through a then-branch.

use crate::Identifier;

use crate::ast::Stmt;
use crate::error::LexError;
use crate::expr_lexer::parse_expr;
use crate::input::InputStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Eof,
    End,
    Else,
}

enum Dispatch {
    Node(Stmt),
    End,
    Else,
}

pub struct TemplateLexer {
    input: InputStream,
    block_depth: i64,
}

/// Lex an entire template into its statement token tree. Never returns an empty tree: a
/// template with no statements still yields a single zero-length `Stmt::Data`.
pub fn lex_template(input: InputStream) -> Result<Vec<Stmt>, LexError> {
    let mut lexer = TemplateLexer { input, block_depth: 0 };
    let (mut stmts, term) = lexer.lex_children(false)?;
    debug_assert_eq!(term, Terminator::Eof, "top-level pass always ends at EOF or errors first");
    if lexer.block_depth != 0 {
        return Err(LexError::Syntax(
            format!("unclosed block ({} level(s) still open)", lexer.block_depth),
            lexer.input.position(),
        ));
    }
    if stmts.is_empty() {
        stmts.push(Stmt::Data(Vec::new()));
    }
    Ok(stmts)
}

impl TemplateLexer {
    /// Lex a sibling chain until EOF (top level) or a matching `end`/`else` (nested).
    /// `accepts_else` is true only when this chain is an if's then-branch, so a bare `{else}`
    /// anywhere else - top level, a for-body, an else-branch - is rejected as unmatched.
    fn lex_children(&mut self, accepts_else: bool) -> Result<(Vec<Stmt>, Terminator), LexError> {
        let mut stmts = Vec::new();
        loop {
            let data = self.read_data_run()?;
            if !data.is_empty() {
                stmts.push(Stmt::Data(data));
            }

            match self.input.peek_char() {
                None => return Ok((stmts, Terminator::Eof)),
                Some('}') => {
                    return Err(LexError::Syntax(
                        "unexpected '}' outside of a statement".into(),
                        self.input.position(),
                    ))
                }
                Some('{') => {
                    self.input.skip(1);
                    self.input.skip_blank();
                    match self.dispatch_statement()? {
                        Dispatch::Node(stmt) => stmts.push(stmt),
                        Dispatch::End => {
                            self.block_depth -= 1;
                            if self.block_depth < 0 {
                                return Err(LexError::Syntax(
                                    "unmatched 'end'".into(),
                                    self.input.position(),
                                ));
                            }
                            return Ok((stmts, Terminator::End));
                        }
                        Dispatch::Else => {
                            if !accepts_else {
                                return Err(LexError::Syntax(
                                    "unmatched 'else'".into(),
                                    self.input.position(),
                                ));
                            }
                            return Ok((stmts, Terminator::Else));
                        }
                    }
                }
                Some(_) => unreachable!("read_data_run only stops at '{{', '}}' or EOF"),
            }
        }
    }

    /// Consume text up to the next unescaped `{`/`}`/EOF, decoding `\{`, `\}`, `\\` and any
    /// other `\x` to `x` along the way.
    fn read_data_run(&mut self) -> Result<Vec<u8>, LexError> {
        let mut out = String::new();
        loop {
            match self.input.peek_char() {
                None | Some('{') | Some('}') => break,
                Some('\\') => {
                    let escape_pos = self.input.position();
                    self.input.skip(1);
                    match self.input.get_char() {
                        Some(c) => out.push(c),
                        None => {
                            return Err(LexError::Syntax(
                                "dangling escape at end of input".into(),
                                escape_pos,
                            ))
                        }
                    }
                }
                Some(_) => {
                    out.push(self.input.get_char().unwrap());
                }
            }
        }
        Ok(out.into_bytes())
    }

    /// Dispatch on the up-to-5-character keyword lookahead just inside `{ ... }`.
    fn dispatch_statement(&mut self) -> Result<Dispatch, LexError> {
        let kw = self.input.peek_symbol(5);
        match kw.as_str() {
            "if" => {
                self.input.skip(2);
                self.parse_if().map(Dispatch::Node)
            }
            "for" => {
                self.input.skip(3);
                self.parse_for().map(Dispatch::Node)
            }
            "end" => {
                self.input.skip(3);
                self.expect_close_brace()?;
                Ok(Dispatch::End)
            }
            "else" => {
                self.input.skip(4);
                self.expect_close_brace()?;
                Ok(Dispatch::Else)
            }
            _ => {
                let expr = parse_expr(&mut self.input)
                    .map_err(|e| LexError::Syntax(e.to_string(), e.position()))?;
                self.expect_close_brace()?;
                Ok(Dispatch::Node(Stmt::Expr(expr)))
            }
        }
    }

    fn expect_close_brace(&mut self) -> Result<(), LexError> {
        self.input.skip_blank();
        if self.input.peek_char() != Some('}') {
            return Err(LexError::Syntax(
                "expected '}'".into(),
                self.input.position(),
            ));
        }
        self.input.skip(1);
        Ok(())
    }

    fn parse_if(&mut self) -> Result<Stmt, LexError> {
        let cond = parse_expr(&mut self.input)
            .map_err(|e| LexError::Syntax(e.to_string(), e.position()))?;
        self.expect_close_brace()?;

        self.block_depth += 1;
        let (then_branch, term) = self.lex_children(true)?;

        let else_branch = if term == Terminator::Else {
            let (else_stmts, term2) = self.lex_children(false)?;
            if term2 != Terminator::End {
                return Err(LexError::Syntax(
                    "unclosed block (else-branch never closed with 'end')".into(),
                    self.input.position(),
                ));
            }
            Some(else_stmts)
        } else {
            None
        };

        Ok(Stmt::If { cond, then_branch, else_branch })
    }

    fn parse_for(&mut self) -> Result<Stmt, LexError> {
        self.input.skip_blank();
        let pos = self.input.position();
        let var_name = self.input.read_symbol();
        if var_name.is_empty() {
            return Err(LexError::Syntax("expected an iterator variable name".into(), pos));
        }
        self.input.skip_blank();

        let in_pos = self.input.position();
        let kw = self.input.read_symbol();
        if kw != "in" {
            return Err(LexError::Syntax("expected keyword 'in'".into(), in_pos));
        }

        let iterable = parse_expr(&mut self.input)
            .map_err(|e| LexError::Syntax(e.to_string(), e.position()))?;
        self.expect_close_brace()?;

        self.block_depth += 1;
        let (body, term) = self.lex_children(false)?;
        if term != Terminator::End {
            return Err(LexError::Syntax(
                "unclosed block (for-body never closed with 'end')".into(),
                self.input.position(),
            ));
        }

        Ok(Stmt::For { iterable, var_name: Identifier::from(var_name.as_str()), body, pos })
    }
}
