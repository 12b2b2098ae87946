use std::convert::TryFrom;

use log::debug;

use crate::{
    errors::err::{ParseError, ParseResult},
    syntax::{
        ast::*,
        lexer::Lexer,
        operators::{Arity, Catalog},
        parser::{literal, DEFAULT_MAX_DEPTH},
        tokens::Token,
    },
};

/// Reads bare reverse Polish notation such as `x 2 + 3 *`. Each operation
/// pops exactly its fixed arity, so variadic operations cannot appear here.
pub struct RpnParser<'a> {
    tokens: Lexer<'a>,
    catalog: Catalog,
    max_depth: usize,
    stack: Vec<Expr>,
    depths: Vec<usize>,
}

impl<'a> RpnParser<'a> {
    pub fn new(tokens: Lexer<'a>) -> Self {
        Self {
            tokens,
            catalog: Catalog::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            stack: vec![],
            depths: vec![],
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse(mut self) -> ParseResult<Expr> {
        let result = self.expr();
        if let Err(err) = &result {
            debug!("rpn parse failed: {}", err);
        }
        result
    }

    fn expr(&mut self) -> ParseResult<Expr> {
        while let Some(tok) = self.tokens.next() {
            let tok = tok?;
            let pos = tok.position();
            match tok.elem {
                Token::Num(text) => self.push(literal(text, pos)?, 0),
                Token::Ident(word) | Token::Op(word) => self.word(word, pos)?,
                Token::Delimiter(delimiter) => {
                    return Err(ParseError::UnpairedBracket {
                        bracket: delimiter.as_char(),
                        pos,
                    })
                }
            }
        }
        match self.stack.pop() {
            Some(root) if self.stack.is_empty() => Ok(root),
            _ => Err(ParseError::MissingOperation {
                pos: self.tokens.end_position(),
            }),
        }
    }

    fn word(&mut self, word: &str, pos: usize) -> ParseResult<()> {
        if let Ok(var) = Var::try_from(word) {
            self.push(Expr::Variable(var), 0);
            return Ok(());
        }
        let op = match self.catalog.lookup(word) {
            Some(op) => op,
            None => return Err(ParseError::unknown_token(word, pos)),
        };
        let required = match op.arity() {
            Arity::Fixed(n) => n,
            Arity::Variadic => return Err(ParseError::unknown_token(word, pos)),
        };
        if self.stack.len() < required {
            return Err(ParseError::MissingOperand {
                op: op.symbol(),
                pos,
                expected: required,
                available: self.stack.len(),
            });
        }
        let split = self.stack.len() - required;
        let args = self.stack.split_off(split);
        let depth = 1 + self.depths.split_off(split).into_iter().max().unwrap_or(0);
        if depth > self.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.max_depth,
                pos,
            });
        }
        self.push(Expr::op(op, args), depth);
        Ok(())
    }

    fn push(&mut self, expr: Expr, depth: usize) {
        self.stack.push(expr);
        self.depths.push(depth);
    }
}
