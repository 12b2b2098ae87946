use std::convert::TryFrom;

use log::{debug, trace};

use crate::{
    errors::err::{ParseError, ParseResult},
    source_pos::Span,
    syntax::{
        ast::*,
        lexer::Lexer,
        operators::{Arity, Catalog, Op},
        tokens::{Delimiter, Spanned, Token},
    },
};

/// Operation nesting accepted by default. Every tree walk recurses, so this
/// keeps parsed trees within reach of the native stack.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Reads fully bracketed expressions in prefix or postfix order, or any
/// mix of both: an operation applies to whatever its bracket group holds,
/// regardless of where in the group its symbol sits.
pub struct Parser<'a> {
    tokens: Lexer<'a>,
    catalog: Catalog,
    max_depth: usize,
    operands: Vec<Expr>,
    // operation nesting of each entry in `operands`
    depths: Vec<usize>,
    operators: Vec<Spanned<Op>>,
    // 0-based offsets of the currently open brackets
    brackets: Vec<usize>,
    // operands pushed in each open group; the first entry is the top level
    counters: Vec<usize>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Lexer<'a>) -> Self {
        Self {
            tokens,
            catalog: Catalog::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            operands: vec![],
            depths: vec![],
            operators: vec![],
            brackets: vec![],
            counters: vec![0],
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
        match &result {
            Ok(expr) => debug!("parsed {}", expr.to_prefix()),
            Err(err) => debug!("parse failed: {}", err),
        }
        result
    }

    fn expr(&mut self) -> ParseResult<Expr> {
        while let Some(tok) = self.tokens.next() {
            let tok = tok?;
            let pos = tok.position();
            match tok.elem {
                Token::Delimiter(Delimiter::LParen) => self.open(tok.span.start),
                Token::Delimiter(Delimiter::RParen) => self.close(pos)?,
                Token::Num(text) => self.push_operand(literal(text, pos)?, 0),
                Token::Ident(word) | Token::Op(word) => self.word(word, tok.span)?,
            }
        }
        self.finish()
    }

    fn word(&mut self, word: &str, span: Span) -> ParseResult<()> {
        if let Ok(var) = Var::try_from(word) {
            self.push_operand(Expr::Variable(var), 0);
            return Ok(());
        }
        match self.catalog.lookup(word) {
            Some(op) => {
                trace!("operator {} at {}", op, span.start + 1);
                self.operators.push(Spanned::new(op, span));
                Ok(())
            }
            None => Err(ParseError::unknown_token(word, span.start + 1)),
        }
    }

    fn push_operand(&mut self, expr: Expr, depth: usize) {
        trace!("operand {}", expr);
        self.operands.push(expr);
        self.depths.push(depth);
        if let Some(count) = self.counters.last_mut() {
            *count += 1;
        }
    }

    fn open(&mut self, offset: usize) {
        self.brackets.push(offset);
        self.counters.push(0);
    }

    fn close(&mut self, pos: usize) -> ParseResult<()> {
        if self.brackets.pop().is_none() {
            return Err(ParseError::UnpairedBracket { bracket: ')', pos });
        }
        let operator = self
            .operators
            .pop()
            .ok_or(ParseError::MissingOperation { pos })?;
        let op = operator.elem;
        let in_group = self.counters.pop().unwrap_or(0);
        let required = match op.arity() {
            Arity::Fixed(n) => n,
            Arity::Variadic => in_group,
        };
        if self.operands.len() < required {
            return Err(ParseError::MissingOperand {
                op: op.symbol(),
                pos: operator.position(),
                expected: required,
                available: self.operands.len(),
            });
        }
        // An operand written in this group must not be left behind
        if in_group > required {
            return Err(ParseError::MissingOperation { pos });
        }
        // The rest comes from enclosing groups, innermost first
        let mut borrowed = required - in_group;
        for count in self.counters.iter_mut().rev() {
            if borrowed == 0 {
                break;
            }
            let taken = borrowed.min(*count);
            *count -= taken;
            borrowed -= taken;
        }
        let split = self.operands.len() - required;
        let args = self.operands.split_off(split);
        let depth = 1 + self.depths.split_off(split).into_iter().max().unwrap_or(0);
        if depth > self.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.max_depth,
                pos,
            });
        }
        trace!("closing {} with {} operands", op, required);
        self.push_operand(Expr::op(op, args), depth);
        Ok(())
    }

    fn finish(&mut self) -> ParseResult<Expr> {
        if let Some(first) = self.brackets.first() {
            return Err(ParseError::UnpairedBracket {
                bracket: '(',
                pos: first + 1,
            });
        }
        if let Some(operator) = self.operators.pop() {
            return Err(ParseError::MissingOperand {
                op: operator.elem.symbol(),
                pos: operator.position(),
                expected: match operator.elem.arity() {
                    Arity::Fixed(n) => n,
                    Arity::Variadic => 0,
                },
                available: self.operands.len(),
            });
        }
        match self.operands.pop() {
            Some(root) if self.operands.is_empty() => Ok(root),
            _ => Err(ParseError::MissingOperation {
                pos: self.tokens.end_position(),
            }),
        }
    }
}

/// Reads a numeric literal. Values that overflow to infinity are rejected,
/// since they could not be printed back as a literal.
pub(crate) fn literal(text: &str, pos: usize) -> ParseResult<Expr> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Expr::Const(value)),
        _ => Err(ParseError::unknown_token(text, pos)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> ParseResult<Expr> {
        Parser::new(Lexer::new(source)).parse()
    }

    fn parse_transcendental(source: &str) -> ParseResult<Expr> {
        Parser::new(Lexer::new(source))
            .with_catalog(Catalog::Transcendental)
            .parse()
    }

    fn x() -> Expr {
        Expr::var(Var::X)
    }

    #[test]
    fn prefix_and_postfix_build_the_same_tree() {
        let expected = Expr::sub(Expr::mul(TWO, x()), Expr::Const(3.0));
        assert_eq!(parse("(- (* 2 x) 3)"), Ok(expected.clone()));
        assert_eq!(parse("((2 x *) 3 -)"), Ok(expected));
    }

    #[test]
    fn leaves_alone() {
        assert_eq!(parse("x"), Ok(x()));
        assert_eq!(parse("  -2.5 "), Ok(Expr::Const(-2.5)));
    }

    #[test]
    fn variadic_takes_its_group() {
        assert_eq!(parse("(sum)"), Ok(Expr::sum(vec![])));
        assert_eq!(parse("( avg)"), Ok(Expr::avg(vec![])));
        assert_eq!(
            parse("(length x (negate y) 4)"),
            Ok(Expr::length(vec![
                x(),
                Expr::negate(Expr::var(Var::Y)),
                Expr::Const(4.0),
            ]))
        );
        assert_eq!(
            parse("(x (1 2 sumsq) sum)"),
            Ok(Expr::sum(vec![x(), Expr::sumsq(vec![ONE, TWO])]))
        );
    }

    #[test]
    fn catalogs_gate_symbols() {
        assert_eq!(
            parse("(atan x)"),
            Err(ParseError::unknown_token("atan", 2))
        );
        assert_eq!(
            parse_transcendental("(atan2 (sinh x) (cosh 1))"),
            Ok(Expr::atan2(Expr::sinh(x()), Expr::cosh(ONE)))
        );
        assert_eq!(
            parse_transcendental("(sum x)"),
            Err(ParseError::unknown_token("sum", 2))
        );
    }

    #[test]
    fn unpaired_brackets() {
        assert_eq!(
            parse("(1 2 +"),
            Err(ParseError::UnpairedBracket {
                bracket: '(',
                pos: 1
            })
        );
        assert_eq!(
            parse("(+ 1 2))"),
            Err(ParseError::UnpairedBracket {
                bracket: ')',
                pos: 8
            })
        );
        assert_eq!(
            parse("(+ 1 (negate 2)"),
            Err(ParseError::UnpairedBracket {
                bracket: '(',
                pos: 1
            })
        );
    }

    #[test]
    fn missing_operand() {
        assert_eq!(
            parse("(1 +)"),
            Err(ParseError::MissingOperand {
                op: "+",
                pos: 4,
                expected: 2,
                available: 1
            })
        );
        assert_eq!(
            parse("(+ (1) 2)"),
            Err(ParseError::MissingOperand {
                op: "+",
                pos: 2,
                expected: 2,
                available: 1
            })
        );
        assert_eq!(
            parse("(x (negate) *)"),
            Err(ParseError::MissingOperand {
                op: "*",
                pos: 13,
                expected: 2,
                available: 1
            })
        );
        assert_eq!(
            parse("x y +"),
            Err(ParseError::MissingOperand {
                op: "+",
                pos: 5,
                expected: 2,
                available: 2
            })
        );
    }

    #[test]
    fn missing_operation() {
        assert_eq!(parse("(x)"), Err(ParseError::MissingOperation { pos: 3 }));
        assert_eq!(parse("1 2"), Err(ParseError::MissingOperation { pos: 4 }));
        assert_eq!(parse(""), Err(ParseError::MissingOperation { pos: 1 }));
        assert_eq!(parse("()"), Err(ParseError::MissingOperation { pos: 2 }));
    }

    #[test]
    fn leftover_operand_in_group_is_rejected() {
        assert_eq!(
            parse("(+ 1 2 3)"),
            Err(ParseError::MissingOperation { pos: 9 })
        );
        assert_eq!(
            parse("(* (negate x y) 2)"),
            Err(ParseError::MissingOperation { pos: 15 })
        );
    }

    #[test]
    fn short_group_takes_operands_from_enclosing_groups() {
        assert_eq!(
            parse("(x negate (+ 1))"),
            Ok(Expr::negate(Expr::add(x(), ONE)))
        );
        assert_eq!(
            parse("x (negate) (negate)"),
            Ok(Expr::negate(Expr::negate(x())))
        );
        // the outer group gave its only operand away
        assert_eq!(
            parse("(x (1 +))"),
            Err(ParseError::MissingOperation { pos: 9 })
        );
    }

    #[test]
    fn nesting_is_bounded() {
        assert_eq!(
            Parser::new(Lexer::new("(negate (negate (negate x)))"))
                .with_max_depth(2)
                .parse(),
            Err(ParseError::TooDeep { limit: 2, pos: 28 })
        );
        let n = 200_000;
        let deep = format!("{}x{}", "(negate ".repeat(n), ")".repeat(n));
        assert_eq!(
            parse(&deep),
            Err(ParseError::TooDeep {
                limit: DEFAULT_MAX_DEPTH,
                pos: 8 * n + 1 + DEFAULT_MAX_DEPTH + 1
            })
        );
        let shallow = format!("{}x{}", "(negate ".repeat(50), ")".repeat(50));
        assert!(parse(&shallow).is_ok());
    }

    #[test]
    fn bad_literals_and_names() {
        assert_eq!(
            parse("(+ 1.2.3 x)"),
            Err(ParseError::unknown_token("1.2.3", 4))
        );
        assert_eq!(parse("(+ w x)"), Err(ParseError::unknown_token("w", 4)));
        assert_eq!(parse("(- . x)"), Err(ParseError::unknown_token(".", 4)));
        let huge = "9".repeat(400);
        assert_eq!(
            parse(&format!("(+ {} x)", huge)),
            Err(ParseError::unknown_token(huge.as_str(), 4))
        );
        assert_eq!(parse("1e5"), Err(ParseError::unknown_token("e5", 2)));
    }

    #[test]
    fn built_nodes_keep_operand_order() {
        match parse("(/ x 2)") {
            Ok(Expr::Operation(operation)) => {
                assert_eq!(operation.op(), Op::Div);
                assert_eq!(operation.args(), &[x(), TWO][..]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
