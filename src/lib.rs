//! Fully bracketed arithmetic expressions over `x`, `y` and `z`.
//!
//! ```
//! use prefix_expr::{parse, Var};
//!
//! let e = parse("(+ (* x x) (sum y 1 z))").unwrap();
//! assert_eq!(e.evaluate(3.0, 1.0, 2.0), 13.0);
//! assert_eq!(e.diff(Var::X).simplify().to_prefix(), "(+ x x)");
//! assert_eq!(e.to_postfix(), "((x x *) (y 1 z sum) +)");
//! ```

pub mod calculus;
pub mod errors;
pub mod source_pos;
pub mod syntax;

pub use errors::err::{ParseError, ParseResult};
pub use syntax::{
    ast::{Expr, Operation, Var, ONE, TWO, ZERO},
    lexer::Lexer,
    operators::{Arity, Catalog, Op},
    parser::{Parser, DEFAULT_MAX_DEPTH},
    rpn::RpnParser,
};

/// Parses a bracketed prefix or postfix expression with the standard
/// operation catalog.
pub fn parse(source: &str) -> ParseResult<Expr> {
    parse_with(source, Catalog::Standard)
}

pub fn parse_with(source: &str, catalog: Catalog) -> ParseResult<Expr> {
    Parser::new(Lexer::new(source)).with_catalog(catalog).parse()
}

/// Parses bracket-free reverse Polish notation, the format `Expr`'s
/// `Display` writes.
pub fn parse_rpn(source: &str, catalog: Catalog) -> ParseResult<Expr> {
    RpnParser::new(Lexer::new(source))
        .with_catalog(catalog)
        .parse()
}
