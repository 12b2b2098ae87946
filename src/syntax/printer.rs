//! Textual forms of an expression.
//!
//! Prefix and postfix are fully bracketed and read back by the bracket
//! parser. `Display` writes bare reverse Polish, which the RPN parser reads
//! back as long as no variadic operation is involved.

use std::fmt;

use crate::syntax::ast::Expr;

/// `(op a b ...)`, or `(op )` with no operands.
pub struct Prefix<'a>(pub &'a Expr);

/// `(a b ... op)`, or `( op)` with no operands.
pub struct Postfix<'a>(pub &'a Expr);

impl fmt::Display for Prefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Operation(operation) => {
                write!(f, "({}", operation.op())?;
                for arg in operation.args() {
                    write!(f, " {}", Prefix(arg))?;
                }
                if operation.args().is_empty() {
                    f.write_str(" ")?;
                }
                f.write_str(")")
            }
            leaf => write_leaf(leaf, f),
        }
    }
}

impl fmt::Display for Postfix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Operation(operation) => {
                f.write_str("(")?;
                if operation.args().is_empty() {
                    f.write_str(" ")?;
                }
                for arg in operation.args() {
                    write!(f, "{} ", Postfix(arg))?;
                }
                write!(f, "{})", operation.op())
            }
            leaf => write_leaf(leaf, f),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Operation(operation) => {
                for arg in operation.args() {
                    write!(f, "{} ", arg)?;
                }
                write!(f, "{}", operation.op())
            }
            leaf => write_leaf(leaf, f),
        }
    }
}

fn write_leaf(leaf: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match leaf {
        Expr::Const(value) => write!(f, "{}", value),
        Expr::Variable(var) => write!(f, "{}", var),
        Expr::Operation(_) => write!(f, "{}", Prefix(leaf)),
    }
}

impl Expr {
    pub fn to_prefix(&self) -> String {
        Prefix(self).to_string()
    }

    pub fn to_postfix(&self) -> String {
        Postfix(self).to_string()
    }
}
