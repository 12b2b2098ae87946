use std::{convert::TryFrom, fmt, str::FromStr};

use crate::syntax::operators::Op;

pub const ZERO: Expr = Expr::Const(0.0);
pub const ONE: Expr = Expr::Const(1.0);
pub const TWO: Expr = Expr::Const(2.0);

/// One of the three bound variables.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Var {
    X,
    Y,
    Z,
}

impl Var {
    pub const ALL: [Var; 3] = [Var::X, Var::Y, Var::Z];

    pub fn index(self) -> usize {
        match self {
            Var::X => 0,
            Var::Y => 1,
            Var::Z => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Var::X => "x",
            Var::Y => "y",
            Var::Z => "z",
        }
    }
}

impl<'a> TryFrom<&'a str> for Var {
    type Error = ();
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Ok(match value {
            "x" => Var::X,
            "y" => Var::Y,
            "z" => Var::Z,
            _ => return Err(()),
        })
    }
}

impl FromStr for Var {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Var::try_from(s)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An operation node. The fields are private so the child count always
/// matches the operation's arity.
#[derive(Debug, PartialEq, Clone)]
pub struct Operation {
    op: Op,
    args: Vec<Expr>,
}

impl Operation {
    pub fn new(op: Op, args: Vec<Expr>) -> Option<Self> {
        if op.accepts(args.len()) {
            Some(Self { op, args })
        } else {
            None
        }
    }

    pub(crate) fn new_unchecked(op: Op, args: Vec<Expr>) -> Self {
        debug_assert!(op.accepts(args.len()));
        Self { op, args }
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Const(f64),
    Variable(Var),
    Operation(Operation),
}

impl Expr {
    /// Builds an operation node, or `None` when `args` does not fit the
    /// operation's fixed arity.
    pub fn operation(op: Op, args: Vec<Expr>) -> Option<Self> {
        Operation::new(op, args).map(Expr::Operation)
    }

    pub(crate) fn op(op: Op, args: Vec<Expr>) -> Self {
        Expr::Operation(Operation::new_unchecked(op, args))
    }

    pub fn var(var: Var) -> Self {
        Expr::Variable(var)
    }

    pub fn add(a: Expr, b: Expr) -> Self {
        Self::op(Op::Add, vec![a, b])
    }

    pub fn sub(a: Expr, b: Expr) -> Self {
        Self::op(Op::Sub, vec![a, b])
    }

    pub fn mul(a: Expr, b: Expr) -> Self {
        Self::op(Op::Mul, vec![a, b])
    }

    pub fn div(a: Expr, b: Expr) -> Self {
        Self::op(Op::Div, vec![a, b])
    }

    pub fn negate(a: Expr) -> Self {
        Self::op(Op::Negate, vec![a])
    }

    pub fn sum(args: Vec<Expr>) -> Self {
        Self::op(Op::Sum, args)
    }

    pub fn avg(args: Vec<Expr>) -> Self {
        Self::op(Op::Avg, args)
    }

    pub fn sumsq(args: Vec<Expr>) -> Self {
        Self::op(Op::Sumsq, args)
    }

    pub fn length(args: Vec<Expr>) -> Self {
        Self::op(Op::Length, args)
    }

    pub fn atan(a: Expr) -> Self {
        Self::op(Op::Atan, vec![a])
    }

    pub fn atan2(a: Expr, b: Expr) -> Self {
        Self::op(Op::Atan2, vec![a, b])
    }

    pub fn sinh(a: Expr) -> Self {
        Self::op(Op::Sinh, vec![a])
    }

    pub fn cosh(a: Expr) -> Self {
        Self::op(Op::Cosh, vec![a])
    }

    pub fn as_const(&self) -> Option<f64> {
        match self {
            Expr::Const(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_const(&self, value: f64) -> bool {
        self.as_const() == Some(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Self {
        Expr::Variable(var)
    }
}
