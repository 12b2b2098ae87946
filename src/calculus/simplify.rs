use crate::syntax::{
    ast::{Expr, ZERO},
    operators::Op,
};

impl Expr {
    /// Folds constants and drops additive/multiplicative identities,
    /// children first. Only local rewrites: no reordering, no distribution.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Const(_) | Expr::Variable(_) => self.clone(),
            Expr::Operation(operation) => rewrite(
                operation.op(),
                operation.args().iter().map(Expr::simplify).collect(),
            ),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_const(0.0)
    }

    fn is_one(&self) -> bool {
        self.is_const(1.0)
    }
}

/// Rebuilds `op` over already simplified operands.
fn rewrite(op: Op, args: Vec<Expr>) -> Expr {
    if let Some(value) = fold(op, &args) {
        return Expr::Const(value);
    }
    identity(op, &args).unwrap_or_else(|| Expr::op(op, args))
}

/// An operation over nothing but literals becomes a literal. Empty variadics
/// are left alone so `(avg )` does not turn into NaN text.
fn fold(op: Op, args: &[Expr]) -> Option<f64> {
    if args.is_empty() {
        return None;
    }
    let values = args.iter().map(Expr::as_const).collect::<Option<Vec<_>>>()?;
    Some(op.apply(&values))
}

fn identity(op: Op, args: &[Expr]) -> Option<Expr> {
    match (op, args) {
        (Op::Add, [a, b]) if a.is_zero() => Some(b.clone()),
        (Op::Add, [a, b]) if b.is_zero() => Some(a.clone()),
        (Op::Sub, [a, b]) if b.is_zero() => Some(a.clone()),
        (Op::Sub, [a, b]) if a.is_zero() => Some(rewrite(Op::Negate, vec![b.clone()])),
        (Op::Mul, [a, b]) if a.is_one() => Some(b.clone()),
        (Op::Mul, [a, b]) if b.is_one() => Some(a.clone()),
        (Op::Mul, [a, b]) if a.is_zero() || b.is_zero() => Some(ZERO),
        (Op::Div, [a, _]) if a.is_zero() => Some(ZERO),
        (Op::Div, [a, b]) if b.is_one() => Some(a.clone()),
        (Op::Negate, [Expr::Operation(inner)]) if inner.op() == Op::Negate => {
            inner.args().first().cloned()
        }
        _ => None,
    }
}
