use crate::syntax::{
    ast::{Expr, Operation, Var, ONE, TWO, ZERO},
    operators::Op,
};

impl Expr {
    /// Partial derivative with respect to `var`, built by structural rules.
    /// The result is not simplified.
    pub fn diff(&self, var: Var) -> Expr {
        match self {
            Expr::Const(_) => ZERO,
            Expr::Variable(v) if *v == var => ONE,
            Expr::Variable(_) => ZERO,
            Expr::Operation(operation) => operation.diff(var),
        }
    }
}

impl Operation {
    fn diff(&self, var: Var) -> Expr {
        let args = self.args();
        let primes = || args.iter().map(|arg| arg.diff(var)).collect::<Vec<_>>();
        match self.op() {
            Op::Add => Expr::add(args[0].diff(var), args[1].diff(var)),
            Op::Sub => Expr::sub(args[0].diff(var), args[1].diff(var)),
            Op::Mul => {
                let (a, b) = (&args[0], &args[1]);
                Expr::add(
                    Expr::mul(a.clone(), b.diff(var)),
                    Expr::mul(a.diff(var), b.clone()),
                )
            }
            Op::Div => {
                let (a, b) = (&args[0], &args[1]);
                Expr::div(
                    quotient_numerator(a, b, var),
                    Expr::mul(b.clone(), b.clone()),
                )
            }
            Op::Negate => Expr::negate(args[0].diff(var)),
            Op::Sum => Expr::sum(primes()),
            Op::Avg => Expr::div(Expr::sum(primes()), Expr::Const(args.len() as f64)),
            Op::Sumsq => Expr::mul(
                TWO,
                Expr::sum(
                    args.iter()
                        .map(|arg| Expr::mul(arg.clone(), arg.diff(var)))
                        .collect(),
                ),
            ),
            // length() is 0 everywhere, so is its derivative
            Op::Length if args.is_empty() => ZERO,
            Op::Length => Expr::div(
                Expr::sumsq(args.to_vec()).diff(var),
                Expr::mul(TWO, Expr::length(args.to_vec())),
            ),
            Op::Atan => {
                let a = &args[0];
                Expr::div(a.diff(var), Expr::add(ONE, Expr::mul(a.clone(), a.clone())))
            }
            Op::Atan2 => {
                let (a, b) = (&args[0], &args[1]);
                Expr::div(
                    quotient_numerator(a, b, var),
                    Expr::add(
                        Expr::mul(a.clone(), a.clone()),
                        Expr::mul(b.clone(), b.clone()),
                    ),
                )
            }
            Op::Sinh => Expr::mul(Expr::cosh(args[0].clone()), args[0].diff(var)),
            Op::Cosh => Expr::mul(Expr::sinh(args[0].clone()), args[0].diff(var)),
        }
    }
}

/// `da * b - a * db`
fn quotient_numerator(a: &Expr, b: &Expr, var: Var) -> Expr {
    Expr::sub(
        Expr::mul(a.diff(var), b.clone()),
        Expr::mul(a.clone(), b.diff(var)),
    )
}
