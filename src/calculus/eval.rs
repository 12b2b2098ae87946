use crate::syntax::{ast::Expr, operators::Op};

impl Expr {
    /// Evaluates with `x`, `y`, `z` bound to the given values. Division by
    /// zero and friends give IEEE infinities or NaN.
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        self.evaluate_at(&[x, y, z])
    }

    pub fn evaluate_at(&self, vars: &[f64; 3]) -> f64 {
        match self {
            Expr::Const(value) => *value,
            Expr::Variable(var) => vars[var.index()],
            Expr::Operation(operation) => {
                let values: Vec<f64> = operation
                    .args()
                    .iter()
                    .map(|arg| arg.evaluate_at(vars))
                    .collect();
                operation.op().apply(&values)
            }
        }
    }
}

fn sum_of_squares(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum()
}

impl Op {
    /// Applies the operation to already evaluated operands. `values` must
    /// match the arity, which `Operation` guarantees.
    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            Op::Add => values[0] + values[1],
            Op::Sub => values[0] - values[1],
            Op::Mul => values[0] * values[1],
            Op::Div => values[0] / values[1],
            Op::Negate => -values[0],
            Op::Sum => values.iter().sum(),
            Op::Avg => values.iter().sum::<f64>() / values.len() as f64,
            Op::Sumsq => sum_of_squares(values),
            Op::Length => sum_of_squares(values).sqrt(),
            Op::Atan => values[0].atan(),
            Op::Atan2 => values[0].atan2(values[1]),
            Op::Sinh => values[0].sinh(),
            Op::Cosh => values[0].cosh(),
        }
    }
}
