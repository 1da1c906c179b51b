//! Tree-walking evaluator.

use crate::syntax::{Expr, Operator};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in `{lhs} {op} {rhs}'")]
    Overflow { lhs: i64, op: Operator, rhs: i64 },

    #[error("empty value stack")]
    EmptyValueStack,
}

/// Evaluate the expression tree.
///
/// The left operand of a binary operator is always evaluated before the
/// right one. Division truncates toward zero, and every operation is checked
/// so that overflow is reported instead of wrapping.
///
/// The tree is walked with an explicit stack, so the depth of the tree is
/// not limited by the call stack.
pub fn evaluate(expr: &Expr) -> Result<i64, EvalError> {
    let span = tracing::trace_span!("evaluate");
    let _entered = span.enter();

    let mut tasks = vec![Task::Visit(expr)];
    let mut values: Vec<i64> = vec![];

    while let Some(task) = tasks.pop() {
        match task {
            Task::Visit(Expr::Num(n)) => values.push(*n),
            Task::Visit(Expr::BinOp { lhs, op, rhs }) => {
                tasks.push(Task::Apply(*op));
                tasks.push(Task::Visit(rhs));
                tasks.push(Task::Visit(lhs));
            }
            Task::Apply(op) => {
                let (lhs, rhs) = match (values.pop(), values.pop()) {
                    (Some(rhs), Some(lhs)) => (lhs, rhs),
                    _ => return Err(EvalError::EmptyValueStack),
                };
                let value = apply(op, lhs, rhs)?;
                tracing::trace!("{} {} {} = {}", lhs, op, rhs, value);
                values.push(value);
            }
        }
    }

    values.pop().ok_or(EvalError::EmptyValueStack)
}

enum Task<'a> {
    Visit(&'a Expr),
    Apply(Operator),
}

fn apply(op: Operator, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    let value = match op {
        Operator::Plus => lhs.checked_add(rhs),
        Operator::Minus => lhs.checked_sub(rhs),
        Operator::Mul => lhs.checked_mul(rhs),
        Operator::Div if rhs == 0 => return Err(EvalError::DivisionByZero),
        Operator::Div => lhs.checked_div(rhs),
    };
    value.ok_or(EvalError::Overflow { lhs, op, rhs })
}
