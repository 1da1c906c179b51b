//! Syntax definition.

use crate::lexer::Token;
use std::{fmt, mem};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Mul,
    Div,
}

impl Operator {
    /// Map an operator token to the corresponding binary operator.
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Plus => Some(Self::Plus),
            Token::Minus => Some(Self::Minus),
            Token::Mul => Some(Self::Mul),
            Token::Div => Some(Self::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed arithmetic expression.
///
/// Parentheses only affect the shape of the tree and have no node of their own.
/// Dropping and displaying a tree do not recurse, so arbitrarily long operator
/// chains are fine; the derived `Clone`, `PartialEq` and `Debug` do recurse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Num(i64),
    BinOp {
        lhs: Box<Expr>,
        op: Operator,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binop(lhs: Expr, op: Operator, rhs: Expr) -> Self {
        Self::BinOp {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        // Subtrees are detached onto a heap stack; the call stack stays flat
        // regardless of the tree depth.
        let mut stack = vec![];
        detach_children(self, &mut stack);
        while let Some(mut expr) = stack.pop() {
            detach_children(&mut expr, &mut stack);
        }
    }
}

fn detach_children(expr: &mut Expr, stack: &mut Vec<Expr>) {
    if let Expr::BinOp { lhs, rhs, .. } = expr {
        for child in [lhs, rhs] {
            if let Expr::BinOp { .. } = **child {
                stack.push(mem::replace(&mut **child, Expr::Num(0)));
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Item<'a> {
            Expr(&'a Expr),
            Space,
            Close,
        }

        let mut items = vec![Item::Expr(self)];
        while let Some(item) = items.pop() {
            match item {
                Item::Expr(Expr::Num(n)) => write!(f, "{}", n)?,
                Item::Expr(Expr::BinOp { lhs, op, rhs }) => {
                    write!(f, "({} ", op)?;
                    items.push(Item::Close);
                    items.push(Item::Expr(rhs));
                    items.push(Item::Space);
                    items.push(Item::Expr(lhs));
                }
                Item::Space => f.write_str(" ")?,
                Item::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}
