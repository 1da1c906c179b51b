//! An evaluator of integer arithmetic expressions.
//!
//! The input text is tokenized by [`lexer`], parsed into an expression tree by
//! [`parser`] and reduced to an `i64` by [`eval`]. [`run`] chains the three
//! stages and reports the first failure.
//!
//! ```
//! assert_eq!(intcalc::run("(7 + 3) * (10 / (12 / (3 + 1) - 1))").unwrap(), 50);
//! ```

pub mod eval;
pub mod lexer;
pub mod parser;
pub mod syntax;

pub use crate::{
    eval::{evaluate, EvalError},
    lexer::{LexError, Lexer, Spanned, Token, TokenKind},
    parser::{parse, parse_with_config, Config, ParseError, Parser},
    syntax::{Expr, Operator},
};

/// The first failure of any stage of [`run`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Tokenize the whole input, excluding the end of input.
pub fn lex(source: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(source).collect()
}

/// Parse and evaluate the input.
pub fn run(source: &str) -> Result<i64, Error> {
    run_with_config(source, &Config::new())
}

/// Parse and evaluate the input, with the nesting limit taken from `config`.
pub fn run_with_config(source: &str, config: &Config) -> Result<i64, Error> {
    let expr = parse_with_config(source, config)?;
    Ok(evaluate(&expr)?)
}
