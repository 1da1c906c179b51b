//! Recursive-descent parser.
//!
//! The accepted grammar is:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := INTEGER | '(' expr ')'
//! ```
//!
//! Binary operators of the same precedence are folded to the left.

use crate::{
    lexer::{LexError, Lexer, Spanned, Token, TokenKind},
    syntax::{Expr, Operator},
};
use std::fmt;

/// Parse the whole input as a single expression.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    parse_with_config(source, &Config::new())
}

/// Parse the whole input as a single expression, with the nesting limit taken
/// from `config`.
pub fn parse_with_config(source: &str, config: &Config) -> Result<Expr, ParseError> {
    Parser::with_config(source, config)?.parse()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum nesting depth of parenthesized groups.
    ///
    /// Each group costs one level of recursion in the parser, and groups are
    /// the only construct the parser recurses on: operator chains are folded
    /// in a loop, and the resulting tree is evaluated and dropped without
    /// recursion. A limit of zero rejects any parenthesis.
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("from lexer: {0}")]
    Lex(#[from] LexError),

    #[error(
        "syntax error at offset {position}: expected {}, found `{found}'",
        one_of(.expected)
    )]
    Syntax {
        expected: &'static [TokenKind],
        found: Token,
        position: usize,
    },

    #[error("parentheses nested deeper than {limit} levels at offset {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

fn one_of(kinds: &[TokenKind]) -> impl fmt::Display + '_ {
    struct OneOf<'a>(&'a [TokenKind]);
    impl fmt::Display for OneOf<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if let [kind] = self.0 {
                return write!(f, "{}", kind);
            }
            f.write_str("one of ")?;
            for (i, kind) in self.0.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", kind)?;
            }
            Ok(())
        }
    }
    OneOf(kinds)
}

/// The parser pulling tokens from a [`Lexer`] with one token of lookahead.
#[derive(Debug)]
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    current: Spanned,
    depth: usize,
    max_depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a parser with the default [`Config`] and read the first token.
    pub fn new(source: &'source str) -> Result<Self, ParseError> {
        Self::with_config(source, &Config::new())
    }

    pub fn with_config(source: &'source str, config: &Config) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
            max_depth: config.max_depth,
        })
    }

    /// Parse the input as a single expression followed by the end of input.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let span = tracing::trace_span!("parse");
        let _entered = span.enter();

        let expr = self.expr()?;
        self.eat(&[TokenKind::EndOfInput])?;
        tracing::trace!("accepted");
        Ok(expr)
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        while let Some(op @ (Operator::Plus | Operator::Minus)) = Operator::from_token(&self.current.1)
        {
            self.advance()?;
            let rhs = self.term()?;
            tracing::trace!("reduce: expr -> expr `{}' term", op);
            lhs = Expr::binop(lhs, op, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.factor()?;
        while let Some(op @ (Operator::Mul | Operator::Div)) = Operator::from_token(&self.current.1) {
            self.advance()?;
            let rhs = self.factor()?;
            tracing::trace!("reduce: term -> term `{}' factor", op);
            lhs = Expr::binop(lhs, op, rhs);
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        match self.current {
            (_, Token::Integer(n), _) => {
                self.advance()?;
                tracing::trace!("reduce: factor -> INTEGER");
                Ok(Expr::Num(n))
            }
            (position, Token::LParen, _) => {
                if self.depth >= self.max_depth {
                    return Err(ParseError::NestingTooDeep {
                        limit: self.max_depth,
                        position,
                    });
                }
                self.depth += 1;
                self.advance()?;
                let expr = self.expr()?;
                self.eat(&[TokenKind::RParen])?;
                self.depth -= 1;
                tracing::trace!("reduce: factor -> `(' expr `)'");
                Ok(expr)
            }
            (position, found, _) => Err(ParseError::Syntax {
                expected: &[TokenKind::Integer, TokenKind::LParen],
                found,
                position,
            }),
        }
    }

    /// Consume the current token if its kind is one of `expected`.
    fn eat(&mut self, expected: &'static [TokenKind]) -> Result<(), ParseError> {
        let (position, found, _) = self.current;
        if !expected.contains(&found.kind()) {
            return Err(ParseError::Syntax {
                expected,
                found,
                position,
            });
        }
        self.advance()
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_token()?;
        tracing::trace!("offer token {:?}", self.current);
        Ok(())
    }
}
