//! Lexer implementation.

use logos::Logos;
use std::fmt;

/// The kind of a lexical token, without its value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Integer,
    Plus,
    Minus,
    Mul,
    Div,
    LParen,
    RParen,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "INTEGER",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::EndOfInput => "EOF",
        })
    }
}

/// A token produced by [`Lexer`].
///
/// Only `Integer` carries a value; it is never negative since the grammar
/// has no sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    Integer(i64),
    Plus,
    Minus,
    Mul,
    Div,
    LParen,
    RParen,
    EndOfInput,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Integer(..) => TokenKind::Integer,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::Mul => TokenKind::Mul,
            Self::Div => TokenKind::Div,
            Self::LParen => TokenKind::LParen,
            Self::RParen => TokenKind::RParen,
            Self::EndOfInput => TokenKind::EndOfInput,
        }
    }

    /// Return the value of an integer literal.
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Return the literal text of an operator or a parenthesis.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::Plus => Some("+"),
            Self::Minus => Some("-"),
            Self::Mul => Some("*"),
            Self::Div => Some("/"),
            Self::LParen => Some("("),
            Self::RParen => Some(")"),
            Self::Integer(..) | Self::EndOfInput => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::EndOfInput => f.write_str("<EOI>"),
            tok => f.write_str(tok.symbol().unwrap_or_default()),
        }
    }
}

/// A token together with the byte offsets of its start and end.
pub type Spanned = (usize, Token, usize);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character {ch:?} at offset {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("integer literal `{literal}' at offset {position} is out of range")]
    IntegerOverflow { literal: String, position: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedChar { position, .. } | Self::IntegerOverflow { position, .. } => {
                *position
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
enum LexemeError {
    #[default]
    Unrecognized,
    Overflow,
}

#[derive(Debug, Copy, Clone, Logos, PartialEq)]
#[logos(error = LexemeError)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().map_err(|_| LexemeError::Overflow))]
    Integer(i64),
}

impl From<Lexeme> for Token {
    fn from(lexeme: Lexeme) -> Self {
        match lexeme {
            Lexeme::LParen => Self::LParen,
            Lexeme::RParen => Self::RParen,
            Lexeme::Plus => Self::Plus,
            Lexeme::Minus => Self::Minus,
            Lexeme::Star => Self::Mul,
            Lexeme::Slash => Self::Div,
            Lexeme::Integer(n) => Self::Integer(n),
        }
    }
}

/// A pull-based lexer over a borrowed source text.
///
/// Tokens are produced one at a time by [`Lexer::next_token`]. Once the
/// source is exhausted, or after an error has been reported, every further
/// call returns [`Token::EndOfInput`].
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Lexeme>,
    exhausted: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            inner: Lexeme::lexer(source),
            exhausted: false,
        }
    }

    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    pub fn next_token(&mut self) -> Result<Spanned, LexError> {
        let eoi = self.source().len();
        if self.exhausted {
            return Ok((eoi, Token::EndOfInput, eoi));
        }

        match self.inner.next() {
            Some(Ok(lexeme)) => {
                let span = self.inner.span();
                Ok((span.start, lexeme.into(), span.end))
            }
            Some(Err(err)) => {
                self.exhausted = true;
                let position = self.inner.span().start;
                Err(match err {
                    LexemeError::Overflow => LexError::IntegerOverflow {
                        literal: self.inner.slice().to_owned(),
                        position,
                    },
                    LexemeError::Unrecognized => LexError::UnexpectedChar {
                        ch: self.source()[position..]
                            .chars()
                            .next()
                            .unwrap_or(char::REPLACEMENT_CHARACTER),
                        position,
                    },
                })
            }
            None => {
                self.exhausted = true;
                Ok((eoi, Token::EndOfInput, eoi))
            }
        }
    }
}

impl fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.inner.span().end)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

/// Iterates over the tokens preceding the end of input.
impl Iterator for Lexer<'_> {
    type Item = Result<Spanned, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.next_token() {
            Ok((_, Token::EndOfInput, _)) => None,
            res => Some(res),
        }
    }
}
