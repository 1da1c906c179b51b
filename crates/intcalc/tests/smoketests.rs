use intcalc::{Config, Error, EvalError, LexError, ParseError, Token, TokenKind};

macro_rules! define_tests {
    ($($name:ident: $input:expr => $expected:expr,)*) => {$(
        #[test]
        fn $name() {
            assert_eq!(intcalc::run($input), Ok($expected), "input: {:?}", $input);
        }
    )*};
}

define_tests! {
    single_integer: "42" => 42,
    addition: "1 + 2" => 3,
    left_assoc_sub: "10 - 3 - 2" => 5,
    left_assoc_div: "100 / 10 / 5" => 2,
    precedence: "2 + 3 * 4" => 14,
    precedence_mixed: "2 * 3 + 4 * 5 - 6 / 2" => 23,
    grouping: "(2 + 3) * 4" => 20,
    nested_grouping: "(7 + 3) * (10 / (12 / (3 + 1) - 1))" => 50,
    truncating_division: "7 / 2" => 3,
    negative_truncation: "(1 - 8) / 2" => -3,
    negative_result: "3 - 10" => -7,
    whitespace: "  10   +   5 " => 15,
    no_whitespace: "2*(3+4)" => 14,
    tabs_and_newlines: "1\t+\n2" => 3,
    demo_input: "10 + 5 + 96854654 -5" => 96854664,
    leading_zeros: "010 + 1" => 11,
}

#[test]
fn division_by_zero() {
    assert_eq!(
        intcalc::run("5 / 0"),
        Err(Error::Eval(EvalError::DivisionByZero))
    );
    assert_eq!(
        intcalc::run("5 / (2 - 2)"),
        Err(Error::Eval(EvalError::DivisionByZero))
    );
}

#[test]
fn unrecognized_character() {
    assert_eq!(
        intcalc::run("3 & 4"),
        Err(Error::Parse(ParseError::Lex(LexError::UnexpectedChar {
            ch: '&',
            position: 2
        })))
    );
}

#[test]
fn unbalanced_parenthesis() {
    assert_eq!(
        intcalc::run("(3 + 4"),
        Err(Error::Parse(ParseError::Syntax {
            expected: &[TokenKind::RParen],
            found: Token::EndOfInput,
            position: 6,
        }))
    );
}

#[test]
fn trailing_tokens() {
    assert!(matches!(
        intcalc::run("1 + 2 3"),
        Err(Error::Parse(ParseError::Syntax {
            expected: [TokenKind::EndOfInput],
            found: Token::Integer(3),
            position: 6,
        }))
    ));
}

#[test]
fn overflow() {
    assert!(matches!(
        intcalc::run("99999999999999999999"),
        Err(Error::Parse(ParseError::Lex(LexError::IntegerOverflow { position: 0, .. })))
    ));
    assert!(matches!(
        intcalc::run("9223372036854775807 * 2"),
        Err(Error::Eval(EvalError::Overflow { .. }))
    ));
}

#[test]
fn nesting_limit() {
    let mut config = Config::new();
    config.max_depth(3);
    assert_eq!(intcalc::run_with_config("(((1 + 1)))", &config), Ok(2));
    assert!(matches!(
        intcalc::run_with_config("((((1))))", &config),
        Err(Error::Parse(ParseError::NestingTooDeep {
            limit: 3,
            position: 3
        }))
    ));
}

#[test]
fn idempotence() {
    let input = "(7 + 3) * (10 / (12 / (3 + 1) - 1))";
    assert_eq!(intcalc::run(input), intcalc::run(input));

    let input = "5 / 0";
    assert_eq!(intcalc::run(input), intcalc::run(input));
}

#[test]
fn lex_stops_before_end_of_input() {
    let tokens = intcalc::lex("(1 + 2)").unwrap();
    assert_eq!(
        tokens,
        [
            (0, Token::LParen, 1),
            (1, Token::Integer(1), 2),
            (3, Token::Plus, 4),
            (5, Token::Integer(2), 6),
            (6, Token::RParen, 7),
        ]
    );
    assert_eq!(
        intcalc::lex("1 $"),
        Err(LexError::UnexpectedChar {
            ch: '$',
            position: 2
        })
    );
}

#[test]
fn error_messages() {
    let err = intcalc::run("(3 + 4").unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error at offset 6: expected RPAREN, found `<EOI>'"
    );
    let err = intcalc::run("3 & 4").unwrap_err();
    assert_eq!(
        err.to_string(),
        "from lexer: unexpected character '&' at offset 2"
    );
    let err = intcalc::run("5 / 0").unwrap_err();
    assert_eq!(err.to_string(), "division by zero");
}

#[test]
fn long_operator_chains() {
    let input = format!("1{}", "+1".repeat(100_000));
    assert_eq!(intcalc::run(&input), Ok(100_001));

    let input = format!("7{}", " * 1 - 1 + 1".repeat(100_000));
    assert_eq!(intcalc::run(&input), Ok(7));

    let expr = intcalc::parse("2 / 2 * ".repeat(100_000).trim_end_matches(" * ")).unwrap();
    assert_eq!(intcalc::evaluate(&expr), Ok(1));
    drop(expr);
}
