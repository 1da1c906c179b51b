use anyhow::Context as _;
use clap::Parser;
use intcalc::Config;
use std::io::{self, BufRead as _};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print the token stream before evaluating.
    #[arg(long)]
    tokens: bool,

    /// Print the parsed expression tree before evaluating.
    #[arg(long)]
    ast: bool,

    /// The maximum nesting depth of parenthesized groups.
    #[arg(long, default_value_t = Config::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// The expression to evaluate.
    ///
    /// If omitted, each non-empty line of standard input is evaluated in turn.
    expr: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    tracing::trace!("CLI args = {:?}", args);

    let mut config = Config::new();
    config.max_depth(args.max_depth);

    if let Some(expr) = &args.expr {
        let value = process_input(&args, &config, expr)
            .with_context(|| anyhow::anyhow!("errored during evaluating {:?}", expr))?;
        println!("{}", value);
        return Ok(());
    }

    let mut num_errors = 0;
    for (lineno, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match process_input(&args, &config, &line) {
            Ok(value) => println!("{}", value),
            Err(err) => {
                num_errors += 1;
                eprintln!("[error] line {}: {:#}", lineno + 1, err);
            }
        }
    }
    if num_errors > 0 {
        let suffix = if num_errors == 1 { "" } else { "s" };
        anyhow::bail!("{} expression{} failed", num_errors, suffix);
    }

    Ok(())
}

fn process_input(args: &Args, config: &Config, input: &str) -> anyhow::Result<i64> {
    if args.tokens {
        let tokens = intcalc::lex(input)?;
        let rendered: Vec<String> = tokens
            .iter()
            .map(|(_, tok, _)| format!("Token({}, {})", tok.kind(), tok))
            .collect();
        println!("tokens: {}", rendered.join(" "));
    }

    let expr = intcalc::parse_with_config(input, config)?;
    if args.ast {
        println!("parsed: {}", expr);
    }

    let value = intcalc::evaluate(&expr)?;
    tracing::debug!("{} => {}", input, value);
    Ok(value)
}
