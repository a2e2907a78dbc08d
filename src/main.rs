use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result, bail};

use mython::lexer;
use mython::token::TokenKind;

fn main() -> Result<()> {
    mython::init_tracing();

    let mut balance = false;
    let mut input_path: Option<String> = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--balance" | "-b" => balance = true,
            _ if input_path.is_some() => bail!("Only one input file is supported"),
            _ => input_path = Some(arg),
        }
    }

    let source = if let Some(path) = input_path {
        fs::read_to_string(&path).with_context(|| format!("Reading {path}"))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Reading stdin")?;
        buffer
    };

    let tokens = lexer::tokenize(&source)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if balance {
        let indents = tokens
            .iter()
            .filter(|token| token.is(&TokenKind::Indent))
            .count();
        let dedents = tokens
            .iter()
            .filter(|token| token.is(&TokenKind::Dedent))
            .count();
        writeln!(out, "tokens: {}", tokens.len())?;
        writeln!(out, "indents: {indents}")?;
        writeln!(out, "dedents: {dedents}")?;
        if indents != dedents {
            bail!("Unbalanced indentation: {indents} indents, {dedents} dedents");
        }
        return Ok(());
    }

    for token in &tokens {
        writeln!(out, "{}:{}\t{token}", token.span.line, token.span.column)?;
    }
    Ok(())
}
