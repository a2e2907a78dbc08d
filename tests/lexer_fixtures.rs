use anyhow::{Context, Result, ensure};
use std::path::Path;

use mython::lexer;
use test_support::{Case, CaseClass, load_cases};

fn cases() -> Result<Vec<Case>> {
    load_cases(&Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/lexer_cases"))
}

fn check_tokens(case: &Case, source: &str) -> Result<()> {
    let tokens = lexer::tokenize(source).with_context(|| format!("Tokenizing {}", case.name))?;
    let actual: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    let expected = case.expected_tokens()?;
    pretty_assertions::assert_eq!(actual, expected, "Token mismatch for {}", case.name);
    Ok(())
}

fn check_error(case: &Case, source: &str) -> Result<()> {
    let expected = case.expected_error()?;
    let result = lexer::tokenize(source);
    ensure!(
        result.is_err(),
        "Expected lexer error in {}, but tokenizing succeeded",
        case.name
    );
    let actual = result.expect_err("result checked as err").to_string();
    ensure!(
        actual.contains(&expected),
        "Expected lexer error containing '{expected}' in {}, got '{actual}'",
        case.name
    );
    Ok(())
}

#[test]
fn lexer_cases_match_expectations() -> Result<()> {
    for case in cases()? {
        let source = case.read_program()?;
        match case.spec.class {
            CaseClass::Tokens => check_tokens(&case, &source)?,
            CaseClass::LexError => check_error(&case, &source)?,
        }
    }
    Ok(())
}

#[test]
fn token_streams_are_balanced() -> Result<()> {
    use mython::token::TokenKind;

    for case in cases()? {
        if case.spec.class != CaseClass::Tokens {
            continue;
        }
        let source = case.read_program()?;
        let tokens = lexer::tokenize(&source)?;
        let mut depth = 0usize;
        for token in &tokens {
            match token.kind {
                TokenKind::Indent => depth += 1,
                TokenKind::Dedent => {
                    depth = depth
                        .checked_sub(1)
                        .with_context(|| format!("Dedent below zero in {}", case.name))?;
                }
                _ => {}
            }
        }
        ensure!(depth == 0, "Unclosed blocks in {}", case.name);
        ensure!(
            tokens.last().is_some_and(|token| token.is(&TokenKind::Eof)),
            "Missing Eof in {}",
            case.name
        );
    }
    Ok(())
}
