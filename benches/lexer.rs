mod common;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mython::lexer::{self, Lexer};
use mython::token::TokenKind;

fn bench_lexer(c: &mut Criterion) {
    for (label, path) in common::WORKLOADS {
        let source = common::load_source(path);
        c.bench_function(&format!("lexer_tokenize_{label}"), |b| {
            b.iter(|| {
                let out = lexer::tokenize(black_box(&source)).expect("tokenize");
                black_box(out);
            })
        });
    }

    let source = common::long_source(200);
    c.bench_function("lexer_tokenize_long", |b| {
        b.iter(|| {
            let out = lexer::tokenize(black_box(&source)).expect("tokenize");
            black_box(out);
        })
    });

    c.bench_function("lexer_pull_long", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(&source)).expect("lexer");
            let mut count = 0usize;
            while !lexer.current_token().is(&TokenKind::Eof) {
                lexer.advance().expect("advance");
                count += 1;
            }
            black_box(count);
        })
    });
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
