#![allow(dead_code)]
use std::fs;

use mython::ast::{BinaryOperator, Statement};
use mython::runtime::{ClassId, ClassTable, Comparator, Method};

pub const WORKLOADS: [(&str, &str); 2] = [
    ("class", "tests/lexer_cases/class_with_methods/program.my"),
    ("operators", "tests/lexer_cases/operators/program.my"),
];

pub fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

/// Repeats a nested class definition until the source has `classes` copies.
pub fn long_source(classes: usize) -> String {
    let mut source = String::new();
    for index in 0..classes {
        source.push_str(&format!(
            "class C{index}:\n  def run(self, n):\n    if n >= {index} and n != 0:\n      return 'big'\n    else:\n      return \"small\"\n\n"
        ));
    }
    source.push_str("print C0().run(1)\n");
    source
}

/// `class Math` with a doubly recursive `fib(n)`.
pub fn fib_class(classes: &mut ClassTable) -> ClassId {
    let recurse = |delta| {
        Statement::method_call(
            Statement::variable("self"),
            "fib",
            vec![Statement::binary(
                Statement::variable("n"),
                BinaryOperator::Sub,
                Statement::Number(delta),
            )],
        )
    };
    let fib = Method::new(
        "fib",
        ["n"],
        Statement::Compound(vec![
            Statement::if_else(
                Statement::comparison(Comparator::Less, Statement::variable("n"), Statement::Number(2)),
                Statement::ret(Statement::variable("n")),
                None,
            ),
            Statement::ret(Statement::binary(recurse(1), BinaryOperator::Add, recurse(2))),
        ]),
    );
    classes
        .define("Math", vec![fib], None)
        .unwrap_or_else(|err| panic!("define Math: {err}"))
}

pub fn fib_program(class: ClassId, n: i64) -> Statement {
    Statement::Compound(vec![
        Statement::assignment("m", Statement::new_instance(class, vec![])),
        Statement::print(vec![Statement::method_call(
            Statement::variable("m"),
            "fib",
            vec![Statement::Number(n)],
        )]),
    ])
}

/// Straight-line arithmetic and string building over `rounds` assignments.
pub fn arithmetic_program(rounds: usize) -> Statement {
    let mut statements = vec![
        Statement::assignment("total", Statement::Number(0)),
        Statement::assignment("text", Statement::string("")),
    ];
    for round in 0..rounds {
        let round = round as i64;
        statements.push(Statement::assignment(
            "total",
            Statement::binary(
                Statement::variable("total"),
                BinaryOperator::Add,
                Statement::binary(Statement::Number(round), BinaryOperator::Mult, Statement::Number(3)),
            ),
        ));
        statements.push(Statement::assignment(
            "text",
            Statement::binary(
                Statement::variable("text"),
                BinaryOperator::Add,
                Statement::stringify(Statement::variable("total")),
            ),
        ));
    }
    statements.push(Statement::print(vec![Statement::variable("total")]));
    Statement::Compound(statements)
}
