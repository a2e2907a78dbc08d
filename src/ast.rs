//! Statement tree executed by the interpreter.
//!
//! Nodes are immutable once built; a method body is a single node executed
//! again for every call with a freshly built scope.

use crate::interpreter::{Context, ExecResult};
use crate::runtime::class::ClassId;
use crate::runtime::compare::Comparator;
use crate::runtime::error::RuntimeError;
use crate::runtime::value::Closure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mult,
    Div,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::Div => "/",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Number(i64),
    String(String),
    Bool(bool),
    None,
    Assignment {
        name: String,
        value: Box<Statement>,
    },
    /// `a` or `a.b.c`: the first name comes from the scope, every further
    /// name is a field of the instance before it.
    VariableValue {
        dotted_ids: Vec<String>,
    },
    Print {
        args: Vec<Statement>,
    },
    MethodCall {
        object: Box<Statement>,
        method: String,
        args: Vec<Statement>,
    },
    Stringify(Box<Statement>),
    BinaryOp {
        left: Box<Statement>,
        op: BinaryOperator,
        right: Box<Statement>,
    },
    Or {
        left: Box<Statement>,
        right: Box<Statement>,
    },
    And {
        left: Box<Statement>,
        right: Box<Statement>,
    },
    Not(Box<Statement>),
    Comparison {
        comparator: Comparator,
        left: Box<Statement>,
        right: Box<Statement>,
    },
    Compound(Vec<Statement>),
    Return(Box<Statement>),
    IfElse {
        condition: Box<Statement>,
        if_body: Box<Statement>,
        else_body: Option<Box<Statement>>,
    },
    ClassDefinition(ClassId),
    FieldAssignment {
        object: Box<Statement>,
        field: String,
        value: Box<Statement>,
    },
    NewInstance {
        class: ClassId,
        args: Vec<Statement>,
    },
}

impl Statement {
    /// Runs this node against `closure`. See [`Context::exec`].
    pub fn execute(
        &self,
        closure: &mut Closure,
        context: &mut Context<'_>,
    ) -> Result<ExecResult, RuntimeError> {
        context.exec(self, closure)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Statement::String(value.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Statement::VariableValue {
            dotted_ids: vec![name.into()],
        }
    }

    pub fn dotted<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Statement::VariableValue {
            dotted_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn assignment(name: impl Into<String>, value: Statement) -> Self {
        Statement::Assignment {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn print(args: Vec<Statement>) -> Self {
        Statement::Print { args }
    }

    pub fn method_call(object: Statement, method: impl Into<String>, args: Vec<Statement>) -> Self {
        Statement::MethodCall {
            object: Box::new(object),
            method: method.into(),
            args,
        }
    }

    pub fn stringify(argument: Statement) -> Self {
        Statement::Stringify(Box::new(argument))
    }

    pub fn binary(left: Statement, op: BinaryOperator, right: Statement) -> Self {
        Statement::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn or(left: Statement, right: Statement) -> Self {
        Statement::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Statement, right: Statement) -> Self {
        Statement::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(argument: Statement) -> Self {
        Statement::Not(Box::new(argument))
    }

    pub fn comparison(comparator: Comparator, left: Statement, right: Statement) -> Self {
        Statement::Comparison {
            comparator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn ret(value: Statement) -> Self {
        Statement::Return(Box::new(value))
    }

    pub fn if_else(condition: Statement, if_body: Statement, else_body: Option<Statement>) -> Self {
        Statement::IfElse {
            condition: Box::new(condition),
            if_body: Box::new(if_body),
            else_body: else_body.map(Box::new),
        }
    }

    pub fn field_assignment(object: Statement, field: impl Into<String>, value: Statement) -> Self {
        Statement::FieldAssignment {
            object: Box::new(object),
            field: field.into(),
            value: Box::new(value),
        }
    }

    pub fn new_instance(class: ClassId, args: Vec<Statement>) -> Self {
        Statement::NewInstance { class, args }
    }
}
