use thiserror::Error;

/// Failures raised while evaluating a program. None of them are recovered
/// internally: the failing statement aborts the enclosing block, method call
/// and finally the top-level run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}'")]
    UnboundName { name: String },
    #[error("Operation '{operation}' expected {expected}, got {got}")]
    TypeMismatch {
        operation: String,
        expected: String,
        got: String,
    },
    #[error("Method '{method}' expected {expected} arguments, got {found}")]
    ArityMismatch {
        method: String,
        expected: usize,
        found: usize,
    },
    #[error("Unsupported operand types for '{operation}': {lhs} and {rhs}")]
    UnsupportedOperands {
        operation: String,
        lhs: String,
        rhs: String,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow in '{operation}'")]
    IntegerOverflow { operation: String },
    #[error("Unknown method '{method}' for class {class_name}")]
    NoSuchMethod { method: String, class_name: String },
    #[error("Unknown parent class for '{class_name}'")]
    UnknownParentClass { class_name: String },
    #[error("Class #{index} is used before it is defined")]
    UndefinedClass { index: usize },
    #[error("Return outside of method")]
    ReturnOutsideMethod,
    #[error("Failed to write program output: {message}")]
    Output { message: String },
}

impl RuntimeError {
    pub(crate) fn expect_method_arity(
        method: &str,
        expected: usize,
        found: usize,
    ) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::ArityMismatch {
                method: method.to_string(),
                expected,
                found,
            })
        }
    }

    pub(crate) fn unsupported_operands(operation: &str, lhs: String, rhs: String) -> Self {
        Self::UnsupportedOperands {
            operation: operation.to_string(),
            lhs,
            rhs,
        }
    }

    pub(crate) fn expected_instance(operation: String, got: String) -> Self {
        Self::TypeMismatch {
            operation,
            expected: "class instance".to_string(),
            got,
        }
    }
}
