use crate::ast::BinaryOperator;
use crate::runtime::error::RuntimeError;
use crate::runtime::instance::ADD_METHOD;
use crate::runtime::object::Object;
use crate::runtime::value::ObjectHolder;

use super::Context;

pub(super) fn binary(
    op: BinaryOperator,
    lhs: ObjectHolder,
    rhs: ObjectHolder,
    context: &mut Context<'_>,
) -> Result<ObjectHolder, RuntimeError> {
    match op {
        BinaryOperator::Add => add(lhs, rhs, context),
        BinaryOperator::Sub => arithmetic(op, &lhs, &rhs, context, i64::checked_sub),
        BinaryOperator::Mult => arithmetic(op, &lhs, &rhs, context, i64::checked_mul),
        BinaryOperator::Div => {
            if rhs.as_number() == Some(0) && lhs.as_number().is_some() {
                return Err(RuntimeError::DivisionByZero);
            }
            // Rust integer division already truncates toward zero.
            arithmetic(op, &lhs, &rhs, context, i64::checked_div)
        }
    }
}

/// Numbers add, strings concatenate, and an instance on the left may
/// provide a one-argument `__add__`.
fn add(
    lhs: ObjectHolder,
    rhs: ObjectHolder,
    context: &mut Context<'_>,
) -> Result<ObjectHolder, RuntimeError> {
    let (left, right) = (lhs.get(), rhs.get());
    match (left.as_deref(), right.as_deref()) {
        (Some(Object::Number(_)), Some(Object::Number(_))) => {
            arithmetic(BinaryOperator::Add, &lhs, &rhs, context, i64::checked_add)
        }
        (Some(Object::String(a)), Some(Object::String(b))) => {
            Ok(ObjectHolder::string(format!("{a}{b}")))
        }
        (Some(Object::Instance(instance)), _)
            if instance.has_method(ADD_METHOD, 1, context.classes()) =>
        {
            instance.call(ADD_METHOD, vec![rhs.clone()], context)
        }
        _ => Err(unsupported(BinaryOperator::Add, &lhs, &rhs, context)),
    }
}

fn arithmetic(
    op: BinaryOperator,
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &Context<'_>,
    apply: fn(i64, i64) -> Option<i64>,
) -> Result<ObjectHolder, RuntimeError> {
    let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) else {
        return Err(unsupported(op, lhs, rhs, context));
    };
    apply(a, b)
        .map(ObjectHolder::number)
        .ok_or_else(|| RuntimeError::IntegerOverflow {
            operation: op.symbol().to_string(),
        })
}

fn unsupported(
    op: BinaryOperator,
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &Context<'_>,
) -> RuntimeError {
    RuntimeError::unsupported_operands(op.symbol(), lhs.type_name(context), rhs.type_name(context))
}
