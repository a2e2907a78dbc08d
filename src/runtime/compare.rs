//! Equality and ordering between runtime values.
//!
//! Numbers, strings and booleans are totally ordered (`False < True`,
//! strings byte-wise). Instances compare through user `__eq__`/`__lt__`
//! hooks; without `__eq__` equality falls back to identity, while ordering
//! without `__lt__` is an error.

use std::rc::Rc;

use crate::interpreter::Context;
use crate::runtime::error::RuntimeError;
use crate::runtime::instance::{EQ_METHOD, LT_METHOD};
use crate::runtime::object::Object;
use crate::runtime::value::ObjectHolder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
}

impl Comparator {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
            Comparator::Less => "<",
            Comparator::Greater => ">",
            Comparator::LessOrEqual => "<=",
            Comparator::GreaterOrEqual => ">=",
        }
    }

    pub fn apply(
        self,
        lhs: &ObjectHolder,
        rhs: &ObjectHolder,
        context: &mut Context<'_>,
    ) -> Result<bool, RuntimeError> {
        match self {
            Comparator::Equal => equal(lhs, rhs, context),
            Comparator::NotEqual => not_equal(lhs, rhs, context),
            Comparator::Less => less(lhs, rhs, context),
            Comparator::Greater => greater(lhs, rhs, context),
            Comparator::LessOrEqual => less_or_equal(lhs, rhs, context),
            Comparator::GreaterOrEqual => greater_or_equal(lhs, rhs, context),
        }
    }
}

pub fn equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut Context<'_>,
) -> Result<bool, RuntimeError> {
    let (left, right) = match (lhs.get(), rhs.get()) {
        (None, None) => return Ok(true),
        (Some(left), Some(right)) => (left, right),
        _ => return Ok(false),
    };
    match (&*left, &*right) {
        (Object::Number(a), Object::Number(b)) => Ok(a == b),
        (Object::String(a), Object::String(b)) => Ok(a == b),
        (Object::Bool(a), Object::Bool(b)) => Ok(a == b),
        (Object::Class(a), Object::Class(b)) => Ok(a == b),
        (Object::Instance(instance), _)
            if instance.has_method(EQ_METHOD, 1, context.classes()) =>
        {
            Ok(instance
                .call(EQ_METHOD, vec![rhs.clone()], context)?
                .is_true())
        }
        (Object::Instance(_), Object::Instance(_)) => Ok(Rc::ptr_eq(&left, &right)),
        _ => Err(unsupported("==", lhs, rhs, context)),
    }
}

pub fn less(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut Context<'_>,
) -> Result<bool, RuntimeError> {
    let (left, right) = (lhs.get(), rhs.get());
    match (left.as_deref(), right.as_deref()) {
        (Some(Object::Number(a)), Some(Object::Number(b))) => Ok(a < b),
        (Some(Object::String(a)), Some(Object::String(b))) => Ok(a < b),
        (Some(Object::Bool(a)), Some(Object::Bool(b))) => Ok(a < b),
        (Some(Object::Instance(instance)), _)
            if instance.has_method(LT_METHOD, 1, context.classes()) =>
        {
            Ok(instance
                .call(LT_METHOD, vec![rhs.clone()], context)?
                .is_true())
        }
        _ => Err(unsupported("<", lhs, rhs, context)),
    }
}

pub fn not_equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut Context<'_>,
) -> Result<bool, RuntimeError> {
    Ok(!equal(lhs, rhs, context)?)
}

pub fn greater(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut Context<'_>,
) -> Result<bool, RuntimeError> {
    Ok(!less(lhs, rhs, context)? && !equal(lhs, rhs, context)?)
}

pub fn less_or_equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut Context<'_>,
) -> Result<bool, RuntimeError> {
    Ok(!greater(lhs, rhs, context)?)
}

pub fn greater_or_equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &mut Context<'_>,
) -> Result<bool, RuntimeError> {
    Ok(!less(lhs, rhs, context)?)
}

fn unsupported(
    operation: &str,
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    context: &Context<'_>,
) -> RuntimeError {
    RuntimeError::unsupported_operands(operation, lhs.type_name(context), rhs.type_name(context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::class::ClassTable;
    use crate::runtime::instance::ClassInstance;

    fn compare(comparator: Comparator, lhs: ObjectHolder, rhs: ObjectHolder) -> Result<bool, RuntimeError> {
        let classes = ClassTable::new();
        let mut output = Vec::new();
        let mut context = Context::new(&classes, &mut output);
        comparator.apply(&lhs, &rhs, &mut context)
    }

    #[test]
    fn orders_numbers_strings_and_bools() {
        use ObjectHolder as H;
        assert_eq!(compare(Comparator::Less, H::number(1), H::number(2)), Ok(true));
        assert_eq!(compare(Comparator::GreaterOrEqual, H::number(2), H::number(2)), Ok(true));
        assert_eq!(compare(Comparator::Greater, H::number(2), H::number(2)), Ok(false));
        assert_eq!(compare(Comparator::Less, H::string("abc"), H::string("abd")), Ok(true));
        assert_eq!(compare(Comparator::Less, H::string("Z"), H::string("a")), Ok(true));
        assert_eq!(compare(Comparator::Less, H::bool(false), H::bool(true)), Ok(true));
        assert_eq!(compare(Comparator::LessOrEqual, H::bool(true), H::bool(false)), Ok(false));
        assert_eq!(compare(Comparator::NotEqual, H::string("a"), H::string("a")), Ok(false));
    }

    #[test]
    fn none_equals_only_none() {
        use ObjectHolder as H;
        assert_eq!(compare(Comparator::Equal, H::none(), H::none()), Ok(true));
        assert_eq!(compare(Comparator::Equal, H::none(), H::number(0)), Ok(false));
        assert_eq!(compare(Comparator::NotEqual, H::number(0), H::none()), Ok(true));
    }

    #[test]
    fn rejects_mixed_primitive_types() {
        let error = compare(
            Comparator::Equal,
            ObjectHolder::number(1),
            ObjectHolder::string("1"),
        )
        .expect_err("mixed types");
        assert_eq!(
            error,
            RuntimeError::UnsupportedOperands {
                operation: "==".to_string(),
                lhs: "int".to_string(),
                rhs: "str".to_string(),
            }
        );
    }

    #[test]
    fn instances_without_hooks_use_identity_and_refuse_ordering() {
        let mut classes = ClassTable::new();
        let class = classes.define("Plain", Vec::new(), None).expect("define");
        let mut output = Vec::new();
        let mut context = Context::new(&classes, &mut output);
        let first = ClassInstance::create(class);
        let second = ClassInstance::create(class);

        assert_eq!(equal(&first, &first.clone(), &mut context), Ok(true));
        assert_eq!(equal(&first, &second, &mut context), Ok(false));
        let error = less(&first, &second, &mut context).expect_err("no ordering");
        assert_eq!(
            error,
            RuntimeError::UnsupportedOperands {
                operation: "<".to_string(),
                lhs: "Plain".to_string(),
                rhs: "Plain".to_string(),
            }
        );
    }
}
