use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::interpreter::Context;
use crate::runtime::error::RuntimeError;
use crate::runtime::instance::STR_METHOD;
use crate::runtime::object::{Object, bool_output};

/// Name-to-value scope. Method calls build a fresh one per invocation; an
/// instance's fields are one as well.
pub type Closure = FxHashMap<String, ObjectHolder>;

/// Handle to a runtime value, or the language's `None`.
///
/// Cloning a handle aliases the value: an instance mutated through one handle
/// is seen through every other. The only non-owning handle is the `self`
/// entry an instance keeps in its own fields, which would otherwise keep the
/// instance alive forever.
#[derive(Debug, Clone, Default)]
pub struct ObjectHolder(Slot);

#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Empty,
    Strong(Rc<Object>),
    Back(Weak<Object>),
}

impl ObjectHolder {
    pub fn none() -> Self {
        Self(Slot::Empty)
    }

    /// Wraps a freshly created value.
    pub fn own(object: Object) -> Self {
        Self(Slot::Strong(Rc::new(object)))
    }

    /// Aliases an existing value.
    pub fn share(object: &Rc<Object>) -> Self {
        Self(Slot::Strong(Rc::clone(object)))
    }

    pub(crate) fn back_ref(object: &Weak<Object>) -> Self {
        Self(Slot::Back(Weak::clone(object)))
    }

    pub fn number(value: i64) -> Self {
        Self::own(Object::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::own(Object::String(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::own(Object::Bool(value))
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_none()
    }

    pub fn get(&self) -> Option<Rc<Object>> {
        match &self.0 {
            Slot::Empty => None,
            Slot::Strong(object) => Some(Rc::clone(object)),
            Slot::Back(object) => object.upgrade(),
        }
    }

    /// Returns an owning handle to the same value, so that the result stays
    /// valid after the instance it was read from is gone.
    pub fn to_strong(&self) -> Self {
        match self.get() {
            Some(object) => Self(Slot::Strong(object)),
            None => Self::none(),
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self.get().as_deref() {
            Some(Object::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.get().as_deref() {
            Some(Object::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self.get().as_deref() {
            Some(Object::String(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn is_instance(&self) -> bool {
        matches!(self.get().as_deref(), Some(Object::Instance(_)))
    }

    /// Identity comparison; two empty handles are the same `None`.
    pub fn same_object(&self, other: &ObjectHolder) -> bool {
        match (self.get(), other.get()) {
            (Some(lhs), Some(rhs)) => Rc::ptr_eq(&lhs, &rhs),
            (None, None) => true,
            _ => false,
        }
    }

    /// Truthiness with `None` counted as false.
    pub fn is_true(&self) -> bool {
        self.get().is_some_and(|object| object.is_true())
    }

    pub fn type_name(&self, context: &Context<'_>) -> String {
        match self.get() {
            Some(object) => object.type_name(context.classes()),
            None => "None".to_string(),
        }
    }

    /// Renders the value the way `print` shows it. Instances defer to a
    /// user-defined `__str__`, which may run arbitrary code.
    pub fn to_output(&self, context: &mut Context<'_>) -> Result<String, RuntimeError> {
        let Some(object) = self.get() else {
            return Ok("None".to_string());
        };
        match &*object {
            Object::Number(value) => Ok(value.to_string()),
            Object::String(value) => Ok(value.clone()),
            Object::Bool(value) => Ok(bool_output(*value).to_string()),
            Object::Class(class) => Ok(context.classes().name(*class).to_string()),
            Object::Instance(instance) => {
                let classes = context.classes();
                if classes.method(instance.class(), STR_METHOD).is_some() {
                    instance
                        .call(STR_METHOD, Vec::new(), context)?
                        .to_output(context)
                } else {
                    Ok(format!(
                        "<{} object at {:p}>",
                        classes.name(instance.class()),
                        Rc::as_ptr(&object)
                    ))
                }
            }
        }
    }
}
