use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::interpreter::{Context, ExecResult};
use crate::runtime::class::{ClassId, ClassTable};
use crate::runtime::error::RuntimeError;
use crate::runtime::object::Object;
use crate::runtime::value::{Closure, ObjectHolder};

pub const SELF_NAME: &str = "self";
pub const INIT_METHOD: &str = "__init__";
pub const STR_METHOD: &str = "__str__";
pub const ADD_METHOD: &str = "__add__";
pub const EQ_METHOD: &str = "__eq__";
pub const LT_METHOD: &str = "__lt__";

/// An object of a user-defined class. Its fields always hold a `self` entry
/// pointing back at the instance.
#[derive(Debug)]
pub struct ClassInstance {
    class: ClassId,
    this: Weak<Object>,
    fields: RefCell<Closure>,
}

impl ClassInstance {
    /// Allocates a new instance and returns the first handle to it. The
    /// instance is freed once the last handle outside its own fields is gone.
    pub fn create(class: ClassId) -> ObjectHolder {
        let object = Rc::new_cyclic(|this: &Weak<Object>| {
            let mut fields = Closure::default();
            fields.insert(SELF_NAME.to_string(), ObjectHolder::back_ref(this));
            Object::Instance(ClassInstance {
                class,
                this: Weak::clone(this),
                fields: RefCell::new(fields),
            })
        });
        ObjectHolder::share(&object)
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn fields(&self) -> Ref<'_, Closure> {
        self.fields.borrow()
    }

    /// Direct access to the field map. Writes are seen through every handle
    /// to this instance.
    pub fn fields_mut(&self) -> RefMut<'_, Closure> {
        self.fields.borrow_mut()
    }

    pub fn field(&self, name: &str) -> Option<ObjectHolder> {
        self.fields.borrow().get(name).map(ObjectHolder::to_strong)
    }

    pub fn has_method(&self, name: &str, arity: usize, classes: &ClassTable) -> bool {
        classes
            .method(self.class, name)
            .is_some_and(|method| method.arity() == arity)
    }

    /// Invokes `method_name` with positional `args`.
    ///
    /// The body runs in a fresh scope holding the arguments bound to the
    /// formal parameters, then every current field (a field wins over a
    /// formal of the same name), then `self`. Plain assignments in the body
    /// stay local; fields change only through `self.<field> = ...`.
    pub fn call(
        &self,
        method_name: &str,
        args: Vec<ObjectHolder>,
        context: &mut Context<'_>,
    ) -> Result<ObjectHolder, RuntimeError> {
        let classes = context.classes();
        let method =
            classes
                .method(self.class, method_name)
                .ok_or_else(|| RuntimeError::NoSuchMethod {
                    method: method_name.to_string(),
                    class_name: classes.name(self.class).to_string(),
                })?;
        RuntimeError::expect_method_arity(method_name, method.arity(), args.len())?;
        debug!(class = classes.name(self.class), method = method_name, "calling method");

        let mut scope: Closure = method.formal_params.iter().cloned().zip(args).collect();
        scope.extend(
            self.fields()
                .iter()
                .map(|(name, value)| (name.clone(), value.to_strong())),
        );
        scope.insert(
            SELF_NAME.to_string(),
            ObjectHolder::back_ref(&self.this).to_strong(),
        );

        match context.exec(&method.body, &mut scope)? {
            ExecResult::Return(value) => Ok(value),
            ExecResult::Normal(_) => Ok(ObjectHolder::none()),
        }
    }
}
