use rustc_hash::FxHashMap;
use tracing::debug;

use crate::ast::Statement;
use crate::runtime::error::RuntimeError;

/// Index of a class inside the [`ClassTable`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(usize);

/// A user-defined method. `formal_params` does not include `self`, which is
/// bound implicitly on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Statement,
}

impl Method {
    pub fn new<I, S>(name: impl Into<String>, formal_params: I, body: Statement) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            formal_params: formal_params.into_iter().map(Into::into).collect(),
            body,
        }
    }

    pub fn arity(&self) -> usize {
        self.formal_params.len()
    }
}

#[derive(Debug)]
pub struct Class {
    name: String,
    methods: FxHashMap<String, Method>,
    parent: Option<ClassId>,
}

impl Class {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    /// Looks only at methods declared by this class itself.
    pub fn own_method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }
}

/// Owner of every class of a program.
///
/// Classes refer to their parent and instances to their class by
/// [`ClassId`]. A parent must already be registered when a class is defined,
/// so parent chains always end and never loop.
#[derive(Debug, Default)]
pub struct ClassTable {
    classes: Vec<Class>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id that the next call to [`ClassTable::define`] will hand out. Lets a
    /// method body refer to the class being built, e.g. `return Point(...)`.
    /// A program that uses the id before the class is defined fails with
    /// [`RuntimeError::UndefinedClass`].
    pub fn next_id(&self) -> ClassId {
        ClassId(self.classes.len())
    }

    pub fn define(
        &mut self,
        name: impl Into<String>,
        methods: Vec<Method>,
        parent: Option<ClassId>,
    ) -> Result<ClassId, RuntimeError> {
        let name = name.into();
        if let Some(parent) = parent
            && !self.contains(parent)
        {
            return Err(RuntimeError::UnknownParentClass { class_name: name });
        }

        let id = self.next_id();
        debug!(
            class = %name,
            methods = methods.len(),
            parent = parent.map(|parent| self.name(parent)),
            "defining class"
        );
        let methods = methods
            .into_iter()
            .map(|method| (method.name.clone(), method))
            .collect();
        self.classes.push(Class {
            name,
            methods,
            parent,
        });
        Ok(id)
    }

    pub fn contains(&self, id: ClassId) -> bool {
        id.0 < self.classes.len()
    }

    /// Checks that `id` names a defined class before evaluation hands it to
    /// an instance or binds it into a scope.
    pub fn resolve(&self, id: ClassId) -> Result<ClassId, RuntimeError> {
        if self.contains(id) {
            Ok(id)
        } else {
            Err(RuntimeError::UndefinedClass { index: id.0 })
        }
    }

    /// Panics if `id` was never defined in this table; see
    /// [`ClassTable::resolve`].
    pub fn get(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    pub fn name(&self, id: ClassId) -> &str {
        self.get(id).name()
    }

    /// Resolves `name` starting at `id` and walking up the parent chain; the
    /// most derived definition wins.
    pub fn method(&self, id: ClassId, name: &str) -> Option<&Method> {
        let mut current = Some(id);
        while let Some(class_id) = current {
            let class = self.get(class_id);
            if let Some(method) = class.own_method(name) {
                return Some(method);
            }
            current = class.parent();
        }
        None
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn returning(value: i64) -> Statement {
        Statement::Return(Box::new(Statement::Number(value)))
    }

    #[test]
    fn resolves_methods_through_parent_chain() {
        let mut classes = ClassTable::new();
        let base = classes
            .define(
                "Base",
                vec![
                    Method::new("greet", Vec::<String>::new(), returning(1)),
                    Method::new("only_base", ["x"], returning(2)),
                ],
                None,
            )
            .expect("define Base");
        let derived = classes
            .define(
                "Derived",
                vec![Method::new("greet", Vec::<String>::new(), returning(3))],
                Some(base),
            )
            .expect("define Derived");

        assert_eq!(classes.method(derived, "greet").map(|m| &m.body), Some(&returning(3)));
        assert_eq!(classes.method(base, "greet").map(|m| &m.body), Some(&returning(1)));
        assert_eq!(classes.method(derived, "only_base").map(Method::arity), Some(1));
        assert!(classes.method(derived, "missing").is_none());
        assert_eq!(classes.get(derived).parent(), Some(base));
        assert_eq!(classes.name(derived), "Derived");
        assert_eq!(classes.len(), 2);
    }

    #[test]
    fn next_id_matches_defined_id() {
        let mut classes = ClassTable::new();
        let expected = classes.next_id();
        let id = classes.define("A", Vec::new(), None).expect("define A");
        assert_eq!(id, expected);
    }

    #[test]
    fn rejects_unregistered_parent() {
        let mut classes = ClassTable::new();
        let future = classes.next_id();
        let error = classes
            .define("Orphan", Vec::new(), Some(future))
            .expect_err("parent must exist");
        assert_eq!(
            error,
            RuntimeError::UnknownParentClass {
                class_name: "Orphan".to_string()
            }
        );
        assert!(classes.is_empty());
    }

    #[test]
    fn resolve_rejects_ids_not_yet_defined() {
        let mut classes = ClassTable::new();
        let future = classes.next_id();
        assert_eq!(
            classes.resolve(future),
            Err(RuntimeError::UndefinedClass { index: 0 })
        );
        classes.define("A", Vec::new(), None).expect("define A");
        assert_eq!(classes.resolve(future), Ok(future));
        assert!(classes.contains(future));
    }
}
