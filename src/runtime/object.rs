use crate::runtime::class::{ClassId, ClassTable};
use crate::runtime::instance::ClassInstance;

/// A runtime value. Primitives are immutable; instances carry their own
/// mutable field map and are only ever reached through shared handles.
#[derive(Debug)]
pub enum Object {
    Number(i64),
    String(String),
    Bool(bool),
    Class(ClassId),
    Instance(ClassInstance),
}

impl Object {
    pub fn is_true(&self) -> bool {
        match self {
            Object::Number(value) => *value != 0,
            Object::String(value) => !value.is_empty(),
            Object::Bool(value) => *value,
            Object::Class(_) | Object::Instance(_) => true,
        }
    }

    /// Language-level type name used in diagnostics. Instances report the
    /// name of their class.
    pub fn type_name(&self, classes: &ClassTable) -> String {
        match self {
            Object::Number(_) => "int".to_string(),
            Object::String(_) => "str".to_string(),
            Object::Bool(_) => "bool".to_string(),
            Object::Class(_) => "class".to_string(),
            Object::Instance(instance) => classes.name(instance.class()).to_string(),
        }
    }
}

pub(crate) fn bool_output(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_follows_value_kind() {
        assert!(Object::Number(-3).is_true());
        assert!(!Object::Number(0).is_true());
        assert!(Object::String("x".to_string()).is_true());
        assert!(!Object::String(String::new()).is_true());
        assert!(Object::Bool(true).is_true());
        assert!(!Object::Bool(false).is_true());
    }

    #[test]
    fn bools_render_with_language_spelling() {
        assert_eq!(bool_output(true), "True");
        assert_eq!(bool_output(false), "False");
    }
}
