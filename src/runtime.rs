//! Object model shared by the statement tree and the interpreter.
//!
//! Values, classes and instances live here, together with the comparison
//! protocol and the errors evaluation can raise.
pub mod class;
pub mod compare;
pub mod error;
pub mod instance;
pub mod object;
pub mod value;

pub use class::{Class, ClassId, ClassTable, Method};
pub use compare::Comparator;
pub use error::RuntimeError;
pub use instance::ClassInstance;
pub use object::Object;
pub use value::{Closure, ObjectHolder};
