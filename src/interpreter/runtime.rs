use std::io::Write;

use crate::ast::Statement;
use crate::runtime::class::{ClassId, ClassTable};
use crate::runtime::error::RuntimeError;
use crate::runtime::instance::{ClassInstance, INIT_METHOD};
use crate::runtime::object::Object;
use crate::runtime::value::{Closure, ObjectHolder};

use super::operators;

/// Outcome of executing one statement.
///
/// `Return` travels outwards through blocks and branches until the enclosing
/// method call turns it back into a plain value.
#[derive(Debug, Clone)]
pub enum ExecResult {
    Normal(ObjectHolder),
    Return(ObjectHolder),
}

impl ExecResult {
    pub fn into_value(self) -> ObjectHolder {
        match self {
            ExecResult::Normal(value) | ExecResult::Return(value) => value,
        }
    }
}

/// Everything statement execution needs besides the scope: the classes the
/// program was built against and the sink `print` writes to.
///
/// Evaluation recurses on the host stack, so unbounded recursion in the
/// program exhausts it; there is no language-level depth limit.
pub struct Context<'a> {
    classes: &'a ClassTable,
    output: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub fn new(classes: &'a ClassTable, output: &'a mut dyn Write) -> Self {
        Self { classes, output }
    }

    pub fn classes(&self) -> &'a ClassTable {
        self.classes
    }

    pub fn write_output(&mut self, text: &str) -> Result<(), RuntimeError> {
        self.output
            .write_all(text.as_bytes())
            .map_err(|error| RuntimeError::Output {
                message: error.to_string(),
            })
    }

    pub fn exec(
        &mut self,
        statement: &Statement,
        closure: &mut Closure,
    ) -> Result<ExecResult, RuntimeError> {
        let value = match statement {
            Statement::Number(value) => ObjectHolder::number(*value),
            Statement::String(value) => ObjectHolder::string(value.clone()),
            Statement::Bool(value) => ObjectHolder::bool(*value),
            Statement::None => ObjectHolder::none(),
            Statement::Assignment { name, value } => {
                let value = self.eval(value, closure)?;
                closure.insert(name.clone(), value.clone());
                value
            }
            Statement::VariableValue { dotted_ids } => self.load_variable(dotted_ids, closure)?,
            Statement::Print { args } => {
                self.print(args, closure)?;
                ObjectHolder::none()
            }
            Statement::MethodCall {
                object,
                method,
                args,
            } => self.call_method(object, method, args, closure)?,
            Statement::Stringify(argument) => {
                let value = self.eval(argument, closure)?;
                ObjectHolder::string(value.to_output(self)?)
            }
            Statement::BinaryOp { left, op, right } => {
                let lhs = self.eval(left, closure)?;
                let rhs = self.eval(right, closure)?;
                operators::binary(*op, lhs, rhs, self)?
            }
            // Both operands are always evaluated.
            Statement::Or { left, right } => {
                let lhs = self.eval(left, closure)?;
                let rhs = self.eval(right, closure)?;
                ObjectHolder::bool(lhs.is_true() || rhs.is_true())
            }
            Statement::And { left, right } => {
                let lhs = self.eval(left, closure)?;
                let rhs = self.eval(right, closure)?;
                ObjectHolder::bool(lhs.is_true() && rhs.is_true())
            }
            Statement::Not(argument) => ObjectHolder::bool(!self.eval(argument, closure)?.is_true()),
            Statement::Comparison {
                comparator,
                left,
                right,
            } => {
                let lhs = self.eval(left, closure)?;
                let rhs = self.eval(right, closure)?;
                ObjectHolder::bool(comparator.apply(&lhs, &rhs, self)?)
            }
            Statement::Compound(statements) => return self.exec_block(statements, closure),
            Statement::Return(value) => return Ok(ExecResult::Return(self.eval(value, closure)?)),
            Statement::IfElse {
                condition,
                if_body,
                else_body,
            } => {
                if self.eval(condition, closure)?.is_true() {
                    return self.exec(if_body, closure);
                }
                match else_body {
                    Some(else_body) => return self.exec(else_body, closure),
                    None => ObjectHolder::none(),
                }
            }
            Statement::ClassDefinition(class) => {
                let class = self.classes.resolve(*class)?;
                let name = self.classes.name(class).to_string();
                closure.insert(name, ObjectHolder::own(Object::Class(class)));
                ObjectHolder::none()
            }
            Statement::FieldAssignment {
                object,
                field,
                value,
            } => self.assign_field(object, field, value, closure)?,
            Statement::NewInstance { class, args } => self.new_instance(*class, args, closure)?,
        };
        Ok(ExecResult::Normal(value))
    }

    /// Executes `statement` for its value, ignoring how control left it.
    pub fn eval(
        &mut self,
        statement: &Statement,
        closure: &mut Closure,
    ) -> Result<ObjectHolder, RuntimeError> {
        Ok(self.exec(statement, closure)?.into_value())
    }

    fn exec_block(
        &mut self,
        statements: &[Statement],
        closure: &mut Closure,
    ) -> Result<ExecResult, RuntimeError> {
        for statement in statements {
            if let ExecResult::Return(value) = self.exec(statement, closure)? {
                return Ok(ExecResult::Return(value));
            }
        }
        Ok(ExecResult::Normal(ObjectHolder::none()))
    }

    fn eval_args(
        &mut self,
        args: &[Statement],
        closure: &mut Closure,
    ) -> Result<Vec<ObjectHolder>, RuntimeError> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, closure)?);
        }
        Ok(values)
    }

    fn load_variable(
        &self,
        dotted_ids: &[String],
        closure: &Closure,
    ) -> Result<ObjectHolder, RuntimeError> {
        let Some((first, fields)) = dotted_ids.split_first() else {
            return Err(RuntimeError::UnboundName {
                name: String::new(),
            });
        };
        let mut value = closure
            .get(first)
            .map(ObjectHolder::to_strong)
            .ok_or_else(|| RuntimeError::UnboundName {
                name: first.clone(),
            })?;

        for (depth, field) in fields.iter().enumerate() {
            let object = value.get();
            let Some(Object::Instance(instance)) = object.as_deref() else {
                return Err(RuntimeError::expected_instance(
                    format!("field access '.{field}'"),
                    value.type_name(self),
                ));
            };
            value = instance
                .field(field)
                .ok_or_else(|| RuntimeError::UnboundName {
                    name: dotted_ids[..depth + 2].join("."),
                })?;
        }
        Ok(value)
    }

    fn print(&mut self, args: &[Statement], closure: &mut Closure) -> Result<(), RuntimeError> {
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.write_output(" ")?;
            }
            let value = self.eval(arg, closure)?;
            let rendered = value.to_output(self)?;
            self.write_output(&rendered)?;
        }
        self.write_output("\n")
    }

    fn call_method(
        &mut self,
        object: &Statement,
        method: &str,
        args: &[Statement],
        closure: &mut Closure,
    ) -> Result<ObjectHolder, RuntimeError> {
        let receiver = self.eval(object, closure)?;
        let args = self.eval_args(args, closure)?;
        let target = receiver.get();
        match target.as_deref() {
            Some(Object::Instance(instance)) => instance.call(method, args, self),
            _ => Err(RuntimeError::expected_instance(
                format!("call of method '{method}'"),
                receiver.type_name(self),
            )),
        }
    }

    fn assign_field(
        &mut self,
        object: &Statement,
        field: &str,
        value: &Statement,
        closure: &mut Closure,
    ) -> Result<ObjectHolder, RuntimeError> {
        let receiver = self.eval(object, closure)?;
        let value = self.eval(value, closure)?;
        let target = receiver.get();
        match target.as_deref() {
            Some(Object::Instance(instance)) => {
                instance.fields_mut().insert(field.to_string(), value.clone());
                Ok(value)
            }
            _ => Err(RuntimeError::expected_instance(
                format!("field assignment '.{field}'"),
                receiver.type_name(self),
            )),
        }
    }

    fn new_instance(
        &mut self,
        class: ClassId,
        args: &[Statement],
        closure: &mut Closure,
    ) -> Result<ObjectHolder, RuntimeError> {
        let class = self.classes.resolve(class)?;
        let holder = ClassInstance::create(class);
        if self.classes.method(class, INIT_METHOD).is_none() {
            RuntimeError::expect_method_arity(INIT_METHOD, 0, args.len())?;
            return Ok(holder);
        }

        let args = self.eval_args(args, closure)?;
        if let Some(object) = holder.get()
            && let Object::Instance(instance) = &*object
        {
            instance.call(INIT_METHOD, args, self)?;
        }
        Ok(holder)
    }
}
