use std::{cell::RefCell, fmt, fs::File, rc::Rc};

use indexmap::IndexMap;

use crate::parser::ast::Statement;

use super::{env::Environment, error::RuntimeError};

/// A host-implemented callable. Receives the already-evaluated arguments
/// and the environment of the call site.
pub type NativeCall = fn(&[RuntimeValue], &Environment) -> Result<RuntimeValue, RuntimeError>;

#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub call: NativeCall,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish()
    }
}

/// A Goblin-defined function: parameters, body, and the environment
/// captured at its definition site (lexical scoping).
pub struct UserFunction {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Statement>,
    pub dec_env: Environment,
}

impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

/// An open (or already closed) file. The cursor is the 1-based line the
/// next `io.readlines` call will return; `io.readline` does not touch it.
/// Closing drops the descriptor.
#[derive(Debug)]
pub struct FileHandle {
    pub path: String,
    pub mode: String,
    pub file: Option<File>,
    pub cursor: usize,
}

impl FileHandle {
    pub fn can_read(&self) -> bool {
        self.mode.contains('r') || self.mode.contains('+')
    }

    pub fn can_write(&self) -> bool {
        self.mode.contains('w') || self.mode.contains('+')
    }
}

/// The key subset of runtime values a map accepts: the hashable ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Number(i64),
    Boolean(bool),
    Str(String),
}

impl MapKey {
    pub fn from_value(value: &RuntimeValue) -> Option<MapKey> {
        match value {
            RuntimeValue::Number(n) => Some(MapKey::Number(*n)),
            RuntimeValue::Boolean(b) => Some(MapKey::Boolean(*b)),
            RuntimeValue::Str(s) => Some(MapKey::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Number(n) => write!(f, "{n}"),
            MapKey::Boolean(b) => write!(f, "{b}"),
            MapKey::Str(s) => f.write_str(s),
        }
    }
}

/// The runtime value model. Arrays and maps are shared-mutable: clones of
/// the value alias one underlying container, and built-ins mutate through
/// the alias. Everything else copies on assignment.
#[derive(Debug, Clone)]
pub enum RuntimeValue {
    Null,
    Number(i64),
    Boolean(bool),
    Str(String),
    Array(Rc<RefCell<Vec<RuntimeValue>>>),
    Map(Rc<RefCell<IndexMap<MapKey, RuntimeValue>>>),
    Object(IndexMap<String, RuntimeValue>),
    NativeFn(NativeFunction),
    UserFn(Rc<UserFunction>),
    File(Rc<RefCell<FileHandle>>),
}

impl RuntimeValue {
    pub fn array(values: Vec<RuntimeValue>) -> RuntimeValue {
        RuntimeValue::Array(Rc::new(RefCell::new(values)))
    }

    pub fn map(entries: IndexMap<MapKey, RuntimeValue>) -> RuntimeValue {
        RuntimeValue::Map(Rc::new(RefCell::new(entries)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            RuntimeValue::Null => "Null",
            RuntimeValue::Number(_) => "Number",
            RuntimeValue::Boolean(_) => "Boolean",
            RuntimeValue::Str(_) => "String",
            RuntimeValue::Array(_) => "Array",
            RuntimeValue::Map(_) => "Map",
            RuntimeValue::Object(_) => "Object",
            RuntimeValue::NativeFn(_) => "NativeFn",
            RuntimeValue::UserFn(_) => "UserFn",
            RuntimeValue::File(_) => "File",
        }
    }
}

/// The shared readable form used by `io.print`, the `%v` format verb and
/// the REPL echo.
impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Null => f.write_str("null"),
            RuntimeValue::Number(n) => write!(f, "{n}"),
            RuntimeValue::Boolean(b) => write!(f, "{b}"),
            RuntimeValue::Str(s) => f.write_str(s),
            RuntimeValue::Array(values) => {
                let values = values.borrow();
                let rendered = values
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{rendered}]")
            }
            RuntimeValue::Map(entries) => {
                let entries = entries.borrow();
                let rendered = entries
                    .iter()
                    .map(|(key, value)| format!("{key} : {value}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{rendered}}}")
            }
            RuntimeValue::Object(properties) => {
                let rendered = properties
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&rendered)
            }
            // Functions have no readable form.
            RuntimeValue::NativeFn(_) | RuntimeValue::UserFn(_) => Ok(()),
            RuntimeValue::File(handle) => f.write_str(&handle.borrow().path),
        }
    }
}

/// Value equality where it makes sense; identity for functions and file
/// handles.
impl PartialEq for RuntimeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeValue::Null, RuntimeValue::Null) => true,
            (RuntimeValue::Number(a), RuntimeValue::Number(b)) => a == b,
            (RuntimeValue::Boolean(a), RuntimeValue::Boolean(b)) => a == b,
            (RuntimeValue::Str(a), RuntimeValue::Str(b)) => a == b,
            (RuntimeValue::Array(a), RuntimeValue::Array(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (RuntimeValue::Map(a), RuntimeValue::Map(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (RuntimeValue::Object(a), RuntimeValue::Object(b)) => a == b,
            (RuntimeValue::NativeFn(a), RuntimeValue::NativeFn(b)) => a.call == b.call,
            (RuntimeValue::UserFn(a), RuntimeValue::UserFn(b)) => Rc::ptr_eq(a, b),
            (RuntimeValue::File(a), RuntimeValue::File(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
