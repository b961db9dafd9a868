use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fmt,
    io::{BufRead, Write},
    path::PathBuf,
    rc::Rc,
};

use once_cell::sync::Lazy;

use super::{
    error::RuntimeError,
    stdlib::{self, Namespace},
    values::{MapKey, RuntimeValue},
};

pub type SharedOutput = Rc<RefCell<dyn Write>>;
pub type SharedInput = Rc<RefCell<dyn BufRead>>;

/// Process-wide registry of the namespaces a `using` statement may pull
/// in. Read-only after startup.
static REGISTER: Lazy<HashMap<&'static str, &'static Namespace>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("io", Lazy::force(&stdlib::IO));
    m.insert("data", Lazy::force(&stdlib::DATA));
    m.insert("strings", Lazy::force(&stdlib::STRINGS));

    m
});

struct Scope {
    parent: Option<Environment>,
    variables: HashMap<String, RuntimeValue>,
    constants: HashSet<String>,
    namespaces: HashMap<&'static str, &'static Namespace>,
    stdout: SharedOutput,
    stdin: SharedInput,
    entry_location: PathBuf,
}

/// A lexical scope. Cloning is cheap and aliases the same scope; child
/// scopes hold a shared back-reference to their parent, so environments
/// form a spaghetti-stack with the root outliving every child created
/// against it.
#[derive(Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Environment")
    }
}

impl Environment {
    /// Create a root environment over the given I/O handles, seeded with
    /// the `null`, `true` and `false` constants.
    pub fn new(
        stdin: SharedInput,
        stdout: SharedOutput,
        entry_location: impl Into<PathBuf>,
    ) -> Environment {
        let env = Environment {
            scope: Rc::new(RefCell::new(Scope {
                parent: None,
                variables: HashMap::new(),
                constants: HashSet::new(),
                namespaces: HashMap::new(),
                stdout,
                stdin,
                entry_location: entry_location.into(),
            })),
        };

        env.seed();

        env
    }

    /// Create a fresh scope whose parent is `parent`, sharing its I/O
    /// handles. Used for function calls.
    pub fn child(parent: &Environment) -> Environment {
        let (stdout, stdin, entry_location) = {
            let scope = parent.scope.borrow();
            (
                Rc::clone(&scope.stdout),
                Rc::clone(&scope.stdin),
                scope.entry_location.clone(),
            )
        };

        Environment {
            scope: Rc::new(RefCell::new(Scope {
                parent: Some(parent.clone()),
                variables: HashMap::new(),
                constants: HashSet::new(),
                namespaces: HashMap::new(),
                stdout,
                stdin,
                entry_location,
            })),
        }
    }

    fn seed(&self) {
        let mut scope = self.scope.borrow_mut();

        for (name, value) in [
            ("null", RuntimeValue::Null),
            ("true", RuntimeValue::Boolean(true)),
            ("false", RuntimeValue::Boolean(false)),
        ] {
            scope.variables.insert(name.to_string(), value);
            scope.constants.insert(name.to_string());
        }
    }

    /// Declare a new binding in this scope. Fails if the name is already
    /// bound here.
    pub fn declare(
        &self,
        name: &str,
        value: RuntimeValue,
        is_const: bool,
    ) -> Result<RuntimeValue, RuntimeError> {
        let mut scope = self.scope.borrow_mut();

        if scope.variables.contains_key(name) {
            return Err(RuntimeError::AlreadyDefined(name.to_string()));
        }

        scope.variables.insert(name.to_string(), value.clone());
        if is_const {
            scope.constants.insert(name.to_string());
        }

        Ok(value)
    }

    /// Overwrite a binding of this scope. Fails if the name is not bound
    /// here; does not consult the parent chain and does not check
    /// constness.
    pub fn update(&self, name: &str, value: RuntimeValue) -> Result<RuntimeValue, RuntimeError> {
        let mut scope = self.scope.borrow_mut();

        if !scope.variables.contains_key(name) {
            return Err(RuntimeError::UpdateUnbound(name.to_string()));
        }

        scope.variables.insert(name.to_string(), value.clone());

        Ok(value)
    }

    /// Assign to an existing binding, wherever in the scope chain it
    /// lives. Fails on constants and unbound names.
    pub fn assign(&self, name: &str, value: RuntimeValue) -> Result<RuntimeValue, RuntimeError> {
        let env = self.resolve(name)?;

        if env.scope.borrow().constants.contains(name) {
            return Err(RuntimeError::ConstReassign(name.to_string()));
        }

        env.scope
            .borrow_mut()
            .variables
            .insert(name.to_string(), value.clone());

        Ok(value)
    }

    /// Find the nearest scope the name is bound in. At the root, a name
    /// that matches a registered namespace also resolves.
    pub fn resolve(&self, name: &str) -> Result<Environment, RuntimeError> {
        if self.scope.borrow().variables.contains_key(name) {
            return Ok(self.clone());
        }

        let parent = self.scope.borrow().parent.clone();
        match parent {
            Some(parent) => parent.resolve(name),
            None => {
                if self.scope.borrow().namespaces.contains_key(name) {
                    Ok(self.clone())
                } else {
                    Err(RuntimeError::UnboundName(name.to_string()))
                }
            }
        }
    }

    /// Resolve then read.
    pub fn lookup(&self, name: &str) -> Result<RuntimeValue, RuntimeError> {
        let env = self.resolve(name)?;

        let value = env.scope.borrow().variables.get(name).cloned();
        value.ok_or_else(|| RuntimeError::UnboundName(name.to_string()))
    }

    pub fn declare_array(
        &self,
        name: &str,
        values: Vec<RuntimeValue>,
        is_const: bool,
    ) -> Result<RuntimeValue, RuntimeError> {
        self.declare(name, RuntimeValue::array(values), is_const)
    }

    pub fn declare_map(
        &self,
        name: &str,
        entries: indexmap::IndexMap<MapKey, RuntimeValue>,
        is_const: bool,
    ) -> Result<RuntimeValue, RuntimeError> {
        self.declare(name, RuntimeValue::map(entries), is_const)
    }

    /// Make a registered namespace visible in this scope.
    pub fn add_namespace(&self, name: &str) -> Result<(), RuntimeError> {
        match REGISTER.get(name) {
            Some(namespace) => {
                self.scope
                    .borrow_mut()
                    .namespaces
                    .insert(namespace.name, namespace);
                Ok(())
            }
            None => Err(RuntimeError::UnknownNamespace(name.to_string())),
        }
    }

    /// The namespace a name refers to, if any scope in the chain has
    /// pulled it in.
    pub fn find_namespace(&self, name: &str) -> Option<&'static Namespace> {
        if let Some(namespace) = self.scope.borrow().namespaces.get(name).copied() {
            return Some(namespace);
        }

        let parent = self.scope.borrow().parent.clone();
        parent.and_then(|parent| parent.find_namespace(name))
    }

    /// Index into the array or map bound to `name`. Arrays take numeric
    /// indices only; maps accept any hashable key.
    pub fn array_or_map_lookup(
        &self,
        name: &str,
        index: &RuntimeValue,
    ) -> Result<RuntimeValue, RuntimeError> {
        let value = self.lookup(name)?;

        match value {
            RuntimeValue::Array(values) => {
                let RuntimeValue::Number(index) = index else {
                    return Err(RuntimeError::ArrayIndexType);
                };

                let values = values.borrow();
                if *index < 0 || *index as usize >= values.len() {
                    return Err(RuntimeError::IndexOutOfBounds(*index));
                }

                Ok(values[*index as usize].clone())
            }
            RuntimeValue::Map(entries) => {
                let key = MapKey::from_value(index)
                    .ok_or(RuntimeError::BadMapKey(index.type_name()))?;

                entries
                    .borrow()
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| RuntimeError::MissingKey {
                        key: key.to_string(),
                        map: name.to_string(),
                    })
            }
            other => Err(RuntimeError::IndexingUnsupported(other.type_name())),
        }
    }

    pub fn stdout(&self) -> SharedOutput {
        Rc::clone(&self.scope.borrow().stdout)
    }

    pub fn stdin(&self) -> SharedInput {
        Rc::clone(&self.scope.borrow().stdin)
    }

    pub fn entry_location(&self) -> PathBuf {
        self.scope.borrow().entry_location.clone()
    }

    /// Write to the program's stdout. Write failures on the sink are
    /// deliberately ignored, like every other print path.
    pub fn write_stdout(&self, text: &str) {
        let stdout = self.stdout();
        let mut stdout = stdout.borrow_mut();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}
