use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::runtime::{
    env::Environment,
    error::RuntimeError,
    values::{MapKey, RuntimeValue},
};

use super::{native, Namespace};

pub static DATA: Lazy<Namespace> = Lazy::new(|| {
    let mut functions = HashMap::new();

    native!(functions, "push", "data.push", push);
    native!(functions, "put", "data.put", put);
    native!(functions, "pop", "data.pop", pop);
    native!(functions, "size", "data.size", size);

    Namespace {
        name: "data",
        functions,
    }
});

/// push, pushes a new value into an array (top-down)
/// data.push(arr array, val any)
fn push(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::WrongArgCount {
            function: "data.push",
            want: 2,
            got: args.len(),
        });
    }

    let RuntimeValue::Array(values) = &args[0] else {
        return Err(RuntimeError::WrongArgType {
            function: "data.push",
            want: "array",
            got: args[0].type_name(),
        });
    };

    values.borrow_mut().push(args[1].clone());

    Ok(RuntimeValue::Null)
}

/// put, puts a new key/value pair into a map, inserted at the end
/// data.put(m map, key any, value any)
fn put(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if args.len() != 3 {
        return Err(RuntimeError::WrongArgCount {
            function: "data.put",
            want: 3,
            got: args.len(),
        });
    }

    let RuntimeValue::Map(entries) = &args[0] else {
        return Err(RuntimeError::WrongArgType {
            function: "data.put",
            want: "map",
            got: args[0].type_name(),
        });
    };

    let key = MapKey::from_value(&args[1])
        .ok_or(RuntimeError::BadMapKey(args[1].type_name()))?;

    entries.borrow_mut().insert(key, args[2].clone());

    Ok(RuntimeValue::Null)
}

/// pop, returns the last element of the specified array
/// data.pop(a array)
fn pop(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::WrongArgCount {
            function: "data.pop",
            want: 1,
            got: args.len(),
        });
    }

    let RuntimeValue::Array(values) = &args[0] else {
        return Err(RuntimeError::WrongArgType {
            function: "data.pop",
            want: "array",
            got: args[0].type_name(),
        });
    };

    let last = values.borrow_mut().pop();
    last.ok_or(RuntimeError::PopEmptyArray)
}

/// size, returns the size of the array or map specified
/// data.size(a array), data.size(m map)
fn size(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::WrongArgCount {
            function: "data.size",
            want: 1,
            got: args.len(),
        });
    }

    let size = match &args[0] {
        RuntimeValue::Array(values) => values.borrow().len(),
        RuntimeValue::Map(entries) => entries.borrow().len(),
        other => {
            return Err(RuntimeError::WrongArgType {
                function: "data.size",
                want: "array or map",
                got: other.type_name(),
            })
        }
    };

    Ok(RuntimeValue::Number(size as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{cell::RefCell, rc::Rc};

    fn test_env() -> Environment {
        let stdout: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        let stdin: Rc<RefCell<std::io::Cursor<Vec<u8>>>> =
            Rc::new(RefCell::new(std::io::Cursor::new(Vec::new())));
        Environment::new(stdin, stdout, ".")
    }

    #[test]
    fn test_push_mutates_in_place() {
        let env = test_env();
        let array = RuntimeValue::array(vec![RuntimeValue::Number(1)]);

        push(&[array.clone(), RuntimeValue::Number(2)], &env).expect("should push");

        assert_eq!("[1, 2]", array.to_string());
    }

    #[test]
    fn test_pop_returns_last_element() {
        let env = test_env();
        let array = RuntimeValue::array(vec![RuntimeValue::Number(1), RuntimeValue::Number(2)]);

        assert_eq!(Ok(RuntimeValue::Number(2)), pop(&[array.clone()], &env));
        assert_eq!("[1]", array.to_string());
    }

    #[test]
    fn test_pop_empty_array_fails() {
        let env = test_env();
        let array = RuntimeValue::array(vec![]);

        assert_eq!(Err(RuntimeError::PopEmptyArray), pop(&[array], &env));
    }

    #[test]
    fn test_size_counts_pushes_and_pops() {
        let env = test_env();
        let array = RuntimeValue::array(vec![]);

        push(&[array.clone(), RuntimeValue::Number(1)], &env).expect("should push");
        push(&[array.clone(), RuntimeValue::Number(2)], &env).expect("should push");
        push(&[array.clone(), RuntimeValue::Number(3)], &env).expect("should push");
        pop(&[array.clone()], &env).expect("should pop");

        assert_eq!(Ok(RuntimeValue::Number(2)), size(&[array], &env));
    }

    #[test]
    fn test_put_inserts_and_updates() {
        let env = test_env();
        let map = RuntimeValue::map(indexmap::IndexMap::new());

        put(
            &[
                map.clone(),
                RuntimeValue::Str("a".into()),
                RuntimeValue::Number(1),
            ],
            &env,
        )
        .expect("should put");
        put(
            &[
                map.clone(),
                RuntimeValue::Str("a".into()),
                RuntimeValue::Number(2),
            ],
            &env,
        )
        .expect("should update");

        assert_eq!(Ok(RuntimeValue::Number(1)), size(&[map.clone()], &env));
        assert_eq!("{a : 2}", map.to_string());
    }

    #[test]
    fn test_arity_errors() {
        let env = test_env();

        assert_eq!(
            Err(RuntimeError::WrongArgCount {
                function: "data.push",
                want: 2,
                got: 1,
            }),
            push(&[RuntimeValue::array(vec![])], &env)
        );
        assert_eq!(
            Err(RuntimeError::WrongArgCount {
                function: "data.size",
                want: 1,
                got: 0,
            }),
            size(&[], &env)
        );
    }

    #[test]
    fn test_push_requires_array() {
        let env = test_env();

        assert_eq!(
            Err(RuntimeError::WrongArgType {
                function: "data.push",
                want: "array",
                got: "Number",
            }),
            push(&[RuntimeValue::Number(1), RuntimeValue::Number(2)], &env)
        );
    }
}
