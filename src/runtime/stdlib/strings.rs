use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::runtime::{env::Environment, error::RuntimeError, values::RuntimeValue};

use super::{native, Namespace};

pub static STRINGS: Lazy<Namespace> = Lazy::new(|| {
    let mut functions = HashMap::new();

    native!(functions, "split", "strings.split", split);

    Namespace {
        name: "strings",
        functions,
    }
});

/// split, splits string `s` by delimiter `d`, returns an array of
/// sub-string elements. The delimiter matches as a substring, so
/// consecutive delimiters produce empty strings. An empty delimiter
/// splits into single characters.
/// strings.split(s str, d str)
fn split(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::WrongArgCount {
            function: "strings.split",
            want: 2,
            got: args.len(),
        });
    }

    let RuntimeValue::Str(source) = &args[0] else {
        return Err(RuntimeError::WrongArgType {
            function: "strings.split",
            want: "string",
            got: args[0].type_name(),
        });
    };

    let RuntimeValue::Str(delimiter) = &args[1] else {
        return Err(RuntimeError::WrongArgType {
            function: "strings.split",
            want: "string",
            got: args[1].type_name(),
        });
    };

    let splits: Vec<RuntimeValue> = if delimiter.is_empty() {
        source
            .chars()
            .map(|c| RuntimeValue::Str(c.to_string()))
            .collect()
    } else {
        source
            .split(delimiter.as_str())
            .map(|part| RuntimeValue::Str(part.to_string()))
            .collect()
    };

    Ok(RuntimeValue::array(splits))
}
