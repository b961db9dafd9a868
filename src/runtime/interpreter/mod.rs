use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    lexer::{BinaryOp, ShorthandOp},
    parser::ast::{
        ArrayDecl, Assignment, BinaryExpression, Bool, Call, Expression, FnDecl, ForLoop, If, Id,
        MapDecl, MemberAccess, Num, ObjectLiteral, Program, Shorthand, Statement, StringLiteral,
        Ternary, UsingDecl, VarDecl, WhileLoop,
    },
};

use super::{
    env::Environment,
    error::RuntimeError,
    values::{MapKey, RuntimeValue, UserFunction},
};

/// Evaluate a whole program. The result is the value of the last
/// statement (null for an empty program), which the REPL echoes.
pub fn evaluate(program: &Program, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let mut last = RuntimeValue::Null;

    for statement in &program.body {
        last = eval_statement(statement, env)?;
    }

    Ok(last)
}

fn eval_statement(statement: &Statement, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    match statement {
        Statement::VarDecl(decl) => eval_var_decl(decl, env),
        Statement::ArrayDecl(decl) => eval_array_decl(decl, env),
        Statement::MapDecl(decl) => eval_map_decl(decl, env),
        Statement::FnDecl(decl) => eval_fn_decl(decl, env),
        Statement::Using(decl) => eval_using(decl, env),
        Statement::If(statement) => eval_if(statement, env),
        Statement::While(statement) => eval_while(statement, env),
        Statement::For(statement) => eval_for(statement, env),
        Statement::Shorthand(statement) => eval_shorthand(statement, env),
        Statement::Expression(expression) => eval_expression(expression, env),
    }
}

fn eval_expression(expression: &Expression, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    match expression {
        Expression::Num(Num(value)) => Ok(RuntimeValue::Number(*value)),
        Expression::Str(StringLiteral(value)) => Ok(RuntimeValue::Str(value.clone())),
        Expression::Bool(Bool(value)) => Ok(RuntimeValue::Boolean(*value)),
        Expression::Id(Id(name)) => env.lookup(name),
        Expression::Indexed(indexed) => {
            let index = eval_expression(&indexed.index, env)?;
            env.array_or_map_lookup(&indexed.symbol, &index)
        }
        Expression::Member(member) => eval_member(member, env),
        Expression::Binary(binary) => eval_binary(binary, env),
        Expression::Call(call) => eval_call(call, env),
        Expression::Ternary(ternary) => eval_ternary(ternary, env),
        Expression::Object(object) => eval_object(object, env),
        Expression::Assignment(assignment) => eval_assignment(assignment, env),
    }
}

/// Evaluate the statements of one block body. The surrounding scope is
/// used directly: blocks do not introduce scopes of their own.
fn eval_body(body: &[Statement], env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let mut result = RuntimeValue::Null;

    for statement in body {
        result = eval_statement(statement, env)?;
    }

    Ok(result)
}

fn eval_var_decl(decl: &VarDecl, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let value = match &decl.value {
        Some(expression) => eval_expression(expression, env)?,
        None => RuntimeValue::Null,
    };

    env.declare(&decl.name, value, decl.constant)
}

fn eval_array_decl(decl: &ArrayDecl, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let mut values = Vec::with_capacity(decl.elements.len());

    for element in &decl.elements {
        values.push(eval_expression(element, env)?);
    }

    env.declare_array(&decl.name, values, decl.constant)
}

fn eval_map_decl(decl: &MapDecl, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let mut entries = IndexMap::with_capacity(decl.entries.len());

    for (key_expression, value_expression) in &decl.entries {
        let key = eval_expression(key_expression, env)?;
        let key =
            MapKey::from_value(&key).ok_or(RuntimeError::BadMapKey(key.type_name()))?;

        let value = eval_expression(value_expression, env)?;

        entries.insert(key, value);
    }

    env.declare_map(&decl.name, entries, decl.constant)
}

/// A function declaration captures the environment it is evaluated in, by
/// shared reference; calls chain their scopes onto it (lexical scoping).
/// The binding itself is a constant.
fn eval_fn_decl(decl: &FnDecl, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let function = UserFunction {
        name: decl.name.clone(),
        params: decl.params.clone(),
        body: decl.body.clone(),
        dec_env: env.clone(),
    };

    env.declare(&decl.name, RuntimeValue::UserFn(Rc::new(function)), true)
}

fn eval_using(decl: &UsingDecl, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    env.add_namespace(&decl.namespace)?;

    Ok(RuntimeValue::Null)
}

/// The condition of `if`, `while`, `for` and ternaries must come out as a
/// boolean; numeric comparisons qualify since they evaluate to one.
fn eval_condition(expression: &Expression, env: &Environment) -> Result<bool, RuntimeError> {
    match eval_expression(expression, env)? {
        RuntimeValue::Boolean(value) => Ok(value),
        other => Err(RuntimeError::BadCondition(other.type_name())),
    }
}

fn eval_if(statement: &If, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if eval_condition(&statement.condition, env)? {
        eval_body(&statement.body, env)
    } else if let Some(else_body) = &statement.else_body {
        eval_body(else_body, env)
    } else {
        Ok(RuntimeValue::Null)
    }
}

fn eval_ternary(ternary: &Ternary, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if eval_condition(&ternary.condition, env)? {
        eval_expression(&ternary.left, env)
    } else {
        eval_expression(&ternary.right, env)
    }
}

fn eval_while(statement: &WhileLoop, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    while eval_condition(&statement.condition, env)? {
        eval_body(&statement.body, env)?;
    }

    Ok(RuntimeValue::Null)
}

fn eval_for(statement: &ForLoop, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    eval_var_decl(&statement.init, env)?;

    loop {
        let condition = eval_binary(&statement.condition, env)?;
        let RuntimeValue::Boolean(condition) = condition else {
            return Err(RuntimeError::BadCondition(condition.type_name()));
        };
        if !condition {
            break;
        }

        eval_body(&statement.body, env)?;

        eval_shorthand(&statement.step, env)?;
    }

    Ok(RuntimeValue::Null)
}

/// `x++`, `x--`, `x op= rhs`. The write goes through `update` on the
/// scope that owns the binding; constness is deliberately not enforced
/// here.
fn eval_shorthand(statement: &Shorthand, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let owner = env.resolve(&statement.target)?;

    let current = owner.lookup(&statement.target)?;
    let RuntimeValue::Number(current) = current else {
        return Err(RuntimeError::ShorthandOperand(statement.op.symbol()));
    };

    let next = match statement.op {
        ShorthandOp::Increment => current.wrapping_add(1),
        ShorthandOp::Decrement => current.wrapping_sub(1),
        _ => {
            let rhs = match &statement.value {
                Some(expression) => eval_expression(expression, env)?,
                None => RuntimeValue::Null,
            };
            let RuntimeValue::Number(rhs) = rhs else {
                return Err(RuntimeError::ShorthandOperand(statement.op.symbol()));
            };

            match statement.op {
                ShorthandOp::AddAssign => current.wrapping_add(rhs),
                ShorthandOp::SubAssign => current.wrapping_sub(rhs),
                ShorthandOp::MulAssign => current.wrapping_mul(rhs),
                ShorthandOp::DivAssign => current.checked_div(rhs).unwrap_or(0),
                ShorthandOp::ModAssign => current.checked_rem(rhs).unwrap_or(0),
                ShorthandOp::Increment | ShorthandOp::Decrement => unreachable!(),
            }
        }
    };

    owner.update(&statement.target, RuntimeValue::Number(next))
}

fn eval_binary(binary: &BinaryExpression, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let left = eval_expression(&binary.left, env)?;
    let right = eval_expression(&binary.right, env)?;

    match (&left, &right) {
        (RuntimeValue::Number(lhs), RuntimeValue::Number(rhs)) => {
            Ok(eval_numeric(*lhs, *rhs, binary.op))
        }
        (RuntimeValue::Str(lhs), RuntimeValue::Str(rhs)) if binary.op == BinaryOp::Equal => {
            Ok(RuntimeValue::Boolean(lhs == rhs))
        }
        (RuntimeValue::Boolean(lhs), RuntimeValue::Boolean(rhs))
            if binary.op == BinaryOp::Equal =>
        {
            Ok(RuntimeValue::Boolean(lhs == rhs))
        }
        _ => Err(RuntimeError::TypeMismatch {
            operator: binary.op.symbol(),
            left: left.type_name(),
            right: right.type_name(),
        }),
    }
}

/// Numeric arithmetic wraps instead of trapping. Division and modulo by
/// zero both produce 0.
fn eval_numeric(lhs: i64, rhs: i64, op: BinaryOp) -> RuntimeValue {
    match op {
        BinaryOp::Addition => RuntimeValue::Number(lhs.wrapping_add(rhs)),
        BinaryOp::Subtraction => RuntimeValue::Number(lhs.wrapping_sub(rhs)),
        BinaryOp::Multiplication => RuntimeValue::Number(lhs.wrapping_mul(rhs)),
        BinaryOp::Division => RuntimeValue::Number(lhs.checked_div(rhs).unwrap_or(0)),
        BinaryOp::Modulo => RuntimeValue::Number(lhs.checked_rem(rhs).unwrap_or(0)),
        BinaryOp::LessThan => RuntimeValue::Boolean(lhs < rhs),
        BinaryOp::GreaterThan => RuntimeValue::Boolean(lhs > rhs),
        BinaryOp::Equal => RuntimeValue::Boolean(lhs == rhs),
    }
}

/// Arguments evaluate strictly left-to-right, then the callee.
fn eval_call(call: &Call, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let mut args = Vec::with_capacity(call.args.len());
    for arg in &call.args {
        args.push(eval_expression(arg, env)?);
    }

    let callee = eval_expression(&call.callee, env)?;

    match callee {
        RuntimeValue::NativeFn(function) => (function.call)(&args, env),
        RuntimeValue::UserFn(function) => {
            if function.params.len() != args.len() {
                return Err(RuntimeError::ArityMismatch {
                    name: function.name.clone(),
                    want: function.params.len(),
                    got: args.len(),
                });
            }

            let scope = Environment::child(&function.dec_env);

            for (param, arg) in function.params.iter().zip(args) {
                scope.declare(param, arg, false)?;
            }

            eval_body(&function.body, &scope)
        }
        other => Err(RuntimeError::NotCallable(other.type_name())),
    }
}

fn eval_member(member: &MemberAccess, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if member.computed {
        let index = eval_expression(&member.property, env)?;

        // On a named binding the environment does the container
        // dispatching, keeping the binding name for error texts.
        if let Expression::Id(Id(name)) = &member.object {
            return env.array_or_map_lookup(name, &index);
        }

        let object = eval_expression(&member.object, env)?;
        index_value(&object, &index)
    } else {
        let Expression::Id(Id(property)) = &member.property else {
            // The parser only produces identifiers on the right of a dot.
            unreachable!()
        };

        // Namespaces shadow ordinary bindings on the left of a dot.
        if let Expression::Id(Id(object)) = &member.object {
            if let Some(namespace) = env.find_namespace(object) {
                return namespace
                    .function(property)
                    .map(RuntimeValue::NativeFn)
                    .ok_or_else(|| RuntimeError::UnknownNamespaceFunction {
                        namespace: namespace.name,
                        function: property.clone(),
                    });
            }
        }

        let object = eval_expression(&member.object, env)?;
        match object {
            RuntimeValue::Object(properties) => properties
                .get(property)
                .cloned()
                .ok_or_else(|| RuntimeError::NoProperty(property.clone())),
            other => Err(RuntimeError::NotAnObject(other.type_name())),
        }
    }
}

/// Indexing into a container value that is not a named binding.
fn index_value(value: &RuntimeValue, index: &RuntimeValue) -> Result<RuntimeValue, RuntimeError> {
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
            let key =
                MapKey::from_value(index).ok_or(RuntimeError::BadMapKey(index.type_name()))?;

            entries
                .borrow()
                .get(&key)
                .cloned()
                .ok_or_else(|| RuntimeError::MissingKey {
                    key: key.to_string(),
                    map: "map".to_string(),
                })
        }
        RuntimeValue::Object(properties) => {
            let RuntimeValue::Str(key) = index else {
                return Err(RuntimeError::BadMapKey(index.type_name()));
            };

            properties
                .get(key)
                .cloned()
                .ok_or_else(|| RuntimeError::NoProperty(key.clone()))
        }
        other => Err(RuntimeError::IndexingUnsupported(other.type_name())),
    }
}

fn eval_object(object: &ObjectLiteral, env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let mut properties = IndexMap::with_capacity(object.properties.len());

    for property in &object.properties {
        let value = match &property.value {
            Some(expression) => eval_expression(expression, env)?,
            // Shorthand `{ key }` looks the key up as an identifier.
            None => env.lookup(&property.key)?,
        };

        properties.insert(property.key.clone(), value);
    }

    Ok(RuntimeValue::Object(properties))
}

fn eval_assignment(
    assignment: &Assignment,
    env: &Environment,
) -> Result<RuntimeValue, RuntimeError> {
    let Expression::Id(Id(name)) = &assignment.target else {
        return Err(RuntimeError::InvalidAssignTarget);
    };

    let value = eval_expression(&assignment.value, env)?;

    env.assign(name, value)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io::Cursor, io::Write, rc::Rc};

    use crate::{
        lexer::Lexer,
        parser::{parse, ParseState},
    };

    use super::*;

    struct Fixture {
        env: Environment,
        out: Rc<RefCell<Vec<u8>>>,
    }

    impl Fixture {
        fn new() -> Fixture {
            let out: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
            let stdin: Rc<RefCell<Cursor<Vec<u8>>>> =
                Rc::new(RefCell::new(Cursor::new(Vec::new())));
            let shared_out: Rc<RefCell<dyn Write>> = Rc::clone(&out) as Rc<RefCell<dyn Write>>;
            let env = Environment::new(stdin, shared_out, ".");

            Fixture { env, out }
        }

        fn run(&self, source: &str) -> Result<RuntimeValue, RuntimeError> {
            let tokens = Lexer::new(source).lex().expect("should lex");
            let mut state = ParseState::new(tokens, source.lines().map(str::to_owned).collect());
            let program = parse(&mut state).expect("should parse");

            evaluate(&program, &self.env)
        }

        fn stdout(&self) -> String {
            String::from_utf8_lossy(&self.out.borrow()).into_owned()
        }
    }

    fn eval_one(source: &str) -> Result<RuntimeValue, RuntimeError> {
        Fixture::new().run(source)
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(Ok(RuntimeValue::Number(7)), eval_one("1 + 2 * 3;"));
        assert_eq!(Ok(RuntimeValue::Number(9)), eval_one("(1 + 2) * 3;"));
        assert_eq!(Ok(RuntimeValue::Number(1)), eval_one("7 % 3;"));
    }

    #[test]
    fn test_division_by_zero_yields_zero() {
        assert_eq!(Ok(RuntimeValue::Number(0)), eval_one("10 / 0;"));
        assert_eq!(Ok(RuntimeValue::Number(0)), eval_one("10 % 0;"));
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(Ok(RuntimeValue::Boolean(true)), eval_one("1 < 2;"));
        assert_eq!(Ok(RuntimeValue::Boolean(false)), eval_one("1 > 2;"));
        assert_eq!(Ok(RuntimeValue::Boolean(true)), eval_one("2 == 2;"));
    }

    #[test]
    fn test_string_and_boolean_equality() {
        assert_eq!(
            Ok(RuntimeValue::Boolean(true)),
            eval_one("\"a\" == \"a\";")
        );
        assert_eq!(
            Ok(RuntimeValue::Boolean(false)),
            eval_one("\"a\" == \"b\";")
        );
        assert_eq!(Ok(RuntimeValue::Boolean(true)), eval_one("true == true;"));
    }

    #[test]
    fn test_type_mismatch_errors() {
        assert_eq!(
            Err(RuntimeError::TypeMismatch {
                operator: "+",
                left: "Number",
                right: "String",
            }),
            eval_one("1 + \"a\";")
        );
        assert_eq!(
            Err(RuntimeError::TypeMismatch {
                operator: "==",
                left: "Boolean",
                right: "Number",
            }),
            eval_one("true == 1;")
        );
    }

    #[test]
    fn test_var_decl_and_lookup() {
        assert_eq!(Ok(RuntimeValue::Number(10)), eval_one("let x = 10; x;"));
        assert_eq!(Ok(RuntimeValue::Null), eval_one("let y; y;"));
    }

    #[test]
    fn test_assignment_and_const() {
        assert_eq!(Ok(RuntimeValue::Number(2)), eval_one("let x = 1; x = 2; x;"));
        assert_eq!(
            Err(RuntimeError::ConstReassign("x".into())),
            eval_one("const x = 1; x = 2;")
        );
    }

    #[test]
    fn test_double_declaration_fails() {
        assert_eq!(
            Err(RuntimeError::AlreadyDefined("x".into())),
            eval_one("let x = 1; let x = 2;")
        );
    }

    #[test]
    fn test_unbound_reference() {
        assert_eq!(
            Err(RuntimeError::UnboundName("ghost".into())),
            eval_one("ghost;")
        );
    }

    #[test]
    fn test_if_else_result_values() {
        assert_eq!(
            Ok(RuntimeValue::Number(1)),
            eval_one("if (1 < 2) { 1; } else { 2; }")
        );
        assert_eq!(
            Ok(RuntimeValue::Number(2)),
            eval_one("if (1 > 2) { 1; } else { 2; }")
        );
        assert_eq!(Ok(RuntimeValue::Null), eval_one("if (1 > 2) { 1; }"));
    }

    #[test]
    fn test_if_condition_must_be_boolean() {
        assert_eq!(
            Err(RuntimeError::BadCondition("Number")),
            eval_one("if (1 + 2) { 1; }")
        );
    }

    #[test]
    fn test_if_does_not_open_a_scope() {
        assert_eq!(
            Ok(RuntimeValue::Number(1)),
            eval_one("if (true) { let x = 1; } x;")
        );
    }

    #[test]
    fn test_ternary() {
        assert_eq!(
            Ok(RuntimeValue::Str("big".into())),
            eval_one("let x = 10; let r = x > 5 ? \"big\" : \"small\"; r;")
        );
    }

    #[test]
    fn test_while_loop() {
        assert_eq!(
            Ok(RuntimeValue::Number(10)),
            eval_one("let total = 0; let i = 0; while (i < 5) { total += i; i++; } total;")
        );
    }

    #[test]
    fn test_for_loop_accumulates() {
        assert_eq!(
            Ok(RuntimeValue::Number(3)),
            eval_one("let total = 0; for (let i = 0; i < 3; i++;) { total += 1; } total;")
        );
    }

    #[test]
    fn test_function_call_and_capture() {
        let fixture = Fixture::new();

        let result = fixture.run(
            "let base = 100;
             fn offset(n) { base + n; }
             offset(20);",
        );

        assert_eq!(Ok(RuntimeValue::Number(120)), result);
    }

    #[test]
    fn test_function_result_is_last_statement() {
        assert_eq!(
            Ok(RuntimeValue::Number(4)),
            eval_one("fn adder(a, b) { let x = a + b; x; } adder(1, 3);")
        );
    }

    #[test]
    fn test_function_arity_mismatch() {
        assert_eq!(
            Err(RuntimeError::ArityMismatch {
                name: "adder".into(),
                want: 2,
                got: 1,
            }),
            eval_one("fn adder(a, b) { a + b; } adder(1);")
        );
    }

    #[test]
    fn test_function_params_are_call_local() {
        assert_eq!(
            Err(RuntimeError::UnboundName("n".into())),
            eval_one("fn f(n) { n; } f(1); n;")
        );
    }

    #[test]
    fn test_function_binding_is_const() {
        assert_eq!(
            Err(RuntimeError::ConstReassign("f".into())),
            eval_one("fn f() { 1; } f = 2;")
        );
    }

    #[test]
    fn test_recursion() {
        assert_eq!(
            Ok(RuntimeValue::Number(120)),
            eval_one("fn fact(n) { (n < 2) ? 1 : n * fact(n - 1); } fact(5);")
        );
    }

    #[test]
    fn test_calling_a_number_fails() {
        assert_eq!(
            Err(RuntimeError::NotCallable("Number")),
            eval_one("let x = 1; x(2);")
        );
    }

    #[test]
    fn test_array_declaration_and_indexing() {
        assert_eq!(
            Ok(RuntimeValue::Number(2)),
            eval_one("let arr = [1, 2, 3]; arr[1];")
        );
        assert_eq!(
            Err(RuntimeError::IndexOutOfBounds(3)),
            eval_one("let arr = [1, 2, 3]; arr[3];")
        );
    }

    #[test]
    fn test_map_declaration_and_lookup() {
        assert_eq!(
            Ok(RuntimeValue::Number(30)),
            eval_one("let m = { \"foo\": 10, \"bar\": 30, }; m[\"bar\"];")
        );
        assert_eq!(
            Err(RuntimeError::MissingKey {
                key: "b".into(),
                map: "m".into(),
            }),
            eval_one("let m = { \"a\": 1 }; m[\"b\"];")
        );
    }

    #[test]
    fn test_map_lookup_through_array_of_keys() {
        let fixture = Fixture::new();

        let result = fixture.run(
            "let keys = [\"one\", \"two\"];
             let m = { \"one\": 1, \"two\": 2, };
             m[keys[1]];",
        );

        assert_eq!(Ok(RuntimeValue::Number(2)), result);
    }

    #[test]
    fn test_object_literal_and_property_access() {
        // `let x = { … }` always declares a map; object literals live in
        // plain expression positions like the right side of an assignment.
        assert_eq!(
            Ok(RuntimeValue::Number(10)),
            eval_one("let y = 20; let p; p = { x: 10, y }; p.x;")
        );
        assert_eq!(
            Err(RuntimeError::NoProperty("z".into())),
            eval_one("let p; p = { x: 10 }; p.z;")
        );
    }

    #[test]
    fn test_object_shorthand_looks_up_binding() {
        assert_eq!(
            Ok(RuntimeValue::Number(20)),
            eval_one("let y = 20; let p; p = { y }; p.y;")
        );
    }

    #[test]
    fn test_shorthand_operators() {
        assert_eq!(Ok(RuntimeValue::Number(1)), eval_one("let i = 0; i++; i;"));
        assert_eq!(Ok(RuntimeValue::Number(4)), eval_one("let i = 5; i--; i;"));
        assert_eq!(
            Ok(RuntimeValue::Number(12)),
            eval_one("let i = 6; i *= 2; i;")
        );
        assert_eq!(
            Ok(RuntimeValue::Number(2)),
            eval_one("let i = 8; i /= 4; i;")
        );
    }

    #[test]
    fn test_shorthand_requires_number() {
        assert_eq!(
            Err(RuntimeError::ShorthandOperand("++")),
            eval_one("let s = \"x\"; s++;")
        );
    }

    #[test]
    fn test_shorthand_writes_to_owning_scope() {
        assert_eq!(
            Ok(RuntimeValue::Number(1)),
            eval_one("let counter = 0; fn bump() { counter++; } bump(); counter;")
        );
    }

    #[test]
    fn test_using_unknown_namespace() {
        assert_eq!(
            Err(RuntimeError::UnknownNamespace("net".into())),
            eval_one("using \"net\";")
        );
    }

    #[test]
    fn test_namespace_requires_using() {
        assert_eq!(
            Err(RuntimeError::UnboundName("io".into())),
            eval_one("io.println(1);")
        );
    }

    #[test]
    fn test_unknown_namespace_function() {
        assert_eq!(
            Err(RuntimeError::UnknownNamespaceFunction {
                namespace: "io",
                function: "prnt".into(),
            }),
            eval_one("using \"io\"; io.prnt(1);")
        );
    }

    #[test]
    fn test_for_loop_prints_sequence() {
        let fixture = Fixture::new();

        fixture
            .run("using \"io\"; for (let i = 0; i < 3; i++;) { io.println(i); }")
            .expect("should run");

        assert_eq!("0\n1\n2\n", fixture.stdout());
    }

    #[test]
    fn test_push_aliases_across_bindings() {
        let fixture = Fixture::new();

        fixture
            .run(
                "using \"data\";
                 using \"io\";
                 let a = [1, 2];
                 let b = a;
                 data.push(a, 3);
                 io.print(b);",
            )
            .expect("should run");

        assert_eq!("[1, 2, 3]", fixture.stdout());
    }

    #[test]
    fn test_arguments_evaluate_before_callee() {
        let fixture = Fixture::new();

        fixture
            .run(
                "using \"io\";
                 fn first() { io.print(\"1\"); }
                 fn second() { io.print(\"2\"); }
                 fn pair(a, b) { 0; }
                 pair(first(), second());",
            )
            .expect("should run");

        assert_eq!("12", fixture.stdout());
    }
}
