use std::{cell::RefCell, io::Cursor, path::PathBuf, rc::Rc};

use std::io::Write;

use goblin::{
    program::{run, GoblinError},
    runtime::{Environment, RuntimeValue},
};

/// A program environment over an in-memory output buffer, for asserting
/// on everything a program writes to its stdout.
pub struct Harness {
    out: Rc<RefCell<Vec<u8>>>,
    pub env: Environment,
}

impl Harness {
    pub fn new() -> Harness {
        Self::build("", PathBuf::from("."))
    }

    /// A harness whose program stdin yields the given text.
    pub fn with_stdin(input: &str) -> Harness {
        Self::build(input, PathBuf::from("."))
    }

    /// A harness resolving `io.open` paths against the given directory.
    pub fn with_entry_location(entry_location: impl Into<PathBuf>) -> Harness {
        Self::build("", entry_location.into())
    }

    fn build(input: &str, entry_location: PathBuf) -> Harness {
        let out: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        let stdin: Rc<RefCell<Cursor<Vec<u8>>>> =
            Rc::new(RefCell::new(Cursor::new(input.as_bytes().to_vec())));
        let shared_out: Rc<RefCell<dyn Write>> = Rc::clone(&out) as Rc<RefCell<dyn Write>>;
        let env = Environment::new(stdin, shared_out, entry_location);

        Harness { out, env }
    }

    pub fn run(&self, source: &str) -> Result<RuntimeValue, GoblinError> {
        run(source, &self.env)
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.out.borrow()).into_owned()
    }

    pub fn flush(&self) {
        self.out.borrow_mut().clear();
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// One table-test case: a source fragment and either its expected stdout
/// or, when `throws_error` is set, its expected error display.
pub struct Case<'a> {
    pub source: &'a str,
    pub want: &'a str,
    pub throws_error: bool,
}

/// Runs every case against a fresh harness and asserts on the captured
/// output or the error text.
pub fn check_cases(cases: &[Case]) {
    for case in cases {
        let harness = Harness::new();

        match harness.run(case.source) {
            Ok(_) => {
                assert!(
                    !case.throws_error,
                    "expected an error for `{}`, got output `{}`",
                    case.source,
                    harness.output()
                );
                assert_eq!(
                    case.want,
                    harness.output(),
                    "wrong output for `{}`",
                    case.source
                );
            }
            Err(e) => {
                assert!(
                    case.throws_error,
                    "unexpected error `{e}` for `{}`",
                    case.source
                );
                assert_eq!(case.want, e.to_string(), "wrong error for `{}`", case.source);
            }
        }
    }
}
