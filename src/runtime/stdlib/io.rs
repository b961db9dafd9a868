use std::{
    collections::HashMap,
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, Seek, SeekFrom},
    io::Write as _,
};

use once_cell::sync::Lazy;

use crate::runtime::{
    env::Environment,
    error::RuntimeError,
    values::{FileHandle, RuntimeValue},
};

use super::{native, Namespace};

use std::cell::RefCell;
use std::rc::Rc;

pub static IO: Lazy<Namespace> = Lazy::new(|| {
    let mut functions = HashMap::new();

    native!(functions, "print", "io.print", print);
    native!(functions, "println", "io.println", println);
    native!(functions, "printf", "io.printf", printf);
    native!(functions, "sprintf", "io.sprintf", sprintf);
    native!(functions, "input", "io.input", input);
    native!(functions, "open", "io.open", open);
    native!(functions, "close", "io.close", close);
    native!(functions, "readline", "io.readline", readline);
    native!(functions, "readlines", "io.readlines", readlines);
    native!(functions, "write", "io.write", write);

    Namespace {
        name: "io",
        functions,
    }
});

/// io.print(args...) — writes the string form of every argument to the
/// program's stdout, without a trailing newline.
fn print(args: &[RuntimeValue], env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let mut builder = String::new();

    for arg in args {
        builder.push_str(&arg.to_string());
    }

    env.write_stdout(&builder);

    Ok(RuntimeValue::Null)
}

/// io.println(args...) — same as `print` but adds a '\n' at the end of the
/// output.
fn println(args: &[RuntimeValue], env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let mut builder = String::new();

    for arg in args {
        builder.push_str(&arg.to_string());
    }

    builder.push('\n');

    env.write_stdout(&builder);

    Ok(RuntimeValue::Null)
}

/// io.printf(fmt, args...) — formats with `%d`, `%s` and `%v` and writes
/// the result to stdout.
fn printf(args: &[RuntimeValue], env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let formatted = format_args_list("io.printf", args)?;

    env.write_stdout(&formatted);

    Ok(RuntimeValue::Null)
}

/// io.sprintf(fmt, args...) — like `printf` but returns the formatted
/// string instead of writing it.
fn sprintf(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let formatted = format_args_list("io.sprintf", args)?;

    Ok(RuntimeValue::Str(formatted))
}

fn format_args_list(
    function: &'static str,
    args: &[RuntimeValue],
) -> Result<String, RuntimeError> {
    if args.is_empty() {
        return Err(RuntimeError::WrongArgCount {
            function,
            want: 1,
            got: 0,
        });
    }

    let RuntimeValue::Str(fmt) = &args[0] else {
        return Err(RuntimeError::WrongArgType {
            function,
            want: "string",
            got: args[0].type_name(),
        });
    };

    format(fmt, &args[1..])
}

/// The format engine behind `printf`/`sprintf`. `%d` takes a number, `%s`
/// a string, `%v` anything (default string form). An unknown verb is
/// emitted literally, a trailing `%` emits `%%`, and a verb with no
/// argument left is emitted literally.
fn format(fmt: &str, args: &[RuntimeValue]) -> Result<String, RuntimeError> {
    let mut out = String::new();
    let mut chars = fmt.chars();
    let mut args = args.iter();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.next() {
            None => out.push_str("%%"),
            Some('d') => match args.next() {
                Some(RuntimeValue::Number(n)) => out.push_str(&n.to_string()),
                Some(other) => {
                    return Err(RuntimeError::FormatArg {
                        verb: 'd',
                        got: other.type_name(),
                    })
                }
                None => out.push_str("%d"),
            },
            Some('s') => match args.next() {
                Some(RuntimeValue::Str(s)) => out.push_str(s),
                Some(other) => {
                    return Err(RuntimeError::FormatArg {
                        verb: 's',
                        got: other.type_name(),
                    })
                }
                None => out.push_str("%s"),
            },
            Some('v') => match args.next() {
                Some(value) => out.push_str(&value.to_string()),
                None => out.push_str("%v"),
            },
            Some(other) => {
                out.push('%');
                out.push(other);
            }
        }
    }

    Ok(out)
}

/// io.input(msg) — writes `msg`, reads one line from the program's stdin
/// and returns it with the trailing newline and whitespace removed.
fn input(args: &[RuntimeValue], env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if args.len() != 1 {
        return Err(RuntimeError::WrongArgCount {
            function: "io.input",
            want: 1,
            got: args.len(),
        });
    }

    env.write_stdout(&args[0].to_string());

    let stdin = env.stdin();
    let mut line = String::new();
    stdin.borrow_mut().read_line(&mut line)?;

    Ok(RuntimeValue::Str(line.trim_end().to_string()))
}

/// io.open(path, mode) — opens a file relative to the environment's entry
/// location. The mode string contains any of `r`, `w`, `+`.
fn open(args: &[RuntimeValue], env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::WrongArgCount {
            function: "io.open",
            want: 2,
            got: args.len(),
        });
    }

    let RuntimeValue::Str(path) = &args[0] else {
        return Err(RuntimeError::WrongArgType {
            function: "io.open",
            want: "string",
            got: args[0].type_name(),
        });
    };
    let RuntimeValue::Str(mode) = &args[1] else {
        return Err(RuntimeError::WrongArgType {
            function: "io.open",
            want: "string",
            got: args[1].type_name(),
        });
    };

    let full_path = env.entry_location().join(path);
    let rendered_path = full_path.display().to_string();

    let read = mode.contains('r') || mode.contains('+');
    let write = mode.contains('w') || mode.contains('+');

    if !read && !write {
        return Err(RuntimeError::FileWrongMode {
            path: rendered_path,
            mode: mode.clone(),
        });
    }

    let mut options = OpenOptions::new();
    options.read(read).write(write);
    if write {
        options.create(true);
    }
    if mode.contains('w') && !mode.contains('+') {
        options.truncate(true);
    }

    let file = options
        .open(&full_path)
        .map_err(|_| RuntimeError::FileNotFound(rendered_path.clone()))?;

    Ok(RuntimeValue::File(Rc::new(RefCell::new(FileHandle {
        path: rendered_path,
        mode: mode.clone(),
        file: Some(file),
        cursor: 1,
    }))))
}

/// io.close(handle) — releases the descriptor; every further operation on
/// the handle fails.
fn close(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let handle = file_arg("io.close", args, 1)?;
    let mut handle = handle.borrow_mut();

    if handle.file.is_none() {
        return Err(RuntimeError::FileAlreadyClosed(handle.path.clone()));
    }

    handle.file = None;

    Ok(RuntimeValue::Null)
}

/// io.readline(handle, n) — reads the `n`-th 1-based line. Leaves the
/// handle's cursor alone.
fn readline(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let handle = file_arg("io.readline", args, 2)?;
    let handle = handle.borrow();

    let RuntimeValue::Number(wanted) = &args[1] else {
        return Err(RuntimeError::WrongArgType {
            function: "io.readline",
            want: "number",
            got: args[1].type_name(),
        });
    };

    let path = handle.path.clone();
    let Some(file) = handle.file.as_ref() else {
        return Err(RuntimeError::FileAlreadyClosed(path));
    };
    if !handle.can_read() {
        return Err(RuntimeError::FileWrongMode {
            path,
            mode: handle.mode.clone(),
        });
    }

    if *wanted < 1 {
        return Err(RuntimeError::LineOutOfBounds(*wanted));
    }

    match nth_line(file, *wanted as usize)? {
        Some(line) => Ok(RuntimeValue::Str(line)),
        None => Err(RuntimeError::LineOutOfBounds(*wanted)),
    }
}

/// io.readlines(handle) — reads the line at the handle's internal cursor,
/// advances it, and returns the text. Returns an empty string at end of
/// file.
fn readlines(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let handle = file_arg("io.readlines", args, 1)?;
    let mut handle = handle.borrow_mut();

    let path = handle.path.clone();
    let line = {
        let Some(file) = handle.file.as_ref() else {
            return Err(RuntimeError::FileAlreadyClosed(path));
        };
        if !handle.can_read() {
            return Err(RuntimeError::FileWrongMode {
                path,
                mode: handle.mode.clone(),
            });
        }

        nth_line(file, handle.cursor)?
    };

    match line {
        Some(line) => {
            handle.cursor += 1;
            Ok(RuntimeValue::Str(line))
        }
        None => Ok(RuntimeValue::Str(String::new())),
    }
}

/// io.write(handle, buf) — appends the string form of `buf` through a
/// handle opened with write capability.
fn write(args: &[RuntimeValue], _env: &Environment) -> Result<RuntimeValue, RuntimeError> {
    let handle = file_arg("io.write", args, 2)?;
    let handle = handle.borrow();

    let path = handle.path.clone();
    let Some(file) = handle.file.as_ref() else {
        return Err(RuntimeError::FileAlreadyClosed(path));
    };
    if !handle.can_write() {
        return Err(RuntimeError::FileWrongMode {
            path,
            mode: handle.mode.clone(),
        });
    }

    let mut file: &File = file;
    file.seek(SeekFrom::End(0))?;
    file.write_all(args[1].to_string().as_bytes())?;

    Ok(RuntimeValue::Null)
}

/// Pulls the file-handle argument out of an argument list after checking
/// the arity.
fn file_arg(
    function: &'static str,
    args: &[RuntimeValue],
    want: usize,
) -> Result<Rc<RefCell<FileHandle>>, RuntimeError> {
    if args.len() != want {
        return Err(RuntimeError::WrongArgCount {
            function,
            want,
            got: args.len(),
        });
    }

    match &args[0] {
        RuntimeValue::File(handle) => Ok(Rc::clone(handle)),
        other => Err(RuntimeError::WrongArgType {
            function,
            want: "file",
            got: other.type_name(),
        }),
    }
}

fn nth_line(file: &File, n: usize) -> Result<Option<String>, RuntimeError> {
    let mut file: &File = file;
    file.seek(SeekFrom::Start(0))?;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if index + 1 == n {
            return Ok(Some(line));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;
    use std::io::Write;

    fn capture_env() -> (Environment, Rc<RefCell<Vec<u8>>>) {
        let stdout: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        let stdin: Rc<RefCell<Cursor<Vec<u8>>>> = Rc::new(RefCell::new(Cursor::new(Vec::new())));
        let shared_out: Rc<RefCell<dyn Write>> = Rc::clone(&stdout) as Rc<RefCell<dyn Write>>;
        (Environment::new(stdin, shared_out, "."), stdout)
    }

    fn captured(buffer: &Rc<RefCell<Vec<u8>>>) -> String {
        String::from_utf8_lossy(&buffer.borrow()).into_owned()
    }

    #[test]
    fn test_print_has_no_trailing_newline() {
        let (env, out) = capture_env();

        print(&[RuntimeValue::Str("Hello".into())], &env).expect("should print");

        assert_eq!("Hello", captured(&out));
    }

    #[test]
    fn test_println_adds_exactly_one_newline() {
        let (env, out) = capture_env();

        println(&[RuntimeValue::Number(12)], &env).expect("should print");

        assert_eq!("12\n", captured(&out));
    }

    #[test]
    fn test_print_concatenates_args() {
        let (env, out) = capture_env();

        print(
            &[RuntimeValue::Str("a".into()), RuntimeValue::Number(1)],
            &env,
        )
        .expect("should print");

        assert_eq!("a1", captured(&out));
    }

    #[test]
    fn test_format_verbs() {
        assert_eq!(
            Ok("1 two [3]".to_string()),
            format(
                "%d %s %v",
                &[
                    RuntimeValue::Number(1),
                    RuntimeValue::Str("two".into()),
                    RuntimeValue::array(vec![RuntimeValue::Number(3)]),
                ],
            )
        );
    }

    #[test]
    fn test_format_unknown_verb_is_literal() {
        assert_eq!(Ok("100%x".to_string()), format("100%x", &[]));
    }

    #[test]
    fn test_format_trailing_percent() {
        assert_eq!(Ok("100%%".to_string()), format("100%", &[]));
    }

    #[test]
    fn test_format_exhausted_args_emit_verb_literally() {
        assert_eq!(Ok("a %d".to_string()), format("a %d", &[]));
    }

    #[test]
    fn test_format_wrong_arg_type() {
        assert_eq!(
            Err(RuntimeError::FormatArg {
                verb: 'd',
                got: "String",
            }),
            format("%d", &[RuntimeValue::Str("no".into())])
        );
    }

    #[test]
    fn test_input_reads_one_trimmed_line() {
        let stdout: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        let stdin: Rc<RefCell<Cursor<Vec<u8>>>> =
            Rc::new(RefCell::new(Cursor::new(b"  answer  \nrest".to_vec())));
        let shared_out: Rc<RefCell<dyn Write>> = Rc::clone(&stdout) as Rc<RefCell<dyn Write>>;
        let env = Environment::new(stdin, shared_out, ".");

        let result = input(&[RuntimeValue::Str("? ".into())], &env).expect("should read");

        assert_eq!(RuntimeValue::Str("  answer".into()), result);
        assert_eq!("? ", captured(&stdout));
    }

    #[test]
    fn test_open_write_readline_close_round_trip() {
        let (env, _) = capture_env();
        let dir = std::env::temp_dir();
        let name = format!("goblin-io-test-{}.txt", std::process::id());
        std::fs::write(dir.join(&name), "first\nsecond\n").expect("should seed file");

        let env = Environment::new(
            Rc::new(RefCell::new(Cursor::new(Vec::new()))),
            env.stdout(),
            &dir,
        );

        let handle = open(
            &[
                RuntimeValue::Str(name.clone()),
                RuntimeValue::Str("r".into()),
            ],
            &env,
        )
        .expect("should open");

        assert_eq!(
            Ok(RuntimeValue::Str("second".into())),
            readline(&[handle.clone(), RuntimeValue::Number(2)], &env)
        );
        assert_eq!(
            Err(RuntimeError::LineOutOfBounds(3)),
            readline(&[handle.clone(), RuntimeValue::Number(3)], &env)
        );

        // The cursor-driven reader walks the file from the top.
        assert_eq!(
            Ok(RuntimeValue::Str("first".into())),
            readlines(&[handle.clone()], &env)
        );
        assert_eq!(
            Ok(RuntimeValue::Str("second".into())),
            readlines(&[handle.clone()], &env)
        );
        assert_eq!(
            Ok(RuntimeValue::Str("".into())),
            readlines(&[handle.clone()], &env)
        );

        close(&[handle.clone()], &env).expect("should close");
        let error = readlines(&[handle.clone()], &env).expect_err("closed handle");
        assert!(matches!(error, RuntimeError::FileAlreadyClosed(_)));
        assert!(matches!(
            close(&[handle], &env),
            Err(RuntimeError::FileAlreadyClosed(_))
        ));

        let _ = std::fs::remove_file(dir.join(&name));
    }

    #[test]
    fn test_write_requires_write_mode() {
        let dir = std::env::temp_dir();
        let name = format!("goblin-io-write-test-{}.txt", std::process::id());
        std::fs::write(dir.join(&name), "seed\n").expect("should seed file");

        let env = Environment::new(
            Rc::new(RefCell::new(Cursor::new(Vec::new()))),
            Rc::new(RefCell::new(Vec::new())),
            &dir,
        );

        let read_only = open(
            &[
                RuntimeValue::Str(name.clone()),
                RuntimeValue::Str("r".into()),
            ],
            &env,
        )
        .expect("should open");

        assert!(matches!(
            write(&[read_only, RuntimeValue::Str("x".into())], &env),
            Err(RuntimeError::FileWrongMode { .. })
        ));

        let writable = open(
            &[
                RuntimeValue::Str(name.clone()),
                RuntimeValue::Str("+".into()),
            ],
            &env,
        )
        .expect("should open");

        write(
            &[writable.clone(), RuntimeValue::Str("appended".into())],
            &env,
        )
        .expect("should write");

        assert_eq!(
            Ok(RuntimeValue::Str("appended".into())),
            readline(&[writable, RuntimeValue::Number(2)], &env)
        );

        let _ = std::fs::remove_file(dir.join(&name));
    }

    #[test]
    fn test_open_missing_file() {
        let (env, _) = capture_env();

        let result = open(
            &[
                RuntimeValue::Str("does-not-exist.txt".into()),
                RuntimeValue::Str("r".into()),
            ],
            &env,
        );

        assert!(matches!(result, Err(RuntimeError::FileNotFound(_))));
    }
}
