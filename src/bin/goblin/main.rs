//! # Goblin
//!
//! This binary is the driver of the Goblin interpreter. It runs `.gob`
//! source files, or an interactive REPL when started without a file.

mod cli;

use cli::*;

use std::{
    cell::RefCell,
    error::Error,
    fs,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, error, info};

use goblin::{
    program::{parse_source, run},
    runtime::{Environment, RuntimeValue, SharedInput, SharedOutput},
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::init();

    simple_logger::init_with_level(args.verbosity.into()).unwrap();

    match &args.file {
        Some(file) => run_file(file, args.dump_parsed),
        None => repl(),
    }
}

fn run_file(file: &Path, dump_parsed: bool) -> Result<(), Box<dyn Error>> {
    if file.extension().map(|ext| ext != "gob").unwrap_or(true) {
        println!("Error: File must have a .gob extension!");
        return Ok(());
    }

    let source = match fs::read_to_string(file) {
        Ok(source) => source,
        Err(e) => {
            error!("could not read file '{}': {e}", file.display());
            std::process::exit(-1);
        }
    };

    let entry_location = file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    debug!("entry location is '{}'", entry_location.display());

    if dump_parsed {
        match parse_source(&source) {
            Ok(program) => info!("parsed AST:\n{}", serde_json::to_string_pretty(&program)?),
            Err(e) => {
                println!("{e}");
                std::process::exit(-1);
            }
        }
    }

    let env = Environment::new(stdin_handle(), stdout_handle(), entry_location);

    match run(&source, &env) {
        Err(e) => {
            println!("{e}");
            std::process::exit(-1);
        }
        Ok(value) => {
            if !matches!(value, RuntimeValue::Null) {
                println!("{value}");
            }
        }
    }

    Ok(())
}

fn repl() -> Result<(), Box<dyn Error>> {
    println!("Goblin v0.1");

    let env = Environment::new(stdin_handle(), stdout_handle(), ".");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // EOF on stdin ends the session.
            println!("Goodbye!");
            return Ok(());
        }

        let input = input.trim();

        if input == "exit" {
            println!("Goodbye!");
            return Ok(());
        }

        if input.is_empty() {
            continue;
        }

        // One shared environment across lines, so bindings persist.
        match run(input, &env) {
            Err(e) => println!("{e}"),
            Ok(value) => {
                if !matches!(value, RuntimeValue::Null) {
                    println!("{value}");
                }
            }
        }
    }
}

fn stdout_handle() -> SharedOutput {
    Rc::new(RefCell::new(io::stdout()))
}

fn stdin_handle() -> SharedInput {
    Rc::new(RefCell::new(BufReader::new(io::stdin())))
}
