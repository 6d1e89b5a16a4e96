//! Sprig interpreter: dosya veya REPL.
//!
//! Kullanım:
//!   cargo run -- <dosya.sg>
//!   cargo run --              # REPL (tek satır)

use std::cell::RefCell;
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use sprig::{define_macros, expand_macros, parse, EnvRef, Environment, Interpreter, Value};

fn main() {
    let mut args = env::args().skip(1);
    if let Some(path) = args.next() {
        let src = fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("okunamadı {}: {}", path, e);
            std::process::exit(1);
        });

        let mut interp = Interpreter::new();
        let macros = new_macro_env();
        if !run_with_interp(&mut interp, &macros, &src, false) {
            std::process::exit(1);
        }
        return;
    }

    println!("[ repl mode on ]\nfor quitting repl mode use \";q\" command");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut interp = Interpreter::new();
    let macros = new_macro_env();

    loop {
        print!("> ");
        let _ = stdout.flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim_end();

        if line.is_empty() {
            continue;
        } else if line.starts_with(";q") {
            println!("Quitting repl mode");
            break;
        }
        run_with_interp(&mut interp, &macros, line, true);
    }
}

fn new_macro_env() -> EnvRef {
    Rc::new(RefCell::new(Environment::new()))
}

fn run_with_interp(interp: &mut Interpreter, macros: &EnvRef, src: &str, echo: bool) -> bool {
    let mut program = match parse(src) {
        Ok(program) => program,
        Err(errs) => {
            eprintln!("syntax hatası:");
            for e in errs {
                eprintln!("  {}", e);
            }
            return false;
        }
    };

    define_macros(&mut program, macros);
    let program = match expand_macros(program, macros) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("makro hatası: {}", e);
            return false;
        }
    };

    match interp.run(&program) {
        Value::Error(e) => {
            eprintln!("runtime hatası: {}", e);
            false
        }
        value => {
            if echo {
                println!("{}", value);
            }
            true
        }
    }
}
