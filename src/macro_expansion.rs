//! Makro genisletme: tanimlari toplar, cagri yerlerini yeniden yazar.
//! Degerlendiriciden once calisir; interpreter makro cagrisi gormez.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{self, Expr, Program, Stmt};
use crate::environment::{EnvRef, Environment};
use crate::interpreter::Interpreter;
use crate::value::{Closure, Value};

/// Üst seviyedeki `let <ad> = macro(...){...};` tanımlarını programdan
/// çıkarır ve verilen environment'a `Macro` değeri olarak bağlar.
pub fn define_macros(program: &mut Program, env: &EnvRef) {
    let mut kept = Vec::with_capacity(program.statements.len());
    for stmt in program.statements.drain(..) {
        match stmt {
            Stmt::Let {
                name,
                value: Expr::MacroLit { params, body },
            } => {
                let mac = Value::Macro(Rc::new(Closure {
                    params,
                    body,
                    env: env.clone(),
                }));
                env.borrow_mut().set(name, mac);
            }
            other => kept.push(other),
        }
    }
    program.statements = kept;
}

/// Makroya bağlı her çağrı yerini, makro gövdesinin ürettiği quote'un
/// içindeki düğümle değiştirir. Argümanlar değerlendirilmeden Quote
/// olarak parametrelere bağlanır.
pub fn expand_macros(program: Program, env: &EnvRef) -> Result<Program, String> {
    let interp = Interpreter::new();
    let mut failure: Option<String> = None;

    let expanded = ast::modify_program(program, &mut |expr| {
        if failure.is_some() {
            return expr;
        }
        let mac = match macro_for_call(&expr, env) {
            Some(mac) => mac,
            None => return expr,
        };
        let Expr::Call { ref args, .. } = expr else {
            return expr;
        };
        if args.len() != mac.params.len() {
            failure = Some(format!(
                "wrong number of arguments: want={}, got={}",
                mac.params.len(),
                args.len()
            ));
            return expr;
        }

        let scope = Rc::new(RefCell::new(Environment::enclosed(mac.env.clone())));
        for (param, arg) in mac.params.iter().zip(args) {
            scope
                .borrow_mut()
                .set(param.clone(), Value::Quote(Box::new(arg.clone())));
        }

        match interp.eval_block(&mac.body, &scope) {
            Value::Quote(node) => *node,
            Value::Error(message) => {
                failure = Some(message);
                expr
            }
            _ => {
                failure = Some("macros must return a quoted expression".to_string());
                expr
            }
        }
    });

    match failure {
        Some(message) => Err(message),
        None => Ok(expanded),
    }
}

fn macro_for_call(expr: &Expr, env: &EnvRef) -> Option<Rc<Closure>> {
    let Expr::Call { func, .. } = expr else {
        return None;
    };
    let Expr::Ident(name) = func.as_ref() else {
        return None;
    };
    match env.borrow().get(name) {
        Some(Value::Macro(mac)) => Some(mac),
        _ => None,
    }
}
