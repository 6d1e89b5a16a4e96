//! AST-walking interpreter.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{self, BinOp, BlockStmt, Expr, Program, Stmt, UnaryOp};
use crate::environment::{EnvRef, Environment};
use crate::native::BuiltinRegistry;
use crate::value::{value_type_name, Closure, Value};

pub struct Interpreter {
    pub env: EnvRef,
    builtins: BuiltinRegistry,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            env: Rc::new(RefCell::new(Environment::new())),
            builtins: BuiltinRegistry::new(),
        }
    }

    /// Programı global environment içinde değerlendirir.
    /// En üst seviyedeki return sarmalı burada açılır.
    pub fn run(&mut self, program: &Program) -> Value {
        let env = self.env.clone();
        self.eval_program(program, &env)
    }

    fn eval_program(&self, program: &Program, env: &EnvRef) -> Value {
        let mut result = Value::Null;
        for stmt in &program.statements {
            result = match self.eval_stmt(stmt, env) {
                Value::Return(value) => return *value,
                Value::Error(message) => return Value::Error(message),
                value => value,
            };
        }
        result
    }

    // Return sarmalı burada açılmaz; iç içe bloklardan fonksiyon
    // çağrısına ya da programın tepesine kadar taşınır.
    pub(crate) fn eval_block(&self, block: &BlockStmt, env: &EnvRef) -> Value {
        let mut result = Value::Null;
        for stmt in &block.statements {
            result = self.eval_stmt(stmt, env);
            if matches!(result, Value::Return(_) | Value::Error(_)) {
                return result;
            }
        }
        result
    }

    fn eval_stmt(&self, stmt: &Stmt, env: &EnvRef) -> Value {
        match stmt {
            Stmt::Let { name, value } => {
                let value = self.eval_expr(value, env);
                if is_error(&value) {
                    return value;
                }
                env.borrow_mut().set(name.clone(), value);
                Value::Null
            }
            Stmt::Return(expr) => {
                let value = self.eval_expr(expr, env);
                if is_error(&value) {
                    return value;
                }
                Value::Return(Box::new(value))
            }
            Stmt::Expr(expr) => self.eval_expr(expr, env),
        }
    }

    fn eval_expr(&self, expr: &Expr, env: &EnvRef) -> Value {
        match expr {
            Expr::Int(value) => Value::Int(*value),
            Expr::Bool(value) => Value::Bool(*value),
            Expr::Str(value) => Value::String(Rc::from(value.as_str())),
            Expr::Ident(name) => self.eval_identifier(name, env),
            Expr::Prefix { op, right } => {
                let right = self.eval_expr(right, env);
                if is_error(&right) {
                    return right;
                }
                eval_prefix(*op, &right)
            }
            Expr::Infix { op, left, right } => {
                let left = self.eval_expr(left, env);
                if is_error(&left) {
                    return left;
                }
                let right = self.eval_expr(right, env);
                if is_error(&right) {
                    return right;
                }
                eval_infix(*op, &left, &right)
            }
            Expr::If { cond, cons, alt } => {
                let cond = self.eval_expr(cond, env);
                if is_error(&cond) {
                    return cond;
                }
                if is_truthy(&cond) {
                    self.eval_block(cons, env)
                } else if let Some(alt) = alt {
                    self.eval_block(alt, env)
                } else {
                    Value::Null
                }
            }
            Expr::FnLit { params, body } => Value::Function(Rc::new(Closure {
                params: params.clone(),
                body: body.clone(),
                env: env.clone(),
            })),
            Expr::MacroLit { .. } => {
                Value::Error("macro literal outside of macro definition".to_string())
            }
            Expr::Call { func, args } => {
                // NOTE: quote sözdizimsel özel formdur; argümanı değerlendirilmez.
                if let Expr::Ident(name) = func.as_ref() {
                    if name == "quote" {
                        return match args.as_slice() {
                            [arg] => self.quote(arg, env),
                            _ => Value::Error(format!(
                                "wrong number of arguments: want=1, got={}",
                                args.len()
                            )),
                        };
                    }
                }
                let func = self.eval_expr(func, env);
                if is_error(&func) {
                    return func;
                }
                let args = match self.eval_expressions(args, env) {
                    Ok(values) => values,
                    Err(err) => return err,
                };
                self.apply_function(&func, args)
            }
            Expr::ArrayLit(elements) => {
                let elements = match self.eval_expressions(elements, env) {
                    Ok(values) => values,
                    Err(err) => return err,
                };
                Value::Array(Rc::from(elements))
            }
            Expr::Index { left, index } => {
                let left = self.eval_expr(left, env);
                if is_error(&left) {
                    return left;
                }
                let index = self.eval_expr(index, env);
                if is_error(&index) {
                    return index;
                }
                eval_index(&left, &index)
            }
            Expr::HashLit(pairs) => self.eval_hash_literal(pairs, env),
        }
    }

    fn eval_identifier(&self, name: &str, env: &EnvRef) -> Value {
        if let Some(value) = env.borrow().get(name) {
            return value;
        }
        if let Some(builtin) = self.builtins.get(name) {
            return builtin;
        }
        Value::Error(format!("identifier not found: {}", name))
    }

    fn eval_expressions(&self, exprs: &[Expr], env: &EnvRef) -> Result<Vec<Value>, Value> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            let value = self.eval_expr(expr, env);
            if is_error(&value) {
                return Err(value);
            }
            values.push(value);
        }
        Ok(values)
    }

    fn apply_function(&self, func: &Value, args: Vec<Value>) -> Value {
        match func {
            Value::Function(closure) => {
                if args.len() != closure.params.len() {
                    return Value::Error(format!(
                        "wrong number of arguments: want={}, got={}",
                        closure.params.len(),
                        args.len()
                    ));
                }
                let scope = Rc::new(RefCell::new(Environment::enclosed(closure.env.clone())));
                for (param, arg) in closure.params.iter().zip(args) {
                    scope.borrow_mut().set(param.clone(), arg);
                }
                match self.eval_block(&closure.body, &scope) {
                    Value::Return(value) => *value,
                    other => other,
                }
            }
            Value::Builtin(_, native) => native(&args),
            other => Value::Error(format!("not a function: {}", value_type_name(other))),
        }
    }

    fn eval_hash_literal(&self, pairs: &[(Expr, Expr)], env: &EnvRef) -> Value {
        let mut map = HashMap::new();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr, env);
            if is_error(&key) {
                return key;
            }
            let Some(hash_key) = key.hash_key() else {
                return Value::Error(format!(
                    "unusable as hash key: {}",
                    value_type_name(&key)
                ));
            };
            let value = self.eval_expr(value_expr, env);
            if is_error(&value) {
                return value;
            }
            map.insert(hash_key, (key, value));
        }
        Value::Hash(Rc::new(map))
    }

    // ===== quote / unquote =====

    fn quote(&self, expr: &Expr, env: &EnvRef) -> Value {
        let node = self.eval_unquote_calls(expr.clone(), env);
        Value::Quote(Box::new(node))
    }

    fn eval_unquote_calls(&self, expr: Expr, env: &EnvRef) -> Expr {
        ast::modify_expr(expr, &mut |node| {
            if !is_unquote_call(&node) {
                return node;
            }
            let Expr::Call { ref args, .. } = node else {
                return node;
            };
            let unquoted = self.eval_expr(&args[0], env);
            value_to_expr(unquoted, node)
        })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_unquote_call(expr: &Expr) -> bool {
    match expr {
        Expr::Call { func, args } => func.token_literal() == "unquote" && args.len() == 1,
        _ => false,
    }
}

/// Değerlendirme sonucunu AST konumuna geri yerleştirir.
/// Çevrilemeyen tipler düğümü olduğu gibi bırakır.
fn value_to_expr(value: Value, original: Expr) -> Expr {
    match value {
        Value::Int(value) => Expr::Int(value),
        Value::Bool(value) => Expr::Bool(value),
        Value::Quote(node) => *node,
        _ => original,
    }
}

fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

fn is_error(value: &Value) -> bool {
    matches!(value, Value::Error(_))
}

fn eval_prefix(op: UnaryOp, right: &Value) -> Value {
    match op {
        UnaryOp::Not => Value::Bool(!is_truthy(right)),
        UnaryOp::Neg => match right {
            Value::Int(value) => Value::Int(value.wrapping_neg()),
            other => Value::Error(format!("unknown operator: -{}", value_type_name(other))),
        },
    }
}

fn eval_infix(op: BinOp, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => eval_integer_infix(op, *l, *r),
        // == ve != her tip için kimlik karşılaştırmasıdır; string
        // eşitliği de kimliktir, içerik değil.
        _ if op == BinOp::Eq => Value::Bool(left.is_identical(right)),
        _ if op == BinOp::Ne => Value::Bool(!left.is_identical(right)),
        (Value::String(l), Value::String(r)) => match op {
            BinOp::Add => Value::String(Rc::from(format!("{}{}", l, r))),
            _ => Value::Error(format!("unknown operator: STRING {} STRING", op)),
        },
        _ if value_type_name(left) != value_type_name(right) => Value::Error(format!(
            "type mismatch: {} {} {}",
            value_type_name(left),
            op,
            value_type_name(right)
        )),
        _ => Value::Error(format!(
            "unknown operator: {} {} {}",
            value_type_name(left),
            op,
            value_type_name(right)
        )),
    }
}

fn eval_integer_infix(op: BinOp, left: i64, right: i64) -> Value {
    match op {
        BinOp::Add => Value::Int(left.wrapping_add(right)),
        BinOp::Sub => Value::Int(left.wrapping_sub(right)),
        BinOp::Mul => Value::Int(left.wrapping_mul(right)),
        BinOp::Div => {
            if right == 0 {
                Value::Error("division by zero".to_string())
            } else {
                Value::Int(left.wrapping_div(right))
            }
        }
        BinOp::Lt => Value::Bool(left < right),
        BinOp::Gt => Value::Bool(left > right),
        BinOp::Eq => Value::Bool(left == right),
        BinOp::Ne => Value::Bool(left != right),
    }
}

fn eval_index(left: &Value, index: &Value) -> Value {
    match (left, index) {
        (Value::Array(elements), Value::Int(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Value::Null
            } else {
                elements[*i as usize].clone()
            }
        }
        (Value::Hash(pairs), key) => match key.hash_key() {
            Some(hash_key) => pairs
                .get(&hash_key)
                .map(|(_, value)| value.clone())
                .unwrap_or(Value::Null),
            None => Value::Error(format!("unusable as hash key: {}", value_type_name(key))),
        },
        _ => Value::Error(format!(
            "index operator not supported: {}",
            value_type_name(left)
        )),
    }
}
