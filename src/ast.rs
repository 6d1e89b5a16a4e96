//! AST: soyut sözdizim ağacı tanımları.

use std::fmt;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Let { name: String, value: Expr },
    Return(Expr),
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Ident(String),
    Int(i64),
    Bool(bool),
    /// "..." — kaçış dizisi işlenmez, bayt bayt saklanır.
    Str(String),
    Prefix { op: UnaryOp, right: Box<Expr> },
    Infix { op: BinOp, left: Box<Expr>, right: Box<Expr> },
    If { cond: Box<Expr>, cons: BlockStmt, alt: Option<BlockStmt> },
    FnLit { params: Vec<String>, body: BlockStmt },
    Call { func: Box<Expr>, args: Vec<Expr> },
    ArrayLit(Vec<Expr>),
    Index { left: Box<Expr>, index: Box<Expr> },
    /// Çiftler kaynak sırasıyla tutulur; anlamsal sıra yoktur.
    HashLit(Vec<(Expr, Expr)>),
    MacroLit { params: Vec<String>, body: BlockStmt },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    Ne,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl Program {
    pub fn token_literal(&self) -> String {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => String::new(),
        }
    }
}

impl Stmt {
    pub fn token_literal(&self) -> String {
        match self {
            Stmt::Let { .. } => "let".to_string(),
            Stmt::Return(_) => "return".to_string(),
            Stmt::Expr(expr) => expr.token_literal(),
        }
    }
}

impl Expr {
    /// Düğümü başlatan token'ın lexeme'i.
    pub fn token_literal(&self) -> String {
        match self {
            Expr::Ident(name) => name.clone(),
            Expr::Int(value) => value.to_string(),
            Expr::Bool(value) => value.to_string(),
            Expr::Str(value) => value.clone(),
            Expr::Prefix { op, .. } => op.to_string(),
            Expr::Infix { op, .. } => op.to_string(),
            Expr::If { .. } => "if".to_string(),
            Expr::FnLit { .. } => "fn".to_string(),
            Expr::Call { .. } => "(".to_string(),
            Expr::ArrayLit(_) => "[".to_string(),
            Expr::Index { .. } => "[".to_string(),
            Expr::HashLit(_) => "{".to_string(),
            Expr::MacroLit { .. } => "macro".to_string(),
        }
    }
}

// ===== Canonical string =====

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for BlockStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value } => write!(f, "let {} = {};", name, value),
            Stmt::Return(value) => write!(f, "return {};", value),
            Stmt::Expr(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => write!(f, "{}", name),
            Expr::Int(value) => write!(f, "{}", value),
            Expr::Bool(value) => write!(f, "{}", value),
            Expr::Str(value) => write!(f, "{}", value),
            Expr::Prefix { op, right } => write!(f, "({}{})", op, right),
            Expr::Infix { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expr::If { cond, cons, alt } => {
                write!(f, "if{} {}", cond, cons)?;
                if let Some(alt) = alt {
                    write!(f, "else {}", alt)?;
                }
                Ok(())
            }
            Expr::FnLit { params, body } => {
                write!(f, "fn({}){{{}}}", params.join(", "), body)
            }
            Expr::Call { func, args } => {
                write!(f, "{}({})", func, join_exprs(args))
            }
            Expr::ArrayLit(elements) => write!(f, "[{}]", join_exprs(elements)),
            Expr::Index { left, index } => write!(f, "({}[{}])", left, index),
            Expr::HashLit(pairs) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}:{}", key, value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Expr::MacroLit { params, body } => {
                write!(f, "macro({}){{{}}}", params.join(", "), body)
            }
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        };
        write!(f, "{}", op)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

fn join_exprs(exprs: &[Expr]) -> String {
    exprs
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ===== Modify =====
//
// Post-order yeniden yazma: önce çocuklar, sonra düğümün kendisi.
// Modifier ifade tipinde çalıştığı için rol karışması mümkün değil.

pub fn modify_program(program: Program, f: &mut dyn FnMut(Expr) -> Expr) -> Program {
    Program {
        statements: program
            .statements
            .into_iter()
            .map(|stmt| modify_stmt(stmt, f))
            .collect(),
    }
}

pub fn modify_stmt(stmt: Stmt, f: &mut dyn FnMut(Expr) -> Expr) -> Stmt {
    match stmt {
        Stmt::Let { name, value } => Stmt::Let {
            name,
            value: modify_expr(value, f),
        },
        Stmt::Return(value) => Stmt::Return(modify_expr(value, f)),
        Stmt::Expr(expr) => Stmt::Expr(modify_expr(expr, f)),
    }
}

pub fn modify_block(block: BlockStmt, f: &mut dyn FnMut(Expr) -> Expr) -> BlockStmt {
    BlockStmt {
        statements: block
            .statements
            .into_iter()
            .map(|stmt| modify_stmt(stmt, f))
            .collect(),
    }
}

pub fn modify_expr(expr: Expr, f: &mut dyn FnMut(Expr) -> Expr) -> Expr {
    let expr = match expr {
        Expr::Prefix { op, right } => Expr::Prefix {
            op,
            right: Box::new(modify_expr(*right, f)),
        },
        Expr::Infix { op, left, right } => Expr::Infix {
            op,
            left: Box::new(modify_expr(*left, f)),
            right: Box::new(modify_expr(*right, f)),
        },
        Expr::If { cond, cons, alt } => Expr::If {
            cond: Box::new(modify_expr(*cond, f)),
            cons: modify_block(cons, f),
            alt: alt.map(|block| modify_block(block, f)),
        },
        Expr::FnLit { params, body } => Expr::FnLit {
            params,
            body: modify_block(body, f),
        },
        Expr::Call { func, args } => Expr::Call {
            func: Box::new(modify_expr(*func, f)),
            args: args.into_iter().map(|arg| modify_expr(arg, f)).collect(),
        },
        Expr::ArrayLit(elements) => Expr::ArrayLit(
            elements
                .into_iter()
                .map(|element| modify_expr(element, f))
                .collect(),
        ),
        Expr::Index { left, index } => Expr::Index {
            left: Box::new(modify_expr(*left, f)),
            index: Box::new(modify_expr(*index, f)),
        },
        Expr::HashLit(pairs) => Expr::HashLit(
            pairs
                .into_iter()
                .map(|(key, value)| (modify_expr(key, f), modify_expr(value, f)))
                .collect(),
        ),
        Expr::MacroLit { params, body } => Expr::MacroLit {
            params,
            body: modify_block(body, f),
        },
        leaf => leaf,
    };
    f(expr)
}
