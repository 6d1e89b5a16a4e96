//! SyntaxAnalyzer: logos tabanli lexer + Pratt parser + hata raporlama.

use logos::Logos;

use crate::ast::{BinOp, BlockStmt, Expr, Program, Stmt, UnaryOp};

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
    Macro,

    // Operators
    Eq,
    NotEq,
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Lt,
    Gt,

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Literals
    Ident(String),
    /// Ham lexeme saklanır; i64'e çevirme parser'da yapılır.
    Int(String),
    /// Tırnaklar arası baytlar olduğu gibi; kaçış dizisi yok.
    Str(String),

    /// Tanınmayan bayt; lexer üretmeye devam eder.
    Illegal(String),
    Eof,
}

#[derive(Logos, Clone, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    // ===== Keywords =====
    #[token("fn")]
    Function,
    #[token("let")]
    Let,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,
    #[token("macro")]
    Macro,

    // ===== Operators (ORDER MATTERS) =====
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("!")]
    Bang,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // ===== Delimiters =====
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // ===== Literals =====
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Int(String),
    #[regex(r#""[^"]*""#, |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    Str(String),
}

impl From<RawToken> for Token {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Function => Token::Function,
            RawToken::Let => Token::Let,
            RawToken::True => Token::True,
            RawToken::False => Token::False,
            RawToken::If => Token::If,
            RawToken::Else => Token::Else,
            RawToken::Return => Token::Return,
            RawToken::Macro => Token::Macro,
            RawToken::Eq => Token::Eq,
            RawToken::NotEq => Token::NotEq,
            RawToken::Assign => Token::Assign,
            RawToken::Plus => Token::Plus,
            RawToken::Minus => Token::Minus,
            RawToken::Bang => Token::Bang,
            RawToken::Asterisk => Token::Asterisk,
            RawToken::Slash => Token::Slash,
            RawToken::Lt => Token::Lt,
            RawToken::Gt => Token::Gt,
            RawToken::Comma => Token::Comma,
            RawToken::Semicolon => Token::Semicolon,
            RawToken::Colon => Token::Colon,
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::LBrace => Token::LBrace,
            RawToken::RBrace => Token::RBrace,
            RawToken::LBracket => Token::LBracket,
            RawToken::RBracket => Token::RBracket,
            RawToken::Ident(name) => Token::Ident(name),
            RawToken::Int(lexeme) => Token::Int(lexeme),
            RawToken::Str(value) => Token::Str(value),
        }
    }
}

impl Token {
    pub fn name(&self) -> &'static str {
        match self {
            Token::Function => "FUNCTION",
            Token::Let => "LET",
            Token::True => "TRUE",
            Token::False => "FALSE",
            Token::If => "IF",
            Token::Else => "ELSE",
            Token::Return => "RETURN",
            Token::Macro => "MACRO",
            Token::Eq => "==",
            Token::NotEq => "!=",
            Token::Assign => "=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Bang => "!",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Colon => ":",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::Ident(_) => "IDENT",
            Token::Int(_) => "INT",
            Token::Str(_) => "STRING",
            Token::Illegal(_) => "ILLEGAL",
            Token::Eof => "EOF",
        }
    }
}

fn lex(source: &str) -> Vec<Token> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(raw) => tokens.push(Token::from(raw)),
            Err(_) => tokens.push(Token::Illegal(lexer.slice().to_string())),
        }
    }
    tokens.push(Token::Eof);
    tokens
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

fn precedence_of(token: &Token) -> Precedence {
    match token {
        Token::Eq | Token::NotEq => Precedence::Equals,
        Token::Lt | Token::Gt => Precedence::LessGreater,
        Token::Plus | Token::Minus => Precedence::Sum,
        Token::Slash | Token::Asterisk => Precedence::Product,
        Token::LParen => Precedence::Call,
        Token::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

#[derive(Debug)]
pub struct SyntaxAnalyzer {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<String>,
}

impl SyntaxAnalyzer {
    pub fn new(source: &str) -> Self {
        Self {
            tokens: lex(source),
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Tum analiz akisi: lex + parse, sonuc olarak AST ya da hatalar.
    pub fn analyze(&mut self) -> Result<Program, Vec<String>> {
        let program = self.parse_program();
        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(self.errors.clone())
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cur_is(&Token::Eof) {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                // Hatali statement atlanir; bir sonraki ';'ye kadar ilerlenir.
                None => self.synchronize(),
            }
            self.next_token();
        }
        Program { statements }
    }

    // ===== Token buffers =====

    fn cur(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    fn next_token(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn cur_is(&self, token: &Token) -> bool {
        std::mem::discriminant(self.cur()) == std::mem::discriminant(token)
    }

    fn peek_is(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    fn expect_peek(&mut self, token: &Token) -> bool {
        if self.peek_is(token) {
            self.next_token();
            true
        } else {
            self.peek_error(token.name());
            false
        }
    }

    fn expect_peek_ident(&mut self) -> Option<String> {
        match self.peek().clone() {
            Token::Ident(name) => {
                self.next_token();
                Some(name)
            }
            _ => {
                self.peek_error("IDENT");
                None
            }
        }
    }

    fn peek_error(&mut self, expected: &str) {
        self.errors.push(format!(
            "expected next token to be {}, got {} instead",
            expected,
            self.peek().name()
        ));
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek())
    }

    fn cur_precedence(&self) -> Precedence {
        precedence_of(self.cur())
    }

    fn synchronize(&mut self) {
        while !self.cur_is(&Token::Semicolon) && !self.cur_is(&Token::Eof) {
            self.next_token();
        }
    }

    // ===== Statements =====

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.cur() {
            Token::Let => self.parse_let_statement(),
            Token::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Stmt> {
        let name = self.expect_peek_ident()?;
        if !self.expect_peek(&Token::Assign) {
            return None;
        }
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&Token::Semicolon) {
            self.next_token();
        }
        Some(Stmt::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Stmt> {
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&Token::Semicolon) {
            self.next_token();
        }
        Some(Stmt::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&Token::Semicolon) {
            self.next_token();
        }
        Some(Stmt::Expr(expr))
    }

    // ===== Expressions (Pratt) =====

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(&Token::Semicolon) && precedence < self.peek_precedence() {
            left = match self.peek() {
                Token::Plus
                | Token::Minus
                | Token::Slash
                | Token::Asterisk
                | Token::Eq
                | Token::NotEq
                | Token::Lt
                | Token::Gt => {
                    self.next_token();
                    self.parse_infix_expression(left)?
                }
                Token::LParen => {
                    self.next_token();
                    self.parse_call_expression(left)?
                }
                Token::LBracket => {
                    self.next_token();
                    self.parse_index_expression(left)?
                }
                _ => return Some(left),
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.cur().clone() {
            Token::Ident(name) => Some(Expr::Ident(name)),
            Token::Int(lexeme) => self.parse_integer_literal(&lexeme),
            Token::Str(value) => Some(Expr::Str(value)),
            Token::True => Some(Expr::Bool(true)),
            Token::False => Some(Expr::Bool(false)),
            Token::Bang => self.parse_prefix_expression(UnaryOp::Not),
            Token::Minus => self.parse_prefix_expression(UnaryOp::Neg),
            Token::LParen => self.parse_grouped_expression(),
            Token::If => self.parse_if_expression(),
            Token::Function => {
                let (params, body) = self.parse_function_literal()?;
                Some(Expr::FnLit { params, body })
            }
            Token::Macro => {
                let (params, body) = self.parse_function_literal()?;
                Some(Expr::MacroLit { params, body })
            }
            Token::LBracket => self.parse_array_literal(),
            Token::LBrace => self.parse_hash_literal(),
            other => {
                self.errors.push(format!(
                    "no prefix parse function for {} found",
                    other.name()
                ));
                None
            }
        }
    }

    fn parse_integer_literal(&mut self, lexeme: &str) -> Option<Expr> {
        match lexeme.parse::<i64>() {
            Ok(value) => Some(Expr::Int(value)),
            Err(_) => {
                self.errors
                    .push(format!("could not parse {:?} as integer", lexeme));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self, op: UnaryOp) -> Option<Expr> {
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expr::Prefix {
            op,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expr) -> Option<Expr> {
        let op = match self.cur() {
            Token::Plus => BinOp::Add,
            Token::Minus => BinOp::Sub,
            Token::Asterisk => BinOp::Mul,
            Token::Slash => BinOp::Div,
            Token::Lt => BinOp::Lt,
            Token::Gt => BinOp::Gt,
            Token::Eq => BinOp::Eq,
            Token::NotEq => BinOp::Ne,
            _ => return None,
        };
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expr::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(&Token::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expr> {
        if !self.expect_peek(&Token::LParen) {
            return None;
        }
        self.next_token();
        let cond = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(&Token::RParen) {
            return None;
        }
        if !self.expect_peek(&Token::LBrace) {
            return None;
        }
        let cons = self.parse_block_statement();

        let alt = if self.peek_is(&Token::Else) {
            self.next_token();
            if !self.expect_peek(&Token::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expr::If {
            cond: Box::new(cond),
            cons,
            alt,
        })
    }

    fn parse_block_statement(&mut self) -> BlockStmt {
        let mut statements = Vec::new();
        self.next_token();
        while !self.cur_is(&Token::RBrace) && !self.cur_is(&Token::Eof) {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => self.synchronize(),
            }
            self.next_token();
        }
        BlockStmt { statements }
    }

    fn parse_function_literal(&mut self) -> Option<(Vec<String>, BlockStmt)> {
        if !self.expect_peek(&Token::LParen) {
            return None;
        }
        let params = self.parse_function_parameters()?;
        if !self.expect_peek(&Token::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();
        Some((params, body))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();
        if self.peek_is(&Token::RParen) {
            self.next_token();
            return Some(params);
        }
        params.push(self.expect_peek_ident()?);
        while self.peek_is(&Token::Comma) {
            self.next_token();
            params.push(self.expect_peek_ident()?);
        }
        if !self.expect_peek(&Token::RParen) {
            return None;
        }
        Some(params)
    }

    fn parse_call_expression(&mut self, func: Expr) -> Option<Expr> {
        let args = self.parse_expression_list(&Token::RParen)?;
        Some(Expr::Call {
            func: Box::new(func),
            args,
        })
    }

    fn parse_expression_list(&mut self, end: &Token) -> Option<Vec<Expr>> {
        let mut list = Vec::new();
        if self.peek_is(end) {
            self.next_token();
            return Some(list);
        }
        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(&Token::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_array_literal(&mut self) -> Option<Expr> {
        let elements = self.parse_expression_list(&Token::RBracket)?;
        Some(Expr::ArrayLit(elements))
    }

    fn parse_index_expression(&mut self, left: Expr) -> Option<Expr> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(&Token::RBracket) {
            return None;
        }
        Some(Expr::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    fn parse_hash_literal(&mut self) -> Option<Expr> {
        let mut pairs = Vec::new();
        while !self.peek_is(&Token::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(&Token::Colon) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.peek_is(&Token::RBrace) && !self.expect_peek(&Token::Comma) {
                return None;
            }
        }
        if !self.expect_peek(&Token::RBrace) {
            return None;
        }
        Some(Expr::HashLit(pairs))
    }
}
