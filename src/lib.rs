//! Sprig — SyntaxAnalyzer (lexer+parser), AST, AST-walking Interpreter.

pub mod ast;
pub mod environment;
pub mod interpreter;
pub mod macro_expansion;
pub mod native;
pub mod syntax_analyzer;
pub mod value;

pub use ast::{Expr, Program, Stmt};
pub use environment::{EnvRef, Environment};
pub use interpreter::Interpreter;
pub use macro_expansion::{define_macros, expand_macros};
pub use native::BuiltinRegistry;
pub use syntax_analyzer::{SyntaxAnalyzer, Token};
pub use value::Value;

/// Kaynak metni AST'ye çevirir; hatalar liste olarak döner.
pub fn parse(source: &str) -> Result<Program, Vec<String>> {
    SyntaxAnalyzer::new(source).analyze()
}
