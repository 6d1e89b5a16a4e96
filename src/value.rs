//! Runtime değerler (Value), tip etiketleri ve hash anahtarları.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::{BlockStmt, Expr};
use crate::environment::EnvRef;

pub type BuiltinFn = fn(&[Value]) -> Value;

#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Null,
    String(Rc<str>),
    /// return'ün sardığı değer; en yakın fonksiyon çağrısında açılır.
    Return(Box<Value>),
    Error(String),
    Function(Rc<Closure>),
    Macro(Rc<Closure>),
    Builtin(&'static str, BuiltinFn),
    Array(Rc<[Value]>),
    Hash(Rc<HashMap<HashKey, (Value, Value)>>),
    Quote(Box<Expr>),
}

#[derive(Clone)]
pub struct Closure {
    pub params: Vec<String>,
    pub body: BlockStmt,
    pub env: EnvRef,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &"...")
            .finish()
    }
}

pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Int(_) => "INTEGER",
        Value::Bool(_) => "BOOLEAN",
        Value::Null => "NULL",
        Value::String(_) => "STRING",
        Value::Return(_) => "RETURN_VALUE",
        Value::Error(_) => "ERROR",
        Value::Function(_) => "FUNCTION",
        Value::Macro(_) => "MACRO",
        Value::Builtin(..) => "BUILTIN",
        Value::Array(_) => "ARRAY",
        Value::Hash(_) => "HASH",
        Value::Quote(_) => "QUOTE",
    }
}

/// Hash map'in gerçek anahtarı: (tip etiketi, 64-bit özet).
/// String özeti FNV-1a; testlerin tekrarlanabilirliği için sabit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HashKey {
    tag: &'static str,
    digest: u64,
}

impl Value {
    /// Sadece Int, Bool ve String anahtar olabilir.
    pub fn hash_key(&self) -> Option<HashKey> {
        let digest = match self {
            Value::Int(value) => *value as u64,
            Value::Bool(value) => *value as u64,
            Value::String(value) => fnv1a(value.as_bytes()),
            _ => return None,
        };
        Some(HashKey {
            tag: value_type_name(self),
            digest,
        })
    }

    /// Kimlik karşılaştırması: Bool ve Null tekil olduğu için etiketle,
    /// heap değerleri paylaşılan tahsisle karşılaştırılır.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Hash(a), Value::Hash(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Null => write!(f, "null"),
            Value::String(value) => write!(f, "{}", value),
            Value::Return(value) => write!(f, "{}", value),
            Value::Error(message) => write!(f, "ERROR: {}", message),
            Value::Function(closure) => {
                write!(f, "fn({}) {{\n{}\n}}", closure.params.join(", "), closure.body)
            }
            Value::Macro(closure) => {
                write!(f, "macro({}) {{\n{}\n}}", closure.params.join(", "), closure.body)
            }
            Value::Builtin(..) => write!(f, "builtin function"),
            Value::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Value::Hash(pairs) => {
                let pairs: Vec<String> = pairs
                    .values()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Value::Quote(node) => write!(f, "QUOTE({})", node),
        }
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100_0000_01b3);
    }
    hash
}
