//! Scope zinciri ve binding yönetimi.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    outer: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enclosed(outer: EnvRef) -> Self {
        Self {
            bindings: HashMap::new(),
            outer: Some(outer),
        }
    }

    /// İçten dışa doğru arar; en yakın binding kazanır.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        if let Some(ref outer) = self.outer {
            return outer.borrow().get(name);
        }
        None
    }

    /// Her zaman en içteki frame'e yazar; aynı isim üzerine yazılır.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_walks_outer_frames() {
        let global = Rc::new(RefCell::new(Environment::new()));
        global.borrow_mut().set("x", Value::Int(1));

        let inner = Environment::enclosed(global.clone());
        assert!(matches!(inner.get("x"), Some(Value::Int(1))));
        assert!(inner.get("y").is_none());
    }

    #[test]
    fn set_writes_innermost_only() {
        let global = Rc::new(RefCell::new(Environment::new()));
        global.borrow_mut().set("x", Value::Int(1));

        let mut inner = Environment::enclosed(global.clone());
        inner.set("x", Value::Int(2));

        assert!(matches!(inner.get("x"), Some(Value::Int(2))));
        assert!(matches!(global.borrow().get("x"), Some(Value::Int(1))));
    }

    #[test]
    fn set_overwrites_same_frame() {
        let mut env = Environment::new();
        env.set("x", Value::Int(1));
        env.set("x", Value::Int(9));
        assert!(matches!(env.get("x"), Some(Value::Int(9))));
    }
}
