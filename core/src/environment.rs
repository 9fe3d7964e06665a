use std::collections::HashMap;

use crate::error::{Result, RuntimeError};
use crate::token::Token;
use crate::value::Value;

pub type ScopeId = usize;

#[derive(Debug, Default)]
struct Scope {
    values: HashMap<String, Value>,
    enclosing: Option<ScopeId>,
}

impl Scope {
    fn new(enclosing: Option<ScopeId>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing,
        }
    }
}

/// Chain of lexical scopes.
///
/// Scopes live in an arena and point at their parent by index. Only the
/// innermost scope can be left, so leaving a scope simply drops the last
/// arena slot.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(None)],
            current: 0,
        }
    }

    /// Number of scopes in the chain, the global scope included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Open a child of the current scope and make it current.
    pub fn enter_scope(&mut self) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope::new(Some(self.current)));
        self.current = id;
        tracing::trace!(scope = id, "enter scope");
        id
    }

    /// Discard the current scope and make its parent current. The global
    /// scope is never discarded.
    pub fn exit_scope(&mut self) {
        if let Some(enclosing) = self.scopes[self.current].enclosing {
            tracing::trace!(scope = self.current, "exit scope");
            self.scopes.truncate(self.current);
            self.current = enclosing;
        }
    }

    /// Bind `name` in the current scope, replacing any earlier binding there.
    pub fn define(&mut self, name: &str, value: Value) {
        tracing::trace!(name, scope = self.current, "define");
        self.scopes[self.current]
            .values
            .insert(name.to_string(), value);
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        let id = self.resolve(&name.lexeme).ok_or_else(|| undefined(name))?;
        self.scopes[id].values.insert(name.lexeme.clone(), value);
        Ok(())
    }

    pub fn get(&self, name: &Token) -> Result<Value> {
        self.resolve(&name.lexeme)
            .and_then(|id| self.scopes[id].values.get(&name.lexeme))
            .cloned()
            .ok_or_else(|| undefined(name))
    }

    /// Bindings of the outermost scope, sorted by name.
    pub fn globals(&self) -> Vec<(String, Value)> {
        let mut values: Vec<(String, Value)> = self.scopes[0]
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        values
    }

    /// Innermost scope that binds `name`.
    fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if self.scopes[id].values.contains_key(name) {
                return Some(id);
            }
            scope = self.scopes[id].enclosing;
        }
        None
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable {}", name.lexeme))
}
