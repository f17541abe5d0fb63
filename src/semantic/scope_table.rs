use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Identifier;

#[derive(Debug, Default)]
struct Scope {
    by_name: HashMap<String, Rc<Identifier>>,
    // First-use order, so later passes see identifiers deterministically.
    order: Vec<Rc<Identifier>>,
}

/// Per-scope intern table for identifiers.
///
/// Every `Identifier` node is created here, at most once per (scope, name);
/// the AST only holds shared handles to the interned node.
#[derive(Debug, Default)]
pub struct ScopeTable {
    scopes: HashMap<String, Scope>,
    scope_order: Vec<String>,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Return the node for `name` in `scope`, creating it on first use.
    pub fn intern(&mut self, scope: &str, name: &str) -> Rc<Identifier> {
        if !self.scopes.contains_key(scope) {
            self.scope_order.push(scope.to_string());
        }
        let entry = self.scopes.entry(scope.to_string()).or_default();
        if let Some(existing) = entry.by_name.get(name) {
            return Rc::clone(existing);
        }
        let identifier = Rc::new(Identifier::new(name));
        entry.by_name.insert(name.to_string(), Rc::clone(&identifier));
        entry.order.push(Rc::clone(&identifier));
        identifier
    }

    pub fn lookup(&self, scope: &str, name: &str) -> Option<Rc<Identifier>> {
        self.scopes
            .get(scope)
            .and_then(|s| s.by_name.get(name))
            .map(Rc::clone)
    }

    pub fn contains(&self, scope: &str, name: &str) -> bool {
        self.lookup(scope, name).is_some()
    }

    /// Identifiers of `scope` in first-use order; empty for an unknown scope.
    pub fn identifiers(&self, scope: &str) -> &[Rc<Identifier>] {
        self.scopes
            .get(scope)
            .map(|s| s.order.as_slice())
            .unwrap_or(&[])
    }

    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.scope_order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scopes.values().map(|s| s.order.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn print_symbols(&self) {
        println!("{:-<40}", "");
        println!("| {:<15} | {:<18} |", "Scope", "Name");
        println!("{:-<40}", "");
        for scope in self.scope_names() {
            for identifier in self.identifiers(scope) {
                println!("| {:<15} | {:<18} |", scope, identifier.name);
            }
        }
        println!("{:-<40}", "");
    }
}
