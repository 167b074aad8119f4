//! The symbol table a compiler front end drives.

use tracing::{debug, trace};

use super::stack::{ScopeSlot, ScopeStack};
use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::store::HashStore;

/// A scoped symbol table tracking identifier declarations across nested
/// lexical scopes.
///
/// The caller drives it from declaration and use sites:
/// [`enter_scope`](SymbolTable::enter_scope) at each opening construct,
/// [`declare`](SymbolTable::declare) at each declaration,
/// [`find`](SymbolTable::find) at each use, and
/// [`exit_scope`](SymbolTable::exit_scope) at each closing construct.
/// Shadowing across scopes is permitted; redeclaration within one scope is
/// rejected; leaving a scope reclaims all of its declarations.
///
/// Depth zero is the global scope: declarations made before any
/// `enter_scope` are legal and survive every balanced enter/exit pair.
#[derive(Debug)]
pub struct SymbolTable {
    store: HashStore,
    stack: ScopeStack,
}

impl SymbolTable {
    /// Creates an empty table at depth zero.
    pub fn new() -> Self {
        Self::with_config(&TableConfig::default())
    }

    /// Creates an empty table with explicit construction parameters.
    pub fn with_config(config: &TableConfig) -> Self {
        Self {
            store: HashStore::with_config(config),
            stack: ScopeStack::new(),
        }
    }

    /// Opens a new scope. Scopes nest arbitrarily deep.
    pub fn enter_scope(&mut self) {
        self.stack.push_boundary();
        trace!(depth = self.depth(), "entered scope");
    }

    /// Closes the innermost scope, dropping every declaration made in it.
    ///
    /// Returns [`TableError::UnbalancedScope`] when no scope is open, and
    /// leaves the table untouched in that case; global declarations are
    /// never destroyed by a stray close.
    pub fn exit_scope(&mut self) -> Result<()> {
        if self.stack.open_scopes() == 0 {
            return Err(TableError::UnbalancedScope);
        }
        let mut dropped = 0usize;
        while let Some(slot) = self.stack.pop() {
            match slot {
                ScopeSlot::Boundary => break,
                ScopeSlot::Entry(handle) => {
                    self.store.remove(handle);
                    dropped += 1;
                }
            }
        }
        trace!(depth = self.depth(), dropped, "exited scope");
        Ok(())
    }

    /// Declares `name` at `line` in the current scope.
    ///
    /// Shadowing an enclosing scope's declaration always succeeds.
    /// Redeclaring within the current scope returns
    /// [`TableError::Redeclared`] carrying the earlier line, and leaves
    /// the earlier record untouched.
    pub fn declare(&mut self, name: &str, line: u32) -> Result<()> {
        if name.is_empty() {
            return Err(TableError::EmptyIdentifier);
        }
        let depth = self.depth();
        if let Some(existing) = self.store.search(name) {
            // The chain's last match is the innermost declaration, so an
            // equal depth means a same-scope duplicate.
            if existing.depth == depth {
                return Err(TableError::Redeclared {
                    name: name.to_string(),
                    line: existing.line,
                });
            }
        }
        let handle = self.store.insert(name, line, depth);
        self.stack.push_entry(handle);
        debug!(name, line, depth, "declared identifier");
        Ok(())
    }

    /// Line of the innermost live declaration of `name`, if any.
    ///
    /// The current and all enclosing scopes are considered. Empty names
    /// are never found.
    pub fn find(&self, name: &str) -> Option<u32> {
        if name.is_empty() {
            return None;
        }
        self.store.search(name).map(|record| record.line)
    }

    /// Current scope depth; zero when only the global scope is open.
    pub fn depth(&self) -> u32 {
        self.stack.open_scopes() as u32
    }

    /// Number of live declarations across all open scopes.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the table holds no declarations.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
