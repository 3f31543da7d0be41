//! The environment: a name-to-stack-of-bindings mapping (spec §3/§4.6).
//!
//! Grounded on `rhai::Scope` (`examples/rhaiscript-lsp/rhai/src/scope.rs`): parallel vectors
//! for names and values rather than a `HashMap`, so small scopes (the common case for a
//! template render) stay cache-friendly and linear lookup from the end gives lexical
//! shadowing for free. `rhai::Scope` only supports shadowing-by-appending and truncating back
//! to a saved length; `Scope` here additionally exposes a genuine per-name LIFO `pop`, which
//! the evaluator's `for`-loop scoping needs (spec §4.4, §8 "balanced environment").

use smallvec::SmallVec;
use crate::Identifier;

use crate::value::Value;

const SCOPE_ENTRIES_INLINED: usize = 8;

/// A name-to-stack-of-values mapping. The effective value of a name is the most recently
/// pushed binding still on its stack.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    names: SmallVec<[Identifier; SCOPE_ENTRIES_INLINED]>,
    values: SmallVec<[Value; SCOPE_ENTRIES_INLINED]>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Push a binding. A later push with the same name shadows earlier ones until popped.
    pub fn push(&mut self, name: impl Into<Identifier>, value: Value) {
        self.names.push(name.into());
        self.values.push(value);
    }

    /// Pop the most recently pushed binding for `name`, LIFO per name. Returns `None` if
    /// `name` has no binding (an empty or absent stack).
    pub fn pop(&mut self, name: &str) -> Option<Value> {
        let idx = self.names.iter().rposition(|n| n == name)?;
        self.names.remove(idx);
        Some(self.values.remove(idx))
    }

    /// The effective (topmost) value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let idx = self.names.iter().rposition(|n| n == name)?;
        self.values.get(idx)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// True only when every name in this scope equals every name (and per-name stack depth)
    /// in `other`, independent of insertion order between distinct names. Used by tests to
    /// assert the "balanced environment" invariant (spec §8) holds after a render.
    pub fn bindings_equal(&self, other: &Scope) -> bool {
        if self.len() != other.len() {
            return false;
        }
        use std::collections::HashMap;
        let mut depth: HashMap<&str, usize> = HashMap::new();
        for n in &self.names {
            *depth.entry(n.as_str()).or_default() += 1;
        }
        for n in &other.names {
            let d = depth.entry(n.as_str()).or_default();
            if *d == 0 {
                return false;
            }
            *d -= 1;
        }
        depth.values().all(|&d| d == 0)
    }
}
