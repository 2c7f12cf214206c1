//! Scope arena.
//!
//! Scopes live in a slot arena and are addressed by [`ScopeId`], an index
//! plus the generation of the slot when the scope was allocated. Removing a
//! scope bumps its slot's generation, so an old handle is detected as stale
//! instead of silently reaching whatever scope reuses the slot. Clearing the
//! arena drops every scope and makes every later access fail with
//! [`ScopeError::Cleared`].

use std::fmt;

use nf_diagnostic::ErrorCode;
use nf_ir::TypeRef;
use rustc_hash::FxHashMap;

use crate::Value;

/// Handle to a scope in a [`ScopeArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId {
    index: u32,
    generation: u32,
}

impl ScopeId {
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}.{}", self.index, self.generation)
    }
}

/// What a scope was opened for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    /// One loop iteration.
    Loop,
    /// Any other block: branch, switch arm, function call.
    Block,
}

/// A variable: its value and, when declared with a type, that type.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub value: Value,
    pub declared: Option<TypeRef>,
}

impl Binding {
    pub fn new(value: Value) -> Self {
        Binding {
            value,
            declared: None,
        }
    }

    pub fn typed(value: Value, declared: TypeRef) -> Self {
        Binding {
            value,
            declared: Some(declared),
        }
    }

    pub fn is_function_reference(&self) -> bool {
        matches!(self.value, Value::Function(_))
    }
}

#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub variables: FxHashMap<String, Binding>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, kind: ScopeKind) -> Self {
        Scope {
            parent,
            kind,
            variables: FxHashMap::default(),
        }
    }
}

/// Misuse of a scope handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeError {
    /// The arena was cleared.
    Cleared,
    /// The handle's scope was removed.
    Stale(ScopeId),
}

impl ScopeError {
    pub fn code(self) -> ErrorCode {
        match self {
            ScopeError::Cleared => ErrorCode::E2001,
            ScopeError::Stale(_) => ErrorCode::E2002,
        }
    }
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeError::Cleared => f.write_str("context already cleared"),
            ScopeError::Stale(id) => write!(f, "{id} is no longer valid"),
        }
    }
}

impl std::error::Error for ScopeError {}

struct Slot {
    generation: u32,
    scope: Option<Scope>,
}

/// Generation-checked scope storage.
#[derive(Default)]
pub struct ScopeArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    cleared: bool,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh arena holding only a `Global` root scope.
    pub fn with_root() -> (Self, ScopeId) {
        let arena = ScopeArena {
            slots: vec![Slot {
                generation: 0,
                scope: Some(Scope::new(None, ScopeKind::Global)),
            }],
            free: Vec::new(),
            cleared: false,
        };
        let root = ScopeId {
            index: 0,
            generation: 0,
        };
        (arena, root)
    }

    pub fn alloc(
        &mut self,
        parent: Option<ScopeId>,
        kind: ScopeKind,
    ) -> Result<ScopeId, ScopeError> {
        if self.cleared {
            return Err(ScopeError::Cleared);
        }
        let scope = Scope::new(parent, kind);
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.scope = Some(scope);
            return Ok(ScopeId {
                index,
                generation: slot.generation,
            });
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            scope: Some(scope),
        });
        Ok(ScopeId {
            index,
            generation: 0,
        })
    }

    pub fn get(&self, id: ScopeId) -> Result<&Scope, ScopeError> {
        if self.cleared {
            return Err(ScopeError::Cleared);
        }
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.scope.as_ref())
            .ok_or(ScopeError::Stale(id))
    }

    pub fn get_mut(&mut self, id: ScopeId) -> Result<&mut Scope, ScopeError> {
        if self.cleared {
            return Err(ScopeError::Cleared);
        }
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.scope.as_mut())
            .ok_or(ScopeError::Stale(id))
    }

    pub fn contains(&self, id: ScopeId) -> bool {
        self.get(id).is_ok()
    }

    /// Drop the scope's variables and free its slot.
    pub fn remove(&mut self, id: ScopeId) -> Result<(), ScopeError> {
        let scope = self.get_mut(id)?;
        scope.variables.clear();
        let slot = &mut self.slots[id.index as usize];
        slot.scope = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Ok(())
    }

    /// Release every scope, then the arena itself.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if let Some(scope) = slot.scope.as_mut() {
                scope.variables.clear();
            }
        }
        self.slots.clear();
        self.free.clear();
        self.cleared = true;
    }

    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Number of scopes currently allocated.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.scope.is_some()).count()
    }
}

#[cfg(test)]
mod tests;
