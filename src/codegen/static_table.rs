use std::fmt;

use log::debug;

use crate::analyzer::{ScopeId, Ty};

/// Placeholder for a static cell; resolved to `code size + index` at assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(pub usize);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    User { name: char, scope: ScopeId, ty: Ty },
    Temporary { id: usize, scope: ScopeId },
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::User { name, scope, ty } => write!(f, "{} {}@{}", ty, name, scope),
            Slot::Temporary { id, scope } => write!(f, "temp{}@{}", id, scope),
        }
    }
}

/// Static cells shared by declared variables and compiler temporaries, in
/// allocation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticTable {
    slots: Vec<Slot>,
    temporaries: usize,
}

impl StaticTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, slot: Slot) -> SlotId {
        let id = SlotId(self.slots.len());
        debug!("CODEGEN --> allocated {} for {}", id, slot);
        self.slots.push(slot);
        id
    }

    pub fn declare(&mut self, name: char, scope: ScopeId, ty: Ty) -> SlotId {
        self.push(Slot::User { name, scope, ty })
    }

    pub fn temporary(&mut self, scope: ScopeId) -> SlotId {
        let id = self.temporaries;
        self.temporaries += 1;
        self.push(Slot::Temporary { id, scope })
    }

    /// Latest slot declared for `name` directly in `scope`.
    pub fn lookup(&self, name: char, scope: ScopeId) -> Option<(SlotId, Ty)> {
        self.slots
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, slot)| match slot {
                Slot::User { name: n, scope: s, ty } if *n == name && *s == scope => {
                    Some((SlotId(i), *ty))
                }
                _ => None,
            })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
