use std::collections::BTreeMap;
use std::fmt;

use crate::error::{SemanticWarning, WarningKind};

use super::Ty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(pub usize);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub ty: Ty,
    pub line: usize,
    pub column: usize,
    pub used: bool,
    pub initialized: bool,
}

impl Symbol {
    pub fn new(ty: Ty, line: usize, column: usize) -> Self {
        Self {
            ty,
            line,
            column,
            used: false,
            initialized: false,
        }
    }

    fn warning_kind(&self) -> Option<WarningKind> {
        match (self.initialized, self.used) {
            (true, true) => None,
            (true, false) => Some(WarningKind::UnusedButInitialized),
            (false, false) => Some(WarningKind::NeverInitializedOrUsed),
            (false, true) => Some(WarningKind::UsedButNeverInitialized),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    symbols: BTreeMap<char, Symbol>,
}

impl Scope {
    pub fn symbols(&self) -> impl Iterator<Item = (char, &Symbol)> {
        self.symbols.iter().map(|(name, symbol)| (*name, symbol))
    }

    pub fn get(&self, name: char) -> Option<&Symbol> {
        self.symbols.get(&name)
    }
}

/// Lexical scopes of one program, numbered in block-entry order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self { scopes: vec![] }
    }

    pub fn push_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            id,
            parent,
            symbols: BTreeMap::new(),
        });
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Binds `name` in `scope`, replacing any previous binding there.
    pub fn declare(&mut self, scope: ScopeId, name: char, symbol: Symbol) -> Option<Symbol> {
        self.scopes[scope.0].symbols.insert(name, symbol)
    }

    /// `scope` followed by each of its enclosing scopes up to the root.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), |id| self.scopes[id.0].parent)
    }

    pub fn lookup(&self, scope: ScopeId, name: char) -> Option<(ScopeId, &Symbol)> {
        self.ancestors(scope)
            .find_map(|id| self.scope(id).get(name).map(|symbol| (id, symbol)))
    }

    pub fn lookup_mut(&mut self, scope: ScopeId, name: char) -> Option<(ScopeId, &mut Symbol)> {
        let (found, _) = self.lookup(scope, name)?;
        self.scopes[found.0]
            .symbols
            .get_mut(&name)
            .map(|symbol| (found, symbol))
    }

    /// Reports every symbol that was left unused or uninitialized.
    pub fn warnings(&self) -> Vec<SemanticWarning> {
        self.scopes
            .iter()
            .flat_map(|scope| {
                scope.symbols().filter_map(move |(name, symbol)| {
                    symbol.warning_kind().map(|kind| SemanticWarning {
                        kind,
                        name,
                        ty: symbol.ty,
                        scope: scope.id,
                        line: symbol.line,
                        column: symbol.column,
                    })
                })
            })
            .collect()
    }

    /// One row per symbol: name, type, scope, declaration line.
    pub fn render_table(&self) -> String {
        let mut out = format!("{:<6}{:<9}{:<7}{}\n", "Name", "Type", "Scope", "Line");
        for scope in &self.scopes {
            for (name, symbol) in scope.symbols() {
                out.push_str(&format!(
                    "{:<6}{:<9}{:<7}{}\n",
                    name,
                    symbol.ty.to_string(),
                    scope.id.to_string(),
                    symbol.line
                ));
            }
        }
        out
    }
}
