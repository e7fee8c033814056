//! Symbol lookup seam
//!
//! The report only needs "which symbol starts at or below this module
//! offset, and how far past it are we". Where that answer comes from is an
//! implementation detail of the resolver: on-disk symbol tables, a symbol
//! server, or nothing at all.

/// Nearest symbol at or below a module offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMatch {
    pub name: String,
    /// Distance from the symbol start to the queried offset
    pub displacement: u64,
}

impl SymbolMatch {
    #[must_use]
    pub fn new(name: impl Into<String>, displacement: u64) -> Self {
        Self { name: name.into(), displacement }
    }
}

/// Resolves module-relative offsets to symbols.
///
/// Implementations must tolerate modules they know nothing about by
/// returning `None`; a miss is never an error for the caller.
pub trait SymbolResolver {
    /// Find the closest symbol at or below `offset` in the module at `module_path`.
    fn lookup(&self, module_path: &str, offset: u64) -> Option<SymbolMatch>;
}

/// Resolver that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSymbols;

impl SymbolResolver for NoSymbols {
    fn lookup(&self, _module_path: &str, _offset: u64) -> Option<SymbolMatch> {
        None
    }
}
