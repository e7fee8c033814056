use super::resolver::{SymbolMatch, SymbolResolver};
use anyhow::{Context as _, Result};
use log::{debug, warn};
use object::{BinaryFormat, Object, ObjectSegment, ObjectSymbol, SymbolKind};
use rustc_demangle::demangle;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A defined code symbol with its absolute (image-based) address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub address: u64,
    pub name: String,
}

/// Address-sorted code symbols of one module.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    /// Address that module-relative offsets are relative to
    base: u64,
    /// Sorted by address, one symbol per address
    symbols: Vec<SymbolEntry>,
}

impl SymbolTable {
    /// Read and index the symbols of the object file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a supported object file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref()).context("Failed to read module file")?;
        Self::parse(&data)
    }

    /// Index the symbols of an in-memory object file (ELF, PE/COFF, Mach-O).
    ///
    /// # Errors
    /// Returns an error if `data` is not a supported object file
    pub fn parse(data: &[u8]) -> Result<Self> {
        let obj = object::File::parse(data).context("Failed to parse object file")?;

        let mut symbols: Vec<SymbolEntry> = obj
            .symbols()
            .chain(obj.dynamic_symbols())
            .filter(|sym| sym.is_definition() && sym.kind() == SymbolKind::Text)
            .filter_map(|sym| {
                let name = sym.name().ok().filter(|name| !name.is_empty())?;
                Some(SymbolEntry { address: sym.address(), name: demangle_symbol(name) })
            })
            .collect();

        // PE images usually ship without a COFF symbol table; exports are
        // the best on-disk names available.
        if let Ok(exports) = obj.exports() {
            symbols.extend(exports.iter().filter(|export| !export.name().is_empty()).map(
                |export| SymbolEntry {
                    address: export.address(),
                    name: demangle_symbol(&String::from_utf8_lossy(export.name())),
                },
            ));
        }

        Ok(Self::from_symbols(image_base(&obj), symbols))
    }

    /// Build a table from already extracted symbols.
    ///
    /// When several symbols share an address the first one wins.
    #[must_use]
    pub fn from_symbols(base: u64, mut symbols: Vec<SymbolEntry>) -> Self {
        symbols.sort_by_key(|sym| sym.address);
        symbols.dedup_by_key(|sym| sym.address);
        Self { base, symbols }
    }

    /// Closest symbol at or below the module-relative `offset`.
    #[must_use]
    pub fn lookup(&self, offset: u64) -> Option<SymbolMatch> {
        let target = self.base.wrapping_add(offset);
        let idx = self.symbols.partition_point(|sym| sym.address <= target);
        let sym = self.symbols.get(idx.checked_sub(1)?)?;
        Some(SymbolMatch::new(sym.name.clone(), target - sym.address))
    }

    #[must_use]
    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.symbols.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Address that module offsets are relative to.
///
/// PE symbols are based on the optional header's image base. ELF and Mach-O
/// symbols hold link-time addresses, so the base is the lowest segment that
/// is backed by file contents (`__PAGEZERO` is not).
fn image_base(obj: &object::File<'_>) -> u64 {
    if obj.format() == BinaryFormat::Pe {
        return obj.relative_address_base();
    }
    obj.segments()
        .filter(|segment| segment.file_range().1 > 0)
        .map(|segment| segment.address())
        .min()
        .unwrap_or(0)
}

/// Resolver backed by the symbol tables of the module files on disk.
///
/// Each module is loaded on first use. Failures are cached too, so a
/// missing or unparseable module costs one warning and no further I/O.
#[derive(Debug, Default)]
pub struct ObjectSymbolResolver {
    tables: RefCell<HashMap<String, Option<SymbolTable>>>,
}

impl ObjectSymbolResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn load(module_path: &str) -> Option<SymbolTable> {
        match SymbolTable::from_path(module_path) {
            Ok(table) => {
                debug!("Loaded {} symbols from {module_path}", table.len());
                Some(table)
            }
            Err(e) => {
                warn!("No symbols for {module_path}: {e:#}");
                None
            }
        }
    }
}

impl SymbolResolver for ObjectSymbolResolver {
    fn lookup(&self, module_path: &str, offset: u64) -> Option<SymbolMatch> {
        self.tables
            .borrow_mut()
            .entry(module_path.to_string())
            .or_insert_with(|| Self::load(module_path))
            .as_ref()?
            .lookup(offset)
    }
}

/// Demangle a Rust symbol name; other names are returned unchanged.
#[must_use]
pub fn demangle_symbol(symbol: &str) -> String {
    format!("{:#}", demangle(symbol))
}
