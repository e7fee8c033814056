//! # Symbol Resolution
//!
//! The instrumentation tool does not symbolize anything itself. It records
//! code locations as `module+offset` tokens, where `offset` is relative to
//! the module's load address:
//!
//! ```text
//! ieframe.dll+12ab
//! ```
//!
//! This module turns those tokens into readable names:
//!
//! ```text
//! ieframe.dll!CDoc::Load+0x2c
//! ```
//!
//! ## Address Translation
//!
//! Symbol tables store link-time addresses. The image base is the PE image
//! base, or the lowest file-backed segment for ELF and Mach-O (0 for shared
//! objects, 0x400000 for a non-PIE ELF executable), so a token offset maps to
//!
//! ```text
//! Symbol Address = Image Base + Token Offset
//! ```
//!
//! and the reported residual is the distance from the closest preceding
//! symbol.
//!
//! ## Module Structure
//!
//! - **`resolver`**: the [`SymbolResolver`] seam and the always-missing
//!   [`NoSymbols`] resolver
//! - **`symbol_table`**: per-module symbol tables read with the `object`
//!   crate, cached for the whole run
//! - **`normalizer`**: token splitting, module filtering, processed counters
//!   and display formatting
//!
//! ## Limitations
//!
//! - Only code symbols present in the module file itself are used (symbol table,
//!   dynamic symbols, PE exports). Separate debug files are not searched.
//! - A miss is not an error: the token is reported as recorded.

pub mod normalizer;
pub mod resolver;
pub mod symbol_table;

pub use normalizer::SymbolNormalizer;
pub use resolver::{NoSymbols, SymbolMatch, SymbolResolver};
pub use symbol_table::{ObjectSymbolResolver, SymbolEntry, SymbolTable};
