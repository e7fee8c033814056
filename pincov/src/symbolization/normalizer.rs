//! Symbol token normalization
//!
//! Turns the raw `module+offset` token of a log line into the name shown in
//! the report, or decides that the line is filtered out.

use super::resolver::SymbolResolver;
use crate::domain::RecordError;
use crate::modules::ModuleRegistry;
use crate::parsing::parse_hex;

/// Filter token that keeps anonymous (`?...`) symbols when module filters are active.
pub const ANONYMOUS_FILTER: &str = "?";

/// Resolves symbol tokens against the module registry and a symbol resolver.
pub struct SymbolNormalizer<'a> {
    /// Lower-cased substrings; empty keeps every module
    module_filters: &'a [String],
    skip_symbols: bool,
    resolver: &'a dyn SymbolResolver,
}

impl<'a> SymbolNormalizer<'a> {
    pub fn new(
        module_filters: &'a [String],
        skip_symbols: bool,
        resolver: &'a dyn SymbolResolver,
    ) -> Self {
        Self { module_filters, skip_symbols, resolver }
    }

    /// Normalize one token.
    ///
    /// Returns `Ok(None)` when the token belongs to a filtered-out module,
    /// otherwise the display name:
    /// - `module!symbol` or `module!symbol+0x<residual>` when the resolver
    ///   knows the offset
    /// - the token unchanged when symbols are skipped, the resolver misses,
    ///   or the token has no `module+offset` form
    ///
    /// Every token whose module is in `registry` bumps that module's
    /// processed count, whether or not it is filtered out afterwards.
    ///
    /// # Errors
    /// Returns [`RecordError::InvalidHex`] if the offset is not hexadecimal.
    pub fn normalize(
        &self,
        token: &str,
        registry: &mut ModuleRegistry,
    ) -> Result<Option<String>, RecordError> {
        let mut parts = token.split('+');
        let module = parts.next().unwrap_or_default();
        let Some(offset_text) = parts.next() else {
            return Ok(self.keep_bare(token).then(|| token.to_string()));
        };

        let offset = parse_hex(offset_text, "symbol offset")?;
        let module_key = module.to_lowercase();

        registry.increment_processed(&module_key);

        if !self.keeps_module(&module_key) {
            return Ok(None);
        }

        if self.skip_symbols {
            return Ok(Some(token.to_string()));
        }

        let module_path = registry.get(&module_key).map_or(module_key.as_str(), |m| m.path.as_str());

        let Some(symbol) = self.resolver.lookup(module_path, offset) else {
            return Ok(Some(token.to_string()));
        };

        let name = if symbol.displacement > 0 {
            format!("{module}!{}+0x{:x}", symbol.name, symbol.displacement)
        } else {
            format!("{module}!{}", symbol.name)
        };
        Ok(Some(name))
    }

    /// Whether a token without an offset survives filtering.
    ///
    /// Anonymous `?` symbols are only shown under module filters when the
    /// filter list names `?` explicitly; anything else passes through.
    fn keep_bare(&self, token: &str) -> bool {
        if !token.starts_with('?') || self.module_filters.is_empty() {
            return true;
        }
        self.module_filters.iter().any(|f| f == ANONYMOUS_FILTER)
    }

    fn keeps_module(&self, module_key: &str) -> bool {
        self.module_filters.is_empty()
            || self.module_filters.iter().any(|f| module_key.contains(f.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolization::resolver::{NoSymbols, SymbolMatch};
    use std::cell::RefCell;

    /// Resolver returning a fixed answer and recording every query.
    struct FixedResolver {
        answer: Option<SymbolMatch>,
        queries: RefCell<Vec<(String, u64)>>,
    }

    impl FixedResolver {
        fn new(answer: Option<SymbolMatch>) -> Self {
            Self { answer, queries: RefCell::new(Vec::new()) }
        }
    }

    impl SymbolResolver for FixedResolver {
        fn lookup(&self, module_path: &str, offset: u64) -> Option<SymbolMatch> {
            self.queries.borrow_mut().push((module_path.to_string(), offset));
            self.answer.clone()
        }
    }

    fn registry() -> ModuleRegistry {
        ModuleRegistry::from_reader(
            "0:10000000:C:\\Windows\\System32\\ieframe.dll\n1:00400000:C:\\Program Files\\iexplore.exe\n"
                .as_bytes(),
        )
        .unwrap()
    }

    fn filters(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_resolved_without_displacement() {
        let resolver = FixedResolver::new(Some(SymbolMatch::new("Bar", 0)));
        let normalizer = SymbolNormalizer::new(&[], false, &resolver);

        let name = normalizer.normalize("foo.dll+1a", &mut registry()).unwrap();
        assert_eq!(name.as_deref(), Some("foo.dll!Bar"));
        assert_eq!(*resolver.queries.borrow(), [("foo.dll".to_string(), 0x1a)]);
    }

    #[test]
    fn test_resolved_with_displacement() {
        let resolver = FixedResolver::new(Some(SymbolMatch::new("Bar", 5)));
        let normalizer = SymbolNormalizer::new(&[], false, &resolver);

        let name = normalizer.normalize("foo.dll+1a", &mut registry()).unwrap();
        assert_eq!(name.as_deref(), Some("foo.dll!Bar+0x5"));
    }

    #[test]
    fn test_known_module_resolves_against_full_path_and_keeps_token_case() {
        let resolver = FixedResolver::new(Some(SymbolMatch::new("CDoc::Load", 0x2c)));
        let normalizer = SymbolNormalizer::new(&[], false, &resolver);
        let mut registry = registry();

        let name = normalizer.normalize("IEFrame.dll+12ab", &mut registry).unwrap();
        assert_eq!(name.as_deref(), Some("IEFrame.dll!CDoc::Load+0x2c"));
        assert_eq!(
            *resolver.queries.borrow(),
            [("C:\\Windows\\System32\\ieframe.dll".to_string(), 0x12ab)]
        );
        assert_eq!(registry.get("ieframe.dll").unwrap().processed, 1);
    }

    #[test]
    fn test_resolver_miss_returns_token() {
        let normalizer = SymbolNormalizer::new(&[], false, &NoSymbols);
        let name = normalizer.normalize("ieframe.dll+10", &mut registry()).unwrap();
        assert_eq!(name.as_deref(), Some("ieframe.dll+10"));
    }

    #[test]
    fn test_module_filter() {
        let filters = filters(&["ieframe"]);
        let normalizer = SymbolNormalizer::new(&filters, false, &NoSymbols);
        let mut registry = registry();

        assert_eq!(normalizer.normalize("iexplore.exe+10", &mut registry).unwrap(), None);
        assert_eq!(
            normalizer.normalize("ieframe.dll+10", &mut registry).unwrap().as_deref(),
            Some("ieframe.dll+10")
        );
        // Filtered tokens still count against their module
        assert_eq!(registry.get("iexplore.exe").unwrap().processed, 1);
        assert_eq!(registry.get("ieframe.dll").unwrap().processed, 1);
    }

    #[test]
    fn test_module_filter_is_case_insensitive_on_token() {
        let filters = filters(&["ieframe"]);
        let normalizer = SymbolNormalizer::new(&filters, false, &NoSymbols);

        let name = normalizer.normalize("IEFRAME.DLL+10", &mut registry()).unwrap();
        assert_eq!(name.as_deref(), Some("IEFRAME.DLL+10"));
    }

    #[test]
    fn test_skip_symbols_never_queries_resolver() {
        let resolver = FixedResolver::new(Some(SymbolMatch::new("Bar", 0)));
        let filters = filters(&["ieframe"]);
        let normalizer = SymbolNormalizer::new(&filters, true, &resolver);
        let mut registry = registry();

        assert_eq!(
            normalizer.normalize("ieframe.dll+10", &mut registry).unwrap().as_deref(),
            Some("ieframe.dll+10")
        );
        assert_eq!(normalizer.normalize("iexplore.exe+10", &mut registry).unwrap(), None);
        assert!(resolver.queries.borrow().is_empty());
        assert_eq!(registry.get("ieframe.dll").unwrap().processed, 1);
        assert_eq!(registry.get("iexplore.exe").unwrap().processed, 1);
    }

    #[test]
    fn test_anonymous_symbols_under_filters() {
        let mut registry = registry();

        let only_ieframe = filters(&["ieframe"]);
        let normalizer = SymbolNormalizer::new(&only_ieframe, false, &NoSymbols);
        assert_eq!(normalizer.normalize("?unknown", &mut registry).unwrap(), None);

        let with_anonymous = filters(&["ieframe", "?"]);
        let normalizer = SymbolNormalizer::new(&with_anonymous, false, &NoSymbols);
        assert_eq!(
            normalizer.normalize("?unknown", &mut registry).unwrap().as_deref(),
            Some("?unknown")
        );

        let normalizer = SymbolNormalizer::new(&[], false, &NoSymbols);
        assert_eq!(
            normalizer.normalize("?unknown", &mut registry).unwrap().as_deref(),
            Some("?unknown")
        );
    }

    #[test]
    fn test_bare_tokens_pass_through() {
        let filters = filters(&["ieframe"]);
        let resolver = FixedResolver::new(Some(SymbolMatch::new("Bar", 0)));
        let normalizer = SymbolNormalizer::new(&filters, false, &resolver);

        assert_eq!(
            normalizer.normalize("ntdll!RtlUserThreadStart", &mut registry()).unwrap().as_deref(),
            Some("ntdll!RtlUserThreadStart")
        );
        assert_eq!(normalizer.normalize("", &mut registry()).unwrap().as_deref(), Some(""));
        assert!(resolver.queries.borrow().is_empty());
    }

    #[test]
    fn test_bad_offset_is_error() {
        let normalizer = SymbolNormalizer::new(&[], false, &NoSymbols);
        let err = normalizer.normalize("m.dll+xyz", &mut registry()).unwrap_err();
        assert_eq!(err, RecordError::InvalidHex { field: "symbol offset", value: "xyz".to_string() });
    }

    #[test]
    fn test_only_first_two_plus_parts_are_used() {
        let resolver = FixedResolver::new(None);
        let normalizer = SymbolNormalizer::new(&[], false, &resolver);

        let name = normalizer.normalize("m.dll+10+junk", &mut registry()).unwrap();
        assert_eq!(name.as_deref(), Some("m.dll+10+junk"));
        assert_eq!(*resolver.queries.borrow(), [("m.dll".to_string(), 0x10)]);
    }
}
