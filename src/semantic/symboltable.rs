use std::collections::{BTreeMap, HashMap};

use crate::utils::config::codes;

/// Interning map from lexeme to code. Codes are assigned densely from `base` in
/// first-seen order and never reused. The reverse map is built once by [`InternTable::seal`].
#[derive(Debug, Clone)]
pub struct InternTable {
    base: u32,
    forward: HashMap<String, u32>,
    reverse: BTreeMap<u32, String>,
}

impl InternTable {
    pub fn new(base: u32) -> Self {
        Self {
            base,
            forward: HashMap::new(),
            reverse: BTreeMap::new(),
        }
    }

    /// Table seeded with fixed codes, used for the static keyword table.
    pub fn seeded(base: u32, entries: &[(&str, u32)]) -> Self {
        let mut table = Self::new(base);
        for (lexeme, code) in entries {
            table.forward.insert(lexeme.to_string(), *code);
        }
        table
    }

    /// Returns the existing code for `lexeme`, or assigns `base + len` and inserts it.
    pub fn intern(&mut self, lexeme: &str) -> u32 {
        if let Some(&code) = self.forward.get(lexeme) {
            return code;
        }
        let code = self.base + self.forward.len() as u32;
        self.forward.insert(lexeme.to_string(), code);
        code
    }

    pub fn get(&self, lexeme: &str) -> Option<u32> {
        self.forward.get(lexeme).copied()
    }

    pub fn contains(&self, lexeme: &str) -> bool {
        self.forward.contains_key(lexeme)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// Pure code -> lexeme transform of the forward map.
    pub fn build_reverse(&self) -> BTreeMap<u32, String> {
        self.forward
            .iter()
            .map(|(lexeme, code)| (*code, lexeme.clone()))
            .collect()
    }

    pub fn seal(&mut self) {
        self.reverse = self.build_reverse();
    }

    /// Reverse lookup. Only meaningful after [`InternTable::seal`].
    pub fn lexeme(&self, code: u32) -> Option<&str> {
        self.reverse.get(&code).map(String::as_str)
    }

    /// Records ordered by code, which is first-seen order for interned tables.
    pub fn records(&self) -> Vec<(u32, &str)> {
        let mut records: Vec<(u32, &str)> = self
            .forward
            .iter()
            .map(|(lexeme, code)| (*code, lexeme.as_str()))
            .collect();
        records.sort_by_key(|(code, _)| *code);
        records
    }
}

/// Identifiers, constants and keywords of one compilation unit. Populated by the lexer,
/// sealed once lexing completes and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SymbolTables {
    pub identifiers: InternTable,
    pub constants: InternTable,
    pub keywords: InternTable,
    sealed: bool,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self {
            identifiers: InternTable::new(codes::IDENTIFIER_BASE),
            constants: InternTable::new(codes::CONSTANT_BASE),
            keywords: InternTable::seeded(codes::KEYWORD_BASE, codes::KEYWORDS),
            sealed: false,
        }
    }

    pub fn seal(&mut self) {
        self.identifiers.seal();
        self.constants.seal();
        self.keywords.seal();
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn identifier_name(&self, code: u32) -> Option<&str> {
        self.identifiers.lexeme(code)
    }

    pub fn constant_text(&self, code: u32) -> Option<&str> {
        self.constants.lexeme(code)
    }

    pub fn keyword_text(&self, code: u32) -> Option<&str> {
        self.keywords.lexeme(code)
    }
}

impl Default for SymbolTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_dense_and_stable() {
        let mut table = InternTable::new(codes::IDENTIFIER_BASE);
        assert_eq!(table.intern("a"), 1001);
        assert_eq!(table.intern("b"), 1002);
        assert_eq!(table.intern("a"), 1001);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_reverse_is_inverse_of_forward() {
        let mut table = InternTable::new(codes::CONSTANT_BASE);
        for lexeme in ["10", "20", "10", "30"] {
            table.intern(lexeme);
        }
        table.seal();
        for (code, lexeme) in table.records() {
            assert_eq!(table.get(lexeme), Some(code));
            assert_eq!(table.lexeme(code), Some(lexeme));
        }
    }
}
