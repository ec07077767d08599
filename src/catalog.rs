//! Phonetic symbol catalog: which symbols exist and where their clips live.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;

/// One phonetic symbol and the clip that pronounces it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhoneticEntry {
    pub symbol: String,
    #[serde(alias = "audio_path", alias = "path")]
    pub audio: String,
}

impl PhoneticEntry {
    pub fn new(symbol: impl Into<String>, audio: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            audio: audio.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Vowels,
    Consonants,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::Vowels, Group::Consonants];

    pub fn name(self) -> &'static str {
        match self {
            Group::Vowels => "vowels",
            Group::Consonants => "consonants",
        }
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable catalog of vowels and consonants, each in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SymbolCatalog {
    #[serde(default)]
    vowels: Vec<PhoneticEntry>,
    #[serde(default)]
    consonants: Vec<PhoneticEntry>,
}

const DEFAULT_VOWELS: [&str; 5] = ["a", "e", "i", "o", "u"];
const DEFAULT_CONSONANTS: [&str; 5] = ["b", "d", "f", "g", "h"];

impl Default for SymbolCatalog {
    fn default() -> Self {
        let entries = |symbols: &[&str]| -> Vec<PhoneticEntry> {
            symbols
                .iter()
                .map(|symbol| PhoneticEntry::new(*symbol, format!("sounds/sound_{symbol}.mp3")))
                .collect()
        };
        Self {
            vowels: entries(&DEFAULT_VOWELS),
            consonants: entries(&DEFAULT_CONSONANTS),
        }
    }
}

impl SymbolCatalog {
    pub fn new(
        vowels: Vec<PhoneticEntry>,
        consonants: Vec<PhoneticEntry>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self { vowels, consonants };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: SymbolCatalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn group(&self, group: Group) -> &[PhoneticEntry] {
        match group {
            Group::Vowels => &self.vowels,
            Group::Consonants => &self.consonants,
        }
    }

    pub fn vowels(&self) -> &[PhoneticEntry] {
        &self.vowels
    }

    pub fn consonants(&self) -> &[PhoneticEntry] {
        &self.consonants
    }

    /// All entries, vowels first.
    pub fn iter(&self) -> impl Iterator<Item = (Group, &PhoneticEntry)> + '_ {
        Group::ALL
            .into_iter()
            .flat_map(move |group| self.group(group).iter().map(move |entry| (group, entry)))
    }

    pub fn len(&self) -> usize {
        self.vowels.len() + self.consonants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lookup(&self, symbol: &str) -> Option<&PhoneticEntry> {
        self.iter()
            .map(|(_, entry)| entry)
            .find(|entry| entry.symbol == symbol)
    }

    /// Looks up every symbol, keeping the requested order and repeats.
    pub fn resolve_all<S: AsRef<str>>(
        &self,
        symbols: &[S],
    ) -> Result<Vec<&PhoneticEntry>, CatalogError> {
        symbols
            .iter()
            .map(|symbol| {
                let symbol = symbol.as_ref();
                self.lookup(symbol)
                    .ok_or_else(|| CatalogError::UnknownSymbol(symbol.to_string()))
            })
            .collect()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for group in Group::ALL {
            for (index, entry) in self.group(group).iter().enumerate() {
                if entry.symbol.trim().is_empty() {
                    return Err(CatalogError::EmptySymbol {
                        group: group.name(),
                        index,
                    });
                }
                if entry.audio.trim().is_empty() {
                    return Err(CatalogError::EmptyPath {
                        symbol: entry.symbol.clone(),
                    });
                }
                if !seen.insert(entry.symbol.as_str()) {
                    return Err(CatalogError::DuplicateSymbol(entry.symbol.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_matches_builtin_symbols() {
        let catalog = SymbolCatalog::default();
        let symbols: Vec<_> = catalog.iter().map(|(_, e)| e.symbol.as_str()).collect();
        assert_eq!(symbols, ["a", "e", "i", "o", "u", "b", "d", "f", "g", "h"]);
        assert_eq!(
            catalog.lookup("a").map(|e| e.audio.as_str()),
            Some("sounds/sound_a.mp3")
        );
    }

    #[test]
    fn parses_json_preserving_order() {
        let raw = r#"{
            "vowels": [{"symbol": "ə", "audio": "sounds/schwa.mp3"}, {"symbol": "a", "audio": "sounds/a.mp3"}],
            "consonants": [{"symbol": "ʃ", "path": "sounds/sh.mp3"}]
        }"#;
        let catalog = SymbolCatalog::from_json(raw).unwrap();
        assert_eq!(catalog.vowels()[0].symbol, "ə");
        assert_eq!(catalog.vowels()[1].symbol, "a");
        assert_eq!(catalog.consonants()[0].audio, "sounds/sh.mp3");
    }

    #[test]
    fn rejects_symbol_shared_between_groups() {
        let err = SymbolCatalog::new(
            vec![PhoneticEntry::new("a", "a.mp3")],
            vec![PhoneticEntry::new("a", "other.mp3")],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSymbol(symbol) if symbol == "a"));
    }

    #[test]
    fn resolves_symbols_in_requested_order() {
        let catalog = SymbolCatalog::default();
        let entries = catalog.resolve_all(&["b", "a", "b"]).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.audio.as_str()).collect();
        assert_eq!(
            paths,
            ["sounds/sound_b.mp3", "sounds/sound_a.mp3", "sounds/sound_b.mp3"]
        );
        assert!(matches!(
            catalog.resolve_all(&["a", "zz"]),
            Err(CatalogError::UnknownSymbol(symbol)) if symbol == "zz"
        ));
    }

    #[test]
    fn rejects_blank_fields() {
        let err = SymbolCatalog::new(vec![PhoneticEntry::new(" ", "a.mp3")], vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptySymbol { index: 0, .. }));
        let err = SymbolCatalog::new(vec![], vec![PhoneticEntry::new("b", "")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyPath { .. }));
    }
}
