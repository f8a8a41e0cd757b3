//! Identifier renaming ledger
//!
//! The symbol table maps every original identifier seen during one minification run
//! to its minified name, and remembers the declared type of identifiers renamed in a
//! uniform declaration so callers can rebind uniform data after minification.

use crate::program::UniformBinding;
use crate::reserved::RESERVED_WORDS;
use std::collections::{BTreeMap, HashMap};

/// Digits of the minified-name numbering, in allocation order
const NAME_ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Converts an allocation index into its minified name
///
/// Names are numbered like spreadsheet columns over 52 letters:
/// 0 → `A`, 25 → `Z`, 26 → `a`, 51 → `z`, 52 → `AA`, 53 → `AB`, ...
pub fn minified_name(index: usize) -> String {
    let base = NAME_ALPHABET.len();
    let mut digits = Vec::new();
    let mut remaining = index;
    loop {
        digits.push(NAME_ALPHABET[remaining % base]);
        if remaining < base {
            break;
        }
        remaining = remaining / base - 1;
    }
    digits.iter().rev().map(|&digit| digit as char).collect()
}

/// Renaming state of one original identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRecord {
    /// Name emitted in place of the original identifier
    pub minified_name: String,
    /// Type name, set when the identifier was first seen in a uniform declaration
    pub declared_type: Option<String>,
}

/// Original → minified identifier mapping for a single pipeline run
///
/// A new table is seeded with [`RESERVED_WORDS`] mapped to themselves. Once a name has a
/// record, every later lookup returns the same minified name.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    records: HashMap<String, IdentifierRecord>,
    allocated: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table seeded with the reserved GLSL keyword and built-in set
    pub fn new() -> Self {
        let mut table = Self {
            records: HashMap::with_capacity(RESERVED_WORDS.len()),
            allocated: 0,
        };
        table.reserve(RESERVED_WORDS);
        table
    }

    /// Maps each name to itself, overwriting any previous record
    pub fn reserve<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            self.records.insert(
                name.to_string(),
                IdentifierRecord {
                    minified_name: name.to_string(),
                    declared_type: None,
                },
            );
        }
    }

    /// Returns the minified name of `name`, allocating the next free one on first sight
    ///
    /// `declared_type` is only recorded when the record is created; later calls keep the
    /// first assignment.
    pub fn rename(&mut self, name: &str, declared_type: Option<&str>) -> String {
        if let Some(record) = self.records.get(name) {
            return record.minified_name.clone();
        }

        let minified = loop {
            let candidate = minified_name(self.allocated);
            self.allocated += 1;
            // Kept names still appear verbatim in the output
            if !self.is_kept(&candidate) {
                break candidate;
            }
            tracing::trace!(%candidate, "skipping minified name that collides with a kept identifier");
        };

        tracing::trace!(name, %minified, ?declared_type, "allocated minified name");
        self.insert(name, minified.clone(), declared_type);
        minified
    }

    /// Keeps `name` unrenamed unless it already has a record, and returns its output name
    ///
    /// Unlike [`SymbolTable::reserve`] this records `declared_type`, so preserved uniforms
    /// are still reported by [`SymbolTable::uniforms`].
    pub fn preserve(&mut self, name: &str, declared_type: Option<&str>) -> String {
        if let Some(record) = self.records.get(name) {
            return record.minified_name.clone();
        }
        self.insert(name, name.to_string(), declared_type);
        name.to_string()
    }

    /// Looks up the record of an original identifier
    pub fn get(&self, name: &str) -> Option<&IdentifierRecord> {
        self.records.get(name)
    }

    /// Number of allocation indices consumed so far
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Records that carry a declared type, keyed by original name
    pub fn uniforms(&self) -> BTreeMap<String, UniformBinding> {
        self.records
            .iter()
            .filter_map(|(name, record)| {
                record.declared_type.as_ref().map(|declared_type| {
                    (
                        name.clone(),
                        UniformBinding {
                            variable_type: declared_type.clone(),
                            minified_name: record.minified_name.clone(),
                        },
                    )
                })
            })
            .collect()
    }

    fn insert(&mut self, name: &str, minified_name: String, declared_type: Option<&str>) {
        self.records.insert(
            name.to_string(),
            IdentifierRecord {
                minified_name,
                declared_type: declared_type.map(str::to_string),
            },
        );
    }

    fn is_kept(&self, name: &str) -> bool {
        self.records.get(name).is_some_and(|record| record.minified_name == name)
    }
}
