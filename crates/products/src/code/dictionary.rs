//! Word → shorthand code lookup used when deriving value codes from names.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use archery_core::{DomainError, DomainResult};

use super::validator::{format_code, is_valid_value_code};

/// Lookup table consulted first by name-derived code generation.
pub trait CodeLookup {
    /// `name` is trimmed and uppercased by the caller.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Uppercased name → code table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeDictionary {
    entries: HashMap<String, String>,
}

const ENGLISH: &[(&str, &str)] = &[
    ("BLACK", "BK"),
    ("WHITE", "WH"),
    ("RED", "RD"),
    ("BLUE", "BL"),
    ("GREEN", "GN"),
    ("YELLOW", "YL"),
    ("ORANGE", "OR"),
    ("PURPLE", "PU"),
    ("PINK", "PK"),
    ("GREY", "GY"),
    ("GRAY", "GY"),
    ("BROWN", "BR"),
    ("SILVER", "SV"),
    ("GOLD", "GD"),
    ("CAMO", "CM"),
    ("LEFT", "LH"),
    ("RIGHT", "RH"),
    ("LEFT HAND", "LH"),
    ("RIGHT HAND", "RH"),
    ("EXTRA SMALL", "XS"),
    ("SMALL", "SM"),
    ("MEDIUM", "MD"),
    ("LARGE", "LG"),
    ("EXTRA LARGE", "XL"),
];

impl CodeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English colour / handedness / size table.
    pub fn english() -> Self {
        ENGLISH
            .iter()
            .fold(Self::new(), |dict, (name, code)| dict.with(name, code))
    }

    /// Load a replacement table, e.g. `{"HITAM": "BK"}`.
    ///
    /// Every code must be a valid two-character value code.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("code dictionary: {e}")))?;
        if let Some((name, code)) = raw
            .iter()
            .find(|(_, code)| !is_valid_value_code(&format_code(code.trim())))
        {
            return Err(DomainError::validation(format!(
                "code dictionary: {name:?} maps to malformed code {code:?}"
            )));
        }
        Ok(raw
            .iter()
            .fold(Self::new(), |dict, (name, code)| dict.with(name, code)))
    }

    pub fn with(mut self, name: &str, code: &str) -> Self {
        self.insert(name, code);
        self
    }

    pub fn insert(&mut self, name: &str, code: &str) {
        self.entries
            .insert(format_code(name.trim()), format_code(code.trim()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CodeLookup for CodeDictionary {
    fn lookup(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }
}

impl<F> CodeLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self(name)
    }
}
