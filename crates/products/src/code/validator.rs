//! Format and uniqueness rules for human-entered codes.
//!
//! Everything here is a predicate or a pure string transform. Rejections are
//! reported through return values; nothing in this module fails hard.

use std::collections::HashSet;

use archery_core::{DomainError, DomainResult};

/// Maximum length of a unique code (variant unique codes, brand and product-type codes).
pub const UNIQUE_CODE_MAX_LEN: usize = 10;

/// Exact length of a sequential numeric variant code.
pub const VARIANT_CODE_LEN: usize = 4;

/// Exact length of a variant value shorthand code.
pub const VALUE_CODE_LEN: usize = 2;

/// Code family, which decides the allowed alphabet and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// 1-10 ASCII alphanumerics.
    Unique,
    /// Exactly 4 decimal digits.
    Variant,
    /// 2 ASCII alphanumerics, stored uppercase.
    ValueShort,
}

impl CodeKind {
    pub fn max_len(self) -> usize {
        match self {
            CodeKind::Unique => UNIQUE_CODE_MAX_LEN,
            CodeKind::Variant => VARIANT_CODE_LEN,
            CodeKind::ValueShort => VALUE_CODE_LEN,
        }
    }

    fn accepts(self, c: char) -> bool {
        match self {
            CodeKind::Variant => c.is_ascii_digit(),
            CodeKind::Unique | CodeKind::ValueShort => c.is_ascii_alphanumeric(),
        }
    }
}

pub fn is_valid_unique_code(code: &str) -> bool {
    let len = code.chars().count();
    (1..=UNIQUE_CODE_MAX_LEN).contains(&len) && code.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_valid_variant_code(code: &str) -> bool {
    code.len() == VARIANT_CODE_LEN && code.chars().all(|c| c.is_ascii_digit())
}

/// Value codes are stored uppercase, so lowercase input is not valid as-is.
pub fn is_valid_value_code(code: &str) -> bool {
    code.len() == VALUE_CODE_LEN
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Case-insensitive "not already taken" check.
pub fn is_unique_among<S: AsRef<str>>(code: &str, existing_codes: &[S]) -> bool {
    let code = format_code(code);
    !existing_codes
        .iter()
        .any(|existing| format_code(existing.as_ref()) == code)
}

/// Uppercases ASCII letters. Length and every other character are preserved.
pub fn format_code(code: &str) -> String {
    code.to_ascii_uppercase()
}

/// Drops every character the code family does not allow, then truncates to
/// its maximum length.
///
/// Idempotent: the output only holds accepted characters and already fits.
pub fn sanitize_input(raw: &str, kind: CodeKind) -> String {
    raw.chars()
        .filter(|c| kind.accepts(*c))
        .take(kind.max_len())
        .collect()
}

/// Field-level check for a typed-in unique code.
///
/// Returns the normalized code, or a recoverable `Validation` / `Conflict`
/// error the form can show next to the field.
pub fn check_unique_code<S: AsRef<str>>(code: &str, existing_codes: &[S]) -> DomainResult<String> {
    let code = format_code(code.trim());
    if !is_valid_unique_code(&code) {
        return Err(DomainError::validation(format!(
            "code must be 1-{UNIQUE_CODE_MAX_LEN} letters or digits"
        )));
    }
    if !is_unique_among(&code, existing_codes) {
        return Err(DomainError::conflict(format!("code {code} is already in use")));
    }
    Ok(code)
}

/// Uppercased set of taken codes for repeated membership tests.
pub(crate) fn taken_set<S: AsRef<str>>(existing_codes: &[S]) -> HashSet<String> {
    existing_codes
        .iter()
        .map(|code| format_code(code.as_ref()))
        .collect()
}
