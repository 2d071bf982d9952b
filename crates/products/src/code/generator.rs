//! Code generation that never hands out a code the caller already uses.
//!
//! The caller owns the `existing_codes` list and threads it through; the
//! generator only reads it. Randomness comes from a caller-supplied `Rng` in
//! the `*_with` methods so runs can be reproduced with a seeded generator.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use archery_core::{DomainError, DomainResult};

use super::dictionary::{CodeDictionary, CodeLookup};
use super::validator::{
    format_code, is_valid_unique_code, is_valid_value_code, is_valid_variant_code, taken_set,
    UNIQUE_CODE_MAX_LEN, VALUE_CODE_LEN, VARIANT_CODE_LEN,
};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Generation tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Random draws before giving up with `GenerationExhausted`.
    pub max_attempts: u32,
    /// Length of the random fallback in variant code resolution.
    pub random_code_length: usize,
    /// Pads single-character value names ("S" → "SX").
    pub filler: char,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            random_code_length: VARIANT_CODE_LEN,
            filler: 'X',
        }
    }
}

/// A variant's disambiguating code under its product's base SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCode {
    pub base_sku: String,
    pub unique_code: String,
}

/// Rungs of the variant code ladder, tried in [`VariantCodeStrategy::LADDER`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantCodeStrategy {
    /// A code typed in by the user, if well-formed and free.
    Custom,
    /// `index + 1`, zero-padded. Not collision-checked: index uniqueness is on the caller.
    Sequential,
    /// Uniform random fallback.
    Random,
}

impl VariantCodeStrategy {
    pub const LADDER: [VariantCodeStrategy; 3] = [
        VariantCodeStrategy::Custom,
        VariantCodeStrategy::Sequential,
        VariantCodeStrategy::Random,
    ];
}

/// Inputs to one variant code resolution.
#[derive(Debug, Clone, Copy)]
pub struct VariantCodeRequest<'a> {
    pub base_sku: &'a str,
    pub index: Option<usize>,
    pub custom_code: Option<&'a str>,
}

/// Code generator with its configuration and name dictionary.
#[derive(Debug, Clone)]
pub struct CodeGenerator<L = CodeDictionary> {
    config: GeneratorConfig,
    dictionary: L,
}

impl CodeGenerator<CodeDictionary> {
    /// Default settings with the built-in English dictionary.
    pub fn english() -> Self {
        Self::new(GeneratorConfig::default(), CodeDictionary::english())
    }
}

impl Default for CodeGenerator<CodeDictionary> {
    fn default() -> Self {
        Self::english()
    }
}

impl<L: CodeLookup> CodeGenerator<L> {
    pub fn new(config: GeneratorConfig, dictionary: L) -> Self {
        Self { config, dictionary }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Random `[A-Z0-9]{length}` code absent (case-insensitively) from `existing_codes`.
    pub fn random_code_with<R, S>(
        &self,
        rng: &mut R,
        length: usize,
        existing_codes: &[S],
    ) -> DomainResult<String>
    where
        R: Rng + ?Sized,
        S: AsRef<str>,
    {
        self.random_code_in(rng, length, &taken_set(existing_codes))
    }

    fn random_code_in<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        taken: &HashSet<String>,
    ) -> DomainResult<String> {
        if !(1..=UNIQUE_CODE_MAX_LEN).contains(&length) {
            return Err(DomainError::validation(format!(
                "code length must be between 1 and {UNIQUE_CODE_MAX_LEN}, got {length}"
            )));
        }
        for _ in 0..self.config.max_attempts {
            let candidate: String = (0..length)
                .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
                .collect();
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
        }
        warn!(
            length,
            taken = taken.len(),
            attempts = self.config.max_attempts,
            "random code space exhausted"
        );
        Err(DomainError::exhausted(self.config.max_attempts))
    }

    /// Two-character shorthand for a value label ("Black" → "BK", "Dark Red" → "DR").
    ///
    /// Stages, each tried only when the previous one is empty or taken:
    /// dictionary, word initials / first+last letter, first letter + digit 1-9,
    /// random.
    pub fn from_name_with<R, S>(
        &self,
        rng: &mut R,
        value_name: &str,
        existing_codes: &[S],
    ) -> DomainResult<String>
    where
        R: Rng + ?Sized,
        S: AsRef<str>,
    {
        let taken = taken_set(existing_codes);
        let name = format_code(value_name.trim());
        let free = |code: &String| !code.is_empty() && !taken.contains(code);

        // Lookups are pluggable, so their output is checked like any typed-in code.
        if let Some(code) = self.dictionary.lookup(&name).map(|c| format_code(c.trim())) {
            if is_valid_value_code(&code) && free(&code) {
                debug!(%name, %code, "value code from dictionary");
                return Ok(code);
            }
        }

        let words: Vec<&str> = name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        if let Some(code) = self.derive_from_words(&words) {
            if free(&code) {
                return Ok(code);
            }
        }

        if let Some(first) = words.first().and_then(|w| w.chars().next()) {
            if let Some(code) = (1..=9).map(|d| format!("{first}{d}")).find(|c| free(c)) {
                debug!(%name, %code, "value code from initial + digit");
                return Ok(code);
            }
        }

        debug!(%name, "value code falling back to random");
        self.random_code_in(rng, VALUE_CODE_LEN, &taken)
    }

    fn derive_from_words(&self, words: &[&str]) -> Option<String> {
        match words {
            [] => None,
            [word] => {
                let first = word.chars().next()?;
                let last = word.chars().rev().find(|c| *c != first).unwrap_or(self.config.filler);
                Some(format!("{first}{last}"))
            }
            [a, b, ..] => {
                let first = a.chars().next()?;
                let second = b.chars().next()?;
                Some(format!("{first}{second}"))
            }
        }
    }

    /// Resolve a variant's unique code: custom, then sequential, then random.
    pub fn variant_code_with<R, S>(
        &self,
        rng: &mut R,
        request: VariantCodeRequest<'_>,
        existing_codes: &[S],
    ) -> DomainResult<VariantCode>
    where
        R: Rng + ?Sized,
        S: AsRef<str>,
    {
        let taken = taken_set(existing_codes);
        for strategy in VariantCodeStrategy::LADDER {
            if let Some(unique_code) = self.propose(strategy, rng, &request, &taken)? {
                debug!(base_sku = request.base_sku, ?strategy, %unique_code, "variant code resolved");
                return Ok(VariantCode {
                    base_sku: request.base_sku.to_string(),
                    unique_code,
                });
            }
        }
        Err(DomainError::exhausted(self.config.max_attempts))
    }

    /// One rung of the ladder: a candidate, or `None` to move on.
    pub fn propose<R: Rng + ?Sized>(
        &self,
        strategy: VariantCodeStrategy,
        rng: &mut R,
        request: &VariantCodeRequest<'_>,
        taken: &HashSet<String>,
    ) -> DomainResult<Option<String>> {
        match strategy {
            VariantCodeStrategy::Custom => Ok(request
                .custom_code
                .map(|code| format_code(code.trim()))
                .filter(|code| is_valid_variant_code(code) || is_valid_unique_code(code))
                .filter(|code| !taken.contains(code))),
            VariantCodeStrategy::Sequential => Ok(request.index.map(generate_sequential_code)),
            VariantCodeStrategy::Random => self
                .random_code_in(rng, self.config.random_code_length, taken)
                .map(Some),
        }
    }
}

/// `index + 1`, left-padded with zeros to four digits.
pub fn generate_sequential_code(index: usize) -> String {
    format!("{:0width$}", index + 1, width = VARIANT_CODE_LEN)
}

/// [`CodeGenerator::random_code_with`] with default settings and the thread RNG.
pub fn generate_random_code<S: AsRef<str>>(length: usize, existing_codes: &[S]) -> DomainResult<String> {
    CodeGenerator::english().random_code_with(&mut rand::thread_rng(), length, existing_codes)
}

/// [`CodeGenerator::from_name_with`] with the English dictionary and the thread RNG.
pub fn generate_from_name<S: AsRef<str>>(value_name: &str, existing_codes: &[S]) -> DomainResult<String> {
    CodeGenerator::english().from_name_with(&mut rand::thread_rng(), value_name, existing_codes)
}

/// [`CodeGenerator::variant_code_with`] with default settings and the thread RNG.
pub fn generate_variant_code<S: AsRef<str>>(
    base_sku: &str,
    existing_codes: &[S],
    index: Option<usize>,
    custom_code: Option<&str>,
) -> DomainResult<VariantCode> {
    CodeGenerator::english().variant_code_with(
        &mut rand::thread_rng(),
        VariantCodeRequest {
            base_sku,
            index,
            custom_code,
        },
        existing_codes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NONE: [&str; 0] = [];

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn sequential_codes_are_one_based_and_padded() {
        assert_eq!(generate_sequential_code(0), "0001");
        assert_eq!(generate_sequential_code(41), "0042");
        assert_eq!(generate_sequential_code(9998), "9999");
    }

    #[test]
    fn random_code_has_requested_shape() {
        let code = CodeGenerator::english()
            .random_code_with(&mut rng(), 6, &NONE)
            .unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn random_code_rejects_out_of_range_length() {
        let generator = CodeGenerator::english();
        assert!(matches!(
            generator.random_code_with(&mut rng(), 0, &NONE),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            generator.random_code_with(&mut rng(), 11, &NONE),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn random_code_exhausts_a_full_code_space() {
        let all: Vec<String> = ALPHABET.iter().map(|b| char::from(*b).to_string()).collect();
        let generator = CodeGenerator::new(
            GeneratorConfig {
                max_attempts: 50,
                ..GeneratorConfig::default()
            },
            CodeDictionary::new(),
        );
        let err = generator.random_code_with(&mut rng(), 1, &all).unwrap_err();
        assert_eq!(err, DomainError::exhausted(50));
    }

    #[test]
    fn random_codes_fill_the_space_then_exhaust() {
        let generator = CodeGenerator::english();
        let mut rng = rng();
        let mut existing: Vec<String> = Vec::new();
        loop {
            match generator.random_code_with(&mut rng, 1, &existing) {
                Ok(code) => {
                    assert!(!existing.contains(&code));
                    existing.push(code.to_lowercase());
                }
                Err(err) => {
                    assert!(matches!(err, DomainError::GenerationExhausted { .. }));
                    break;
                }
            }
        }
        assert_eq!(existing.len(), ALPHABET.len());
    }

    #[test]
    fn from_name_prefers_dictionary() {
        let code = CodeGenerator::english()
            .from_name_with(&mut rng(), " black ", &NONE)
            .unwrap();
        assert_eq!(code, "BK");
    }

    #[test]
    fn from_name_uses_word_initials_for_multi_word_names() {
        let code = CodeGenerator::english()
            .from_name_with(&mut rng(), "Forest Night Camo", &NONE)
            .unwrap();
        assert_eq!(code, "FN");
    }

    #[test]
    fn from_name_uses_first_and_last_distinct_letter() {
        let generator = CodeGenerator::english();
        assert_eq!(generator.from_name_with(&mut rng(), "Teal", &NONE).unwrap(), "TL");
        assert_eq!(generator.from_name_with(&mut rng(), "Moss", &NONE).unwrap(), "MS");
        assert_eq!(generator.from_name_with(&mut rng(), "Aaa", &NONE).unwrap(), "AX");
        assert_eq!(generator.from_name_with(&mut rng(), "S", &NONE).unwrap(), "SX");
    }

    #[test]
    fn from_name_falls_back_to_initial_and_digit() {
        let generator = CodeGenerator::english();
        let code = generator.from_name_with(&mut rng(), "Teal", &["tl"]).unwrap();
        assert_eq!(code, "T1");
        let code = generator
            .from_name_with(&mut rng(), "Teal", &["TL", "T1", "T2"])
            .unwrap();
        assert_eq!(code, "T3");
    }

    #[test]
    fn dictionary_collision_moves_down_the_stages() {
        let code = CodeGenerator::english()
            .from_name_with(&mut rng(), "Black", &["BK"])
            .unwrap();
        assert_eq!(code, "B1");
    }

    #[test]
    fn from_name_falls_back_to_random_when_digits_are_taken() {
        let mut existing = vec!["TL".to_string()];
        existing.extend((1..=9).map(|d| format!("T{d}")));
        let code = CodeGenerator::english()
            .from_name_with(&mut rng(), "Teal", &existing)
            .unwrap();
        assert_eq!(code.len(), 2);
        assert!(!existing.contains(&code));
    }

    #[test]
    fn from_name_of_blank_label_is_random() {
        let code = CodeGenerator::english()
            .from_name_with(&mut rng(), "  --  ", &NONE)
            .unwrap();
        assert_eq!(code.len(), 2);
    }

    #[test]
    fn custom_dictionary_replaces_builtin_table() {
        let generator = CodeGenerator::new(
            GeneratorConfig::default(),
            CodeDictionary::new().with("hitam", "hm"),
        );
        assert_eq!(generator.from_name_with(&mut rng(), "Hitam", &NONE).unwrap(), "HM");
        assert_eq!(generator.from_name_with(&mut rng(), "Black", &NONE).unwrap(), "BK");
    }

    #[test]
    fn variant_code_uses_valid_free_custom_code() {
        let code = CodeGenerator::english()
            .variant_code_with(
                &mut rng(),
                VariantCodeRequest {
                    base_sku: "BOW-100",
                    index: Some(3),
                    custom_code: Some("rh70"),
                },
                &["LH70"],
            )
            .unwrap();
        assert_eq!(code.base_sku, "BOW-100");
        assert_eq!(code.unique_code, "RH70");
    }

    #[test]
    fn variant_code_skips_taken_or_malformed_custom_code() {
        let generator = CodeGenerator::english();
        let taken = generator
            .variant_code_with(
                &mut rng(),
                VariantCodeRequest {
                    base_sku: "BOW-100",
                    index: Some(3),
                    custom_code: Some("lh70"),
                },
                &["LH70"],
            )
            .unwrap();
        assert_eq!(taken.unique_code, "0004");

        let malformed = generator
            .variant_code_with(
                &mut rng(),
                VariantCodeRequest {
                    base_sku: "BOW-100",
                    index: Some(0),
                    custom_code: Some("LH-70"),
                },
                &NONE,
            )
            .unwrap();
        assert_eq!(malformed.unique_code, "0001");
    }

    #[test]
    fn variant_code_without_index_is_random() {
        let code = CodeGenerator::english()
            .variant_code_with(
                &mut rng(),
                VariantCodeRequest {
                    base_sku: "BOW-100",
                    index: None,
                    custom_code: None,
                },
                &["0001"],
            )
            .unwrap();
        assert_eq!(code.unique_code.len(), VARIANT_CODE_LEN);
        assert_ne!(code.unique_code, "0001");
    }

    #[test]
    fn malformed_lookup_codes_are_not_used() {
        let lookup = |name: &str| (name == "BLACK").then(|| "BLK-1".to_string());
        let generator = CodeGenerator::new(GeneratorConfig::default(), lookup);
        let code = generator.from_name_with(&mut rng(), "Black", &NONE).unwrap();
        assert_eq!(code, "BK");
        assert!(is_valid_value_code(&code));
    }

    #[test]
    fn random_fallback_rejects_out_of_range_configured_length() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"random_code_length": 0}"#).unwrap();
        let generator = CodeGenerator::new(config, CodeDictionary::new());
        let err = generator
            .variant_code_with(
                &mut rng(),
                VariantCodeRequest {
                    base_sku: "BOW-100",
                    index: None,
                    custom_code: None,
                },
                &NONE,
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn variant_code_random_fallback_can_exhaust() {
        let all: Vec<String> = ALPHABET.iter().map(|b| char::from(*b).to_string()).collect();
        let generator = CodeGenerator::new(
            GeneratorConfig {
                max_attempts: 10,
                random_code_length: 1,
                ..GeneratorConfig::default()
            },
            CodeDictionary::new(),
        );
        let err = generator
            .variant_code_with(
                &mut rng(),
                VariantCodeRequest {
                    base_sku: "BOW-100",
                    index: None,
                    custom_code: None,
                },
                &all,
            )
            .unwrap_err();
        assert_eq!(err, DomainError::exhausted(10));
    }

    #[test]
    fn each_rung_can_be_probed_alone() {
        let generator = CodeGenerator::english();
        let taken = HashSet::new();
        let request = VariantCodeRequest {
            base_sku: "ARW",
            index: None,
            custom_code: None,
        };
        assert_eq!(
            generator
                .propose(VariantCodeStrategy::Custom, &mut rng(), &request, &taken)
                .unwrap(),
            None
        );
        assert_eq!(
            generator
                .propose(VariantCodeStrategy::Sequential, &mut rng(), &request, &taken)
                .unwrap(),
            None
        );
        assert!(generator
            .propose(VariantCodeStrategy::Random, &mut rng(), &request, &taken)
            .unwrap()
            .is_some());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"max_attempts": 25}"#).unwrap();
        assert_eq!(config.max_attempts, 25);
        assert_eq!(config.random_code_length, VARIANT_CODE_LEN);
        assert_eq!(config.filler, 'X');
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        #[test]
        fn random_code_avoids_growing_exclusion_set(seed in any::<u64>(), rounds in 1usize..40) {
            let generator = CodeGenerator::english();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut existing: Vec<String> = Vec::new();
            for _ in 0..rounds {
                let code = generator.random_code_with(&mut rng, 2, &existing).unwrap();
                prop_assert!(!existing.iter().any(|e| e.eq_ignore_ascii_case(&code)));
                existing.push(code.to_lowercase());
            }
        }
    }
}
