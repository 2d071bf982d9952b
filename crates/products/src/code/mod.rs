//! Variant, value, brand and product-type codes: validation and generation.

pub mod dictionary;
pub mod generator;
pub mod validator;

pub use dictionary::{CodeDictionary, CodeLookup};
pub use generator::{
    generate_from_name, generate_random_code, generate_sequential_code, generate_variant_code,
    CodeGenerator, GeneratorConfig, VariantCode, VariantCodeRequest, VariantCodeStrategy,
    DEFAULT_MAX_ATTEMPTS,
};
pub use validator::{
    check_unique_code, format_code, is_unique_among, is_valid_unique_code, is_valid_value_code,
    is_valid_variant_code, sanitize_input, CodeKind, UNIQUE_CODE_MAX_LEN, VALUE_CODE_LEN,
    VARIANT_CODE_LEN,
};
