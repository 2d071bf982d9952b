/// Round to a whole currency unit, half away from zero.
///
/// Non-finite input is 0; out-of-range input saturates at the `i64` bounds.
pub fn round_currency(amount: f64) -> i64 {
    if !amount.is_finite() {
        return 0;
    }
    amount.round() as i64
}

/// `Some(x)` only for finite, non-zero input.
pub(crate) fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}
