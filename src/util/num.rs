use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts an `i64` to the nearest `f64`, the way Python's `float(n)` does.
///
/// Integers beyond `2^53` lose their lowest bits.
///
/// ## Example
/// ```
/// use pysnip::util::num::i64_to_f64_lossy;
///
/// assert_eq!(i64_to_f64_lossy(42), 42.0);
/// assert_eq!(i64_to_f64_lossy(9_007_199_254_740_993), 9_007_199_254_740_992.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64_lossy(value: i64) -> f64 {
    value as f64
}

/// Converts a `usize` (a length or a position) to `i64`.
///
/// ## Errors
/// Returns `RuntimeError::LiteralTooLarge` if the value does not fit.
pub fn usize_to_i64_checked(value: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::LiteralTooLarge { line })
}

/// Truncates an `f64` toward zero and converts it to `i64`, the way Python's
/// `int(x)` does for floats.
///
/// ## Errors
/// Returns an error for non-finite or out-of-range values.
///
/// ## Example
/// ```
/// use pysnip::{error::RuntimeError, util::num::f64_to_i64_truncating};
///
/// assert_eq!(f64_to_i64_truncating(2.9, 1).unwrap(), 2);
/// assert_eq!(f64_to_i64_truncating(-2.9, 1).unwrap(), -2);
///
/// let err = f64_to_i64_truncating(f64::NAN, 3).unwrap_err();
/// assert!(matches!(err, RuntimeError::InvalidArgument { line: 3, .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncating(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::InvalidArgument { details: format!("cannot convert {value} to integer"),
                                                   line });
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(RuntimeError::LiteralTooLarge { line });
    }
    Ok(truncated as i64)
}

/// Resolves a Python index against a sequence of length `len`.
///
/// Negative indices count from the end, so `-1` is the last element.
///
/// ## Errors
/// Returns `RuntimeError::IndexOutOfBounds` if the resolved position does not
/// address an element.
///
/// ## Example
/// ```
/// use pysnip::util::num::resolve_index;
///
/// assert_eq!(resolve_index(0, 3, 1).unwrap(), 0);
/// assert_eq!(resolve_index(-1, 3, 1).unwrap(), 2);
/// assert!(resolve_index(3, 3, 1).is_err());
/// assert!(resolve_index(-4, 3, 1).is_err());
/// ```
pub fn resolve_index(index: i64, len: usize, line: usize) -> EvalResult<usize> {
    let out_of_bounds = RuntimeError::IndexOutOfBounds { index, len, line };
    let signed_len = usize_to_i64_checked(len, line)?;
    let position = if index < 0 { index + signed_len } else { index };

    if position < 0 || position >= signed_len {
        return Err(out_of_bounds);
    }
    usize::try_from(position).map_err(|_| out_of_bounds)
}

/// Clamps a Python index into `0..=len`, as slicing and `list.insert` do.
///
/// Negative indices count from the end; anything past either end is pinned to
/// that end. This never fails.
///
/// ## Example
/// ```
/// use pysnip::util::num::clamp_index;
///
/// assert_eq!(clamp_index(1, 3), 1);
/// assert_eq!(clamp_index(10, 3), 3);
/// assert_eq!(clamp_index(-1, 3), 2);
/// assert_eq!(clamp_index(-10, 3), 0);
/// ```
#[must_use]
pub fn clamp_index(index: i64, len: usize) -> usize {
    let signed_len = i64::try_from(len).unwrap_or(i64::MAX);
    let position = if index < 0 { index.saturating_add(signed_len) } else { index };
    usize::try_from(position.clamp(0, signed_len)).unwrap_or(len)
}
