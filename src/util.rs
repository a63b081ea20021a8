/// Numeric conversion and index helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without silent data loss, and for resolving Python
/// style (possibly negative) indices against a sequence length.
///
/// All fallible functions return a `Result`, which is `Ok` if the conversion
/// is valid, or a `RuntimeError` carrying the source line otherwise.
pub mod num;
