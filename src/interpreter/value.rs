/// Sequence ordering.
///
/// Implements the comparison used by `list.sort`, `sorted`, `max` and `min`:
/// numbers compare numerically when the sequence starts with a number, and
/// everything else compares by its printed text.
pub mod ordering;

pub mod core;
