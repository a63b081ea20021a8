/// Builtin function table and dispatch.
///
/// Defines the evaluated argument bundle, arity rules and the lookup table
/// that maps each builtin to its implementation.
pub mod core;
/// Conversions and aggregates: `len`, `sum`, `str`, `int`, `float`, `abs`,
/// `round`.
pub mod builtin;
/// `min` and `max`.
pub mod min_max;
/// `sorted`.
pub mod sorted;
