use std::collections::BTreeSet;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A family of statement patterns the evaluator can recognize.
///
/// Every parsed statement reports the features it relies on (see
/// [`crate::ast::Statement::features`]). A [`Grammar`] enables a subset of
/// them, so that an early lesson can refuse `sorted(...)` before it has been
/// taught, while later lessons accept everything.
///
/// Names are snake case, so `Feature::MinMax` is written `min_max`.
///
/// ```
/// use std::str::FromStr;
///
/// use pysnip::grammar::Feature;
///
/// assert_eq!(Feature::from_str("min_max").unwrap(), Feature::MinMax);
/// assert_eq!(Feature::FString.to_string(), "f_string");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter,
         EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Feature {
    /// `name = expr`
    Assign,
    /// `[a, b, c]`
    ListLiteral,
    /// `x[i]`, `x[a:b]` and `x[i] = v`
    Indexing,
    /// `x.append(v)`
    Append,
    /// `x.remove(v)`
    Remove,
    /// `x.pop()` / `x.pop(i)`
    Pop,
    /// `x.insert(i, v)`
    Insert,
    /// `x.sort()` / `x.sort(reverse=True)`
    Sort,
    /// `sorted(x)` / `sorted(x, reverse=True)`
    Sorted,
    /// `x.extend(y)`
    Extend,
    /// `a + b`
    Concat,
    /// `len(x)`
    Len,
    /// `sum(x)`
    Sum,
    /// `max(x)` / `min(x)`
    MinMax,
    /// `x.count(v)`
    Count,
    /// `x.index(v)`
    IndexOf,
    /// `x.reverse()`
    Reverse,
    /// `x.clear()`
    Clear,
    /// `print(...)`
    Print,
    /// `f"...{expr}..."`
    FString,
    /// `-`, `*`, `/`, `//`, `%` and compound assignment
    Arithmetic,
    /// `str(x)`, `int(x)`, `float(x)`, `abs(x)`, `round(x)`
    Conversion,
    /// `class Name(Base):` and `def method(self):`
    Classes,
}

/// The set of patterns a lesson's evaluator recognizes.
///
/// Statements needing a feature outside the set are treated exactly like
/// unrecognized text: skipped without effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    features: BTreeSet<Feature>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::full()
    }
}

impl Grammar {
    /// Creates a grammar recognizing every supported pattern.
    #[must_use]
    pub fn full() -> Self {
        Self { features: Feature::iter().collect() }
    }

    /// Creates a grammar recognizing only the given features.
    ///
    /// ```
    /// use pysnip::grammar::{Feature, Grammar};
    ///
    /// let grammar = Grammar::only(&[Feature::Assign, Feature::ListLiteral, Feature::Print]);
    /// assert!(grammar.allows(Feature::Print));
    /// assert!(!grammar.allows(Feature::Sorted));
    /// ```
    #[must_use]
    pub fn only(features: &[Feature]) -> Self {
        Self { features: features.iter().copied().collect() }
    }

    /// Returns this grammar with `feature` enabled.
    #[must_use]
    pub fn with(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    /// Returns this grammar with `feature` disabled.
    #[must_use]
    pub fn without(mut self, feature: Feature) -> Self {
        self.features.remove(&feature);
        self
    }

    /// Tests whether `feature` is enabled.
    #[must_use]
    pub fn allows(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Returns the first feature in `required` that this grammar does not
    /// enable, if any.
    #[must_use]
    pub fn first_missing(&self, required: &[Feature]) -> Option<Feature> {
        required.iter().copied().find(|feature| !self.allows(*feature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_grammar_enables_everything() {
        let grammar = Grammar::full();
        assert!(Feature::iter().all(|feature| grammar.allows(feature)));
        assert_eq!(Grammar::default(), grammar);
    }

    #[test]
    fn without_removes_a_single_feature() {
        let grammar = Grammar::full().without(Feature::Sorted);
        assert!(!grammar.allows(Feature::Sorted));
        assert!(grammar.allows(Feature::Sort));
        assert_eq!(grammar.first_missing(&[Feature::Print, Feature::Sorted]),
                   Some(Feature::Sorted));
    }

    #[test]
    fn feature_names_round_trip_through_strum() {
        for feature in Feature::iter() {
            assert_eq!(feature.to_string().parse::<Feature>(), Ok(feature));
        }
    }
}
