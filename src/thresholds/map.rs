//! In-memory threshold lookup.

use crate::constants::{DEFAULT_THRESHOLD, confidence};
use std::collections::HashMap;

/// Species label to threshold mapping with a fallback default.
///
/// Lookups never fail: species without an entry, and entries holding an
/// unusable value (outside `(0, 1]` or NaN), resolve to the default.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMap {
    entries: HashMap<String, f32>,
    default: f32,
}

impl ThresholdMap {
    /// Create an empty map with the given default.
    ///
    /// An unusable default is replaced by [`DEFAULT_THRESHOLD`].
    pub fn new(default: f32) -> Self {
        Self {
            entries: HashMap::new(),
            default: if is_usable(default) {
                default
            } else {
                DEFAULT_THRESHOLD
            },
        }
    }

    /// Set the threshold for a species, replacing any previous value.
    pub fn insert(&mut self, species: impl Into<String>, threshold: f32) {
        self.entries.insert(species.into(), threshold);
    }

    /// Explicit entry for a species, if any.
    pub fn get(&self, species: &str) -> Option<f32> {
        self.entries.get(species).copied()
    }

    /// Threshold a species is judged against.
    pub fn resolve(&self, species: &str) -> f32 {
        self.get(species)
            .filter(|t| is_usable(*t))
            .unwrap_or(self.default)
    }

    /// Threshold applied to species without a usable entry.
    pub fn default_threshold(&self) -> f32 {
        self.default
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over explicit entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Copy of this map with operator overrides applied on top.
    ///
    /// Overridden species take the new value; every other entry and the
    /// default are carried over untouched.
    #[must_use]
    pub fn with_overrides<I, S>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let mut merged = self.clone();
        for (species, threshold) in overrides {
            merged.insert(species, threshold);
        }
        merged
    }
}

impl Default for ThresholdMap {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for ThresholdMap {
    fn from_iter<T: IntoIterator<Item = (S, f32)>>(iter: T) -> Self {
        Self::default().with_overrides(iter)
    }
}

/// Whether a threshold lies in `(0, 1]`, the range a confidence can reach.
pub(crate) fn is_usable(threshold: f32) -> bool {
    threshold > confidence::MIN && threshold <= confidence::MAX
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_entry() {
        let mut map = ThresholdMap::default();
        map.insert("Turdus merula_Eurasian Blackbird", 0.3);
        assert_eq!(map.resolve("Turdus merula_Eurasian Blackbird"), 0.3);
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let map = ThresholdMap::default();
        assert_eq!(map.resolve("Parus major_Great Tit"), 0.2);
        assert_eq!(map.get("Parus major_Great Tit"), None);
    }

    #[test]
    fn test_zero_and_nan_entries_use_default() {
        let mut map = ThresholdMap::new(0.25);
        map.insert("A_a", 0.0);
        map.insert("B_b", f32::NAN);
        map.insert("C_c", -0.1);
        map.insert("D_d", 1.5);
        map.insert("E_e", 1.0);
        assert_eq!(map.resolve("A_a"), 0.25);
        assert_eq!(map.resolve("B_b"), 0.25);
        assert_eq!(map.resolve("C_c"), 0.25);
        assert_eq!(map.resolve("D_d"), 0.25);
        assert_eq!(map.resolve("E_e"), 1.0);
    }

    #[test]
    fn test_unusable_default_is_replaced() {
        assert_eq!(ThresholdMap::new(0.0).default_threshold(), DEFAULT_THRESHOLD);
        assert_eq!(ThresholdMap::new(f32::INFINITY).default_threshold(), DEFAULT_THRESHOLD);
        assert_eq!(ThresholdMap::new(2.0).default_threshold(), DEFAULT_THRESHOLD);
        assert_eq!(ThresholdMap::new(0.4).default_threshold(), 0.4);
    }

    #[test]
    fn test_overrides_replace_without_touching_others() {
        let mut loaded = ThresholdMap::new(0.2);
        loaded.insert("A_a", 0.3);
        loaded.insert("B_b", 0.4);

        let merged = loaded.with_overrides([("A_a", 0.6), ("C_c", 0.1)]);

        assert_eq!(merged.resolve("A_a"), 0.6);
        assert_eq!(merged.resolve("B_b"), 0.4);
        assert_eq!(merged.resolve("C_c"), 0.1);
        assert_eq!(merged.default_threshold(), 0.2);
        // The loaded map is left as it was
        assert_eq!(loaded.resolve("A_a"), 0.3);
        assert_eq!(loaded.get("C_c"), None);
    }

    #[test]
    fn test_from_iterator_last_value_wins() {
        let map: ThresholdMap = [("A_a", 0.3), ("A_a", 0.5)].into_iter().collect();
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("A_a"), 0.5);
    }
}
