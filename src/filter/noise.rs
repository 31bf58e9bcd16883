//! Removal of non-biological classes.

use crate::detection::HasSpecies;
use tracing::debug;

/// Whether `species` starts with any of `prefixes`.
///
/// Empty prefixes are ignored rather than matching everything.
pub fn is_non_species<S: AsRef<str>>(species: &str, prefixes: &[S]) -> bool {
    prefixes
        .iter()
        .map(AsRef::as_ref)
        .any(|prefix| !prefix.is_empty() && species.starts_with(prefix))
}

/// Drop records whose species label starts with a noise prefix.
///
/// Intended for display only; it runs after threshold filtering and never
/// takes part in the no-call veto. Order of the remaining records is kept.
pub fn exclude_non_species<T, S>(mut records: Vec<T>, prefixes: &[S]) -> Vec<T>
where
    T: HasSpecies,
    S: AsRef<str>,
{
    if records.is_empty() || prefixes.is_empty() {
        return records;
    }

    let before = records.len();
    records.retain(|r| !is_non_species(r.species(), prefixes));
    debug!(
        "Hid {} non-species record(s), {} remain",
        before - records.len(),
        records.len()
    );

    records
}
