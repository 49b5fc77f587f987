//! # Duplicate Detection
//!
//! Generic uniqueness checks used by the module loader (over module names)
//! and by callers directly over any other values. The only capability asked
//! of the item type is `Eq + Hash`.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::PoseidonError;

/// Fail if any value occurs more than once in `items`.
///
/// Succeeds silently for a sequence of distinct values. On the first
/// repetition returns [`PoseidonError::DuplicateValue`] with the positions of
/// both occurrences.
///
/// ```
/// use poseidon_core::check_duplicates;
///
/// assert!(check_duplicates([1, 2, 3]).is_ok());
/// assert!(check_duplicates([1, 2, 2, 3]).is_err());
/// ```
pub fn check_duplicates<I, T>(items: I) -> Result<(), PoseidonError>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    let mut seen: HashMap<T, usize> = HashMap::new();
    for (index, item) in items.into_iter().enumerate() {
        match seen.entry(item) {
            Entry::Occupied(first) => {
                return Err(PoseidonError::DuplicateValue {
                    first_index: *first.get(),
                    duplicate_index: index,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }
    }
    Ok(())
}

/// Return every value that occurs more than once, each reported once, in the
/// order its first repetition appears in `items`.
pub fn find_duplicates<T>(items: &[T]) -> Vec<&T>
where
    T: Eq + Hash,
{
    let mut seen = HashSet::with_capacity(items.len());
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for item in items {
        if !seen.insert(item) && reported.insert(item) {
            duplicates.push(item);
        }
    }
    duplicates
}
