//! Page-local sorting.
//!
//! The server owns the sort order of a list. Some screens additionally
//! re-order the rows of the page they are showing; that re-order never
//! touches other pages or the pagination counts.

use std::cmp::Ordering;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::preferences::CollationNumericOrdering;
use icu_collator::{Collator, CollatorPreferences};
use tracing::warn;

/// Key extractor for [`locale_sort`]
pub type SortKey<T> = fn(&T) -> &str;

/// Stable, locale-aware sort of one page by the given keys (first key
/// decides, later keys break ties). Accents and case only break ties.
pub fn locale_sort<T>(items: &mut [T], keys: &[SortKey<T>]) {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Secondary);
    let mut prefs = CollatorPreferences::default();
    prefs.numeric_ordering = Some(CollationNumericOrdering::True);

    match Collator::try_new(prefs, options) {
        Ok(collator) => {
            items.sort_by(|a, b| compare_by_keys(keys, a, b, |x, y| collator.compare(x, y)))
        }
        Err(e) => {
            warn!(error = %e, "Collator unavailable, falling back to case-insensitive sort");
            items.sort_by(|a, b| {
                compare_by_keys(keys, a, b, |x, y| x.to_lowercase().cmp(&y.to_lowercase()))
            })
        }
    }
}

fn compare_by_keys<T>(
    keys: &[SortKey<T>],
    a: &T,
    b: &T,
    compare: impl Fn(&str, &str) -> Ordering,
) -> Ordering {
    keys.iter()
        .map(|key| compare(key(a), key(b)))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}
