//! List screens: query state, debounced search, fetch fencing and
//! page-local sorting.

mod controller;
mod debounce;
mod sort;
mod source;

pub use controller::{FetchOutcome, FetchTicket, LIST_LOAD_FAILED, ListController};
pub use debounce::Debouncer;
pub use sort::{SortKey, locale_sort};
pub use source::{ListEndpoint, ListSource};

use shared::models::Parent;

fn parent_name(parent: &Parent) -> &str {
    &parent.full_name
}

fn parent_relationship(parent: &Parent) -> &str {
    parent.relationship.as_str()
}

/// Page-local order of the parent management screen: name, then
/// relationship
pub fn sort_parents_page(parents: &mut [Parent]) {
    locale_sort(parents, &[parent_name, parent_relationship]);
}
