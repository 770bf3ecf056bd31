//! Dynamic form rows.
//!
//! Forms such as the medication request let the user add and remove
//! lines. Each line gets a stable [`RowId`] and carries its own UI state
//! (search box text, suggestion dropdown) next to its data, so removing
//! one row never shifts another row's state.

use uuid::Uuid;

/// Suggestions shown under a row's search box
pub const MAX_SUGGESTIONS: usize = 8;

/// Stable identifier of a form row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(Uuid);

impl RowId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row-{}", self.0.simple())
    }
}

/// Row-local search/dropdown state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowUi {
    pub search_text: String,
    pub dropdown_open: bool,
    pub suggestions: Vec<String>,
    pub highlighted: Option<usize>,
}

impl RowUi {
    /// Update the search text and recompute suggestions from `candidates`
    /// (case-insensitive substring match, at most [`MAX_SUGGESTIONS`]).
    pub fn search<'a, I>(&mut self, text: &str, candidates: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.search_text = text.to_string();
        let needle = text.trim().to_lowercase();
        self.suggestions = if needle.is_empty() {
            Vec::new()
        } else {
            candidates
                .into_iter()
                .filter(|c| c.to_lowercase().contains(&needle))
                .take(MAX_SUGGESTIONS)
                .map(str::to_string)
                .collect()
        };
        self.dropdown_open = !self.suggestions.is_empty();
        self.highlighted = self.dropdown_open.then_some(0);
    }

    /// Move the highlight down (`+1`) or up (`-1`), wrapping around
    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.suggestions.len();
        if len == 0 {
            return;
        }
        let current = self.highlighted.unwrap_or(0) as isize;
        self.highlighted = Some((current + delta).rem_euclid(len as isize) as usize);
    }

    /// Pick a suggestion; closes the dropdown and returns the picked text
    pub fn select(&mut self, index: usize) -> Option<String> {
        let picked = self.suggestions.get(index).cloned()?;
        self.search_text = picked.clone();
        self.close();
        Some(picked)
    }

    /// Pick the highlighted suggestion
    pub fn select_highlighted(&mut self) -> Option<String> {
        let index = self.highlighted?;
        self.select(index)
    }

    pub fn close(&mut self) {
        self.dropdown_open = false;
        self.suggestions.clear();
        self.highlighted = None;
    }
}

/// One form row
#[derive(Debug, Clone)]
pub struct FormRow<T> {
    id: RowId,
    pub data: T,
    pub ui: RowUi,
}

impl<T> FormRow<T> {
    pub fn id(&self) -> RowId {
        self.id
    }
}

/// Ordered collection of form rows keyed by [`RowId`]
#[derive(Debug, Clone)]
pub struct RowArena<T> {
    rows: Vec<FormRow<T>>,
}

impl<T> Default for RowArena<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> RowArena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row and return its id
    pub fn add(&mut self, data: T) -> RowId {
        let id = RowId::generate();
        self.rows.push(FormRow {
            id,
            data,
            ui: RowUi::default(),
        });
        id
    }

    /// Remove a row; the remaining rows keep their ids and state
    pub fn remove(&mut self, id: RowId) -> Option<T> {
        let index = self.position(id)?;
        Some(self.rows.remove(index).data)
    }

    pub fn get(&self, id: RowId) -> Option<&FormRow<T>> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut FormRow<T>> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// Index of the row in display order
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormRow<T>> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FormRow<T>> {
        self.rows.iter_mut()
    }

    /// Row data in display order
    pub fn data(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|r| &r.data)
    }

    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
