//! Paginated list controller.
//!
//! Owns the query of one list screen (search, sort, filters, page) and the
//! page currently rendered. Every fetch is stamped with a sequence number;
//! only a response newer than the last applied one may replace the page.

use std::time::{Duration, Instant};

use shared::{ListQuery, ListResponse, PageButton, page_buttons, total_pages};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::debounce::Debouncer;
use super::source::ListSource;
use crate::{ClientError, ClientResult};

/// Shown when the backend says `success: false` without a message
pub const LIST_LOAD_FAILED: &str = "Could not load the list.";

type PageSort<T> = Box<dyn Fn(&mut [T]) + Send + Sync>;

/// A fetch that has been started but not applied yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The query this fetch must be sent with
    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// What a completed fetch did to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded,
    /// Page cleared; carries the message to show, `None` for a silent abort
    Failed(Option<String>),
    /// A newer response was already applied
    Discarded,
}

pub struct ListController<T, S> {
    source: S,
    query: ListQuery,
    raw_search: String,
    search: Debouncer<String>,
    items: Vec<T>,
    total_count: u64,
    total_pages: u32,
    message: Option<String>,
    page_sort: Option<PageSort<T>>,
    next_seq: u64,
    applied_seq: u64,
    dirty: bool,
}

impl<T, S> std::fmt::Debug for ListController<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("query", &self.query)
            .field("raw_search", &self.raw_search)
            .field("items", &self.items.len())
            .field("total_count", &self.total_count)
            .field("total_pages", &self.total_pages)
            .field("applied_seq", &self.applied_seq)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<T, S> ListController<T, S>
where
    T: Send,
    S: ListSource<T>,
{
    /// A controller that has not loaded anything yet (`is_dirty()` is true)
    pub fn new(source: S, query: ListQuery, search_debounce: Duration) -> Self {
        Self {
            source,
            raw_search: query.search_term.clone(),
            query,
            search: Debouncer::new(search_debounce),
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            message: None,
            page_sort: None,
            next_seq: 0,
            applied_seq: 0,
            dirty: true,
        }
    }

    /// Re-order every loaded page locally. The server sort still decides
    /// which records are on the page.
    pub fn with_page_sort(mut self, sort: impl Fn(&mut [T]) + Send + Sync + 'static) -> Self {
        self.page_sort = Some(Box::new(sort));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // ========== Inputs ==========

    /// Raw search box input. Nothing is committed until the debounce settles.
    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.set_search_term_at(text, now());
    }

    pub fn set_search_term_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.raw_search = text.clone();
        self.search.push(text, now);
    }

    /// Commit the search term if its quiet period is over. Returns `true`
    /// when the committed term changed (and the page went back to 1).
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(term) => self.commit_search(&term),
            None => false,
        }
    }

    /// Commit the pending search term right away (Enter key)
    pub fn submit_search(&mut self) -> bool {
        match self.search.flush() {
            Some(term) => self.commit_search(&term),
            None => false,
        }
    }

    /// Wait out the debounce and commit
    pub async fn settle_search(&mut self) -> bool {
        let Some(deadline) = self.search.deadline() else {
            return false;
        };
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        self.poll_search(deadline.max(now()))
    }

    fn commit_search(&mut self, term: &str) -> bool {
        let changed = self.query.set_search_term(term);
        if changed {
            debug!(term = %self.query.search_term, "Search term committed");
            self.dirty = true;
        }
        changed
    }

    pub fn set_sort(&mut self, column: &str) {
        self.query.toggle_sort(column);
        self.dirty = true;
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.set_filter(key, value);
        self.dirty = true;
    }

    /// Jump to page `n`. Keeping `n` within `[1, total_pages]` is up to the
    /// caller.
    pub fn set_page(&mut self, n: u32) {
        self.query.set_page(n);
        self.dirty = true;
    }

    pub fn set_page_size(&mut self, size: u32) {
        self.query.set_page_size(size);
        self.dirty = true;
    }

    // ========== Fetching ==========

    /// Stamp a new fetch with the current query
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_seq += 1;
        self.dirty = false;
        FetchTicket {
            seq: self.next_seq,
            query: self.query.clone(),
        }
    }

    /// Apply the result of a fetch. Never fails: errors become an empty
    /// page plus a message.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: ClientResult<ListResponse<T>>,
    ) -> FetchOutcome {
        if ticket.seq <= self.applied_seq {
            debug!(
                seq = ticket.seq,
                applied = self.applied_seq,
                "Discarding stale list response"
            );
            return FetchOutcome::Discarded;
        }
        self.applied_seq = ticket.seq;

        match result {
            Ok(response) if response.success => {
                let mut items = response.data.unwrap_or_default();
                if let Some(sort) = &self.page_sort {
                    sort(&mut items);
                }
                self.total_count = response.total_count;
                self.total_pages = if response.total_pages == 0 && response.total_count > 0 {
                    total_pages(response.total_count, ticket.query.page_size)
                } else {
                    response.total_pages
                };
                self.items = items;
                self.message = None;
                debug!(
                    seq = ticket.seq,
                    count = self.total_count,
                    pages = self.total_pages,
                    "List page loaded"
                );
                FetchOutcome::Loaded
            }
            Ok(response) => {
                let message = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| LIST_LOAD_FAILED.to_string());
                warn!(seq = ticket.seq, message = %message, "List request rejected");
                self.fail(Some(message))
            }
            Err(ClientError::Cancelled) => {
                debug!(seq = ticket.seq, "List request cancelled");
                self.fail(None)
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "List request failed");
                self.fail(Some(e.user_message()))
            }
        }
    }

    fn fail(&mut self, message: Option<String>) -> FetchOutcome {
        self.items.clear();
        self.total_count = 0;
        self.total_pages = 0;
        self.message = message.clone();
        FetchOutcome::Failed(message)
    }

    /// Load the page for the current query
    pub async fn fetch(&mut self) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = self.source.fetch_page(&ticket.query).await;
        self.complete_fetch(ticket, result)
    }

    /// Like [`fetch`](Self::fetch), but gives up when `cancel` fires
    pub async fn fetch_cancellable(&mut self, cancel: &CancellationToken) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = tokio::select! {
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.source.fetch_page(&ticket.query) => result,
        };
        self.complete_fetch(ticket, result)
    }

    /// Fetch only if an input changed since the last fetch
    pub async fn refresh(&mut self) -> Option<FetchOutcome> {
        if self.dirty {
            Some(self.fetch().await)
        } else {
            None
        }
    }

    // ========== Rendered state ==========

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// What is in the search box, committed or not
    pub fn search_text(&self) -> &str {
        &self.raw_search
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page_index(&self) -> u32 {
        self.query.page_index
    }

    /// Failure message of the last applied fetch
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn page_buttons(&self) -> Vec<PageButton> {
        page_buttons(self.total_pages, self.query.page_index)
    }

    /// An input changed since the last fetch was started
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}
