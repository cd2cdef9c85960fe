use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use thiserror::Error;

use crate::api::ContactStore;
use crate::api::error::ApiError;
use crate::api::models::{Contact, ListQuery, PaginationInfo};
use crate::confirm::PendingDelete;

pub const DEFAULT_LIMIT: u32 = 10;

/// What the listing is currently showing. `total` and `total_pages` in
/// `pagination` are only meaningful once a response has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryViewState {
    pub search: String,
    pub pagination: PaginationInfo,
    pub contacts: Vec<Contact>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for DirectoryViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            pagination: PaginationInfo::new(1, DEFAULT_LIMIT, 0),
            contacts: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("page must be a positive integer, got {0}")]
    InvalidPage(u32),
    #[error("page size must be a positive integer")]
    InvalidLimit,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the visible list.
    Applied,
    /// A newer fetch was issued before this one completed; its result was dropped.
    Superseded,
}

/// Searchable, paginated view over the contact store.
///
/// Every trigger (initial load, search, page change, refresh, confirmed
/// delete) goes through the same fetch path. Each fetch takes a sequence
/// number when it is issued and is applied only if no newer fetch has been
/// issued since, so a slow response can never overwrite a newer one.
pub struct Directory {
    store: Arc<dyn ContactStore>,
    state: Mutex<DirectoryViewState>,
    latest: AtomicU64,
}

impl Directory {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self {
            store,
            state: Mutex::new(DirectoryViewState::default()),
            latest: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DirectoryViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> DirectoryViewState {
        self.lock().clone()
    }

    pub fn search(&self) -> String {
        self.lock().search.clone()
    }

    pub fn pagination(&self) -> PaginationInfo {
        self.lock().pagination
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Initial fetch when the view is opened.
    pub async fn load(&self) -> Result<FetchOutcome, DirectoryError> {
        self.fetch().await
    }

    /// A new search term starts over from the first page. Empty means no filter.
    pub async fn set_search(&self, text: impl Into<String>) -> Result<FetchOutcome, DirectoryError> {
        {
            let mut state = self.lock();
            state.search = text.into();
            state.pagination.page = 1;
        }
        self.fetch().await
    }

    /// Pages past the end are not clamped; the store's answer is shown as is.
    pub async fn set_page(&self, page: u32) -> Result<FetchOutcome, DirectoryError> {
        if page == 0 {
            return Err(DirectoryError::InvalidPage(page));
        }
        self.lock().pagination.page = page;
        self.fetch().await
    }

    pub async fn set_limit(&self, limit: u32) -> Result<FetchOutcome, DirectoryError> {
        if limit == 0 {
            return Err(DirectoryError::InvalidLimit);
        }
        {
            let mut state = self.lock();
            state.pagination.limit = limit;
            state.pagination.page = 1;
        }
        self.fetch().await
    }

    /// Re-fetches the current search/page/limit. Used after any mutation.
    pub async fn refresh(&self) -> Result<FetchOutcome, DirectoryError> {
        self.fetch().await
    }

    pub fn request_delete(&self, id: impl Into<String>) -> PendingDelete {
        PendingDelete::new(id)
    }

    /// Deletes the contact and re-fetches the list. On failure the list is
    /// left as it was and the error is recorded for display.
    pub async fn confirm_delete(&self, pending: PendingDelete) -> Result<FetchOutcome, DirectoryError> {
        let id = pending.into_id();
        if let Err(err) = self.store.delete(&id).await {
            warn!("deleting contact {id} failed: {err}");
            self.lock().error = Some(err.to_string());
            return Err(err.into());
        }
        debug!("contact {id} deleted, refreshing list");
        self.refresh().await
    }

    fn query(state: &DirectoryViewState) -> ListQuery {
        ListQuery {
            search: Some(state.search.clone()).filter(|s| !s.is_empty()),
            page: Some(state.pagination.page),
            limit: Some(state.pagination.limit),
            ..Default::default()
        }
    }

    async fn fetch(&self) -> Result<FetchOutcome, DirectoryError> {
        let (seq, query) = {
            let mut state = self.lock();
            state.loading = true;
            let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            (seq, Self::query(&state))
        };

        let result = self.store.list(&query).await;

        let mut state = self.lock();
        if self.latest.load(Ordering::SeqCst) != seq {
            debug!("dropping contacts response #{seq}, a newer fetch is in flight");
            return Ok(FetchOutcome::Superseded);
        }
        state.loading = false;
        match result {
            Ok(resp) => {
                state.contacts = resp.data;
                state.pagination = resp.pagination;
                state.error = None;
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                warn!("loading contacts failed: {err}");
                state.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }
}
