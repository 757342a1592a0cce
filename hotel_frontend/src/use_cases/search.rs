use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::criteria::{ResultAccumulation, SearchCriteria};
use crate::domain::errors::{ApiError, CriteriaError};
use crate::domain::filter::{SortOrder, sort_hotels};
use crate::domain::hotel::Hotel;
use crate::domain::location;
use crate::domain::ports::{HotelApi, Notice, Notifier};
use crate::domain::session::Session;

pub const LOCATION_REQUIRED: &str = "Please select a location";
pub const FETCH_FAILED: &str = "Failed to fetch hotels. Please try again.";
const BOOKMARK_FAILED: &str = "Failed to update bookmark";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Success,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    // Another toggle for the same hotel was still in flight.
    Dropped,
    Reverted,
}

#[derive(Default)]
struct LedgerState {
    marked: HashSet<String>,
    in_flight: HashSet<String>,
}

/// Optimistic bookmark flags keyed by hotel id.
///
/// At most one request per hotel is in flight. A toggle arriving while one is pending is
/// dropped, so a failed request can always revert to the state it started from.
#[derive(Default)]
pub struct BookmarkLedger {
    state: Mutex<LedgerState>,
}

impl BookmarkLedger {
    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Replaces the known bookmarks, keeping hotels with a pending toggle untouched.
    pub fn replace_all(&self, codes: impl IntoIterator<Item = String>) {
        let mut state = self.lock();
        let pending: Vec<(String, bool)> = state
            .in_flight
            .iter()
            .map(|id| (id.clone(), state.marked.contains(id)))
            .collect();
        state.marked = codes.into_iter().collect();
        for (id, marked) in pending {
            if marked {
                state.marked.insert(id);
            } else {
                state.marked.remove(&id);
            }
        }
    }

    pub fn is_marked(&self, id: &str) -> bool {
        self.lock().marked.contains(id)
    }

    pub fn is_in_flight(&self, id: &str) -> bool {
        self.lock().in_flight.contains(id)
    }

    // Flips the flag optimistically and returns the new value, or None when a toggle is pending.
    pub fn begin(&self, id: &str) -> Option<bool> {
        let mut state = self.lock();
        if !state.in_flight.insert(id.to_string()) {
            return None;
        }
        let marked = !state.marked.contains(id);
        if marked {
            state.marked.insert(id.to_string());
        } else {
            state.marked.remove(id);
        }
        Some(marked)
    }

    // Ends the pending toggle; on failure the flag goes back to its value before `begin`.
    pub fn finish(&self, id: &str, marked: bool, succeeded: bool) {
        let mut state = self.lock();
        state.in_flight.remove(id);
        if succeeded {
            return;
        }
        if marked {
            state.marked.remove(id);
        } else {
            state.marked.insert(id.to_string());
        }
    }
}

// Search & filter page: criteria form, paginated results and bookmark toggles.
pub struct SearchPage<A, N> {
    pub api: A,
    pub notifier: N,
    pub criteria: SearchCriteria,
    session: Session,
    accumulation: ResultAccumulation,
    hotels: Vec<Hotel>,
    status: SearchStatus,
    next_page: u32,
    location_required: bool,
    bookmarks: BookmarkLedger,
}

impl<A, N> SearchPage<A, N>
where
    A: HotelApi,
    N: Notifier,
{
    pub fn new(
        api: A,
        notifier: N,
        session: Session,
        criteria: SearchCriteria,
        accumulation: ResultAccumulation,
    ) -> Self {
        Self {
            api,
            notifier,
            criteria,
            session,
            accumulation,
            hotels: Vec::new(),
            status: SearchStatus::Idle,
            next_page: 1,
            location_required: false,
            bookmarks: BookmarkLedger::default(),
        }
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn location_required(&self) -> bool {
        self.location_required
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.is_marked(id)
    }

    #[tracing::instrument(skip_all, fields(location = ?location_code))]
    pub async fn mount(&mut self, location_code: Option<&str>) {
        self.prefetch_bookmarks().await;

        if let Some(code) = location_code {
            self.criteria.location = location::name_for_code(code).unwrap_or(code).to_string();
            self.fetch(1).await;
        }
    }

    // Silent: a failed prefetch only means bookmark icons start empty.
    async fn prefetch_bookmarks(&self) {
        match self.api.list_bookmarks(&self.session).await {
            Ok(records) => self
                .bookmarks
                .replace_all(records.into_iter().map(|record| record.hotel_code)),
            Err(ApiError::NotFound(_)) => self.bookmarks.replace_all(Vec::new()),
            Err(err) => tracing::warn!(error = %err, "bookmark prefetch failed"),
        }
    }

    pub async fn search(&mut self) {
        self.fetch(1).await;
    }

    pub async fn apply_filters(&mut self) {
        self.fetch(1).await;
    }

    pub async fn retry(&mut self) {
        self.fetch(1).await;
    }

    pub async fn load_more(&mut self) {
        self.fetch(self.next_page).await;
    }

    pub async fn reset_filters(&mut self) {
        self.criteria.reset_filters();
        if !self.criteria.location.trim().is_empty() {
            self.fetch(1).await;
        }
    }

    pub fn sort(&mut self, order: SortOrder) {
        sort_hotels(&mut self.hotels, order);
    }

    #[tracing::instrument(skip(self), fields(location = %self.criteria.location))]
    async fn fetch(&mut self, page: u32) {
        let query = match self.criteria.to_query(page) {
            Ok(query) => query,
            Err(CriteriaError::LocationRequired) => {
                self.location_required = true;
                self.notifier.notify(Notice::error(LOCATION_REQUIRED));
                return;
            }
        };
        self.location_required = false;
        self.status = SearchStatus::Loading;

        let result = match self.api.search_hotels(&self.session, &query).await {
            Err(ApiError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        };

        match result {
            Ok(batch) => {
                let count = batch.len();
                if page > 1 && self.accumulation == ResultAccumulation::Append {
                    self.hotels.extend(batch);
                } else {
                    self.hotels = batch;
                }
                self.next_page = page + 1;
                self.status = SearchStatus::Success;
                tracing::info!(count, "hotel search succeeded");
                self.notifier.notify(Notice::success(format!("Found {count} hotels")));
            }
            Err(err) => {
                tracing::error!(error = %err, "hotel search failed");
                if page == 1 {
                    self.hotels.clear();
                }
                self.status = SearchStatus::Failed(FETCH_FAILED.to_string());
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_bookmark(&self, hotel_id: &str) -> ToggleOutcome {
        let Some(marked) = self.bookmarks.begin(hotel_id) else {
            tracing::debug!("bookmark toggle already in flight");
            return ToggleOutcome::Dropped;
        };

        let result = if marked {
            self.api.add_bookmark(&self.session, hotel_id).await
        } else {
            self.api.remove_bookmark(&self.session, hotel_id).await
        };
        self.bookmarks.finish(hotel_id, marked, result.is_ok());

        match result {
            Ok(()) if marked => {
                self.notifier.notify(Notice::success("Hotel added to bookmarks!"));
                ToggleOutcome::Added
            }
            Ok(()) => {
                self.notifier.notify(Notice::info("Hotel removed from bookmarks"));
                ToggleOutcome::Removed
            }
            Err(err) => {
                tracing::error!(error = %err, "bookmark update failed");
                let message = err.upstream_message().unwrap_or(BOOKMARK_FAILED);
                self.notifier.notify(Notice::error(message));
                ToggleOutcome::Reverted
            }
        }
    }
}
