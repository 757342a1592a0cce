use crate::domain::errors::ApiError;
use crate::domain::filter::{BookmarkFilter, SortOrder, sort_hotels};
use crate::domain::hotel::Hotel;
use crate::domain::ports::{HotelApi, Notice, Notifier};
use crate::domain::session::Session;

pub const FETCH_FAILED: &str = "Failed to fetch bookmarked hotels";
const REMOVE_FAILED: &str = "Failed to remove bookmark";
const NO_MATCH: &str = "No hotels match your search criteria. Try adjusting your search or filters.";
const NOTHING_SAVED: &str =
    "You haven't bookmarked any hotels yet. Start exploring and save your favorites!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarksStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Bookmarks page.
///
/// The full bookmarked set is fetched once; searching, filtering and sorting only reshape
/// the in-memory copy.
pub struct BookmarksPage<A, N> {
    pub api: A,
    pub notifier: N,
    pub filter: BookmarkFilter,
    session: Session,
    all: Vec<Hotel>,
    displayed: Vec<Hotel>,
    status: BookmarksStatus,
}

impl<A, N> BookmarksPage<A, N>
where
    A: HotelApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N, session: Session) -> Self {
        Self {
            api,
            notifier,
            filter: BookmarkFilter::default(),
            session,
            all: Vec::new(),
            displayed: Vec::new(),
            status: BookmarksStatus::Loading,
        }
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.displayed
    }

    pub fn all_hotels(&self) -> &[Hotel] {
        &self.all
    }

    pub fn status(&self) -> &BookmarksStatus {
        &self.status
    }

    #[tracing::instrument(skip_all)]
    pub async fn mount(&mut self) {
        self.status = BookmarksStatus::Loading;
        let result = match self.api.bookmarked_hotels(&self.session).await {
            Err(ApiError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        };

        match result {
            Ok(hotels) => {
                tracing::info!(count = hotels.len(), "bookmarked hotels loaded");
                self.displayed = hotels.clone();
                self.all = hotels;
                self.status = BookmarksStatus::Ready;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch bookmarked hotels");
                self.status = BookmarksStatus::Failed(FETCH_FAILED.to_string());
            }
        }
    }

    pub async fn retry(&mut self) {
        self.mount().await;
    }

    pub fn search(&mut self) {
        self.displayed = self.filter.apply(&self.all, false);
    }

    pub fn apply_filters(&mut self) {
        self.displayed = self.filter.apply(&self.all, true);
        self.notifier.notify(Notice::info("Filters applied"));
    }

    pub fn clear_search(&mut self) {
        self.filter.query.clear();
        self.displayed = self.all.clone();
    }

    pub fn sort(&mut self, order: SortOrder) {
        sort_hotels(&mut self.displayed, order);
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove(&mut self, hotel_id: &str) -> bool {
        match self.api.remove_bookmark(&self.session, hotel_id).await {
            Ok(()) => {
                self.all.retain(|hotel| hotel.id != hotel_id);
                self.displayed.retain(|hotel| hotel.id != hotel_id);
                self.notifier.notify(Notice::info("Hotel removed from bookmarks"));
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to remove bookmark");
                let message = err.upstream_message().unwrap_or(REMOVE_FAILED);
                self.notifier.notify(Notice::error(message));
                false
            }
        }
    }

    // Message for an empty list, or None while there is something to show.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.displayed.is_empty() {
            return None;
        }
        if self.filter.query.is_empty() {
            Some(NOTHING_SAVED)
        } else {
            Some(NO_MATCH)
        }
    }
}
