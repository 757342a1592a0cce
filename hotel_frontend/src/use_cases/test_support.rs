use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use crate::domain::criteria::SearchQuery;
use crate::domain::errors::ApiError;
use crate::domain::hotel::{Hotel, StarRating};
use crate::domain::ports::{
    AccountApi, BookmarkRecord, Clock, HotelApi, Navigator, Notice, Notifier, Route, ThemeTarget,
};
use crate::domain::session::{Session, Theme};
use crate::domain::signup::SignupForm;

// Shared fixed date source for deterministic page tests.
pub(crate) struct FixedClock(pub(crate) NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub(crate) fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 10).expect("valid date")
}

pub(crate) fn test_session() -> Session {
    Session::new("access-token", "refresh-token")
}

pub(crate) fn hotel(id: &str, price: f64, stars: u32) -> Hotel {
    let mut hotel = Hotel::new(id, format!("Hotel {id}"));
    hotel.avg_price = Some(price);
    hotel.rating = StarRating::new(stars);
    hotel
}

pub(crate) fn ids(hotels: &[Hotel]) -> Vec<&str> {
    hotels.iter().map(|hotel| hotel.id.as_str()).collect()
}

// Every call a page made against the backend, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApiCall {
    Search(SearchQuery),
    ListBookmarks,
    BookmarkedHotels,
    AddBookmark(String),
    RemoveBookmark(String),
    Signup(SignupForm),
    Login(String),
    Logout(String),
}

#[derive(Default)]
struct Responses {
    search: Vec<Result<Vec<Hotel>, ApiError>>,
    bookmarks: Option<Result<Vec<BookmarkRecord>, ApiError>>,
    bookmarked_hotels: Option<Result<Vec<Hotel>, ApiError>>,
    bookmark_change: Option<ApiError>,
    signup: Option<ApiError>,
    login: Option<Result<Session, ApiError>>,
    logout: Option<ApiError>,
}

// Fake backend: records calls and replays scripted responses. Search responses are consumed
// in order; once exhausted every search returns an empty batch.
#[derive(Clone, Default)]
pub(crate) struct RecordingApi {
    calls: Arc<Mutex<Vec<ApiCall>>>,
    responses: Arc<Mutex<Responses>>,
    // When set, bookmark changes wait for a permit before answering.
    gate: Option<Arc<Notify>>,
}

impl RecordingApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn push_search(&self, response: Result<Vec<Hotel>, ApiError>) {
        self.responses.lock().expect("responses mutex poisoned").search.push(response);
    }

    pub(crate) fn set_bookmarks(&self, response: Result<Vec<BookmarkRecord>, ApiError>) {
        self.responses.lock().expect("responses mutex poisoned").bookmarks = Some(response);
    }

    pub(crate) fn set_bookmarked_hotels(&self, response: Result<Vec<Hotel>, ApiError>) {
        self.responses.lock().expect("responses mutex poisoned").bookmarked_hotels = Some(response);
    }

    pub(crate) fn fail_bookmark_changes(&self, err: ApiError) {
        self.responses.lock().expect("responses mutex poisoned").bookmark_change = Some(err);
    }

    pub(crate) fn fail_signup(&self, err: ApiError) {
        self.responses.lock().expect("responses mutex poisoned").signup = Some(err);
    }

    pub(crate) fn set_login(&self, response: Result<Session, ApiError>) {
        self.responses.lock().expect("responses mutex poisoned").login = Some(response);
    }

    pub(crate) fn fail_logout(&self, err: ApiError) {
        self.responses.lock().expect("responses mutex poisoned").logout = Some(err);
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(crate) fn search_pages(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Search(query) => Some(query.next_page),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }

    async fn bookmark_change(&self) -> Result<(), ApiError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.responses.lock().expect("responses mutex poisoned").bookmark_change {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HotelApi for RecordingApi {
    async fn search_hotels(
        &self,
        _session: &Session,
        query: &SearchQuery,
    ) -> Result<Vec<Hotel>, ApiError> {
        self.record(ApiCall::Search(query.clone()));
        let mut responses = self.responses.lock().expect("responses mutex poisoned");
        if responses.search.is_empty() {
            return Ok(Vec::new());
        }
        responses.search.remove(0)
    }

    async fn list_bookmarks(&self, _session: &Session) -> Result<Vec<BookmarkRecord>, ApiError> {
        self.record(ApiCall::ListBookmarks);
        let responses = self.responses.lock().expect("responses mutex poisoned");
        responses.bookmarks.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn bookmarked_hotels(&self, _session: &Session) -> Result<Vec<Hotel>, ApiError> {
        self.record(ApiCall::BookmarkedHotels);
        let responses = self.responses.lock().expect("responses mutex poisoned");
        responses.bookmarked_hotels.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn add_bookmark(&self, _session: &Session, hotel_code: &str) -> Result<(), ApiError> {
        self.record(ApiCall::AddBookmark(hotel_code.to_string()));
        self.bookmark_change().await
    }

    async fn remove_bookmark(&self, _session: &Session, hotel_code: &str) -> Result<(), ApiError> {
        self.record(ApiCall::RemoveBookmark(hotel_code.to_string()));
        self.bookmark_change().await
    }
}

#[async_trait]
impl AccountApi for RecordingApi {
    async fn signup(&self, form: &SignupForm) -> Result<(), ApiError> {
        self.record(ApiCall::Signup(form.clone()));
        match &self.responses.lock().expect("responses mutex poisoned").signup {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn login(&self, username: &str, _password: &str) -> Result<Session, ApiError> {
        self.record(ApiCall::Login(username.to_string()));
        let responses = self.responses.lock().expect("responses mutex poisoned");
        responses.login.clone().unwrap_or_else(|| Ok(test_session()))
    }

    async fn logout(&self, session: &Session) -> Result<(), ApiError> {
        self.record(ApiCall::Logout(session.refresh_token.clone()));
        match &self.responses.lock().expect("responses mutex poisoned").logout {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notices mutex poisoned").clone()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.notices().into_iter().map(|notice| notice.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notices mutex poisoned").push(notice);
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingNavigator {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub(crate) fn routes(&self) -> Vec<Route> {
        self.routes.lock().expect("routes mutex poisoned").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: Route) {
        self.routes.lock().expect("routes mutex poisoned").push(route);
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingTheme {
    applied: Arc<Mutex<Vec<Theme>>>,
}

impl RecordingTheme {
    pub(crate) fn applied(&self) -> Vec<Theme> {
        self.applied.lock().expect("theme mutex poisoned").clone()
    }
}

impl ThemeTarget for RecordingTheme {
    fn apply(&self, theme: Theme) {
        self.applied.lock().expect("theme mutex poisoned").push(theme);
    }
}
