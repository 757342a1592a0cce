use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::criteria::SearchQuery;
use crate::domain::errors::{ApiError, StorageError};
use crate::domain::hotel::Hotel;
use crate::domain::session::{Session, Theme};
use crate::domain::signup::SignupForm;

// Pages depend on these traits, not on the concrete reqwest client or the file store.

// One row of GET /bookmarks/.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkRecord {
    pub hotel_code: String,
    pub date_added: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait HotelApi: Send + Sync {
    async fn search_hotels(&self, session: &Session, query: &SearchQuery)
    -> Result<Vec<Hotel>, ApiError>;
    async fn list_bookmarks(&self, session: &Session) -> Result<Vec<BookmarkRecord>, ApiError>;
    async fn bookmarked_hotels(&self, session: &Session) -> Result<Vec<Hotel>, ApiError>;
    async fn add_bookmark(&self, session: &Session, hotel_code: &str) -> Result<(), ApiError>;
    async fn remove_bookmark(&self, session: &Session, hotel_code: &str) -> Result<(), ApiError>;
}

#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn signup(&self, form: &SignupForm) -> Result<(), ApiError>;
    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError>;
    async fn logout(&self, session: &Session) -> Result<(), ApiError>;
}

// Synchronous key/value store for tokens and preferences, read at page mount.
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

// Transient user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    SearchFilter { location: Option<String> },
    Bookmarks,
    HotelDetails { hotel_id: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::SearchFilter { location: Some(code) } => format!("/search-filter?location={code}"),
            Route::SearchFilter { location: None } => "/search-filter".to_string(),
            Route::Bookmarks => "/bookmarks".to_string(),
            Route::HotelDetails { hotel_id } => format!("/hotel-details/{hotel_id}"),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}

// Document-level styling hook toggled by the theme switch.
pub trait ThemeTarget: Send + Sync {
    fn apply(&self, theme: Theme);
}

// Port for retrieving the current date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
