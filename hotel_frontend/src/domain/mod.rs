// Domain layer: hotel records, search and filter rules, session and ports.

pub mod criteria;
pub mod errors;
pub mod filter;
pub mod hotel;
pub mod location;
pub mod ports;
pub mod session;
pub mod signup;

pub use criteria::{ResultAccumulation, SearchCriteria, SearchQuery, StarSelection};
pub use errors::{ApiError, CriteriaError, StorageError};
pub use filter::{BookmarkFilter, PriceRange, SortOrder};
pub use hotel::{Hotel, StarRating};
pub use ports::{
    AccountApi, BookmarkRecord, Clock, HotelApi, LocalStorage, Navigator, Notice, NoticeLevel,
    Notifier, Route, ThemeTarget,
};
pub use session::{Session, Theme};
pub use signup::{FieldErrors, PasswordRule, SignupError, SignupForm};
