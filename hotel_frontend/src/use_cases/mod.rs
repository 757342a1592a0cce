// Use cases layer: page controllers driving the backend through domain ports.

pub mod auth_guard;
pub mod autocomplete;
pub mod bookmarks;
pub mod home;
pub mod login;
pub mod navbar;
pub mod search;
pub mod signup;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_guard::{AuthGuard, GuardState};
pub use autocomplete::{Autocomplete, Bounds, Point, Suggestion};
pub use bookmarks::{BookmarksPage, BookmarksStatus};
pub use home::HomePage;
pub use login::LoginPage;
pub use navbar::Navbar;
pub use search::{BookmarkLedger, SearchPage, SearchStatus, ToggleOutcome};
pub use signup::{SignupPage, password_hints};
