use crate::domain::ports::{LocalStorage, Navigator, Notice, Notifier, Route};
use crate::domain::session::Session;

pub const LOGIN_REQUIRED: &str = "Please login to access this page";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Authenticated(Session),
    Redirected,
}

/// Gate in front of pages that need a logged-in user.
///
/// Only token presence is checked; expired or forged tokens pass and fail later at the backend.
pub struct AuthGuard<S, N, V> {
    pub storage: S,
    pub notifier: N,
    pub navigator: V,
    state: GuardState,
}

impl<S, N, V> AuthGuard<S, N, V>
where
    S: LocalStorage,
    N: Notifier,
    V: Navigator,
{
    pub fn new(storage: S, notifier: N, navigator: V) -> Self {
        Self {
            storage,
            notifier,
            navigator,
            state: GuardState::Loading,
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    pub fn mount(&mut self) -> &GuardState {
        let session = match Session::load(&self.storage) {
            Ok(session) => session,
            Err(err) => {
                tracing::error!(error = %err, "failed to read stored tokens");
                None
            }
        };

        self.state = match session {
            Some(session) => GuardState::Authenticated(session),
            None => {
                self.notifier.notify(Notice::error(LOGIN_REQUIRED));
                self.navigator.push(Route::Login);
                GuardState::Redirected
            }
        };
        &self.state
    }

    // Builds the wrapped page only for an authenticated session.
    pub fn render<P>(&self, page: impl FnOnce(&Session) -> P) -> Option<P> {
        match &self.state {
            GuardState::Authenticated(session) => Some(page(session)),
            GuardState::Loading | GuardState::Redirected => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface_adapters::storage::MemoryStorage;
    use crate::use_cases::test_support::{RecordingNavigator, RecordingNotifier, test_session};

    #[test]
    fn when_tokens_are_missing_then_guard_redirects_to_login() {
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let mut guard = AuthGuard::new(MemoryStorage::default(), notifier.clone(), navigator.clone());
        assert_eq!(guard.state(), &GuardState::Loading);

        guard.mount();

        assert_eq!(guard.state(), &GuardState::Redirected);
        assert_eq!(navigator.routes(), vec![Route::Login]);
        assert_eq!(notifier.messages(), vec![LOGIN_REQUIRED.to_string()]);
        assert_eq!(guard.render(|_| "page"), None);
    }

    #[test]
    fn when_both_tokens_are_present_then_page_renders() {
        let storage = MemoryStorage::default();
        test_session().persist(&storage).expect("persist succeeds");
        let navigator = RecordingNavigator::default();
        let mut guard = AuthGuard::new(storage, RecordingNotifier::default(), navigator.clone());

        guard.mount();

        assert_eq!(guard.state(), &GuardState::Authenticated(test_session()));
        assert_eq!(guard.render(|session| session.access_token.clone()), Some("access-token".to_string()));
        assert!(navigator.routes().is_empty());
    }

    #[test]
    fn when_guard_has_not_mounted_then_nothing_renders() {
        let guard = AuthGuard::new(
            MemoryStorage::default(),
            RecordingNotifier::default(),
            RecordingNavigator::default(),
        );

        assert_eq!(guard.render(|_| ()), None);
    }
}
