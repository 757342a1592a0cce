use crate::domain::errors::StorageError;
use crate::domain::ports::{AccountApi, LocalStorage, Navigator, Route, ThemeTarget};
use crate::domain::session::{Session, Theme};

// Global navigation chrome: theme switch, login state and logout.
pub struct Navbar<A, S, V, T> {
    pub api: A,
    pub storage: S,
    pub navigator: V,
    pub theme_target: T,
    theme: Theme,
    session: Option<Session>,
    username: Option<String>,
}

impl<A, S, V, T> Navbar<A, S, V, T>
where
    A: AccountApi,
    S: LocalStorage,
    V: Navigator,
    T: ThemeTarget,
{
    pub fn new(api: A, storage: S, navigator: V, theme_target: T) -> Self {
        Self {
            api,
            storage,
            navigator,
            theme_target,
            theme: Theme::default(),
            session: None,
            username: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn mount(&mut self) -> Result<(), StorageError> {
        self.theme = Theme::load(&self.storage)?;
        self.theme_target.apply(self.theme);
        self.session = Session::load(&self.storage)?;
        self.username = self.session.as_ref().and_then(Session::username);
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let theme = self.theme.toggled();
        theme.persist(&self.storage)?;
        self.theme = theme;
        self.theme_target.apply(theme);
        Ok(theme)
    }

    pub fn login(&self) {
        if !self.is_logged_in() {
            self.navigator.push(Route::Login);
        }
    }

    /// Logs out locally no matter what the backend says.
    ///
    /// The logout call is best effort: failures are logged and the stored tokens are
    /// cleared anyway before going back home.
    #[tracing::instrument(skip_all)]
    pub async fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            match self.api.logout(&session).await {
                Ok(()) => tracing::info!("logout succeeded"),
                Err(err) => {
                    tracing::warn!(error = %err, "logout call failed; clearing local session anyway")
                }
            }
        }

        if let Err(err) = Session::clear(&self.storage) {
            tracing::error!(error = %err, "failed to clear stored tokens");
        }
        self.username = None;
        self.navigator.push(Route::Home);
    }
}
