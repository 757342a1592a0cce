use crate::domain::errors::ApiError;
use crate::domain::ports::{AccountApi, LocalStorage, Navigator, Notice, Notifier, Route};

const MISSING_FIELDS: &str = "Please fill all required fields";
const LOGIN_FAILED: &str = "Invalid username or password.";
const SESSION_NOT_SAVED: &str = "Logged in, but the session could not be saved";

// Login page: exchanges credentials for a token pair and stores it.
pub struct LoginPage<A, S, N, V> {
    pub api: A,
    pub storage: S,
    pub notifier: N,
    pub navigator: V,
    error: Option<String>,
}

impl<A, S, N, V> LoginPage<A, S, N, V>
where
    A: AccountApi,
    S: LocalStorage,
    N: Notifier,
    V: Navigator,
{
    pub fn new(api: A, storage: S, notifier: N, navigator: V) -> Self {
        Self {
            api,
            storage,
            notifier,
            navigator,
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn submit(&mut self, username: &str, password: &str) -> bool {
        self.error = None;
        if username.is_empty() || password.is_empty() {
            self.error = Some(MISSING_FIELDS.to_string());
            return false;
        }

        let session = match self.api.login(username, password).await {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "login rejected");
                self.error = Some(match &err {
                    ApiError::Validation(fields) if !fields.is_empty() => fields.summary(),
                    other => other.upstream_message().unwrap_or(LOGIN_FAILED).to_string(),
                });
                return false;
            }
        };

        if let Err(err) = session.persist(&self.storage) {
            tracing::error!(error = %err, "failed to store tokens");
            self.error = Some(SESSION_NOT_SAVED.to_string());
            return false;
        }

        self.notifier.notify(Notice::success("Login successful!"));
        self.navigator.push(Route::Home);
        true
    }
}
