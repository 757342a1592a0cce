use std::time::Duration;

use crate::domain::errors::ApiError;
use crate::domain::ports::{AccountApi, Navigator, Notice, Notifier, Route};
use crate::domain::signup::{SignupForm, validate_password};

pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1000);
const SIGNUP_FAILED: &str = "Failed to create account \n Please try again later.";

// Live hints shown under the password field while typing.
pub fn password_hints(password: &str) -> Vec<&'static str> {
    validate_password(password)
        .iter()
        .map(|rule| rule.message())
        .collect()
}

pub struct SignupPage<A, N, V> {
    pub api: A,
    pub notifier: N,
    pub navigator: V,
    redirect_delay: Duration,
    error: Option<String>,
}

impl<A, N, V> SignupPage<A, N, V>
where
    A: AccountApi,
    N: Notifier,
    V: Navigator,
{
    pub fn new(api: A, notifier: N, navigator: V) -> Self {
        Self {
            api,
            notifier,
            navigator,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            error: None,
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    // Inline error under the form; lines are separated by '\n'.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[tracing::instrument(skip_all, fields(username = %form.username))]
    pub async fn submit(&mut self, form: &SignupForm) -> bool {
        self.error = None;
        if let Err(err) = form.validate() {
            self.error = Some(err.message().to_string());
            return false;
        }

        match self.api.signup(form).await {
            Ok(()) => {
                tracing::info!("account created");
                self.notifier
                    .notify(Notice::success("Account created successfully! Redirecting to login..."));
                tokio::time::sleep(self.redirect_delay).await;
                self.navigator.push(Route::Login);
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "registration failed");
                self.error = Some(match &err {
                    ApiError::Validation(fields) => fields.summary(),
                    other => other.upstream_message().unwrap_or(SIGNUP_FAILED).to_string(),
                });
                false
            }
        }
    }
}
