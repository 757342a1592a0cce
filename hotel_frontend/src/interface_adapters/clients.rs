use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;
use url::form_urlencoded;

use crate::domain::criteria::SearchQuery;
use crate::domain::errors::ApiError;
use crate::domain::hotel::Hotel;
use crate::domain::ports::{AccountApi, BookmarkRecord, HotelApi};
use crate::domain::session::Session;
use crate::domain::signup::SignupForm;
use crate::interface_adapters::protocol::{
    AddBookmarkRequest, BookmarkDto, ErrorResponse, FieldErrorsResponse, HotelDto, LogoutRequest,
    TokenPairResponse,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Thin wrapper around reqwest for the hotel backend.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

// How a non-success body should be read.
#[derive(Clone, Copy)]
enum ErrorBody {
    Message,
    // 400 responses carry field-keyed validation errors.
    Fields,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn search_url(&self, query: &SearchQuery) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.url("/hotels/search/"))
            .map_err(|err| ApiError::Transport(format!("invalid backend url: {err}")))?;
        url.query_pairs_mut().extend_pairs(query.to_pairs());
        Ok(url)
    }

    fn form_body<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish()
    }

    async fn send(&self, request: RequestBuilder, body: ErrorBody) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Keep upstream status/message so pages can show the backend's wording.
        let bytes = response.bytes().await.unwrap_or_default();
        tracing::debug!(%status, "backend returned an error status");
        Err(match (status, body) {
            (StatusCode::UNAUTHORIZED, _) => ApiError::Unauthorized,
            (StatusCode::BAD_REQUEST, ErrorBody::Fields) => {
                match serde_json::from_slice::<FieldErrorsResponse>(&bytes) {
                    Ok(fields) => ApiError::Validation(fields.into()),
                    Err(_) => ApiError::Rejected {
                        status: status.as_u16(),
                        message: error_message(&bytes),
                    },
                }
            }
            (StatusCode::NOT_FOUND, _) => ApiError::NotFound(error_message(&bytes)),
            _ => ApiError::Rejected {
                status: status.as_u16(),
                message: error_message(&bytes),
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

fn error_message(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorResponse>(bytes)
        .ok()
        .and_then(ErrorResponse::into_message)
}

#[async_trait]
impl HotelApi for BackendClient {
    #[tracing::instrument(skip_all, fields(location = %query.location_code, page = query.next_page))]
    async fn search_hotels(
        &self,
        session: &Session,
        query: &SearchQuery,
    ) -> Result<Vec<Hotel>, ApiError> {
        let url = self.search_url(query)?;
        let request = self
            .http
            .post(url.as_str())
            .bearer_auth(&session.access_token);
        let response = self.send(request, ErrorBody::Message).await?;
        let hotels = Self::decode::<Vec<HotelDto>>(response).await?;
        tracing::debug!(count = hotels.len(), "search response decoded");
        Ok(hotels.into_iter().map(Hotel::from).collect())
    }

    async fn list_bookmarks(&self, session: &Session) -> Result<Vec<BookmarkRecord>, ApiError> {
        let request = self
            .http
            .get(self.url("/bookmarks/"))
            .bearer_auth(&session.access_token);
        let response = self.send(request, ErrorBody::Message).await?;
        let bookmarks = Self::decode::<Vec<BookmarkDto>>(response).await?;
        Ok(bookmarks.into_iter().map(BookmarkRecord::from).collect())
    }

    async fn bookmarked_hotels(&self, session: &Session) -> Result<Vec<Hotel>, ApiError> {
        let request = self
            .http
            .get(self.url("/bookmarks/search/"))
            .bearer_auth(&session.access_token);
        let response = self.send(request, ErrorBody::Message).await?;
        let hotels = Self::decode::<Vec<HotelDto>>(response).await?;
        Ok(hotels.into_iter().map(Hotel::from).collect())
    }

    #[tracing::instrument(skip(self, session))]
    async fn add_bookmark(&self, session: &Session, hotel_code: &str) -> Result<(), ApiError> {
        let request = self
            .http
            .post(self.url("/bookmarks/"))
            .bearer_auth(&session.access_token)
            .json(&AddBookmarkRequest { hotel_code });
        self.send(request, ErrorBody::Message).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, session))]
    async fn remove_bookmark(&self, session: &Session, hotel_code: &str) -> Result<(), ApiError> {
        let request = self
            .http
            .delete(self.url("/bookmarks/"))
            .bearer_auth(&session.access_token)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(Self::form_body([("hotel_code", hotel_code)]));
        self.send(request, ErrorBody::Message).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountApi for BackendClient {
    #[tracing::instrument(skip_all, fields(username = %form.username))]
    async fn signup(&self, form: &SignupForm) -> Result<(), ApiError> {
        let body = Self::form_body([
            ("username", form.username.as_str()),
            ("email", form.email.as_str()),
            ("password", form.password.as_str()),
        ]);
        let request = self
            .http
            .post(self.url("/accounts/signup/"))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        self.send(request, ErrorBody::Fields).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, password))]
    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let request = self
            .http
            .post(self.url("/accounts/login/"))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(Self::form_body([("username", username), ("password", password)]));
        let response = self.send(request, ErrorBody::Fields).await?;
        let tokens = Self::decode::<TokenPairResponse>(response).await?;
        Ok(tokens.into())
    }

    async fn logout(&self, session: &Session) -> Result<(), ApiError> {
        let request = self
            .http
            .post(self.url("/accounts/logout/"))
            .bearer_auth(&session.access_token)
            .json(&LogoutRequest {
                refresh: &session.refresh_token,
            });
        self.send(request, ErrorBody::Message).await?;
        Ok(())
    }
}
