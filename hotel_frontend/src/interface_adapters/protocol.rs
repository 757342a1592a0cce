use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::hotel::{Hotel, StarRating};
use crate::domain::ports::BookmarkRecord;
use crate::domain::session::Session;
use crate::domain::signup::FieldErrors;

// Wire DTOs of the hotel backend. Field names follow the backend's JSON.

// Hotel codes come back as numbers from search and as strings from bookmarks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HotelCode {
    Number(i64),
    Text(String),
}

impl HotelCode {
    pub fn into_string(self) -> String {
        match self {
            HotelCode::Number(code) => code.to_string(),
            HotelCode::Text(code) => code,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RatingValue {
    Number(f64),
    Text(String),
}

impl From<RatingValue> for StarRating {
    fn from(value: RatingValue) -> Self {
        match value {
            RatingValue::Number(stars) if stars.is_finite() && stars >= 1.0 => {
                StarRating::new(stars.trunc() as u32)
            }
            RatingValue::Number(_) => StarRating::unknown(),
            RatingValue::Text(text) => StarRating::parse(&text),
        }
    }
}

fn not_available() -> String {
    "N/A".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HotelDto {
    pub hotel_id: HotelCode,
    #[serde(default = "not_available")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "countryCode")]
    pub country_code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingValue>,
    #[serde(default)]
    pub avg_price_rate: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl From<HotelDto> for Hotel {
    fn from(dto: HotelDto) -> Self {
        Hotel {
            id: dto.hotel_id.into_string(),
            name: dto.name,
            description: dto.description,
            address: dto.address,
            city: dto.city,
            country_code: dto.country_code,
            rating: dto.rating.map(StarRating::from).unwrap_or_default(),
            avg_price: dto.avg_price_rate,
            currency: dto.currency,
            image: dto.image,
            date_added: dto.date_added,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookmarkDto {
    pub hotel_code: String,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl From<BookmarkDto> for BookmarkRecord {
    fn from(dto: BookmarkDto) -> Self {
        BookmarkRecord {
            hotel_code: dto.hotel_code,
            date_added: dto.date_added,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddBookmarkRequest<'a> {
    pub hotel_code: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LogoutRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

impl From<TokenPairResponse> for Session {
    fn from(tokens: TokenPairResponse) -> Self {
        Session::new(tokens.access, tokens.refresh)
    }
}

// Error body: either {"error": ...} or {"message": ...}.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

// Field-keyed validation errors of a 400 response.
#[derive(Debug, Default, Deserialize)]
pub struct FieldErrorsResponse {
    #[serde(default)]
    pub username: Vec<String>,
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(default)]
    pub password: Vec<String>,
    #[serde(default)]
    pub non_field_errors: Vec<String>,
}

impl From<FieldErrorsResponse> for FieldErrors {
    fn from(body: FieldErrorsResponse) -> Self {
        FieldErrors {
            username: body.username,
            email: body.email,
            password: body.password,
            non_field_errors: body.non_field_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_search_hotel_is_decoded_then_numeric_code_and_text_rating_are_normalised() {
        let json = r#"{
            "hotel_id": 1234,
            "name": "Hotel Lumiere",
            "description": "Near the river",
            "countryCode": "FR",
            "address": "1 Rue de Rivoli",
            "city": "PARIS",
            "rating": "4 STARS",
            "rating_s2c": "N/A",
            "avg_price_rate": 187.5,
            "currency": "EUR"
        }"#;

        let hotel: Hotel = serde_json::from_str::<HotelDto>(json)
            .expect("hotel decodes")
            .into();

        assert_eq!(hotel.id, "1234");
        assert_eq!(hotel.rating.value(), Some(4));
        assert_eq!(hotel.country_code.as_deref(), Some("FR"));
        assert_eq!(hotel.price(), 187.5);
        assert_eq!(hotel.date_added, None);
    }

    #[test]
    fn when_bookmarked_hotel_is_decoded_then_date_added_is_kept() {
        let json = r#"{"hotel_id": "77", "date_added": "2025-03-01T10:00:00.123456Z", "rating": 5}"#;

        let hotel: Hotel = serde_json::from_str::<HotelDto>(json)
            .expect("hotel decodes")
            .into();

        assert_eq!(hotel.name, "N/A");
        assert_eq!(hotel.rating.value(), Some(5));
        assert!(hotel.date_added.is_some());
    }

    #[test]
    fn when_error_body_has_error_or_message_then_either_is_used() {
        let error: ErrorResponse = serde_json::from_str(r#"{"error":"Bookmark already exists."}"#)
            .expect("body decodes");
        let message: ErrorResponse = serde_json::from_str(r#"{"message":"No bookmarks found."}"#)
            .expect("body decodes");

        assert_eq!(error.into_message().as_deref(), Some("Bookmark already exists."));
        assert_eq!(message.into_message().as_deref(), Some("No bookmarks found."));
    }
}
