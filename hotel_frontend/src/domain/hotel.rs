use chrono::{DateTime, Utc};

// Default card images by star bucket; unknown ratings fall back to the 3-star image.
const DEFAULT_IMAGES: [&str; 5] = [
    "https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "https://images.unsplash.com/photo-1571896349842-33c89424de2d?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "https://images.unsplash.com/photo-1517840901100-8179e982acb7?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
];

const DISPLAY_FALLBACK_STARS: u32 = 3;

/// Star category of a hotel.
///
/// The backend sends either a number or a descriptive string such as `"4 STARS"`;
/// only the leading integer is meaningful. Zero and unparsable values are unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarRating(Option<u32>);

impl StarRating {
    pub fn new(stars: u32) -> Self {
        Self((stars > 0).then_some(stars))
    }

    pub fn unknown() -> Self {
        Self(None)
    }

    pub fn parse(raw: &str) -> Self {
        let digits: String = raw
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits
            .parse::<u32>()
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn value(&self) -> Option<u32> {
        self.0
    }

    /// Value used by filters and sorting: unknown counts as zero stars.
    pub fn filter_value(&self) -> u32 {
        self.0.unwrap_or(0)
    }

    /// Value used for star icons and image buckets: unknown shows as three stars.
    pub fn display_value(&self) -> u32 {
        self.0.unwrap_or(DISPLAY_FALLBACK_STARS).clamp(1, 5)
    }
}

// A hotel as shown on the search and bookmarks pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub rating: StarRating,
    pub avg_price: Option<f64>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub date_added: Option<DateTime<Utc>>,
}

impl Hotel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            address: None,
            city: None,
            country_code: None,
            rating: StarRating::unknown(),
            avg_price: None,
            currency: None,
            image: None,
            date_added: None,
        }
    }

    pub fn price(&self) -> f64 {
        self.avg_price.unwrap_or(0.0)
    }

    pub fn image_url(&self) -> &str {
        match self.image.as_deref() {
            Some(image) if !image.is_empty() => image,
            _ => default_image(self.rating),
        }
    }

    pub fn location_line(&self) -> String {
        match self.address.as_deref() {
            Some(address) if !address.is_empty() => address.to_string(),
            _ => format!(
                "{}, {}",
                self.city.as_deref().unwrap_or_default(),
                self.country_code.as_deref().unwrap_or_default()
            ),
        }
    }

    pub fn description_text(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => "No description available",
        }
    }

    pub fn price_label(&self) -> String {
        let currency = match self.currency.as_deref() {
            Some(currency) if !currency.is_empty() => currency,
            _ => "night",
        };
        format!("${:.2}/{currency}", self.price())
    }
}

pub fn default_image(rating: StarRating) -> &'static str {
    let bucket = match rating.value() {
        Some(stars @ 1..=5) => stars,
        _ => DISPLAY_FALLBACK_STARS,
    };
    DEFAULT_IMAGES[(bucket - 1) as usize]
}
