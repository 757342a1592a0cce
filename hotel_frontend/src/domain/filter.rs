use std::cmp::Ordering;
use std::str::FromStr;

use crate::domain::criteria::StarSelection;
use crate::domain::hotel::Hotel;

const MAX_STARS: u32 = 5;

// Inclusive nightly price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0.0, 1000.0)
    }
}

/// Local filter of the bookmarks page. It never talks to the backend; it narrows the
/// already fetched bookmarked set.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkFilter {
    pub query: String,
    pub price: PriceRange,
    pub stars: StarSelection,
    pub max_stars: u32,
}

impl Default for BookmarkFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            price: PriceRange::default(),
            stars: StarSelection::default(),
            max_stars: MAX_STARS,
        }
    }
}

impl BookmarkFilter {
    /// The text query always applies; price, star set and star cutoff only when
    /// `include_filters` is set (the "Apply Filters" action).
    pub fn apply(&self, hotels: &[Hotel], include_filters: bool) -> Vec<Hotel> {
        hotels
            .iter()
            .filter(|hotel| self.matches_query(hotel))
            .filter(|hotel| !include_filters || self.matches_filters(hotel))
            .cloned()
            .collect()
    }

    pub fn matches_query(&self, hotel: &Hotel) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        let fields = [
            Some(hotel.name.as_str()),
            hotel.description.as_deref(),
            hotel.address.as_deref(),
            hotel.city.as_deref(),
        ];
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches_filters(&self, hotel: &Hotel) -> bool {
        let stars = hotel.rating.filter_value();
        if !self.price.contains(hotel.price()) {
            return false;
        }
        if !self.stars.is_empty() && !self.stars.contains(stars) {
            return false;
        }
        stars <= self.max_stars
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceLowToHigh,
    PriceHighToLow,
    StarsHighToLow,
    StarsLowToHigh,
    RecentlyAdded,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "price-low" => Ok(Self::PriceLowToHigh),
            "price-high" => Ok(Self::PriceHighToLow),
            "stars-high" => Ok(Self::StarsHighToLow),
            "stars-low" => Ok(Self::StarsLowToHigh),
            "recent" => Ok(Self::RecentlyAdded),
            other => Err(format!(
                "unknown sort order '{other}' (expected price-low, price-high, stars-high, stars-low or recent)"
            )),
        }
    }
}

// Stable sort; ties keep their fetched order.
pub fn sort_hotels(hotels: &mut [Hotel], order: SortOrder) {
    match order {
        SortOrder::PriceLowToHigh => hotels.sort_by(|a, b| a.price().total_cmp(&b.price())),
        SortOrder::PriceHighToLow => hotels.sort_by(|a, b| b.price().total_cmp(&a.price())),
        SortOrder::StarsHighToLow => {
            hotels.sort_by_key(|hotel| std::cmp::Reverse(hotel.rating.filter_value()))
        }
        SortOrder::StarsLowToHigh => hotels.sort_by_key(|hotel| hotel.rating.filter_value()),
        SortOrder::RecentlyAdded => hotels.sort_by(|a, b| match (a.date_added, b.date_added) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }
}
